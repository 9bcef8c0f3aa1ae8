// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Splitting 32-bit delays into 16-bit compare-match steps.
//!
//! A timer channel can only count [`FULL_CYCLE`] ticks between matches. A
//! delay of `delta` ticks is therefore armed as
//!
//! ```text
//! FULL_CYCLE + pending.full_cycles * FULL_CYCLE + pending.remainder
//! ```
//!
//! where the first, full-width interval is programmed by the caller and the
//! rest is walked down by [`advance`], one call per hardware match. Delays
//! that fit in a single interval are armed directly with nothing pending.
//!
//! This module has no state of its own; the ticker keeps the
//! [`PendingSteps`] and applies the [`Continuation`] to the hardware.

/// Ticks counted by one full-width hardware interval.
pub const FULL_CYCLE: u16 = 0xFFFF;

/// The part of a wake-up that has not been programmed into hardware yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingSteps {
    /// Full-width matches still to let pass, after the one currently armed.
    pub full_cycles: u16,
    /// Final interval to arm once `full_cycles` is exhausted. Zero means no
    /// final interval: the last full-width match is the wake-up.
    pub remainder: u16,
}

impl PendingSteps {
    pub const NONE: PendingSteps = PendingSteps {
        full_cycles: 0,
        remainder: 0,
    };

    pub fn is_empty(&self) -> bool {
        self.full_cycles == 0 && self.remainder == 0
    }

    /// Ticks still owed after the currently armed interval expires.
    pub fn ticks(&self) -> u32 {
        self.full_cycles as u32 * FULL_CYCLE as u32 + self.remainder as u32
    }
}

/// How to arm a delay: the first interval and what follows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decomposition {
    /// Compare value for the first hardware interval.
    pub first_interval: u16,
    pub pending: PendingSteps,
}

impl Decomposition {
    /// Total ticks from arming until the final match.
    pub fn total_ticks(&self) -> u32 {
        self.first_interval as u32 + self.pending.ticks()
    }
}

/// What the interrupt handler must do after a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Continuation {
    /// The compare-match source was not active; nothing happened.
    Spurious,
    /// Another full cycle is owed. The channel keeps its compare value and
    /// fires again by itself.
    KeepRunning,
    /// Restart the channel with this compare value; it is the last interval.
    Rearm(u16),
    /// This match is the requested wake-up.
    Expired,
}

/// Signed distance from `now` to `target`, modulo 2^32.
///
/// Negative means `target` is in the past.
pub fn delta(now: u32, target: u32) -> i32 {
    target.wrapping_sub(now) as i32
}

/// Plan the wake-up at `target` seen from `now`.
///
/// Returns `None` if `target` has already passed, in which case nothing
/// should be armed. A `target` equal to `now` is not in the past and yields a
/// zero-tick interval.
pub fn decompose(now: u32, target: u32) -> Option<Decomposition> {
    let delta = delta(now, target);
    if delta < 0 {
        return None;
    }
    let delta = delta as u32;
    let full = FULL_CYCLE as u32;

    if delta > full {
        // The first full interval is the one armed right away, so only the
        // others are left pending. With delta < 2^31 the count is at most
        // 32767 and fits.
        Some(Decomposition {
            first_interval: FULL_CYCLE,
            pending: PendingSteps {
                full_cycles: (delta / full - 1) as u16,
                remainder: (delta % full) as u16,
            },
        })
    } else {
        Some(Decomposition {
            first_interval: delta as u16,
            pending: PendingSteps::NONE,
        })
    }
}

/// Consume one hardware match.
///
/// `compare_matched` is whether the compare-match source is both flagged and
/// enabled; if it is not, `pending` is returned untouched.
pub fn advance(pending: PendingSteps, compare_matched: bool) -> (PendingSteps, Continuation) {
    if !compare_matched {
        return (pending, Continuation::Spurious);
    }

    if pending.full_cycles > 0 {
        (
            PendingSteps {
                full_cycles: pending.full_cycles - 1,
                remainder: pending.remainder,
            },
            Continuation::KeepRunning,
        )
    } else if pending.remainder > 0 {
        (PendingSteps::NONE, Continuation::Rearm(pending.remainder))
    } else {
        (PendingSteps::NONE, Continuation::Expired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    /// Feed matches to `advance` until expiry and return the interval that
    /// was armed before each match.
    fn intervals(plan: Decomposition) -> Vec<u16> {
        let mut armed = plan.first_interval;
        let mut pending = plan.pending;
        let mut out = Vec::new();
        loop {
            out.push(armed);
            let (next, cont) = advance(pending, true);
            pending = next;
            match cont {
                Continuation::KeepRunning => {}
                Continuation::Rearm(value) => armed = value,
                Continuation::Expired => return out,
                Continuation::Spurious => unreachable!(),
            }
        }
    }

    #[test]
    fn short_delay_is_single_interval() {
        let plan = decompose(0, 100).unwrap();
        assert_eq!(plan.first_interval, 100);
        assert_eq!(plan.pending, PendingSteps::NONE);
        assert_eq!(intervals(plan), [100]);
    }

    #[test]
    fn one_rollover_then_remainder() {
        let plan = decompose(0, 70000).unwrap();
        assert_eq!(plan.first_interval, 65535);
        assert_eq!(
            plan.pending,
            PendingSteps {
                full_cycles: 0,
                remainder: 4465
            }
        );
        assert_eq!(intervals(plan), [65535, 4465]);
    }

    #[test]
    fn several_rollovers_then_remainder() {
        let plan = decompose(0, 200000).unwrap();
        assert_eq!(
            plan.pending,
            PendingSteps {
                full_cycles: 2,
                remainder: 3395
            }
        );
        assert_eq!(intervals(plan), [65535, 65535, 65535, 3395]);
    }

    #[test]
    fn zero_delay_is_not_past() {
        let plan = decompose(500, 500).unwrap();
        assert_eq!(plan.first_interval, 0);
        assert_eq!(intervals(plan), [0]);
    }

    #[test]
    fn past_target_is_dropped() {
        assert_eq!(decompose(1000, 999), None);
        assert_eq!(decompose(0, 0x8000_0000), None);
    }

    #[test]
    fn delays_are_measured_across_wraparound() {
        let plan = decompose(0xFFFF_FF00, 0x0000_0010).unwrap();
        assert_eq!(plan.first_interval, 0x110);
        assert!(decompose(0x0000_0010, 0xFFFF_FF00).is_none());
    }

    #[test]
    fn full_cycle_boundaries() {
        let exact = decompose(0, 65535).unwrap();
        assert_eq!(exact.first_interval, 65535);
        assert!(exact.pending.is_empty());

        let one_over = decompose(0, 65536).unwrap();
        assert_eq!(one_over.first_interval, 65535);
        assert_eq!(
            one_over.pending,
            PendingSteps {
                full_cycles: 0,
                remainder: 1
            }
        );

        // Whole number of cycles: the last full match is the wake-up.
        let two = decompose(0, 2 * 65535).unwrap();
        assert_eq!(
            two.pending,
            PendingSteps {
                full_cycles: 1,
                remainder: 0
            }
        );
        assert_eq!(intervals(two), [65535, 65535]);
    }

    #[test]
    fn largest_future_delay_fits() {
        let plan = decompose(0, i32::MAX as u32).unwrap();
        assert_eq!(plan.pending.full_cycles, 32767);
        assert_eq!(plan.total_ticks(), i32::MAX as u32);
    }

    #[test]
    fn spurious_match_changes_nothing() {
        let pending = PendingSteps {
            full_cycles: 3,
            remainder: 12,
        };
        assert_eq!(
            advance(pending, false),
            (pending, Continuation::Spurious)
        );
        assert_eq!(
            advance(PendingSteps::NONE, false),
            (PendingSteps::NONE, Continuation::Spurious)
        );
    }

    #[test]
    fn remainder_is_consumed_once() {
        let (after, cont) = advance(
            PendingSteps {
                full_cycles: 0,
                remainder: 7,
            },
            true,
        );
        assert_eq!(cont, Continuation::Rearm(7));
        assert_eq!(advance(after, true).1, Continuation::Expired);
    }

    proptest! {
        #[test]
        fn past_targets_never_plan(now in any::<u32>(), back in 1u32..=0x8000_0000) {
            prop_assert_eq!(decompose(now, now.wrapping_sub(back)), None);
        }

        #[test]
        fn short_delays_arm_exactly(now in any::<u32>(), delta in 0u32..=65535) {
            let plan = decompose(now, now.wrapping_add(delta)).unwrap();
            prop_assert_eq!(plan.first_interval as u32, delta);
            prop_assert!(plan.pending.is_empty());
        }

        #[test]
        fn long_delays_sum_to_delta(now in any::<u32>(), delta in 65536u32..=0x7FFF_FFFF) {
            let plan = decompose(now, now.wrapping_add(delta)).unwrap();
            prop_assert_eq!(plan.first_interval, FULL_CYCLE);
            prop_assert_eq!(plan.pending.full_cycles as u32, delta / 65535 - 1);
            prop_assert_eq!(plan.pending.remainder as u32, delta % 65535);
            prop_assert_eq!(plan.total_ticks(), delta);
        }

        #[test]
        fn walked_intervals_sum_to_delta(delta in 0u32..=2_000_000) {
            let plan = decompose(0, delta).unwrap();
            let sum: u32 = intervals(plan).iter().map(|&i| i as u32).sum();
            prop_assert_eq!(sum, delta);
        }
    }
}

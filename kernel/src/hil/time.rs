// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Hardware agnostic interfaces for free-running time sources.
//!
//! A [`TimeBase`] is the shared, always-running clock every ticker reads
//! "now" from. It is 32 bits wide and wraps; all arithmetic on its values
//! must use wrapping operations. The [`OverflowCounter`] exposes how many
//! times the narrower hardware counter underneath a time base has wrapped,
//! which is what extends it to 32 bits in the first place.

/// Trait to represent clock frequency in Hz
///
/// This trait is used as an associated type for [`TimeBase`] so clients can
/// portably convert native ticks to real-time values.
pub trait Frequency {
    /// Returns frequency in Hz.
    fn frequency() -> u32;
}

/// 1MHz `Frequency`
#[derive(Debug)]
pub struct Freq1MHz;
impl Frequency for Freq1MHz {
    fn frequency() -> u32 {
        1_000_000
    }
}

/// A free-running 32-bit clock shared by every ticker on the chip.
pub trait TimeBase {
    type Frequency: Frequency;

    /// Bring the underlying hardware up if nobody has yet.
    ///
    /// Must be idempotent: any number of drivers may call this before they
    /// read the clock, and only the first call may touch hardware.
    fn ensure_initialized(&self);

    /// Returns the current time in ticks.
    fn read_tick(&self) -> u32;
}

/// Number of times a time base's hardware counter has wrapped.
pub trait OverflowCounter {
    /// Returns the current overflow count. This is a pure read.
    fn read_overflow_count(&self) -> u32;
}

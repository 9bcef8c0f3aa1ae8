// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Low-power ticker: one-shot wake-ups on a 16-bit timer channel.
//!
//! The ticker lets firmware ask for an interrupt at an absolute 32-bit tick
//! of the shared [`TimeBase`], although the channel it runs on can only count
//! to [`FULL_CYCLE`]. Longer delays are chained: the channel is armed for a
//! full cycle, left to re-fire on its own for as many further cycles as
//! needed, then rearmed once with the remainder. The match that ends the
//! last interval is the wake-up; it is reported to the [`TickerClient`] and
//! wakes the core if it was sleeping in [`LpTicker::sleep_until`].
//!
//! Only one wake-up is pending at a time. Scheduling again replaces it
//! without notice, and scheduling a target that has already passed does
//! nothing at all: callers must compare the time themselves.
//!
//! Usage
//! -----
//!
//! ```ignore
//! let ticker = static_init!(
//!     LpTicker<'static, TcChannel, Nvic, UsTicker<..>, UsTicker<..>, WfiSleep>,
//!     LpTicker::new(
//!         &peripherals.tc[2],
//!         &peripherals.tc_lines[2],
//!         us_ticker,
//!         us_ticker,
//!         &cortexm::sleep::WFI_SLEEP,
//!         TickerConfig::new(tc2_handler),
//!     )
//! );
//! peripherals.tc[2].set_client(ticker);
//!
//! let now = ticker.read_now();
//! ticker.sleep_until(now, now.wrapping_add(250_000));
//! ```

use core::cell::Cell;

use kernel::hil::time::{OverflowCounter, TimeBase};
use kernel::hil::timer_counter::{
    ClockSelect, InterruptSources, TimerChannel, TimerChannelClient,
};
use kernel::platform::interrupt::{InterruptHandler, InterruptLine, IrqGuard};
use kernel::platform::sleep::{Sleep, SleepContext, SleepMode};
use tracing::{debug, trace, warn};

use crate::config::CONFIG;
use crate::decomposition::{self, Continuation, PendingSteps};

pub use crate::decomposition::FULL_CYCLE;

/// Interrupt source the ticker runs on.
const COMPARE_MATCH: InterruptSources = InterruptSources::COMPARE_C;

/// Receives the wake-up.
pub trait TickerClient {
    /// The scheduled target tick has been reached.
    fn expired(&self);
}

/// Board-level settings of a ticker.
#[derive(Clone, Copy, Debug)]
pub struct TickerConfig {
    /// Clock the channel counts on.
    pub clock: ClockSelect,
    /// Controller priority of the channel's line.
    pub priority: u8,
    /// Entry point installed for the channel's line; it must end up calling
    /// the channel's interrupt handler.
    pub vector: InterruptHandler,
    /// Sleep depth used by `sleep_until`.
    pub sleep_mode: SleepMode,
}

impl TickerConfig {
    /// Slow clock, most urgent priority, plain sleep.
    pub const fn new(vector: InterruptHandler) -> TickerConfig {
        TickerConfig {
            clock: ClockSelect::TimerClock5,
            priority: 0,
            vector,
            sleep_mode: SleepMode::Sleep,
        }
    }

    pub const fn with_clock(mut self, clock: ClockSelect) -> TickerConfig {
        self.clock = clock;
        self
    }

    pub const fn with_priority(mut self, priority: u8) -> TickerConfig {
        self.priority = priority;
        self
    }

    pub const fn with_sleep_mode(mut self, sleep_mode: SleepMode) -> TickerConfig {
        self.sleep_mode = sleep_mode;
        self
    }
}

pub struct LpTicker<'a, C, L, T, O, S>
where
    C: TimerChannel<'a>,
    L: InterruptLine,
    T: TimeBase,
    O: OverflowCounter,
    S: Sleep,
{
    channel: &'a C,
    line: &'a L,
    time_base: &'a T,
    overflows: &'a O,
    sleep: &'a S,
    config: TickerConfig,

    initialized: Cell<bool>,
    /// A wake-up has been scheduled and not yet expired or disabled.
    armed: Cell<bool>,
    pending: Cell<PendingSteps>,
    last_target: Cell<u32>,
    client: Cell<Option<&'a dyn TickerClient>>,
}

impl<'a, C, L, T, O, S> LpTicker<'a, C, L, T, O, S>
where
    C: TimerChannel<'a>,
    L: InterruptLine,
    T: TimeBase,
    O: OverflowCounter,
    S: Sleep,
{
    pub fn new(
        channel: &'a C,
        line: &'a L,
        time_base: &'a T,
        overflows: &'a O,
        sleep: &'a S,
        config: TickerConfig,
    ) -> LpTicker<'a, C, L, T, O, S> {
        LpTicker {
            channel,
            line,
            time_base,
            overflows,
            sleep,
            config,
            initialized: Cell::new(false),
            armed: Cell::new(false),
            pending: Cell::new(PendingSteps::NONE),
            last_target: Cell::new(0),
            client: Cell::new(None),
        }
    }

    pub fn set_client(&self, client: &'a dyn TickerClient) {
        self.client.set(Some(client));
    }

    /// Bring up the time base and configure the channel. Only the first call
    /// does anything.
    pub fn init(&self) {
        if self.initialized.get() {
            return;
        }
        self.time_base.ensure_initialized();
        self.channel.configure(self.config.clock);
        self.initialized.set(true);
        debug!(
            irq = self.line.number(),
            clock = ?self.config.clock,
            "low-power ticker initialized"
        );
    }

    /// Current tick of the shared time base.
    pub fn read_now(&self) -> u32 {
        self.init();
        self.time_base.read_tick()
    }

    /// Wrap count of the time base. Independent of whether this ticker is
    /// initialized or enabled.
    pub fn get_overflow_count(&self) -> u32 {
        self.overflows.read_overflow_count()
    }

    /// Target passed to the last `schedule` that was not in the past.
    pub fn get_last_target(&self) -> u32 {
        self.init();
        self.last_target.get()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Part of the current wake-up not yet programmed into the channel.
    pub fn pending_steps(&self) -> PendingSteps {
        self.pending.get()
    }

    /// Arrange for the channel to interrupt at `target`, measured from `now`.
    ///
    /// If `target` is behind `now` (modulo 2^32, as a signed distance) the
    /// call does nothing: no interrupt is armed and no state changes. A
    /// previously scheduled wake-up is replaced.
    pub fn schedule(&self, now: u32, target: u32) {
        let plan = match decomposition::decompose(now, target) {
            Some(plan) => plan,
            None => {
                debug!(now, wake_at = target, "target already passed, not arming");
                return;
            }
        };

        self.init();

        debug!(
            now,
            wake_at = target,
            first = plan.first_interval,
            full_cycles = plan.pending.full_cycles,
            remainder = plan.pending.remainder,
            delay_ticks = plan.total_ticks(),
            "scheduling wake-up"
        );

        // The handler must never see the new plan with the old compare
        // value, or the reverse.
        let guard = IrqGuard::new(self.line);
        self.last_target.set(target);
        self.pending.set(plan.pending);
        self.armed.set(true);

        if let Err(error) = guard.line().set_vector(self.config.vector) {
            warn!(
                irq = self.line.number(),
                %error,
                "could not install ticker vector"
            );
        }
        self.channel.stop();
        // A match of the old plan may be latched; it must not count
        // against the new one.
        let _ = self.channel.read_status();
        self.channel.write_compare(plan.first_interval);
        guard.line().clear_pending();
        guard.line().set_priority(self.config.priority);
        drop(guard);

        self.channel.enable_interrupt(COMPARE_MATCH);
        self.channel.start();
    }

    /// Stop the channel and mask its interrupt.
    ///
    /// The pending steps are left as they are; they are meaningless after
    /// this and overwritten by the next `schedule`.
    pub fn disable_interrupt(&self) {
        self.channel.stop();
        self.channel.disable_interrupt(COMPARE_MATCH);
        self.line.disable();
        self.armed.set(false);
    }

    /// Clear the controller's pending flag for the line. The channel is not
    /// touched.
    pub fn clear_interrupt(&self) {
        self.line.clear_pending();
    }

    /// Schedule a wake-up at `target` and sleep until an interrupt arrives.
    ///
    /// Any interrupt ends the sleep, not only this ticker's. If `target` has
    /// already passed nothing is armed and the core still sleeps.
    pub fn sleep_until(&self, now: u32, target: u32) {
        self.schedule(now, target);
        let context = SleepContext::until(self.config.sleep_mode, target);
        self.sleep.enter_low_power_sleep(&context);
    }

    /// One compare match of the channel: walk the plan down by one step.
    fn handle_compare_match(&self) {
        let status = self.channel.read_status();
        let mask = self.channel.read_interrupt_mask();
        let matched = (status & mask).contains(COMPARE_MATCH);

        let (pending, continuation) = decomposition::advance(self.pending.get(), matched);
        self.pending.set(pending);

        match continuation {
            Continuation::Spurious => {
                warn!(status = status.bits(), mask = mask.bits(), "spurious ticker interrupt");
            }
            Continuation::KeepRunning => {
                if CONFIG.trace_steps {
                    trace!(full_cycles = pending.full_cycles, "full cycle elapsed");
                }
            }
            Continuation::Rearm(remainder) => {
                self.channel.stop();
                self.channel.write_compare(remainder);
                self.channel.start();
                if CONFIG.trace_steps {
                    trace!(remainder, "armed final interval");
                }
            }
            Continuation::Expired => {
                // The free-running channel matches again one wrap later
                // unless rescheduled or disabled; only the first match is
                // the wake-up.
                if self.armed.replace(false) {
                    if CONFIG.trace_steps {
                        trace!(wake_at = self.last_target.get(), "wake-up reached");
                    }
                    if let Some(client) = self.client.get() {
                        client.expired();
                    }
                }
            }
        }
    }
}

impl<'a, C, L, T, O, S> TimerChannelClient for LpTicker<'a, C, L, T, O, S>
where
    C: TimerChannel<'a>,
    L: InterruptLine,
    T: TimeBase,
    O: OverflowCounter,
    S: Sleep,
{
    fn fired(&self) {
        self.handle_compare_match();
    }
}

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! 32-bit free-running time base on a 16-bit timer channel.
//!
//! The channel counts through its whole range and the overflow interrupt
//! increments a software count of wraps. The count provides the upper half of
//! each tick, so the time base wraps after 2^32 ticks like any other.
//!
//! A wrap whose interrupt has not been taken yet is still latched in the
//! channel status. Reading the time folds it into the count first, so time
//! never appears to step back while the handler is delayed.

use core::cell::Cell;
use core::marker::PhantomData;

use kernel::hil::time::{Frequency, OverflowCounter, TimeBase};
use kernel::hil::timer_counter::{
    ClockSelect, InterruptSources, TimerChannel, TimerChannelClient,
};
use kernel::platform::interrupt::InterruptLine;
use tracing::debug;

pub struct UsTicker<'a, C: TimerChannel<'a>, L: InterruptLine, F: Frequency> {
    channel: &'a C,
    line: &'a L,
    clock: ClockSelect,
    initialized: Cell<bool>,
    overflows: Cell<u32>,
    _frequency: PhantomData<F>,
}

impl<'a, C: TimerChannel<'a>, L: InterruptLine, F: Frequency> UsTicker<'a, C, L, F> {
    /// `clock` must run the channel at `F`.
    pub fn new(channel: &'a C, line: &'a L, clock: ClockSelect) -> UsTicker<'a, C, L, F> {
        UsTicker {
            channel,
            line,
            clock,
            initialized: Cell::new(false),
            overflows: Cell::new(0),
            _frequency: PhantomData,
        }
    }

    /// Count a latched overflow, if any. Reading the status consumes it, so
    /// each wrap is counted once whether the handler or a reader sees it.
    fn collect_overflow(&self) {
        let status = self.channel.read_status();
        let mask = self.channel.read_interrupt_mask();
        if (status & mask).contains(InterruptSources::COUNTER_OVERFLOW) {
            self.overflows.set(self.overflows.get().wrapping_add(1));
        }
    }
}

impl<'a, C: TimerChannel<'a>, L: InterruptLine, F: Frequency> TimeBase for UsTicker<'a, C, L, F> {
    type Frequency = F;

    fn ensure_initialized(&self) {
        if self.initialized.get() {
            return;
        }
        self.channel.configure(self.clock);
        self.channel.enable_interrupt(InterruptSources::COUNTER_OVERFLOW);
        self.line.clear_pending();
        self.line.enable();
        self.channel.start();
        self.initialized.set(true);
        debug!(
            irq = self.line.number(),
            frequency = F::frequency(),
            "time base started"
        );
    }

    fn read_tick(&self) -> u32 {
        self.ensure_initialized();
        // A wrap between the two halves, taken by the handler or still
        // latched, would pair an old count with a new counter value; read
        // until the count is stable around the counter.
        loop {
            self.collect_overflow();
            let high = self.overflows.get();
            let low = self.channel.read_counter();
            self.collect_overflow();
            if self.overflows.get() == high {
                return (high << 16) | low as u32;
            }
        }
    }
}

impl<'a, C: TimerChannel<'a>, L: InterruptLine, F: Frequency> OverflowCounter
    for UsTicker<'a, C, L, F>
{
    fn read_overflow_count(&self) -> u32 {
        self.overflows.get()
    }
}

impl<'a, C: TimerChannel<'a>, L: InterruptLine, F: Frequency> TimerChannelClient
    for UsTicker<'a, C, L, F>
{
    fn fired(&self) {
        self.collect_overflow();
    }
}

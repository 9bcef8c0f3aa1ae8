// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Host-side stand-in for the timer channel, interrupt line, time base and
//! sleep primitive, recording every operation the capsules perform.

use core::cell::{Cell, RefCell};
use std::vec::Vec;

use kernel::hil::time::{Freq1MHz, OverflowCounter, TimeBase};
use kernel::hil::timer_counter::{
    ClockSelect, InterruptSources, TimerChannel, TimerChannelClient,
};
use kernel::platform::interrupt::{InterruptHandler, InterruptLine};
use kernel::platform::sleep::{Sleep, SleepContext};
use kernel::ErrorCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Op {
    Configure(ClockSelect),
    Start,
    Stop,
    WriteCompare(u16),
    EnableInterrupt(InterruptSources),
    DisableInterrupt(InterruptSources),
    IrqEnable,
    IrqDisable,
    IrqClearPending,
    IrqPriority(u8),
    IrqVector,
    TimeBaseInit,
    Sleep(SleepContext),
}

pub(crate) struct MockHardware<'a> {
    ops: RefCell<Vec<Op>>,
    client: Cell<Option<&'a dyn TimerChannelClient>>,

    running: Cell<bool>,
    compare: Cell<u16>,
    counter: Cell<u16>,
    status: Cell<InterruptSources>,
    mask: Cell<InterruptSources>,

    line_enabled: Cell<bool>,
    line_pending: Cell<bool>,
    vector: Cell<Option<InterruptHandler>>,
    vector_writable: Cell<bool>,

    tick: Cell<u32>,
    overflows: Cell<u32>,
}

impl<'a> MockHardware<'a> {
    pub(crate) fn new() -> MockHardware<'a> {
        MockHardware {
            ops: RefCell::new(Vec::new()),
            client: Cell::new(None),
            running: Cell::new(false),
            compare: Cell::new(0),
            counter: Cell::new(0),
            status: Cell::new(InterruptSources::empty()),
            mask: Cell::new(InterruptSources::empty()),
            line_enabled: Cell::new(false),
            line_pending: Cell::new(false),
            vector: Cell::new(None),
            vector_writable: Cell::new(true),
            tick: Cell::new(0),
            overflows: Cell::new(0),
        }
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.ops.borrow().clone()
    }

    pub(crate) fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    fn record(&self, op: Op) {
        self.ops.borrow_mut().push(op);
    }

    pub(crate) fn running(&self) -> bool {
        self.running.get()
    }

    pub(crate) fn compare(&self) -> u16 {
        self.compare.get()
    }

    pub(crate) fn line_enabled(&self) -> bool {
        self.line_enabled.get()
    }

    pub(crate) fn line_pending(&self) -> bool {
        self.line_pending.get()
    }

    pub(crate) fn interrupt_mask(&self) -> InterruptSources {
        self.mask.get()
    }

    pub(crate) fn vector_installed(&self) -> bool {
        self.vector.get().is_some()
    }

    pub(crate) fn make_vector_table_read_only(&self) {
        self.vector_writable.set(false);
    }

    pub(crate) fn set_tick(&self, tick: u32) {
        self.tick.set(tick);
    }

    pub(crate) fn set_counter(&self, counter: u16) {
        self.counter.set(counter);
    }

    pub(crate) fn set_overflows(&self, overflows: u32) {
        self.overflows.set(overflows);
    }

    /// Latch `sources` in the status register and pend the line, without
    /// running the handler.
    pub(crate) fn latch(&self, sources: InterruptSources) {
        self.status.set(self.status.get() | sources);
        self.line_pending.set(true);
    }

    /// Whether latched, enabled events still request an interrupt.
    pub(crate) fn requesting(&self) -> bool {
        self.status.get().intersects(self.mask.get())
    }

    /// Latch `sources` and run the channel client as the interrupt handler
    /// would.
    pub(crate) fn fire(&self, sources: InterruptSources) {
        self.latch(sources);
        if let Some(client) = self.client.get() {
            client.fired();
        }
    }

    /// Fire the compare-match interrupt and report the interval that had to
    /// elapse for it.
    pub(crate) fn fire_compare(&self) -> u16 {
        assert!(self.running.get(), "compare match on a stopped channel");
        let elapsed = self.compare.get();
        self.fire(InterruptSources::COMPARE_C);
        elapsed
    }
}

impl<'a> TimerChannel<'a> for MockHardware<'a> {
    fn configure(&self, clock: ClockSelect) {
        self.running.set(false);
        self.mask.set(InterruptSources::empty());
        self.status.set(InterruptSources::empty());
        self.record(Op::Configure(clock));
    }

    fn start(&self) {
        self.running.set(true);
        self.counter.set(0);
        self.record(Op::Start);
    }

    fn stop(&self) {
        self.running.set(false);
        self.record(Op::Stop);
    }

    fn write_compare(&self, value: u16) {
        self.compare.set(value);
        self.record(Op::WriteCompare(value));
    }

    fn read_counter(&self) -> u16 {
        self.counter.get()
    }

    fn enable_interrupt(&self, sources: InterruptSources) {
        self.mask.set(self.mask.get() | sources);
        self.record(Op::EnableInterrupt(sources));
    }

    fn disable_interrupt(&self, sources: InterruptSources) {
        self.mask.set(self.mask.get() - sources);
        self.record(Op::DisableInterrupt(sources));
    }

    fn read_status(&self) -> InterruptSources {
        self.status.replace(InterruptSources::empty())
    }

    fn read_interrupt_mask(&self) -> InterruptSources {
        self.mask.get()
    }

    fn set_client(&self, client: &'a dyn TimerChannelClient) {
        self.client.set(Some(client));
    }
}

impl InterruptLine for MockHardware<'_> {
    fn number(&self) -> u32 {
        25
    }

    fn enable(&self) {
        self.line_enabled.set(true);
        self.record(Op::IrqEnable);
    }

    fn disable(&self) {
        self.line_enabled.set(false);
        self.record(Op::IrqDisable);
    }

    fn clear_pending(&self) {
        self.line_pending.set(false);
        self.record(Op::IrqClearPending);
    }

    fn set_priority(&self, priority: u8) {
        self.record(Op::IrqPriority(priority));
    }

    fn set_vector(&self, handler: InterruptHandler) -> Result<(), ErrorCode> {
        self.record(Op::IrqVector);
        if self.vector_writable.get() {
            self.vector.set(Some(handler));
            Ok(())
        } else {
            Err(ErrorCode::NOSUPPORT)
        }
    }
}

impl TimeBase for MockHardware<'_> {
    type Frequency = Freq1MHz;

    fn ensure_initialized(&self) {
        self.record(Op::TimeBaseInit);
    }

    fn read_tick(&self) -> u32 {
        self.tick.get()
    }
}

impl OverflowCounter for MockHardware<'_> {
    fn read_overflow_count(&self) -> u32 {
        self.overflows.get()
    }
}

impl Sleep for MockHardware<'_> {
    fn enter_low_power_sleep(&self, context: &SleepContext) {
        self.record(Op::Sleep(*context));
    }
}

/// Entry point handed to `set_vector` in tests.
pub(crate) extern "C" fn test_vector() {}

/// Route `tracing` output through the test harness so it is shown for
/// failing tests.
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

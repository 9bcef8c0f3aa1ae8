// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for one channel of a 16-bit timer/counter peripheral.
//!
//! A channel free-runs from zero on its selected clock through the whole
//! 16-bit range, raising a counter-overflow event on each wrap. It raises a
//! compare-match event whenever the counter passes the value held in its
//! compare register, so a standing compare value matches once per wrap until
//! the channel is stopped.

use bitflags::bitflags;

/// Clock feeding a timer channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockSelect {
    /// Fastest internal tap.
    TimerClock1,
    TimerClock2,
    TimerClock3,
    TimerClock4,
    /// Slowest internal tap. On most parts this is the slow (32KHz) clock,
    /// which keeps running in deep sleep.
    TimerClock5,
    External0,
    External1,
    External2,
}

bitflags! {
    /// Interrupt sources of a timer channel, as they appear in the status,
    /// enable, disable and mask registers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct InterruptSources: u32 {
        /// Counter overflow
        const COUNTER_OVERFLOW = 1 << 0;
        /// Load overrun
        const LOAD_OVERRUN = 1 << 1;
        /// Compare register A match
        const COMPARE_A = 1 << 2;
        /// Compare register B match
        const COMPARE_B = 1 << 3;
        /// Compare register C match
        const COMPARE_C = 1 << 4;
        /// Register A load
        const LOAD_A = 1 << 5;
        /// Register B load
        const LOAD_B = 1 << 6;
        /// External trigger
        const EXTERNAL_TRIGGER = 1 << 7;
    }
}

/// Client of a timer channel, called from the channel's interrupt handler.
pub trait TimerChannelClient {
    /// One of the channel's enabled interrupt sources fired. The client is
    /// responsible for reading the status to find out which.
    fn fired(&self);
}

pub trait TimerChannel<'a> {
    /// Set the channel up to free-run on `clock`, with every interrupt
    /// source disabled and no event latched. The channel is left stopped.
    fn configure(&self, clock: ClockSelect);

    /// Start (or restart from zero) counting.
    fn start(&self);

    /// Stop counting.
    fn stop(&self);

    /// Set the compare value that raises `COMPARE_C`.
    fn write_compare(&self, value: u16);

    /// Current counter value.
    fn read_counter(&self) -> u16;

    fn enable_interrupt(&self, sources: InterruptSources);

    fn disable_interrupt(&self, sources: InterruptSources);

    /// Read the interrupt status. On most hardware this clears the
    /// reported flags.
    fn read_status(&self) -> InterruptSources;

    /// Sources currently enabled to raise an interrupt.
    fn read_interrupt_mask(&self) -> InterruptSources;

    fn set_client(&self, client: &'a dyn TimerChannelClient);
}

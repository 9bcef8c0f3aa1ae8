// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Timer Counter (TC).
//!
//! The SAMG55 has two TC blocks of three 16-bit channels each. Channels are
//! run in waveform mode with `WAVSEL = UP`: the counter free-runs to 0xFFFF
//! and wraps, so RC compares once per wrap and never restarts the count.

use core::cell::Cell;

use kernel::hil::timer_counter::{
    ClockSelect, InterruptSources, TimerChannel, TimerChannelClient,
};
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::{
    register_bitfields, register_structs, FieldValue, ReadOnly, ReadWrite, WriteOnly,
};
use kernel::utilities::StaticRef;

use crate::pmc;

register_structs! {
    TcChannelRegisters {
        /// Channel Control Register
        (0x00 => ccr: WriteOnly<u32, ChannelControl::Register>),

        /// Channel Mode Register (waveform mode layout)
        (0x04 => cmr: ReadWrite<u32, ChannelMode::Register>),

        // SMMR, RAB
        (0x08 => _reserved0),

        /// Counter Value
        (0x10 => cv: ReadOnly<u32, CounterValue::Register>),

        // RA, RB
        (0x14 => _reserved1),

        /// Register C
        (0x1c => rc: ReadWrite<u32, CounterValue::Register>),

        /// Status Register. Reading clears the event flags.
        (0x20 => sr: ReadOnly<u32, Interrupt::Register>),

        /// Interrupt Enable Register
        (0x24 => ier: WriteOnly<u32, Interrupt::Register>),

        /// Interrupt Disable Register
        (0x28 => idr: WriteOnly<u32, Interrupt::Register>),

        /// Interrupt Mask Register
        (0x2c => imr: ReadOnly<u32, Interrupt::Register>),

        (0x30 => _reserved2),

        (0x40 => @END),
    }
}

register_structs! {
    pub TcRegisters {
        (0x00 => channels: [TcChannelRegisters; 3]),

        // BCR, BMR, QDEC and write protection
        (0xc0 => _reserved0),

        (0x100 => @END),
    }
}

register_bitfields![u32,
    ChannelControl [
        /// Software Trigger
        SWTRG   OFFSET(2)   NUMBITS(1) [],
        /// Counter Clock Disable
        CLKDIS  OFFSET(1)   NUMBITS(1) [],
        /// Counter Clock Enable
        CLKEN   OFFSET(0)   NUMBITS(1) []
    ],

    ChannelMode [
        /// Waveform Mode
        WAVE    OFFSET(15)  NUMBITS(1) [],
        /// Waveform Selection
        WAVSEL  OFFSET(13)  NUMBITS(2) [
            Up = 0,
            UpDown = 1,
            UpRc = 2,
            UpDownRc = 3
        ],
        /// Clock Selection
        TCCLKS  OFFSET(0)   NUMBITS(3) [
            TimerClock1 = 0,
            TimerClock2 = 1,
            TimerClock3 = 2,
            TimerClock4 = 3,
            TimerClock5 = 4,
            Xc0 = 5,
            Xc1 = 6,
            Xc2 = 7
        ]
    ],

    CounterValue [
        VALUE   OFFSET(0)   NUMBITS(16) []
    ],

    Interrupt [
        /// External Trigger
        ETRGS   OFFSET(7)   NUMBITS(1) [],
        /// RB Loading
        LDRBS   OFFSET(6)   NUMBITS(1) [],
        /// RA Loading
        LDRAS   OFFSET(5)   NUMBITS(1) [],
        /// RC Compare
        CPCS    OFFSET(4)   NUMBITS(1) [],
        /// RB Compare
        CPBS    OFFSET(3)   NUMBITS(1) [],
        /// RA Compare
        CPAS    OFFSET(2)   NUMBITS(1) [],
        /// Load Overrun
        LOVRS   OFFSET(1)   NUMBITS(1) [],
        /// Counter Overflow
        COVFS   OFFSET(0)   NUMBITS(1) []
    ]
];

pub const TC0_BASE: StaticRef<TcRegisters> =
    unsafe { StaticRef::new(0x40010000 as *const TcRegisters) };

pub const TC1_BASE: StaticRef<TcRegisters> =
    unsafe { StaticRef::new(0x40014000 as *const TcRegisters) };

/// Event flags of the status register. The layout matches
/// `InterruptSources`.
const EVENT_MASK: u32 = 0xFF;

fn clock_source(clock: ClockSelect) -> u32 {
    match clock {
        ClockSelect::TimerClock1 => 0,
        ClockSelect::TimerClock2 => 1,
        ClockSelect::TimerClock3 => 2,
        ClockSelect::TimerClock4 => 3,
        ClockSelect::TimerClock5 => 4,
        ClockSelect::External0 => 5,
        ClockSelect::External1 => 6,
        ClockSelect::External2 => 7,
    }
}

fn channel_mode(clock: ClockSelect) -> FieldValue<u32, ChannelMode::Register> {
    ChannelMode::WAVE::SET
        + ChannelMode::WAVSEL::Up
        + ChannelMode::TCCLKS.val(clock_source(clock))
}

pub struct TcChannel<'a> {
    registers: StaticRef<TcRegisters>,
    channel: usize,
    peripheral_id: u32,
    client: Cell<Option<&'a dyn TimerChannelClient>>,
}

impl<'a> TcChannel<'a> {
    /// Channel `channel` (0 to 2) of the block at `registers`, gated by PMC
    /// peripheral `peripheral_id`.
    pub const fn new(
        registers: StaticRef<TcRegisters>,
        channel: usize,
        peripheral_id: u32,
    ) -> TcChannel<'a> {
        TcChannel {
            registers,
            channel,
            peripheral_id,
            client: Cell::new(None),
        }
    }

    fn regs(&self) -> &TcChannelRegisters {
        &self.registers.channels[self.channel]
    }

    pub fn handle_interrupt(&self) {
        if let Some(client) = self.client.get() {
            client.fired();
        }
    }
}

impl<'a> TimerChannel<'a> for TcChannel<'a> {
    fn configure(&self, clock: ClockSelect) {
        if !pmc::is_peripheral_clock_enabled(self.peripheral_id) {
            pmc::enable_peripheral_clock(self.peripheral_id);
        }

        let regs = self.regs();
        regs.ccr.write(ChannelControl::CLKDIS::SET);
        regs.idr.set(EVENT_MASK);
        // Discard events latched under the previous configuration.
        let _ = regs.sr.get();
        regs.cmr.write(channel_mode(clock));
    }

    fn start(&self) {
        self.regs()
            .ccr
            .write(ChannelControl::CLKEN::SET + ChannelControl::SWTRG::SET);
    }

    fn stop(&self) {
        self.regs().ccr.write(ChannelControl::CLKDIS::SET);
    }

    fn write_compare(&self, value: u16) {
        self.regs().rc.write(CounterValue::VALUE.val(value as u32));
    }

    fn read_counter(&self) -> u16 {
        self.regs().cv.read(CounterValue::VALUE) as u16
    }

    fn enable_interrupt(&self, sources: InterruptSources) {
        self.regs().ier.set(sources.bits() & EVENT_MASK);
    }

    fn disable_interrupt(&self, sources: InterruptSources) {
        self.regs().idr.set(sources.bits() & EVENT_MASK);
    }

    fn read_status(&self) -> InterruptSources {
        InterruptSources::from_bits_truncate(self.regs().sr.get())
    }

    fn read_interrupt_mask(&self) -> InterruptSources {
        InterruptSources::from_bits_truncate(self.regs().imr.get())
    }

    fn set_client(&self, client: &'a dyn TimerChannelClient) {
        self.client.set(Some(client));
    }
}

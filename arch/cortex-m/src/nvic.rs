// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Cortex-M NVIC
//!
//! Most NVIC configuration is in the NVIC registers:
//! <https://developer.arm.com/docs/100165/0201/nested-vectored-interrupt-controller/nvic-programmers-model/table-of-nvic-registers>
//!
//! The entry points themselves live in the vector table pointed to by the
//! SCB's VTOR. A table relocated to SRAM can be patched at runtime; a table
//! still in flash can only be checked.

use core::ptr;

use kernel::platform::interrupt::{InterruptHandler, InterruptLine};
use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::{register_bitfields, register_structs, ReadWrite};
use kernel::utilities::StaticRef;
use kernel::ErrorCode;

use crate::{scb, support};

register_structs! {
    /// NVIC Registers.
    ///
    /// Note this generic interface exposes all possible NVICs. Most cores will
    /// not implement all NVIC_XXXX registers.
    NvicRegisters {
        (0x000 => _reserved0),

        /// Interrupt Set-Enable Registers
        (0x100 => iser: [ReadWrite<u32, NvicSetClear::Register>; 32]),

        /// Interrupt Clear-Enable Registers
        (0x180 => icer: [ReadWrite<u32, NvicSetClear::Register>; 32]),

        (0x200 => _reserved1),

        /// Interrupt Clear-Pending Registers
        (0x280 => icpr: [ReadWrite<u32, NvicSetClear::Register>; 32]),

        (0x300 => _reserved2),

        /// Interrupt Priority Registers
        (0x400 => ipr: [ReadWrite<u32, NvicInterruptPriority::Register>; 252]),

        (0x7f0 => @END),
    }
}

register_bitfields![u32,
    NvicSetClear [
        /// For register NVIC_XXXXn, access interrupt (m+(32*n)).
        BITS            OFFSET(0)   NUMBITS(32)
    ],

    NvicInterruptPriority [
        /// For register NVIC_IPRn, priority of interrupt number 4n+3.
        PRI_N3          OFFSET(24)  NUMBITS(8),

        /// For register NVIC_IPRn, priority of interrupt number 4n+2.
        PRI_N2          OFFSET(16)  NUMBITS(8),

        /// For register NVIC_IPRn, priority of interrupt number 4n+1.
        PRI_N1          OFFSET(8)   NUMBITS(8),

        /// For register NVIC_IPRn, priority of interrupt number 4n.
        PRI_N0          OFFSET(0)   NUMBITS(8)
    ]
];

/// The NVIC peripheral in MMIO space.
const NVIC: StaticRef<NvicRegisters> =
    unsafe { StaticRef::new(0xe000e000 as *const NvicRegisters) };

/// Number of system exception entries before the first external interrupt
/// in the vector table.
const SYSTEM_EXCEPTIONS: u32 = 16;

/// Start and end of the Cortex-M SRAM region in the default memory map.
const SRAM_START: u32 = 0x2000_0000;
const SRAM_END: u32 = 0x4000_0000;

/// IPR register index and bit shift of the priority byte for `idx`.
fn priority_position(idx: u32) -> (usize, u32) {
    ((idx / 4) as usize, (idx % 4) * 8)
}

/// Priority byte for `priority` on a core implementing `bits` priority bits.
/// Only the upper `bits` bits of the byte are implemented; a core never
/// implements more than eight.
fn priority_byte(priority: u8, bits: u8) -> u32 {
    let unimplemented = 8 - bits.min(8) as u32;
    ((priority as u32) << unimplemented) & 0xFF
}

/// Address of the vector table entry for external interrupt `idx`.
fn vector_slot(table: u32, idx: u32) -> u32 {
    table + (SYSTEM_EXCEPTIONS + idx) * 4
}

/// Whether a vector table at `table` can be written at runtime.
fn is_writable_table(table: u32) -> bool {
    (SRAM_START..SRAM_END).contains(&table)
}

/// An opaque wrapper for a single NVIC interrupt.
///
/// Hand these out to low-level driver to let them control their own interrupts
/// but not others.
pub struct Nvic {
    idx: u32,
    priority_bits: u8,
}

impl Nvic {
    /// Creates a new `Nvic` on a core implementing all eight priority bits.
    ///
    /// Marked unsafe because only chip/platform configuration code should be
    /// able to create these.
    pub const unsafe fn new(idx: u32) -> Nvic {
        Nvic {
            idx,
            priority_bits: 8,
        }
    }

    /// Number of priority bits the core implements (`__NVIC_PRIO_BITS`),
    /// at most eight.
    pub const fn with_priority_bits(self, priority_bits: u8) -> Nvic {
        assert!(priority_bits <= 8, "NVIC priority is at most eight bits");
        Nvic {
            idx: self.idx,
            priority_bits,
        }
    }
}

impl InterruptLine for Nvic {
    fn number(&self) -> u32 {
        self.idx
    }

    /// Enable the interrupt
    fn enable(&self) {
        let idx = self.idx as usize;

        NVIC.iser[idx / 32].set(1 << (self.idx & 31));
    }

    /// Disable the interrupt
    fn disable(&self) {
        let idx = self.idx as usize;

        NVIC.icer[idx / 32].set(1 << (self.idx & 31));
    }

    /// Clear pending state
    fn clear_pending(&self) {
        let idx = self.idx as usize;

        NVIC.icpr[idx / 32].set(1 << (self.idx & 31));
    }

    fn set_priority(&self, priority: u8) {
        let (register, shift) = priority_position(self.idx);
        let ipr = &NVIC.ipr[register];
        let value = priority_byte(priority, self.priority_bits);
        ipr.set((ipr.get() & !(0xFF << shift)) | (value << shift));
    }

    fn set_vector(&self, handler: InterruptHandler) -> Result<(), ErrorCode> {
        let table = scb::vector_table_address();
        let slot = vector_slot(table, self.idx) as usize as *mut u32;
        let entry = handler as usize as u32;

        if is_writable_table(table) {
            unsafe {
                ptr::write_volatile(slot, entry);
                support::dsb();
            }
            Ok(())
        } else if unsafe { ptr::read_volatile(slot) } == entry {
            Ok(())
        } else {
            Err(ErrorCode::NOSUPPORT)
        }
    }
}

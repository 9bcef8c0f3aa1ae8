// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Power Management Controller, peripheral clock gating only.

use kernel::utilities::registers::interfaces::{Readable, Writeable};
use kernel::utilities::registers::{register_structs, ReadOnly, WriteOnly};
use kernel::utilities::StaticRef;

register_structs! {
    PmcRegisters {
        (0x000 => _reserved0),

        /// Peripheral Clock Enable Register 0
        (0x010 => pcer0: WriteOnly<u32>),

        (0x014 => _reserved1),

        /// Peripheral Clock Status Register 0
        (0x018 => pcsr0: ReadOnly<u32>),

        (0x01c => _reserved2),

        /// Peripheral Clock Enable Register 1
        (0x100 => pcer1: WriteOnly<u32>),

        (0x104 => _reserved3),

        /// Peripheral Clock Status Register 1
        (0x108 => pcsr1: ReadOnly<u32>),

        (0x10c => @END),
    }
}

const PMC_BASE: StaticRef<PmcRegisters> =
    unsafe { StaticRef::new(0x400E0400 as *const PmcRegisters) };

/// Register bank and bit for peripheral identifier `id`.
fn clock_bit(id: u32) -> (usize, u32) {
    ((id / 32) as usize, 1 << (id % 32))
}

pub fn enable_peripheral_clock(id: u32) {
    match clock_bit(id) {
        (0, bit) => PMC_BASE.pcer0.set(bit),
        (_, bit) => PMC_BASE.pcer1.set(bit),
    }
}

pub fn is_peripheral_clock_enabled(id: u32) -> bool {
    match clock_bit(id) {
        (0, bit) => PMC_BASE.pcsr0.get() & bit != 0,
        (_, bit) => PMC_BASE.pcsr1.get() & bit != 0,
    }
}

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Named interrupts for the SAMG55 chip.
//!
//! On this part the NVIC number of a peripheral is also its PMC peripheral
//! identifier.

pub const TC0: u32 = 23;
pub const TC1: u32 = 24;
pub const TC2: u32 = 25;
pub const TC3: u32 = 26;
pub const TC4: u32 = 27;
pub const TC5: u32 = 28;

/// Number of NVIC priority bits implemented by the Cortex-M4 core.
pub const NVIC_PRIO_BITS: u8 = 4;

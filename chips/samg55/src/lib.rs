// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral implementations for the SAMG55 MCU.
//!
//! <https://www.microchip.com/en-us/product/ATSAMG55J19>

#![crate_name = "samg55"]
#![crate_type = "rlib"]
#![cfg_attr(not(test), no_std)]

pub mod chip;
pub mod interrupts;
pub mod pmc;
pub mod tc;

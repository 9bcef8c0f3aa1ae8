// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core interfaces for the low-power ticker.
//!
//! The kernel crate holds the Hardware Interface Layer (HIL) definitions that
//! the ticker capsule is written against, the platform interfaces for the
//! interrupt controller and the CPU sleep primitive, and the small set of
//! utilities (MMIO pointers, register re-exports) shared by the `arch` and
//! `chips` crates.

#![cfg_attr(not(test), no_std)]
#![warn(unreachable_pub)]

pub mod errorcode;
pub mod hil;
pub mod platform;
pub mod utilities;

pub use crate::errorcode::ErrorCode;

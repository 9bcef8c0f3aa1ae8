// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Low-power ticker capsules.
//!
//! - [`lp_ticker`]: one-shot wake-up interrupts at an arbitrary 32-bit tick,
//!   chained over a 16-bit compare-match timer channel.
//! - [`us_ticker`]: the free-running 32-bit time base, built from a second
//!   16-bit channel and a software overflow count.
//! - [`decomposition`]: the hardware-independent arithmetic both of the
//!   above rely on.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

mod config;
pub mod decomposition;
pub mod lp_ticker;
pub mod us_ticker;

#[cfg(test)]
mod mock;

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Compile-time configuration of the ticker capsules.
//!
//! Values are selected with cargo features and read through `CONFIG`, so
//! code behind a disabled option is still compiled and type-checked.

pub(crate) struct Config {
    /// Emit a `trace` event for every step of a chained wake-up. Set by the
    /// `trace_ticker_steps` feature.
    pub(crate) trace_steps: bool,
}

pub(crate) const CONFIG: Config = Config {
    trace_steps: cfg!(feature = "trace_ticker_steps"),
};

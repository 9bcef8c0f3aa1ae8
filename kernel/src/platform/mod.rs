// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces to the CPU core: interrupt controller lines and sleep.

pub mod interrupt;
pub mod sleep;

// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! CPU low-power sleep.

/// How deeply the core may sleep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepMode {
    /// Core clock gated, peripherals running.
    Sleep,
    /// Core and high-speed clocks stopped. Only peripherals running from the
    /// slow clock can wake the core.
    DeepSleep,
}

/// Describes one trip into low-power mode.
///
/// A context is created for each sleep and lives only for the duration of
/// it; implementations must restore any state they change for `mode` before
/// returning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SleepContext {
    mode: SleepMode,
    wake_target: u32,
}

impl SleepContext {
    /// A sleep expected to end at tick `target` of the time base.
    pub const fn until(mode: SleepMode, target: u32) -> SleepContext {
        SleepContext {
            mode,
            wake_target: target,
        }
    }

    pub fn mode(&self) -> SleepMode {
        self.mode
    }
}

pub trait Sleep {
    /// Suspend the CPU until any interrupt is taken, then return.
    fn enter_low_power_sleep(&self, context: &SleepContext);
}

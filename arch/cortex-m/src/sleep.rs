// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Low-power sleep with WFI.

use kernel::platform::sleep::{Sleep, SleepContext, SleepMode};

use crate::{scb, support};

/// Puts the core to sleep with WFI, using SCR.SLEEPDEEP to pick the depth.
pub struct WfiSleep;

pub static WFI_SLEEP: WfiSleep = WfiSleep;

impl Sleep for WfiSleep {
    fn enter_low_power_sleep(&self, context: &SleepContext) {
        let deep = context.mode() == SleepMode::DeepSleep;
        unsafe {
            if deep {
                scb::set_sleepdeep();
            } else {
                scb::unset_sleepdeep();
            }
            support::dsb();
            support::wfi();
            support::isb();
            if deep {
                scb::unset_sleepdeep();
            }
        }
    }
}

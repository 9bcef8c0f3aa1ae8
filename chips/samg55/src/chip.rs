// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral ownership and interrupt dispatch.

use cortexm::nvic::Nvic;
use kernel::platform::interrupt::InterruptService;

use crate::interrupts;
use crate::tc::{TcChannel, TC0_BASE, TC1_BASE};

/// This struct, when initialized, instantiates the timer channels of both TC
/// blocks and the NVIC lines that serve them. TCn is channel `n % 3` of block
/// `n / 3`.
pub struct Samg55DefaultPeripherals<'a> {
    pub tc: [TcChannel<'a>; 6],
    pub tc_lines: [Nvic; 6],
}

impl<'a> Samg55DefaultPeripherals<'a> {
    pub unsafe fn new() -> Self {
        Self {
            tc: [
                TcChannel::new(TC0_BASE, 0, interrupts::TC0),
                TcChannel::new(TC0_BASE, 1, interrupts::TC1),
                TcChannel::new(TC0_BASE, 2, interrupts::TC2),
                TcChannel::new(TC1_BASE, 0, interrupts::TC3),
                TcChannel::new(TC1_BASE, 1, interrupts::TC4),
                TcChannel::new(TC1_BASE, 2, interrupts::TC5),
            ],
            tc_lines: [
                Nvic::new(interrupts::TC0).with_priority_bits(interrupts::NVIC_PRIO_BITS),
                Nvic::new(interrupts::TC1).with_priority_bits(interrupts::NVIC_PRIO_BITS),
                Nvic::new(interrupts::TC2).with_priority_bits(interrupts::NVIC_PRIO_BITS),
                Nvic::new(interrupts::TC3).with_priority_bits(interrupts::NVIC_PRIO_BITS),
                Nvic::new(interrupts::TC4).with_priority_bits(interrupts::NVIC_PRIO_BITS),
                Nvic::new(interrupts::TC5).with_priority_bits(interrupts::NVIC_PRIO_BITS),
            ],
        }
    }
}

impl InterruptService for Samg55DefaultPeripherals<'_> {
    unsafe fn service_interrupt(&self, interrupt: u32) -> bool {
        match interrupt {
            interrupts::TC0 => self.tc[0].handle_interrupt(),
            interrupts::TC1 => self.tc[1].handle_interrupt(),
            interrupts::TC2 => self.tc[2].handle_interrupt(),
            interrupts::TC3 => self.tc[3].handle_interrupt(),
            interrupts::TC4 => self.tc[4].handle_interrupt(),
            interrupts::TC5 => self.tc[5].handle_interrupt(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use kernel::hil::timer_counter::{TimerChannel, TimerChannelClient};
    use kernel::platform::interrupt::InterruptLine;

    struct Count(Cell<u32>);

    impl TimerChannelClient for Count {
        fn fired(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn lines_follow_channels() {
        let peripherals = unsafe { Samg55DefaultPeripherals::new() };
        for (n, line) in peripherals.tc_lines.iter().enumerate() {
            assert_eq!(line.number(), interrupts::TC0 + n as u32);
        }
    }

    #[test]
    fn dispatches_to_owning_channel() {
        let lp = Count(Cell::new(0));
        let us = Count(Cell::new(0));
        let peripherals = unsafe { Samg55DefaultPeripherals::new() };
        peripherals.tc[2].set_client(&lp);
        peripherals.tc[0].set_client(&us);

        assert!(unsafe { peripherals.service_interrupt(interrupts::TC2) });
        assert!(unsafe { peripherals.service_interrupt(interrupts::TC2) });
        assert!(unsafe { peripherals.service_interrupt(interrupts::TC0) });
        // A channel without a client is still serviced.
        assert!(unsafe { peripherals.service_interrupt(interrupts::TC4) });

        assert_eq!(lp.0.get(), 2);
        assert_eq!(us.0.get(), 1);
    }

    #[test]
    fn other_interrupts_are_not_serviced() {
        let peripherals = unsafe { Samg55DefaultPeripherals::new() };
        assert!(!unsafe { peripherals.service_interrupt(0) });
        assert!(!unsafe { peripherals.service_interrupt(interrupts::TC5 + 1) });
    }
}

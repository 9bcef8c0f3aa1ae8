// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for a single interrupt controller line.
//!
//! Chip configuration code hands an [`InterruptLine`] to a low-level driver
//! so that it can control its own interrupt but not others. Drivers that
//! must reprogram hardware without racing their own handler wrap the
//! reprogramming in an [`IrqGuard`]:
//!
//! ```ignore
//! {
//!     let _guard = IrqGuard::new(line);
//!     // line is masked here; the handler cannot observe partial state
//!     channel.write_compare(value);
//! } // line re-enabled
//! ```

use crate::ErrorCode;

/// Raw entry point placed in the vector table.
pub type InterruptHandler = unsafe extern "C" fn();

pub trait InterruptLine {
    /// Controller interrupt number of this line.
    fn number(&self) -> u32;

    fn enable(&self);

    fn disable(&self);

    /// Clear the pending state of the line.
    fn clear_pending(&self);

    /// Set the priority. Lower values are more urgent.
    fn set_priority(&self, priority: u8);

    /// Install `handler` as the entry point for this line.
    ///
    /// Returns `Err(ErrorCode::NOSUPPORT)` if the vector table is read-only
    /// and does not already point at `handler`.
    fn set_vector(&self, handler: InterruptHandler) -> Result<(), ErrorCode>;
}

/// Keeps an interrupt line masked for as long as it lives.
///
/// The line is disabled when the guard is created and enabled again when the
/// guard is dropped, regardless of whether it was enabled before.
#[must_use = "the line is re-enabled as soon as the guard is dropped"]
pub struct IrqGuard<'a, L: InterruptLine + ?Sized> {
    line: &'a L,
}

impl<'a, L: InterruptLine + ?Sized> IrqGuard<'a, L> {
    pub fn new(line: &'a L) -> IrqGuard<'a, L> {
        line.disable();
        IrqGuard { line }
    }

    /// The guarded line, for the configuration that has to happen while it
    /// is masked.
    pub fn line(&self) -> &'a L {
        self.line
    }
}

impl<L: InterruptLine + ?Sized> Drop for IrqGuard<'_, L> {
    fn drop(&mut self) {
        self.line.enable();
    }
}

/// Interface for handling interrupts on a hardware chip.
///
/// Each board must construct an implementation of this trait to handle
/// specific interrupts.
pub trait InterruptService {
    /// Service an interrupt, if supported by this chip. If this interrupt
    /// number is not supported, return false.
    unsafe fn service_interrupt(&self, interrupt: u32) -> bool;
}

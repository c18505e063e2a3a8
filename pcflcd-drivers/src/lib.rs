//! Segment LCD backends
//!
//! Concrete implementations of the `SegmentLcd` trait defined in
//! pcflcd-core:
//!
//! - PCF8576 controller over any `I2cBus`
//! - Simulated panel for host-side development
//!
//! plus an adapter that turns an `embedded-hal` I2C bus into an `I2cBus`.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod pcf8576;
pub mod sim;

pub use bus::HalI2c;
pub use pcf8576::Pcf8576;
pub use sim::SimulatedLcd;

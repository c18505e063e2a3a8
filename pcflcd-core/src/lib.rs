//! Board-agnostic core logic for segment LCD controllers
//!
//! This crate contains everything that does not depend on a specific bus
//! or controller instance:
//!
//! - Number to digit encoding (sign, decimal point, overflow, rounding)
//! - Segment addressing and 7-segment glyph tables
//! - The display RAM mirror and the digit/bar/indicator operations on it
//! - Controller and board configuration types
//! - The backend trait drivers and simulations implement

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod digits;
pub mod ram;
pub mod segment;
pub mod traits;

pub use digits::{encode, DigitSequence, SymbolicDigit, MAX_DIGITS};
pub use ram::{DisplayRam, RAM_SIZE};
pub use segment::{SegmentAddress, SegmentTable};
pub use traits::{LcdError, SegmentLcd, SegmentLcdExt};

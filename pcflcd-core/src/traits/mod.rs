//! Hardware abstraction traits
//!
//! These traits define the interface between rendering logic and the
//! backends (controller driver, simulation) that own a display RAM mirror.

pub mod lcd;

pub use lcd::{LcdError, SegmentLcd, SegmentLcdExt};

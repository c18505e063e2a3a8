//! pcflcd Hardware Abstraction Layer
//!
//! This crate defines the bus traits the segment LCD driver talks through.
//! Chip drivers never touch a concrete peripheral: they hold something that
//! implements [`I2cBus`], which may be a real bus, a simulation or a test
//! double.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pcflcd-firmware, etc.)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pcflcd-drivers (PCF8576, simulation)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pcflcd-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C bus operations

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cBus, I2cBusError, I2cConfig};

//! Configuration types
//!
//! Controller settings and the board description, stored as postcard
//! binary data when the `serde` feature is enabled.

pub mod board;
pub mod chip;

pub use board::*;
pub use chip::*;

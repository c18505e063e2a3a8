//! Segment LCD backend trait

use pcflcd_hal::I2cBusError;

use crate::config::{BarConfig, IndicatorConfig, NumberConfig};
use crate::digits::{encode, SymbolicDigit};
use crate::ram::DisplayRam;

/// Errors reported by a segment LCD backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// Transfer to the controller failed; the RAM mirror is unchanged
    Bus(I2cBusError),
    /// Configured I2C address is not a controller address
    InvalidAddress,
}

impl From<I2cBusError> for LcdError {
    fn from(e: I2cBusError) -> Self {
        LcdError::Bus(e)
    }
}

/// A backend owning a display RAM mirror
///
/// Rendering only touches the mirror; nothing reaches the glass until
/// [`flush`](SegmentLcd::flush). Callers updating several groups should
/// render all of them and flush once.
pub trait SegmentLcd {
    /// Current RAM mirror
    fn ram(&self) -> &DisplayRam;

    /// Mutable RAM mirror
    fn ram_mut(&mut self) -> &mut DisplayRam;

    /// Copy the whole mirror to the display
    ///
    /// A failed flush leaves the mirror as it was, so it can simply be
    /// retried.
    fn flush(&mut self) -> Result<(), LcdError>;
}

/// Rendering helpers for any [`SegmentLcd`]
pub trait SegmentLcdExt: SegmentLcd {
    /// Show `value` on a digit group
    ///
    /// Values that do not fit show a row of minus signs.
    fn render_number(&mut self, number: &NumberConfig, value: f64) {
        let digits = encode(value, number.width());
        self.render_digits(number, &digits);
    }

    /// Show pre-encoded digits on a digit group
    ///
    /// # Panics
    /// If `digits` is not exactly as wide as the group.
    fn render_digits(&mut self, number: &NumberConfig, digits: &[SymbolicDigit]) {
        assert_eq!(digits.len(), number.width(), "digit count does not match group width");
        let ram = self.ram_mut();
        for (table, digit) in number.digits.iter().zip(digits) {
            ram.set_digit(table, *digit);
        }
    }

    /// Light the first `level` segments of a bar graph
    fn render_bar(&mut self, bar: &BarConfig, level: usize) {
        self.ram_mut().set_bar(&bar.segments, level);
    }

    /// Switch a single indicator segment
    fn set_indicator(&mut self, indicator: &IndicatorConfig, on: bool) {
        self.ram_mut().set_segment(indicator.segment, on);
    }

    /// Blank the whole mirror
    fn clear(&mut self) {
        self.ram_mut().clear();
    }
}

// Blanket implementation for all SegmentLcd types
impl<T: SegmentLcd + ?Sized> SegmentLcdExt for T {}

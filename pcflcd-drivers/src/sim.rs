//! Simulated segment LCD
//!
//! A bus-less backend for host-side development and tests. Flushing copies
//! the RAM mirror to a "panel" that represents what the glass shows, so
//! code can check that nothing appears before a flush.

use heapless::Vec;

use pcflcd_core::config::NumberConfig;
use pcflcd_core::digits::{SymbolicDigit, MAX_DIGITS};
use pcflcd_core::ram::DisplayRam;
use pcflcd_core::traits::{LcdError, SegmentLcd};
use pcflcd_hal::I2cBusError;

/// Simulated panel
#[derive(Debug, Default)]
pub struct SimulatedLcd {
    ram: DisplayRam,
    panel: DisplayRam,
    flushes: u32,
    fail_next: Option<I2cBusError>,
}

impl SimulatedLcd {
    /// Create a blank panel
    pub fn new() -> Self {
        Self::default()
    }

    /// What the glass currently shows
    pub fn panel(&self) -> &DisplayRam {
        &self.panel
    }

    /// Number of successful flushes
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    /// Make the next flush fail with `error`
    pub fn fail_next_flush(&mut self, error: I2cBusError) {
        self.fail_next = Some(error);
    }

    /// Decode a digit group as shown on the panel
    ///
    /// Positions whose lit segments are not a known glyph read as `None`.
    pub fn read_number(&self, number: &NumberConfig) -> Vec<Option<SymbolicDigit>, MAX_DIGITS> {
        number
            .digits
            .iter()
            .map(|table| self.panel.read_digit(table))
            .collect()
    }
}

impl SegmentLcd for SimulatedLcd {
    fn ram(&self) -> &DisplayRam {
        &self.ram
    }

    fn ram_mut(&mut self) -> &mut DisplayRam {
        &mut self.ram
    }

    fn flush(&mut self) -> Result<(), LcdError> {
        if let Some(e) = self.fail_next.take() {
            return Err(LcdError::Bus(e));
        }
        self.panel = self.ram.clone();
        self.flushes += 1;
        Ok(())
    }
}

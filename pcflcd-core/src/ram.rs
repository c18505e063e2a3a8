//! Display RAM mirror
//!
//! The controller has no readback, so the driver keeps a full copy of the
//! display RAM and rewrites it in one transfer on flush. All glass updates
//! (digits, bars, indicators) are bit operations on this mirror.

use crate::digits::SymbolicDigit;
use crate::segment::{SegmentAddress, SegmentTable, DIGIT_PATTERNS, DIGIT_SEGMENTS, MINUS_PATTERN};

/// Display RAM size in bytes (40 segment outputs x 4 backplanes)
pub const RAM_SIZE: usize = 20;

/// In-memory copy of the controller's display RAM
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayRam {
    bytes: [u8; RAM_SIZE],
}

impl Default for DisplayRam {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayRam {
    /// Create a mirror with every segment off
    pub const fn new() -> Self {
        Self {
            bytes: [0; RAM_SIZE],
        }
    }

    /// Raw RAM contents, in transfer order
    pub fn as_bytes(&self) -> &[u8; RAM_SIZE] {
        &self.bytes
    }

    /// Turn every segment off
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Light one segment
    ///
    /// # Panics
    /// If the address lies outside the RAM.
    pub fn set(&mut self, addr: SegmentAddress) {
        *self.byte_mut(addr) |= addr.mask;
    }

    /// Blank one segment
    ///
    /// # Panics
    /// If the address lies outside the RAM.
    pub fn clear_segment(&mut self, addr: SegmentAddress) {
        *self.byte_mut(addr) &= !addr.mask;
    }

    /// Light or blank one segment
    pub fn set_segment(&mut self, addr: SegmentAddress, on: bool) {
        if on {
            self.set(addr);
        } else {
            self.clear_segment(addr);
        }
    }

    /// Whether a segment is lit
    ///
    /// # Panics
    /// If the address lies outside the RAM.
    pub fn is_set(&self, addr: SegmentAddress) -> bool {
        assert!((addr.offset as usize) < RAM_SIZE, "segment address outside display RAM");
        self.bytes[addr.offset as usize] & addr.mask != 0
    }

    fn byte_mut(&mut self, addr: SegmentAddress) -> &mut u8 {
        assert!((addr.offset as usize) < RAM_SIZE, "segment address outside display RAM");
        &mut self.bytes[addr.offset as usize]
    }

    /// Show `digit` at the position described by `table`
    ///
    /// Every segment of the position is written, so the result does not
    /// depend on what was shown before. A decimal point is only lit when
    /// the table has one; otherwise the flag is dropped.
    pub fn set_digit(&mut self, table: &SegmentTable, digit: SymbolicDigit) {
        let pattern = digit.pattern().unwrap_or(0);

        // a is the MSB of the 7-bit pattern
        for (idx, addr) in table.segments.iter().enumerate() {
            let bit = 1 << (DIGIT_SEGMENTS - 1 - idx);
            self.set_segment(*addr, pattern & bit != 0);
        }

        if let Some(point) = table.point {
            self.set_segment(point, digit.has_point());
        }
    }

    /// Decode the digit shown at `table`
    ///
    /// Returns `None` when the lit segments do not form a known glyph.
    pub fn read_digit(&self, table: &SegmentTable) -> Option<SymbolicDigit> {
        let mut pattern = 0u8;
        for addr in &table.segments {
            pattern = (pattern << 1) | u8::from(self.is_set(*addr));
        }
        let point = table.point.is_some_and(|addr| self.is_set(addr));

        let digit = if pattern == 0 {
            SymbolicDigit::Blank
        } else if pattern == MINUS_PATTERN {
            SymbolicDigit::Minus
        } else {
            let value = DIGIT_PATTERNS.iter().position(|p| *p == pattern)?;
            SymbolicDigit::Digit(value as u8)
        };

        match (digit, point) {
            (SymbolicDigit::Digit(_), true) => Some(digit.with_point()),
            (_, true) => None,
            (_, false) => Some(digit),
        }
    }

    /// Fill a bar graph from its first segment
    ///
    /// Segments `[0, level)` are lit, the rest blanked. Levels past the end
    /// light the whole bar.
    pub fn set_bar(&mut self, segments: &[SegmentAddress], level: usize) {
        let level = level.min(segments.len());
        for (idx, addr) in segments.iter().enumerate() {
            self.set_segment(*addr, idx < level);
        }
    }
}

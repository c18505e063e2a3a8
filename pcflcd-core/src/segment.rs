//! Segment addressing and glyph patterns
//!
//! A segment is one bit of the controller's display RAM. Boards describe
//! their glass in terms of (backplane, segment output) pins; the driver
//! works in (mask, byte offset) pairs so it can set and clear bits without
//! recomputing the RAM layout on every call.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of backplanes (COM lines) in 1:4 multiplex mode
pub const BACKPLANES: u8 = 4;

/// Number of segment outputs on the PCF8576
pub const SEGMENT_OUTPUTS: u8 = 40;

/// Segments per digit, excluding the decimal point
pub const DIGIT_SEGMENTS: usize = 7;

/// Table index reserved for the decimal point
pub const POINT_INDEX: usize = 7;

/// 7-segment patterns for 0-9, MSB first (bit 6 = a ... bit 0 = g)
///
/// ```text
///      --a--
///     f|   |b
///      --g--
///     e|   |c
///      --d--  o dp
/// ```
pub const DIGIT_PATTERNS: [u8; 10] = [
    0b111_1110, // 0
    0b011_0000, // 1
    0b110_1101, // 2
    0b111_1001, // 3
    0b011_0011, // 4
    0b101_1011, // 5
    0b101_1111, // 6
    0b111_0000, // 7
    0b111_1111, // 8
    0b111_1011, // 9
];

/// Pattern of the minus glyph (segment g only)
pub const MINUS_PATTERN: u8 = 0b000_0001;

/// Location of one segment in the display RAM mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentAddress {
    /// Bit within the RAM byte
    pub mask: u8,
    /// RAM byte index
    pub offset: u8,
}

impl SegmentAddress {
    /// Create an address from a raw mask and byte offset
    pub const fn new(mask: u8, offset: u8) -> Self {
        Self { mask, offset }
    }

    /// Address of the segment driven by `backplane` and `segment` output
    ///
    /// Uses the 1:4 multiplex RAM layout: each byte holds two consecutive
    /// segment outputs, four backplane bits each, first output in the high
    /// nibble.
    ///
    /// # Panics
    /// If `backplane >= 4` or `segment >= 40`.
    pub const fn from_pin(backplane: u8, segment: u8) -> Self {
        assert!(backplane < BACKPLANES, "backplane out of range");
        assert!(segment < SEGMENT_OUTPUTS, "segment output out of range");
        let bit = backplane + ((segment & 0x01) << 2);
        Self {
            mask: 1 << (7 - bit),
            offset: segment >> 1,
        }
    }

    /// Backplane and segment output this address drives
    ///
    /// Only the highest set bit of the mask is considered; an empty mask
    /// reads as backplane 0 of the even output.
    pub const fn pin(&self) -> (u8, u8) {
        let bit = if self.mask == 0 {
            0
        } else {
            self.mask.leading_zeros() as u8
        };
        (bit & 0x03, (self.offset << 1) | (bit >> 2))
    }
}

/// Segment addresses for one digit position
///
/// Segments are ordered a-g to match the MSB-first glyph patterns. The
/// decimal point is optional since not every digit on a glass has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SegmentTable {
    /// Segments a through g
    pub segments: [SegmentAddress; DIGIT_SEGMENTS],
    /// Decimal point segment, if the glass has one at this position
    pub point: Option<SegmentAddress>,
}

impl SegmentTable {
    /// Create a table for a digit with a decimal point
    pub const fn new(segments: [SegmentAddress; DIGIT_SEGMENTS], point: SegmentAddress) -> Self {
        Self {
            segments,
            point: Some(point),
        }
    }

    /// Create a table for a digit without a decimal point
    pub const fn without_point(segments: [SegmentAddress; DIGIT_SEGMENTS]) -> Self {
        Self {
            segments,
            point: None,
        }
    }

    /// Look up an entry by table index (0-6 segments, 7 decimal point)
    ///
    /// # Panics
    /// If `index > 7`.
    pub fn entry(&self, index: usize) -> Option<SegmentAddress> {
        assert!(index <= POINT_INDEX, "segment table index out of range");
        if index == POINT_INDEX {
            self.point
        } else {
            Some(self.segments[index])
        }
    }
}

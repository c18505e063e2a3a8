//! Board description types
//!
//! A board describes which controller pins reach which marks on the glass:
//! numeric digit groups, bar graphs and single indicator segments, each
//! looked up by name at runtime.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::chip::{ChipConfig, MAX_SUB_ADDRESS};
use crate::digits::MAX_DIGITS;
use crate::ram::RAM_SIZE;
use crate::segment::{SegmentAddress, SegmentTable};

/// Maximum label length
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum numeric digit groups per board
pub const MAX_NUMBERS: usize = 4;

/// Maximum bar graphs per board
pub const MAX_BARS: usize = 4;

/// Maximum segments in one bar graph
pub const MAX_BAR_SEGMENTS: usize = 16;

/// Maximum single-segment indicators per board
pub const MAX_INDICATORS: usize = 16;

/// Board configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Label longer than MAX_LABEL_LEN
    LabelTooLong,
    /// Too many items (exceeded heapless capacity)
    TooManyItems,
    /// Two items of the same kind share a name
    DuplicateName,
    /// Digit group or bar without any segment
    Empty,
    /// Segment address outside the display RAM, or not a single bit
    InvalidSegment,
    /// Segment on a backplane the multiplex mode does not drive
    UndrivenBackplane,
    /// I2C address the controller cannot answer on
    InvalidAddress,
    /// Hardware sub-address above 7
    InvalidSubAddress,
    /// Binary board image could not be decoded
    Deserialize,
}

/// A numeric display: digit positions, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NumberConfig {
    /// Group name (e.g. "num_large")
    pub name: String<MAX_LABEL_LEN>,
    /// Segment tables, one per digit
    pub digits: Vec<SegmentTable, MAX_DIGITS>,
}

impl NumberConfig {
    /// Number of digit positions
    pub fn width(&self) -> usize {
        self.digits.len()
    }
}

/// A bar graph, filled from the first segment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarConfig {
    /// Bar name (e.g. "battery")
    pub name: String<MAX_LABEL_LEN>,
    /// Segments in fill order
    pub segments: Vec<SegmentAddress, MAX_BAR_SEGMENTS>,
}

impl BarConfig {
    /// Number of steps the bar can show
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the bar has no segments
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// A single on/off mark (unit symbol, sign, battery outline, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndicatorConfig {
    /// Indicator name
    pub name: String<MAX_LABEL_LEN>,
    /// The segment
    pub segment: SegmentAddress,
}

/// Complete board description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardConfig {
    /// Controller settings
    pub chip: ChipConfig,
    /// Numeric digit groups
    pub numbers: Vec<NumberConfig, MAX_NUMBERS>,
    /// Bar graphs
    pub bars: Vec<BarConfig, MAX_BARS>,
    /// Single-segment indicators
    pub indicators: Vec<IndicatorConfig, MAX_INDICATORS>,
}

fn label(name: &str) -> Result<String<MAX_LABEL_LEN>, ConfigError> {
    String::try_from(name).map_err(|_| ConfigError::LabelTooLong)
}

fn check_segment(addr: &SegmentAddress, backplanes: u8) -> Result<(), ConfigError> {
    if (addr.offset as usize) >= RAM_SIZE || addr.mask.count_ones() != 1 {
        return Err(ConfigError::InvalidSegment);
    }
    if addr.pin().0 >= backplanes {
        return Err(ConfigError::UndrivenBackplane);
    }
    Ok(())
}

fn check_unique<'a>(mut names: impl Iterator<Item = &'a str> + Clone) -> Result<(), ConfigError> {
    let mut rest = names.clone();
    while let Some(name) = names.next() {
        rest.next();
        if rest.clone().any(|other| other == name) {
            return Err(ConfigError::DuplicateName);
        }
    }
    Ok(())
}

impl BoardConfig {
    /// Create an empty board for the given controller
    pub fn new(chip: ChipConfig) -> Self {
        Self {
            chip,
            ..Self::default()
        }
    }

    /// Add a numeric digit group
    pub fn add_number(&mut self, name: &str, digits: &[SegmentTable]) -> Result<(), ConfigError> {
        let digits = Vec::from_slice(digits).map_err(|_| ConfigError::TooManyItems)?;
        self.numbers
            .push(NumberConfig {
                name: label(name)?,
                digits,
            })
            .map_err(|_| ConfigError::TooManyItems)
    }

    /// Add a bar graph
    pub fn add_bar(&mut self, name: &str, segments: &[SegmentAddress]) -> Result<(), ConfigError> {
        let segments = Vec::from_slice(segments).map_err(|_| ConfigError::TooManyItems)?;
        self.bars
            .push(BarConfig {
                name: label(name)?,
                segments,
            })
            .map_err(|_| ConfigError::TooManyItems)
    }

    /// Add a single-segment indicator
    pub fn add_indicator(&mut self, name: &str, segment: SegmentAddress) -> Result<(), ConfigError> {
        self.indicators
            .push(IndicatorConfig {
                name: label(name)?,
                segment,
            })
            .map_err(|_| ConfigError::TooManyItems)
    }

    /// Find a digit group by name
    pub fn number(&self, name: &str) -> Option<&NumberConfig> {
        self.numbers.iter().find(|n| n.name == name)
    }

    /// Find a bar graph by name
    pub fn bar(&self, name: &str) -> Option<&BarConfig> {
        self.bars.iter().find(|b| b.name == name)
    }

    /// Find an indicator by name
    pub fn indicator(&self, name: &str) -> Option<&IndicatorConfig> {
        self.indicators.iter().find(|i| i.name == name)
    }

    /// Check the board for mistakes the type system cannot catch
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.chip.is_valid_address() {
            return Err(ConfigError::InvalidAddress);
        }
        if self.chip.sub_address > MAX_SUB_ADDRESS {
            return Err(ConfigError::InvalidSubAddress);
        }

        let backplanes = self.chip.multiplex.backplanes();
        let check = |addr: &SegmentAddress| check_segment(addr, backplanes);

        for number in &self.numbers {
            if number.digits.is_empty() {
                return Err(ConfigError::Empty);
            }
            for table in &number.digits {
                table.segments.iter().try_for_each(check)?;
                table.point.iter().try_for_each(check)?;
            }
        }
        for bar in &self.bars {
            if bar.is_empty() {
                return Err(ConfigError::Empty);
            }
            bar.segments.iter().try_for_each(check)?;
        }
        for indicator in &self.indicators {
            check(&indicator.segment)?;
        }

        check_unique(self.numbers.iter().map(|n| n.name.as_str()))?;
        check_unique(self.bars.iter().map(|b| b.name.as_str()))?;
        check_unique(self.indicators.iter().map(|i| i.name.as_str()))
    }

    /// Load and validate a board image produced by `pcflcd-board`
    #[cfg(feature = "serde")]
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let board: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
        board.validate()?;
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::chip::Multiplex;

    fn digit(seg: u8) -> SegmentTable {
        SegmentTable::without_point(core::array::from_fn(|i| {
            SegmentAddress::from_pin((i % 4) as u8, seg + (i / 4) as u8)
        }))
    }

    fn board() -> BoardConfig {
        let mut board = BoardConfig::new(ChipConfig::default());
        board.add_number("num_small", &[digit(0), digit(2)]).unwrap();
        board
            .add_bar("battery", &[SegmentAddress::from_pin(0, 30), SegmentAddress::from_pin(1, 30)])
            .unwrap();
        board.add_indicator("sign", SegmentAddress::from_pin(3, 31)).unwrap();
        board
    }

    #[test]
    fn test_lookup_by_name() {
        let board = board();
        assert_eq!(board.number("num_small").unwrap().width(), 2);
        assert_eq!(board.bar("battery").unwrap().len(), 2);
        assert!(board.indicator("sign").is_some());
        assert!(board.number("battery").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(board().validate(), Ok(()));
    }

    #[test]
    fn test_validate_duplicate_name() {
        let mut board = board();
        board.add_number("num_small", &[digit(4)]).unwrap();
        assert_eq!(board.validate(), Err(ConfigError::DuplicateName));
    }

    #[test]
    fn test_same_name_different_kind_allowed() {
        let mut board = board();
        board.add_indicator("battery", SegmentAddress::from_pin(0, 31)).unwrap();
        assert_eq!(board.validate(), Ok(()));
    }

    #[test]
    fn test_validate_bad_segment() {
        let mut board = board();
        board.add_indicator("bad", SegmentAddress::new(0x03, 0)).unwrap();
        assert_eq!(board.validate(), Err(ConfigError::InvalidSegment));

        let mut board = self::board();
        board.add_indicator("bad", SegmentAddress::new(0x01, 20)).unwrap();
        assert_eq!(board.validate(), Err(ConfigError::InvalidSegment));
    }

    #[test]
    fn test_validate_undriven_backplane() {
        // Fixture pins use backplanes 0-3
        let mut board = board();
        board.chip.multiplex = Multiplex::OneToTwo;
        assert_eq!(board.validate(), Err(ConfigError::UndrivenBackplane));

        let mut board = BoardConfig::new(ChipConfig {
            multiplex: Multiplex::Static,
            ..ChipConfig::default()
        });
        board.add_indicator("on", SegmentAddress::from_pin(0, 0)).unwrap();
        assert_eq!(board.validate(), Ok(()));
        board.add_indicator("off", SegmentAddress::from_pin(1, 0)).unwrap();
        assert_eq!(board.validate(), Err(ConfigError::UndrivenBackplane));
    }

    #[test]
    fn test_validate_empty_group() {
        let mut board = board();
        board.add_number("empty", &[]).unwrap();
        assert_eq!(board.validate(), Err(ConfigError::Empty));
    }

    #[test]
    fn test_validate_chip() {
        let mut board = board();
        board.chip.address = 0x3C;
        assert_eq!(board.validate(), Err(ConfigError::InvalidAddress));

        let mut board = self::board();
        board.chip.sub_address = 8;
        assert_eq!(board.validate(), Err(ConfigError::InvalidSubAddress));
    }

    #[test]
    fn test_capacity() {
        let mut board = BoardConfig::default();
        assert_eq!(
            board.add_number("wide", &[digit(0); MAX_DIGITS + 1]),
            Err(ConfigError::TooManyItems)
        );
        assert_eq!(
            board.add_indicator("a_label_that_is_too_long", SegmentAddress::from_pin(0, 0)),
            Err(ConfigError::LabelTooLong)
        );
    }
}

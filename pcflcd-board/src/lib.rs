//! Board description loader
//!
//! Turns a human-edited `board.toml` into a validated [`BoardConfig`] and
//! serializes it to the postcard image the firmware embeds. Runs on the
//! host (build scripts, tools); the firmware only ever sees the image.
//!
//! ```toml
//! [chip]
//! address = 0x38
//! bias = "1/3"
//! multiplex = "1:4"
//!
//! [[number]]
//! name = "num_small"
//! digits = [
//!   { segments = [[0, 1], [1, 1], [2, 1], [3, 1], [2, 0], [0, 0], [1, 0]], point = [3, 0] },
//! ]
//!
//! [[indicator]]
//! name = "sign"
//! segment = [3, 31]
//! ```
//!
//! Pins are `[backplane, segment output]` pairs.

mod error;

pub use error::BoardError;

use serde::Deserialize;

use pcflcd_core::config::{Bias, BoardConfig, ChipConfig, Multiplex, BASE_ADDRESS};
use pcflcd_core::segment::{SegmentAddress, SegmentTable, BACKPLANES, SEGMENT_OUTPUTS};

/// `[backplane, segment]`
type RawPin = [u8; 2];

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBoard {
    #[serde(default)]
    chip: RawChip,
    #[serde(default)]
    number: Vec<RawNumber>,
    #[serde(default)]
    bar: Vec<RawBar>,
    #[serde(default)]
    indicator: Vec<RawIndicator>,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawChip {
    address: u8,
    sub_address: u8,
    bias: String,
    multiplex: String,
    power_save: bool,
}

impl Default for RawChip {
    fn default() -> Self {
        Self {
            address: BASE_ADDRESS,
            sub_address: 0,
            bias: "1/3".into(),
            multiplex: "1:4".into(),
            power_save: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDigit {
    segments: [RawPin; 7],
    point: Option<RawPin>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNumber {
    name: String,
    digits: Vec<RawDigit>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBar {
    name: String,
    segments: Vec<RawPin>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawIndicator {
    name: String,
    segment: RawPin,
}

impl RawChip {
    fn to_config(&self) -> Result<ChipConfig, BoardError> {
        let bias = match self.bias.as_str() {
            "1/3" => Bias::Third,
            "1/2" => Bias::Half,
            other => return Err(BoardError::UnknownBias(other.into())),
        };
        let multiplex = match self.multiplex.as_str() {
            "static" => Multiplex::Static,
            "1:2" => Multiplex::OneToTwo,
            "1:3" => Multiplex::OneToThree,
            "1:4" => Multiplex::OneToFour,
            other => return Err(BoardError::UnknownMultiplex(other.into())),
        };
        Ok(ChipConfig {
            address: self.address,
            sub_address: self.sub_address,
            bias,
            multiplex,
            power_save: self.power_save,
        })
    }
}

fn pin(item: &str, [backplane, segment]: RawPin) -> Result<SegmentAddress, BoardError> {
    if backplane < BACKPLANES && segment < SEGMENT_OUTPUTS {
        Ok(SegmentAddress::from_pin(backplane, segment))
    } else {
        Err(BoardError::InvalidPin {
            item: item.into(),
            backplane,
            segment,
        })
    }
}

impl RawDigit {
    fn to_table(&self, item: &str) -> Result<SegmentTable, BoardError> {
        let mut segments = [SegmentAddress::new(0, 0); 7];
        for (addr, raw) in segments.iter_mut().zip(self.segments) {
            *addr = pin(item, raw)?;
        }
        Ok(match self.point {
            Some(raw) => SegmentTable::new(segments, pin(item, raw)?),
            None => SegmentTable::without_point(segments),
        })
    }
}

fn item_error(item: &str) -> impl FnOnce(pcflcd_core::config::ConfigError) -> BoardError + '_ {
    move |error| BoardError::Item {
        item: item.into(),
        error,
    }
}

/// Parse and validate a board description
pub fn parse_board(input: &str) -> Result<BoardConfig, BoardError> {
    let raw: RawBoard = toml::from_str(input)?;
    let mut board = BoardConfig::new(raw.chip.to_config()?);

    for number in &raw.number {
        let digits = number
            .digits
            .iter()
            .map(|digit| digit.to_table(&number.name))
            .collect::<Result<Vec<_>, _>>()?;
        board
            .add_number(&number.name, &digits)
            .map_err(item_error(&number.name))?;
    }

    for bar in &raw.bar {
        let segments = bar
            .segments
            .iter()
            .map(|raw| pin(&bar.name, *raw))
            .collect::<Result<Vec<_>, _>>()?;
        board
            .add_bar(&bar.name, &segments)
            .map_err(item_error(&bar.name))?;
    }

    for indicator in &raw.indicator {
        let segment = pin(&indicator.name, indicator.segment)?;
        board
            .add_indicator(&indicator.name, segment)
            .map_err(item_error(&indicator.name))?;
    }

    board.validate()?;
    Ok(board)
}

/// Serialize a board into the image loaded by `BoardConfig::from_postcard`
pub fn encode_board(board: &BoardConfig) -> Result<Vec<u8>, BoardError> {
    board.validate()?;
    postcard::to_allocvec(board).map_err(BoardError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcflcd_core::config::ConfigError;

    const DIGIT: &str =
        "{ segments = [[0, 1], [1, 1], [2, 1], [3, 1], [2, 0], [0, 0], [1, 0]], point = [3, 0] }";

    #[test]
    fn test_chip_defaults() {
        let board = parse_board("").unwrap();
        assert_eq!(board.chip, ChipConfig::default());
        assert!(board.numbers.is_empty());
    }

    #[test]
    fn test_chip_settings() {
        let board = parse_board(
            "[chip]\naddress = 0x39\nsub_address = 3\nbias = \"1/2\"\nmultiplex = \"static\"\npower_save = true\n",
        )
        .unwrap();
        assert_eq!(
            board.chip,
            ChipConfig {
                address: 0x39,
                sub_address: 3,
                bias: Bias::Half,
                multiplex: Multiplex::Static,
                power_save: true,
            }
        );
    }

    #[test]
    fn test_digit_table() {
        let board = parse_board(&format!("[[number]]\nname = \"n\"\ndigits = [{DIGIT}]\n")).unwrap();
        let table = board.number("n").unwrap().digits[0];
        assert_eq!(table.segments[0], SegmentAddress::from_pin(0, 1));
        assert_eq!(table.segments[6], SegmentAddress::from_pin(1, 0));
        assert_eq!(table.point, Some(SegmentAddress::from_pin(3, 0)));
    }

    #[test]
    fn test_unknown_bias() {
        let err = parse_board("[chip]\nbias = \"1/4\"\n").unwrap_err();
        assert!(matches!(err, BoardError::UnknownBias(ref s) if s == "1/4"));
    }

    #[test]
    fn test_unknown_multiplex() {
        let err = parse_board("[chip]\nmultiplex = \"1:8\"\n").unwrap_err();
        assert!(matches!(err, BoardError::UnknownMultiplex(_)));
    }

    #[test]
    fn test_pin_out_of_range() {
        let err = parse_board("[[indicator]]\nname = \"sign\"\nsegment = [4, 0]\n").unwrap_err();
        assert!(matches!(
            err,
            BoardError::InvalidPin { backplane: 4, segment: 0, .. }
        ));

        let err = parse_board("[[bar]]\nname = \"b\"\nsegments = [[0, 40]]\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "b: pin [0, 40] out of range (backplane 0-3, segment 0-39)"
        );
    }

    #[test]
    fn test_backplane_not_driven() {
        let input = "[chip]\nmultiplex = \"static\"\n\n[[indicator]]\nname = \"x\"\nsegment = [3, 0]\n";
        assert!(matches!(
            parse_board(input),
            Err(BoardError::Config(ConfigError::UndrivenBackplane))
        ));

        let input = "[chip]\nmultiplex = \"1:2\"\n\n[[indicator]]\nname = \"x\"\nsegment = [1, 0]\n";
        assert!(parse_board(input).is_ok());
    }

    #[test]
    fn test_duplicate_names() {
        let input = "[[bar]]\nname = \"b\"\nsegments = [[0, 30]]\n\n[[bar]]\nname = \"b\"\nsegments = [[1, 30]]\n";
        assert!(matches!(
            parse_board(input),
            Err(BoardError::Config(ConfigError::DuplicateName))
        ));
    }

    #[test]
    fn test_empty_group() {
        let err = parse_board("[[number]]\nname = \"n\"\ndigits = []\n").unwrap_err();
        assert!(matches!(err, BoardError::Config(ConfigError::Empty)));
    }

    #[test]
    fn test_bad_address() {
        let err = parse_board("[chip]\naddress = 0x70\n").unwrap_err();
        assert_eq!(err.to_string(), "I2C address must be 0x38 or 0x39");
    }

    #[test]
    fn test_item_capacity() {
        let err = parse_board("[[indicator]]\nname = \"a_label_that_is_too_long\"\nsegment = [0, 0]\n")
            .unwrap_err();
        assert!(matches!(
            err,
            BoardError::Item { error: ConfigError::LabelTooLong, .. }
        ));
    }

    #[test]
    fn test_syntax_error() {
        assert!(matches!(parse_board("[chip"), Err(BoardError::Toml(_))));
        // Misspelled keys are rejected, not ignored
        assert!(matches!(
            parse_board("[chip]\nmultiplexer = \"1:4\"\n"),
            Err(BoardError::Toml(_))
        ));
    }
}

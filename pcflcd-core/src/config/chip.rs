//! Controller chip configuration
//!
//! Drive settings for the PCF8576 and the command bytes derived from them.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Base 7-bit I2C address (SA0 pin selects 0x38 or 0x39)
pub const BASE_ADDRESS: u8 = 0b011_1000;

/// Continuation bit: another command byte follows
pub const CMD_CONTINUE: u8 = 0x80;

/// Mode set command
pub const CMD_MODE_SET: u8 = 0b0100_0000;

/// Load data pointer command (pointer in the low bits)
pub const CMD_LOAD_DATA_POINTER: u8 = 0b0000_0000;

/// Device select command (hardware sub-address in the low bits)
pub const CMD_DEVICE_SELECT: u8 = 0b0110_0000;

/// Display enable bit of the mode set command
const MODE_ENABLE: u8 = 1 << 3;

/// Highest hardware sub-address (A2..A0)
pub const MAX_SUB_ADDRESS: u8 = 7;

/// LCD bias configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Bias {
    /// 1/3 bias
    #[default]
    Third,
    /// 1/2 bias
    Half,
}

/// Backplane multiplex mode
///
/// Segment addressing in this crate assumes the 1:4 RAM layout; the other
/// modes are passed through to the controller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Multiplex {
    /// One backplane
    Static,
    /// Two backplanes
    OneToTwo,
    /// Three backplanes
    OneToThree,
    /// Four backplanes
    #[default]
    OneToFour,
}

impl Multiplex {
    /// M1/M0 bits of the mode set command
    pub const fn bits(self) -> u8 {
        match self {
            Self::Static => 0b01,
            Self::OneToTwo => 0b10,
            Self::OneToThree => 0b11,
            Self::OneToFour => 0b00,
        }
    }

    /// Number of backplanes driven
    pub const fn backplanes(self) -> u8 {
        match self {
            Self::Static => 1,
            Self::OneToTwo => 2,
            Self::OneToThree => 3,
            Self::OneToFour => 4,
        }
    }
}

/// PCF8576 configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChipConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Hardware sub-address (A2..A0 pins)
    pub sub_address: u8,
    /// LCD bias
    pub bias: Bias,
    /// Backplane multiplex
    pub multiplex: Multiplex,
    /// Power-saving drive mode
    pub power_save: bool,
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            address: BASE_ADDRESS,
            sub_address: 0,
            bias: Bias::Third,
            multiplex: Multiplex::OneToFour,
            power_save: false,
        }
    }
}

impl ChipConfig {
    /// Whether the I2C address is one the controller answers on
    pub const fn is_valid_address(&self) -> bool {
        self.address & 0xFE == BASE_ADDRESS
    }

    /// Mode set command byte (without continuation bit), display enabled
    pub const fn mode_set(&self) -> u8 {
        let bias = match self.bias {
            Bias::Third => 0,
            Bias::Half => 1,
        };
        CMD_MODE_SET
            | ((self.power_save as u8) << 4)
            | MODE_ENABLE
            | (bias << 2)
            | self.multiplex.bits()
    }

    /// Device select command byte (without continuation bit)
    pub const fn device_select(&self) -> u8 {
        CMD_DEVICE_SELECT | (self.sub_address & MAX_SUB_ADDRESS)
    }

    /// Initialization sequence: mode set, data pointer 0, device select
    pub const fn init_sequence(&self) -> [u8; 3] {
        [
            CMD_CONTINUE | self.mode_set(),
            CMD_CONTINUE | CMD_LOAD_DATA_POINTER,
            self.device_select(),
        ]
    }
}

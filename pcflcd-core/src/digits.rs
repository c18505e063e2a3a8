//! Number to digit encoding
//!
//! Turns a signed value into a fixed-width row of [`SymbolicDigit`]s,
//! right-aligned the way a calculator display shows it:
//!
//! ```text
//!   1984    -> [ _, _, 1, 9, 8, 4 ]
//!  -1984    -> [ _, -, 1, 9, 8, 4 ]
//!   1.25    -> [ _, _, _, 1., 2, 5 ]
//!   1234567 -> [ -, -, -, -, -, - ]   (does not fit)
//! ```
//!
//! Encoding is pure and allocation-free; a fresh [`DigitSequence`] is
//! returned on every call.

use core::ops::Deref;

use heapless::Vec;

use crate::segment::{DIGIT_PATTERNS, MINUS_PATTERN};

/// Maximum digit positions in one number group
pub const MAX_DIGITS: usize = 12;

/// Raw code of the minus glyph
pub const CODE_MINUS: u8 = 10;

/// Raw code offset marking a digit that carries a decimal point
pub const CODE_POINT: u8 = 20;

/// Raw code of a blank position
pub const CODE_BLANK: u8 = 30;

/// What one digit position should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SymbolicDigit {
    /// Decimal digit 0-9
    Digit(u8),
    /// Decimal digit 0-9 with the decimal point lit
    DigitWithPoint(u8),
    /// Minus sign, also used to fill an overflowed display
    Minus,
    /// Nothing lit
    Blank,
}

impl SymbolicDigit {
    /// Raw code: 0-9 digits, 10 minus, 20-29 digit with point, 30 blank
    pub const fn code(self) -> u8 {
        match self {
            Self::Digit(value) => value,
            Self::DigitWithPoint(value) => value + CODE_POINT,
            Self::Minus => CODE_MINUS,
            Self::Blank => CODE_BLANK,
        }
    }

    /// 7-segment pattern (bit 6 = a ... bit 0 = g), `None` for blank
    ///
    /// # Panics
    /// If a digit value is outside 0-9.
    pub fn pattern(self) -> Option<u8> {
        match self {
            Self::Digit(value) | Self::DigitWithPoint(value) => {
                assert!(value < 10, "digit value out of range");
                Some(DIGIT_PATTERNS[value as usize])
            }
            Self::Minus => Some(MINUS_PATTERN),
            Self::Blank => None,
        }
    }

    /// Whether the decimal point is lit
    pub const fn has_point(self) -> bool {
        matches!(self, Self::DigitWithPoint(_))
    }

    /// Same digit with the decimal point added
    ///
    /// Minus and blank cannot carry a point and are returned unchanged.
    pub const fn with_point(self) -> Self {
        match self {
            Self::Digit(value) => Self::DigitWithPoint(value),
            other => other,
        }
    }
}

/// Raw code outside the symbolic digit code space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidCode(pub u8);

impl TryFrom<u8> for SymbolicDigit {
    type Error = InvalidCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0..=9 => Ok(Self::Digit(code)),
            CODE_MINUS => Ok(Self::Minus),
            20..=29 => Ok(Self::DigitWithPoint(code - CODE_POINT)),
            CODE_BLANK => Ok(Self::Blank),
            _ => Err(InvalidCode(code)),
        }
    }
}

/// Fixed-width row of digits, most significant first
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DigitSequence {
    digits: Vec<SymbolicDigit, MAX_DIGITS>,
}

impl DigitSequence {
    fn filled(width: usize, digit: SymbolicDigit) -> Self {
        Self {
            digits: core::iter::repeat(digit).take(width).collect(),
        }
    }

    /// Digits as a slice
    pub fn as_slice(&self) -> &[SymbolicDigit] {
        &self.digits
    }

    /// Whether every position shows the overflow indicator
    pub fn is_overflow(&self) -> bool {
        !self.digits.is_empty() && self.digits.iter().all(|d| *d == SymbolicDigit::Minus)
    }
}

impl Deref for DigitSequence {
    type Target = [SymbolicDigit];

    fn deref(&self) -> &Self::Target {
        &self.digits
    }
}

impl<'a> IntoIterator for &'a DigitSequence {
    type Item = &'a SymbolicDigit;
    type IntoIter = core::slice::Iter<'a, SymbolicDigit>;

    fn into_iter(self) -> Self::IntoIter {
        self.digits.iter()
    }
}

/// Powers of ten up to the widest fraction a group can show
const POW10: [u64; MAX_DIGITS] = {
    let mut table = [1u64; MAX_DIGITS];
    let mut i = 1;
    while i < MAX_DIGITS {
        table[i] = table[i - 1] * 10;
        i += 1;
    }
    table
};

/// Base-10 digit count, 1 for zero
fn count_digits(mut value: u64) -> usize {
    let mut count = 1;
    while value >= 10 {
        value /= 10;
        count += 1;
    }
    count
}

/// Write `value` right-aligned into `cells`, least significant digit last
///
/// Returns the index of the most significant digit written. Cells left of
/// it are untouched.
fn write_digits(cells: &mut [SymbolicDigit], mut value: u64) -> usize {
    let mut idx = cells.len();
    loop {
        idx -= 1;
        cells[idx] = SymbolicDigit::Digit((value % 10) as u8);
        value /= 10;
        if value == 0 || idx == 0 {
            return idx;
        }
    }
}

/// Encode `value` into exactly `width` digit positions
///
/// - Integer digits plus a sign cell (for negative values) must fit in
///   `width`, otherwise every position shows [`SymbolicDigit::Minus`].
/// - Remaining positions hold the fraction, rounded half-up and with
///   trailing zeros dropped. The last integer digit carries the point.
/// - A rounding carry into the integer part is propagated, and the result
///   is checked against `width` again (`9.96` in two positions shows `10`).
/// - A value that renders as zero never shows a sign.
/// - NaN and infinities show as overflow.
///
/// # Panics
/// If `width > MAX_DIGITS`.
pub fn encode(value: f64, width: usize) -> DigitSequence {
    assert!(width <= MAX_DIGITS, "digit group wider than MAX_DIGITS");

    let overflow = DigitSequence::filled(width, SymbolicDigit::Minus);
    if !value.is_finite() {
        return overflow;
    }

    let negative = value < 0.0;
    let magnitude = if negative { -value } else { value };

    // Saturates for magnitudes beyond u64, which then fails the width check
    let mut int_part = magnitude as u64;
    let mut int_digits = count_digits(int_part) + usize::from(negative);
    if int_digits > width {
        return overflow;
    }

    // int_digits >= 1, so the field is at most MAX_DIGITS - 1 wide
    let field = width - int_digits;
    let scale = POW10[field];
    let fraction = magnitude - int_part as f64;
    let mut frac_part = (fraction * scale as f64 + 0.5) as u64;

    if frac_part >= scale {
        int_part += 1;
        frac_part = 0;
        int_digits = count_digits(int_part) + usize::from(negative);
        if int_digits > width {
            return overflow;
        }
    }

    let mut frac_digits = field;
    if frac_part == 0 {
        frac_digits = 0;
    } else {
        while frac_part % 10 == 0 {
            frac_part /= 10;
            frac_digits -= 1;
        }
    }

    let show_sign = negative && (int_part != 0 || frac_digits != 0);

    let mut sequence = DigitSequence::filled(width, SymbolicDigit::Blank);
    let point_pos = width - frac_digits;
    let cells = &mut sequence.digits[..];

    if frac_digits > 0 {
        // Leading zeros of the fraction are real digits
        for cell in &mut cells[point_pos..] {
            *cell = SymbolicDigit::Digit(0);
        }
        write_digits(&mut cells[point_pos..], frac_part);
    }

    let first = write_digits(&mut cells[..point_pos], int_part);
    if show_sign {
        // Sign cell was reserved in int_digits
        cells[first - 1] = SymbolicDigit::Minus;
    }
    if frac_digits > 0 {
        cells[point_pos - 1] = cells[point_pos - 1].with_point();
    }

    sequence
}

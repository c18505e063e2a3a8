//! Property tests for digit encoding and the display RAM

use pcflcd_core::{encode, DisplayRam, SegmentAddress, SegmentTable, SymbolicDigit, MAX_DIGITS};
use proptest::prelude::*;

/// Read a digit row back as a number, `None` for overflow
fn decode(digits: &[SymbolicDigit]) -> Option<f64> {
    if digits.iter().all(|d| *d == SymbolicDigit::Minus) {
        return None;
    }

    let mut text = String::new();
    for digit in digits {
        match digit {
            SymbolicDigit::Blank => {}
            SymbolicDigit::Minus => text.push('-'),
            SymbolicDigit::Digit(v) => text.push(char::from(b'0' + v)),
            SymbolicDigit::DigitWithPoint(v) => {
                text.push(char::from(b'0' + v));
                text.push('.');
            }
        }
    }
    Some(text.parse().expect("encoded row is a number"))
}

fn int_digits(value: f64) -> usize {
    let mut magnitude = value.abs() as u64;
    let mut digits = 1;
    while magnitude >= 10 {
        magnitude /= 10;
        digits += 1;
    }
    digits + usize::from(value < 0.0)
}

fn symbolic_digit() -> impl Strategy<Value = SymbolicDigit> {
    prop_oneof![
        (0u8..10).prop_map(SymbolicDigit::Digit),
        (0u8..10).prop_map(SymbolicDigit::DigitWithPoint),
        Just(SymbolicDigit::Minus),
        Just(SymbolicDigit::Blank),
    ]
}

fn segment_address() -> impl Strategy<Value = SegmentAddress> {
    (0u8..4, 0u8..40).prop_map(|(bp, seg)| SegmentAddress::from_pin(bp, seg))
}

fn segment_table() -> impl Strategy<Value = SegmentTable> {
    (
        proptest::array::uniform7(segment_address()),
        proptest::option::of(segment_address()),
    )
        .prop_map(|(segments, point)| SegmentTable { segments, point })
}

proptest! {
    #[test]
    fn width_is_exact(value in -1e15f64..1e15, width in 0usize..=MAX_DIGITS) {
        prop_assert_eq!(encode(value, width).len(), width);
    }

    #[test]
    fn negative_zero_matches_zero(width in 1usize..=MAX_DIGITS) {
        prop_assert_eq!(encode(-0.0, width), encode(0.0, width));
    }

    #[test]
    fn zero_layout(width in 1usize..=MAX_DIGITS) {
        let digits = encode(0.0, width);
        prop_assert!(digits[..width - 1].iter().all(|d| *d == SymbolicDigit::Blank));
        prop_assert_eq!(digits[width - 1], SymbolicDigit::Digit(0));
    }

    #[test]
    fn too_many_integer_digits_overflow(value in -1e12f64..1e12, width in 1usize..=MAX_DIGITS) {
        prop_assume!(int_digits(value) > width);
        prop_assert!(encode(value, width).is_overflow());
    }

    #[test]
    fn integers_roundtrip(value in -99_999_999i64..99_999_999, width in 1usize..=MAX_DIGITS) {
        let digits = encode(value as f64, width);
        match decode(&digits) {
            Some(shown) => prop_assert_eq!(shown, value as f64),
            None => prop_assert!(int_digits(value as f64) > width),
        }
    }

    #[test]
    fn fractions_round_within_field(value in -999_999.0f64..999_999.0, width in 1usize..=MAX_DIGITS) {
        let needed = int_digits(value);
        prop_assume!(needed <= width);
        let field = (width - needed) as i32;
        let tolerance = 0.5 * 10f64.powi(-field) + 1e-9;

        if let Some(shown) = decode(&encode(value, width)) {
            prop_assert!(
                (shown - value).abs() <= tolerance,
                "{} shown as {} (width {})", value, shown, width
            );
        }
    }

    #[test]
    fn layout_is_well_formed(value in -1e9f64..1e9, width in 1usize..=MAX_DIGITS) {
        let digits = encode(value, width);
        prop_assume!(!digits.is_overflow());

        let first = digits.iter().position(|d| *d != SymbolicDigit::Blank).unwrap();
        // Blanks only lead, the sign only sits right before the number
        prop_assert!(digits[first + 1..].iter().all(|d| !matches!(d, SymbolicDigit::Blank | SymbolicDigit::Minus)));
        prop_assert!(digits.iter().filter(|d| d.has_point()).count() <= 1);
        prop_assert!(!digits[width - 1].has_point());
    }

    #[test]
    fn set_digit_is_idempotent(table in segment_table(), digit in symbolic_digit(), seed in any::<[u8; 20]>()) {
        let mut once = DisplayRam::new();
        for (idx, byte) in seed.iter().enumerate() {
            for bit in 0..8 {
                if byte & (1 << bit) != 0 {
                    once.set(SegmentAddress::new(1 << bit, idx as u8));
                }
            }
        }
        let mut twice = once.clone();

        once.set_digit(&table, digit);
        twice.set_digit(&table, digit);
        twice.set_digit(&table, digit);
        prop_assert_eq!(once, twice);
    }
}

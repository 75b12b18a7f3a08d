// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Money};

#[test]
fn test_parse_decimal_text() {
    assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
    assert_eq!("12.5".parse::<Money>().unwrap(), Money::from_cents(1250));
    assert_eq!("12,50".parse::<Money>().unwrap(), Money::from_cents(1250));
    assert_eq!("-3.99".parse::<Money>().unwrap(), Money::from_cents(-399));
    assert_eq!(" .75 ".parse::<Money>().unwrap(), Money::from_cents(75));
}

#[test]
fn test_parse_rounds_extra_digits() {
    assert_eq!("0.005".parse::<Money>().unwrap(), Money::from_cents(1));
    assert_eq!("0.004".parse::<Money>().unwrap(), Money::from_cents(0));
    assert_eq!("1.999".parse::<Money>().unwrap(), Money::from_cents(200));
}

#[test]
fn test_parse_rejects_malformed_text() {
    for input in ["", "abc", "1.2.3", "12e3", "-", "1 000"] {
        let result: Result<Money, DomainError> = input.parse::<Money>();
        assert!(
            matches!(result, Err(DomainError::InvalidMoney(_))),
            "expected '{input}' to be rejected"
        );
    }
}

#[test]
fn test_display_uses_two_decimals() {
    assert_eq!(Money::from_cents(1250).to_string(), "12.50");
    assert_eq!(Money::from_cents(7).to_string(), "0.07");
    assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
    assert_eq!(Money::ZERO.to_string(), "0.00");
}

#[test]
fn test_arithmetic_is_exact() {
    let ten_cents: Money = Money::from_cents(10);
    let total: Money = std::iter::repeat_n(ten_cents, 3).sum();
    assert_eq!(total, Money::from_cents(30));
    assert_eq!(total - Money::from_cents(45), Money::from_cents(-15));
}

#[test]
fn test_arithmetic_saturates_at_bounds() {
    let max: Money = Money::from_cents(i64::MAX);
    let min: Money = Money::from_cents(i64::MIN);
    assert_eq!(max + Money::from_cents(1), max);
    assert_eq!(min - Money::from_cents(1), min);

    let mut running: Money = max;
    running += max;
    assert_eq!(running, max);
    assert_eq!([max, max].iter().sum::<Money>(), max);
}

#[test]
fn test_deserialize_from_number_or_string() {
    let from_float: Money = serde_json::from_str("12.5").unwrap();
    let from_int: Money = serde_json::from_str("3").unwrap();
    let from_text: Money = serde_json::from_str("\"7,25\"").unwrap();
    let from_tenth: Money = serde_json::from_str("0.1").unwrap();

    assert_eq!(from_float, Money::from_cents(1250));
    assert_eq!(from_int, Money::from_cents(300));
    assert_eq!(from_text, Money::from_cents(725));
    assert_eq!(from_tenth, Money::from_cents(10));
}

#[test]
fn test_serialize_as_decimal_number() {
    let json: String = serde_json::to_string(&Money::from_cents(1250)).unwrap();
    assert_eq!(json, "12.5");
}

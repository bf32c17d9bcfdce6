use finanzplaner::currency::{format_eur, format_input_number, format_signed_eur, parse_decimal};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn formats_amounts_with_german_separators() {
    assert_eq!(format_eur(dec!(1234.5)), "1.234,50 €");
    assert_eq!(format_eur(dec!(-1234567.891)), "-1.234.567,89 €");
    assert_eq!(format_eur(Decimal::ZERO), "0,00 €");
}

#[test]
fn rounding_never_yields_negative_zero() {
    assert_eq!(format_eur(dec!(-0.004)), "0,00 €");
    assert_eq!(format_eur(dec!(0.005)), "0,01 €");
    assert_eq!(format_signed_eur(dec!(-0.001)), "+0,00 €");
}

#[test]
fn parses_both_decimal_conventions() {
    assert_eq!(parse_decimal("1.234,56"), Some(dec!(1234.56)));
    assert_eq!(parse_decimal("1234.56"), Some(dec!(1234.56)));
    assert_eq!(parse_decimal(" 12,5 € "), Some(dec!(12.5)));
    assert_eq!(parse_decimal(""), None);
    assert_eq!(parse_decimal("abc"), None);
}

#[test]
fn exponent_notation_is_not_an_amount() {
    assert_eq!(parse_decimal("1e3"), None);
    assert_eq!(parse_decimal("7e28"), None);
}

#[test]
fn input_numbers_round_trip_through_the_parser() {
    let shown = format_input_number(dec!(1050.50));
    assert_eq!(shown, "1050,5");
    assert_eq!(parse_decimal(&shown), Some(dec!(1050.5)));
    assert_eq!(format_input_number(Decimal::ZERO), "");
}

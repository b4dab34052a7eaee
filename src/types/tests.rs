use super::{group_thousands, Money, YearMonth};
use anyhow::Result;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::str::FromStr;

fn money(value: &str) -> Result<Money> {
    Ok(Money::new(Decimal::from_str(value)?))
}

#[test]
fn test_money_displays_two_decimals_with_thousands_separators() -> Result<()> {
    let test_cases = vec![
        ("1234567.891", "1,234,567.89"),
        ("0", "0.00"),
        ("0.005", "0.01"),
        ("999.995", "1,000.00"),
        ("12.5", "12.50"),
        ("100", "100.00"),
        ("-12.5", "-12.50"),
        ("-1234.567", "-1,234.57"),
        ("-0.001", "0.00"),
    ];

    for (input, expected_output) in test_cases {
        assert_eq!(money(input)?.to_string(), expected_output);
    }

    Ok(())
}

#[test]
fn test_money_beyond_u64_still_displays() {
    assert_eq!(Money::new(Decimal::MAX).to_string(), "79,228,162,514,264,337,593,543,950,335.00");
    assert_eq!(Money::new(-Decimal::MAX).to_string(), "-79,228,162,514,264,337,593,543,950,335.00");
}

#[test]
fn test_money_sums_and_averages_exactly() -> Result<()> {
    let values = vec![money("10.10")?, money("20.20")?, money("0.70")?];
    let total: Money = values.iter().sum();

    assert_eq!(total, money("31.00")?);
    assert_eq!(total.average_over(3).to_string(), "10.33");
    assert_eq!(total.average_over(0), Money::zero());

    Ok(())
}

#[test]
fn test_group_thousands_inserts_separators_every_three_digits() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1000), "1,000");
    assert_eq!(group_thousands(805549), "805,549");
    assert_eq!(group_thousands(1067371), "1,067,371");
}

#[test]
fn test_year_month_orders_chronologically_across_years() -> Result<()> {
    let december = YearMonth::from(&NaiveDateTime::from_str("2009-12-01T07:45:00")?);
    let january = YearMonth::from(&NaiveDateTime::from_str("2010-01-04T09:24:00")?);

    assert!(december < january);
    assert!(YearMonth::new(2010, 2) < YearMonth::new(2010, 11));
    assert_eq!(december.to_string(), "2009-12");
    assert_eq!(january.to_string(), "2010-01");

    Ok(())
}

mod money;
mod period;
#[cfg(test)]
mod tests;

pub use money::Money;
pub use period::YearMonth;

pub type CustomerId = u64;

/// Formats a count with comma thousands separators (`1234567` -> `1,234,567`).
pub fn group_thousands(value: u64) -> String {
    group_digits(&value.to_string())
}

/// Inserts a comma every three digits of an unsigned digit string.
pub fn group_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped
}

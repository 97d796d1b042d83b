/// Rounds to whole currency units and groups thousands: `1234567.6` → `1,234,568`.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

pub fn format_currency(currency: &str, value: f64) -> String {
    format!("{currency} {}", format_amount(value))
}

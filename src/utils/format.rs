/// Formats an amount as Indian-locale currency, e.g. `₹75,000` or
/// `₹12,34,567`. Grouping is the last three digits, then pairs.
pub fn format_inr(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::new();
    if digits.len() <= 3 {
        grouped.push_str(&digits);
    } else {
        let (head, tail) = digits.split_at(digits.len() - 3);
        let head_bytes = head.as_bytes();
        let mut parts: Vec<&str> = Vec::new();
        let mut end = head_bytes.len();
        while end > 2 {
            parts.push(&head[end - 2..end]);
            end -= 2;
        }
        parts.push(&head[..end]);
        parts.reverse();
        grouped.push_str(&parts.join(","));
        grouped.push(',');
        grouped.push_str(tail);
    }

    if negative {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

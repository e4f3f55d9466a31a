/// Parses a lifetime such as `7d`, `12h`, `30m`, `45s` or a bare number of
/// seconds into seconds.
///
/// Returns `None` for empty, negative, unitless-garbage or overflowing input.
pub fn parse_duration_secs(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    let (digits, multiplier) = match value.char_indices().last()? {
        (idx, 's') => (&value[..idx], 1),
        (idx, 'm') => (&value[..idx], 60),
        (idx, 'h') => (&value[..idx], 3_600),
        (idx, 'd') => (&value[..idx], 86_400),
        (idx, 'w') => (&value[..idx], 604_800),
        _ => (value, 1),
    };

    let amount: i64 = digits.trim().parse().ok()?;
    if amount < 0 {
        return None;
    }
    amount.checked_mul(multiplier)
}

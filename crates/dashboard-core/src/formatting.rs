/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge exact binary midpoints (e.g. 1.005) upward before rounding.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let scaled = ((abs_value * factor) + epsilon).round() as u128;

    let divisor = 10_u128.pow(decimals);
    let grouped = group_thousands(&(scaled / divisor).to_string());

    let body = if decimals == 0 {
        grouped
    } else {
        format!(
            "{}.{:0width$}",
            grouped,
            scaled % divisor,
            width = decimals as usize
        )
    };

    if negative && scaled != 0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Format a revenue amount the way the metric cards show it: `"$ 1,234.56"`.
///
/// ```
/// use dashboard_core::formatting::format_currency;
///
/// assert_eq!(format_currency(1234.56), "$ 1,234.56");
/// assert_eq!(format_currency(-9.99),   "$ -9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    format!("$ {}", format_number(amount, 2))
}

/// Compact revenue label for narrow chart bars: `950`, `12.3k`, `4.1M`.
pub fn format_compact(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{sign}{:.1}M", abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{sign}{:.1}k", abs / 1_000.0)
    } else {
        format!("{sign}{:.0}", abs)
    }
}

/// Percent change from `previous` to `current`.
///
/// Returns `None` when `previous` is zero, so a missing baseline is never
/// reported as a 0 % or infinite change.
///
/// ```
/// use dashboard_core::formatting::percent_change;
///
/// assert_eq!(percent_change(150.0, 100.0), Some(50.0));
/// assert_eq!(percent_change(10.0, 0.0), None);
/// ```
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    Some((current - previous) / previous * 100.0)
}

/// Secondary card text describing the year-over-year delta.
pub fn format_change(change_pct: Option<f64>) -> String {
    match change_pct {
        Some(pct) => format!("vs. Last Year: {pct:.2}% change"),
        None => "vs. Last Year: n/a".to_string(),
    }
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

// ── Tests ──────────────────────────────────────────────────────────────────────

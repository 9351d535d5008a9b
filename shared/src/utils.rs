// Display and parsing helpers shared by the engine and any front end.

/// PKR amount formatting (lakh/crore and thousand ladders) and lenient
/// parsing of form input.
pub mod pkr_format {
    /// Returned for missing, NaN or infinite input.
    pub const MISSING: &str = "-";

    pub const LAKH: f64 = 100_000.0;
    pub const CRORE: f64 = 10_000_000.0;

    // Ascending; a tier applies once the rounded value reaches it.
    const LAKH_LADDER: [(f64, &str); 2] = [(LAKH, " L"), (CRORE, " Cr")];
    const THOUSANDS_LADDER: [(f64, &str); 4] = [
        (1_000.0, "K"),
        (1_000_000.0, "M"),
        (1_000_000_000.0, "B"),
        (1_000_000_000_000.0, "T"),
    ];

    fn finite(value: impl Into<Option<f64>>) -> Option<f64> {
        value.into().filter(|v| v.is_finite())
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }

    /// Picks the largest tier the *displayed* value reaches, so 99,999.6
    /// becomes "1.00 L" rather than "100,000". Returns the body and whether
    /// it shows a non-zero amount.
    fn ladder(abs: f64, tiers: &[(f64, &str)]) -> (String, bool) {
        let mut shown = abs.round();
        let mut chosen = None;
        for &(threshold, suffix) in tiers {
            if shown < threshold {
                break;
            }
            let scaled = round2(abs / threshold);
            shown = scaled * threshold;
            chosen = Some((scaled, suffix));
        }
        match chosen {
            Some((scaled, suffix)) => (format!("{:.2}{}", scaled, suffix), true),
            None => (format_number(shown, 0), shown != 0.0),
        }
    }

    fn with_sign(value: f64, prefix: &str, (body, nonzero): (String, bool)) -> String {
        let sign = if value < 0.0 && nonzero { "-" } else { "" };
        format!("{}{}{}", sign, prefix, body)
    }

    /// "PKR 2.50 Cr", "PKR 1.50 L" or "PKR 99,999".
    pub fn format_currency(amount: impl Into<Option<f64>>) -> String {
        let Some(amount) = finite(amount) else {
            return MISSING.to_string();
        };
        with_sign(amount, "PKR ", ladder(amount.abs(), &LAKH_LADDER))
    }

    /// Market capitalisation on the K/M/B/T ladder, e.g. "PKR 1.25B".
    pub fn format_market_cap(amount: impl Into<Option<f64>>) -> String {
        let Some(amount) = finite(amount) else {
            return MISSING.to_string();
        };
        with_sign(amount, "PKR ", ladder(amount.abs(), &THOUSANDS_LADDER))
    }

    /// Share volume on the K/M/B/T ladder without a currency prefix.
    pub fn format_volume(value: impl Into<Option<f64>>) -> String {
        let Some(value) = finite(value) else {
            return MISSING.to_string();
        };
        with_sign(value, "", ladder(value.abs(), &THOUSANDS_LADDER))
    }

    pub fn format_percentage(value: impl Into<Option<f64>>, decimals: usize) -> String {
        match finite(value) {
            Some(v) => format!("{:.*}%", decimals, v),
            None => MISSING.to_string(),
        }
    }

    pub fn format_percentage_default(value: impl Into<Option<f64>>) -> String {
        format_percentage(value, 1)
    }

    /// Like `format_percentage` but prefixes "+" for zero and gains.
    pub fn format_signed_percentage(value: impl Into<Option<f64>>, decimals: usize) -> String {
        match finite(value) {
            Some(v) if v >= 0.0 => format!("+{:.*}%", decimals, v),
            Some(v) => format!("{:.*}%", decimals, v),
            None => MISSING.to_string(),
        }
    }

    /// Plain number with "," thousands groups, e.g. "1,234,567.89".
    pub fn format_number(value: impl Into<Option<f64>>, decimals: usize) -> String {
        let Some(value) = finite(value) else {
            return MISSING.to_string();
        };
        let formatted = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match formatted.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (formatted.as_str(), None),
        };
        // No "-0" after rounding.
        let is_zero = formatted.chars().all(|c| c == '0' || c == '.');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };
        let grouped = group_thousands(int_part);
        match frac_part {
            Some(frac) => format!("{}{}.{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    fn group_thousands(digits: &str) -> String {
        let len = digits.len();
        let mut out = String::with_capacity(len + len / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (len - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Parses form input like "1,250.50", " 300 " or "PKR 5,000".
    /// Returns `None` for blank, non-numeric or non-finite input.
    pub fn parse_decimal(s: &str) -> Option<f64> {
        let trimmed = s.trim();
        let trimmed = trimmed.strip_prefix("PKR").unwrap_or(trimmed).trim();
        if trimmed.is_empty() {
            return None;
        }
        let normalized: String = trimmed
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();
        normalized.parse::<f64>().ok().filter(|v| v.is_finite())
    }

}

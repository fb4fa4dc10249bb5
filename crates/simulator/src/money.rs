//! Brazilian real formatting.

use icu_decimal::DecimalFormatter;
use icu_decimal::input::Decimal;
use icu_decimal::options::DecimalFormatterOptions;
use icu_locale_core::Locale;

/// Format as pt-BR currency: `R$ 1.251,36`.
///
/// Negative amounts keep their sign after the symbol (`R$ -580,00`).
pub fn format_brl(value: f64) -> String {
    format!("R$ {}", format_pt_br(value))
}

/// Catalog label style: `R$ 450.00` (dot decimal, no grouping).
pub fn format_price_label(value: f64) -> String {
    format!("R$ {value:.2}")
}

thread_local! {
    static PT_BR: Option<DecimalFormatter> = pt_br_formatter();
}

fn pt_br_formatter() -> Option<DecimalFormatter> {
    let locale: Locale = match "pt-BR".parse() {
        Ok(locale) => locale,
        Err(err) => {
            tracing::warn!(error = %err, "pt-BR locale unavailable");
            return None;
        }
    };
    match DecimalFormatter::try_new(locale.into(), DecimalFormatterOptions::default()) {
        Ok(formatter) => Some(formatter),
        Err(err) => {
            tracing::warn!(error = %err, "pt-BR decimal data unavailable, digits left ungrouped");
            None
        }
    }
}

/// Two fraction digits, `.` for thousands and `,` for decimals.
pub fn format_pt_br(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());

    let digits = PT_BR.with(|formatter| {
        let formatter = formatter.as_ref()?;
        let decimal: Decimal = fixed.parse().ok()?;
        Some(formatter.format(&decimal).to_string())
    });
    let digits = digits.unwrap_or_else(|| fixed.replace('.', ","));

    // Rounding can turn a tiny negative into "0.00"; do not print "-0,00".
    let negative = value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let sign = if negative { "-" } else { "" };
    format!("{sign}{digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_brl(1251.36), "R$ 1.251,36");
        assert_eq!(format_brl(6256.8), "R$ 6.256,80");
        assert_eq!(format_brl(1_234_567.891), "R$ 1.234.567,89");
    }

    #[test]
    fn small_values() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(24.0), "R$ 24,00");
        assert_eq!(format_brl(999.999), "R$ 1.000,00");
    }

    #[test]
    fn negative_values() {
        assert_eq!(format_brl(-580.0), "R$ -580,00");
        assert_eq!(format_brl(-1620.5), "R$ -1.620,50");
        assert_eq!(format_brl(-0.001), "R$ 0,00");
    }

    #[test]
    fn keeps_trailing_zero_fraction_digits() {
        assert_eq!(format_pt_br(450.0), "450,00");
        assert_eq!(format_pt_br(12_000.5), "12.000,50");
        assert_eq!(format_pt_br(-0.5), "-0,50");
    }

    #[test]
    fn price_label_uses_fixed_decimals() {
        assert_eq!(format_price_label(450.0), "R$ 450.00");
        assert_eq!(format_price_label(65.5), "R$ 65.50");
    }
}

use serde::{Deserialize, Deserializer};

use crate::matching::normalize::fold;

pub(crate) fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

const UNIT_SUFFIXES: [&str; 6] = ["TL", "₺", "m²", "m2", "M2", "TRY"];

/// Lenient number parsing for exported spreadsheets.
///
/// Accepts `2500000`, `2.500.000`, `2,500,000`, `2.500.000,50`, `120 m²` and
/// `3.200.000 TL`. Anything else is treated as absent.
pub(crate) fn parse_number(raw: &str) -> Option<f64> {
    let mut cleaned: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    for suffix in UNIT_SUFFIXES {
        if let Some(stripped) = cleaned.strip_suffix(suffix) {
            cleaned = stripped.to_string();
        }
    }
    if let Some(stripped) = cleaned.strip_prefix('₺') {
        cleaned = stripped.to_string();
    }

    let dots = cleaned.matches('.').count();
    let commas = cleaned.matches(',').count();
    let normalized = match (dots, commas) {
        (0, 0) => cleaned,
        (_, 0) if dots > 1 || is_thousands_grouped(&cleaned, '.') => cleaned.replace('.', ""),
        (_, 0) => cleaned,
        (0, _) if commas > 1 || is_thousands_grouped(&cleaned, ',') => cleaned.replace(',', ""),
        (0, _) => cleaned.replace(',', "."),
        _ => {
            let decimal_comma = cleaned.rfind(',') > cleaned.rfind('.');
            if decimal_comma {
                cleaned.replace('.', "").replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
    };

    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// A single separator followed by exactly three digits reads as grouping.
fn is_thousands_grouped(value: &str, separator: char) -> bool {
    value
        .rsplit_once(separator)
        .map(|(head, tail)| {
            !head.is_empty() && tail.len() == 3 && tail.chars().all(|ch| ch.is_ascii_digit())
        })
        .unwrap_or(false)
}

pub(crate) fn parse_integer(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    match trimmed.parse::<i32>() {
        Ok(value) => Some(value),
        Err(_) => floor_label(trimmed),
    }
}

/// Common floor labels used instead of numbers in listing exports.
fn floor_label(raw: &str) -> Option<i32> {
    match fold(raw).as_str() {
        "zemin" | "giriş" | "yüksek giriş" | "bahçe katı" | "ground" | "garden" => Some(0),
        "bodrum" | "basement" => Some(-1),
        _ => None,
    }
}

/// Canonical transaction label so the exact-match gate sees one spelling.
/// Unknown labels pass through trimmed.
pub(crate) fn canonical_transaction(raw: &str) -> String {
    match fold(raw).as_str() {
        "satılık" | "satilik" | "sale" | "for sale" | "sell" => "Satılık".to_string(),
        "kiralık" | "kiralik" | "rent" | "for rent" | "rental" => "Kiralık".to_string(),
        _ => raw.trim().to_string(),
    }
}

/// Yes/no cells in English or Turkish; anything else is unknown.
pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "evet" | "var" | "required" => Some(true),
        "no" | "n" | "false" | "0" | "hayır" | "hayir" | "yok" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_number_handles_local_formats() {
        assert_eq!(parse_number("2500000"), Some(2_500_000.0));
        assert_eq!(parse_number("2.500.000"), Some(2_500_000.0));
        assert_eq!(parse_number("2,500,000"), Some(2_500_000.0));
        assert_eq!(parse_number("3.200.000 TL"), Some(3_200_000.0));
        assert_eq!(parse_number("2.500.000,50"), Some(2_500_000.5));
        assert_eq!(parse_number("120 m²"), Some(120.0));
        assert_eq!(parse_number("120,5"), Some(120.5));
        assert_eq!(parse_number("12.5"), Some(12.5));
        assert_eq!(parse_number("call us"), None);
    }

    #[test]
    fn parse_flag_understands_turkish() {
        assert_eq!(parse_flag("Evet"), Some(true));
        assert_eq!(parse_flag("Var"), Some(true));
        assert_eq!(parse_flag("Hayır"), Some(false));
        assert_eq!(parse_flag("YOK"), Some(false));
        assert_eq!(parse_flag("belki"), None);
    }

    #[test]
    fn parse_integer_reads_floor_labels() {
        assert_eq!(parse_integer("5"), Some(5));
        assert_eq!(parse_integer("-2"), Some(-2));
        assert_eq!(parse_integer("Zemin"), Some(0));
        assert_eq!(parse_integer("Bodrum"), Some(-1));
        assert_eq!(parse_integer("çatı"), None);
    }

    #[test]
    fn canonical_transaction_collapses_spellings() {
        assert_eq!(canonical_transaction("SATILIK"), "Satılık");
        assert_eq!(canonical_transaction("satilik"), "Satılık");
        assert_eq!(canonical_transaction("For Rent"), "Kiralık");
        assert_eq!(canonical_transaction(" Devren "), "Devren");
    }
}

//! Text and numeric normalization shared by the criterion evaluators.

/// Values a request may carry instead of leaving a location or type blank.
const ANY_SENTINELS: [&str; 8] = [
    "any",
    "all",
    "*",
    "tümü",
    "hepsi",
    "farketmez",
    "fark etmez",
    "belirtilmemiş",
];

/// Trims and lowercases using Turkish casing rules (`I` -> `ı`, `İ` -> `i`).
pub(crate) fn fold(value: &str) -> String {
    let mut folded = String::with_capacity(value.len());
    for ch in value.trim().chars() {
        match ch {
            'I' => folded.push('ı'),
            'İ' => folded.push('i'),
            other => folded.extend(other.to_lowercase()),
        }
    }
    folded
}

/// Folded text of an optional field, `None` when blank.
pub(crate) fn folded(value: Option<&str>) -> Option<String> {
    value.map(fold).filter(|folded| !folded.is_empty())
}

/// Folded request constraint; blank or "any" values leave the attribute unconstrained.
pub(crate) fn constraint(value: Option<&str>) -> Option<String> {
    folded(value).filter(|folded| !ANY_SENTINELS.contains(&folded.as_str()))
}

/// Trimmed text of an optional field, `None` when blank. No case folding.
pub(crate) fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Leading room count of a `"<bedrooms>+<living rooms>"` token, or a bare integer.
pub(crate) fn parse_rooms(token: &str) -> Option<u32> {
    let token = token.trim();
    let leading = match token.split_once('+') {
        Some((bedrooms, living)) => {
            living.trim().parse::<u32>().ok()?;
            bedrooms
        }
        None => token,
    };
    leading.trim().parse::<u32>().ok()
}

/// Keeps finite, strictly positive numbers; zero and negatives mean "absent".
pub(crate) fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|value| value.is_finite() && *value > 0.0)
}

/// Optional `[min, max]` range where either side may be open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Band {
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
}

impl Band {
    pub(crate) fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min: positive(min),
            max: positive(max),
        }
    }

    pub(crate) fn is_open(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    pub(crate) fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    /// Widens both edges by `tolerance` (a fraction of the edge) before checking.
    pub(crate) fn contains_within(&self, value: f64, tolerance: f64) -> bool {
        self.min.map_or(true, |min| value >= min * (1.0 - tolerance))
            && self.max.map_or(true, |max| value <= max * (1.0 + tolerance))
    }

    pub(crate) fn describe(&self) -> Option<String> {
        match (self.min, self.max) {
            (None, None) => None,
            (Some(min), None) => Some(format!("{min}+")),
            (None, Some(max)) => Some(format!("up to {max}")),
            (Some(min), Some(max)) => Some(format!("{min}-{max}")),
        }
    }
}

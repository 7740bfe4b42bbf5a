use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// 40h/week x 52 weeks
pub const HOURS_PER_YEAR: f64 = 2080.0;

const HOURLY_HINTS: &[&str] = &["/hr", "per hour", "hour"];

// "$100k", "45", "1.5k"
static SALARY_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$?(\d+(?:\.\d+)?)(k)?").unwrap());

/// Annualized salary bounds. `{0, 0}` means "no numeric content".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: u64,
    pub max: u64,
}

impl SalaryRange {
    pub fn is_unknown(&self) -> bool {
        self.min == 0 && self.max == 0
    }
}

/// Parse a free-text salary string into annual-equivalent bounds.
///
/// Every token is scaled by 1000 when it carries its own `k` suffix or when the
/// string contains a `k` anywhere. Hourly strings are annualized with
/// [`HOURS_PER_YEAR`].
pub fn parse_salary(raw: &str) -> SalaryRange {
    let text = raw.to_lowercase().replace(',', "");
    let hourly = HOURLY_HINTS.iter().any(|hint| text.contains(hint));
    let global_k = text.contains('k');

    let values: Vec<f64> = SALARY_TOKEN_RE
        .captures_iter(&text)
        .filter_map(|caps| {
            let base: f64 = caps.get(1)?.as_str().parse().ok()?;
            let scale = if caps.get(2).is_some() || global_k {
                1000.0
            } else {
                1.0
            };
            Some(base * scale)
        })
        .filter(|value| value.is_finite())
        .collect();

    if values.is_empty() {
        return SalaryRange::default();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if hourly {
        min *= HOURS_PER_YEAR;
        max *= HOURS_PER_YEAR;
    }

    SalaryRange {
        min: to_units(min),
        max: to_units(max),
    }
}

fn to_units(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u64::MAX as f64) as u64
    } else {
        0
    }
}

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::Inferred;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Seniority {
    Junior,
    Mid,
    Senior,
    Lead,
}

// Checked in order; the first group with a hit wins.
const SENIORITY_RULES: &[(&[&str], Seniority)] = &[
    (&["intern", "junior", "jr"], Seniority::Junior),
    (&["principal", "head", "director", "vp "], Seniority::Lead),
    (&["lead", "staff"], Seniority::Lead),
    (&["senior", "sr"], Seniority::Senior),
    (&["mid"], Seniority::Mid),
];

/// Infer seniority from a job title.
pub fn infer_seniority(title: &str) -> Inferred<Seniority> {
    let lower = title.to_lowercase();

    SENIORITY_RULES
        .iter()
        .find(|(hints, _)| hints.iter().any(|hint| lower.contains(hint)))
        .map(|(_, level)| Inferred::Known(*level))
        .unwrap_or(Inferred::Unknown)
}

//! Field normalizers: turn free-text listing fields into comparable values.
//!
//! Everything here is a pure function of a single [`Listing`].

pub mod salary;
pub mod seniority;
pub mod timezone;
pub mod tools;
pub mod work_mode;

use std::collections::HashSet;

use serde::{Serialize, Serializer};

use crate::Listing;
use salary::{parse_salary, SalaryRange};
use seniority::{infer_seniority, Seniority};
use timezone::{infer_timezone, TimezoneRegion};
use tools::extract_tool_signals;
use work_mode::{bucket_work_mode, WorkMode};

/// Result of a heuristic classification that may find no signal at all.
///
/// Callers decide what `Unknown` means for them; it is never folded into a
/// concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Inferred<T> {
    Known(T),
    Unknown,
}

impl<T: PartialEq> Inferred<T> {
    pub fn is_known(&self, value: &T) -> bool {
        matches!(self, Inferred::Known(known) if known == value)
    }

    /// Filter semantics: `Unknown` never excludes.
    pub fn admits(&self, wanted: &T) -> bool {
        match self {
            Inferred::Known(known) => known == wanted,
            Inferred::Unknown => true,
        }
    }
}

impl<T> Inferred<T> {
    pub fn known(&self) -> Option<&T> {
        match self {
            Inferred::Known(value) => Some(value),
            Inferred::Unknown => None,
        }
    }
}

impl<T: AsRef<str>> Serialize for Inferred<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Inferred::Known(value) => serializer.serialize_str(value.as_ref()),
            Inferred::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// Per-listing values computed once per engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSignals {
    pub salary_range: SalaryRange,
    pub work_mode: WorkMode,
    pub seniority: Inferred<Seniority>,
    pub timezone: Inferred<TimezoneRegion>,
    pub tool_signals: HashSet<String>,
}

impl DerivedSignals {
    pub fn derive(listing: &Listing) -> Self {
        Self {
            salary_range: parse_salary(&listing.salary),
            work_mode: bucket_work_mode(&listing.remote_policy),
            seniority: infer_seniority(&listing.title),
            timezone: infer_timezone(listing),
            tool_signals: extract_tool_signals(listing),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_admits_every_filter_value() {
        let unknown: Inferred<Seniority> = Inferred::Unknown;
        assert!(unknown.admits(&Seniority::Senior));
        assert!(!unknown.is_known(&Seniority::Senior));

        let senior = Inferred::Known(Seniority::Senior);
        assert!(senior.admits(&Seniority::Senior));
        assert!(!senior.admits(&Seniority::Junior));
    }

    #[test]
    fn derives_all_signals_from_listing() {
        let listing = Listing {
            id: "d".into(),
            title: "Senior Automation Engineer".into(),
            salary: "$100k - $140k".into(),
            remote_policy: "Remote".into(),
            location: "London".into(),
            tools: vec!["Make.com".into()],
            tags: vec!["Zapier".into()],
            ..Listing::default()
        };

        let signals = DerivedSignals::derive(&listing);
        assert_eq!(signals.salary_range.max, 140_000);
        assert_eq!(signals.work_mode, WorkMode::Remote);
        assert_eq!(signals.seniority, Inferred::Known(Seniority::Senior));
        assert_eq!(signals.timezone, Inferred::Known(TimezoneRegion::Eu));
        assert!(signals.tool_signals.contains("make.com"));
        assert!(signals.tool_signals.contains("zapier"));
    }

    #[test]
    fn serializes_unknown_as_string() {
        let value = serde_json::to_value(Inferred::<Seniority>::Unknown).unwrap();
        assert_eq!(value, "unknown");
        let value = serde_json::to_value(Inferred::Known(Seniority::Lead)).unwrap();
        assert_eq!(value, "lead");
    }
}

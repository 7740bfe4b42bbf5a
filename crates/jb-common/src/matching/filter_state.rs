use std::str::FromStr;

use strum::{AsRefStr, EnumString};

use crate::corrections::{seniority::Seniority, timezone::TimezoneRegion, work_mode::WorkMode};

/// Sentinel the board UI uses for "no restriction" on an enum filter.
pub const ALL_SENTINEL: &str = "all";

/// An enum-valued filter. `Unrecognized` keeps the raw input and matches no
/// listing, so a stale query string narrows the board instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet<T> {
    Any,
    Only(T),
    Unrecognized(String),
}

impl<T> Default for Facet<T> {
    fn default() -> Self {
        Facet::Any
    }
}

impl<T: FromStr> Facet<T> {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_SENTINEL) {
            return Facet::Any;
        }

        match trimmed.parse::<T>() {
            Ok(value) => Facet::Only(value),
            Err(_) => Facet::Unrecognized(trimmed.to_string()),
        }
    }
}

impl<T: PartialEq> Facet<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Facet::Any => true,
            Facet::Only(wanted) => wanted == value,
            Facet::Unrecognized(_) => false,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Facet::Any)
    }
}

impl<T: AsRef<str>> Facet<T> {
    /// Inverse of [`Facet::parse`].
    pub fn as_param(&self) -> &str {
        match self {
            Facet::Any => ALL_SENTINEL,
            Facet::Only(value) => value.as_ref(),
            Facet::Unrecognized(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum TimezoneFilter {
    #[default]
    Any,
    #[strum(to_string = "eu-friendly", serialize = "eu")]
    EuFriendly,
    #[strum(to_string = "us-friendly", serialize = "us")]
    UsFriendly,
}

impl TimezoneFilter {
    pub fn region(&self) -> Option<TimezoneRegion> {
        match self {
            TimezoneFilter::Any => None,
            TimezoneFilter::EuFriendly => Some(TimezoneRegion::Eu),
            TimezoneFilter::UsFriendly => Some(TimezoneRegion::Us),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SeniorityFilter {
    #[default]
    Any,
    Junior,
    Mid,
    Senior,
    Lead,
}

impl SeniorityFilter {
    pub fn level(&self) -> Option<Seniority> {
        match self {
            SeniorityFilter::Any => None,
            SeniorityFilter::Junior => Some(Seniority::Junior),
            SeniorityFilter::Mid => Some(Seniority::Mid),
            SeniorityFilter::Senior => Some(Seniority::Senior),
            SeniorityFilter::Lead => Some(Seniority::Lead),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SortMode {
    #[default]
    Newest,
    Salary,
    #[strum(to_string = "relevant", serialize = "relevance")]
    Relevant,
}

/// Which salary bound the user moved last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBound {
    Min,
    Max,
}

/// Current board filter/sort selection. Owned by the caller and rebuilt from
/// user input or URL parameters; `Default` means "nothing filtered".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterState {
    pub query: String,
    pub location: String,
    /// Compared verbatim against `Listing::category`.
    pub category: Facet<String>,
    pub work_mode: Facet<WorkMode>,
    /// Compared verbatim against `Listing::employment_type`.
    pub employment_type: Facet<String>,
    /// 0 = unbounded
    pub salary_min: u64,
    /// 0 = unbounded
    pub salary_max: u64,
    pub selected_tools: Vec<String>,
    pub timezone: TimezoneFilter,
    pub seniority: SeniorityFilter,
    pub verified_only: bool,
    pub saved_only: bool,
    pub sort_by: SortMode,
}

impl FilterState {
    /// Keep `salary_min <= salary_max` when both are set. The bound named by
    /// `anchor` is kept as-is and the other one is moved onto it.
    pub fn reconcile_salary(&mut self, anchor: SalaryBound) {
        if self.salary_min == 0 || self.salary_max == 0 || self.salary_min <= self.salary_max {
            return;
        }

        match anchor {
            SalaryBound::Min => self.salary_max = self.salary_min,
            SalaryBound::Max => self.salary_min = self.salary_max,
        }
    }

    /// Trimmed, lower-cased query tokens.
    pub fn query_tokens(&self) -> Vec<String> {
        self.query
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

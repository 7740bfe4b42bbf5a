use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::matching::filter_state::{
    Facet, FilterState, SalaryBound, SeniorityFilter, SortMode, TimezoneFilter,
};
use crate::Listing;

/// Query-string form of [`FilterState`], as the board keeps it in its URL.
///
/// Every field is optional text so that a hand-edited or stale URL never fails
/// to parse; conversion decides what each value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_mode: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<String>,
    /// Comma separated tool names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seniority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    /// Comma separated ids of the viewer's saved listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_ids: Option<String>,
}

/// Body of a one-shot ranking request: listings supplied by the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub filter: BoardQuery,
    #[serde(default)]
    pub saved_ids: Vec<String>,
}

fn text(value: &Option<String>) -> String {
    value.as_deref().map(str::trim).unwrap_or_default().to_string()
}

fn amount(value: &Option<String>) -> u64 {
    value
        .as_deref()
        .map(|raw| raw.trim().replace(',', ""))
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(0)
}

fn flag(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

fn list(value: &Option<String>) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_param(values: &[String]) -> Option<String> {
    (!values.is_empty()).then(|| values.join(","))
}

impl BoardQuery {
    /// Lenient conversion. Unknown category/work-mode/type values become
    /// `Facet::Unrecognized`; unknown timezone/seniority/sort values fall back
    /// to their defaults; unparsable amounts become 0. Crossed salary bounds
    /// are reconciled with the floor winning.
    pub fn to_filter_state(&self) -> FilterState {
        let mut state = FilterState {
            query: text(&self.q),
            location: text(&self.location),
            category: Facet::parse(&text(&self.category)),
            work_mode: Facet::parse(&text(&self.work_mode)),
            employment_type: Facet::parse(&text(&self.employment_type)),
            salary_min: amount(&self.salary_min),
            salary_max: amount(&self.salary_max),
            selected_tools: list(&self.tools),
            timezone: text(&self.timezone)
                .parse::<TimezoneFilter>()
                .unwrap_or_default(),
            seniority: text(&self.seniority)
                .parse::<SeniorityFilter>()
                .unwrap_or_default(),
            verified_only: flag(&self.verified),
            saved_only: flag(&self.saved),
            sort_by: text(&self.sort).parse::<SortMode>().unwrap_or_default(),
        };
        state.reconcile_salary(SalaryBound::Min);
        state
    }

    pub fn saved_id_set(&self) -> HashSet<String> {
        list(&self.saved_ids).into_iter().collect()
    }

    /// Inverse of [`BoardQuery::to_filter_state`]; unset filters are omitted.
    pub fn from_filter(state: &FilterState) -> Self {
        let non_empty = |value: &str| (!value.is_empty()).then(|| value.to_string());
        let facet = |value: &str, is_any: bool| (!is_any).then(|| value.to_string());
        let amount_param = |value: u64| (value > 0).then(|| value.to_string());
        let flag_param = |value: bool| value.then(|| "true".to_string());

        Self {
            q: non_empty(&state.query),
            location: non_empty(&state.location),
            category: facet(state.category.as_param(), state.category.is_any()),
            work_mode: facet(state.work_mode.as_param(), state.work_mode.is_any()),
            employment_type: facet(
                state.employment_type.as_param(),
                state.employment_type.is_any(),
            ),
            salary_min: amount_param(state.salary_min),
            salary_max: amount_param(state.salary_max),
            tools: join_param(&state.selected_tools),
            timezone: (state.timezone != TimezoneFilter::Any)
                .then(|| state.timezone.as_ref().to_string()),
            seniority: (state.seniority != SeniorityFilter::Any)
                .then(|| state.seniority.as_ref().to_string()),
            verified: flag_param(state.verified_only),
            saved: flag_param(state.saved_only),
            sort: (state.sort_by != SortMode::Newest).then(|| state.sort_by.as_ref().to_string()),
            saved_ids: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corrections::work_mode::WorkMode;

    fn query(pairs: &[(&str, &str)]) -> BoardQuery {
        let value = serde_json::Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                .collect(),
        );
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_query_is_default_state() {
        assert_eq!(BoardQuery::default().to_filter_state(), FilterState::default());
    }

    #[test]
    fn parses_every_parameter() {
        let state = query(&[
            ("q", " ops "),
            ("location", "Berlin"),
            ("category", "Operations"),
            ("work_mode", "remote"),
            ("type", "Full-time"),
            ("salary_min", "80,000"),
            ("salary_max", "120000"),
            ("tools", "Make, Zapier,,"),
            ("timezone", "eu"),
            ("seniority", "senior"),
            ("verified", "1"),
            ("saved", "true"),
            ("sort", "salary"),
        ])
        .to_filter_state();

        assert_eq!(state.query, "ops");
        assert_eq!(state.location, "Berlin");
        assert_eq!(state.category, Facet::Only("Operations".into()));
        assert_eq!(state.work_mode, Facet::Only(WorkMode::Remote));
        assert_eq!(state.employment_type, Facet::Only("Full-time".into()));
        assert_eq!((state.salary_min, state.salary_max), (80_000, 120_000));
        assert_eq!(state.selected_tools, vec!["Make", "Zapier"]);
        assert_eq!(state.timezone, TimezoneFilter::EuFriendly);
        assert_eq!(state.seniority, SeniorityFilter::Senior);
        assert!(state.verified_only);
        assert!(state.saved_only);
        assert_eq!(state.sort_by, SortMode::Salary);
    }

    #[test]
    fn garbage_values_degrade_instead_of_failing() {
        let state = query(&[
            ("work_mode", "spaceship"),
            ("salary_min", "lots"),
            ("timezone", "mars"),
            ("seniority", "wizard"),
            ("sort", "random"),
            ("verified", "maybe"),
        ])
        .to_filter_state();

        assert_eq!(state.work_mode, Facet::Unrecognized("spaceship".into()));
        assert_eq!(state.salary_min, 0);
        assert_eq!(state.timezone, TimezoneFilter::Any);
        assert_eq!(state.seniority, SeniorityFilter::Any);
        assert_eq!(state.sort_by, SortMode::Newest);
        assert!(!state.verified_only);
    }

    #[test]
    fn crossed_salary_bounds_are_reconciled() {
        let state = query(&[("salary_min", "150000"), ("salary_max", "90000")]).to_filter_state();
        assert_eq!((state.salary_min, state.salary_max), (150_000, 150_000));
    }

    #[test]
    fn from_filter_round_trips_set_values() {
        let original = query(&[
            ("q", "ops"),
            ("work_mode", "Hybrid"),
            ("tools", "Make,Notion"),
            ("timezone", "us-friendly"),
            ("sort", "relevant"),
        ]);
        let state = original.to_filter_state();
        let back = BoardQuery::from_filter(&state);

        assert_eq!(back.q.as_deref(), Some("ops"));
        assert_eq!(back.work_mode.as_deref(), Some("Hybrid"));
        assert_eq!(back.tools.as_deref(), Some("Make,Notion"));
        assert_eq!(back.timezone.as_deref(), Some("us-friendly"));
        assert_eq!(back.sort.as_deref(), Some("relevant"));
        assert_eq!(back.category, None);
        assert_eq!(back.to_filter_state(), state);
    }

    #[test]
    fn saved_ids_are_split() {
        let q = query(&[("saved_ids", "a, b,,c")]);
        let ids = q.saved_id_set();
        assert_eq!(ids.len(), 3);
        assert!(ids.contains("b"));
    }
}

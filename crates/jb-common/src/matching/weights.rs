use serde::Serialize;
use strum::AsRefStr;

/// Paid visibility tier of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, AsRefStr)]
pub enum PlanTier {
    Standard,
    Featured,
    Elite,
}

impl PlanTier {
    /// Missing or unknown plan names fall back to `Standard`.
    ///
    /// The store uses names like "Elite Managed" or "Pro", so matching is by
    /// whole word rather than exact value.
    pub fn from_plan_type(plan_type: Option<&str>) -> Self {
        let Some(raw) = plan_type else {
            return PlanTier::Standard;
        };
        let lower = raw.to_lowercase();
        let has_word = |word: &str| {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|part| part == word)
        };

        if has_word("elite") {
            PlanTier::Elite
        } else if has_word("pro") || has_word("featured") {
            PlanTier::Featured
        } else {
            PlanTier::Standard
        }
    }

    pub fn weight(&self) -> u8 {
        match self {
            PlanTier::Elite => 3,
            PlanTier::Featured => 2,
            PlanTier::Standard => 1,
        }
    }
}

/// Bonus points added on top of a listing's `matchScore` in relevance sort.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceBonuses {
    /// Per query token found in title/company/tags/tools.
    pub keyword_hit: f64,
    /// Per selected tool the listing carries.
    pub tool_match: f64,
    /// When the seniority filter equals the inferred bucket.
    pub seniority_match: f64,
}

pub const DEFAULT_RELEVANCE_BONUSES: RelevanceBonuses = RelevanceBonuses {
    keyword_hit: 10.0,
    tool_match: 6.0,
    seniority_match: 6.0,
};

impl Default for RelevanceBonuses {
    fn default() -> Self {
        DEFAULT_RELEVANCE_BONUSES
    }
}

impl RelevanceBonuses {
    /// Defaults, overridable through `JB_RELEVANCE_KEYWORD_BONUS`,
    /// `JB_RELEVANCE_TOOL_BONUS` and `JB_RELEVANCE_SENIORITY_BONUS`.
    pub fn from_env() -> Self {
        let defaults = DEFAULT_RELEVANCE_BONUSES;
        Self {
            keyword_hit: env_bonus("JB_RELEVANCE_KEYWORD_BONUS").unwrap_or(defaults.keyword_hit),
            tool_match: env_bonus("JB_RELEVANCE_TOOL_BONUS").unwrap_or(defaults.tool_match),
            seniority_match: env_bonus("JB_RELEVANCE_SENIORITY_BONUS")
                .unwrap_or(defaults.seniority_match),
        }
    }
}

fn env_bonus(name: &str) -> Option<f64> {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value >= 0.0)
}

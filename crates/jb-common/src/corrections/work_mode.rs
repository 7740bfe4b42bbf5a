use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

/// Work-mode bucket derived from `remotePolicy`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum WorkMode {
    Remote,
    Hybrid,
    Onsite,
}

/// Bucket a free-text remote policy. "hybrid" is checked before "remote"
/// because hybrid policies often mention remote days too.
pub fn bucket_work_mode(remote_policy: &str) -> WorkMode {
    let lower = remote_policy.to_lowercase();

    if lower.contains("hybrid") {
        return WorkMode::Hybrid;
    }
    if lower.contains("remote") {
        return WorkMode::Remote;
    }

    WorkMode::Onsite
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hybrid_wins_over_remote() {
        assert_eq!(
            bucket_work_mode("Hybrid - 2 remote days"),
            WorkMode::Hybrid
        );
        assert_eq!(bucket_work_mode("Fully Remote"), WorkMode::Remote);
    }

    #[test]
    fn falls_back_to_onsite() {
        assert_eq!(bucket_work_mode(""), WorkMode::Onsite);
        assert_eq!(bucket_work_mode("In office, Austin"), WorkMode::Onsite);
    }

    #[test]
    fn parses_filter_values_case_insensitively() {
        assert_eq!("remote".parse::<WorkMode>().unwrap(), WorkMode::Remote);
        assert_eq!("Onsite".parse::<WorkMode>().unwrap(), WorkMode::Onsite);
        assert!("office".parse::<WorkMode>().is_err());
        assert_eq!(WorkMode::Hybrid.as_ref(), "Hybrid");
    }
}

use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Life category used to bucket goals and aggregate planned time.
///
/// The set is closed: every allocation report carries exactly these eight
/// keys, in the order of [`LifeDomain::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeDomain {
    Career,
    Finance,
    Health,
    Family,
    Relationships,
    Growth,
    Leisure,
    Contribution,
}

impl LifeDomain {
    /// Every domain, in display order.
    pub const ALL: [LifeDomain; 8] = [
        LifeDomain::Career,
        LifeDomain::Finance,
        LifeDomain::Health,
        LifeDomain::Family,
        LifeDomain::Relationships,
        LifeDomain::Growth,
        LifeDomain::Leisure,
        LifeDomain::Contribution,
    ];

    /// Canonical lowercase code, matching the serde representation.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            LifeDomain::Career => "career",
            LifeDomain::Finance => "finance",
            LifeDomain::Health => "health",
            LifeDomain::Family => "family",
            LifeDomain::Relationships => "relationships",
            LifeDomain::Growth => "growth",
            LifeDomain::Leisure => "leisure",
            LifeDomain::Contribution => "contribution",
        }
    }
}

impl core::fmt::Display for LifeDomain {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<&str> for LifeDomain {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        LifeDomain::ALL
            .into_iter()
            .find(|domain| domain.code() == normalized)
            .ok_or_else(|| EngineError::InvalidInput(format!("unknown life domain: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(LifeDomain::try_from("Health").unwrap(), LifeDomain::Health);
        assert_eq!(
            LifeDomain::try_from(" contribution ").unwrap(),
            LifeDomain::Contribution
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!(LifeDomain::try_from("hobbies").is_err());
    }

    #[test]
    fn serde_matches_code() {
        for domain in LifeDomain::ALL {
            let json = serde_json::to_string(&domain).unwrap();
            assert_eq!(json, format!("\"{}\"", domain.code()));
        }
    }
}

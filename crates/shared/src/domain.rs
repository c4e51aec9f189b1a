use serde::{Deserialize, Serialize};

/// A trimmed, non-empty city name. The only entity in the system; nothing
/// derived from it outlives a single query/response cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityName(String);

impl CityName {
    /// Trims `raw` and rejects the empty result. Length bounds are enforced
    /// server-side, where the upstream lookup happens.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let city = CityName::parse("  Madrid  ").expect("city");
        assert_eq!(city.as_str(), "Madrid");
    }

    #[test]
    fn parse_rejects_whitespace_only_input() {
        assert!(CityName::parse("   ").is_none());
        assert!(CityName::parse("").is_none());
        assert!(CityName::parse("\t\n").is_none());
    }
}

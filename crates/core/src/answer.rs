//! The tri-valued freshness answer.

/// Answer returned by the staleness oracle for a cached result.
///
/// Carries stable integer codes for callers that speak a plain int
/// contract: 0 = do not serve, 1 = serve, 2 = no recommendation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Freshness {
    /// At least one referenced table mutated after the cached result was
    /// produced. The cached result must not be served.
    Stale = 0,
    /// Every referenced table was last mutated at or before the cached
    /// result's timestamp. The cached result may be served.
    Fresh = 1,
    /// The oracle declines to recommend: a referenced table is unknown,
    /// the snapshot is empty, or a decision-time fault occurred.
    Pass = 2,
}

impl Freshness {
    /// Integer code for callers that speak the 0/1/2 contract.
    pub fn as_code(self) -> u8 {
        self as u8
    }
}

impl From<Freshness> for u8 {
    fn from(answer: Freshness) -> Self {
        answer.as_code()
    }
}

impl std::fmt::Display for Freshness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Freshness::Stale => "stale",
            Freshness::Fresh => "fresh",
            Freshness::Pass => "pass",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_wire_contract() {
        assert_eq!(Freshness::Stale.as_code(), 0);
        assert_eq!(Freshness::Fresh.as_code(), 1);
        assert_eq!(Freshness::Pass.as_code(), 2);
        assert_eq!(u8::from(Freshness::Pass), 2);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Freshness::Fresh.to_string(), "fresh");
        assert_eq!(Freshness::Stale.to_string(), "stale");
    }
}

//! Zone coverage for one dimension (regions or countries) of a shipping
//! method.
//!
//! A shipping zone row stores its region and country codes as nullable
//! columns, where NULL marks a wildcard ("applies everywhere") for that
//! dimension. Carrying those nulls around as `Option<String>` conflates
//! "no codes at all" with "applies everywhere", so the aggregate over a
//! method's zones is modeled as an explicit sum type instead.

/// Aggregate coverage over one dimension of a set of shipping zones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    /// At least one zone carried a wildcard marker for this dimension.
    Wildcard,
    /// Specific codes, in zone order, duplicates preserved. May be empty.
    Codes(Vec<String>),
}

impl Coverage {
    /// Aggregate codes with wildcard-wins semantics: any `None` in the
    /// input makes the whole dimension `Wildcard`, otherwise all codes are
    /// collected in input order.
    pub fn collect<'a, I>(codes: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut out = Vec::new();
        for code in codes {
            match code {
                None => return Self::Wildcard,
                Some(code) => out.push(code.to_owned()),
            }
        }
        Self::Codes(out)
    }

    /// Collect only the specific codes, silently dropping wildcard markers.
    /// Used by lookups that ignore wildcard semantics entirely.
    pub fn specific<'a, I>(codes: I) -> Vec<String>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        codes
            .into_iter()
            .flatten()
            .map(ToOwned::to_owned)
            .collect()
    }

    /// Whether this dimension applies everywhere.
    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// Convert to the client-facing shape: `None` for wildcard, `Some` for
    /// a (possibly empty) list of codes.
    #[must_use]
    pub fn into_codes(self) -> Option<Vec<String>> {
        match self {
            Self::Wildcard => None,
            Self::Codes(codes) => Some(codes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_without_wildcard() {
        let coverage = Coverage::collect([Some("EU"), Some("APAC")]);
        assert_eq!(
            coverage,
            Coverage::Codes(vec!["EU".to_owned(), "APAC".to_owned()])
        );
        assert!(!coverage.is_wildcard());
    }

    #[test]
    fn test_collect_wildcard_wins_over_specifics() {
        let coverage = Coverage::collect([Some("EU"), None, Some("US")]);
        assert_eq!(coverage, Coverage::Wildcard);
        assert_eq!(coverage.into_codes(), None);
    }

    #[test]
    fn test_collect_empty_input_is_empty_codes() {
        // No zones at all is "covers nothing", not "covers everything".
        let coverage = Coverage::collect(std::iter::empty());
        assert_eq!(coverage, Coverage::Codes(Vec::new()));
        assert_eq!(coverage.into_codes(), Some(Vec::new()));
    }

    #[test]
    fn test_collect_preserves_order_and_duplicates() {
        let coverage = Coverage::collect([Some("EU"), Some("EU"), Some("US")]);
        assert_eq!(
            coverage.into_codes(),
            Some(vec!["EU".to_owned(), "EU".to_owned(), "US".to_owned()])
        );
    }

    #[test]
    fn test_specific_drops_wildcards() {
        let codes = Coverage::specific([Some("EU"), None, Some("US"), None]);
        assert_eq!(codes, vec!["EU".to_owned(), "US".to_owned()]);
    }

    #[test]
    fn test_specific_of_only_wildcards_is_empty() {
        let codes = Coverage::specific([None, None]);
        assert!(codes.is_empty());
    }
}

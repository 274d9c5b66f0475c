//! Validated service names.
//!
//! A service name is kebab-case: a lowercase letter, then lowercase letters
//! or digits, optionally followed by groups of `-` and one or more lowercase
//! letters or digits. `payments-api` and `ledger2` are valid; `Payments`,
//! `2fa`, `a--b`, `-a`, `a-` and the empty string are not.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::error::DomainError;

/// Human-readable description of the accepted grammar.
pub const EXPECTED_GRAMMAR: &str =
    "kebab-case with lowercase letters, numbers, and hyphens (e.g. payments-api)";

/// A service name that satisfies the kebab-case grammar.
///
/// Invariant: only constructed through [`ServiceName::parse`], never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ServiceName(String);

impl ServiceName {
    /// Validate `name` and wrap it.
    pub fn parse(name: impl AsRef<str>) -> Result<Self, DomainError> {
        let name = name.as_ref();
        validate_service_name(name)?;
        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `payments-api` → `PaymentsApi`.
    ///
    /// Each hyphen-delimited segment has its first character upper-cased;
    /// empty segments are skipped.
    pub fn pascal_case(&self) -> String {
        pascal_case(&self.0)
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ServiceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ServiceName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check `name` against the service name grammar without allocating.
pub fn validate_service_name(name: &str) -> Result<(), DomainError> {
    if is_valid(name) {
        Ok(())
    } else {
        Err(DomainError::InvalidServiceName {
            name: name.to_owned(),
            expected: EXPECTED_GRAMMAR,
        })
    }
}

pub(crate) fn is_valid(name: &str) -> bool {
    let mut bytes = name.bytes();

    match bytes.next() {
        Some(b'a'..=b'z') => {}
        _ => return false,
    }

    // `prev_hyphen` starts false: the first byte was a letter.
    let mut prev_hyphen = false;
    for b in bytes {
        match b {
            b'a'..=b'z' | b'0'..=b'9' => prev_hyphen = false,
            b'-' if !prev_hyphen => prev_hyphen = true,
            _ => return false,
        }
    }

    !prev_hyphen
}

/// Pascal-case any hyphen-delimited string.
///
/// Works on arbitrary input so that derivation stays total; segments of zero
/// length (`a--b`) contribute nothing.
pub fn pascal_case(value: &str) -> String {
    value
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_kebab_case() {
        for name in ["a", "payments-api", "ledger2", "a1-b2-c3", "orders-v2-api"] {
            assert!(ServiceName::parse(name).is_ok(), "rejected: {name}");
        }
    }

    #[test]
    fn rejects_each_grammar_violation() {
        for name in [
            "",
            "Payments",
            "payments-Api",
            "2fa",
            "a--b",
            "-a",
            "a-",
            "-",
            "payments_api",
            "payments api",
            "pay.ments",
            "é",
        ] {
            assert!(
                matches!(
                    ServiceName::parse(name),
                    Err(DomainError::InvalidServiceName { .. })
                ),
                "accepted: {name:?}"
            );
        }
    }

    #[test]
    fn error_carries_expected_grammar() {
        let err = validate_service_name("Nope").unwrap_err();
        assert!(err.to_string().contains(EXPECTED_GRAMMAR));
    }

    #[test]
    fn pascal_case_examples() {
        assert_eq!(pascal_case("payments-api"), "PaymentsApi");
        assert_eq!(pascal_case("a"), "A");
        assert_eq!(pascal_case("a--b"), "AB");
        assert_eq!(pascal_case("ledger2-v3"), "Ledger2V3");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn service_name_round_trips_through_from_str() {
        let name: ServiceName = "orders".parse().unwrap();
        assert_eq!(name.as_str(), "orders");
        assert_eq!(name.to_string(), "orders");
        assert_eq!(name.pascal_case(), "Orders");
    }

    fn kebab_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9]{0,8}(-[a-z0-9]{1,6}){0,4}"
    }

    proptest! {
        #[test]
        fn every_kebab_name_is_accepted(name in kebab_name()) {
            prop_assert!(ServiceName::parse(&name).is_ok());
        }

        #[test]
        fn uppercase_anywhere_is_rejected(name in kebab_name(), idx in 0usize..64) {
            let idx = idx % name.len();
            let mut bytes = name.into_bytes();
            bytes[idx] = b'A';
            let mutated = String::from_utf8(bytes).unwrap();
            prop_assert!(ServiceName::parse(&mutated).is_err());
        }

        #[test]
        fn trailing_or_doubled_hyphen_is_rejected(name in kebab_name()) {
            let trailing = format!("{name}-");
            let doubled = format!("{name}--x");
            prop_assert!(ServiceName::parse(&trailing).is_err());
            prop_assert!(ServiceName::parse(&doubled).is_err());
        }

        #[test]
        fn pascal_case_matches_segment_rule(name in kebab_name()) {
            let derived = pascal_case(&name);
            let expected: String = name
                .split('-')
                .map(|s| {
                    let mut c = s.chars();
                    let first = c.next().unwrap().to_ascii_uppercase();
                    std::iter::once(first).chain(c).collect::<String>()
                })
                .collect();
            prop_assert_eq!(&derived, &expected);
            prop_assert!(!derived.contains('-'));
        }
    }
}

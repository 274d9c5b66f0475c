//! Placeholder substitution for text files.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::service_name::ServiceName;

/// Replaced with the service name as given (`payments-api`).
pub const SERVICE_NAME_TOKEN: &str = "__SERVICE_NAME__";
/// Replaced with the pascal-cased service name (`PaymentsApi`).
pub const SERVICE_NAME_PASCAL_TOKEN: &str = "__SERVICE_NAME_PASCAL__";
/// Replaced with the generation timestamp (`2024-05-01T12:00:00.000Z`).
pub const GENERATED_DATE_ISO_TOKEN: &str = "__GENERATED_DATE_ISO__";

/// One `(token, replacement)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub token: &'static str,
    pub value: String,
}

/// Ordered placeholder pairs derived once per generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderSet {
    pairs: Vec<Placeholder>,
}

impl PlaceholderSet {
    /// Build the three fixed placeholders for `name` at `generated_at`.
    pub fn derive(name: &ServiceName, generated_at: DateTime<Utc>) -> Self {
        Self {
            pairs: vec![
                Placeholder {
                    token: SERVICE_NAME_TOKEN,
                    value: name.as_str().to_owned(),
                },
                Placeholder {
                    token: SERVICE_NAME_PASCAL_TOKEN,
                    value: name.pascal_case(),
                },
                Placeholder {
                    token: GENERATED_DATE_ISO_TOKEN,
                    value: iso_timestamp(generated_at),
                },
            ],
        }
    }

    pub fn pairs(&self) -> &[Placeholder] {
        &self.pairs
    }

    /// Look up the replacement for `token`.
    pub fn value_of(&self, token: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.token == token)
            .map(|p| p.value.as_str())
    }

    /// Replace every occurrence of each token, one pair at a time in order.
    ///
    /// Each pass is a literal replace over the previous pass's output. The
    /// derived values never contain `_`, so no pass can form a token out of
    /// an earlier replacement.
    pub fn apply(&self, content: &str) -> String {
        self.pairs
            .iter()
            .fold(content.to_owned(), |text, pair| text.replace(pair.token, &pair.value))
    }

    /// Decode, normalize line endings, and substitute placeholders.
    ///
    /// Invalid UTF-8 sequences decode to U+FFFD.
    pub fn render_text(&self, raw: &[u8]) -> String {
        let decoded = String::from_utf8_lossy(raw);
        self.apply(&normalize_newlines(&decoded))
    }
}

/// Convert CRLF sequences to LF. Lone CR characters are left alone.
pub fn normalize_newlines(content: &str) -> String {
    content.replace("\r\n", "\n")
}

/// Full ISO-8601 with millisecond precision and a `Z` designator.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 5).unwrap()
            + chrono::Duration::milliseconds(42)
    }

    fn set(name: &str) -> PlaceholderSet {
        PlaceholderSet::derive(&ServiceName::parse(name).unwrap(), fixed_time())
    }

    #[test]
    fn derives_three_ordered_pairs() {
        let set = set("payments-api");
        let tokens: Vec<_> = set.pairs().iter().map(|p| p.token).collect();
        assert_eq!(
            tokens,
            [SERVICE_NAME_TOKEN, SERVICE_NAME_PASCAL_TOKEN, GENERATED_DATE_ISO_TOKEN]
        );
        assert_eq!(set.value_of(SERVICE_NAME_TOKEN), Some("payments-api"));
        assert_eq!(set.value_of(SERVICE_NAME_PASCAL_TOKEN), Some("PaymentsApi"));
        assert_eq!(
            set.value_of(GENERATED_DATE_ISO_TOKEN),
            Some("2024-05-01T12:30:05.042Z")
        );
    }

    #[test]
    fn timestamp_keeps_zero_milliseconds() {
        let at = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(iso_timestamp(at), "2020-01-02T03:04:05.000Z");
    }

    #[test]
    fn replaces_all_tokens() {
        let out = set("payments-api").apply(
            "const name = \"__SERVICE_NAME__\";\nclass __SERVICE_NAME_PASCAL__ {}\n// __GENERATED_DATE_ISO__ __SERVICE_NAME__",
        );
        assert_eq!(
            out,
            "const name = \"payments-api\";\nclass PaymentsApi {}\n// 2024-05-01T12:30:05.042Z payments-api"
        );
    }

    #[test]
    fn leaves_unrelated_underscores_alone() {
        let input = "__init__ _x __SERVICE_NAME_ __SERVICE_NAME___";
        assert_eq!(
            set("orders").apply(input),
            "__init__ _x __SERVICE_NAME_ orders_"
        );
    }

    #[test]
    fn replacement_text_is_not_rescanned() {
        let set = set("payments-api");
        let input = "____SERVICE_NAME____SERVICE_NAME_PASCAL____GENERATED_DATE_ISO____";
        let out = set.apply(input);
        assert_eq!(
            out,
            "__payments-apiPaymentsApi2024-05-01T12:30:05.042Z__"
        );
        for pair in set.pairs() {
            assert!(!pair.value.contains('_'));
            assert!(!out.contains(pair.token));
        }
    }

    #[test]
    fn pairs_apply_in_order_over_overlapping_text() {
        let set = set("payments-api");
        assert_eq!(
            set.apply("__SERVICE_NAME_PASCAL__SERVICE_NAME__"),
            "__SERVICE_NAME_PASCALpayments-api"
        );
        assert_eq!(
            set.apply("__GENERATED_DATE_ISO__SERVICE_NAME__"),
            "__GENERATED_DATE_ISOpayments-api"
        );
    }

    #[test]
    fn apply_matches_chained_replace() {
        let set = set("orders");
        let input = "__SERVICE_NAME___SERVICE_NAME_PASCAL__ x __GENERATED_DATE_ISO__SERVICE_NAME_PASCAL__";
        let expected = set
            .pairs()
            .iter()
            .fold(input.to_owned(), |text, p| text.replace(p.token, &p.value));
        assert_eq!(set.apply(input), expected);
    }

    #[test]
    fn content_without_tokens_is_unchanged() {
        let input = "plain text with ünïcödé and _under_scores_\n";
        assert_eq!(set("orders").apply(input), input);
    }

    #[test]
    fn normalizes_crlf_only() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n"), "a\nb\rc\n");
    }

    #[test]
    fn render_text_normalizes_then_substitutes() {
        let out = set("orders").render_text(b"name: __SERVICE_NAME__\r\nok\r\n");
        assert_eq!(out, "name: orders\nok\n");
    }

    #[test]
    fn render_text_replaces_invalid_utf8() {
        let out = set("orders").render_text(b"a\xffb");
        assert_eq!(out, "a\u{FFFD}b");
    }

    #[test]
    fn only_timestamp_differs_between_runs() {
        let name = ServiceName::parse("orders").unwrap();
        let earlier = PlaceholderSet::derive(&name, fixed_time());
        let later = PlaceholderSet::derive(&name, fixed_time() + chrono::Duration::hours(1));
        let input = "__SERVICE_NAME__ __SERVICE_NAME_PASCAL__";
        assert_eq!(earlier.apply(input), later.apply(input));
        assert_ne!(
            earlier.apply(GENERATED_DATE_ISO_TOKEN),
            later.apply(GENERATED_DATE_ISO_TOKEN)
        );
    }
}

use crate::types::HttpMethod;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::path::parse_path;
use super::{PatternError, PatternResult, compile_query};

// base path only; scheme and authority are cut off by `request_target`
const PREFIX: &str = "^(?:[^?#]*/)?";
const LENIENT_TAIL: &str = ".*";
const END: &str = "$";

/// What a route without declared query parameters accepts after its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QueryPolicy {
    #[default]
    Strict,
    Lenient,
}

#[derive(Clone)]
pub struct CompiledMatcher {
    regex: Arc<Regex>,
    method: HttpMethod,
    specificity: Specificity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Specificity {
    query_params: usize,
    literal_len: usize,
    placeholders_inv: usize,
}

impl CompiledMatcher {
    pub fn source(&self) -> &str {
        self.regex.as_str()
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    #[inline]
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(request_target(url))
    }

    // more query parameters, then longer static text, then fewer placeholders
    pub(crate) fn cmp_specificity(&self, other: &Self) -> Ordering {
        other.specificity.cmp(&self.specificity)
    }
}

impl PartialEq for CompiledMatcher {
    fn eq(&self, other: &Self) -> bool {
        self.method == other.method && self.regex.as_str() == other.regex.as_str()
    }
}

impl Eq for CompiledMatcher {}

impl Hash for CompiledMatcher {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.regex.as_str().hash(state);
        self.method.hash(state);
    }
}

impl fmt::Debug for CompiledMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledMatcher")
            .field("method", &self.method)
            .field("source", &self.regex.as_str())
            .finish()
    }
}

/// Returns `url` without its `scheme://authority` part, so the host never fills a placeholder.
pub fn request_target(url: &str) -> &str {
    let Some(sep) = url.find("://") else {
        return url;
    };
    let mut scheme = url[..sep].chars();
    let is_scheme = scheme.next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !is_scheme {
        return url;
    }

    let rest = &url[sep + 3..];
    match rest.find(['/', '?', '#']) {
        Some(end) => &rest[end..],
        None => "",
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(method = %method, template = %template, policy = ?policy))]
pub fn compile_route<S: AsRef<str>>(
    method: HttpMethod,
    template: &str,
    query_names: &[S],
    policy: QueryPolicy,
) -> PatternResult<CompiledMatcher> {
    let path = parse_path(template)?;
    let query = compile_query(query_names)?;

    let mut source = String::with_capacity(
        PREFIX.len() + path.fragment.as_str().len() + query.as_str().len() + 16,
    );
    source.push_str(PREFIX);
    source.push_str(path.fragment.as_str());
    if query.is_empty() {
        if policy == QueryPolicy::Lenient {
            source.push_str(LENIENT_TAIL);
        }
    } else {
        source.push_str(query.as_str());
    }
    source.push_str(END);

    let regex = Regex::new(&source).map_err(|err| PatternError::InvalidRegex {
        source_pattern: source.clone(),
        message: err.to_string(),
    })?;

    Ok(CompiledMatcher {
        regex: Arc::new(regex),
        method,
        specificity: Specificity {
            query_params: query_names.len(),
            literal_len: path.literal_len,
            placeholders_inv: usize::MAX - path.placeholders,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_QUERY: [&str; 0] = [];

    fn strict(template: &str) -> CompiledMatcher {
        compile_route(HttpMethod::Get, template, &NO_QUERY, QueryPolicy::Strict)
            .expect("route should compile")
    }

    #[test]
    fn compile_route_when_static_then_source_is_anchored() {
        let matcher = strict("v1/something");
        assert_eq!(matcher.source(), "^(?:[^?#]*/)?v1/something/?$");
    }

    #[test]
    fn compiled_matcher_when_rebuilt_then_compares_equal() {
        assert_eq!(strict("v1/something"), strict("/v1/something"));
        let post = compile_route(
            HttpMethod::Post,
            "v1/something",
            &NO_QUERY,
            QueryPolicy::Strict,
        )
        .expect("route should compile");
        assert_ne!(strict("v1/something"), post);
    }

    #[test]
    fn compiled_matcher_when_static_then_tolerates_prefix_and_trailing_slash() {
        let matcher = strict("v1/something");
        assert!(matcher.matches("https://www.something.com/v1/something"));
        assert!(matcher.matches("https://www.something.com/v1/something/"));
        assert!(matcher.matches("/v1/something"));
        assert!(matcher.matches("v1/something"));
        assert!(!matcher.matches("https://www.something.com/v1/something/hello"));
        assert!(!matcher.matches("https://www.something.com/v1/something/25"));
        assert!(!matcher.matches("https://www.something.com/xv1/something"));
        assert!(!matcher.matches("https://www.something.com/V1/something"));
    }

    #[test]
    fn compiled_matcher_when_strict_then_rejects_query_string() {
        let matcher = strict("v1/something");
        assert!(!matcher.matches("https://www.something.com/v1/something?query=something"));
    }

    #[test]
    fn compiled_matcher_when_lenient_then_accepts_any_trailing_text() {
        let matcher = compile_route(
            HttpMethod::Get,
            "v1/something",
            &NO_QUERY,
            QueryPolicy::Lenient,
        )
        .expect("route should compile");
        assert!(matcher.matches("https://www.something.com/v1/something"));
        assert!(matcher.matches("https://www.something.com/v1/something?query=something"));
        assert!(matcher.matches("https://www.something.com/v1/something/?a=1&b=2"));
        assert!(matcher.matches("https://www.something.com/v1/something/hello"));
        assert!(!matcher.matches("https://www.something.com/v2/something"));
    }

    #[test]
    fn compiled_matcher_when_prefix_contains_query_then_does_not_match() {
        let matcher = strict("v1/something");
        assert!(!matcher.matches("https://h.com/other?next=/v1/something"));
    }

    #[test]
    fn request_target_when_url_is_absolute_then_drops_scheme_and_authority() {
        assert_eq!(request_target("https://h.com/v1/a?b=1"), "/v1/a?b=1");
        assert_eq!(request_target("http://user@h.com:8080/x"), "/x");
        assert_eq!(request_target("https://h.com?b=1"), "?b=1");
        assert_eq!(request_target("https://h.com"), "");
        assert_eq!(request_target("/v1/a"), "/v1/a");
        assert_eq!(request_target("v1/a?next=http://x.com/y"), "v1/a?next=http://x.com/y");
    }

    #[test]
    fn compiled_matcher_when_template_starts_with_placeholder_then_host_is_not_a_segment() {
        let versioned = strict("{version}/widgets");
        assert!(!versioned.matches("https://h.com/widgets"));
        assert!(versioned.matches("https://h.com/v2/widgets"));
        assert!(!strict("{id}").matches("https://h.com"));
        assert!(!strict("{id}").matches("https://h.com/"));
        assert!(strict("{id}").matches("https://h.com/7"));
    }

    #[test]
    fn compiled_matcher_when_query_declared_then_requires_exact_signature() {
        let matcher = compile_route(
            HttpMethod::Get,
            "v1/widgets",
            &["widgetType", "createdBefore"],
            QueryPolicy::Lenient,
        )
        .expect("route should compile");
        assert!(matcher.matches("https://h.com/v1/widgets?widgetType=fixed&createdBefore=100"));
        assert!(matcher.matches("https://h.com/v1/widgets/?widgetType=&createdBefore="));
        assert!(!matcher.matches("https://h.com/v1/widgets?createdBefore=100&widgetType=fixed"));
        assert!(!matcher.matches("https://h.com/v1/widgets?widgetType=fixed"));
        assert!(!matcher.matches("https://h.com/v1/widgets"));
    }

    #[test]
    fn compiled_matcher_when_compared_by_specificity_then_more_literal_first() {
        let general = strict("widgets/{id}");
        let specific = strict("v1/widgets/{id}");
        assert_eq!(specific.cmp_specificity(&general), Ordering::Less);

        let with_query = compile_route(
            HttpMethod::Get,
            "widgets/{id}",
            &["a"],
            QueryPolicy::Strict,
        )
        .expect("route should compile");
        assert_eq!(with_query.cmp_specificity(&specific), Ordering::Less);
    }
}

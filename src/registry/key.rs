use crate::pattern::CompiledMatcher;
use crate::types::{HttpMethod, StatusCode};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RouteStatusKey {
    matcher: CompiledMatcher,
    method: HttpMethod,
    status: StatusCode,
}

impl RouteStatusKey {
    pub fn new(matcher: CompiledMatcher, method: HttpMethod, status: StatusCode) -> Self {
        Self {
            matcher,
            method,
            status,
        }
    }

    pub fn matcher(&self) -> &CompiledMatcher {
        &self.matcher
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn matches(&self, method: HttpMethod, status: StatusCode, url: &str) -> bool {
        self.method == method && self.status == status && self.matcher.matches(url)
    }
}

use crate::types::{HttpMethod, StatusCode};
use smallvec::SmallVec;

use super::ErrorShape;

pub type QueryNames = SmallVec<[String; 4]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorRule {
    pub status: StatusCode,
    pub shape: ErrorShape,
}

impl ErrorRule {
    pub fn new(status: impl Into<StatusCode>, shape: ErrorShape) -> Self {
        Self {
            status: status.into(),
            shape,
        }
    }
}

/// One logical operation: method, path template, ordered query signature and its error rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    method: HttpMethod,
    path: String,
    query: QueryNames,
    rules: Vec<ErrorRule>,
}

impl EndpointDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: SmallVec::new(),
            rules: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn head(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Head, path)
    }

    pub fn options(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Options, path)
    }

    pub fn query(mut self, name: impl Into<String>) -> Self {
        self.query.push(name.into());
        self
    }

    pub fn queries<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn error(mut self, status: impl Into<StatusCode>, shape: ErrorShape) -> Self {
        self.rules.push(ErrorRule::new(status, shape));
        self
    }

    /// Maps every listed status code to the same shape.
    pub fn errors<I, C>(mut self, statuses: I, shape: ErrorShape) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<StatusCode>,
    {
        self.rules
            .extend(statuses.into_iter().map(|status| ErrorRule::new(status, shape)));
        self
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_names(&self) -> &[String] {
        &self.query
    }

    pub fn rules(&self) -> &[ErrorRule] {
        &self.rules
    }
}

/// The declared endpoints of one client, plus rules that apply to all of them.
///
/// Rules declared on an endpoint take precedence over collection-wide rules for the same status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointCollection {
    endpoints: Vec<EndpointDescriptor>,
    defaults: Vec<ErrorRule>,
}

impl EndpointCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoint(mut self, endpoint: EndpointDescriptor) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    pub fn default_error(mut self, status: impl Into<StatusCode>, shape: ErrorShape) -> Self {
        self.defaults.push(ErrorRule::new(status, shape));
        self
    }

    pub fn default_errors<I, C>(mut self, statuses: I, shape: ErrorShape) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<StatusCode>,
    {
        self.defaults
            .extend(statuses.into_iter().map(|status| ErrorRule::new(status, shape)));
        self
    }

    pub fn endpoints(&self) -> &[EndpointDescriptor] {
        &self.endpoints
    }

    pub fn defaults(&self) -> &[ErrorRule] {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}

impl FromIterator<EndpointDescriptor> for EndpointCollection {
    fn from_iter<I: IntoIterator<Item = EndpointDescriptor>>(iter: I) -> Self {
        Self {
            endpoints: iter.into_iter().collect(),
            defaults: Vec::new(),
        }
    }
}

impl IntoIterator for EndpointCollection {
    type Item = EndpointDescriptor;
    type IntoIter = std::vec::IntoIter<EndpointDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.endpoints.into_iter()
    }
}

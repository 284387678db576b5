use crate::endpoint::ErrorShape;
use crate::types::{HttpMethod, StatusCode};
use hashbrown::HashMap as FastHashMap;
use smallvec::SmallVec;

use super::{RegistryStats, RouteStatusKey};

type Bucket = SmallVec<[RouteStatusKey; 4]>;

/// Read-only table from (matcher, method, status) to the declared error shape.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    entries: FastHashMap<RouteStatusKey, ErrorShape>,
    index: FastHashMap<(HttpMethod, StatusCode), Bucket>,
    stats: RegistryStats,
}

impl MappingRegistry {
    pub(crate) fn insert(&mut self, key: RouteStatusKey, shape: ErrorShape) -> Option<ErrorShape> {
        let previous = self.entries.insert(key.clone(), shape);
        if previous.is_none() {
            self.index
                .entry((key.method(), key.status()))
                .or_default()
                .push(key);
        }
        previous
    }

    pub(crate) fn finalize(&mut self) {
        for bucket in self.index.values_mut() {
            bucket.sort_by(|a, b| a.matcher().cmp_specificity(b.matcher()));
        }
    }

    pub(crate) fn stats_mut(&mut self) -> &mut RegistryStats {
        &mut self.stats
    }

    #[tracing::instrument(level = "trace", skip_all, fields(method = %method, status = status, url = %url))]
    pub fn lookup(
        &self,
        method: HttpMethod,
        status: StatusCode,
        url: &str,
    ) -> Option<(&RouteStatusKey, &ErrorShape)> {
        let bucket = self.index.get(&(method, status))?;
        bucket
            .iter()
            .find(|key| key.matcher().matches(url))
            .and_then(|key| self.entries.get_key_value(key))
    }

    pub fn get(&self, key: &RouteStatusKey) -> Option<&ErrorShape> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &RouteStatusKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RouteStatusKey, &ErrorShape)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }
}

impl PartialEq for MappingRegistry {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for MappingRegistry {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{QueryPolicy, compile_route};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Unknown {}

    fn key(template: &str, status: StatusCode) -> RouteStatusKey {
        let no_query: [&str; 0] = [];
        let matcher = compile_route(HttpMethod::Get, template, &no_query, QueryPolicy::Strict)
            .expect("route should compile");
        RouteStatusKey::new(matcher, HttpMethod::Get, status)
    }

    #[test]
    fn mapping_registry_when_key_reinserted_then_index_is_not_duplicated() {
        let mut registry = MappingRegistry::default();
        assert!(registry.insert(key("v1/a", 500), ErrorShape::untyped()).is_none());
        let previous = registry.insert(key("v1/a", 500), ErrorShape::of::<Unknown>());

        assert_eq!(previous, Some(ErrorShape::untyped()));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.index[&(HttpMethod::Get, 500)].len(), 1);
        assert_eq!(
            registry.get(&key("v1/a", 500)),
            Some(&ErrorShape::of::<Unknown>())
        );
    }

    #[test]
    fn mapping_registry_when_templates_overlap_then_more_specific_wins() {
        let mut registry = MappingRegistry::default();
        registry.insert(key("widgets/{id}", 404), ErrorShape::untyped());
        registry.insert(key("v1/widgets/{id}", 404), ErrorShape::of::<Unknown>());
        registry.finalize();

        let (found, shape) = registry
            .lookup(HttpMethod::Get, 404, "https://h.com/v1/widgets/7")
            .expect("one of the overlapping routes should match");
        assert_eq!(found, &key("v1/widgets/{id}", 404));
        assert!(shape.is::<Unknown>());

        let (found, _) = registry
            .lookup(HttpMethod::Get, 404, "https://h.com/v2/widgets/7")
            .expect("general route should match");
        assert_eq!(found, &key("widgets/{id}", 404));
    }

    #[test]
    fn mapping_registry_when_method_or_status_differs_then_lookup_misses() {
        let mut registry = MappingRegistry::default();
        registry.insert(key("v1/a", 500), ErrorShape::untyped());
        registry.finalize();

        assert!(registry.lookup(HttpMethod::Get, 500, "/v1/a").is_some());
        assert!(registry.lookup(HttpMethod::Post, 500, "/v1/a").is_none());
        assert!(registry.lookup(HttpMethod::Get, 501, "/v1/a").is_none());
    }
}

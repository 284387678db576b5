use crate::dispatch::{DuplicateRulePolicy, MapperOptions};
use crate::endpoint::{EndpointCollection, EndpointDescriptor, ErrorRule};
use crate::pattern::compile_route;
use crate::types::StatusCode;
use smallvec::SmallVec;

use super::{CompilationError, CompileResult, MappingRegistry, RouteStatusKey};

type RuleSet = SmallVec<[ErrorRule; 8]>;

/// Turns declared endpoints into a [`MappingRegistry`].
///
/// Compilation is all-or-nothing: the first malformed endpoint fails the whole collection.
#[derive(Debug, Clone, Default)]
pub struct MappingCompiler {
    options: MapperOptions,
}

impl MappingCompiler {
    pub fn new(options: MapperOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn compile(&self, collection: &EndpointCollection) -> CompileResult<MappingRegistry> {
        self.compile_endpoints(collection.endpoints(), collection.defaults())
    }

    /// Compiles endpoints from any iterator. No collection-wide rules apply.
    pub fn compile_iter<I>(&self, endpoints: I) -> CompileResult<MappingRegistry>
    where
        I: IntoIterator<Item = EndpointDescriptor>,
    {
        self.compile(&endpoints.into_iter().collect())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(endpoints = endpoints.len() as u64, defaults = defaults.len() as u64))]
    pub fn compile_endpoints(
        &self,
        endpoints: &[EndpointDescriptor],
        defaults: &[ErrorRule],
    ) -> CompileResult<MappingRegistry> {
        let defaults = self.merge_defaults(defaults)?;
        let mut registry = MappingRegistry::default();

        for (index, endpoint) in endpoints.iter().enumerate() {
            registry.stats_mut().record_endpoint();

            let rules = self.effective_rules(index, endpoint, &defaults)?;
            if rules.is_empty() {
                tracing::event!(
                    tracing::Level::TRACE,
                    index,
                    method = %endpoint.method(),
                    path = %endpoint.path(),
                    "endpoint has no error rules"
                );
                continue;
            }

            let matcher = compile_route(
                endpoint.method(),
                endpoint.path(),
                endpoint.query_names(),
                self.options.query_policy,
            )
            .map_err(|source| CompilationError::Endpoint {
                index,
                method: endpoint.method(),
                path: endpoint.path().to_string(),
                source,
            })?;

            for rule in &rules {
                let key = RouteStatusKey::new(matcher.clone(), endpoint.method(), rule.status);
                let previous = registry.insert(key, rule.shape);
                if let Some(previous) = previous
                    && previous != rule.shape
                    && self.options.duplicate_rules == DuplicateRulePolicy::Reject
                {
                    return Err(CompilationError::ConflictingEndpoint {
                        index,
                        method: endpoint.method(),
                        path: endpoint.path().to_string(),
                        status: rule.status,
                    });
                }
            }

            registry.stats_mut().record_mapped(rules.len());

            if self.options.debug {
                tracing::event!(
                    tracing::Level::DEBUG,
                    index,
                    method = %endpoint.method(),
                    pattern = %matcher.source(),
                    rules = rules.len() as u64,
                    "endpoint mapped"
                );
            }
        }

        registry.finalize();
        Ok(registry)
    }

    fn merge_defaults(&self, defaults: &[ErrorRule]) -> CompileResult<RuleSet> {
        let mut merged = RuleSet::new();
        for rule in defaults {
            match merged.iter_mut().find(|r| r.status == rule.status) {
                Some(_) if self.options.duplicate_rules == DuplicateRulePolicy::Reject => {
                    return Err(CompilationError::DuplicateDefaultStatus {
                        status: rule.status,
                    });
                }
                Some(existing) => existing.shape = rule.shape,
                None => merged.push(*rule),
            }
        }
        Ok(merged)
    }

    fn effective_rules(
        &self,
        index: usize,
        endpoint: &EndpointDescriptor,
        defaults: &RuleSet,
    ) -> CompileResult<RuleSet> {
        let mut rules = defaults.clone();
        let mut declared: SmallVec<[StatusCode; 8]> = SmallVec::new();

        for rule in endpoint.rules() {
            if declared.contains(&rule.status) {
                if self.options.duplicate_rules == DuplicateRulePolicy::Reject {
                    return Err(CompilationError::DuplicateStatus {
                        index,
                        method: endpoint.method(),
                        path: endpoint.path().to_string(),
                        status: rule.status,
                    });
                }
            } else {
                declared.push(rule.status);
            }

            match rules.iter_mut().find(|r| r.status == rule.status) {
                Some(existing) => existing.shape = rule.shape,
                None => rules.push(*rule),
            }
        }

        Ok(rules)
    }
}

pub fn compile(collection: &EndpointCollection) -> CompileResult<MappingRegistry> {
    MappingCompiler::default().compile(collection)
}

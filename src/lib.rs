//! Declarative mapping of non-success HTTP responses into typed failures.
//!
//! Endpoints are declared as method + path template + ordered query signature, each with
//! status → error shape rules. [`MappingCompiler`] turns them into a read-only
//! [`MappingRegistry`]; a [`Dispatcher`] sitting in the client's response path consults it and
//! converts error bodies into [`DispatchFailure`] values.

pub mod dispatch;
pub mod endpoint;
pub mod pattern;
pub mod registry;
pub mod types;

pub use dispatch::{
    BodyDecoder, DecodeError, DispatchError, DispatchFailure, DispatchResult, Dispatcher,
    DuplicateRulePolicy, ExchangeRequest, JsonDecoder, MapperOptions, MapperOptionsBuilder,
    OptionsError, Payload, ResponseData, find_failure, handle_error_data, unwrap_failure,
};
pub use endpoint::{EndpointCollection, EndpointDescriptor, ErrorRule, ErrorShape, ShapeValue};
pub use pattern::{CompiledMatcher, PatternError, QueryPolicy};
pub use registry::{
    CompilationError, MappingCompiler, MappingRegistry, RegistryStats, RouteStatusKey, compile,
};
pub use types::{HttpMethod, StatusCode};

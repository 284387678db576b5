mod error;
mod fragment;
mod path;
mod query;
mod route;

pub use error::{PatternError, PatternResult};
pub use fragment::PatternFragment;
pub use path::{PATH_VARIABLE_PATTERN, compile_path};
pub use query::{QUERY_VALUE_PATTERN, compile_query};
pub use route::{CompiledMatcher, QueryPolicy, compile_route, request_target};

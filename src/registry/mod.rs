mod compiler;
mod error;
mod key;
mod stats;
mod store;

pub use compiler::{MappingCompiler, compile};
pub use error::{CompilationError, CompileResult};
pub use key::RouteStatusKey;
pub use stats::RegistryStats;
pub use store::MappingRegistry;

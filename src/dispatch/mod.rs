mod decoder;
mod failure;
mod handler;
mod options;
mod service;

pub use decoder::{BodyDecoder, DecodeError, JsonDecoder};
pub use failure::{DispatchError, DispatchFailure, DispatchResult, Payload};
pub use handler::{ResponseData, find_failure, handle_error_data, unwrap_failure};
pub use options::{DuplicateRulePolicy, MapperOptions, MapperOptionsBuilder, OptionsError};
pub use service::{Dispatcher, ExchangeRequest};

use crate::endpoint::ShapeValue;
use crate::types::StatusCode;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use super::DecodeError;

#[derive(Clone)]
pub enum Payload {
    Structured {
        shape: &'static str,
        value: Arc<dyn ShapeValue>,
    },
    Raw(String),
}

impl Payload {
    pub fn is_structured(&self) -> bool {
        matches!(self, Payload::Structured { .. })
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Payload::Structured { shape, .. } => *shape,
            Payload::Raw(_) => "String",
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Payload::Raw(text) => Some(text.as_str()),
            Payload::Structured { .. } => None,
        }
    }

    /// Returns the payload as `T`. Raw bodies are exposed as `String`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = match self {
            Payload::Structured { value, .. } => {
                let value: &dyn ShapeValue = &**value;
                value.as_any()
            }
            Payload::Raw(text) => text as &dyn Any,
        };
        any.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Structured { shape, value } => f
                .debug_struct("Structured")
                .field("shape", shape)
                .field("value", value)
                .finish(),
            Payload::Raw(text) => f.debug_tuple("Raw").field(text).finish(),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("request to '{url}' failed with status {status} ({})", .payload.shape_name())]
pub struct DispatchFailure {
    pub url: String,
    pub status: StatusCode,
    pub payload: Payload,
}

impl DispatchFailure {
    pub fn new(url: impl Into<String>, status: StatusCode, payload: Payload) -> Self {
        Self {
            url: url.into(),
            status,
            payload,
        }
    }

    pub fn raw(url: impl Into<String>, status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(url, status, Payload::Raw(body.into()))
    }

    pub fn structured<T: ShapeValue>(url: impl Into<String>, status: StatusCode, value: T) -> Self {
        let value: Arc<dyn ShapeValue> = Arc::new(value);
        Self::new(
            url,
            status,
            Payload::Structured {
                shape: std::any::type_name::<T>(),
                value,
            },
        )
    }

    pub fn data<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Failure(#[from] DispatchFailure),
    #[error("response from '{url}' with status {status} could not be converted to '{shape}'")]
    MappingConversion {
        url: String,
        status: StatusCode,
        shape: &'static str,
        #[source]
        source: DecodeError,
    },
}

impl DispatchError {
    pub fn failure(&self) -> Option<&DispatchFailure> {
        match self {
            DispatchError::Failure(failure) => Some(failure),
            DispatchError::MappingConversion { .. } => None,
        }
    }

    pub fn into_failure(self) -> Result<DispatchFailure, Self> {
        match self {
            DispatchError::Failure(failure) => Ok(failure),
            other => Err(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            DispatchError::Failure(failure) => failure.status,
            DispatchError::MappingConversion { status, .. } => *status,
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DispatchError::Failure(failure) => &failure.url,
            DispatchError::MappingConversion { url, .. } => url,
        }
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;

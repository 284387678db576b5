use crate::endpoint::{EndpointCollection, ErrorShape};
use crate::registry::{CompileResult, MappingCompiler, MappingRegistry};
use crate::types::{HttpMethod, StatusCode};
use bytes::Bytes;
use std::sync::Arc;

use super::{
    BodyDecoder, DecodeError, DispatchError, DispatchFailure, DispatchResult, JsonDecoder,
    MapperOptions, Payload,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeRequest {
    pub method: http::Method,
    pub url: String,
}

impl ExchangeRequest {
    pub fn new(method: impl Into<http::Method>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
        }
    }
}

impl<B> From<&http::Request<B>> for ExchangeRequest {
    fn from(request: &http::Request<B>) -> Self {
        Self {
            method: request.method().clone(),
            url: request.uri().to_string(),
        }
    }
}

/// Turns non-success responses into typed failures using a compiled [`MappingRegistry`].
#[derive(Debug, Clone)]
pub struct Dispatcher<D = JsonDecoder> {
    registry: Arc<MappingRegistry>,
    options: MapperOptions,
    decoder: D,
}

impl Dispatcher<JsonDecoder> {
    pub fn new(collection: &EndpointCollection) -> CompileResult<Self> {
        Self::with_options(collection, MapperOptions::default())
    }

    pub fn with_options(
        collection: &EndpointCollection,
        options: MapperOptions,
    ) -> CompileResult<Self> {
        let registry = MappingCompiler::new(options.clone()).compile(collection)?;
        Ok(Self::from_registry(Arc::new(registry), options, JsonDecoder))
    }
}

impl<D: BodyDecoder> Dispatcher<D> {
    pub fn from_registry(registry: Arc<MappingRegistry>, options: MapperOptions, decoder: D) -> Self {
        Self {
            registry,
            options,
            decoder,
        }
    }

    pub fn with_decoder<E: BodyDecoder>(self, decoder: E) -> Dispatcher<E> {
        Dispatcher {
            registry: self.registry,
            options: self.options,
            decoder,
        }
    }

    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn intercept<B>(
        &self,
        request: &http::Request<B>,
        response: http::Response<Bytes>,
    ) -> DispatchResult<http::Response<Bytes>> {
        self.dispatch(&ExchangeRequest::from(request), response)
    }

    /// Returns pass-through responses untouched; every other status becomes a [`DispatchError`].
    #[tracing::instrument(level = "trace", skip_all, fields(method = %request.method, url = %request.url, status = response.status().as_u16()))]
    pub fn dispatch(
        &self,
        request: &ExchangeRequest,
        response: http::Response<Bytes>,
    ) -> DispatchResult<http::Response<Bytes>> {
        let status = response.status().as_u16();
        if self.options.is_pass_through(status) {
            return Ok(response);
        }

        let body = response.into_body();
        Err(self.resolve(request, status, &body))
    }

    fn resolve(&self, request: &ExchangeRequest, status: StatusCode, body: &Bytes) -> DispatchError {
        let shape = HttpMethod::try_from(&request.method)
            .ok()
            .and_then(|method| self.registry.lookup(method, status, &request.url))
            .map(|(_, shape)| *shape);

        match shape {
            Some(shape) if !shape.is_untyped() => self.convert(request, status, body, shape),
            _ => {
                if self.options.debug {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        method = %request.method,
                        url = %request.url,
                        status,
                        mapped = shape.is_some(),
                        "raw error payload"
                    );
                }
                DispatchFailure::raw(
                    request.url.as_str(),
                    status,
                    String::from_utf8_lossy(body).into_owned(),
                )
                .into()
            }
        }
    }

    fn convert(
        &self,
        request: &ExchangeRequest,
        status: StatusCode,
        body: &Bytes,
        shape: ErrorShape,
    ) -> DispatchError {
        let converted = self.decoder.parse(body).and_then(|value| {
            match shape.convert(value) {
                Some(result) => result.map_err(|source| DecodeError::Shape {
                    shape: shape.name(),
                    source,
                }),
                None => Err(DecodeError::Custom(format!(
                    "shape '{}' has no conversion",
                    shape.name()
                ))),
            }
        });

        match converted {
            Ok(value) => {
                if self.options.debug {
                    tracing::event!(
                        tracing::Level::DEBUG,
                        url = %request.url,
                        status,
                        shape = shape.name(),
                        "structured error payload"
                    );
                }
                DispatchFailure::new(
                    request.url.as_str(),
                    status,
                    Payload::Structured {
                        shape: shape.name(),
                        value,
                    },
                )
                .into()
            }
            Err(source) => {
                tracing::event!(
                    tracing::Level::WARN,
                    url = %request.url,
                    status,
                    shape = shape.name(),
                    error = %source,
                    "mapping conversion failed"
                );
                DispatchError::MappingConversion {
                    url: request.url.clone(),
                    status,
                    shape: shape.name(),
                    source,
                }
            }
        }
    }
}

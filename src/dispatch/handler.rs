use crate::types::StatusCode;
use std::any::Any;
use std::error::Error;

use super::{DispatchError, DispatchFailure, Payload};

#[derive(Debug, PartialEq)]
pub struct ResponseData<'a, D: ?Sized> {
    pub url: &'a str,
    pub status: StatusCode,
    pub data: &'a D,
}

impl<D: ?Sized> Clone for ResponseData<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: ?Sized> Copy for ResponseData<'_, D> {}

pub fn find_failure<'a>(err: &'a (dyn Error + 'static)) -> Option<&'a DispatchFailure> {
    std::iter::successors(Some(err), |e| (*e).source()).find_map(|e| {
        e.downcast_ref::<DispatchFailure>().or_else(|| {
            e.downcast_ref::<DispatchError>()
                .and_then(DispatchError::failure)
        })
    })
}

/// Invokes `handler` only when `err` is a dispatch failure whose payload is a `T`.
///
/// Raw payloads are `String`. Returns whether the handler ran.
pub fn handle_error_data<T, F>(err: &(dyn Error + 'static), handler: F) -> bool
where
    T: Any,
    F: FnOnce(ResponseData<'_, T>),
{
    let Some(failure) = find_failure(err) else {
        return false;
    };
    let Some(data) = failure.payload.downcast_ref::<T>() else {
        return false;
    };
    handler(ResponseData {
        url: &failure.url,
        status: failure.status,
        data,
    });
    true
}

pub fn unwrap_failure<F>(err: &(dyn Error + 'static), handler: F) -> bool
where
    F: FnOnce(ResponseData<'_, Payload>),
{
    match find_failure(err) {
        Some(failure) => {
            handler(ResponseData {
                url: &failure.url,
                status: failure.status,
                data: &failure.payload,
            });
            true
        }
        None => false,
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response body does not fit shape '{shape}': {source}")]
    Shape {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("response body could not be decoded: {0}")]
    Custom(String),
}

/// Parses an error body into a value tree that error shapes are converted from.
pub trait BodyDecoder: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<serde_json::Value, DecodeError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl BodyDecoder for JsonDecoder {
    fn parse(&self, body: &[u8]) -> Result<serde_json::Value, DecodeError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl<F> BodyDecoder for F
where
    F: Fn(&[u8]) -> Result<serde_json::Value, DecodeError> + Send + Sync,
{
    fn parse(&self, body: &[u8]) -> Result<serde_json::Value, DecodeError> {
        self(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_decoder_when_body_is_json_then_parses_value() {
        let value = JsonDecoder
            .parse(br#"{"message":"nope"}"#)
            .expect("valid json should parse");
        assert_eq!(value["message"], "nope");
    }

    #[test]
    fn json_decoder_when_body_is_malformed_then_returns_json_error() {
        let err = JsonDecoder.parse(b"<html>").expect_err("html is not json");
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn closure_decoder_when_used_then_delegates_to_function() {
        let decoder = |body: &[u8]| -> Result<serde_json::Value, DecodeError> {
            let text = std::str::from_utf8(body).map_err(|e| DecodeError::Custom(e.to_string()))?;
            Ok(serde_json::json!({ "message": text }))
        };
        let value = decoder.parse(b"plain").expect("closure should decode");
        assert_eq!(value["message"], "plain");
    }
}

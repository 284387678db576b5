use crate::pattern::QueryPolicy;
use crate::types::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const STATUS_MIN: StatusCode = 100;
const STATUS_MAX: StatusCode = 599;

/// What to do when the same status code is declared twice for one signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DuplicateRulePolicy {
    #[default]
    Reject,
    LastWins,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MapperOptions {
    pub query_policy: QueryPolicy,
    pub duplicate_rules: DuplicateRulePolicy,
    pub extra_pass_through: Vec<StatusCode>,
    pub debug: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            query_policy: QueryPolicy::Strict,
            duplicate_rules: DuplicateRulePolicy::Reject,
            extra_pass_through: Vec::new(),
            debug: false,
        }
    }
}

impl MapperOptions {
    pub fn builder() -> MapperOptionsBuilder {
        MapperOptionsBuilder::default()
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(&status) = self
            .extra_pass_through
            .iter()
            .find(|status| !(STATUS_MIN..=STATUS_MAX).contains(*status))
        {
            return Err(OptionsError::StatusOutOfRange {
                status,
                min: STATUS_MIN,
                max: STATUS_MAX,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn is_pass_through(&self, status: StatusCode) -> bool {
        (100..300).contains(&status) || self.extra_pass_through.contains(&status)
    }
}

#[derive(Debug, Default, Clone)]
pub struct MapperOptionsBuilder {
    options: MapperOptions,
}

impl MapperOptionsBuilder {
    pub fn query_policy(mut self, value: QueryPolicy) -> Self {
        self.options.query_policy = value;
        self
    }

    pub fn duplicate_rules(mut self, value: DuplicateRulePolicy) -> Self {
        self.options.duplicate_rules = value;
        self
    }

    pub fn pass_through(mut self, status: impl Into<StatusCode>) -> Self {
        self.options.extra_pass_through.push(status.into());
        self
    }

    pub fn debug(mut self, value: bool) -> Self {
        self.options.debug = value;
        self
    }

    pub fn build(self) -> Result<MapperOptions, OptionsError> {
        let options = self.options;
        options.validate()?;
        Ok(options)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("pass-through status {status} is outside the supported range {min}..={max}")]
    StatusOutOfRange {
        status: StatusCode,
        min: StatusCode,
        max: StatusCode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapper_options_when_default_then_strict_and_rejecting() {
        let options = MapperOptions::default();
        assert_eq!(options.query_policy, QueryPolicy::Strict);
        assert_eq!(options.duplicate_rules, DuplicateRulePolicy::Reject);
        assert!(options.extra_pass_through.is_empty());
        assert!(!options.debug);
    }

    #[test]
    fn mapper_options_when_pass_through_checked_then_covers_informational_and_success() {
        let options = MapperOptions::default();
        for status in [100u16, 101, 200, 201, 202, 203, 204, 205, 206, 299] {
            assert!(options.is_pass_through(status), "{status} should pass through");
        }
        for status in [300u16, 304, 400, 404, 500, 503] {
            assert!(!options.is_pass_through(status), "{status} should be dispatched");
        }
    }

    #[test]
    fn mapper_options_when_all_fields_customized_then_values_are_assigned() {
        let options = MapperOptions::builder()
            .query_policy(QueryPolicy::Lenient)
            .duplicate_rules(DuplicateRulePolicy::LastWins)
            .pass_through(http::StatusCode::NOT_MODIFIED)
            .debug(true)
            .build()
            .expect("options should build");

        assert_eq!(options.query_policy, QueryPolicy::Lenient);
        assert_eq!(options.duplicate_rules, DuplicateRulePolicy::LastWins);
        assert_eq!(options.extra_pass_through, vec![304]);
        assert!(options.is_pass_through(304));
        assert!(options.debug);
    }

    #[test]
    fn mapper_options_when_pass_through_out_of_range_then_returns_error() {
        let err = MapperOptions::builder()
            .pass_through(42u16)
            .build()
            .expect_err("status 42 is not an http status");
        assert_eq!(
            err,
            OptionsError::StatusOutOfRange {
                status: 42,
                min: 100,
                max: 599,
            }
        );
    }

    #[test]
    fn mapper_options_when_serialized_then_round_trips_through_json() {
        let options = MapperOptions::builder()
            .query_policy(QueryPolicy::Lenient)
            .pass_through(304u16)
            .build()
            .expect("options should build");
        let json = serde_json::to_string(&options).expect("options should serialize");
        let back: MapperOptions = serde_json::from_str(&json).expect("options should deserialize");
        assert_eq!(back, options);
    }
}

//! Rule evaluation.

use std::fmt::Write as _;

use crate::proto::validate::{FieldPath, Violation, TYPE_STRING};
use crate::rules::Validate;

/// Validator options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Stop at the first violation instead of collecting all of them.
    pub fail_fast: bool,
}

/// Evaluates the rules a message declares through [`Validate`].
///
/// Holds no per-call state, so one instance can be shared across request
/// handlers.
///
/// # Examples
///
/// ```
/// use user_validate_core::proto::user::CreateUserRequest;
/// use user_validate_core::Validator;
///
/// let req = CreateUserRequest {
///     name: "John Doe".into(),
///     email: "john@example.com".into(),
///     password: "password123".into(),
///     password_confirmation: "password123".into(),
/// };
/// assert!(Validator::new().validate(&req).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Validator that collects every violation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator with explicit options.
    #[must_use]
    pub const fn with_config(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Active options.
    #[must_use]
    pub const fn config(&self) -> ValidatorConfig {
        self.config
    }

    /// Validate `msg` against its declared rules.
    ///
    /// Field rules run in declaration order, then message-level rules.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] listing every violation (or only the first
    /// one when `fail_fast` is set).
    pub fn validate<M: Validate>(&self, msg: &M) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        'fields: for field in M::FIELDS {
            let value = (field.get)(msg);
            for rule in field.rules {
                let Some(failure) = rule.check(value) else {
                    continue;
                };
                violations.push(Violation {
                    field: Some(FieldPath::from_parts(&[(
                        field.number,
                        field.name,
                        TYPE_STRING,
                    )])),
                    rule: Some(failure.rule_path),
                    rule_id: Some(failure.rule_id.to_string()),
                    message: Some(failure.message),
                    for_key: None,
                });
                if self.config.fail_fast {
                    break 'fields;
                }
            }
        }

        if violations.is_empty() || !self.config.fail_fast {
            for (index, rule) in M::MESSAGE_RULES.iter().enumerate() {
                if (rule.check)(msg) {
                    continue;
                }
                violations.push(Violation {
                    field: None,
                    rule: Some(rule.rule_path(index)),
                    rule_id: Some(rule.id.to_string()),
                    message: Some(rule.message.to_string()),
                    for_key: None,
                });
                if self.config.fail_fast {
                    break;
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// A message failed one or more rules.
///
/// Displays one line per violation:
///
/// ```text
/// validation error:
///  - name: value length must be at least 1 characters [string.min_len]
///  - passwords must match [password_mismatch]
/// ```
#[derive(Debug, Clone, PartialEq, Default, thiserror::Error)]
#[error("validation error:{}", violation_lines(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap violations in evaluation order.
    #[must_use]
    pub const fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Violations in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the error, returning its violations.
    #[must_use]
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

fn violation_lines(violations: &[Violation]) -> String {
    let mut out = String::new();
    for v in violations {
        let field = v.field.as_ref().map(FieldPath::dotted).unwrap_or_default();
        let message = v.message.as_deref().unwrap_or_default();
        let rule_id = v.rule_id.as_deref().unwrap_or_default();
        // String as fmt::Write never fails
        let _ = if field.is_empty() {
            write!(out, "\n - {message} [{rule_id}]")
        } else {
            write!(out, "\n - {field}: {message} [{rule_id}]")
        };
    }
    out
}

//! Declarative validation rules.
//!
//! Messages opt in by implementing [`Validate`], which declares per-field
//! [`StringRule`]s and message-level [`MessageRule`]s as constant tables.
//! The tables mirror `buf.validate` annotations:
//!
//! ```text
//! message CreateUserRequest {
//!   option (buf.validate.message).cel = {
//!     id: "password_mismatch"
//!     message: "passwords must match"
//!     expression: "this.password == this.password_confirmation"
//!   };
//!   string name = 1     [(buf.validate.field).string = {min_len: 1, max_len: 255}];
//!   string email = 2    [(buf.validate.field).string = {email: true, max_len: 255}];
//!   string password = 3 [(buf.validate.field).string = {min_len: 8, max_len: 72}];
//!   string password_confirmation = 4;
//! }
//! ```
//!
//! Evaluation lives in [`Validator`](crate::Validator).

use validator::ValidateEmail;

use crate::proto::user::CreateUserRequest;
use crate::proto::validate::{FieldPath, TYPE_BOOL, TYPE_MESSAGE, TYPE_UINT64};

/// `buf.validate.FieldRules.string` field number.
const FIELD_RULES_STRING: i32 = 14;
/// `buf.validate.MessageRules.cel` field number.
const MESSAGE_RULES_CEL: i32 = 3;

/// A message type with declared validation rules.
pub trait Validate: Sized + 'static {
    /// Per-field rules, in field declaration order.
    const FIELDS: &'static [FieldRules<Self>];

    /// Message-level rules, evaluated after all fields.
    const MESSAGE_RULES: &'static [MessageRule<Self>] = &[];
}

/// Rules attached to one string field.
pub struct FieldRules<M: 'static> {
    /// Proto field name.
    pub name: &'static str,
    /// Proto field number.
    pub number: i32,
    /// Accessor for the field value.
    pub get: fn(&M) -> &str,
    /// Rules in declaration order.
    pub rules: &'static [StringRule],
}

/// A message-level rule over the whole message.
pub struct MessageRule<M: 'static> {
    /// Rule id reported on failure (e.g. `password_mismatch`).
    pub id: &'static str,
    /// Failure message.
    pub message: &'static str,
    /// Returns `true` when the message satisfies the rule.
    pub check: fn(&M) -> bool,
}

/// `buf.validate.StringRules` subset used by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringRule {
    /// Minimum length in characters.
    MinLen(u64),
    /// Maximum length in characters.
    MaxLen(u64),
    /// Must be an email address.
    Email,
}

/// A failed string rule: rule id, rule path, and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// Rule id (e.g. `string.min_len`).
    pub rule_id: &'static str,
    /// Path to the rule inside `buf.validate.FieldRules`.
    pub rule_path: FieldPath,
    /// Human-readable message.
    pub message: String,
}

impl StringRule {
    /// Rule name inside `StringRules`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinLen(_) => "min_len",
            Self::MaxLen(_) => "max_len",
            Self::Email => "email",
        }
    }

    /// `StringRules` field number and type of this rule.
    const fn descriptor(self) -> (i32, i32) {
        match self {
            Self::MinLen(_) => (2, TYPE_UINT64),
            Self::MaxLen(_) => (3, TYPE_UINT64),
            Self::Email => (12, TYPE_BOOL),
        }
    }

    /// Evaluate the rule against `value`.
    ///
    /// Returns `None` when the value passes.
    #[must_use]
    pub fn check(self, value: &str) -> Option<RuleFailure> {
        let (rule_id, message) = match self {
            Self::MinLen(min) => {
                if char_len(value) >= min {
                    return None;
                }
                (
                    "string.min_len",
                    format!("value length must be at least {min} characters"),
                )
            }
            Self::MaxLen(max) => {
                if char_len(value) <= max {
                    return None;
                }
                (
                    "string.max_len",
                    format!("value length must be at most {max} characters"),
                )
            }
            Self::Email if value.is_empty() => (
                "string.email_empty",
                "value is empty, which is not a valid email address".to_string(),
            ),
            Self::Email => {
                if value.validate_email() {
                    return None;
                }
                (
                    "string.email",
                    "value must be a valid email address".to_string(),
                )
            }
        };

        let (number, ty) = self.descriptor();
        Some(RuleFailure {
            rule_id,
            rule_path: FieldPath::from_parts(&[
                (FIELD_RULES_STRING, "string", TYPE_MESSAGE),
                (number, self.name(), ty),
            ]),
            message,
        })
    }
}

impl<M: 'static> MessageRule<M> {
    /// Path to this rule inside `buf.validate.MessageRules` (`cel[index]`).
    #[must_use]
    pub fn rule_path(&self, index: usize) -> FieldPath {
        let mut path = FieldPath::from_parts(&[(MESSAGE_RULES_CEL, "cel", TYPE_MESSAGE)]);
        if let Some(element) = path.elements.first_mut() {
            element.index = u64::try_from(index).ok();
        }
        path
    }
}

fn char_len(value: &str) -> u64 {
    // usize -> u64 is lossless on every supported target
    value.chars().count() as u64
}

impl Validate for CreateUserRequest {
    const FIELDS: &'static [FieldRules<Self>] = &[
        FieldRules {
            name: "name",
            number: 1,
            get: create_user::name,
            rules: &[StringRule::MinLen(1), StringRule::MaxLen(255)],
        },
        FieldRules {
            name: "email",
            number: 2,
            get: create_user::email,
            rules: &[StringRule::Email, StringRule::MaxLen(255)],
        },
        FieldRules {
            name: "password",
            number: 3,
            get: create_user::password,
            rules: &[StringRule::MinLen(8), StringRule::MaxLen(72)],
        },
    ];

    const MESSAGE_RULES: &'static [MessageRule<Self>] = &[MessageRule {
        id: "password_mismatch",
        message: "passwords must match",
        check: create_user::passwords_match,
    }];
}

mod create_user {
    use crate::proto::user::CreateUserRequest;

    pub(super) fn name(m: &CreateUserRequest) -> &str {
        &m.name
    }

    pub(super) fn email(m: &CreateUserRequest) -> &str {
        &m.email
    }

    pub(super) fn password(m: &CreateUserRequest) -> &str {
        &m.password
    }

    pub(super) fn passwords_match(m: &CreateUserRequest) -> bool {
        m.password == m.password_confirmation
    }
}

//! `user.v1.UserService` contract and its validating implementation.

use std::time::SystemTime;

use tonic::{Request, Response, Status};
use tracing::instrument;
use user_validate_core::proto::user::{CreateUserRequest, CreateUserResponse, User};
use user_validate_core::Validator;

use crate::adapter::validation_status;

/// Identifier assigned to every created user; there is no storage behind
/// the service.
pub const PLACEHOLDER_USER_ID: &str = "user-123";

/// RPC contract of `user.v1.UserService`, in the shape tonic generates for
/// server traits.
#[tonic::async_trait]
pub trait UserService: Send + Sync + 'static {
    /// Create a user.
    ///
    /// # Errors
    ///
    /// Returns `INVALID_ARGUMENT` with a `google.rpc.BadRequest` detail when
    /// the request breaks any validation rule.
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status>;
}

/// [`UserService`] implementation that validates every request before
/// "creating" the user.
#[derive(Debug, Clone, Default)]
pub struct UserServer {
    validator: Validator,
}

impl UserServer {
    /// Server using the given validator.
    #[must_use]
    pub const fn new(validator: Validator) -> Self {
        Self { validator }
    }

    /// The validator applied to incoming requests.
    #[must_use]
    pub const fn validator(&self) -> &Validator {
        &self.validator
    }
}

#[tonic::async_trait]
impl UserService for UserServer {
    #[instrument(skip_all, fields(request_id))]
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<CreateUserResponse>, Status> {
        if let Some(id) = request
            .metadata()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
        {
            tracing::Span::current().record("request_id", id);
        }

        let req = request.into_inner();
        self.validator
            .validate(&req)
            .map_err(|err| validation_status(&err))?;

        let now = prost_types::Timestamp::from(SystemTime::now());
        let user = User {
            id: PLACEHOLDER_USER_ID.to_string(),
            name: req.name,
            email: req.email,
            created_at: Some(now.clone()),
            updated_at: Some(now),
        };
        tracing::info!(user_id = %user.id, "user created");

        Ok(Response::new(CreateUserResponse { user: Some(user) }))
    }
}

#[cfg(test)]
mod tests {
    use crate::adapter::bad_request_detail;

    use super::*;

    fn request(name: &str, email: &str, password: &str, confirmation: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirmation: confirmation.to_string(),
        }
    }

    #[tokio::test]
    async fn creates_user_for_valid_request() {
        let server = UserServer::default();
        let response = server
            .create_user(Request::new(request(
                "John Doe",
                "john@example.com",
                "password123",
                "password123",
            )))
            .await
            .unwrap()
            .into_inner();

        let user = response.user.unwrap();
        assert_eq!(user.id, PLACEHOLDER_USER_ID);
        assert_eq!(user.name, "John Doe");
        assert_eq!(user.email, "john@example.com");
        assert!(user.created_at.is_some());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn rejects_invalid_request_with_field_violations() {
        let server = UserServer::default();
        let status = server
            .create_user(Request::new(request("", "not-an-email", "short", "short")))
            .await
            .unwrap_err();

        assert_eq!(status.code(), tonic::Code::InvalidArgument);
        let bad = bad_request_detail(&status).unwrap();
        let pairs: Vec<_> = bad
            .field_violations
            .iter()
            .map(|fv| (fv.field.as_str(), fv.reason.as_str()))
            .collect();
        assert_eq!(
            pairs,
            [
                ("name", "STRING_MIN_LEN"),
                ("email", "STRING_EMAIL"),
                ("password", "STRING_MIN_LEN"),
            ]
        );
    }

    #[tokio::test]
    async fn password_mismatch_has_empty_field() {
        let server = UserServer::default();
        let status = server
            .create_user(Request::new(request(
                "John Doe",
                "john@example.com",
                "password123",
                "different",
            )))
            .await
            .unwrap_err();

        let bad = bad_request_detail(&status).unwrap();
        assert_eq!(bad.field_violations.len(), 1);
        assert_eq!(bad.field_violations[0].field, "");
        assert_eq!(bad.field_violations[0].description, "passwords must match");
        assert_eq!(bad.field_violations[0].reason, "PASSWORD_MISMATCH");
    }
}

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, PartialEq, Clone)]
pub struct CtxError {
    pub error: AppError,
    pub req_id: Uuid,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    Generic { description: String },
    ValidationErrors { value: ValidationErrors },
    PasswordsDoNotMatch,
    InvalidCredentials,
    AccountBanned,
    UsernameTaken,
    EmailTaken,
    Forbidden,
    BalanceTooLow,
    EntityFailIdNotFound { ident: String },
    WithdrawalAlreadyProcessed { id: String },
    AuthFailNoJwtCookie,
    AuthFailJwtInvalid { source: String },
    Serde { source: String },
    SurrealDb { source: String },
}

/// Error carrying the request id reported back to the client.
pub type CtxResult<T> = core::result::Result<T, CtxError>;
/// Error produced below the request boundary, before a req_id is attached.
pub type AppResult<T> = core::result::Result<T, AppError>;

impl std::error::Error for AppError {}

const INTERNAL: &str = "Internal error";

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic { description } => write!(f, "{description}"),
            Self::ValidationErrors { value } => write!(f, "{value}"),
            Self::PasswordsDoNotMatch => write!(f, "Passwords do not match"),
            Self::InvalidCredentials => write!(f, "Invalid username or password"),
            Self::AccountBanned => write!(
                f,
                "Your account has been banned. Please contact support."
            ),
            Self::UsernameTaken => write!(f, "Username already taken"),
            Self::EmailTaken => write!(f, "User already registered"),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::BalanceTooLow => write!(f, "Balance is too low"),
            Self::EntityFailIdNotFound { ident } => write!(f, "Record id= {ident} not found"),
            Self::WithdrawalAlreadyProcessed { id } => {
                write!(f, "Withdrawal request {id} was already processed")
            }
            Self::AuthFailNoJwtCookie => write!(f, "You are not logged in"),
            Self::AuthFailJwtInvalid { .. } => write!(f, "The provided JWT token is not valid"),
            Self::Serde { source } => write!(f, "Serde error - {source}"),
            Self::SurrealDb { .. } => write!(f, "{INTERNAL}"),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Generic { .. }
            | AppError::PasswordsDoNotMatch
            | AppError::BalanceTooLow
            | AppError::Serde { .. } => StatusCode::BAD_REQUEST,
            AppError::ValidationErrors { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidCredentials
            | AppError::AuthFailNoJwtCookie
            | AppError::AuthFailJwtInvalid { .. } => StatusCode::UNAUTHORIZED,
            AppError::AccountBanned | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::EntityFailIdNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::UsernameTaken
            | AppError::EmailTaken
            | AppError::WithdrawalAlreadyProcessed { .. } => StatusCode::CONFLICT,
            AppError::SurrealDb { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for CtxError {
    fn from(value: AppError) -> Self {
        CtxError {
            req_id: Uuid::new_v4(),
            error: value,
        }
    }
}

impl From<CtxError> for AppError {
    fn from(value: CtxError) -> Self {
        value.error
    }
}

impl From<surrealdb::Error> for CtxError {
    fn from(value: surrealdb::Error) -> Self {
        AppError::from(value).into()
    }
}

impl From<ValidationErrors> for CtxError {
    fn from(value: ValidationErrors) -> Self {
        AppError::from(value).into()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponseBody {
    pub error: String,
    pub req_id: String,
}

impl ErrorResponseBody {
    pub fn new(error: String, req_id: Option<String>) -> Self {
        ErrorResponseBody {
            error,
            req_id: req_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl IntoResponse for CtxError {
    fn into_response(self) -> Response {
        let status_code = self.error.status_code();
        if status_code.is_server_error() {
            error!(req_id = %self.req_id, error = ?self.error, "request failed");
        } else {
            warn!(req_id = %self.req_id, error = %self.error, "request rejected");
        }
        let body = ErrorResponseBody::new(self.error.to_string(), Some(self.req_id.to_string()));
        let mut response = (status_code, Json(body)).into_response();
        // the real error is kept for layers that inspect the response
        response.extensions_mut().insert(self.error);
        response
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde {
            source: value.to_string(),
        }
    }
}

impl From<surrealdb::Error> for AppError {
    fn from(value: surrealdb::Error) -> Self {
        Self::SurrealDb {
            source: value.to_string(),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::ValidationErrors { value }
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::AuthFailJwtInvalid {
            source: value.to_string(),
        }
    }
}

//! Identity handling. Authentication itself is delegated to an external
//! provider; by the time a request arrives here, a trusted proxy has
//! attached the caller's id, role and display name as headers. This module
//! only enforces authorization.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use liftlog_domain::{Name, Role, User, UserID, UserRepository};
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, error::ApiError};

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_NAME_HEADER: &str = "x-user-name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserID,
    pub role: Role,
}

#[must_use]
pub fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
    let user_id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())?;
    let role = headers
        .get(USER_ROLE_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<Role>().ok())
        .unwrap_or_default();
    Some(Identity {
        user_id: user_id.into(),
        role,
    })
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        identity_from_headers(&parts.headers).ok_or_else(ApiError::unauthorized)
    }
}

/// Extractor for admin-only routes.
pub struct Admin(pub Identity);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Admin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let identity = Identity::from_request_parts(parts, state).await?;
        if !identity.role.is_admin() {
            return Err(ApiError::forbidden());
        }
        Ok(Admin(identity))
    }
}

/// Records the identity attached to the request so that leaderboards and
/// audit rows can be labeled. Failures are logged and ignored; requests are
/// never blocked by the bookkeeping.
pub async fn register_identity(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(identity) = identity_from_headers(request.headers()) {
        let name = request
            .headers()
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Name::new(v).ok())
            .or_else(|| Name::new(&(*identity.user_id).to_string()[..8]).ok());
        if let Some(name) = name {
            if let Err(err) = state
                .db
                .upsert_user(User {
                    id: identity.user_id,
                    name,
                    role: identity.role,
                })
                .await
            {
                debug!("failed to record identity: {err}");
            }
        }
    }
    next.run(request).await
}

//! Middleware for bearer token authentication and role policies
//!
//! Both layers run before any endpoint filter or handler of the routes they
//! guard. Authentication must wrap the policy layer, which reads the
//! [`AuthUser`] that authentication leaves in the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use tracing::debug;

use crate::{error::ApiError, jwt::JwtService, models::Role};

/// Authenticated user information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub name: String,
    pub role: Role,
}

/// Named authorization policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    Manager,
    Operator,
}

impl Policy {
    pub fn name(&self) -> &'static str {
        match self {
            Policy::Manager => "manager",
            Policy::Operator => "operator",
        }
    }

    pub fn required_role(&self) -> Role {
        match self {
            Policy::Manager => Role::Manager,
            Policy::Operator => Role::Operator,
        }
    }

    pub fn allows(&self, user: &AuthUser) -> bool {
        user.role == self.required_role()
    }
}

/// Validate the bearer token and attach the caller to the request
pub async fn auth_middleware(
    State(jwt_service): State<JwtService>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(ApiError::Unauthorized)?;

    let claims = jwt_service.validate_token(bearer.token()).map_err(|e| {
        debug!("Rejected bearer token: {}", e);
        ApiError::Unauthorized
    })?;

    req.extensions_mut().insert(AuthUser {
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// Enforce a role policy on an authenticated request
pub async fn require_policy(
    State(policy): State<Policy>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let allowed = match req.extensions().get::<AuthUser>() {
        Some(user) => policy.allows(user),
        None => return Err(ApiError::Unauthorized),
    };

    if !allowed {
        debug!("Request denied by the {} policy", policy.name());
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::{
    auth::{jwt::JwtKeys, repo::User},
    error::ApiError,
    state::AppState,
};

/// Paths served without any token inspection. Exact matches only, so
/// protected sub-paths can never ride along on a shared prefix.
const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/forgot-password",
    "/api/auth/reset-password",
    "/api/health",
];

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Authenticated identity installed into request extensions for the rest of
/// request handling.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

impl CurrentUser {
    pub fn authority(&self) -> String {
        format!("ROLE_{}", self.user.role.as_str())
    }
}

/// Once-per-request bearer resolution. Never rejects: a missing or invalid
/// token just leaves the request unauthenticated, and the endpoint's own
/// requirement (the [`AuthUser`] extractor) makes the authorization decision.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    if !is_public_path(req.uri().path()) {
        if let Some(token) = bearer_token(req.headers()) {
            if req.extensions().get::<CurrentUser>().is_none() {
                match resolve_bearer(&state, token).await {
                    Ok(Some(current)) => {
                        debug!(email = %current.user.email, authority = %current.authority(),
                               "request authenticated");
                        req.extensions_mut().insert(current);
                    }
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "bearer resolution failed"),
                }
            }
        }
    }
    next.run(req).await
}

async fn resolve_bearer(state: &AppState, token: &str) -> anyhow::Result<Option<CurrentUser>> {
    let keys = JwtKeys::from_ref(state);

    let subject = match keys.extract_subject(token) {
        Ok(s) => s,
        Err(e) => {
            debug!(error = %e, "subject extraction failed");
            return Ok(None);
        }
    };

    let Some(user) = User::find_by_email(&state.db, &subject).await? else {
        debug!(%subject, "token subject matches no user");
        return Ok(None);
    };

    if keys.validate(token, &user.email) {
        Ok(Some(CurrentUser { user }))
    } else {
        Ok(None)
    }
}

/// Extractor for endpoints that require an authenticated identity.
pub struct AuthUser(pub CurrentUser);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::repo::Role;
    use time::OffsetDateTime;
    use uuid::Uuid;

    #[test]
    fn public_paths_match_exactly() {
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/health"));
        assert!(!is_public_path("/api/auth/me"));
        assert!(!is_public_path("/api/auth/login/extra"));
        assert!(!is_public_path("/api/songs"));
        assert!(!is_public_path("/api/songs/123"));
    }

    #[test]
    fn bearer_token_requires_scheme_prefix() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Basic abc123".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, "Bearer some.jwt.token".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("some.jwt.token"));
    }

    #[test]
    fn authority_derived_from_role() {
        let current = CurrentUser {
            user: User {
                id: Uuid::new_v4(),
                username: "alice".into(),
                email: "alice@example.com".into(),
                password_hash: "hash".into(),
                first_name: "Alice".into(),
                last_name: "Smith".into(),
                profile_picture: None,
                role: Role::Admin,
                created_at: OffsetDateTime::now_utc(),
                reset_token: None,
                reset_token_expiry: None,
            },
        };
        assert_eq!(current.authority(), "ROLE_ADMIN");
    }
}

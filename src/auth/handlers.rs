use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{
            AuthResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, PublicUser,
            RegisterRequest, ResetPasswordRequest, UpdateProfileRequest,
        },
        filter::AuthUser,
        jwt::JwtKeys,
        password::{hash_password, verify_password},
        repo::User,
    },
    error::ApiError,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// A token with no stored expiry counts as expired.
fn reset_token_expired(expiry: Option<OffsetDateTime>, now: OffsetDateTime) -> bool {
    expiry.map_or(true, |expiry| now >= expiry)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
}

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/auth/profile", put(update_profile))
        .route("/auth/change-password", post(change_password))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::BadRequest("Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    if User::find_by_email(&state.db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email is already in use".into()));
    }

    if User::find_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        warn!(username = %payload.username, "username already taken");
        return Err(ApiError::Conflict("Username is already taken".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(
        &state.db,
        &payload.username,
        &payload.email,
        &hash,
        &payload.first_name,
        &payload.last_name,
    )
    .await?;

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email)?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(mut payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    payload.email = payload.email.trim().to_lowercase();

    // Unknown email and wrong password are indistinguishable to the caller.
    let user = User::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %payload.email, "login invalid password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        token,
        user: PublicUser::from(&user),
    }))
}

/// Always answers 200 with an empty body so responses reveal nothing about
/// which accounts exist.
#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let email = payload.email.trim().to_lowercase();

    if let Some(user) = User::find_by_email(&state.db, &email).await? {
        let token = Uuid::new_v4().to_string();
        let expiry = OffsetDateTime::now_utc()
            + TimeDuration::minutes(state.config.reset_token_ttl_minutes);
        User::set_reset_token(&state.db, user.id, &token, expiry).await?;

        if let Err(e) = state.notifier.send_reset_token(&user.email, &token).await {
            error!(error = %e, "reset notification failed");
        }
    }

    Ok(StatusCode::OK)
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let user = User::find_by_reset_token(&state.db, &payload.token)
        .await?
        .ok_or_else(|| ApiError::BadRequest("Invalid reset token".into()))?;

    if reset_token_expired(user.reset_token_expiry, OffsetDateTime::now_utc()) {
        warn!(user_id = %user.id, "reset token expired");
        return Err(ApiError::BadRequest("Reset token has expired".into()));
    }

    if payload.new_password.len() < 8 {
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    User::reset_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password reset");
    Ok(StatusCode::OK)
}

#[instrument(skip(current))]
pub async fn me(AuthUser(current): AuthUser) -> Json<PublicUser> {
    Json(PublicUser::from(&current.user))
}

#[instrument(skip(state, current, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    if let Some(username) = payload.username.as_deref() {
        if username != current.user.username
            && User::find_by_username(&state.db, username).await?.is_some()
        {
            return Err(ApiError::Conflict("Username already taken".into()));
        }
    }

    let user = User::update_profile(
        &state.db,
        current.user.id,
        payload.username.as_deref(),
        payload.first_name.as_deref(),
        payload.last_name.as_deref(),
        payload.profile_picture.as_deref(),
    )
    .await?;

    info!(user_id = %user.id, "profile updated");
    Ok(Json(PublicUser::from(&user)))
}

#[instrument(skip(state, current, payload))]
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    if !verify_password(&payload.old_password, &current.user.password_hash)? {
        warn!(user_id = %current.user.id, "change password with wrong current password");
        return Err(ApiError::BadRequest("Current password is incorrect".into()));
    }

    if payload.new_password.len() < 8 {
        return Err(ApiError::BadRequest("Password too short".into()));
    }

    let hash = hash_password(&payload.new_password)?;
    User::update_password(&state.db, current.user.id, &hash).await?;

    info!(user_id = %current.user.id, "password changed");
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_validation() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.domain.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("spaces in@mail.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn reset_expiry_is_inclusive() {
        let now = OffsetDateTime::now_utc();
        assert!(reset_token_expired(None, now));
        assert!(reset_token_expired(Some(now), now));
        assert!(reset_token_expired(Some(now - TimeDuration::minutes(1)), now));
        assert!(!reset_token_expired(Some(now + TimeDuration::minutes(1)), now));
    }
}

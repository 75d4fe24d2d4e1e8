/// Authentication API routes
use crate::{
    error::{Result, ServerError},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{extract::State, Json};
use kudo_core::User;
use kudo_storage::{users, StorageError};
use serde::{Deserialize, Serialize};

const USER_EXISTS: &str = "User already exists. Please sign in.";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Account summary returned after signup
#[derive(Debug, Serialize)]
pub struct CreatedUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
    pub user: CreatedUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_otp: Option<String>,
}

/// User as exposed in sessions
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
    /// Access token expiry (RFC 3339)
    pub expires: Option<String>,
}

impl From<&User> for CreatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            image: user.image,
        }
    }
}

/// POST /api/auth/signup
pub async fn signup(
    State(app_state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SignupResponse>> {
    let (Some(email), Some(password)) = (present(req.email), non_empty(req.password)) else {
        return Err(ServerError::BadRequest(
            "Email and password are required".to_string(),
        ));
    };

    if users::email_exists(&app_state.pool, &email).await? {
        return Err(ServerError::BadRequest(USER_EXISTS.to_string()));
    }

    let user = create_account(&app_state, email, req.name, &password).await?;
    tracing::info!(user_id = %user.id, "Account created");

    Ok(Json(SignupResponse {
        success: true,
        message: "Account created successfully".to_string(),
        user: CreatedUser::from(&user),
    }))
}

/// POST /api/auth/send-otp
pub async fn send_otp(
    State(app_state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>> {
    let email = present(req.email)
        .ok_or_else(|| ServerError::BadRequest("Email is required".to_string()))?;

    if users::email_exists(&app_state.pool, &email).await? {
        return Err(ServerError::BadRequest(USER_EXISTS.to_string()));
    }

    let code = app_state.otp_service.issue(&app_state.pool, &email).await?;

    let mut email_sent = false;
    if let Some(mailer) = &app_state.mailer {
        match mailer
            .send_otp(&email, req.name.as_deref(), &code, app_state.otp_service.ttl_minutes())
            .await
        {
            Ok(()) => email_sent = true,
            Err(e) => tracing::warn!(email = %email, error = %e, "Verification email not sent"),
        }
    }

    if !email_sent && !app_state.return_otp_in_response {
        return Err(ServerError::Mail(format!("no delivery channel for {}", email)));
    }

    let message = if email_sent {
        "OTP sent to your email!"
    } else {
        "Check your OTP below"
    };

    Ok(Json(SendOtpResponse {
        success: true,
        message: message.to_string(),
        dev_otp: app_state.return_otp_in_response.then_some(code),
    }))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(app_state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<SignupResponse>> {
    let (Some(email), Some(otp), Some(password)) =
        (present(req.email), present(req.otp), non_empty(req.password))
    else {
        return Err(ServerError::BadRequest(
            "Email, OTP, and password are required".to_string(),
        ));
    };

    app_state
        .otp_service
        .verify(&app_state.pool, &email, &otp)
        .await?;

    let user = create_account(&app_state, email, req.name, &password).await?;
    app_state
        .otp_service
        .consume(&app_state.pool, &user.email)
        .await?;
    tracing::info!(user_id = %user.id, "Account verified and created");

    Ok(Json(SignupResponse {
        success: true,
        message: "Account created successfully".to_string(),
        user: CreatedUser::from(&user),
    }))
}

/// POST /api/auth/login
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let user = users::get_by_email(&app_state.pool, req.email.trim())
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    let password_hash = users::get_password_hash(&app_state.pool, &user.id)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&user.id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(&user.id)?;

    Ok(Json(LoginResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        user: SessionUser::from(user),
    }))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>> {
    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    // Tokens of deleted accounts are not renewed
    if users::get_by_id(&app_state.pool, &user_id).await?.is_none() {
        return Err(ServerError::Auth("User no longer exists".to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(&user_id)?;

    Ok(Json(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    }))
}

/// GET /api/auth/session
pub async fn session(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<SessionResponse>> {
    let user = users::get_by_id(&app_state.pool, auth.user_id())
        .await?
        .ok_or_else(|| ServerError::Auth("User no longer exists".to_string()))?;

    Ok(Json(SessionResponse {
        user: SessionUser::from(user),
        expires: auth.expires_at.map(|at| at.to_rfc3339()),
    }))
}

async fn create_account(
    app_state: &AppState,
    email: String,
    name: Option<String>,
    password: &str,
) -> Result<User> {
    let password_hash = app_state.auth_service.hash_password(password)?;
    let name = present(name).unwrap_or_else(|| User::default_name(&email));
    let image = User::default_avatar(&email);

    let input = users::CreateUser {
        email,
        name,
        image: Some(image),
        password_hash,
    };

    users::create(&app_state.pool, input)
        .await
        .map_err(|e| match e {
            StorageError::Duplicate(_) => ServerError::BadRequest(USER_EXISTS.to_string()),
            other => ServerError::from(other),
        })
}

/// Trimmed, non-empty field value
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Non-empty value, kept verbatim (passwords)
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

//! Authentication Handlers

use std::time::Duration;

use axum::{Json, extract::State};

use crate::auth::password;
use crate::core::ServerState;
use crate::db::repository::admin;
use crate::utils::{AppError, AppResult};
use shared::models::{LoginRequest, LoginResponse};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /v1/login
///
/// Verifies email + password and returns a JWT. Failure responses are
/// identical for unknown email and wrong password, so the endpoint cannot
/// be used to enumerate accounts.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let admin = admin::find_by_email(&state.pool, &req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let admin = match admin {
        Some(a) => {
            let password_valid = password::verify_password(&req.password, &a.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(target: "security", email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }
            a
        }
        None => {
            tracing::warn!(target: "security", email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&admin)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(admin_id = admin.id, "Admin logged in");

    Ok(Json(LoginResponse {
        access_token: token,
        id: admin.id,
        role: admin.role,
    }))
}

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::{
        ctx::Ctx,
        error::{AppError, AppResult},
        mw_ctx::CtxState,
    },
    routes::{admin_routes, auth_routes, dashboard_routes, session_routes, wallet_routes},
    services::auth_service::{AuthRegisterInput, AuthService},
};

/// Registers the configured admin account when it is missing and marks it admin.
pub async fn create_default_admin(ctx_state: &CtxState, config: &AppConfig) -> AppResult<()> {
    let (Some(email), Some(username), Some(password)) = (
        config.admin_email.as_ref(),
        config.admin_username.as_ref(),
        config.start_password.as_ref(),
    ) else {
        info!("no admin bootstrap configured");
        return Ok(());
    };

    let ctx = Ctx::new(Ok("create_default_admin".to_string()));
    let auth_service = AuthService::new(
        &ctx,
        &ctx_state.jwt,
        &ctx_state.db.identities,
        &ctx_state.db.profiles,
    );

    let registered = auth_service
        .register_password(AuthRegisterInput {
            email: email.clone(),
            username: username.clone(),
            password: password.clone(),
            confirm_password: password.clone(),
        })
        .await;

    let user_key = match registered {
        Ok((_, profile)) => profile.user_key(),
        Err(err) if matches!(err.error, AppError::UsernameTaken | AppError::EmailTaken) => {
            let profile = ctx_state
                .db
                .profiles
                .get_by_username(username)
                .await?
                .ok_or(AppError::EntityFailIdNotFound {
                    ident: username.clone(),
                })?;
            // only the configured account may be promoted
            if profile.email != email.trim().to_lowercase() {
                return Err(AppError::Generic {
                    description: "admin username belongs to another account".to_string(),
                });
            }
            profile.user_key()
        }
        Err(err) => return Err(err.error),
    };

    ctx_state.db.profiles.set_admin(&user_key, true).await?;
    info!(%user_key, "admin account ready");
    Ok(())
}

pub async fn bootstrap_admin(ctx_state: &CtxState, config: &AppConfig) {
    if let Err(err) = create_default_admin(ctx_state, config).await {
        warn!(error = %err, "admin bootstrap failed");
    }
}

pub async fn main_router(ctx_state: &Arc<CtxState>) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(session_routes::routes())
        .merge(auth_routes::routes())
        .merge(dashboard_routes::routes())
        .merge(admin_routes::routes())
        .merge(wallet_routes::routes(ctx_state.is_development))
        .with_state(ctx_state.clone())
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}

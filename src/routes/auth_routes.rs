use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tower_cookies::Cookies;

use crate::{
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        mw_ctx::{add_jwt_cookie, remove_jwt_cookie, CtxState},
        utils::extractor_utils::{JsonOrForm, JsonOrFormValidated},
    },
    models::view::{
        session::{AuthView, SessionRoute},
        user::UserView,
    },
    services::auth_service::{AuthLoginInput, AuthRegisterInput, AuthService},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/login", post(signin))
        .route("/api/register", post(signup))
        .route("/api/logout", post(signout))
}

async fn signin(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrFormValidated(body): JsonOrFormValidated<AuthLoginInput>,
) -> CtxResult<Response> {
    let auth_service = AuthService::new(&ctx, &state.jwt, &state.db.identities, &state.db.profiles);

    let (token, user) = match auth_service.login_password(body).await {
        Ok(res) => res,
        Err(err) => {
            if err.error == AppError::AccountBanned {
                remove_jwt_cookie(&cookies);
            }
            return Err(err);
        }
    };

    add_jwt_cookie(&cookies, token.clone());
    let route = SessionRoute::for_profile(&user);
    Ok((
        StatusCode::OK,
        Json(AuthView {
            token,
            user: UserView::from(user),
            route,
        }),
    )
        .into_response())
}

async fn signup(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
    JsonOrForm(body): JsonOrForm<AuthRegisterInput>,
) -> CtxResult<Response> {
    let auth_service = AuthService::new(&ctx, &state.jwt, &state.db.identities, &state.db.profiles);

    let (token, user) = auth_service.register_password(body).await?;

    add_jwt_cookie(&cookies, token.clone());
    Ok((
        StatusCode::OK,
        Json(AuthView {
            token,
            user: UserView::from(user),
            route: SessionRoute::Dashboard,
        }),
    )
        .into_response())
}

async fn signout(cookies: Cookies) -> Response {
    remove_jwt_cookie(&cookies);
    (StatusCode::OK, Json(json!({ "route": SessionRoute::Login }))).into_response()
}

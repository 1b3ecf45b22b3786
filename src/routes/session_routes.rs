use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Json, Router,
};
use tower_cookies::Cookies;

use crate::{
    middleware::{
        ctx::Ctx,
        error::CtxResult,
        mw_ctx::{remove_jwt_cookie, CtxState},
    },
    models::view::{session::SessionView, user::UserView},
    services::session_service::{SessionService, SessionState},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/", get(root_redirect))
        .route("/api/session", get(get_session))
}

async fn resolve(state: &CtxState, ctx: &Ctx, cookies: &Cookies) -> CtxResult<SessionView> {
    let session = SessionService::new(ctx, &state.db.profiles).resolve().await?;
    let route = session.route();
    let user = match session {
        SessionState::Active(profile) => Some(UserView::from(profile)),
        SessionState::Banned(_) => {
            remove_jwt_cookie(cookies);
            None
        }
        SessionState::Anonymous => None,
    };
    Ok(SessionView { route, user })
}

async fn root_redirect(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
) -> CtxResult<Response> {
    let view = resolve(&state, &ctx, &cookies).await?;
    Ok(Redirect::to(view.route.as_path()).into_response())
}

async fn get_session(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    cookies: Cookies,
) -> CtxResult<Json<SessionView>> {
    Ok(Json(resolve(&state, &ctx, &cookies).await?))
}

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{
    middleware::{error::CtxResult, mw_ctx::CtxState, session::Session},
    models::view::dashboard::DashboardView,
    services::dashboard_service::DashboardService,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/api/dashboard", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<Arc<CtxState>>,
    session: Session,
) -> CtxResult<Json<DashboardView>> {
    let service = DashboardService::new(
        &session.ctx,
        &state.db.profiles,
        &state.db.balances,
        &state.db.withdrawals,
    );
    Ok(Json(service.for_profile(&session.profile).await?))
}

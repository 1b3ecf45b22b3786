use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{
    database::{
        client::Database,
        repository::Repository,
        table_names::{PROFILE_TABLE_NAME, WITHDRAWAL_REQUEST_TABLE_NAME},
    },
    entities::{
        balance::Balance,
        profile::Profile,
        withdrawal_request::{WithdrawalRequest, WithdrawalStatus},
    },
    middleware::{
        ctx::Ctx,
        error::CtxResult,
        mw_ctx::CtxState,
        session::{AdminSession, Session},
        utils::string_utils::get_record_key,
    },
    models::view::{
        dashboard::{AdminDashboardView, AdminStats, AdminUserRow},
        withdrawal::WithdrawalView,
    },
    services::admin_service::AdminService,
};

type DbAdminService<'a> =
    AdminService<'a, Repository<Profile>, Repository<Balance>, Repository<WithdrawalRequest>>;

fn admin_service<'a>(ctx: &'a Ctx, db: &'a Database) -> DbAdminService<'a> {
    AdminService::new(ctx, &db.profiles, &db.balances, &db.withdrawals)
}

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/admin", get(get_dataset))
        .route("/api/admin/users", get(get_users))
        .route("/api/admin/withdrawals", get(get_withdrawals))
        .route("/api/admin/stats", get(get_stats))
        .route("/api/admin/users/:user_id/ban", post(ban_user))
        .route("/api/admin/users/:user_id/unban", post(unban_user))
        .route(
            "/api/admin/withdrawals/:withdrawal_id/approve",
            post(approve_withdrawal),
        )
        .route(
            "/api/admin/withdrawals/:withdrawal_id/deny",
            post(deny_withdrawal),
        )
}

#[derive(Debug, Deserialize)]
struct WithdrawalsQuery {
    status: Option<WithdrawalStatus>,
}

async fn get_dataset(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
) -> CtxResult<Json<AdminDashboardView>> {
    let service = admin_service(&session.ctx, &state.db);
    Ok(Json(service.dataset(&session.profile).await?))
}

async fn get_users(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
) -> CtxResult<Json<Vec<AdminUserRow>>> {
    let service = admin_service(&session.ctx, &state.db);
    Ok(Json(service.users().await?))
}

async fn get_withdrawals(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
    Query(query): Query<WithdrawalsQuery>,
) -> CtxResult<Json<Vec<WithdrawalView>>> {
    let service = admin_service(&session.ctx, &state.db);
    Ok(Json(service.withdrawals(query.status).await?))
}

async fn get_stats(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
) -> CtxResult<Json<AdminStats>> {
    let service = admin_service(&session.ctx, &state.db);
    Ok(Json(service.stats().await?))
}

async fn set_banned(
    state: &CtxState,
    session: &Session,
    user_id: &str,
    banned: bool,
) -> CtxResult<Json<AdminDashboardView>> {
    let user_key = get_record_key(user_id, PROFILE_TABLE_NAME)
        .map_err(|e| session.ctx.to_ctx_error(e))?;
    let service = admin_service(&session.ctx, &state.db);
    service.set_banned(&session.profile, &user_key, banned).await?;
    Ok(Json(service.dataset(&session.profile).await?))
}

async fn ban_user(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
    Path(user_id): Path<String>,
) -> CtxResult<Json<AdminDashboardView>> {
    set_banned(&state, &session, &user_id, true).await
}

async fn unban_user(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
    Path(user_id): Path<String>,
) -> CtxResult<Json<AdminDashboardView>> {
    set_banned(&state, &session, &user_id, false).await
}

async fn process_withdrawal(
    state: &CtxState,
    session: &Session,
    withdrawal_id: &str,
    status: WithdrawalStatus,
) -> CtxResult<Json<AdminDashboardView>> {
    let withdrawal_key = get_record_key(withdrawal_id, WITHDRAWAL_REQUEST_TABLE_NAME)
        .map_err(|e| session.ctx.to_ctx_error(e))?;
    let service = admin_service(&session.ctx, &state.db);
    service
        .process_withdrawal(&session.profile, &withdrawal_key, status)
        .await?;
    Ok(Json(service.dataset(&session.profile).await?))
}

async fn approve_withdrawal(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
    Path(withdrawal_id): Path<String>,
) -> CtxResult<Json<AdminDashboardView>> {
    process_withdrawal(&state, &session, &withdrawal_id, WithdrawalStatus::Approved).await
}

async fn deny_withdrawal(
    State(state): State<Arc<CtxState>>,
    AdminSession(session): AdminSession,
    Path(withdrawal_id): Path<String>,
) -> CtxResult<Json<AdminDashboardView>> {
    process_withdrawal(&state, &session, &withdrawal_id, WithdrawalStatus::Denied).await
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::{
    database::table_names::PROFILE_TABLE_NAME,
    entities::balance::BalanceAmounts,
    interfaces::repositories::{
        balance_ifce::BalanceRepositoryInterface, profile_ifce::ProfileRepositoryInterface,
    },
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxResult},
        mw_ctx::CtxState,
        session::Session,
        utils::{extractor_utils::JsonOrFormValidated, string_utils::get_record_key},
    },
    models::view::withdrawal::WithdrawalView,
    services::withdrawal_service::{WithdrawInput, WithdrawalService},
};

pub fn routes(is_development: bool) -> Router<Arc<CtxState>> {
    let mut router = Router::new()
        .route("/api/wallet/withdraw", post(request_withdrawal))
        .route("/api/wallet/withdrawals", get(get_withdrawals));

    if is_development {
        router = router.route("/test/api/balance/:user_id", post(test_set_balance));
    }

    router
}

async fn request_withdrawal(
    State(state): State<Arc<CtxState>>,
    session: Session,
    JsonOrFormValidated(body): JsonOrFormValidated<WithdrawInput>,
) -> CtxResult<Json<WithdrawalView>> {
    let service = WithdrawalService::new(&session.ctx, &state.db.balances, &state.db.withdrawals);
    Ok(Json(service.request(&session.profile, body).await?))
}

async fn get_withdrawals(
    State(state): State<Arc<CtxState>>,
    session: Session,
) -> CtxResult<Json<Vec<WithdrawalView>>> {
    let service = WithdrawalService::new(&session.ctx, &state.db.balances, &state.db.withdrawals);
    Ok(Json(service.list_for(&session.profile).await?))
}

/// Stands in for the external process that owns balances.
async fn test_set_balance(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(user_id): Path<String>,
    Json(amounts): Json<BalanceAmounts>,
) -> CtxResult<Json<BalanceAmounts>> {
    if !state.is_development {
        return Err(ctx.to_ctx_error(AppError::Forbidden));
    }

    let user_key = get_record_key(&user_id, PROFILE_TABLE_NAME).map_err(|e| ctx.to_ctx_error(e))?;
    state
        .db
        .profiles
        .get_by_key(&user_key)
        .await
        .map_err(|e| ctx.to_ctx_error(e))?
        .ok_or_else(|| {
            ctx.to_ctx_error(AppError::EntityFailIdNotFound {
                ident: user_key.clone(),
            })
        })?;

    let balance = state
        .db
        .balances
        .set_amounts(&user_key, amounts)
        .await
        .map_err(|e| ctx.to_ctx_error(e))?;
    info!(%user_key, "test balance set");
    Ok(Json(BalanceAmounts::from(&balance)))
}

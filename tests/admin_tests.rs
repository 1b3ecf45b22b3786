mod helpers;

use axum::http::StatusCode;
use earnboard_server::{
    entities::{balance::BalanceAmounts, withdrawal_request::WithdrawalStatus},
    middleware::error::ErrorResponseBody,
    models::view::{
        dashboard::{AdminDashboardView, AdminStats, AdminUserRow},
        withdrawal::WithdrawalView,
    },
};
use serde_json::json;

use crate::helpers::{
    create_fake_admin, create_fake_login_test_user, login, set_balance, TestUser,
};

async fn fund_and_withdraw(server: &axum_test::TestServer, user: &TestUser, earnings: i64, amount: i64) {
    set_balance(
        server,
        &user.user.id,
        BalanceAmounts {
            earnings,
            completed_tasks: 1,
            tokens: 0,
        },
    )
    .await;
    server
        .post("/api/wallet/withdraw")
        .add_header("Authorization", user.bearer().as_str())
        .json(&json!({ "amount": amount }))
        .await
        .assert_status_success();
}

test_with_server!(non_admin_is_forbidden, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;
    let other = create_fake_login_test_user(&server).await;

    for path in ["/api/admin", "/api/admin/users", "/api/admin/withdrawals", "/api/admin/stats"] {
        let response = server
            .get(path)
            .add_header("Authorization", user.bearer().as_str())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    let response = server
        .post(&format!("/api/admin/users/{}/ban", other.user.id))
        .add_header("Authorization", user.bearer().as_str())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let anonymous = server
        .get("/api/admin")
        .add_header("Authorization", "Bearer invalid")
        .await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);
});

test_with_server!(empty_dataset_has_zero_totals, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;

    let stats = server
        .get("/api/admin/stats")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<AdminStats>();

    // the admin is the only account
    assert_eq!(stats.total_users, 1);
    assert_eq!(stats.total_earnings, 0);
    assert_eq!(stats.pending_withdrawals, 0);
});

test_with_server!(dataset_totals_match_rows, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;
    let alice = create_fake_login_test_user(&server).await;
    let bob = create_fake_login_test_user(&server).await;
    fund_and_withdraw(&server, &alice, 5_000, 1_000).await;
    fund_and_withdraw(&server, &bob, 2_500, 2_500).await;

    let dataset = server
        .get("/api/admin")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<AdminDashboardView>();

    assert_eq!(dataset.users.len(), 3);
    assert_eq!(dataset.stats.total_users, dataset.users.len() as u64);
    assert_eq!(
        dataset.stats.total_earnings,
        dataset.users.iter().map(|u| u.earnings).sum::<i64>()
    );
    assert_eq!(dataset.stats.total_earnings, 7_500);
    assert_eq!(dataset.stats.pending_withdrawals, 2);

    let alice_row = dataset
        .users
        .iter()
        .find(|u| u.user.id == alice.user.id)
        .unwrap();
    assert_eq!(alice_row.earnings, 5_000);
    assert_eq!(alice_row.completed_tasks, 1);

    let bob_request = dataset
        .withdrawals
        .iter()
        .find(|w| w.user_id == bob.user.id)
        .unwrap();
    assert_eq!(bob_request.username.as_deref(), Some(bob.user.username.as_str()));
    assert_eq!(bob_request.email.as_deref(), Some(bob.user.email.as_str()));
    // newest first
    assert_eq!(dataset.withdrawals[0].user_id, bob.user.id);
});

test_with_server!(missing_balance_reads_as_zero, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;
    let user = create_fake_login_test_user(&server).await;
    set_balance(
        &server,
        &user.user.id,
        BalanceAmounts {
            earnings: 900,
            completed_tasks: 2,
            tokens: 1,
        },
    )
    .await;

    ctx_state
        .db
        .client
        .query(format!("DELETE balance:`{}`;", user.user.id))
        .await
        .unwrap();

    let users = server
        .get("/api/admin/users")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<Vec<AdminUserRow>>();
    let row = users.iter().find(|u| u.user.id == user.user.id).unwrap();
    assert_eq!(row.earnings, 0);
    assert_eq!(row.completed_tasks, 0);
});

test_with_server!(ban_and_unban_user, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;
    let user = create_fake_login_test_user(&server).await;

    let response = server
        .post(&format!("/api/admin/users/{}/ban", user.user.id))
        .add_header("Authorization", admin.bearer().as_str())
        .await;
    response.assert_status_success();
    let dataset = response.json::<AdminDashboardView>();
    let row = dataset.users.iter().find(|u| u.user.id == user.user.id).unwrap();
    assert!(row.user.is_banned);

    // banning again keeps the account banned
    server
        .post(&format!("/api/admin/users/profile:{}/ban", user.user.id))
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .assert_status_success();

    let refused = login(&server, &user.user.username, &user.password).await;
    refused.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .post(&format!("/api/admin/users/{}/unban", user.user.id))
        .add_header("Authorization", admin.bearer().as_str())
        .await;
    response.assert_status_success();
    let dataset = response.json::<AdminDashboardView>();
    let row = dataset.users.iter().find(|u| u.user.id == user.user.id).unwrap();
    assert!(!row.user.is_banned);

    login(&server, &user.user.username, &user.password)
        .await
        .assert_status_success();
});

test_with_server!(ban_unknown_user_is_not_found, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;

    let response = server
        .post("/api/admin/users/01JAYH4Q1C1Y2X3W4V5T6S7R8P/ban")
        .add_header("Authorization", admin.bearer().as_str())
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let wrong_table = server
        .post("/api/admin/users/withdrawal_request:abc/ban")
        .add_header("Authorization", admin.bearer().as_str())
        .await;
    wrong_table.assert_status(StatusCode::BAD_REQUEST);
    assert!(wrong_table
        .json::<ErrorResponseBody>()
        .error
        .contains("is not a profile id"));
});

test_with_server!(withdrawals_filter_by_status, |server, ctx_state, config| {
    let admin = create_fake_admin(&server, &ctx_state).await;
    let alice = create_fake_login_test_user(&server).await;
    let bob = create_fake_login_test_user(&server).await;
    fund_and_withdraw(&server, &alice, 1_000, 100).await;
    fund_and_withdraw(&server, &bob, 1_000, 200).await;

    let all = server
        .get("/api/admin/withdrawals")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<Vec<WithdrawalView>>();
    assert_eq!(all.len(), 2);

    let alice_request = all.iter().find(|w| w.user_id == alice.user.id).unwrap();
    server
        .post(&format!("/api/admin/withdrawals/{}/deny", alice_request.id))
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .assert_status_success();

    let pending = server
        .get("/api/admin/withdrawals?status=pending")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<Vec<WithdrawalView>>();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].user_id, bob.user.id);

    let denied = server
        .get("/api/admin/withdrawals?status=denied")
        .add_header("Authorization", admin.bearer().as_str())
        .await
        .json::<Vec<WithdrawalView>>();
    assert_eq!(denied.len(), 1);
    assert_eq!(denied[0].status, WithdrawalStatus::Denied);
});

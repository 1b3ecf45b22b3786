use axum_test::{TestResponse, TestServer};
use earnboard_server::{
    entities::balance::BalanceAmounts,
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::mw_ctx::CtxState,
    models::view::{session::AuthView, user::UserView},
};
use fake::{faker, Fake};
use serde_json::json;

#[allow(dead_code)]
pub struct TestUser {
    pub user: UserView,
    pub password: String,
    pub token: String,
}

#[allow(dead_code)]
impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[allow(dead_code)]
pub fn fake_username() -> String {
    format!("user_{}", (10000..99999).fake::<u32>())
}

#[allow(dead_code)]
pub async fn register(
    server: &TestServer,
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> TestResponse {
    server
        .post("/api/register")
        .json(&json!({
            "email": email,
            "username": username,
            "password": password,
            "confirm_password": confirm_password,
        }))
        .await
}

#[allow(dead_code)]
pub async fn login(server: &TestServer, identifier: &str, password: &str) -> TestResponse {
    server
        .post("/api/login")
        .json(&json!({ "identifier": identifier, "password": password }))
        .await
}

#[allow(dead_code)]
pub async fn create_fake_login_test_user(server: &TestServer) -> TestUser {
    let username = fake_username();
    let email = format!("{username}@example.com");
    let password = faker::internet::en::Password(8..16).fake::<String>();

    let response = register(server, &email, &username, &password, &password).await;
    response.assert_status_success();
    let auth = response.json::<AuthView>();

    TestUser {
        user: auth.user,
        password,
        token: auth.token,
    }
}

#[allow(dead_code)]
pub async fn create_fake_admin(server: &TestServer, ctx_state: &CtxState) -> TestUser {
    let mut admin = create_fake_login_test_user(server).await;
    let profile = ctx_state
        .db
        .profiles
        .set_admin(&admin.user.id, true)
        .await
        .expect("admin flag set");
    admin.user = UserView::from(profile);
    admin
}

#[allow(dead_code)]
pub async fn set_balance(server: &TestServer, user_id: &str, amounts: BalanceAmounts) {
    server
        .post(&format!("/test/api/balance/{user_id}"))
        .json(&amounts)
        .await
        .assert_status_success();
}

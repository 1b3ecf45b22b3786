mod helpers;

use axum::http::StatusCode;
use earnboard_server::{
    database::repository::RepositoryCore,
    interfaces::repositories::profile_ifce::ProfileRepositoryInterface,
    middleware::{
        error::{AppError, ErrorResponseBody},
        mw_ctx::JWT_KEY,
    },
    models::view::session::{AuthView, SessionRoute, SessionView},
};
use serde_json::json;

use crate::helpers::{create_fake_login_test_user, fake_username, login, register};

test_with_server!(register_sets_cookie_and_routes_to_dashboard, |server, ctx_state, config| {
    let username = fake_username();
    let response = register(
        &server,
        &format!("{username}@example.com"),
        &username.to_uppercase(),
        "secret123",
        "secret123",
    )
    .await;

    response.assert_status_success();
    let auth = response.json::<AuthView>();
    assert_eq!(auth.route, SessionRoute::Dashboard);
    assert_eq!(auth.user.username, username);
    assert!(!auth.user.is_admin);
    assert_eq!(response.cookie(JWT_KEY).value(), auth.token);

    let balance = ctx_state.db.balances.select_by_key(&auth.user.id).await.unwrap();
    let balance = balance.expect("balance created with the profile");
    assert_eq!(balance.earnings, 0);
    assert_eq!(balance.tokens, 0);
});

test_with_server!(register_mismatched_passwords_creates_nothing, |server, ctx_state, config| {
    let username = fake_username();
    let response = register(
        &server,
        &format!("{username}@example.com"),
        &username,
        "secret123",
        "secret124",
    )
    .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<ErrorResponseBody>().error, "Passwords do not match");
    assert_eq!(ctx_state.db.identities.count().await.unwrap(), 0);
    assert_eq!(ctx_state.db.profiles.count().await.unwrap(), 0);
});

test_with_server!(register_rejects_invalid_fields, |server, ctx_state, config| {
    let response = register(&server, "not-an-email", "ab", "123", "123").await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx_state.db.identities.count().await.unwrap(), 0);
});

test_with_server!(register_duplicate_username_any_case, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let response = register(
        &server,
        "someone.else@example.com",
        &user.user.username.to_uppercase(),
        "secret123",
        "secret123",
    )
    .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<ErrorResponseBody>().error, "Username already taken");
    assert_eq!(ctx_state.db.identities.count().await.unwrap(), 1);
});

test_with_server!(register_duplicate_email_leaves_no_orphans, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let response = register(&server, &user.user.email, &fake_username(), "secret123", "secret123").await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<ErrorResponseBody>().error, "User already registered");
    assert_eq!(ctx_state.db.identities.count().await.unwrap(), 1);
    assert_eq!(ctx_state.db.profiles.count().await.unwrap(), 1);
    assert_eq!(ctx_state.db.balances.count().await.unwrap(), 1);
});

test_with_server!(profile_index_rejects_duplicate_username, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    // goes past the username pre-check straight to the unique index
    let result = ctx_state
        .db
        .profiles
        .create_with_balance(
            "01JB2Z9K7Q3M5N8P4R6T0V1W2X",
            &user.user.username.to_uppercase(),
            "other@example.com",
        )
        .await;

    assert!(matches!(result, Err(AppError::UsernameTaken)));
    assert_eq!(ctx_state.db.profiles.count().await.unwrap(), 1);
    assert_eq!(ctx_state.db.balances.count().await.unwrap(), 1);
});

test_with_server!(profile_index_rejects_duplicate_email, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let result = ctx_state
        .db
        .profiles
        .create_with_balance(
            "01JB2Z9K7Q3M5N8P4R6T0V1W2Y",
            &fake_username(),
            &user.user.email.to_uppercase(),
        )
        .await;

    assert!(matches!(result, Err(AppError::EmailTaken)));
    assert_eq!(ctx_state.db.profiles.count().await.unwrap(), 1);
    assert_eq!(ctx_state.db.balances.count().await.unwrap(), 1);
});

test_with_server!(login_with_username_or_email, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let by_username = login(&server, &user.user.username, &user.password).await;
    by_username.assert_status_success();
    let auth = by_username.json::<AuthView>();
    assert_eq!(auth.user.id, user.user.id);
    assert_eq!(auth.route, SessionRoute::Dashboard);

    let by_email = login(&server, &user.user.email.to_uppercase(), &user.password).await;
    by_email.assert_status_success();
    assert_eq!(by_email.json::<AuthView>().user.id, user.user.id);
});

test_with_server!(login_accepts_form_body, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let response = server
        .post("/api/login")
        .form(&json!({ "identifier": user.user.email, "password": user.password }))
        .await;

    response.assert_status_success();
    assert_eq!(response.json::<AuthView>().user.id, user.user.id);
});

test_with_server!(login_failures_look_the_same, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;

    let wrong_password = login(&server, &user.user.username, "wrong-password").await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_username = login(&server, "nobody_here", &user.password).await;
    unknown_username.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_email = login(&server, "nobody@example.com", &user.password).await;
    unknown_email.assert_status(StatusCode::UNAUTHORIZED);

    let messages: Vec<String> = [wrong_password, unknown_username, unknown_email]
        .iter()
        .map(|r| r.json::<ErrorResponseBody>().error)
        .collect();
    assert!(messages.iter().all(|m| m == "Invalid username or password"));
});

test_with_server!(banned_user_cannot_login, |server, ctx_state, config| {
    let user = create_fake_login_test_user(&server).await;
    ctx_state.db.profiles.set_banned(&user.user.id, true).await.unwrap();

    let response = login(&server, &user.user.username, &user.password).await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(
        response.json::<ErrorResponseBody>().error,
        "Your account has been banned. Please contact support."
    );
    assert_eq!(response.cookie(JWT_KEY).value(), "");

    let session = server.get("/api/session").await.json::<SessionView>();
    assert_eq!(session.route, SessionRoute::Login);
});

test_with_server!(logout_clears_session, |server, ctx_state, config| {
    let _user = create_fake_login_test_user(&server).await;

    let session = server.get("/api/session").await.json::<SessionView>();
    assert_eq!(session.route, SessionRoute::Dashboard);

    let response = server.post("/api/logout").await;
    response.assert_status_success();
    assert_eq!(response.cookie(JWT_KEY).value(), "");

    let session = server.get("/api/session").await.json::<SessionView>();
    assert_eq!(session.route, SessionRoute::Login);
    assert!(session.user.is_none());
});

// End-to-end HTTP scenarios against the composed app

mod common;

use std::sync::Arc;

use common::setup_app_data;
use poem::http::StatusCode;
use poem::test::{TestClient, TestResponse};
use poem::Endpoint;
use serde_json::json;
use storefront_backend::api::build_app;
use storefront_backend::app_data::AppData;
use storefront_backend::coordinators::UserCoordinator;
use storefront_backend::types::internal::context::RequestContext;

const MANAGER_ID: &str = "master01";
const MANAGER_PASSWORD: &str = "pwmaster01++";

async fn setup() -> TestClient<impl Endpoint> {
    let (_db, app_data) = setup_app_data().await;
    let app_data = Arc::new(app_data);
    create_manager(&app_data).await;
    TestClient::new(build_app(app_data, "http://localhost:3000"))
}

async fn create_manager(app_data: &Arc<AppData>) {
    UserCoordinator::new(Arc::clone(app_data))
        .create_manager(&RequestContext::for_cli("test"), MANAGER_ID, MANAGER_PASSWORD)
        .await
        .unwrap();
}

fn set_cookie(resp: &TestResponse) -> String {
    resp.0
        .headers()
        .get("set-cookie")
        .expect("Set-Cookie header")
        .to_str()
        .unwrap()
        .to_string()
}

/// `access-token=<jwt>` pair to send back in a `Cookie` header
fn cookie_pair(resp: &TestResponse) -> String {
    set_cookie(resp).split(';').next().unwrap().to_string()
}

async fn sign_up<E: Endpoint>(cli: &TestClient<E>, user_id: &str, password: &str) -> i64 {
    let resp = cli
        .post("/user")
        .body_json(&json!({ "user_id": user_id, "password": password, "role": "user" }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json().await.value().object().get("uid").i64()
}

async fn login<E: Endpoint>(cli: &TestClient<E>, user_id: &str, password: &str) -> String {
    let resp = cli
        .post("/login")
        .body_json(&json!({ "user_id": user_id, "password": password }))
        .send()
        .await;
    resp.assert_status_is_ok();
    cookie_pair(&resp)
}

async fn register_product<E: Endpoint>(cli: &TestClient<E>, manager_cookie: &str, name: &str, price: i64) -> i64 {
    let resp = cli
        .post("/product")
        .header("Cookie", manager_cookie)
        .body_json(&json!({ "name": name, "price": price }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    resp.json().await.value().object().get("pid").i64()
}

async fn error_message(resp: TestResponse) -> String {
    resp.json().await.value().object().get("message").string().to_string()
}

#[tokio::test]
async fn test_order_lifecycle() {
    let cli = setup().await;

    let uid = sign_up(&cli, "user1", "Abc12345!").await;
    let user_cookie = login(&cli, "user1", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;
    let pid = register_product(&cli, &manager_cookie, "Desk Lamp", 500).await;

    let resp = cli
        .post("/order")
        .header("Cookie", &user_cookie)
        .body_json(&json!({ "products": [pid] }))
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
    let body = resp.json().await;
    body.value().object().get("message").assert_string("create order success");
    let oid = body.value().object().get("oid").i64();

    let resp = cli
        .get(format!("/order/{}", oid))
        .header("Cookie", &user_cookie)
        .send()
        .await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("uid").assert_i64(uid);
    let products = body.value().object().get("products");
    products.array().assert_len(1);
    products.array().get(0).assert_i64(pid);

    let resp = cli.get("/orders").send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    let line = body.value().array().get(0).string().to_string();
    assert!(line.starts_with(&format!("{},", oid)));

    let resp = cli
        .delete(format!("/order/{}", oid))
        .header("Cookie", &user_cookie)
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = cli
        .get(format!("/order/{}", oid))
        .header("Cookie", &user_cookie)
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_sets_http_only_cookie() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;

    let resp = cli
        .post("/login")
        .body_json(&json!({ "user_id": "user1", "password": "Abc12345!" }))
        .send()
        .await;

    resp.assert_status_is_ok();
    let header = set_cookie(&resp);
    assert!(header.starts_with("access-token="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("Max-Age=3600"));
    resp.json().await.value().object().get("message").assert_string("login success");
}

#[tokio::test]
async fn test_login_failures() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;

    let resp = cli
        .post("/login")
        .body_json(&json!({ "user_id": "user1", "password": "Wrong123!" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let resp = cli
        .post("/login")
        .body_json(&json!({ "user_id": "nobody", "password": "Abc12345!" }))
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_sign_up_is_conflict() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;

    let resp = cli
        .post("/user")
        .body_json(&json!({ "user_id": "user1", "password": "Abc12345!", "role": "user" }))
        .send()
        .await;

    resp.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_sign_up_is_bad_request() {
    let cli = setup().await;

    let resp = cli
        .post("/user")
        .body_json(&json!({ "user_id": "u", "password": "Abc12345!", "role": "user" }))
        .send()
        .await;

    resp.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_manager_sign_up_requires_manager_cookie() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    let user_cookie = login(&cli, "user1", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;
    let body = json!({ "user_id": "boss1", "password": "Abc12345!", "role": "manager" });

    let resp = cli.post("/user").body_json(&body).send().await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let resp = cli
        .post("/user")
        .header("Cookie", &user_cookie)
        .body_json(&body)
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(resp).await, "general user cannot create manager account");

    let resp = cli
        .post("/user")
        .header("Cookie", &manager_cookie)
        .body_json(&body)
        .send()
        .await;
    resp.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_product_endpoints_are_manager_only() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    let user_cookie = login(&cli, "user1", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;

    let resp = cli
        .post("/product")
        .header("Cookie", &user_cookie)
        .body_json(&json!({ "name": "Desk Lamp", "price": 500 }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(resp).await, "general user cannot register product");

    let pid = register_product(&cli, &manager_cookie, "Desk Lamp", 500).await;

    let resp = cli
        .put(format!("/product/{}", pid))
        .header("Cookie", &user_cookie)
        .body_json(&json!({ "name": "Desk Lamp", "price": 1 }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);

    let resp = cli
        .put(format!("/product/{}", pid))
        .header("Cookie", &manager_cookie)
        .body_json(&json!({ "name": "Desk Lamp XL", "price": 750 }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = cli.get(format!("/product/{}", pid)).send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("name").assert_string("Desk Lamp XL");
    body.value().object().get("price").assert_i64(750);

    let resp = cli
        .delete(format!("/product/{}", pid))
        .header("Cookie", &manager_cookie)
        .send()
        .await;
    resp.assert_status_is_ok();

    cli.get(format!("/product/{}", pid))
        .send()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_auth_precedes_input_errors() {
    let cli = setup().await;

    cli.post("/product")
        .body_json(&json!({ "name": "X", "price": -1 }))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.put("/product/1")
        .body_json(&json!({ "name": "X", "price": -1 }))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_of_other_user_is_unauthorized() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    sign_up(&cli, "user2", "Abc12345!").await;
    let u1_cookie = login(&cli, "user1", "Abc12345!").await;
    let u2_cookie = login(&cli, "user2", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;
    let pid = register_product(&cli, &manager_cookie, "Desk Lamp", 500).await;

    let resp = cli
        .post("/order")
        .header("Cookie", &u1_cookie)
        .body_json(&json!({ "products": [pid] }))
        .send()
        .await;
    let oid = resp.json().await.value().object().get("oid").i64();

    let resp = cli
        .get(format!("/order/{}", oid))
        .header("Cookie", &u2_cookie)
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(resp).await, "not order of user");

    cli.delete(format!("/order/{}", oid))
        .header("Cookie", &u2_cookie)
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.get(format!("/order/{}", oid))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_input_errors() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    let cookie = login(&cli, "user1", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;
    let pid = register_product(&cli, &manager_cookie, "Desk Lamp", 500).await;

    for (products, status) in [
        (json!([]), StatusCode::BAD_REQUEST),
        (json!([pid, pid]), StatusCode::BAD_REQUEST),
        (json!([pid + 100]), StatusCode::NOT_FOUND),
    ] {
        cli.post("/order")
            .header("Cookie", &cookie)
            .body_json(&json!({ "products": products }))
            .send()
            .await
            .assert_status(status);
    }
}

#[tokio::test]
async fn test_replace_order_products() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    let cookie = login(&cli, "user1", "Abc12345!").await;
    let manager_cookie = login(&cli, MANAGER_ID, MANAGER_PASSWORD).await;
    let lamp = register_product(&cli, &manager_cookie, "Desk Lamp", 500).await;
    let desk = register_product(&cli, &manager_cookie, "Oak Desk", 9000).await;

    let resp = cli
        .post("/order")
        .header("Cookie", &cookie)
        .body_json(&json!({ "products": [lamp] }))
        .send()
        .await;
    let oid = resp.json().await.value().object().get("oid").i64();

    let resp = cli
        .put(format!("/order/{}", oid))
        .header("Cookie", &cookie)
        .body_json(&json!({ "products": [desk] }))
        .send()
        .await;
    resp.assert_status_is_ok();

    let resp = cli
        .get(format!("/order/{}", oid))
        .header("Cookie", &cookie)
        .send()
        .await;
    let body = resp.json().await;
    let products = body.value().object().get("products");
    products.array().assert_len(1);
    products.array().get(0).assert_i64(desk);
}

#[tokio::test]
async fn test_user_endpoints_require_own_cookie() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    sign_up(&cli, "user2", "Abc12345!").await;
    let u2_cookie = login(&cli, "user2", "Abc12345!").await;

    let resp = cli
        .put("/user/user1")
        .header("Cookie", &u2_cookie)
        .body_json(&json!({ "password": "Xyz12345!", "role": "user" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(resp).await, "invalid access token for this user");

    cli.get("/user/user1/orders")
        .header("Cookie", &u2_cookie)
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    cli.delete("/user/user1")
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let resp = cli
        .put("/user/user2")
        .header("Cookie", &u2_cookie)
        .body_json(&json!({ "password": "Xyz12345!", "role": "manager" }))
        .send()
        .await;
    resp.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_message(resp).await, "user cannot become manager itself");
}

#[tokio::test]
async fn test_password_change_and_account_removal() {
    let cli = setup().await;
    sign_up(&cli, "user1", "Abc12345!").await;
    let cookie = login(&cli, "user1", "Abc12345!").await;

    cli.put("/user/user1")
        .header("Cookie", &cookie)
        .body_json(&json!({ "password": "Xyz12345!", "role": "user" }))
        .send()
        .await
        .assert_status_is_ok();
    login(&cli, "user1", "Xyz12345!").await;

    let resp = cli.get("/user/user1").send().await;
    resp.assert_status_is_ok();
    let body = resp.json().await;
    body.value().object().get("role").assert_string("user");
    assert!(body.value().object().get("password").string().starts_with("$argon2id$"));

    let resp = cli.delete("/user/user1").header("Cookie", &cookie).send().await;
    resp.assert_status_is_ok();
    let header = set_cookie(&resp);
    assert!(header.starts_with("access-token=;"));
    assert!(header.contains("Max-Age=0"));

    cli.get("/user/user1").send().await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let cli = setup().await;

    let resp = cli.post("/logout").send().await;

    resp.assert_status_is_ok();
    let header = set_cookie(&resp);
    assert!(header.starts_with("access-token=;"));
    assert!(header.contains("Max-Age=0"));
    resp.json().await.value().object().get("message").assert_string("logout success");
}

#[tokio::test]
async fn test_garbage_cookie_is_unauthorized() {
    let cli = setup().await;

    cli.post("/order")
        .header("Cookie", "access-token=not-a-jwt")
        .body_json(&json!({ "products": [1] }))
        .send()
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let cli = setup().await;

    let resp = cli.get("/health").send().await;

    resp.assert_status_is_ok();
    resp.json().await.value().object().get("status").assert_string("healthy");
}

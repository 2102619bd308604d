use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_gateway::{app, Account, Card, Operation, User};
use serde_json::Value;
use tower::{Service, ServiceExt};

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

const CREATE_USER: &str = r#"{"email":"ann@example.com","lastName":"Smith","firstName":"Ann","middleName":"Lee","phoneNumber":"555"}"#;

// --- users ---

#[tokio::test]
async fn create_user_wraps_user() {
    let resp = app()
        .oneshot(json_request("/api/v1/users", CREATE_USER))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let user: User = serde_json::from_value(body["user"].clone()).unwrap();
    assert_eq!(user.first_name, "Ann");
    assert_eq!(user.phone_number, "555");
}

#[tokio::test]
async fn create_user_missing_field_returns_422() {
    let resp = app()
        .oneshot(json_request("/api/v1/users", r#"{"email":"ann@example.com"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_user_not_found() {
    let resp = app()
        .oneshot(get_request("/api/v1/users/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_user_bad_uuid_returns_400() {
    let resp = app()
        .oneshot(get_request("/api/v1/users/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- accounts ---

#[tokio::test]
async fn open_account_for_unknown_user_returns_404() {
    let resp = app()
        .oneshot(json_request(
            "/api/v1/accounts/open-deposit-account",
            r#"{"userId":"00000000-0000-0000-0000-000000000000"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- operations ---

#[tokio::test]
async fn get_operation_not_found() {
    let resp = app()
        .oneshot(get_request(
            "/api/v1/operations/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_for_unknown_account_returns_404() {
    let resp = app()
        .oneshot(get_request(
            "/api/v1/operations/operations-summary?accountId=00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn make_operation_rejects_unknown_status() {
    let resp = app()
        .oneshot(json_request(
            "/api/v1/operations/make-fee-operation",
            r#"{"status":"DONE","amount":1,"cardId":"00000000-0000-0000-0000-000000000000","accountId":"00000000-0000-0000-0000-000000000000"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- full lifecycle ---

#[tokio::test]
async fn account_and_operation_lifecycle() {
    let mut app = app().into_service();

    // create user
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/api/v1/users", CREATE_USER))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let user: User = serde_json::from_value(body["user"].clone()).unwrap();

    // open debit card account, which comes with one physical card
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/v1/accounts/open-debit-card-account",
            &format!(r#"{{"userId":"{}"}}"#, user.id),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let account: Account = serde_json::from_value(body["account"].clone()).unwrap();
    assert_eq!(account.kind, "DEBIT_CARD");
    assert_eq!(account.cards.len(), 1);
    assert_eq!(account.cards[0].kind, "PHYSICAL");
    assert_eq!(account.cards[0].card_holder, "Ann Smith");
    let card_id = account.cards[0].id;

    // issue virtual card
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/v1/cards/issue-virtual-card",
            &format!(r#"{{"userId":"{}","accountId":"{}"}}"#, user.id, account.id),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let card: Card = serde_json::from_value(body["card"].clone()).unwrap();
    assert_eq!(card.kind, "VIRTUAL");
    assert_eq!(card.account_id, account.id);

    // top up, then a purchase, then a failed fee
    for (route, payload) in [
        ("make-top-up-operation", r#""status":"COMPLETED","amount":100"#),
        ("make-purchase-operation", r#""status":"COMPLETED","amount":30,"category":"taxi""#),
        ("make-fee-operation", r#""status":"FAILED","amount":5"#),
    ] {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request(
                &format!("/api/v1/operations/{route}"),
                &format!(r#"{{{payload},"cardId":"{card_id}","accountId":"{}"}}"#, account.id),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "{route}");
    }

    // list operations
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/v1/operations?accountId={}", account.id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    let operations: Vec<Operation> = serde_json::from_value(body["operations"].clone()).unwrap();
    assert_eq!(operations.len(), 3);
    assert_eq!(operations[1].category, "taxi");
    assert_eq!(operations[2].category, "fee");

    // summary skips the failed fee
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!(
            "/api/v1/operations/operations-summary?accountId={}",
            account.id
        )))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["summary"]["receivedAmount"], 100.0);
    assert_eq!(body["summary"]["spentAmount"], 30.0);
    assert_eq!(body["summary"]["cashbackAmount"], 0.0);

    // receipt
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!(
            "/api/v1/operations/operation-receipt/{}",
            operations[1].id
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert!(body["receipt"]["url"].as_str().unwrap().ends_with(&operations[1].id.to_string()));

    // tariff document
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!(
            "/api/v1/documents/tariff-document/{}",
            account.id
        )))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert!(body["tariff"]["document"].as_str().unwrap().contains("tariff"));

    // accounts by user
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/api/v1/accounts?userId={}", user.id)))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    let accounts: Vec<Account> = serde_json::from_value(body["accounts"].clone()).unwrap();
    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].cards.len(), 2);
    assert_eq!(accounts[0].balance, 70.0);
}

#[tokio::test]
async fn make_operation_with_foreign_card_returns_404() {
    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("/api/v1/users", CREATE_USER))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/v1/accounts/open-deposit-account",
            &format!(r#"{{"userId":"{user_id}"}}"#),
        ))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    let account_id = body["account"]["id"].as_str().unwrap().to_string();
    assert!(body["account"]["cards"].as_array().unwrap().is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/api/v1/operations/make-cashback-operation",
            &format!(
                r#"{{"status":"COMPLETED","amount":1,"cardId":"00000000-0000-0000-0000-000000000000","accountId":"{account_id}"}}"#
            ),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_bytes(resp).await.is_empty());
}

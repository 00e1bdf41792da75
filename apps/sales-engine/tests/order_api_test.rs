//! Order API Integration Tests
//!
//! End-to-end tests driving order creation, modification, review, and the
//! notification surface through the HTTP router with in-memory adapters.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::too_many_lines)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tower::ServiceExt;

use sales_engine::application::ports::{Client, Product, Promotion, User, UserRole};
use sales_engine::application::use_cases::{
    CreateOrderUseCase, ManageObjectivesUseCase, NotificationsUseCase, ObjectiveProgressUseCase,
    OrderSummaryUseCase, ReviewOrderUseCase, UpdateOrderUseCase,
};
use sales_engine::domain::shared::{ClientId, Money, ProductId, PromotionId, UserId, VatRate};
use sales_engine::infrastructure::http::{AppState, create_router};
use sales_engine::infrastructure::persistence::{
    InMemoryObjectiveRepository, InMemoryOrderRepository,
};
use sales_engine::infrastructure::reference::{InMemoryCatalog, InMemoryDirectory};

/// Build a router over freshly seeded in-memory adapters.
fn make_app() -> Router {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let objectives = Arc::new(InMemoryObjectiveRepository::new());
    let catalog = Arc::new(InMemoryCatalog::new());
    let directory = Arc::new(InMemoryDirectory::new());

    catalog.add_product(Product {
        id: ProductId::new("prod-a"),
        name: "Olive oil 1L".to_string(),
        unit_price: Money::new(dec!(10.00)),
        unit_price_incl_tax: Money::new(dec!(12.00)),
        vat_rate: VatRate::new(dec!(20)),
        category: Some("grocery".to_string()),
    });
    catalog.add_product(Product {
        id: ProductId::new("prod-b"),
        name: "Harissa 250g".to_string(),
        unit_price: Money::new(dec!(5.00)),
        unit_price_incl_tax: Money::new(dec!(5.50)),
        vat_rate: VatRate::new(dec!(10)),
        category: Some("grocery".to_string()),
    });
    catalog.add_promotion(Promotion {
        id: PromotionId::new("promo-1"),
        title: "Spring sale".to_string(),
        discount_percent: dec!(10),
    });

    directory.add_user(User {
        id: UserId::new("rep-1"),
        first_name: "Nadia".to_string(),
        last_name: "Ben Salah".to_string(),
        email: "nadia@comptoir.test".to_string(),
        role: UserRole::SalesRep,
        active: true,
    });
    directory.add_user(User {
        id: UserId::new("admin-1"),
        first_name: "Karim".to_string(),
        last_name: "Haddad".to_string(),
        email: "karim@comptoir.test".to_string(),
        role: UserRole::Admin,
        active: true,
    });
    directory.add_client(Client {
        id: ClientId::new("cli-1"),
        name: "Epicerie du Port".to_string(),
        first_name: None,
        fiscal_code: Some("TN-123".to_string()),
    });

    let state = AppState {
        create_order: Arc::new(CreateOrderUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&catalog),
            Arc::clone(&directory),
        )),
        update_order: Arc::new(UpdateOrderUseCase::new(Arc::clone(&orders))),
        review_order: Arc::new(ReviewOrderUseCase::new(Arc::clone(&orders))),
        order_summary: Arc::new(OrderSummaryUseCase::new(
            Arc::clone(&orders),
            Arc::clone(&catalog),
            Arc::clone(&directory),
        )),
        notifications: Arc::new(NotificationsUseCase::new(Arc::clone(&orders))),
        objective_progress: Arc::new(ObjectiveProgressUseCase::new(
            Arc::clone(&objectives),
            Arc::clone(&orders),
            Arc::clone(&catalog),
            Arc::clone(&directory),
        )),
        manage_objectives: Arc::new(ManageObjectivesUseCase::new(objectives, directory)),
        version: "test".to_string(),
    };
    create_router(state)
}

/// Send one request and return status plus parsed JSON body (Null when
/// the response has no body).
async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            builder.body(Body::from(value.to_string())).unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("should read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

fn two_line_order() -> Value {
    json!({
        "sales_rep": "rep-1",
        "client": "cli-1",
        "lines": [
            {"product": "prod-a", "quantity": 2},
            {"product": "prod-b", "quantity": 1}
        ]
    })
}

async fn create_order(app: &Router, body: Value) -> Value {
    let (status, order) = send(app, "POST", "/api/v1/orders", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    order
}

#[tokio::test]
async fn health_reports_version() {
    let app = make_app();
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "test");
}

#[tokio::test]
async fn create_order_computes_weighted_totals() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;

    assert_eq!(order["status"], "pending");
    assert_eq!(order["net_total"], "25.00");
    assert_eq!(order["vat_rate"], "18.00");
    assert_eq!(order["gross_total"], "29.50");
    assert_eq!(order["admin_modified"], false);
    assert_eq!(order["lines"].as_array().unwrap().len(), 2);
    assert!(order["number"].as_str().unwrap().starts_with("CMD-"));
}

#[tokio::test]
async fn consecutive_orders_get_distinct_numbers() {
    let app = make_app();
    let first = create_order(&app, two_line_order()).await;
    let second = create_order(&app, two_line_order()).await;

    assert_ne!(first["number"], second["number"]);
}

#[tokio::test]
async fn concurrent_creations_never_duplicate_numbers() {
    let app = make_app();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            let (status, order) =
                send(&app, "POST", "/api/v1/orders", Some(two_line_order())).await;
            assert_eq!(status, StatusCode::CREATED);
            order["number"].as_str().unwrap().to_string()
        }));
    }

    let mut numbers = std::collections::HashSet::new();
    for handle in handles {
        numbers.insert(handle.await.unwrap());
    }
    assert_eq!(numbers.len(), 8);
}

#[tokio::test]
async fn create_order_rejects_bad_actors_and_references() {
    let app = make_app();

    let mut body = two_line_order();
    body["sales_rep"] = json!("admin-1");
    let (status, err) = send(&app, "POST", "/api/v1/orders", Some(body)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(err["error"].as_str().unwrap().contains("sales reps"));

    let mut body = two_line_order();
    body["lines"][0]["product"] = json!("prod-z");
    let (status, _) = send(&app, "POST", "/api/v1/orders", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let mut body = two_line_order();
    body["lines"] = json!([]);
    let (status, _) = send(&app, "POST", "/api/v1/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = two_line_order();
    body["lines"][1]["quantity"] = json!(0);
    let (status, err) = send(&app, "POST", "/api/v1/orders", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("strictly positive"));
}

#[tokio::test]
async fn admin_change_recomputes_and_leaves_audit_trail() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();
    let line_a = order["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["product"] == "prod-a")
        .unwrap();

    let (status, updated) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{order_id}/lines"),
        Some(json!({
            "modified_by": "admin-1",
            "lines": [{"line": line_a["id"], "quantity": 3}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let updated_a = updated["lines"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["product"] == "prod-a")
        .unwrap();
    assert_eq!(updated_a["quantity"], 3);
    assert_eq!(updated_a["net_total"], "30.00");
    assert_eq!(updated_a["gross_total"], "36.00");
    assert_eq!(updated["net_total"], "35.00");
    assert_eq!(updated["gross_total"], "41.00");
    assert_eq!(updated["admin_modified"], true);

    let (status, history) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/history"), None).await;
    assert_eq!(status, StatusCode::OK);
    let entries = history.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["field"], "quantity - Olive oil 1L");
    assert_eq!(entries[0]["old_value"], "2");
    assert_eq!(entries[0]["new_value"], "3");
    assert_eq!(entries[0]["modified_by"], "admin-1");
    assert_eq!(entries[0]["seen_by_rep"], false);
}

#[tokio::test]
async fn no_op_change_is_idempotent() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();
    let line_a = &order["lines"].as_array().unwrap()[0];

    let (status, updated) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{order_id}/lines"),
        Some(json!({
            "modified_by": "admin-1",
            "lines": [{"line": line_a["id"], "quantity": line_a["quantity"]}]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["admin_modified"], false);
    assert_eq!(updated["net_total"], order["net_total"]);
    assert_eq!(updated["gross_total"], order["gross_total"]);

    let (_, history) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/history"), None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn rejected_change_leaves_order_untouched() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();
    let lines = order["lines"].as_array().unwrap();

    let (status, err) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{order_id}/lines"),
        Some(json!({
            "modified_by": "admin-1",
            "lines": [
                {"line": lines[0]["id"], "quantity": 5},
                {"line": lines[1]["id"], "quantity": -1}
            ]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(err["error"].as_str().unwrap().contains("strictly positive"));

    let (_, summary) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/summary"), None).await;
    assert_eq!(summary["net_total"], "25.00");
    assert_eq!(summary["gross_total"], "29.50");

    let (_, history) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/history"), None).await;
    assert!(history.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_and_rejection_transitions() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, validated) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{order_id}/validate"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(validated["status"], "validated");
    assert!(validated["validated_at"].is_string());

    let other = create_order(&app, two_line_order()).await;
    let other_id = other["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{other_id}/reject"),
        Some(json!({"reason": "   "})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, rejected) = send(
        &app,
        "POST",
        &format!("/api/v1/orders/{other_id}/reject"),
        Some(json!({"reason": "out of stock"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rejected["status"], "rejected");
    assert_eq!(rejected["rejection_reason"], "out of stock");

    let (status, _) = send(&app, "POST", "/api/v1/orders/ord-missing/validate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn soft_delete_keeps_record_and_notifies_rep() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, deleted) = send(
        &app,
        "DELETE",
        &format!("/api/v1/orders/{order_id}"),
        Some(json!({"acting_admin": "admin-1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["status"], "rejected");
    assert!(
        deleted["rejection_reason"]
            .as_str()
            .unwrap()
            .contains("administration")
    );

    let (_, count) = send(
        &app,
        "GET",
        "/api/v1/reps/rep-1/notifications/unseen-count",
        None,
    )
    .await;
    assert_eq!(count["unseen"], 1);

    // The record is still there.
    let (status, _) = send(&app, "GET", &format!("/api/v1/orders/{order_id}/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn hard_delete_removes_everything() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/orders/{order_id}/purge"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, "GET", &format!("/api/v1/orders/{order_id}/summary"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_back_computes_pre_discount_price() {
    let app = make_app();
    let mut body = two_line_order();
    body["promotion"] = json!("promo-1");
    let order = create_order(&app, body).await;
    let order_id = order["id"].as_str().unwrap();

    let (status, summary) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/summary"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["number"], order["number"]);
    assert_eq!(summary["sales_rep"]["name"], "Nadia Ben Salah");
    assert_eq!(summary["client"]["name"], "Epicerie du Port");
    assert_eq!(summary["client"]["fiscal_code"], "TN-123");
    assert_eq!(summary["gross_total"], "29.50");
    // 29.50 is 90% of the pre-discount price.
    assert_eq!(summary["price_before_discount"], "32.78");
    assert_eq!(summary["promotion"]["title"], "Spring sale");
    assert_eq!(summary["promotion"]["discount_percent"], "10");
}

#[tokio::test]
async fn notification_flow_single_and_bulk() {
    let app = make_app();
    let order = create_order(&app, two_line_order()).await;
    let order_id = order["id"].as_str().unwrap();
    let lines = order["lines"].as_array().unwrap();

    // Two changes, two unseen notifications.
    for (line, quantity) in [(&lines[0], 7), (&lines[1], 4)] {
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/orders/{order_id}/lines"),
            Some(json!({
                "modified_by": "admin-1",
                "lines": [{"line": line["id"], "quantity": quantity}]
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, count) = send(
        &app,
        "GET",
        "/api/v1/reps/rep-1/notifications/unseen-count",
        None,
    )
    .await;
    assert_eq!(count["unseen"], 2);

    // The modified-orders view pairs the order with its unseen count.
    let (_, modified) = send(&app, "GET", "/api/v1/reps/rep-1/orders/modified", None).await;
    let modified = modified.as_array().unwrap();
    assert_eq!(modified.len(), 1);
    assert_eq!(modified[0]["order"]["id"], order["id"]);
    assert_eq!(modified[0]["unseen_entries"], 2);

    // Mark one entry seen, then the rest in bulk.
    let (_, history) =
        send(&app, "GET", &format!("/api/v1/orders/{order_id}/history"), None).await;
    let entry_id = history.as_array().unwrap()[0]["id"].as_str().unwrap().to_string();

    let (status, marked) = send(
        &app,
        "POST",
        &format!("/api/v1/notifications/{entry_id}/seen"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["marked"], 1);

    let (status, marked) = send(&app, "POST", "/api/v1/reps/rep-1/notifications/seen", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(marked["marked"], 1);

    let (_, count) = send(
        &app,
        "GET",
        "/api/v1/reps/rep-1/notifications/unseen-count",
        None,
    )
    .await;
    assert_eq!(count["unseen"], 0);

    let (status, _) = send(&app, "POST", "/api/v1/notifications/hist-missing/seen", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

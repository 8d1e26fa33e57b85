use serde_json::json;

use site_backend::domain::{
    PageRequest,
    SubscriberStatus,
};
use site_backend::store::Store;

use crate::helpers::*;

#[actix_rt::test]
async fn subscribe_returns_a_201_for_a_new_email() {
    let test_app = spawn_app().await;

    let response = test_app.subscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(201, response.status().as_u16());
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "ursula_le_guin@gmail.com");
    assert!(body["data"]["subscribedAt"].is_string());
    assert_eq!(test_app.store.count_subscribers(Some("active")).await.unwrap(), 1);
}

#[actix_rt::test]
async fn subscribe_returns_a_400_with_missing_or_invalid_email() {
    let test_app = spawn_app().await;
    let invalid_data = vec![
        (json!({}), "Email is required"),
        (json!({"email": ""}), "Email is required"),
        (json!({"email": "ursula"}), "Please enter a valid email address"),
        (json!({"email": "ursula@gmail"}), "Please enter a valid email address"),
        (json!({"email": "ursula le@gmail.com"}), "Please enter a valid email address"),
    ];
    for (body, error_message) in invalid_data {
        let response = send_json_post_request(
            &test_app.endpoint("/api/newsletter/subscribe"),
            &body,
        )
        .await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "Subscription with body {} did not fail",
            body
        );
        assert_eq!(json_body(response).await["message"], error_message);
    }
    assert_eq!(test_app.store.count_subscribers(None).await.unwrap(), 0);
}

#[actix_rt::test]
async fn subscribing_twice_while_active_returns_a_400() {
    let test_app = spawn_app().await;

    assert_eq!(201, test_app.subscribe("ursula_le_guin@gmail.com").await.status().as_u16());
    let response = test_app.subscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(json_body(response).await["message"], "Email already subscribed");
    assert_eq!(test_app.store.count_subscribers(None).await.unwrap(), 1);
}

#[actix_rt::test]
async fn email_case_does_not_create_a_second_subscription() {
    let test_app = spawn_app().await;

    test_app.subscribe("ursula_le_guin@gmail.com").await;
    let response = test_app.subscribe(" Ursula_Le_Guin@Gmail.com ").await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(test_app.store.count_subscribers(None).await.unwrap(), 1);
}

#[actix_rt::test]
async fn subscribing_after_unsubscribing_reactivates_the_same_record() {
    let test_app = spawn_app().await;
    test_app.subscribe("ursula_le_guin@gmail.com").await;
    let original = test_app
        .store
        .list_subscribers(None, PageRequest::default())
        .await
        .unwrap()
        .remove(0);

    assert_eq!(200, test_app.unsubscribe("ursula_le_guin@gmail.com").await.status().as_u16());
    let response = test_app.subscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Welcome back! Subscription reactivated.");
    assert!(body.get("data").is_none());

    let subscribers = test_app
        .store
        .list_subscribers(None, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(subscribers.len(), 1);
    assert_eq!(subscribers[0].id, original.id);
    assert_eq!(subscribers[0].status, SubscriberStatus::Active);
}

#[actix_rt::test]
async fn unsubscribe_flips_the_status() {
    let test_app = spawn_app().await;
    test_app.subscribe("ursula_le_guin@gmail.com").await;

    let response = test_app.unsubscribe("ursula_le_guin@gmail.com").await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(json_body(response).await["message"], "Successfully unsubscribed");
    assert_eq!(
        test_app.store.count_subscribers(Some("unsubscribed")).await.unwrap(),
        1
    );
    assert_eq!(test_app.store.count_subscribers(Some("active")).await.unwrap(), 0);
}

#[actix_rt::test]
async fn unsubscribe_returns_a_404_for_unknown_email() {
    let test_app = spawn_app().await;
    test_app.subscribe("ursula_le_guin@gmail.com").await;

    for email in vec!["someone_else@gmail.com", "not-an-email"] {
        let response = test_app.unsubscribe(email).await;
        assert_eq!(404, response.status().as_u16());
        assert_eq!(json_body(response).await["message"], "Email not found");
    }
    assert_eq!(test_app.store.count_subscribers(Some("active")).await.unwrap(), 1);
}

#[actix_rt::test]
async fn unsubscribe_without_email_returns_a_400() {
    let test_app = spawn_app().await;
    test_app.subscribe("ursula_le_guin@gmail.com").await;

    let response =
        send_json_post_request(&test_app.endpoint("/api/newsletter/unsubscribe"), &json!({}))
            .await;

    assert_eq!(400, response.status().as_u16());
    assert_eq!(test_app.store.count_subscribers(Some("active")).await.unwrap(), 1);
}

#[actix_rt::test]
async fn list_subscribers_requires_a_token() {
    let test_app = spawn_app().await;
    let response = send_get_request(&test_app.endpoint("/api/newsletter")).await;
    assert_eq!(401, response.status().as_u16());
}

#[actix_rt::test]
async fn list_subscribers_filters_and_paginates() {
    let test_app = spawn_app().await;
    for i in 0..4 {
        test_app.subscribe(&format!("reader{}@gmail.com", i)).await;
    }
    test_app.unsubscribe("reader0@gmail.com").await;
    let token = test_app.admin_token().await;

    let response = send_authenticated_get_request(
        &test_app.endpoint("/api/newsletter?status=active&limit=2"),
        &token,
    )
    .await;

    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["reader3@gmail.com", "reader2@gmail.com"]);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "totalPages": 2,
            "totalRecords": 3,
            "recordsOnPage": 2
        })
    );
}

#[actix_rt::test]
async fn list_subscribers_second_page_ends_with_the_oldest_active_subscriber() {
    let test_app = spawn_app().await;
    for i in 0..4 {
        test_app.subscribe(&format!("reader{}@gmail.com", i)).await;
    }
    test_app.unsubscribe("reader0@gmail.com").await;
    let token = test_app.admin_token().await;

    let response = send_authenticated_get_request(
        &test_app.endpoint("/api/newsletter?status=active&page=2&limit=2"),
        &token,
    )
    .await;

    assert_eq!(200, response.status().as_u16());
    let body = json_body(response).await;
    let emails: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["reader1@gmail.com"]);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 2,
            "totalPages": 2,
            "totalRecords": 3,
            "recordsOnPage": 1
        })
    );
}

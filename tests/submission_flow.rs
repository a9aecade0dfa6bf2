use sarvam::prelude::*;
use sarvam::submission;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_response() -> serde_json::Value {
    json!({
        "access_token": "token-abc",
        "refresh_token": "refresh-abc",
        "token_type": "bearer",
        "expires_in": 3600,
        "user": { "id": "user123", "email": "asha@example.com" }
    })
}

fn created_request() -> serde_json::Value {
    json!({
        "request_id": "req-9",
        "title": "Home Cleaning Service",
        "description": "Deep cleaning for apartments",
        "skill_id": "skill-1",
        "customer_id": "cust-1",
        "budget_min": 500.0,
        "budget_max": 1500.0,
        "status": "open",
        "created_at": "2026-08-30T10:00:00Z"
    })
}

async fn signed_in_client(server: &MockServer) -> (Sarvam, SessionProvider) {
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();
    session
        .sign_in(&client.auth, "asha@example.com", "secret")
        .await
        .unwrap();
    (client, session)
}

fn filled_form() -> ServiceForm {
    ServiceForm {
        title: "Home Cleaning Service".into(),
        description: "Deep cleaning for apartments".into(),
        skill_id: "skill-1".into(),
        budget_min: "500".into(),
        budget_max: "1500".into(),
    }
}

#[tokio::test]
async fn first_submission_creates_customer_then_request() {
    let server = MockServer::start().await;
    let (client, session) = signed_in_client(&server).await;

    // No customer record yet for this profile.
    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .and(query_param("profile_id", "eq.user123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/customers"))
        .and(body_partial_json(json!({
            "profile_id": "user123",
            "email": "asha@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "customer_id": "cust-1",
            "profile_id": "user123",
            "email": "asha@example.com"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .and(body_partial_json(json!({
            "title": "Home Cleaning Service",
            "skill_id": "skill-1",
            "customer_id": "cust-1",
            "budget_min": 500.0,
            "budget_max": 1500.0,
            "status": "open"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([created_request()])))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = filled_form();
    let mut added = false;
    let request = submission::submit(&client, &session, &mut form, || added = true)
        .await
        .unwrap();

    assert_eq!(request.status, "open");
    assert_eq!(request.budget_min, Some(500.0));
    assert_eq!(request.budget_max, Some(1500.0));
    assert!(added);

    // Success resets the form.
    assert!(form.title.is_empty());
    assert!(form.skill_id.is_empty());
}

#[tokio::test]
async fn repeat_submission_reuses_the_existing_customer() {
    let server = MockServer::start().await;
    let (client, session) = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .and(query_param("profile_id", "eq.user123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "customer_id": "cust-1" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    // A second customer insert would be a bug.
    Mock::given(method("POST"))
        .and(path("/rest/v1/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .and(body_partial_json(json!({ "customer_id": "cust-1" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([created_request()])))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = filled_form();
    submission::submit(&client, &session, &mut form, || {})
        .await
        .unwrap();
}

#[tokio::test]
async fn empty_budgets_are_omitted_from_the_insert() {
    let server = MockServer::start().await;
    let (client, session) = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "customer_id": "cust-1" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([{
            "request_id": "req-10",
            "title": "Home Cleaning Service",
            "description": "Deep cleaning for apartments",
            "skill_id": "skill-1",
            "customer_id": "cust-1",
            "status": "open"
        }])))
        .mount(&server)
        .await;

    let mut form = filled_form();
    form.budget_min.clear();
    form.budget_max.clear();

    let request = submission::submit(&client, &session, &mut form, || {})
        .await
        .unwrap();

    assert_eq!(request.budget_min, None);
    assert_eq!(request.budget_max, None);
}

#[tokio::test]
async fn request_insert_failure_aborts_with_the_error() {
    let server = MockServer::start().await;
    let (client, session) = signed_in_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "customer_id": "cust-1" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .respond_with(ResponseTemplate::new(400).set_body_string("constraint violation"))
        .mount(&server)
        .await;

    let mut form = filled_form();
    let mut added = false;
    let err = submission::submit(&client, &session, &mut form, || added = true)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Database(_)));
    assert!(!added);
    // The form keeps its contents so the user can retry.
    assert_eq!(form.title, "Home Cleaning Service");
}

#[tokio::test]
async fn inserts_carry_the_configured_schema_profile() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response()))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/customers"))
        .and(header("Accept-Profile", "marketplace"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "customer_id": "cust-1" }])),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/requests"))
        .and(header("Content-Profile", "marketplace"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([created_request()])))
        .expect(1)
        .mount(&server)
        .await;

    let options = ClientOptions::default().with_db_schema("marketplace");
    let client = Sarvam::new_with_options(&server.uri(), "fake-key", options);
    let mut session = SessionProvider::new();
    session
        .sign_in(&client.auth, "asha@example.com", "secret")
        .await
        .unwrap();

    let mut form = filled_form();
    submission::submit(&client, &session, &mut form, || {})
        .await
        .unwrap();
}

#[tokio::test]
async fn skills_are_fetched_ordered_by_name() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/skills"))
        .and(query_param("order", "name.asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "skill_id": "skill-2", "name": "Cleaning", "description": "Home cleaning" },
            { "skill_id": "skill-7", "name": "Plumbing", "description": null }
        ])))
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let skills = submission::fetch_skills(&client).await.unwrap();

    assert_eq!(skills.len(), 2);
    assert_eq!(skills[0].name, "Cleaning");
    assert_eq!(skills[1].description, None);
}

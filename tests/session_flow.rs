use sarvam::auth::Session;
use sarvam::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn sign_in_sets_the_current_user() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "refresh_token": "refresh-abc",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": { "id": "user123", "email": "asha@example.com" }
        })))
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();
    assert!(session.current_user().is_none());

    session
        .sign_in(&client.auth, "asha@example.com", "secret")
        .await
        .unwrap();

    let user = session.current_user().unwrap();
    assert_eq!(user.id, "user123");
    assert!(client.auth.get_session().is_some());
}

#[tokio::test]
async fn bad_credentials_surface_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })),
        )
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();

    let err = session
        .sign_in(&client.auth, "asha@example.com", "wrong")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth(_)));
    assert!(session.current_user().is_none());
    assert!(client.auth.get_session().is_none());
}

#[tokio::test]
async fn sign_up_forwards_profile_fields_as_metadata() {
    let server = MockServer::start().await;

    // Email confirmation enabled: the signup response carries no session.
    Mock::given(method("POST"))
        .and(path("/auth/v1/signup"))
        .and(body_partial_json(json!({
            "email": "asha@example.com",
            "data": { "first_name": "Asha", "last_name": "Rao" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": { "id": "user123", "email": "asha@example.com" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();

    let profile = ProfileFields {
        first_name: "Asha".into(),
        last_name: "Rao".into(),
    };
    session
        .sign_up(&client.auth, "asha@example.com", "secret", &profile)
        .await
        .unwrap();

    // No session arrived, so nobody is signed in yet.
    assert!(session.current_user().is_none());
    assert!(client.auth.get_session().is_none());
}

#[tokio::test]
async fn initialize_restores_a_persisted_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "user123",
            "email": "asha@example.com"
        })))
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    client
        .auth
        .set_session(Session::new("token-abc".into(), "refresh-abc".into(), 3600));

    let mut session = SessionProvider::new();
    assert!(session.is_loading());

    session.initialize(&client.auth).await;

    assert!(!session.is_loading());
    assert_eq!(session.current_user().unwrap().id, "user123");
}

#[tokio::test]
async fn initialize_without_a_session_resolves_to_no_user() {
    let client = Sarvam::new("http://localhost:9", "fake-key");
    let mut session = SessionProvider::new();

    session.initialize(&client.auth).await;

    assert!(!session.is_loading());
    assert!(session.current_user().is_none());
}

#[tokio::test]
async fn sign_out_clears_the_session() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "refresh_token": "refresh-abc",
            "expires_in": 3600,
            "user": { "id": "user123" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();
    session
        .sign_in(&client.auth, "asha@example.com", "secret")
        .await
        .unwrap();

    session.sign_out(&client.auth).await.unwrap();

    assert!(session.current_user().is_none());
    assert!(client.auth.get_session().is_none());
}

#[tokio::test]
async fn sign_out_clears_local_state_even_when_the_remote_call_fails() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "token-abc",
            "refresh_token": "refresh-abc",
            "expires_in": 3600,
            "user": { "id": "user123" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = Sarvam::new(&server.uri(), "fake-key");
    let mut session = SessionProvider::new();
    session
        .sign_in(&client.auth, "asha@example.com", "secret")
        .await
        .unwrap();

    let result = session.sign_out(&client.auth).await;

    assert!(result.is_err());
    assert!(session.current_user().is_none());
    assert!(client.auth.get_session().is_none());
}

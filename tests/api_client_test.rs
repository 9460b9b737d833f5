use anyhow::Result;
use httpmock::prelude::*;
use praga_client::{ApiClient, ClientError, ClientSettings, ConfigResponse, HttpApiClient};
use serde_json::json;

fn client_for(server: &MockServer) -> HttpApiClient {
    client_with_token(server, None)
}

fn client_with_token(server: &MockServer, token: Option<&str>) -> HttpApiClient {
    let settings = ClientSettings {
        base_url: server.base_url(),
        session_token: token.map(str::to_string),
        ..ClientSettings::default()
    };
    HttpApiClient::new(&settings).unwrap()
}

/// Nothing listens on port 1.
fn unreachable_client() -> HttpApiClient {
    let settings = ClientSettings {
        base_url: "http://127.0.0.1:1".to_string(),
        ..ClientSettings::default()
    };
    HttpApiClient::new(&settings).unwrap()
}

#[tokio::test]
async fn test_get_config_returns_payload_unchanged() -> Result<()> {
    let server = MockServer::start();
    let config_mock = server.mock(|when, then| {
        when.method(GET).path("/api/config");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "title": "Login",
                "brand": "Private Area",
                "support": "technical support"
            }));
    });

    let config = client_for(&server).get_config().await?;

    config_mock.assert();
    assert_eq!(
        config,
        ConfigResponse {
            title: "Login".to_string(),
            brand: "Private Area".to_string(),
            support: "technical support".to_string(),
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_get_config_ignores_error_status() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/config");
        then.status(404).json_body(json!({
            "title": "Acme",
            "brand": "AcmeCorp",
            "support": "help@acme.test"
        }));
    });

    let config = client_for(&server).get_config().await?;
    assert_eq!(config.brand, "AcmeCorp");
    Ok(())
}

#[tokio::test]
async fn test_get_config_non_json_body_is_decode_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/config");
        then.status(500).body("Internal error");
    });

    let result = client_for(&server).get_config().await;

    match result {
        Err(ClientError::DecodeError { path, status, .. }) => {
            assert_eq!(path, "/api/config");
            assert_eq!(status, 500);
        }
        other => panic!("expected decode error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_config_transport_failure() {
    let result = unreachable_client().get_config().await;
    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::ApiError(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_verify_token_true_for_2xx() -> Result<()> {
    for status in [200, 204, 299] {
        let server = MockServer::start();
        let verify_mock = server.mock(|when, then| {
            when.method(POST).path("/api/verify-token");
            then.status(status);
        });

        assert!(client_for(&server).verify_token().await?, "status {}", status);
        verify_mock.assert();
    }
    Ok(())
}

#[tokio::test]
async fn test_verify_token_false_for_error_status() -> Result<()> {
    for status in [400, 401, 403, 404, 500, 503] {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/verify-token");
            then.status(status);
        });

        assert!(!client_for(&server).verify_token().await?, "status {}", status);
    }
    Ok(())
}

#[tokio::test]
async fn test_verify_token_transport_failure_is_error() {
    assert!(unreachable_client().verify_token().await.is_err());
}

#[tokio::test]
async fn test_verify_token_sends_seeded_session_cookie() -> Result<()> {
    let server = MockServer::start();
    let verify_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/verify-token")
            .header("cookie", "PRAGA_TOKEN=existing-session");
        then.status(204);
    });

    let client = client_with_token(&server, Some("existing-session"));
    assert!(client.verify_token().await?);
    verify_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_email_verify_posts_exact_body() -> Result<()> {
    let server = MockServer::start();
    let verify_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/email/verify")
            .header("content-type", "application/json")
            .json_body(json!({"email": "user@acme.test", "code": "23HJKLNQ"}));
        then.status(204);
    });

    let accepted = client_for(&server)
        .email_verify("user@acme.test", "23HJKLNQ")
        .await?;

    assert!(accepted);
    verify_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_email_verify_wrong_code_is_false() -> Result<()> {
    let server = MockServer::start();
    let verify_mock = server.mock(|when, then| {
        when.method(POST).path("/api/email/verify");
        then.status(400);
    });

    let accepted = client_for(&server)
        .email_verify("user@acme.test", "XXXXXXXX")
        .await?;

    assert!(!accepted);
    verify_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_session_cookie_from_verify_is_replayed() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/email/verify");
        then.status(204)
            .header("Set-Cookie", "PRAGA_TOKEN=issued-token; Path=/; HttpOnly");
    });
    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/verify-token")
            .header("cookie", "PRAGA_TOKEN=issued-token");
        then.status(204);
    });

    let client = client_for(&server);
    assert!(client.session_cookie().is_none());

    assert!(client.email_verify("user@acme.test", "23HJKLNQ").await?);
    assert_eq!(client.session_cookie().as_deref(), Some("issued-token"));

    assert!(client.verify_token().await?);
    token_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_email_send_posts_exact_body() -> Result<()> {
    let server = MockServer::start();
    let send_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/email/send")
            .json_body(json!({"email": "user@acme.test"}));
        then.status(204);
    });

    client_for(&server).email_send("user@acme.test").await?;

    send_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_email_send_ignores_error_status() -> Result<()> {
    for status in [400, 429, 500] {
        let server = MockServer::start();
        let send_mock = server.mock(|when, then| {
            when.method(POST).path("/api/email/send");
            then.status(status);
        });

        client_for(&server).email_send("user@acme.test").await?;
        send_mock.assert();
    }
    Ok(())
}

#[tokio::test]
async fn test_email_send_transport_failure_is_error() {
    let err = unreachable_client()
        .email_send("user@acme.test")
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

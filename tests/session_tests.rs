mod common;

use betfair_ng::transport::{ClientCertificate, RequestBody};
use betfair_ng::{BetfairError, Kind, Service};
use common::{client, logged_in, logged_out, settings, StubTransport, APP_KEY, SESSION_TOKEN};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn form(username: &str, password: &str) -> RequestBody {
    RequestBody::Form(vec![
        ("username".to_string(), username.to_string()),
        ("password".to_string(), password.to_string()),
    ])
}

#[tokio::test]
async fn test_certificate_login_stores_token() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"sessionToken": "Zx8i4oigut5nc+l4L8qFb0DSxG+mwLn2t0AMGFxjrMJI=", "loginStatus": "SUCCESS"}"#,
    );
    let mut client = logged_out(transport);

    client.login("user", "secret").await.unwrap();
    assert_eq!(
        client.session_token(),
        "Zx8i4oigut5nc+l4L8qFb0DSxG+mwLn2t0AMGFxjrMJI="
    );
    assert!(client.is_logged_in());
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(
        client.headers().get("Content-Type").map(String::as_str),
        Some("application/json")
    );
    assert_eq!(
        client.headers().get("X-Authentication").map(String::as_str),
        Some("Zx8i4oigut5nc+l4L8qFb0DSxG+mwLn2t0AMGFxjrMJI=")
    );

    let request = client.transport().last_request();
    assert_eq!(request.url, "https://identitysso-cert.betfair.com/api/certlogin");
    assert_eq!(
        request.header("Content-Type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(request.header("X-Application"), Some(APP_KEY));
    assert_eq!(request.body, form("user", "secret"));
    assert_eq!(
        request.client_certificate,
        Some(ClientCertificate {
            certificate_path: PathBuf::from("client.crt"),
            key_path: PathBuf::from("client.key"),
        })
    );
}

#[tokio::test]
async fn test_certificate_login_failure_restores_route() {
    let transport =
        StubTransport::new().respond(200, r#"{"loginStatus": "INVALID_USERNAME_OR_PASSWORD"}"#);
    let mut client = logged_out(transport);
    let headers_before = client.headers().clone();

    let err = client.login("user", "wrong").await.unwrap_err();
    assert_eq!(err.kind(), Kind::Application);
    assert_eq!(client.last_error(), "INVALID_USERNAME_OR_PASSWORD");
    assert!(!client.is_logged_in());
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
    assert_eq!(client.certificate_path(), "client.crt");
}

#[tokio::test]
async fn test_certificate_login_preconditions() {
    let mut client = logged_out(StubTransport::new());

    let err = client.login("", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Username and Password Required");

    client.set_certificate_path("");
    let err = client.login("user", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "SSL Client Cert Required");
    assert_eq!(err.kind(), Kind::Precondition);

    client.set_certificate_path("client.crt");
    client.set_key_path("");
    let err = client.login("user", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "SSL Client Key Required");
    assert_eq!(client.last_error(), "SSL Client Key Required");

    assert_eq!(client.transport().calls(), 0);
}

#[tokio::test]
async fn test_login_transport_failure_restores_route() {
    let transport = StubTransport::new().fail("connection refused");
    let mut client = logged_out(transport);
    let headers_before = client.headers().clone();

    let err = client.login("user", "secret").await.unwrap_err();
    assert_eq!(err, BetfairError::Transport("connection refused".to_string()));
    assert_eq!(client.headers(), &headers_before);
    assert_eq!(client.active_service(), Service::Betting);
}

#[tokio::test]
async fn test_login_http_error() {
    let transport = StubTransport::new().respond(503, "");
    let mut client = logged_out(transport);

    client.login("user", "secret").await.unwrap_err();
    assert_eq!(client.last_error(), "503 Service Unavailable");
    assert!(!client.is_logged_in());
}

#[tokio::test]
async fn test_interactive_login_with_placeholder_key() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "interactive-token", "product": "app", "status": "SUCCESS", "error": ""}"#,
    );
    let mut client = client(settings("", ""), transport);

    client.interactive_login("user", "secret").await.unwrap();
    assert_eq!(client.session_token(), "interactive-token");
    assert_eq!(client.application_key(), "");
    assert!(!client.headers().contains_key("X-Application"));

    let request = client.transport().last_request();
    assert_eq!(request.url, "https://identitysso.betfair.com/api/login");
    assert!(request
        .header("X-Application")
        .is_some_and(|key| key.starts_with("app_")));
    assert!(request.client_certificate.is_none());
    assert_eq!(request.body, form("user", "secret"));
}

#[tokio::test]
async fn test_interactive_login_uses_configured_key() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "t", "product": "app", "status": "SUCCESS", "error": ""}"#,
    );
    let mut client = logged_out(transport);

    client.interactive_login("user", "secret").await.unwrap();
    assert_eq!(
        client.transport().last_request().header("X-Application"),
        Some(APP_KEY)
    );
}

#[tokio::test]
async fn test_interactive_login_failure_message() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "", "product": "app", "status": "LOGIN_RESTRICTED", "error": "INVALID_USERNAME_OR_PASSWORD"}"#,
    );
    let mut client = client(settings("", ""), transport);
    let headers_before = client.headers().clone();

    let err = client.interactive_login("user", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "LOGIN_RESTRICTED : INVALID_USERNAME_OR_PASSWORD");
    assert!(!client.is_logged_in());
    assert_eq!(client.headers(), &headers_before);
}

#[tokio::test]
async fn test_interactive_login_transport_failure_restores_route() {
    let transport = StubTransport::new().fail("connection refused");
    let mut client = client(settings("", ""), transport);
    let headers_before = client.headers().clone();

    let err = client.interactive_login("user", "secret").await.unwrap_err();
    assert_eq!(err.kind(), Kind::Transport);
    assert!(!client.is_logged_in());
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
    assert!(!client.headers().contains_key("X-Application"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "", "product": "app", "status": "SUCCESS", "error": ""}"#,
    );
    let mut client = logged_in(transport);

    client.logout().await.unwrap();
    assert!(!client.is_logged_in());
    assert!(!client.headers().contains_key("X-Authentication"));
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(
        client.headers().get("Content-Type").map(String::as_str),
        Some("application/json")
    );

    let request = client.transport().last_request();
    assert_eq!(request.url, "https://identitysso.betfair.com/api/logout");
    assert_eq!(request.header("X-Authentication"), Some(SESSION_TOKEN));
    assert_eq!(request.body, RequestBody::Empty);
}

#[tokio::test]
async fn test_logout_http_error_keeps_session() {
    let transport = StubTransport::new().respond(500, "");
    let mut client = logged_in(transport);
    let headers_before = client.headers().clone();

    let err = client.logout().await.unwrap_err();
    assert_eq!(err.to_string(), "500 Internal Server Error");
    assert_eq!(err.kind(), Kind::Http);
    assert!(client.is_logged_in());
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
}

#[tokio::test]
async fn test_logout_transport_failure_keeps_session() {
    let transport = StubTransport::new().fail("connection reset");
    let mut client = logged_in(transport);
    let headers_before = client.headers().clone();

    let err = client.logout().await.unwrap_err();
    assert_eq!(err, BetfairError::Transport("connection reset".to_string()));
    assert_eq!(client.last_error(), "connection reset");
    assert_eq!(client.session_token(), SESSION_TOKEN);
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
}

#[tokio::test]
async fn test_logout_rejected_keeps_session() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "", "product": "app", "status": "FAIL", "error": "NO_SESSION"}"#,
    );
    let mut client = logged_in(transport);
    let headers_before = client.headers().clone();

    let err = client.logout().await.unwrap_err();
    assert_eq!(err.to_string(), "FAIL : NO_SESSION");
    assert_eq!(err.kind(), Kind::Application);
    assert_eq!(client.session_token(), SESSION_TOKEN);
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
}

#[tokio::test]
async fn test_logout_requires_session() {
    let mut client = logged_out(StubTransport::new());

    let err = client.logout().await.unwrap_err();
    assert_eq!(err, BetfairError::NotLoggedIn);
    assert_eq!(client.transport().calls(), 0);
}

#[tokio::test]
async fn test_keep_alive_refreshes_token() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "refreshed", "product": "app", "status": "SUCCESS", "error": ""}"#,
    );
    let mut client = logged_in(transport);

    client.keep_alive().await.unwrap();
    assert_eq!(client.session_token(), "refreshed");
    assert_eq!(
        client.headers().get("X-Authentication").map(String::as_str),
        Some("refreshed")
    );
    assert_eq!(
        client.transport().last_request().url,
        "https://identitysso.betfair.com/api/keepAlive"
    );
}

#[tokio::test]
async fn test_keep_alive_failure_keeps_token() {
    let transport = StubTransport::new().respond(
        200,
        r#"{"token": "", "product": "app", "status": "FAIL", "error": "NO_SESSION"}"#,
    );
    let mut client = logged_in(transport);

    let err = client.keep_alive().await.unwrap_err();
    assert_eq!(err.to_string(), "FAIL : NO_SESSION");
    assert_eq!(client.session_token(), SESSION_TOKEN);
    assert_eq!(client.active_service(), Service::Betting);
}

#[tokio::test]
async fn test_keep_alive_http_error_restores_route() {
    let transport = StubTransport::new().respond(502, "");
    let mut client = logged_in(transport);
    let headers_before = client.headers().clone();

    let err = client.keep_alive().await.unwrap_err();
    assert_eq!(err.to_string(), "502 Bad Gateway");
    assert_eq!(client.session_token(), SESSION_TOKEN);
    assert_eq!(client.active_service(), Service::Betting);
    assert_eq!(client.headers(), &headers_before);
}

#[tokio::test]
async fn test_keep_alive_preconditions() {
    let mut client = logged_out(StubTransport::new());
    assert_eq!(
        client.keep_alive().await.unwrap_err(),
        BetfairError::NotLoggedIn
    );

    let mut client = common::client(settings("", SESSION_TOKEN), StubTransport::new());
    assert_eq!(
        client.keep_alive().await.unwrap_err(),
        BetfairError::NoApplicationKey
    );
    assert_eq!(client.transport().calls(), 0);
}

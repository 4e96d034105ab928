use betfair_ng::config::ClientConfig;
use betfair_ng::dto::{FilterRequest, MarketFilter};
use betfair_ng::{BetfairClient, Endpoints, HttpsTransport, Kind, Operation, Service};
use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

fn settings(session_token: &str) -> ClientConfig {
    ClientConfig {
        application_key: "app-key".to_string(),
        session_token: session_token.to_string(),
        ..Default::default()
    }
}

fn client_for(base_url: &str, session_token: &str) -> BetfairClient {
    BetfairClient::with_transport(
        settings(session_token),
        Endpoints::with_base_url(base_url),
        HttpsTransport::new().unwrap(),
    )
}

#[tokio::test]
async fn test_list_event_types_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/exchange/betting/rest/v1.0/listEventTypes/")
        .match_header("x-application", "app-key")
        .match_header("x-authentication", "session-token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"filter": {"eventTypeIds": ["7"]}})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"eventType": {"id": "7", "name": "Horse Racing"}, "marketCount": 512}]"#)
        .create_async()
        .await;

    let mut client = client_for(&server.url(), "session-token");
    let filter = MarketFilter {
        event_type_ids: Some(vec!["7".to_string()]),
        ..Default::default()
    };
    let event_types = client
        .list_event_types(&FilterRequest::new(filter))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(event_types.len(), 1);
    assert_eq!(event_types[0].event_type.name, "Horse Racing");
    assert_eq!(event_types[0].market_count, 512);
}

#[tokio::test]
async fn test_account_fault_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/exchange/account/rest/v1.0/getAccountDetails/")
        .with_status(400)
        .with_body(
            r#"{"faultcode": "Client", "faultstring": "AANGX-0010", "detail": {"AccountAPINGException": {"errorCode": "INVALID_SESSION_INFORMATION"}}}"#,
        )
        .create_async()
        .await;

    let mut client = client_for(&server.url(), "expired");
    let err = client.get_account_details().await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.kind(), Kind::Application);
    assert_eq!(client.last_error(), "INVALID_SESSION_INFORMATION");
    assert_eq!(client.active_service(), Service::Betting);
}

#[tokio::test]
async fn test_interactive_login_posts_form() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/login")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_header("x-application", "app-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "user".into()),
            Matcher::UrlEncoded("password".into(), "p&ss word".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"token": "fresh", "product": "app-key", "status": "SUCCESS", "error": ""}"#)
        .create_async()
        .await;

    let mut client = client_for(&server.url(), "");
    client.interactive_login("user", "p&ss word").await.unwrap();

    mock.assert_async().await;
    assert_eq!(client.session_token(), "fresh");
}

#[tokio::test]
async fn test_navigation_menu_is_fetched_with_get() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/exchange/betting/rest/v1/en/navigation/menu.json")
        .match_header("x-authentication", "session-token")
        .with_status(200)
        .with_body(r#"{"type": "GROUP", "name": "ROOT", "id": 0, "children": []}"#)
        .create_async()
        .await;

    let mut client = client_for(&server.url(), "session-token");
    let menu = client.navigation_menu().await.unwrap();

    mock.assert_async().await;
    assert_eq!(menu["name"], json!("ROOT"));
}

#[tokio::test]
async fn test_server_error_status_line() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/exchange/betting/rest/v1.0/listCurrentOrders/")
        .with_status(503)
        .create_async()
        .await;

    let mut client = client_for(&server.url(), "session-token");
    let err = client
        .call(Operation::ListCurrentOrders, json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Kind::Http);
    assert_eq!(client.last_error(), "503 Service Unavailable");
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let mut client = client_for("http://127.0.0.1:1", "session-token");

    let err = client
        .call(Operation::ListCurrentOrders, json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Kind::Transport);
    assert!(client.is_logged_in());
}

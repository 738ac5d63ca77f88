use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::tests::test_support::{capture_logs, drain_logs, expired_config};
use crate::{Error, PartSearchClient};

#[tokio::test]
async fn rejected_refresh_fails_before_any_search_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/v1/products/RLY-5VDC-SPDT"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let (lines, guard) = capture_logs();
    let client =
        PartSearchClient::new(expired_config(&server.uri())).expect("client should build");
    let outcome = client.product_details("RLY-5VDC-SPDT").await;
    drop(guard);

    match outcome {
        Err(Error::RefreshTokenInvalid(message)) => assert!(message.contains("invalid_grant")),
        other => panic!("expected RefreshTokenInvalid, got {other:?}"),
    }

    let requests = server.received_requests().await.expect("requests recorded");
    assert!(
        requests.iter().all(|r| r.url.path() == "/oauth2/token"),
        "no search request may go out with an expired token"
    );

    let logs = drain_logs(lines);
    assert!(
        logs.iter()
            .any(|line| line.contains("ERROR") && line.contains("refresh.failure")),
        "expected a refresh failure log, got: {:?}",
        logs
    );
}

pub(crate) mod refresh_invalid;

use super::*;

#[ignore]
#[tokio::test]
async fn live_keyword_search() {
    let client = PartSearchClient::from_location(ConfigLocation::Env)
        .await
        .expect("Failed to create client");
    let response = client
        .keyword_search(&KeywordSearchRequest {
            keywords: "relay".to_string(),
            record_count: 5,
        })
        .await
        .expect("Failed to run keyword search");
    assert!(!response.body.is_empty());
}

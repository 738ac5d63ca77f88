use partgrid_client::{BatchLookupRequest, ConfigLocation, KeywordSearchRequest, PartSearchClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Optional: enable basic logging for the demo
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // Load configuration from a JSON file placed next to the binary.
    // Rotated tokens are written back into the same file.
    let client = PartSearchClient::from_location(ConfigLocation::File("config.json".to_string()))
        .await?;

    let details = client.product_details("RLY-5VDC-SPDT").await?;
    println!("details: {}", details.body);

    let search = client
        .keyword_search(&KeywordSearchRequest {
            keywords: "5V relay".to_string(),
            record_count: 10,
        })
        .await?;
    println!("search: {}", search.body);
    if let Some(remaining) = search.rate_limit_remaining {
        println!("rate limit remaining: {remaining}");
    }

    let batch = client
        .batch_product_details(&BatchLookupRequest {
            part_numbers: vec!["RLY-5VDC-SPDT".to_string(), "CAP-100UF-25V".to_string()],
            exclude_marketplace: true,
        })
        .await?;
    println!("batch: {}", batch.body);

    let credentials = client.credentials().await;
    println!("token valid until {}", credentials.expires_at());
    Ok(())
}

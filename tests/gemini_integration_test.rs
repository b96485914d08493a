use legal_ai_rust::ai_provider::AiProvider;
use legal_ai_rust::analyzer::{self, AiClient};
use legal_ai_rust::config::Config;

const CONTRACT_TEXT: &str = "This Lease Agreement is made on 05/03/2024 between Alpha Ltd (Landlord) \
and Beta LLC (Tenant). The Tenant shall pay rent monthly. Any breach of payment terms \
entitles the Landlord to terminate this lease with 30 days notice.";

#[tokio::test]
async fn gemini_analysis_integration() {
    let api_key = match std::env::var("GEMINI_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => {
            eprintln!("GEMINI_API_KEY not set; skipping integration test");
            return;
        }
    };

    let config = Config {
        api_key: Some(api_key),
        ..Default::default()
    };
    let client = AiClient::from_config(AiProvider::GeminiApi, &config).expect("client build failed");

    let analysis = analyzer::analyze_text(&client, CONTRACT_TEXT, config.max_document_chars)
        .await
        .expect("gemini api call failed");

    assert!(!analysis.summary.is_empty(), "summary missing");
    assert!(!analysis.document_type.is_empty(), "document type missing");
}

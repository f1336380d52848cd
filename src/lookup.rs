/// Person lookup workflow
///
/// Resolves one LinkedIn URL into one output record:
/// 1. Match the URL against Apollo
/// 2. Extract fields from the match
/// 3. If no verified mobile was found, try enrichment
/// 4. Fall back to the match data when enrichment fails
///
/// Every outcome, including failures, produces a complete record.
use crate::apollo_client::ApolloClient;
use crate::credits::CreditUsage;
use crate::extraction::extract_all;
use crate::models::{LookupResponse, LookupUsed, OutputRecord};

pub const EMPTY_URL_ERROR: &str = "Empty LinkedIn URL.";
pub const NO_MATCH_ERROR: &str = "No match found.";
pub const NO_ENRICHMENT_ERROR: &str = "No enrichment data returned.";

/// Looks up a single LinkedIn profile URL.
///
/// # Arguments
///
/// * `client` - Apollo API client.
/// * `linkedin_url` - The input cell; `None` when the cell was missing.
/// * `credits` - Credit accumulator for this run.
///
/// # Returns
///
/// * `OutputRecord` - Always returned; failures are described in `apollo_error`.
pub async fn lookup_person(
    client: &ApolloClient,
    linkedin_url: Option<&str>,
    credits: &mut CreditUsage,
) -> OutputRecord {
    let input = match linkedin_url {
        Some(url) if !url.is_empty() => url,
        other => {
            return OutputRecord::failed(other.map(String::from), EMPTY_URL_ERROR);
        }
    };

    // 1. Match
    let person = match client.match_by_linkedin(input, credits).await {
        LookupResponse::Person(person) => person,
        LookupResponse::NotFound => {
            tracing::info!("No Apollo match for {}", input);
            return OutputRecord::failed(Some(input.to_string()), NO_MATCH_ERROR);
        }
        LookupResponse::Failed(e) => {
            tracing::warn!("Apollo match failed for {} ({}): {}", input, e.status_code, e);
            return OutputRecord::failed(
                Some(input.to_string()),
                format!("MATCH API error: {}", e),
            );
        }
    };

    // 2. Extract from the match
    let mut extracted = extract_all(&person, credits);
    extracted.lookup_used = Some(LookupUsed::Match);

    // A verified mobile is what enrichment would be looking for
    if extracted.verified_mobile_phone.is_some() {
        tracing::debug!("Verified mobile found via match for {}", input);
        return extracted;
    }

    // 3. Enrich
    match client.enrich_person(&person, credits).await {
        LookupResponse::Person(enriched_person) => {
            let mut enriched = extract_all(&enriched_person, credits);
            enriched.lookup_used = Some(LookupUsed::Enrich);
            enriched.input_linkedin_url = Some(input.to_string());
            enriched
        }
        LookupResponse::NotFound => {
            tracing::info!("Enrichment returned no data for {}", input);
            extracted.lookup_used = Some(LookupUsed::Enrich);
            extracted.apollo_error = Some(NO_ENRICHMENT_ERROR.to_string());
            extracted
        }
        LookupResponse::Failed(e) => {
            // 4. Keep what the match already gave us
            tracing::warn!("Apollo enrich failed for {} ({}): {}", input, e.status_code, e);
            extracted.lookup_used = Some(LookupUsed::Enrich);
            extracted.apollo_error = Some(format!("Enrich error: {}", e));
            extracted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn offline_client() -> ApolloClient {
        ApolloClient::new(&Config {
            api_key: "test_key".to_string(),
            base_url: "http://127.0.0.1:9".to_string(),
            rate_limit_delay_ms: 0,
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_url_short_circuits() {
        let client = offline_client();
        let mut credits = CreditUsage::new();

        let record = lookup_person(&client, None, &mut credits).await;
        assert_eq!(record, OutputRecord::failed(None, EMPTY_URL_ERROR));
        assert_eq!(credits.match_credits, 0);
    }

    #[tokio::test]
    async fn test_empty_url_passes_through() {
        let client = offline_client();
        let mut credits = CreditUsage::new();

        let record = lookup_person(&client, Some(""), &mut credits).await;
        assert_eq!(record.input_linkedin_url.as_deref(), Some(""));
        assert_eq!(record.apollo_error.as_deref(), Some(EMPTY_URL_ERROR));
        assert_eq!(credits.total(), 0);
    }

    #[tokio::test]
    async fn test_whitespace_url_still_goes_to_match() {
        let client = offline_client();
        let mut credits = CreditUsage::new();

        let record = lookup_person(&client, Some("   "), &mut credits).await;
        assert_eq!(record.input_linkedin_url.as_deref(), Some("   "));
        assert!(record
            .apollo_error
            .unwrap()
            .starts_with("MATCH API error: "));
        assert_eq!(credits.match_credits, 1);
    }
}

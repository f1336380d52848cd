use crate::config::Config;
use crate::credits::CreditUsage;
use crate::errors::{AppError, ApiError};
use crate::models::{EnrichRequest, LookupResponse, MatchPerson, MatchRequest, PersonRecord};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

pub const MATCH_ENDPOINT: &str = "people/match";
pub const ENRICH_ENDPOINT: &str = "people/enrich";

/// Client for the Apollo people API.
///
/// Every call waits a fixed delay first; there is no retry and no adaptive
/// throttling.
#[derive(Clone)]
pub struct ApolloClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    rate_limit_delay: Duration,
}

impl ApolloClient {
    /// Creates a new `ApolloClient`.
    ///
    /// # Arguments
    ///
    /// * `config` - Loaded configuration; supplies key, base URL, delay and timeout.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Config("Apollo API key required.".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create Apollo client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            rate_limit_delay: config.rate_limit_delay(),
        })
    }

    /// Sends a POST request to an Apollo endpoint.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Path relative to the base URL, e.g. `people/match`.
    /// * `payload` - JSON request body.
    ///
    /// # Returns
    ///
    /// * `Result<Value, ApiError>` - The decoded body, or the failure with its
    ///   HTTP status (500 when there was none).
    pub async fn post<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Value, ApiError> {
        let endpoint = endpoint.trim_start_matches('/');
        if endpoint.is_empty() {
            return Err(ApiError::new("Endpoint path cannot be empty", None));
        }
        let url = format!("{}/{}", self.base_url, endpoint);

        tokio::time::sleep(self.rate_limit_delay).await;

        tracing::debug!("POST {} (X-Api-Key: [REDACTED])", url);

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .header("Cache-Control", "no-cache")
            .json(payload)
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;

        if let Some(error) = body.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let status = body
                .get("status_code")
                .and_then(Value::as_u64)
                .and_then(|s| u16::try_from(s).ok());
            return Err(ApiError::new(message, status));
        }

        Ok(body)
    }

    /// Resolves a LinkedIn profile URL to a person (step 1).
    pub async fn match_by_linkedin(
        &self,
        linkedin_url: &str,
        credits: &mut CreditUsage,
    ) -> LookupResponse {
        let payload = MatchRequest {
            person: MatchPerson {
                linkedin_url: linkedin_url.trim().to_string(),
            },
        };

        credits.record_match();
        classify(self.post(MATCH_ENDPOINT, &payload).await)
    }

    /// Asks the enrichment endpoint for more contact data on a matched person (step 2).
    pub async fn enrich_person(
        &self,
        person: &PersonRecord,
        credits: &mut CreditUsage,
    ) -> LookupResponse {
        let payload = EnrichRequest::from_person(person);

        credits.record_enrich();
        classify(self.post(ENRICH_ENDPOINT, &payload).await)
    }
}

/// Maps a raw response onto a [`LookupResponse`].
///
/// A missing, `null` or empty `person` value means nothing was found.
fn classify(result: Result<Value, ApiError>) -> LookupResponse {
    let mut body = match result {
        Ok(body) => body,
        Err(e) => return LookupResponse::Failed(e),
    };

    let person = match body.get_mut("person").map(Value::take) {
        Some(Value::Object(map)) if !map.is_empty() => Value::Object(map),
        _ => return LookupResponse::NotFound,
    };

    match serde_json::from_value::<PersonRecord>(person) {
        Ok(person) => LookupResponse::Person(Box::new(person)),
        Err(e) => LookupResponse::Failed(ApiError::new(
            format!("Failed to parse person record: {}", e),
            None,
        )),
    }
}

//! DaData adapter (company lookups by INN).
//!
//! Implements the `innbot-core` RegistryPort over the DaData
//! `findById/party` suggestions endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use innbot_core::{domain::CompanyInfo, errors::Error, ports::RegistryPort, Result};

const LOOKUP_URL: &str = "https://suggestions.dadata.ru/suggestions/api/4_1/rs/findById/party";

#[derive(Clone, Debug)]
pub struct DadataClient {
    api_token: String,
    http: reqwest::Client,
}

impl DadataClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        // Per-call timeout bounds each lookup so one hung request cannot
        // stall a whole batch.
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .expect("reqwest client build");
        Self {
            api_token: api_token.into(),
            http,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    #[serde(default)]
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, Deserialize)]
struct Suggestion {
    #[serde(default)]
    data: PartyData,
}

#[derive(Debug, Default, Deserialize)]
struct PartyData {
    name: Option<PartyName>,
    address: Option<PartyAddress>,
}

#[derive(Debug, Deserialize)]
struct PartyName {
    full_with_opf: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PartyAddress {
    value: Option<String>,
}

/// First suggestion mapped to a company record, with the original bot's
/// fallback labels for absent name/address fields. No suggestions means the
/// registry knows no such company.
fn company_from_response(resp: SuggestResponse, inn: &str) -> Option<CompanyInfo> {
    let first = resp.suggestions.into_iter().next()?;

    let name = first
        .data
        .name
        .and_then(|n| n.full_with_opf)
        .unwrap_or_else(|| format!("Без названия ({inn})"));
    let address = first
        .data
        .address
        .and_then(|a| a.value)
        .unwrap_or_else(|| "Адрес не найден".to_string());

    Some(CompanyInfo { name, address })
}

#[async_trait]
impl RegistryPort for DadataClient {
    async fn find_party(&self, inn: &str) -> Result<Option<CompanyInfo>> {
        let resp = self
            .http
            .post(LOOKUP_URL)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.api_token),
            )
            .json(&serde_json::json!({ "query": inn }))
            .send()
            .await
            .map_err(|e| Error::Registry(format!("dadata request error: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Registry(format!(
                "dadata lookup failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let parsed: SuggestResponse = resp
            .json()
            .await
            .map_err(|e| Error::Registry(format!("dadata json error: {e}")))?;

        Ok(company_from_response(parsed, inn))
    }
}

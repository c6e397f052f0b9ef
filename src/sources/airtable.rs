use crate::config::AirtableSettings;
use crate::models::{Listing, Source};
use crate::sources::traits::ListingSource;
use crate::sources::types::ListingQuery;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Largest page the list-records endpoint returns
const MAX_PAGE_SIZE: u32 = 100;

/// One page of the list-records response
#[derive(Debug, Deserialize)]
pub struct RecordPage {
    #[serde(default)]
    pub records: Vec<Record>,
    pub offset: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub id: String,
    pub created_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl From<Record> for Listing {
    fn from(record: Record) -> Self {
        Listing {
            id: record.id,
            source: Source::Airtable,
            fields: record.fields,
            created_time: record.created_time,
        }
    }
}

/// Reads listings from an Airtable table
pub struct AirtableSource {
    client: Client,
    settings: AirtableSettings,
}

impl AirtableSource {
    pub fn new(settings: AirtableSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(concat!("housing-filter/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, settings })
    }

    /// Endpoint of the table, with base and table names percent-encoded
    pub fn table_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.settings.base_url)
            .with_context(|| format!("Invalid Airtable base URL: {}", self.settings.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Airtable base URL cannot carry a path"))?
            .pop_if_empty()
            .push(&self.settings.base_id)
            .push(&self.settings.table);
        Ok(url)
    }

    /// Query-string pairs for one page request
    pub fn page_params(&self, query: &ListingQuery, offset: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![("filterByFormula", query.formula.to_string())];

        let page_size = query.page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        params.push(("pageSize", page_size.to_string()));

        if let Some(max) = query.record_limit() {
            params.push(("maxRecords", max.to_string()));
        }
        if let Some(view) = query.view.as_ref().or(self.settings.view.as_ref()) {
            params.push(("view", view.clone()));
        }
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }
        params
    }

    pub fn parse_page(body: &str) -> Result<RecordPage> {
        serde_json::from_str(body).context("Failed to parse Airtable response")
    }

    async fn fetch_page(&self, url: &Url, query: &ListingQuery, offset: Option<&str>) -> Result<RecordPage> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.settings.api_key)
            .query(&self.page_params(query, offset))
            .send()
            .await
            .context("Failed to reach Airtable")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Airtable returned status: {}", status);
            anyhow::bail!("Airtable request failed: {} {}", status, body);
        }

        let body = response.text().await.context("Failed to read response body")?;
        debug!("Downloaded {} bytes of records", body.len());
        Self::parse_page(&body)
    }
}

#[async_trait]
impl ListingSource for AirtableSource {
    async fn fetch(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        let url = self.table_url()?;
        info!(table = %self.settings.table, formula = %query.formula, "Querying Airtable");

        let mut listings: Vec<Listing> = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let page = self.fetch_page(&url, query, offset.as_deref()).await?;
            debug!("Received page of {} records", page.records.len());
            listings.extend(page.records.into_iter().map(Listing::from));

            let reached_max = query
                .record_limit()
                .is_some_and(|max| listings.len() >= max as usize);

            match page.offset {
                Some(next) if !reached_max => offset = Some(next),
                _ => break,
            }
        }

        if let Some(max) = query.record_limit() {
            listings.truncate(max as usize);
        }

        info!("Fetched {} listings from Airtable", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "Airtable"
    }
}

//! Payments provider client
//!
//! Only the customer search endpoint is used: members are the customers
//! carrying membership metadata.

use crate::config::StripeConfig;
use crate::http::{ensure_success, join_url, read_json, send};
use crate::ApiResult;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

/// Page size requested from the search endpoint (the provider's maximum)
const SEARCH_PAGE_SIZE: u32 = 100;

/// A payments-provider customer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Customer {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl Customer {
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or("")
    }

    /// Metadata value for `key`, or "" if absent
    pub fn meta(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Deserialize)]
struct SearchPage {
    data: Vec<Customer>,
    #[serde(default)]
    next_page: Option<String>,
}

/// Client for the payments provider's customer API
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: Client,
    api_base: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(http: Client, config: &StripeConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.clone(),
            secret_key: config.secret_key.clone(),
        }
    }

    /// Returns every customer matching `query`, following page tokens
    pub async fn search_customers(&self, query: &str) -> ApiResult<Vec<Customer>> {
        let url = join_url(&self.api_base, "v1/customers/search");
        let mut customers = Vec::new();
        let mut page: Option<String> = None;

        loop {
            let mut params = vec![
                ("query", query.to_string()),
                ("limit", SEARCH_PAGE_SIZE.to_string()),
            ];
            if let Some(token) = &page {
                params.push(("page", token.clone()));
            }

            let request = self
                .http
                .get(&url)
                .bearer_auth(&self.secret_key)
                .query(&params);
            let response = ensure_success(&url, send(&url, request).await?)?;
            let batch: SearchPage = read_json(&url, response).await?;

            tracing::debug!("Fetched {} customers", batch.data.len());
            customers.extend(batch.data);

            match batch.next_page.filter(|t| !t.is_empty()) {
                Some(token) => page = Some(token),
                None => break,
            }
        }

        Ok(customers)
    }
}

//! CRM client
//!
//! People are looked up by email. Custom fields arrive as an untyped list
//! keyed by numeric definition ids; they are resolved into
//! [`PersonField`]/[`FieldValue`] pairs here so nothing downstream handles
//! untyped values.

mod types;

pub use types::{Address, CrmPerson, FieldKind, FieldValue, PersonField};

use crate::config::CopperConfig;
use crate::http::{ensure_success, join_url, read_json, send};
use crate::{ApiError, ApiResult};
use reqwest::Client;
use serde::Serialize;
use types::RawPerson;

#[derive(Debug, Serialize)]
struct EmailLookup<'a> {
    email: &'a str,
}

/// Client for the CRM's developer API
#[derive(Debug, Clone)]
pub struct CopperClient {
    http: Client,
    api_base: String,
    api_key: String,
    user_email: String,
}

impl CopperClient {
    pub fn new(http: Client, config: &CopperConfig) -> Self {
        Self {
            http,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            user_email: config.user_email.clone(),
        }
    }

    /// Looks up a person by email address (case-insensitive)
    pub async fn find_person_by_email(&self, email: &str) -> ApiResult<CrmPerson> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ApiError::InvalidRequest("search email was empty".to_string()));
        }

        let url = join_url(&self.api_base, "people/fetch_by_email");
        let request = self
            .http
            .post(&url)
            .header("X-PW-AccessToken", &self.api_key)
            .header("X-PW-UserEmail", &self.user_email)
            .header("X-PW-Application", "developer_api")
            .json(&EmailLookup { email: &email });

        let response = ensure_success(&url, send(&url, request).await?)?;
        let raw: RawPerson = read_json(&url, response).await?;
        Ok(raw.into())
    }
}

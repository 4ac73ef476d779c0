use crate::config::{Config, MembersConfig};
use crate::copper::{CopperClient, CrmPerson};
use crate::members::{current_membership, MemberRecord, MemberTally};
use crate::stripe::{Customer, StripeClient};
use crate::{ConfigError, Result};
use chrono::{DateTime, Utc};
use reqwest::Client;

/// Exports current members from the payments provider, merged with CRM data
pub struct MemberExport {
    stripe: StripeClient,
    copper: CopperClient,
    query: String,
    members: MembersConfig,
}

impl MemberExport {
    /// Fails with `ConfigError::MissingSection` unless both the `[stripe]`
    /// and `[copper]` sections are configured
    pub fn new(http: Client, config: &Config) -> std::result::Result<Self, ConfigError> {
        let stripe = config
            .stripe
            .as_ref()
            .ok_or(ConfigError::MissingSection("stripe"))?;
        let copper = config
            .copper
            .as_ref()
            .ok_or(ConfigError::MissingSection("copper"))?;

        Ok(Self {
            stripe: StripeClient::new(http.clone(), stripe),
            copper: CopperClient::new(http, copper),
            query: stripe.membership_query.clone(),
            members: config.members.clone(),
        })
    }

    /// Collects a row for every customer whose membership is current at `now`
    pub async fn run(&self, now: DateTime<Utc>) -> Result<(Vec<MemberRecord>, MemberTally)> {
        let customers = self.stripe.search_customers(&self.query).await?;
        tracing::info!("Found {} customers with membership data", customers.len());

        let mut records = Vec::new();
        let mut tally = MemberTally::default();

        for customer in &customers {
            let kind = match current_membership(customer, now) {
                Some(kind) => kind,
                None => continue,
            };

            let person = self.lookup_person(customer).await;
            records.push(MemberRecord::merge(&person, customer, &self.members));
            tally.record(kind);
        }

        tracing::info!(
            "Exporting {} members: {} lifetime, {} one-year, {} two-year, {} complimentary",
            tally.total(),
            tally.lifetime,
            tally.one_year,
            tally.two_year,
            tally.complimentary
        );
        Ok((records, tally))
    }

    /// CRM record for the customer's email; empty if the lookup fails
    async fn lookup_person(&self, customer: &Customer) -> CrmPerson {
        match self.copper.find_person_by_email(customer.email()).await {
            Ok(person) => person,
            Err(e) => {
                tracing::warn!("No CRM record for customer {}: {}", customer.id, e);
                CrmPerson::default()
            }
        }
    }
}

//! Member records for the membership export
//!
//! A member row merges a payments-provider customer (membership metadata,
//! billing name and email) with the matching CRM person (names, contact
//! details, tags, code-hosting username).

mod dates;

pub use dates::{parse_member_date, DateParseError};

use crate::config::MembersConfig;
use crate::copper::CrmPerson;
use crate::stripe::Customer;
use chrono::{DateTime, Duration, Utc};

/// Customer metadata keys carrying membership data
pub const META_MEMBERSHIP_TYPE: &str = "membership_type";
pub const META_MEMBERSHIP_START: &str = "membership_start";
pub const META_MEMBERSHIP_END: &str = "membership_end";
pub const META_MEMBERSHIP_RECURRING: &str = "membership_recurring";

/// Kinds of membership that are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipKind {
    Lifetime,
    OneYear,
    TwoYear,
    Complimentary,
}

impl MembershipKind {
    /// Classifies a `membership_type` metadata value
    ///
    /// Matching is by substring on the trimmed, lower-cased value, checked in
    /// the order lifetime, one, two, complimentary.
    pub fn from_metadata(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        if value.contains("lifetime") {
            Some(Self::Lifetime)
        } else if value.contains("one") {
            Some(Self::OneYear)
        } else if value.contains("two") {
            Some(Self::TwoYear)
        } else if value.contains("complimentary") {
            Some(Self::Complimentary)
        } else {
            None
        }
    }

    /// True if this kind never expires
    pub fn is_lifetime(self) -> bool {
        matches!(self, Self::Lifetime)
    }
}

/// Running counts of exported members per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemberTally {
    pub lifetime: u64,
    pub one_year: u64,
    pub two_year: u64,
    pub complimentary: u64,
}

impl MemberTally {
    pub fn record(&mut self, kind: MembershipKind) {
        match kind {
            MembershipKind::Lifetime => self.lifetime += 1,
            MembershipKind::OneYear => self.one_year += 1,
            MembershipKind::TwoYear => self.two_year += 1,
            MembershipKind::Complimentary => self.complimentary += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.lifetime + self.one_year + self.two_year + self.complimentary
    }
}

/// Decides whether a customer is a current member
///
/// Lifetime members always are. Other kinds need a parseable
/// `membership_end` later than one day before `now`.
pub fn current_membership(customer: &Customer, now: DateTime<Utc>) -> Option<MembershipKind> {
    let kind = MembershipKind::from_metadata(customer.metadata.get(META_MEMBERSHIP_TYPE)?)?;
    if kind.is_lifetime() {
        return Some(kind);
    }

    let raw_end = customer.meta(META_MEMBERSHIP_END);
    match parse_member_date(raw_end) {
        Ok(end) if end > now - Duration::days(1) => Some(kind),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Customer {} has no usable membership end: {}", customer.id, e);
            None
        }
    }
}

/// One row of the member report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberRecord {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub membership_type: String,
    pub membership_start: String,
    pub membership_end: String,
    pub membership_recurring: String,
    pub github_id: String,
    pub tags: Vec<String>,
}

impl MemberRecord {
    /// Merges a CRM person and a payments customer into a member row
    pub fn merge(person: &CrmPerson, customer: &Customer, config: &MembersConfig) -> Self {
        let (first_name, last_name) = merge_names(person, customer.name());
        let address = &person.address;
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        Self {
            first_name,
            last_name,
            emails: merge_emails(person, customer, config),
            phone_numbers: person.phone_numbers.clone(),
            street_address: text(&address.street),
            city: text(&address.city),
            state: text(&address.state),
            country: text(&address.country),
            postal_code: text(&address.postal_code),
            membership_type: customer.meta(META_MEMBERSHIP_TYPE).to_string(),
            membership_start: customer.meta(META_MEMBERSHIP_START).to_string(),
            membership_end: customer.meta(META_MEMBERSHIP_END).to_string(),
            membership_recurring: customer.meta(META_MEMBERSHIP_RECURRING).to_string(),
            github_id: person.github_username().unwrap_or_default(),
            tags: person.tags.clone(),
        }
    }
}

/// CRM names win; gaps are filled from the billing name
///
/// Without a CRM first name both names come from the billing name (first
/// word, then the rest). With only the last name missing, it is the billing
/// name minus its first word.
fn merge_names(person: &CrmPerson, billing_name: &str) -> (String, String) {
    let first = person.first_name.trim();
    let last = person.last_name.trim();

    let mut words = billing_name.split_whitespace();
    let billing_first = words.next().unwrap_or("");
    let billing_rest = words.collect::<Vec<_>>().join(" ");

    if first.is_empty() {
        (billing_first.to_string(), billing_rest)
    } else if last.is_empty() {
        (first.to_string(), billing_rest)
    } else {
        (first.to_string(), last.to_string())
    }
}

/// Orders the member's addresses: organization address, other CRM
/// addresses, then the billing address if not already listed
fn merge_emails(person: &CrmPerson, customer: &Customer, config: &MembersConfig) -> Vec<String> {
    let org_suffix = format!("@{}", config.org_email_domain.to_lowercase());

    let org_email = person
        .emails
        .iter()
        .find(|e| e.to_lowercase().contains(&org_suffix))
        .cloned()
        .or_else(|| {
            let meta = customer.meta(&config.org_email_metadata_key).trim();
            (!meta.is_empty()).then(|| meta.to_string())
        });

    let mut emails: Vec<String> = Vec::new();
    if let Some(org) = &org_email {
        emails.push(org.clone());
    }
    for email in &person.emails {
        if Some(email) != org_email.as_ref() && !emails.contains(email) {
            emails.push(email.clone());
        }
    }

    let billing = customer.email().trim();
    if !billing.is_empty() && !emails.iter().any(|e| e.eq_ignore_ascii_case(billing)) {
        emails.push(billing.to_string());
    }

    emails
}

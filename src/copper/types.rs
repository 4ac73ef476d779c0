use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;

/// Custom person fields the audit knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonField {
    Membership,
    MembershipStart,
    MembershipEnd,
    GithubUsername,
    SignedLeaderAgreement,
    ExternalId,
    StripeNumber,
}

/// Shape of a custom field's value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
    Dropdown,
    Checkbox,
}

impl PersonField {
    const ALL: [PersonField; 7] = [
        PersonField::Membership,
        PersonField::MembershipStart,
        PersonField::MembershipEnd,
        PersonField::GithubUsername,
        PersonField::SignedLeaderAgreement,
        PersonField::ExternalId,
        PersonField::StripeNumber,
    ];

    /// CRM custom field definition id
    pub fn definition_id(self) -> i64 {
        match self {
            Self::Membership => 394882,
            Self::MembershipStart => 394883,
            Self::MembershipEnd => 394884,
            Self::GithubUsername => 395220,
            Self::SignedLeaderAgreement => 448262,
            Self::ExternalId => 400845,
            Self::StripeNumber => 440584,
        }
    }

    pub fn from_definition_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.definition_id() == id)
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Membership => FieldKind::Dropdown,
            Self::MembershipStart | Self::MembershipEnd => FieldKind::Date,
            Self::SignedLeaderAgreement => FieldKind::Checkbox,
            Self::GithubUsername | Self::ExternalId | Self::StripeNumber => FieldKind::Text,
        }
    }
}

/// A typed custom field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Date(DateTime<Utc>),
    /// Selected dropdown option id
    Choice(i64),
    Flag(bool),
    Number(f64),
}

impl FieldValue {
    /// Resolves a raw JSON value for `field`; `None` for null or unsupported shapes
    pub fn resolve(field: PersonField, raw: &serde_json::Value) -> Option<Self> {
        use serde_json::Value;

        match raw {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Flag(*b)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Number(n) => match field.kind() {
                FieldKind::Date => n
                    .as_i64()
                    .and_then(|secs| DateTime::from_timestamp(secs, 0))
                    .map(Self::Date),
                FieldKind::Dropdown => n.as_i64().map(Self::Choice),
                FieldKind::Checkbox | FieldKind::Text => n.as_f64().map(Self::Number),
            },
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Choice(id) => write!(f, "{}", id),
            Self::Flag(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Postal address of a CRM person
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// A CRM person with custom fields resolved into typed values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrmPerson {
    pub first_name: String,
    pub last_name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub address: Address,
    pub tags: Vec<String>,
    pub fields: HashMap<PersonField, FieldValue>,
}

impl CrmPerson {
    pub fn field(&self, field: PersonField) -> Option<&FieldValue> {
        self.fields.get(&field)
    }

    /// The person's code-hosting username, if recorded as non-blank text
    pub fn github_username(&self) -> Option<String> {
        self.field(PersonField::GithubUsername)
            .and_then(FieldValue::as_text)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
    }
}

/// Person record as sent by the CRM
#[derive(Debug, Deserialize)]
pub(crate) struct RawPerson {
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    address: Option<Address>,
    #[serde(default)]
    emails: Vec<RawEmail>,
    #[serde(default)]
    phone_numbers: Vec<RawPhone>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    custom_fields: Vec<RawCustomField>,
}

#[derive(Debug, Deserialize)]
struct RawEmail {
    email: String,
}

#[derive(Debug, Deserialize)]
struct RawPhone {
    number: String,
}

#[derive(Debug, Deserialize)]
struct RawCustomField {
    custom_field_definition_id: i64,
    #[serde(default)]
    value: serde_json::Value,
}

impl From<RawPerson> for CrmPerson {
    fn from(raw: RawPerson) -> Self {
        let fields = raw
            .custom_fields
            .iter()
            .filter_map(|cf| {
                let field = PersonField::from_definition_id(cf.custom_field_definition_id)?;
                let value = FieldValue::resolve(field, &cf.value)?;
                Some((field, value))
            })
            .collect();

        Self {
            first_name: raw.first_name.unwrap_or_default(),
            last_name: raw.last_name.unwrap_or_default(),
            emails: raw.emails.into_iter().map(|e| e.email).collect(),
            phone_numbers: raw.phone_numbers.into_iter().map(|p| p.number).collect(),
            address: raw.address.unwrap_or_default(),
            tags: raw.tags,
            fields,
        }
    }
}

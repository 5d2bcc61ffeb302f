use crate::filter::{Filter, FilterParam, FilterParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single resource as carried in the `data` member of a JSON:API envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource<A> {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(default)]
    pub version: i64,
    pub attributes: A,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
}

/// Navigation links returned alongside a list page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub first: Option<String>,
    pub last: Option<String>,
    pub next: Option<String>,
    #[serde(rename = "self")]
    pub self_link: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope<A> {
    #[serde(
        default = "Vec::new",
        deserialize_with = "deserialize_null_as_empty",
        bound(deserialize = "A: Deserialize<'de>")
    )]
    pub data: Vec<Resource<A>>,
    #[serde(default)]
    pub links: Option<Links>,
}

/// An empty collection may come back as `"data": null`.
fn deserialize_null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let raw: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

/// Body of a create request: identity chosen by the client, no version yet.
#[derive(Debug, Serialize)]
pub(crate) struct NewResource<'a, A> {
    #[serde(rename = "type")]
    pub kind: &'a str,
    pub id: Uuid,
    pub organisation_id: Uuid,
    pub attributes: &'a A,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error_message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bic: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_classification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joint_account: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_matching_opt_out: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_identification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub switched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_identification: Option<PrivateIdentification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisation_identification: Option<OrganisationIdentification>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateIdentification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganisationIdentification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<Actor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residency: Option<String>,
}

/// Account attributes the list endpoint can filter on.
///
/// `None` leaves a field out of the query; `Some(false)` and `Some("")`
/// are sent as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub country: Option<String>,
    pub base_currency: Option<String>,
    pub account_number: Option<String>,
    pub bank_id: Option<String>,
    pub bank_id_code: Option<String>,
    pub bic: Option<String>,
    pub iban: Option<String>,
    pub account_classification: Option<String>,
    pub joint_account: Option<bool>,
    pub account_matching_opt_out: Option<bool>,
    pub secondary_identification: Option<String>,
    pub customer_id: Option<String>,
}

impl FilterParams for AccountFilter {
    fn filter_params(&self) -> Vec<FilterParam> {
        Filter::new()
            .param_opt("country", self.country.as_deref())
            .param_opt("base_currency", self.base_currency.as_deref())
            .param_opt("account_number", self.account_number.as_deref())
            .param_opt("bank_id", self.bank_id.as_deref())
            .param_opt("bank_id_code", self.bank_id_code.as_deref())
            .param_opt("bic", self.bic.as_deref())
            .param_opt("iban", self.iban.as_deref())
            .param_opt("account_classification", self.account_classification.as_deref())
            .param_opt("joint_account", self.joint_account)
            .param_opt("account_matching_opt_out", self.account_matching_opt_out)
            .param_opt("secondary_identification", self.secondary_identification.as_deref())
            .param_opt("customer_id", self.customer_id.as_deref())
            .filter_params()
    }
}

use crate::errors::{AppError, ApiError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============ Vendor Models ============

/// A person record as returned by the `people/match` and `people/enrich`
/// endpoints.
///
/// Only the fields the extractor reads are modelled; everything else in the
/// vendor payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    /// Vendor person identifier.
    pub id: Option<String>,
    /// Canonical LinkedIn profile URL known to the vendor.
    pub linkedin_url: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Current job title.
    pub title: Option<String>,
    /// Candidate email addresses, in vendor order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<EmailCandidate>,
    /// Candidate phone numbers, in vendor order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<PhoneCandidate>,
    /// Current employer.
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization: Organization,
}

/// Employer sub-record of a [`PersonRecord`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub name: Option<String>,
    pub website_url: Option<String>,
    pub industry: Option<String>,
}

/// An email address candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailCandidate {
    pub email: Option<String>,
    /// Verification status, e.g. "verified" or "unverified".
    pub status: Option<String>,
    /// Address kind, e.g. "work", "personal" or "email".
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

/// A phone number candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneCandidate {
    /// Number as displayed by the vendor.
    pub number: Option<String>,
    /// Number normalized by the vendor (E.164).
    pub sanitized_number: Option<String>,
    /// Line kind, e.g. "mobile" or "work".
    pub label: Option<String>,
    pub status: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request body for `people/match`.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRequest {
    pub person: MatchPerson,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchPerson {
    pub linkedin_url: String,
}

/// Request body for `people/enrich`. Absent values are sent as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichRequest {
    pub linkedin_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub organization_name: Option<String>,
}

impl EnrichRequest {
    pub fn from_person(person: &PersonRecord) -> Self {
        Self {
            linkedin_url: person.linkedin_url.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            organization_name: person.organization.name.clone(),
        }
    }
}

/// Outcome of a single vendor lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupResponse {
    /// The vendor returned a person payload.
    Person(Box<PersonRecord>),
    /// The call succeeded but carried no person.
    NotFound,
    /// Transport, HTTP or vendor-level failure.
    Failed(ApiError),
}

// ============ Output Models ============

/// Column order of every output file. Load-bearing for CSV consumers.
pub const OUTPUT_FIELDNAMES: [&str; 13] = [
    "input_linkedin_url",
    "first_name",
    "last_name",
    "job_title",
    "company_name",
    "company_website",
    "industry",
    "verified_email",
    "verified_mobile_phone",
    "linkedin_url",
    "apollo_person_id",
    "lookup_used",
    "apollo_error",
];

/// Which vendor step produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupUsed {
    Match,
    Enrich,
}

impl LookupUsed {
    pub fn as_str(&self) -> &'static str {
        match self {
            LookupUsed::Match => "match",
            LookupUsed::Enrich => "enrich",
        }
    }
}

/// One output row.
///
/// Field declaration order mirrors [`OUTPUT_FIELDNAMES`], so serde emits JSON
/// objects in schema order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub input_linkedin_url: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub job_title: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub industry: Option<String>,
    pub verified_email: Option<String>,
    pub verified_mobile_phone: Option<String>,
    pub linkedin_url: Option<String>,
    pub apollo_person_id: Option<String>,
    pub lookup_used: Option<LookupUsed>,
    pub apollo_error: Option<String>,
}

impl OutputRecord {
    /// All-null record carrying only the input URL and an error message.
    pub fn failed(input_linkedin_url: Option<String>, error: impl Into<String>) -> Self {
        Self {
            input_linkedin_url,
            apollo_error: Some(error.into()),
            ..Default::default()
        }
    }

    /// Field values in [`OUTPUT_FIELDNAMES`] order.
    pub fn fields(&self) -> [Option<&str>; 13] {
        [
            self.input_linkedin_url.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.job_title.as_deref(),
            self.company_name.as_deref(),
            self.company_website.as_deref(),
            self.industry.as_deref(),
            self.verified_email.as_deref(),
            self.verified_mobile_phone.as_deref(),
            self.linkedin_url.as_deref(),
            self.apollo_person_id.as_deref(),
            self.lookup_used.as_ref().map(LookupUsed::as_str),
            self.apollo_error.as_deref(),
        ]
    }
}

/// Supported output file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

//! Field extraction from vendor person records.
//!
//! Flattens a [`PersonRecord`] into an [`OutputRecord`] and picks the verified
//! contact details. Nothing here touches the network; the only side effect is
//! bumping the email/mobile credit counters when a contact is selected.

use crate::credits::CreditUsage;
use crate::models::{OutputRecord, PersonRecord};

const VERIFIED: &str = "verified";
const EMAIL_TYPES: [&str; 2] = ["work", "email"];
const MOBILE_LABEL: &str = "mobile";

/// Maps a person onto an output record.
///
/// `lookup_used` and `apollo_error` are left unset for the caller.
pub fn extract_all(person: &PersonRecord, credits: &mut CreditUsage) -> OutputRecord {
    let org = &person.organization;

    OutputRecord {
        input_linkedin_url: person.linkedin_url.clone(),
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        job_title: person.title.clone(),
        company_name: org.name.clone(),
        company_website: org.website_url.clone(),
        industry: org.industry.clone(),
        verified_email: extract_verified_email(person, credits),
        verified_mobile_phone: extract_verified_mobile(person, credits),
        linkedin_url: person.linkedin_url.clone(),
        apollo_person_id: person.id.clone(),
        lookup_used: None,
        apollo_error: None,
    }
}

/// First email whose status is "verified" and whose type is "work" or "email".
///
/// First match in vendor order wins, even if a later candidate looks better.
pub fn extract_verified_email(person: &PersonRecord, credits: &mut CreditUsage) -> Option<String> {
    let candidate = person.emails.iter().find(|e| {
        e.status.as_deref() == Some(VERIFIED)
            && e.type_
                .as_deref()
                .is_some_and(|t| EMAIL_TYPES.contains(&t))
    })?;

    credits.record_email();
    candidate.email.clone()
}

/// First phone labelled "mobile" with status "verified".
///
/// Returns the sanitized number when the vendor supplied a non-empty one,
/// otherwise the raw number.
pub fn extract_verified_mobile(person: &PersonRecord, credits: &mut CreditUsage) -> Option<String> {
    let candidate = person.phone_numbers.iter().find(|p| {
        p.label.as_deref() == Some(MOBILE_LABEL) && p.status.as_deref() == Some(VERIFIED)
    })?;

    credits.record_mobile();
    candidate
        .sanitized_number
        .clone()
        .filter(|n| !n.is_empty())
        .or_else(|| candidate.number.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmailCandidate, Organization, PhoneCandidate};

    fn email(address: &str, status: &str, type_: &str) -> EmailCandidate {
        EmailCandidate {
            email: Some(address.to_string()),
            status: Some(status.to_string()),
            type_: Some(type_.to_string()),
        }
    }

    fn phone(number: &str, sanitized: Option<&str>, label: &str, status: &str) -> PhoneCandidate {
        PhoneCandidate {
            number: Some(number.to_string()),
            sanitized_number: sanitized.map(String::from),
            label: Some(label.to_string()),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn test_email_first_match_in_list_order() {
        let person = PersonRecord {
            emails: vec![
                email("a@corp.com", "unverified", "work"),
                email("b@home.com", "verified", "personal"),
                email("c@corp.com", "verified", "work"),
                email("d@corp.com", "verified", "email"),
            ],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();

        assert_eq!(
            extract_verified_email(&person, &mut credits).as_deref(),
            Some("c@corp.com")
        );
        assert_eq!(credits.email_credits, 1);
    }

    #[test]
    fn test_email_type_email_accepted() {
        let person = PersonRecord {
            emails: vec![email("x@corp.com", "verified", "email")],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();
        assert_eq!(
            extract_verified_email(&person, &mut credits).as_deref(),
            Some("x@corp.com")
        );
    }

    #[test]
    fn test_no_verified_email_spends_nothing() {
        let person = PersonRecord {
            emails: vec![email("b@home.com", "verified", "personal")],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();
        assert_eq!(extract_verified_email(&person, &mut credits), None);
        assert_eq!(credits.email_credits, 0);
    }

    #[test]
    fn test_mobile_prefers_sanitized_number() {
        let person = PersonRecord {
            phone_numbers: vec![
                phone("(555) 000-1111", Some("+15550001111"), "work", "verified"),
                phone("(555) 123-4567", Some("+15551234567"), "mobile", "verified"),
            ],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();
        assert_eq!(
            extract_verified_mobile(&person, &mut credits).as_deref(),
            Some("+15551234567")
        );
        assert_eq!(credits.mobile_credits, 1);
    }

    #[test]
    fn test_mobile_falls_back_to_raw_number() {
        let person = PersonRecord {
            phone_numbers: vec![
                phone("555-1", None, "mobile", "verified"),
                phone("555-2", Some(""), "mobile", "verified"),
            ],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();
        assert_eq!(
            extract_verified_mobile(&person, &mut credits).as_deref(),
            Some("555-1")
        );

        let person = PersonRecord {
            phone_numbers: vec![phone("555-2", Some(""), "mobile", "verified")],
            ..Default::default()
        };
        assert_eq!(
            extract_verified_mobile(&person, &mut credits).as_deref(),
            Some("555-2")
        );
    }

    #[test]
    fn test_unverified_mobile_ignored() {
        let person = PersonRecord {
            phone_numbers: vec![phone("555-1", Some("+1555"), "mobile", "unverified")],
            ..Default::default()
        };
        let mut credits = CreditUsage::new();
        assert_eq!(extract_verified_mobile(&person, &mut credits), None);
        assert_eq!(credits.mobile_credits, 0);
    }

    #[test]
    fn test_extract_all_maps_every_field() {
        let person = PersonRecord {
            id: Some("p-42".to_string()),
            linkedin_url: Some("http://www.linkedin.com/in/ada".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            title: Some("Engineer".to_string()),
            emails: vec![email("ada@engine.io", "verified", "work")],
            phone_numbers: vec![phone("1", Some("+1"), "mobile", "verified")],
            organization: Organization {
                name: Some("Analytical Engines".to_string()),
                website_url: Some("http://engine.io".to_string()),
                industry: Some("computing".to_string()),
            },
        };
        let mut credits = CreditUsage::new();
        let record = extract_all(&person, &mut credits);

        assert_eq!(
            record.input_linkedin_url.as_deref(),
            Some("http://www.linkedin.com/in/ada")
        );
        assert_eq!(record.linkedin_url, record.input_linkedin_url);
        assert_eq!(record.job_title.as_deref(), Some("Engineer"));
        assert_eq!(record.company_name.as_deref(), Some("Analytical Engines"));
        assert_eq!(record.company_website.as_deref(), Some("http://engine.io"));
        assert_eq!(record.industry.as_deref(), Some("computing"));
        assert_eq!(record.verified_email.as_deref(), Some("ada@engine.io"));
        assert_eq!(record.verified_mobile_phone.as_deref(), Some("+1"));
        assert_eq!(record.apollo_person_id.as_deref(), Some("p-42"));
        assert_eq!(record.lookup_used, None);
        assert_eq!(record.apollo_error, None);
        assert_eq!(credits.email_credits, 1);
        assert_eq!(credits.mobile_credits, 1);
    }

    #[test]
    fn test_missing_organization_yields_null_company_fields() {
        let mut credits = CreditUsage::new();
        let record = extract_all(&PersonRecord::default(), &mut credits);
        assert_eq!(record, OutputRecord::default());
        assert_eq!(credits, CreditUsage::new());
    }
}

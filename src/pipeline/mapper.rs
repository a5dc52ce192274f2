use crate::extraction::ExtractedFields;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Initial status for every draft; extraction never marks a job as applied.
pub const STATUS_SAVED: &str = "Saved (Not Applied)";

/// An extraction result shaped like a persistable job-application entry but
/// not yet saved. Ownership moves to the caller's editor once produced; the
/// pipeline never persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDraftRecord {
    pub company_name: String,
    pub role: String,
    pub location: Option<String>,
    pub notes: String,
    pub date_applied: NaiveDate,
    pub status: String,
    pub link: String,
    pub platform_posted: String,
    pub referral_options: String,
    pub person_posted: String,
}

/// Maps extracted fields onto a draft record.
///
/// `notes` is filled from the extraction summary, `link` from the original
/// source URL (empty for the pasted-text path). Pure apart from the
/// current-date field.
pub fn map_to_draft(fields: ExtractedFields, source_link: &str) -> JobDraftRecord {
    JobDraftRecord {
        company_name: fields.company_name,
        role: fields.role,
        location: fields.location,
        notes: fields.summary,
        date_applied: Local::now().date_naive(),
        status: STATUS_SAVED.to_string(),
        link: source_link.to_string(),
        platform_posted: String::new(),
        referral_options: String::new(),
        person_posted: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> ExtractedFields {
        ExtractedFields {
            company_name: "Acme Corp".to_string(),
            role: "Senior Engineer".to_string(),
            location: Some("Remote".to_string()),
            summary: "Build distributed systems.".to_string(),
        }
    }

    #[test]
    fn test_draft_shape() {
        let draft = map_to_draft(sample_fields(), "https://example.com/job/42");

        assert_eq!(draft.company_name, "Acme Corp");
        assert_eq!(draft.role, "Senior Engineer");
        assert_eq!(draft.location.as_deref(), Some("Remote"));
        assert_eq!(draft.notes, "Build distributed systems.");
        assert_eq!(draft.status, STATUS_SAVED);
        assert_eq!(draft.link, "https://example.com/job/42");
        assert_eq!(draft.platform_posted, "");
        assert_eq!(draft.referral_options, "");
        assert_eq!(draft.person_posted, "");
        assert_eq!(draft.date_applied, Local::now().date_naive());
    }

    #[test]
    fn test_pasted_text_path_has_empty_link() {
        let draft = map_to_draft(sample_fields(), "");
        assert_eq!(draft.link, "");
    }

    #[test]
    fn test_mapping_is_deterministic_within_a_day() {
        let first = map_to_draft(sample_fields(), "https://example.com/job/42");
        let second = map_to_draft(sample_fields(), "https://example.com/job/42");
        assert_eq!(first, second);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(map_to_draft(sample_fields(), "")).unwrap();
        assert!(json.get("companyName").is_some());
        assert!(json.get("dateApplied").is_some());
        assert!(json.get("platformPosted").is_some());
    }
}

use serde::{Deserialize, Serialize};

/// Sentinel used when the job description element is missing from the page.
pub const DESCRIPTION_NOT_FOUND: &str = "Not found";
/// Placeholder entry when no skill tags could be extracted.
pub const NO_SKILLS: &str = "No skills specified";
pub const NOT_SPECIFIED: &str = "Not specified";
pub const NO_RATING: &str = "No rating";
pub const PAYMENT_VERIFIED: &str = "Yes";
pub const PAYMENT_NOT_VERIFIED: &str = "Not verified";

/// Client metadata scraped from the job page sidebar.
/// Every field degrades to a named sentinel when its element is absent —
/// extraction must never fail because a page variant dropped a widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub location: String,
    pub rating: String,
    pub total_spent: String,
    pub jobs_posted: String,
    pub payment_verified: String,
}

impl Default for ClientInfo {
    fn default() -> Self {
        ClientInfo {
            location: NOT_SPECIFIED.to_string(),
            rating: NO_RATING.to_string(),
            total_spent: NOT_SPECIFIED.to_string(),
            jobs_posted: NOT_SPECIFIED.to_string(),
            payment_verified: PAYMENT_NOT_VERIFIED.to_string(),
        }
    }
}

/// Structured job data captured from a marketplace job page.
/// Immutable once captured for a single generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobData {
    pub description: String,
    /// Unique skills in first-seen order; `["No skills specified"]` if none.
    pub skills: Vec<String>,
    pub client_info: ClientInfo,
}

impl Default for JobData {
    fn default() -> Self {
        JobData {
            description: DESCRIPTION_NOT_FOUND.to_string(),
            skills: vec![NO_SKILLS.to_string()],
            client_info: ClientInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_data_default_uses_sentinels() {
        let job = JobData::default();
        assert_eq!(job.description, "Not found");
        assert_eq!(job.skills, vec!["No skills specified".to_string()]);
        assert_eq!(job.client_info.location, "Not specified");
        assert_eq!(job.client_info.rating, "No rating");
        assert_eq!(job.client_info.payment_verified, "Not verified");
    }

    #[test]
    fn test_job_data_serde_uses_camel_case_wire_names() {
        let job = JobData::default();
        let json = serde_json::to_value(&job).unwrap();
        assert!(json.get("clientInfo").is_some());
        assert!(json["clientInfo"].get("totalSpent").is_some());
        assert!(json["clientInfo"].get("jobsPosted").is_some());
        assert!(json["clientInfo"].get("paymentVerified").is_some());
    }
}

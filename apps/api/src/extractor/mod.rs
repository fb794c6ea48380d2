//! Page Extractor — scrapes structured job data out of a marketplace job
//! page. A best-effort read: every missing element degrades to a named
//! sentinel and extraction never fails.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::models::job::{
    ClientInfo, JobData, DESCRIPTION_NOT_FOUND, NO_RATING, NO_SKILLS, NOT_SPECIFIED,
    PAYMENT_NOT_VERIFIED, PAYMENT_VERIFIED,
};

const DESCRIPTION_SELECTOR: &str = r#"[data-test="Description"]"#;
const SKILL_SELECTOR: &str = r#"[data-test="Skill"] .air3-line-clamp"#;
const CLIENT_LOCATION_SELECTOR: &str = r#"[data-qa="client-location"] strong"#;
const CLIENT_RATING_SELECTOR: &str = ".air3-rating-value-text";
const CLIENT_SPEND_SELECTOR: &str = r#"[data-qa="client-spend"] span"#;
const CLIENT_JOBS_SELECTOR: &str = r#"[data-qa="client-job-posting-stats"] strong"#;
const PAYMENT_VERIFIED_SELECTOR: &str = ".payment-verified";

/// Extracts job data from the page HTML. Partial pages produce partially
/// populated data with sentinel fallbacks, never an error.
pub fn extract(html: &str) -> JobData {
    let document = Html::parse_document(html);

    let job = JobData {
        description: first_text(&document, DESCRIPTION_SELECTOR)
            .unwrap_or_else(|| DESCRIPTION_NOT_FOUND.to_string()),
        skills: extract_skills(&document),
        client_info: extract_client_info(&document),
    };
    debug!(
        skills = job.skills.len(),
        description_len = job.description.len(),
        "Extracted job data"
    );
    job
}

/// Skill tags, deduplicated in first-seen order. Falls back to the
/// placeholder entry when the page carries no skill elements.
fn extract_skills(document: &Html) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for element in select_all(document, SKILL_SELECTOR) {
        let skill = clean_text(&element);
        if !skill.is_empty() && !skills.contains(&skill) {
            skills.push(skill);
        }
    }
    if skills.is_empty() {
        skills.push(NO_SKILLS.to_string());
    }
    skills
}

fn extract_client_info(document: &Html) -> ClientInfo {
    ClientInfo {
        location: first_text(document, CLIENT_LOCATION_SELECTOR)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        rating: first_text(document, CLIENT_RATING_SELECTOR)
            .unwrap_or_else(|| NO_RATING.to_string()),
        total_spent: first_text(document, CLIENT_SPEND_SELECTOR)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        jobs_posted: first_text(document, CLIENT_JOBS_SELECTOR)
            .unwrap_or_else(|| NOT_SPECIFIED.to_string()),
        payment_verified: if element_present(document, PAYMENT_VERIFIED_SELECTOR) {
            PAYMENT_VERIFIED.to_string()
        } else {
            PAYMENT_NOT_VERIFIED.to_string()
        },
    }
}

/// Text of the first element matching `selector`, whitespace-collapsed.
/// None when the selector misses or yields only whitespace.
fn first_text(document: &Html, selector: &str) -> Option<String> {
    select_all(document, selector)
        .into_iter()
        .map(|el| clean_text(&el))
        .find(|text| !text.is_empty())
}

fn element_present(document: &Html, selector: &str) -> bool {
    !select_all(document, selector).is_empty()
}

fn select_all<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(parsed) => document.select(&parsed).collect(),
        Err(e) => {
            warn!("Invalid selector {selector:?}: {e:?}");
            Vec::new()
        }
    }
}

fn clean_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"
        <html><body>
          <div data-test="Description">
            Build a <strong>REST API</strong>
            for our analytics product.
          </div>
          <div data-test="Skill"><span class="air3-line-clamp">Node</span></div>
          <div data-test="Skill"><span class="air3-line-clamp">Postgres</span></div>
          <div data-test="Skill"><span class="air3-line-clamp">Node</span></div>
          <div data-qa="client-location"><strong>USA</strong></div>
          <span class="air3-rating-value-text">4.9</span>
          <div data-qa="client-spend"><span>$50k</span></div>
          <div data-qa="client-job-posting-stats"><strong>12 jobs posted</strong></div>
          <div class="payment-verified">Payment method verified</div>
        </body></html>
    "#;

    #[test]
    fn test_extracts_all_fields_from_full_page() {
        let job = extract(FULL_PAGE);
        assert_eq!(job.description, "Build a REST API for our analytics product.");
        assert_eq!(job.skills, vec!["Node".to_string(), "Postgres".to_string()]);
        assert_eq!(job.client_info.location, "USA");
        assert_eq!(job.client_info.rating, "4.9");
        assert_eq!(job.client_info.total_spent, "$50k");
        assert_eq!(job.client_info.jobs_posted, "12 jobs posted");
        assert_eq!(job.client_info.payment_verified, "Yes");
    }

    #[test]
    fn test_duplicate_skills_are_deduplicated_in_order() {
        let job = extract(FULL_PAGE);
        assert_eq!(job.skills, vec!["Node", "Postgres"]);
    }

    #[test]
    fn test_empty_page_yields_all_sentinels() {
        let job = extract("<html><body></body></html>");
        assert_eq!(job.description, "Not found");
        assert_eq!(job.skills, vec!["No skills specified"]);
        assert_eq!(job.client_info.location, "Not specified");
        assert_eq!(job.client_info.rating, "No rating");
        assert_eq!(job.client_info.total_spent, "Not specified");
        assert_eq!(job.client_info.jobs_posted, "Not specified");
        assert_eq!(job.client_info.payment_verified, "Not verified");
    }

    #[test]
    fn test_partial_page_degrades_per_field() {
        let html = r#"
            <div data-test="Description">Logo design needed</div>
            <span class="air3-rating-value-text">5.0</span>
        "#;
        let job = extract(html);
        assert_eq!(job.description, "Logo design needed");
        assert_eq!(job.skills, vec!["No skills specified"]);
        assert_eq!(job.client_info.rating, "5.0");
        assert_eq!(job.client_info.location, "Not specified");
    }

    #[test]
    fn test_whitespace_only_elements_fall_back_to_sentinels() {
        let html = r#"<div data-test="Description">   </div>"#;
        let job = extract(html);
        assert_eq!(job.description, "Not found");
    }

    #[test]
    fn test_malformed_html_does_not_panic() {
        let job = extract("<div data-test=\"Description\">Unclosed <b>tag");
        assert!(job.description.contains("Unclosed"));
    }

    #[test]
    fn test_blank_skill_tags_are_skipped() {
        let html = r#"
            <div data-test="Skill"><span class="air3-line-clamp">  </span></div>
            <div data-test="Skill"><span class="air3-line-clamp">Rust</span></div>
        "#;
        let job = extract(html);
        assert_eq!(job.skills, vec!["Rust"]);
    }
}

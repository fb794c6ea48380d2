//! Prompt Builder — deterministic assembly of the generation prompt from
//! job data and the freelancer profile. Pure string construction, no I/O.

use crate::models::job::JobData;
use crate::models::settings::FreelancerProfile;

use super::prompts::{DEFAULT_FREELANCER_CONTEXT, PROPOSAL_PROMPT_TEMPLATE};

/// Builds the full instruction document sent as the user message.
/// Identical inputs always produce byte-identical output.
///
/// Each slot is filled exactly once, walking the template left to right;
/// placeholder-shaped text inside job or profile data stays literal.
pub fn build_prompt(job: &JobData, profile: &FreelancerProfile) -> String {
    let slots = [
        ("{freelancer_context}", freelancer_context(profile)),
        ("{description}", job.description.clone()),
        ("{skills}", job.skills.join(", ")),
        ("{client_snapshot}", client_snapshot(job)),
        (
            "{custom_instructions_section}",
            custom_instructions_section(profile),
        ),
    ];

    let mut prompt = String::with_capacity(PROPOSAL_PROMPT_TEMPLATE.len());
    let mut rest = PROPOSAL_PROMPT_TEMPLATE;
    for (slot, value) in slots {
        if let Some((before, after)) = rest.split_once(slot) {
            prompt.push_str(before);
            prompt.push_str(&value);
            rest = after;
        }
    }
    prompt.push_str(rest);
    prompt
}

/// Inline context sentence built only from populated profile fields.
/// Absent fields are skipped entirely, never rendered as blank labels.
fn freelancer_context(profile: &FreelancerProfile) -> String {
    let mut context = String::new();
    if !profile.experience.trim().is_empty() {
        context.push_str(&format!("Experience: {}. ", profile.experience.trim()));
    }
    if !profile.specialty.trim().is_empty() {
        context.push_str(&format!("Specialization: {}. ", profile.specialty.trim()));
    }
    if let Some(achievements) = non_empty(profile.achievements.as_deref()) {
        context.push_str(&format!("Key achievements: {achievements}. "));
    }
    if context.is_empty() {
        DEFAULT_FREELANCER_CONTEXT.to_string()
    } else {
        context.trim_end().to_string()
    }
}

fn client_snapshot(job: &JobData) -> String {
    let client = &job.client_info;
    format!(
        "- Location: {}\n- Rating: {}\n- Total Spent: {}\n- Jobs Posted: {}\n- Payment Verified: {}",
        client.location, client.rating, client.total_spent, client.jobs_posted,
        client.payment_verified
    )
}

fn custom_instructions_section(profile: &FreelancerProfile) -> String {
    match non_empty(profile.custom_instructions.as_deref()) {
        Some(instructions) => format!(
            "\n# Custom Instructions From The Freelancer\n{instructions}\n"
        ),
        None => String::new(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::ClientInfo;

    fn sample_job() -> JobData {
        JobData {
            description: "Build a REST API".to_string(),
            skills: vec!["Node".to_string(), "Postgres".to_string()],
            client_info: ClientInfo {
                location: "USA".to_string(),
                rating: "4.9".to_string(),
                total_spent: "$50k".to_string(),
                jobs_posted: "12".to_string(),
                payment_verified: "Yes".to_string(),
            },
        }
    }

    fn sample_profile() -> FreelancerProfile {
        FreelancerProfile {
            experience: "5 years backend".to_string(),
            specialty: "API design".to_string(),
            achievements: None,
            custom_instructions: None,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let job = sample_job();
        let profile = sample_profile();
        assert_eq!(build_prompt(&job, &profile), build_prompt(&job, &profile));
    }

    #[test]
    fn test_prompt_contains_job_data_and_profile() {
        let prompt = build_prompt(&sample_job(), &sample_profile());
        assert!(prompt.contains("Build a REST API"));
        assert!(prompt.contains("Node, Postgres"));
        assert!(prompt.contains("Experience: 5 years backend."));
        assert!(prompt.contains("Specialization: API design."));
        assert!(prompt.contains("- Location: USA"));
        assert!(prompt.contains("- Payment Verified: Yes"));
    }

    #[test]
    fn test_absent_fields_emit_no_blank_labels() {
        let prompt = build_prompt(&sample_job(), &sample_profile());
        assert!(!prompt.contains("Name:"));
        assert!(!prompt.contains("Key achievements:"));
        assert!(!prompt.contains("Custom Instructions"));
    }

    #[test]
    fn test_achievements_included_when_present() {
        let mut profile = sample_profile();
        profile.achievements = Some("Cut p99 latency by 40%".to_string());
        let prompt = build_prompt(&sample_job(), &profile);
        assert!(prompt.contains("Key achievements: Cut p99 latency by 40%."));
    }

    #[test]
    fn test_custom_instructions_get_their_own_section() {
        let mut profile = sample_profile();
        profile.custom_instructions = Some("Always mention my timezone".to_string());
        let prompt = build_prompt(&sample_job(), &profile);
        assert!(prompt.contains("# Custom Instructions From The Freelancer"));
        assert!(prompt.contains("Always mention my timezone"));
    }

    #[test]
    fn test_whitespace_only_optionals_are_treated_as_absent() {
        let mut profile = sample_profile();
        profile.achievements = Some("   ".to_string());
        profile.custom_instructions = Some("".to_string());
        let prompt = build_prompt(&sample_job(), &profile);
        assert!(!prompt.contains("Key achievements:"));
        assert!(!prompt.contains("Custom Instructions"));
    }

    #[test]
    fn test_empty_profile_uses_default_context() {
        let prompt = build_prompt(&sample_job(), &FreelancerProfile::default());
        assert!(prompt.contains("I am an experienced freelancer"));
    }

    #[test]
    fn test_placeholder_shaped_job_data_stays_literal() {
        let mut job = sample_job();
        job.description = "We template with {skills} and {description} markers".to_string();
        let prompt = build_prompt(&job, &sample_profile());
        assert!(prompt.contains("We template with {skills} and {description} markers"));
        // The real slots are still filled.
        assert!(prompt.contains("**Key Skills Needed:** Node, Postgres"));
    }

    #[test]
    fn test_prompt_carries_formatting_constraints_and_structure() {
        let prompt = build_prompt(&sample_job(), &sample_profile());
        assert!(prompt.contains("NEVER use em-dashes"));
        assert!(prompt.contains("150-300 words"));
        assert!(prompt.contains("## 1. Magnetic Opening"));
        assert!(prompt.contains("## 2. Core Problem + Solution"));
        assert!(prompt.contains("## 3. Relevant Proof Points"));
        assert!(prompt.contains("## 4. Describe Your Process"));
        assert!(prompt.contains("## 5. Simple Next Step"));
        assert!(prompt.contains("STYLE EXEMPLARS ONLY"));
    }
}

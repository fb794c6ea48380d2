use serde::{Deserialize, Serialize};

/// The external LLM vendor a generation request is routed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Anthropic,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    pub fn from_str_or_default(s: &str) -> Self {
        match s {
            "anthropic" => Provider::Anthropic,
            _ => Provider::OpenAi,
        }
    }

    /// Key prefix this provider's API keys are expected to carry.
    pub fn expected_key_prefix(&self) -> &'static str {
        match self {
            Provider::OpenAi => "sk-",
            Provider::Anthropic => "sk-ant-",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-3.5-turbo",
            Provider::Anthropic => "claude-3-haiku-20240307",
        }
    }

    /// Chat-completions endpoint for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1/chat/completions",
            Provider::Anthropic => "https://api.anthropic.com/v1/chat/completions",
        }
    }
}

/// Credentials and model selection for one generation call.
/// Passed explicitly into the proposal client on every request — there is
/// no shared mutable provider singleton to re-detect or re-initialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
}

impl ProviderConfig {
    /// An OpenAI key must start with `sk-` (and an Anthropic key with
    /// `sk-ant-`); an `sk-ant-` key selected under the openai provider is
    /// also a mismatch. Mismatches are warned about, never hard-blocked.
    pub fn key_matches_provider(&self) -> bool {
        match self.provider {
            Provider::OpenAi => {
                self.api_key.starts_with("sk-") && !self.api_key.starts_with("sk-ant-")
            }
            Provider::Anthropic => self.api_key.starts_with("sk-ant-"),
        }
    }
}

/// The freelancer's self-reported background used to personalize prompts.
/// Experience and specialty are required before generation is permitted;
/// achievements and custom instructions are optional extras.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FreelancerProfile {
    #[serde(rename = "freelancerExperience", default)]
    pub experience: String,
    #[serde(rename = "freelancerSpecialty", default)]
    pub specialty: String,
    #[serde(
        rename = "freelancerAchievements",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub achievements: Option<String>,
    #[serde(
        rename = "freelancerCustomInstructions",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_instructions: Option<String>,
}

impl FreelancerProfile {
    /// Required fields that gate whether generation is permitted.
    pub fn is_complete(&self) -> bool {
        !self.experience.trim().is_empty() && !self.specialty.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_serde_round_trip() {
        assert_eq!(serde_json::to_string(&Provider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(
            serde_json::to_string(&Provider::Anthropic).unwrap(),
            "\"anthropic\""
        );
        let p: Provider = serde_json::from_str("\"anthropic\"").unwrap();
        assert_eq!(p, Provider::Anthropic);
    }

    #[test]
    fn test_provider_from_str_falls_back_to_openai() {
        assert_eq!(Provider::from_str_or_default("anthropic"), Provider::Anthropic);
        assert_eq!(Provider::from_str_or_default("openai"), Provider::OpenAi);
        assert_eq!(Provider::from_str_or_default("something-else"), Provider::OpenAi);
    }

    #[test]
    fn test_key_prefix_match_per_provider() {
        let openai = ProviderConfig {
            provider: Provider::OpenAi,
            api_key: "sk-abcdefghij1234567890abcd".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        };
        assert!(openai.key_matches_provider());

        let anthropic_key_on_openai = ProviderConfig {
            provider: Provider::OpenAi,
            api_key: "sk-ant-REDACTED".to_string(),
            model: "gpt-3.5-turbo".to_string(),
        };
        assert!(!anthropic_key_on_openai.key_matches_provider());

        let anthropic = ProviderConfig {
            provider: Provider::Anthropic,
            api_key: "sk-ant-REDACTED".to_string(),
            model: "claude-3-haiku-20240307".to_string(),
        };
        assert!(anthropic.key_matches_provider());
    }

    #[test]
    fn test_profile_completeness_requires_experience_and_specialty() {
        let mut profile = FreelancerProfile::default();
        assert!(!profile.is_complete());

        profile.experience = "5 years backend".to_string();
        assert!(!profile.is_complete());

        profile.specialty = "API design".to_string();
        assert!(profile.is_complete());

        profile.experience = "   ".to_string();
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_wire_names_match_storage_keys() {
        let profile = FreelancerProfile {
            experience: "5 years".to_string(),
            specialty: "Rust".to_string(),
            achievements: Some("Shipped things".to_string()),
            custom_instructions: None,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["freelancerExperience"], "5 years");
        assert_eq!(json["freelancerSpecialty"], "Rust");
        assert_eq!(json["freelancerAchievements"], "Shipped things");
        assert!(json.get("freelancerCustomInstructions").is_none());
    }
}

//! Reply envelope configuration

use domain::Tone;
use serde::Deserialize;

/// Signature names and the default tone for drafted replies
#[derive(Debug, Clone, Deserialize)]
pub struct ReplyConfig {
    /// Name printed under the sign-off line
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Team line printed below the agent name
    #[serde(default = "default_team_name")]
    pub team_name: String,

    /// Tone applied when a request does not ask for one
    #[serde(default)]
    pub default_tone: Tone,
}

fn default_agent_name() -> String {
    "Mail Triage".to_string()
}

fn default_team_name() -> String {
    "Support".to_string()
}

impl Default for ReplyConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            team_name: default_team_name(),
            default_tone: Tone::default(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A selectable voice as exposed by the TTS service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    /// Identifier sent back in synthesis requests
    #[serde(rename = "ShortName")]
    pub short_name: String,
    /// Friendly label shown to the user
    #[serde(rename = "FriendlyName")]
    pub friendly_name: String,
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.friendly_name, self.short_name)
    }
}

//! Discord message payloads as accepted by the notification service.

use serde::{Deserialize, Serialize};

pub const COLOR_SUCCESS: u32 = 5_763_719;
pub const COLOR_NO_ROWS: u32 = 16_562_691;
pub const COLOR_TIMED_OUT: u32 = 16_542_467;
pub const COLOR_FAILED: u32 = 15_548_997;

/// Discord caps embed descriptions at this many characters.
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordMessage {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<EmbedField>,
    pub color: u32,
}

impl Embed {
    /// A `rich` embed with no content yet.
    pub fn rich(color: u32) -> Self {
        Self {
            kind: "rich".to_string(),
            title: None,
            description: None,
            fields: Vec::new(),
            color,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn fields(mut self, fields: Vec<EmbedField>) -> Self {
        self.fields = fields;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

//! The prompt text triple: system, user, and assistant template bodies.

use crate::extract::render_placeholders;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The three template bodies of a prompt version.
///
/// The assistant body is optional and defaults to empty. For placeholder
/// extraction the three bodies are one corpus: a name referenced in any of
/// them counts as in use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTexts {
    pub system: String,
    pub user: String,
    #[serde(default)]
    pub assistant: String,
}

impl PromptTexts {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            assistant: String::new(),
        }
    }

    pub fn with_assistant(mut self, assistant: impl Into<String>) -> Self {
        self.assistant = assistant.into();
        self
    }

    /// Joins the three bodies into the single corpus the extractor scans.
    ///
    /// The newline separator guarantees a placeholder can never form across
    /// a body boundary, since the grammar rejects line breaks inside braces.
    pub fn combined(&self) -> String {
        format!("{}\n{}\n{}", self.system, self.user, self.assistant)
    }

    /// Substitutes placeholder values into all three bodies for a local
    /// preview. Names missing from `values` stay verbatim.
    pub fn render(&self, values: &HashMap<String, String>) -> PromptTexts {
        PromptTexts {
            system: render_placeholders(&self.system, values),
            user: render_placeholders(&self.user, values),
            assistant: render_placeholders(&self.assistant, values),
        }
    }
}

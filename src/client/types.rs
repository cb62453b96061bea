//! Wire types for the prompt-storage backend's REST contract.
//!
//! Payload shapes are validated here, at the boundary, so the rest of the
//! crate never has to trust what came off the network.

use super::error::ApiError;
use crate::extract::is_valid_name;
use crate::session::EditorSession;
use crate::texts::PromptTexts;
use crate::variable::{VarType, Variable};
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One persisted variable as the backend stores it.
///
/// Persisted variables are by definition configured, so converting a record
/// into an in-memory [`Variable`] always yields a defined entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRecord {
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: VarType,
    #[serde(default)]
    pub default: String,
    #[serde(default = "required_default")]
    pub required: bool,
}

fn required_default() -> bool {
    true
}

impl VariableRecord {
    fn from_variable(var: &Variable) -> Self {
        Self {
            name: var.name.clone(),
            var_type: var.var_type,
            default: var.default_value.clone(),
            required: true,
        }
    }

    fn into_variable(self) -> Variable {
        Variable::defined(self.name, self.var_type, self.default)
    }
}

/// A prompt version as returned by `GET /prompts/{id}/versions/{vid}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub system_prompt: String,
    pub user_prompt: String,
    #[serde(default)]
    pub assistant_prompt: String,
    #[serde(default)]
    pub variables: Vec<VariableRecord>,
}

impl VersionRecord {
    /// Checks variable names for validity and uniqueness.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut seen = HashSet::new();
        for var in &self.variables {
            if !is_valid_name(&var.name) {
                return Err(ApiError::InvalidResponse(format!(
                    "version '{}' has invalid variable name '{}'",
                    self.id, var.name
                )));
            }
            if !seen.insert(var.name.as_str()) {
                return Err(ApiError::InvalidResponse(format!(
                    "version '{}' has duplicate variable '{}'",
                    self.id, var.name
                )));
            }
        }
        Ok(())
    }

    pub fn texts(&self) -> PromptTexts {
        PromptTexts::new(self.system_prompt.clone(), self.user_prompt.clone())
            .with_assistant(self.assistant_prompt.clone())
    }

    /// Validates the record and opens an editor session on it. The session
    /// immediately resynchronizes against the loaded text.
    pub fn into_session(self) -> Result<EditorSession, ApiError> {
        self.validate()?;
        let texts = self.texts();
        let variables = self
            .variables
            .into_iter()
            .map(VariableRecord::into_variable)
            .collect();
        Ok(EditorSession::load(texts, variables))
    }
}

/// Body of `PUT /prompts/{id}/versions/{vid}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveVersionRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub assistant_prompt: String,
    pub variables: Vec<VariableRecord>,
}

impl SaveVersionRequest {
    /// Builds the save payload from a session, refusing locally while any
    /// variable is undefined.
    pub fn from_session(session: &EditorSession) -> Result<Self, crate::error::SessionError> {
        session.ensure_save_ready()?;
        let texts = session.texts();
        Ok(Self {
            system_prompt: texts.system.clone(),
            user_prompt: texts.user.clone(),
            assistant_prompt: texts.assistant.clone(),
            variables: session
                .variables()
                .iter()
                .filter(|v| v.is_defined)
                .map(VariableRecord::from_variable)
                .collect(),
        })
    }
}

/// Response of `POST /prompts/{id}/versions/{vid}/publish`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub id: String,
    pub status: String,
}

/// Response of a test run against the configured LLM provider.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunResponse {
    pub output: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub latency_ms: Option<u64>,
}

/// Error body the FastAPI-style backend returns with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: String,
}

//! The owning state container for one open prompt version.
//!
//! An [`EditorSession`] holds the prompt text triple, the reconciled
//! variable list, and the test-time value overrides for exactly one version.
//! Every mutation goes through `&mut self`, so reconciliation passes are
//! serialized through a single dispatcher and a pass can never re-enter
//! itself: the borrow rules replace the suppress-nested-updates flag a
//! callback-driven design would need.

use crate::error::SessionError;
use crate::extract::{extract_variables, is_valid_name, strip_placeholder};
use crate::reconcile::reconcile;
use crate::texts::PromptTexts;
use crate::variable::{VarType, Variable};
use log::{debug, trace};
use std::collections::HashMap;

/// Editing state for a single prompt version.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    texts: PromptTexts,
    variables: Vec<Variable>,
    test_values: HashMap<String, String>,
}

impl EditorSession {
    /// An empty session for a brand-new version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a session from loaded version state and immediately
    /// resynchronizes the variable list against the loaded text.
    ///
    /// Persisted variables arrive already defined, but the text may have
    /// drifted (placeholders added or removed outside this editor), so the
    /// reconciler runs once before anything is displayed.
    pub fn load(texts: PromptTexts, variables: Vec<Variable>) -> Self {
        let mut session = Self {
            texts,
            variables,
            test_values: HashMap::new(),
        };
        session.resync();
        session
    }

    /// Replaces this session's state wholesale with another version's.
    ///
    /// Test-value overrides belong to the previous version and are
    /// discarded.
    pub fn switch_version(&mut self, texts: PromptTexts, variables: Vec<Variable>) {
        *self = Self::load(texts, variables);
    }

    pub fn texts(&self) -> &PromptTexts {
        &self.texts
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of variables still awaiting configuration.
    pub fn undefined_count(&self) -> usize {
        self.variables.iter().filter(|v| !v.is_defined).count()
    }

    /// Replaces the system prompt body and reconciles. Returns whether the
    /// variable list changed.
    pub fn set_system_prompt(&mut self, text: impl Into<String>) -> bool {
        self.texts.system = text.into();
        self.resync()
    }

    /// Replaces the user prompt body and reconciles. Returns whether the
    /// variable list changed.
    pub fn set_user_prompt(&mut self, text: impl Into<String>) -> bool {
        self.texts.user = text.into();
        self.resync()
    }

    /// Replaces the assistant prompt body and reconciles. Returns whether
    /// the variable list changed.
    pub fn set_assistant_prompt(&mut self, text: impl Into<String>) -> bool {
        self.texts.assistant = text.into();
        self.resync()
    }

    /// Marks a discovered variable as explicitly configured.
    ///
    /// Clears any test-time override so the next test run starts from the
    /// configured default.
    pub fn define(&mut self, name: &str) -> Result<(), SessionError> {
        let var = self
            .variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| SessionError::UnknownVariable(name.to_string()))?;
        var.is_defined = true;
        self.test_values.remove(name);
        debug!("defined variable '{name}'");
        Ok(())
    }

    /// Updates the declared type and default of a named variable.
    pub fn configure(
        &mut self,
        name: &str,
        var_type: VarType,
        default_value: impl Into<String>,
    ) -> Result<(), SessionError> {
        let var = self
            .variables
            .iter_mut()
            .find(|v| v.name == name)
            .ok_or_else(|| SessionError::UnknownVariable(name.to_string()))?;
        var.var_type = var_type;
        var.default_value = default_value.into();
        Ok(())
    }

    /// Deletes a variable and strips its placeholder from all three prompt
    /// bodies.
    ///
    /// Stripping must happen in the same step: a placeholder left in the
    /// text would simply be rediscovered by the next reconciliation pass.
    pub fn remove(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.variables.iter().any(|v| v.name == name) {
            return Err(SessionError::UnknownVariable(name.to_string()));
        }
        self.texts.system = strip_placeholder(&self.texts.system, name);
        self.texts.user = strip_placeholder(&self.texts.user, name);
        self.texts.assistant = strip_placeholder(&self.texts.assistant, name);
        self.variables.retain(|v| v.name != name);
        self.test_values.remove(name);
        debug!("removed variable '{name}' and stripped its placeholders");
        self.resync();
        Ok(())
    }

    /// Manually declares a new variable, already defined, whether or not the
    /// name currently appears in any prompt body.
    pub fn add(
        &mut self,
        name: &str,
        var_type: VarType,
        default_value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if !is_valid_name(name) {
            return Err(SessionError::InvalidName(name.to_string()));
        }
        if self.variables.iter().any(|v| v.name == name) {
            return Err(SessionError::DuplicateVariable(name.to_string()));
        }
        self.variables
            .push(Variable::defined(name, var_type, default_value));
        Ok(())
    }

    /// Overrides the test-run value for a named variable.
    pub fn set_test_value(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), SessionError> {
        if !self.variables.iter().any(|v| v.name == name) {
            return Err(SessionError::UnknownVariable(name.to_string()));
        }
        self.test_values.insert(name.to_string(), value.into());
        Ok(())
    }

    /// The flat `{name: value}` map sent to the test-run endpoint: the
    /// override when one is set, the configured default otherwise.
    pub fn test_inputs(&self) -> HashMap<String, String> {
        self.variables
            .iter()
            .map(|v| {
                let value = self
                    .test_values
                    .get(&v.name)
                    .cloned()
                    .unwrap_or_else(|| v.default_value.clone());
                (v.name.clone(), value)
            })
            .collect()
    }

    /// The prompt bodies with current test inputs substituted, for local
    /// preview.
    pub fn preview(&self) -> PromptTexts {
        self.texts.render(&self.test_inputs())
    }

    /// The local save gate: fails with the undefined count before any
    /// network call would be made.
    pub fn ensure_save_ready(&self) -> Result<(), SessionError> {
        match self.undefined_count() {
            0 => Ok(()),
            count => Err(SessionError::UndefinedVariables { count }),
        }
    }

    /// The local publish gate; same condition as saving.
    pub fn ensure_publishable(&self) -> Result<(), SessionError> {
        self.ensure_save_ready()
    }

    /// Re-extracts placeholders from the three bodies and reconciles the
    /// variable list. Returns whether the list changed (structural
    /// equality, not serialized comparison).
    fn resync(&mut self) -> bool {
        let extracted = extract_variables(&self.texts.combined());
        let next = reconcile(&extracted, &self.variables);
        if next == self.variables {
            trace!("reconciliation produced no change ({} entries)", next.len());
            return false;
        }
        debug!(
            "variable list reconciled: {} -> {} entries, {} undefined",
            self.variables.len(),
            next.len(),
            next.iter().filter(|v| !v.is_defined).count()
        );
        self.variables = next;
        let variables = &self.variables;
        self.test_values
            .retain(|name, _| variables.iter().any(|v| &v.name == name));
        true
    }
}

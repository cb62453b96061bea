//! The typed variable model behind every prompt placeholder.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The user-declared value type of a variable.
///
/// Newly discovered placeholders default to [`VarType::String`] until a user
/// configures them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    #[default]
    String,
    Number,
    Boolean,
    Array,
}

impl VarType {
    /// The lowercase wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            VarType::String => "string",
            VarType::Number => "number",
            VarType::Boolean => "boolean",
            VarType::Array => "array",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognized variable type name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variable type: '{0}'")]
pub struct UnknownVarType(pub String);

impl FromStr for VarType {
    type Err = UnknownVarType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(VarType::String),
            "number" => Ok(VarType::Number),
            "boolean" => Ok(VarType::Boolean),
            "array" => Ok(VarType::Array),
            other => Err(UnknownVarType(other.to_string())),
        }
    }
}

/// One named placeholder bound to a prompt, with its user-entered metadata.
///
/// `is_defined` is false for placeholders auto-discovered by text scanning
/// and true once a human has explicitly configured the variable. Undefined
/// entries block save and publish.
///
/// `PartialEq` is derived so change detection compares `name`, `var_type`,
/// `default_value`, and `is_defined` structurally, field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    #[serde(rename = "type", default)]
    pub var_type: VarType,
    #[serde(default)]
    pub default_value: String,
    pub is_defined: bool,
}

impl Variable {
    /// A freshly discovered placeholder pending configuration: string-typed,
    /// empty default, undefined.
    pub fn discovered(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            var_type: VarType::String,
            default_value: String::new(),
            is_defined: false,
        }
    }

    /// A variable explicitly configured by a user action.
    pub fn defined(
        name: impl Into<String>,
        var_type: VarType,
        default_value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            var_type,
            default_value: default_value.into(),
            is_defined: true,
        }
    }
}

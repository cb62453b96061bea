//! `promptdeck` - the variable synchronization engine behind a prompt
//! management product.
//!
//! Users edit system/user/assistant prompt templates containing
//! `{{variable}}` placeholders, organize them into versions, and test them
//! against LLM providers. This crate owns the part that has to be right on
//! every keystroke: scanning text for placeholders, reconciling the
//! discovered names against the previously known typed variable list, and
//! gating save/publish on the result. It also ships the typed REST client
//! for the external prompt-storage backend (cargo feature `client`, on by
//! default).
//!
//! # Example
//!
//! ```
//! use promptdeck::EditorSession;
//!
//! let mut session = EditorSession::new();
//! session.set_user_prompt("Hello {{name}}, welcome to {{city}}!");
//!
//! // Both placeholders were discovered and block saving until defined.
//! assert_eq!(session.undefined_count(), 2);
//! assert!(session.ensure_save_ready().is_err());
//!
//! session.define("name").unwrap();
//! session.define("city").unwrap();
//! assert!(session.ensure_save_ready().is_ok());
//! ```

pub mod error;
pub mod extract;
pub mod reconcile;
pub mod session;
pub mod texts;
pub mod variable;

#[cfg(feature = "client")]
pub mod client;

pub use error::SessionError;
pub use extract::{extract_variables, is_valid_name, strip_placeholder};
pub use reconcile::reconcile;
pub use session::EditorSession;
pub use texts::PromptTexts;
pub use variable::{VarType, Variable};

/// Extracts placeholders from a text triple and reconciles them against the
/// previous variable list in one step.
///
/// This is the whole per-edit pipeline as a single pure function; an
/// [`EditorSession`] runs exactly this on every text change.
pub fn sync_variables(texts: &PromptTexts, prev: &[Variable]) -> Vec<Variable> {
    reconcile(&extract_variables(&texts.combined()), prev)
}

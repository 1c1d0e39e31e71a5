//! Node name rules.

use std::fmt;

use explorer_core::AppError;

/// Maximum length of a node name, in characters, after trimming.
pub const MAX_NAME_LEN: usize = 255;

/// A validated node name: trimmed, non-empty, at most [`MAX_NAME_LEN`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    /// Trim `raw` and check the length rules.
    ///
    /// `subject` names the thing being named in error messages
    /// (e.g. `"Folder"`, `"New"`).
    pub fn parse(raw: &str, subject: &str) -> Result<Self, AppError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::validation(format!("{subject} name is required")));
        }
        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(AppError::validation(format!(
                "{subject} name must be at most {MAX_NAME_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take ownership of the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    Configuration,
}

/// Error surfaced to the user, e.g. in a notification or the startup dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFacingError {
    pub code: ErrorCode,
    pub message: String,
}

impl UserFacingError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self.code {
            ErrorCode::Unauthorized => "Authentication",
            ErrorCode::Forbidden => "Permission denied",
            ErrorCode::Configuration => "Configuration",
        }
    }
}

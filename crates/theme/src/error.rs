use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThemeError {
    #[error("unknown theme '{0}'; expected 'light' or 'dark'")]
    InvalidTheme(String),
}

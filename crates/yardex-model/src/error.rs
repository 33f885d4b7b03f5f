use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid rule id '{0}': expected 32 hex characters")]
    InvalidRuleId(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("updating {0} is not supported")]
    ImmutableField(&'static str),
}

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load library settings: {0}")]
    Settings(#[from] confy::ConfyError),
}

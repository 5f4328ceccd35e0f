mod app_config;
mod error;
mod requisite;

pub use app_config::{APP_NAME, RequisiteConfig};
pub use error::ContextError;
pub use requisite::Requisite;

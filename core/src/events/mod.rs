pub mod event;
pub mod handler;

pub use event::{ClientEvent, KeyInput};
pub use handler::EventHandler;

//! Core session module
//!
//! Contains the session lifecycle, its configuration and scene notifications

mod config;
mod events;
mod session;

pub use config::{ConfigError, PlacementConfig, SessionConfig};
pub use events::{EventQueue, SceneEvent};
pub use session::{Session, SessionError};

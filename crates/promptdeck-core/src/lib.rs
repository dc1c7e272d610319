//! `Promptdeck` Core Library
//!
//! Interactive command dispatch for `Promptdeck` hosts:
//! - Command settings with global-default resolution
//! - System command overrides (validate-then-merge)
//! - Token index with per-command case rules
//! - The confirm-then-execute prompt loop
//! - Fuzzy near-miss suggestions

pub mod builtin;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod matcher;
pub mod overrides;
pub mod registry;
pub mod settings;

pub use command::{Command, CommandAction};
pub use dispatch::{Dispatcher, Prompter};
pub use error::{Error, Result};
pub use matcher::closest_token;
pub use overrides::{CommandOverride, apply_overrides};
pub use registry::{TokenIndex, render_help};
pub use settings::{CommandSettings, GlobalDefaults};

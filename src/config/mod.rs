//! Settings loading and management for the scheduling engine.
//!
//! This module loads the scheduling settings record (overtime rules) from
//! a YAML file and resolves it into the active overtime policy.
//!
//! # Example
//!
//! ```no_run
//! use roster_engine::config::SettingsLoader;
//!
//! let settings = SettingsLoader::load("./config/scheduling.yaml").unwrap();
//! println!("Weekly overtime enabled: {}", settings.settings().ot_week.enabled);
//! ```

mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{OvertimeRule, ScheduleSettings};

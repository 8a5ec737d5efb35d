//! Sketch Tac Toe application.
//!
//! Front ends over [`sketchtoe_core`]:
//!
//! - **Config**: TOML settings for board size, tilt band and classifier
//! - **Replay**: scripted sessions that print events as JSON lines
//! - **TUI**: mouse-driven terminal board
//!
//! # Example
//!
//! ```
//! use sketchtoe::{run_script, AppConfig, Script, Step};
//!
//! let script = Script {
//!     steps: vec![Step::Circle { cell: 4 }, Step::Cross { cell: 0 }],
//! };
//! let mut out = Vec::new();
//! let summary = run_script(&script, &AppConfig::default(), &mut out).unwrap();
//! assert_eq!(summary.placements, 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod replay;
pub mod tui;

pub use config::{AppConfig, ConfigError, CONFIG_ENV_VAR};
pub use replay::{circle_stroke, cross_stroke, run_replay_file, run_script, ReplaySummary, Script, Step};
pub use tui::run_tui;

pub use sketchtoe_core;

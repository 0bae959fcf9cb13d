//! UI module for consistent CLI output
//!
//! Uses `cliclack` for styled step output and spinners, with automatic
//! fallback to plain `[OK]`/`[WARN]` lines in CI and non-interactive
//! environments. All formatting decisions flow from a [`UiContext`] passed
//! in by the caller; nothing here keeps global colour state.
//!
//! # Example
//!
//! ```rust,ignore
//! use nix_envs::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "Creating nodejs environment");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Fetching hash for Node.js v20.11.0...");
//! // ... resolve ...
//! spinner.stop("Found hash");
//!
//! ui::step_ok(&ctx, "Added entry to .envrc");
//! ui::outro_success(&ctx, "Environment ready");
//! ```

mod context;
mod output;
mod progress;
mod theme;

pub use context::UiContext;
pub use output::{intro, outro_success, step_info, step_ok, step_ok_detail, step_warn_hint};
pub use progress::{format_mib, DownloadProgress, TaskSpinner};
pub use theme::{init_theme, EnvsTheme};

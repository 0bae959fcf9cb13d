//! nix-envs - pinned Nix flake environments for direnv
//!
//! Generates a `flake.nix` for a language toolchain at an exact release,
//! caches it under the user's cache directory per project and adds a
//! `use flake` line to the project's `.envrc`.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod project;
pub mod resolve;
pub mod toolchain;
pub mod ui;

pub use error::{EnvsError, EnvsResult};

//! Per-project flake cache
//!
//! Every environment lives at `<root>/<project>/<toolchain>/flake.nix`
//! where `<root>` is `$XDG_CACHE_HOME/envs`, falling back to
//! `$HOME/.cache/envs`. The directory's presence on disk is the only record
//! that an environment exists; there is no separate index.
//!
//! # Layout
//!
//! ```text
//! ~/.cache/envs/
//! ├── my-app/
//! │   ├── nodejs/flake.nix
//! │   └── rust/flake.nix
//! └── tools/
//!     └── go/flake.nix
//! ```

pub mod entry;
pub mod root;

pub use entry::{list_entries, CacheEntry, CachedEnv, DESCRIPTOR_FILE};
pub use root::{cache_root, cache_root_from, home_dir, home_dir_from};

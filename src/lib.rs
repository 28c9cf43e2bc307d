//! Storyboard Sync - keeps a Utopia storyboard file in step with a React
//! source tree.
//!
//! A run scans the tree for exported UI components, merges them with the
//! scenes of the previous storyboard (keeping hand-made positions), places
//! new scenes without overlap and renders the whole file again.

pub mod config;
pub mod error;
pub mod layout;
pub mod logging;
pub mod scanner;
pub mod sync;

pub use config::{SyncConfig, SyncOptions};
pub use error::StoryboardError;
pub use sync::{run_sync, SyncOutcome, SyncReport};

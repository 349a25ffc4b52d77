//! # filebind-autosave
//!
//! Coalesces bursts of edits into infrequent saves.
//!
//! Every key gets its own trailing-edge debounce: each new edit replaces the
//! buffered value and restarts the quiet window, and the save fires once the
//! key has been quiet for the whole window. Keys never delay each other.
//!
//! ```text
//! edit(a) ──┐ edit(a) ──┐             quiet window
//!           ▼           ▼        ├──────────────────────┤
//!        buffer      buffer ─────────────────────────── save(a, latest)
//! ```

mod registry;

pub use registry::{DEFAULT_QUIET_WINDOW, DebouncedWriterRegistry};

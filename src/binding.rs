//! Binding of the active key to its content.

pub use filebind_binding::*;

//! Library side of the `define-editor` binary.
//!
//! Holds everything the commands compute before anything is printed, so the
//! output can be checked without running the binary.

pub mod import;
pub mod logging;
pub mod overview;
pub mod script;

//! Output emission: pruned source files and minimal module manifests.

mod emitter;
mod error;

pub use emitter::{EmitReport, write_output};
pub use error::EmitError;

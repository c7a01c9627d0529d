//! Errors surfaced by the harness.
//!
//! The low-level GL wrappers in [`crate::abs`] report failures as the driver's
//! info log (`String`). [`HarnessError`] is what the pipeline and the host hand
//! back to `main`, where every variant is fatal.

use std::path::PathBuf;

use crate::abs::ShaderStage;
use crate::pipeline::PipelineState;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("failed to read shader source {path:?}: {source}")]
    ShaderSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{stage} shader failed to compile:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link:\n{0}")]
    Link(String),
    #[error("graphics device error: {0}")]
    Device(String),
    #[error("cannot {operation} while the pipeline is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: PipelineState,
    },
    #[error("window error: {0}")]
    Window(String),
}

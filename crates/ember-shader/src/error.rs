use std::fmt;
use std::path::PathBuf;

use crate::ShaderStage;

/// Failure to read a shader source file.
#[derive(Debug)]
pub enum SourceError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Io { path, source } => {
                write!(f, "failed to read shader file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io { source, .. } => Some(source),
        }
    }
}

/// Failure while compiling or linking a shader program.
///
/// Compile-time variants always carry the stage so the rendered message
/// names it; `log` holds the compiler diagnostics verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    Parse { stage: ShaderStage, log: String },
    Validation { stage: ShaderStage, log: String },
    MissingEntryPoint { stage: ShaderStage },
    StageMismatch {
        expected: ShaderStage,
        found: ShaderStage,
    },
    Link { log: String },
}

impl ShaderError {
    /// Stage the error is attributed to, if any.
    pub fn stage(&self) -> Option<ShaderStage> {
        match self {
            ShaderError::Parse { stage, .. }
            | ShaderError::Validation { stage, .. }
            | ShaderError::MissingEntryPoint { stage } => Some(*stage),
            ShaderError::StageMismatch { expected, .. } => Some(*expected),
            ShaderError::Link { .. } => None,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::Parse { stage, log } => {
                write!(f, "failed to compile {stage} shader:\n{log}")
            }
            ShaderError::Validation { stage, log } => {
                write!(f, "failed to validate {stage} shader:\n{log}")
            }
            ShaderError::MissingEntryPoint { stage } => {
                write!(f, "failed to compile {stage} shader: no @{stage} entry point")
            }
            ShaderError::StageMismatch { expected, found } => {
                write!(f, "expected a {expected} stage, got a {found} stage")
            }
            ShaderError::Link { log } => write!(f, "failed to link shader program: {log}"),
        }
    }
}

impl std::error::Error for ShaderError {}

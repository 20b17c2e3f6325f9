use naga::valid::{Capabilities, ValidationFlags, Validator};

use crate::{ShaderError, ShaderStage};

/// A single stage that parsed and validated cleanly.
#[derive(Debug, Clone)]
pub struct CompiledStage {
    stage: ShaderStage,
    source: String,
    module: naga::Module,
    entry_point: String,
}

impl CompiledStage {
    #[inline]
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }

    /// WGSL text the stage was compiled from.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Name of the entry point function selected for this stage.
    #[inline]
    pub fn entry_point(&self) -> &str {
        &self.entry_point
    }

    #[inline]
    pub fn module(&self) -> &naga::Module {
        &self.module
    }

    pub(crate) fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }
}

/// Compiles one stage of WGSL.
///
/// The first entry point tagged with `stage` is selected. Other entry points in
/// the same text are allowed and ignored.
pub fn compile(stage: ShaderStage, source: &str) -> Result<CompiledStage, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Parse {
        stage,
        log: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::empty())
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            stage,
            log: e.as_inner().to_string(),
        })?;

    let entry_point = module
        .entry_points
        .iter()
        .find(|ep| ep.stage == stage.to_naga())
        .map(|ep| ep.name.clone())
        .ok_or(ShaderError::MissingEntryPoint { stage })?;

    log::debug!("compiled {stage} stage (entry point `{entry_point}`)");

    Ok(CompiledStage {
        stage,
        source: source.to_owned(),
        module,
        entry_point,
    })
}

use naga::{
    Binding, BuiltIn, Handle, Interpolation, Module, Sampling, Scalar, ScalarKind, Type,
    TypeInner,
};

use crate::{CompiledStage, ShaderError, ShaderStage};

/// A vertex + fragment pair whose interfaces agree.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    vertex: CompiledStage,
    fragment: CompiledStage,
    vertex_inputs: Vec<u32>,
}

impl LinkedProgram {
    #[inline]
    pub fn vertex(&self) -> &CompiledStage {
        &self.vertex
    }

    #[inline]
    pub fn fragment(&self) -> &CompiledStage {
        &self.fragment
    }

    #[inline]
    pub fn stage(&self, stage: ShaderStage) -> &CompiledStage {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }

    /// Vertex attribute locations the vertex stage reads, ascending.
    #[inline]
    pub fn vertex_inputs(&self) -> &[u32] {
        &self.vertex_inputs
    }
}

/// Numeric class of the data a vertex buffer attribute feeds the shader.
///
/// Normalized and half-float formats arrive as `Float`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AttributeKind {
    Float,
    Sint,
    Uint,
    Float64,
}

impl AttributeKind {
    fn scalar(self) -> Scalar {
        match self {
            AttributeKind::Float => Scalar::F32,
            AttributeKind::Sint => Scalar::I32,
            AttributeKind::Uint => Scalar::U32,
            AttributeKind::Float64 => Scalar::F64,
        }
    }
}

/// One vertex buffer attribute, as the vertex stage sees it.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub kind: AttributeKind,
}

impl VertexAttribute {
    pub const fn new(location: u32, kind: AttributeKind) -> Self {
        Self { location, kind }
    }
}

/// A user-defined (`@location`) input or output of an entry point.
#[derive(Debug)]
struct Slot {
    location: u32,
    ty: TypeInner,
    interpolation: Option<Interpolation>,
    sampling: Option<Sampling>,
}

/// Slots and builtins appearing on one side of an entry point.
#[derive(Debug, Default)]
struct Interface {
    slots: Vec<Slot>,
    position: bool,
}

impl Interface {
    fn collect(module: &Module, ty: Handle<Type>, binding: Option<&Binding>, out: &mut Self) {
        match binding {
            Some(&Binding::Location {
                location,
                interpolation,
                sampling,
                ..
            }) => out.slots.push(Slot {
                location,
                ty: module.types[ty].inner.clone(),
                interpolation,
                sampling,
            }),
            Some(Binding::BuiltIn(BuiltIn::Position { .. })) => out.position = true,
            Some(Binding::BuiltIn(_)) => {}
            None => {
                if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                    for m in members {
                        Self::collect(module, m.ty, m.binding.as_ref(), out);
                    }
                }
            }
        }
    }

    fn inputs(stage: &CompiledStage) -> Self {
        let mut out = Self::default();
        if let Some(ep) = stage.entry() {
            for arg in &ep.function.arguments {
                Self::collect(stage.module(), arg.ty, arg.binding.as_ref(), &mut out);
            }
        }
        out.finish()
    }

    fn outputs(stage: &CompiledStage) -> Self {
        let mut out = Self::default();
        if let Some(result) = stage.entry().and_then(|ep| ep.function.result.as_ref()) {
            Self::collect(stage.module(), result.ty, result.binding.as_ref(), &mut out);
        }
        out.finish()
    }

    fn finish(mut self) -> Self {
        self.slots.sort_by_key(|s| s.location);
        self.slots.dedup_by_key(|s| s.location);
        self
    }

    fn slot(&self, location: u32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.location == location)
    }
}

fn scalar_of(ty: &TypeInner) -> Option<Scalar> {
    match *ty {
        TypeInner::Scalar(scalar) | TypeInner::Vector { scalar, .. } => Some(scalar),
        _ => None,
    }
}

/// Whether a value written as `wider` can be read as `ty`: same scalar kind,
/// no wider scalar, and no more components.
fn reads_as(ty: &TypeInner, wider: &TypeInner) -> bool {
    let (Some(a), Some(b)) = (scalar_of(ty), scalar_of(wider)) else {
        return ty == wider;
    };
    if a.kind != b.kind || a.width > b.width {
        return false;
    }
    match (ty, wider) {
        (TypeInner::Scalar(_), _) => true,
        (TypeInner::Vector { size: s0, .. }, TypeInner::Vector { size: s1, .. }) => s0 <= s1,
        _ => false,
    }
}

fn scalar_name(s: Scalar) -> String {
    let bits = u32::from(s.width) * 8;
    match s.kind {
        ScalarKind::Float => format!("f{bits}"),
        ScalarKind::Sint => format!("i{bits}"),
        ScalarKind::Uint => format!("u{bits}"),
        ScalarKind::Bool => "bool".to_string(),
        other => format!("{other:?}"),
    }
}

fn type_name(ty: &TypeInner) -> String {
    match *ty {
        TypeInner::Scalar(s) => scalar_name(s),
        TypeInner::Vector { size, scalar } => format!("vec{}<{}>", size as u8, scalar_name(scalar)),
        _ => "a non-numeric type".to_string(),
    }
}

fn link_error(log: String) -> ShaderError {
    ShaderError::Link { log }
}

/// Links two compiled stages against the vertex buffer layout.
///
/// `attributes` lists what the bound vertex buffers provide. Checks, in order:
/// - argument stages are vertex and fragment respectively
/// - every vertex input is fed by an attribute of the same scalar type
/// - the vertex stage writes `@builtin(position)`
/// - every fragment input is written by the vertex stage with a compatible
///   type and the same interpolation
/// - the fragment stage writes a floating point color to target 0
pub fn link(
    vertex: CompiledStage,
    fragment: CompiledStage,
    attributes: &[VertexAttribute],
) -> Result<LinkedProgram, ShaderError> {
    expect_stage(&vertex, ShaderStage::Vertex)?;
    expect_stage(&fragment, ShaderStage::Fragment)?;

    let vs_in = Interface::inputs(&vertex);
    for input in &vs_in.slots {
        let loc = input.location;
        let Some(attr) = attributes.iter().find(|a| a.location == loc) else {
            return Err(link_error(format!(
                "vertex input at location {loc} has no matching vertex attribute"
            )));
        };
        if scalar_of(&input.ty) != Some(attr.kind.scalar()) {
            return Err(link_error(format!(
                "vertex input at location {loc} is {} but its attribute provides {} data",
                type_name(&input.ty),
                scalar_name(attr.kind.scalar())
            )));
        }
    }

    let vs_out = Interface::outputs(&vertex);
    if !vs_out.position {
        return Err(link_error("vertex stage does not write @builtin(position)".to_string()));
    }

    let fs_in = Interface::inputs(&fragment);
    for input in &fs_in.slots {
        let loc = input.location;
        let Some(output) = vs_out.slot(loc) else {
            return Err(link_error(format!(
                "fragment input at location {loc} is not written by the vertex stage"
            )));
        };
        if !reads_as(&input.ty, &output.ty) {
            return Err(link_error(format!(
                "fragment input at location {loc} is {} but the vertex stage writes {}",
                type_name(&input.ty),
                type_name(&output.ty)
            )));
        }
        if (input.interpolation, input.sampling) != (output.interpolation, output.sampling) {
            return Err(link_error(format!(
                "fragment input at location {loc} is interpolated as {:?}/{:?} \
                 but the vertex output as {:?}/{:?}",
                input.interpolation, input.sampling, output.interpolation, output.sampling
            )));
        }
    }

    let fs_out = Interface::outputs(&fragment);
    let Some(color) = fs_out.slot(0) else {
        return Err(link_error("fragment stage writes no color at location 0".to_string()));
    };
    if scalar_of(&color.ty).map(|s| s.kind) != Some(ScalarKind::Float) {
        return Err(link_error(format!(
            "fragment color at location 0 is {}, expected floating point",
            type_name(&color.ty)
        )));
    }

    log::debug!(
        "linked `{}` + `{}` ({} varying(s))",
        vertex.entry_point(),
        fragment.entry_point(),
        fs_in.slots.len()
    );

    Ok(LinkedProgram {
        vertex,
        fragment,
        vertex_inputs: vs_in.slots.iter().map(|s| s.location).collect(),
    })
}

fn expect_stage(stage: &CompiledStage, expected: ShaderStage) -> Result<(), ShaderError> {
    if stage.stage() == expected {
        Ok(())
    } else {
        Err(ShaderError::StageMismatch {
            expected,
            found: stage.stage(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile;
    use crate::testing::{PASS_THROUGH_FRAGMENT, PASS_THROUGH_VERTEX, POSITION_ATTRIBUTES};

    fn vs(src: &str) -> CompiledStage {
        compile(ShaderStage::Vertex, src).unwrap()
    }

    fn fs(src: &str) -> CompiledStage {
        compile(ShaderStage::Fragment, src).unwrap()
    }

    const COLOR_VERTEX: &str = "
struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(position, 0.0, 1.0);
    out.color = vec3<f32>(1.0, 0.5, 0.0);
    return out;
}
";

    const COLOR_FRAGMENT: &str = "
@fragment
fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
    return vec4<f32>(color, 1.0);
}
";

    fn color_vertex_writing(ty: &str, interpolate: &str) -> String {
        format!(
            "
struct VsOut {{
    @builtin(position) pos: vec4<f32>,
    @location(0) {interpolate} color: {ty},
}};

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> VsOut {{
    var out: VsOut;
    out.pos = vec4<f32>(position, 0.0, 1.0);
    out.color = {ty}();
    return out;
}}
"
        )
    }

    #[test]
    fn links_pass_through_pair() {
        let p = link(
            vs(PASS_THROUGH_VERTEX),
            fs(PASS_THROUGH_FRAGMENT),
            &POSITION_ATTRIBUTES,
        )
        .unwrap();
        assert_eq!(p.vertex_inputs(), &[0]);
        assert_eq!(p.stage(ShaderStage::Fragment).entry_point(), "fs_main");
    }

    #[test]
    fn links_struct_varyings() {
        let p = link(vs(COLOR_VERTEX), fs(COLOR_FRAGMENT), &POSITION_ATTRIBUTES).unwrap();
        assert_eq!(p.vertex().entry_point(), "vs_main");
    }

    #[test]
    fn fragment_may_read_fewer_components_than_written() {
        let vertex = color_vertex_writing("vec4<f32>", "");
        link(vs(&vertex), fs(COLOR_FRAGMENT), &POSITION_ATTRIBUTES).unwrap();
    }

    #[test]
    fn rejects_unfed_vertex_input() {
        let attrs = [VertexAttribute::new(1, AttributeKind::Float)];
        let err = link(vs(PASS_THROUGH_VERTEX), fs(PASS_THROUGH_FRAGMENT), &attrs).unwrap_err();
        assert!(matches!(err, ShaderError::Link { .. }));
        assert!(err.to_string().contains("location 0"));
    }

    #[test]
    fn rejects_integer_input_on_float_attribute() {
        let vertex = "
@vertex
fn vs_main(@location(0) p: vec2<u32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(vec2<f32>(p), 0.0, 1.0);
}
";
        let err = link(vs(vertex), fs(PASS_THROUGH_FRAGMENT), &POSITION_ATTRIBUTES).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("vertex input at location 0 is vec2<u32>"), "{msg}");
        assert!(msg.contains("f32"), "{msg}");
    }

    #[test]
    fn integer_input_links_against_integer_attribute() {
        let vertex = "
@vertex
fn vs_main(@location(0) p: vec2<u32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(vec2<f32>(p), 0.0, 1.0);
}
";
        let attrs = [VertexAttribute::new(0, AttributeKind::Uint)];
        link(vs(vertex), fs(PASS_THROUGH_FRAGMENT), &attrs).unwrap();
    }

    #[test]
    fn rejects_varying_the_vertex_stage_never_writes() {
        let err =
            link(vs(PASS_THROUGH_VERTEX), fs(COLOR_FRAGMENT), &POSITION_ATTRIBUTES).unwrap_err();
        assert!(err.to_string().contains("fragment input at location 0"));
    }

    #[test]
    fn rejects_varying_read_wider_than_written() {
        let vertex = color_vertex_writing("vec2<f32>", "");
        let fragment = "
@fragment
fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
    return color;
}
";
        let err = link(vs(&vertex), fs(fragment), &POSITION_ATTRIBUTES).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("is vec4<f32> but the vertex stage writes vec2<f32>"), "{msg}");
    }

    #[test]
    fn rejects_interpolation_mismatch() {
        let vertex = color_vertex_writing("vec3<f32>", "@interpolate(flat)");
        let err = link(vs(&vertex), fs(COLOR_FRAGMENT), &POSITION_ATTRIBUTES).unwrap_err();
        assert!(err.to_string().contains("interpolated"));
    }

    #[test]
    fn rejects_integer_color_output() {
        let fragment = "
@fragment
fn fs_main() -> @location(0) vec4<u32> {
    return vec4<u32>(1u);
}
";
        let err = link(vs(PASS_THROUGH_VERTEX), fs(fragment), &POSITION_ATTRIBUTES).unwrap_err();
        assert!(err.to_string().contains("fragment color at location 0 is vec4<u32>"));
    }

    #[test]
    fn rejects_swapped_stages() {
        let err = link(
            fs(PASS_THROUGH_FRAGMENT),
            vs(PASS_THROUGH_VERTEX),
            &POSITION_ATTRIBUTES,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ShaderError::StageMismatch {
                expected: ShaderStage::Vertex,
                found: ShaderStage::Fragment,
            }
        );
    }
}

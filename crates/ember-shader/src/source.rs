use std::path::Path;

use crate::{ShaderStage, SourceError};

/// Marker token that opens a stage section.
pub const MARKER: &str = "#shader";

/// Per-stage source text split out of a `.shader` file.
///
/// File format:
///
/// ```text
/// #shader vertex
/// ...vertex stage lines...
/// #shader fragment
/// ...fragment stage lines...
/// ```
///
/// Each text holds its lines in file order, every line followed by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

/// Splitter position within the file.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Section {
    /// Before the first marker line; content here belongs to no stage.
    Preamble,
    Stage(ShaderStage),
}

impl ShaderSource {
    /// Splits `text` into stage sections.
    ///
    /// Marker lines are dropped. A marker naming neither stage leaves the
    /// current section unchanged. Lines before the first marker are discarded.
    pub fn parse_str(text: &str) -> Self {
        let mut out = ShaderSource::default();
        let mut section = Section::Preamble;
        let mut orphaned = 0usize;

        for (idx, line) in text.lines().enumerate() {
            if line.contains(MARKER) {
                match marker_stage(line) {
                    Some(stage) => section = Section::Stage(stage),
                    None => log::warn!(
                        "line {}: `{MARKER}` marker names no known stage; section unchanged",
                        idx + 1
                    ),
                }
                continue;
            }

            match section {
                Section::Preamble => orphaned += 1,
                Section::Stage(stage) => {
                    let buf = out.text_mut(stage);
                    buf.push_str(line);
                    buf.push('\n');
                }
            }
        }

        if orphaned > 0 {
            log::warn!("discarded {orphaned} line(s) before the first `{MARKER}` marker");
        }

        out
    }

    /// Reads and splits the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded shader file {} ({} bytes)", path.display(), text.len());
        Ok(Self::parse_str(&text))
    }

    /// Like [`load`](Self::load), but an unreadable file yields two empty texts.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using empty shader sources");
            Self::default()
        })
    }

    fn text_mut(&mut self, stage: ShaderStage) -> &mut String {
        match stage {
            ShaderStage::Vertex => &mut self.vertex,
            ShaderStage::Fragment => &mut self.fragment,
        }
    }
}

/// `vertex` wins when a marker line mentions both labels.
fn marker_stage(line: &str) -> Option<ShaderStage> {
    ShaderStage::ALL
        .into_iter()
        .find(|stage| line.contains(stage.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_vertex_then_fragment() {
        let src = "#shader vertex\nv1\nv2\n#shader fragment\nf1\n";
        let s = ShaderSource::parse_str(src);
        assert_eq!(s.vertex, "v1\nv2\n");
        assert_eq!(s.fragment, "f1\n");
    }

    #[test]
    fn marker_lines_never_reach_output() {
        let s = ShaderSource::parse_str("#shader vertex\na\n#shader fragment\nb\n");
        assert!(!s.vertex.contains(MARKER));
        assert!(!s.fragment.contains(MARKER));
    }

    #[test]
    fn section_order_does_not_matter() {
        let s = ShaderSource::parse_str("#shader fragment\nf\n#shader vertex\nv\n");
        assert_eq!(s.vertex, "v\n");
        assert_eq!(s.fragment, "f\n");
    }

    #[test]
    fn empty_text_yields_empty_sections() {
        let s = ShaderSource::parse_str("");
        assert_eq!(s, ShaderSource::default());
    }

    #[test]
    fn preamble_lines_are_discarded() {
        let s = ShaderSource::parse_str("// header\n\n#shader vertex\nv\n");
        assert_eq!(s.vertex, "v\n");
        assert!(s.fragment.is_empty());
    }

    #[test]
    fn marker_may_appear_anywhere_on_the_line() {
        let s = ShaderSource::parse_str("  // #shader   vertex stage\nv\n//#shader fragment\nf\n");
        assert_eq!(s.vertex, "v\n");
        assert_eq!(s.fragment, "f\n");
    }

    #[test]
    fn unknown_marker_keeps_current_section() {
        let s = ShaderSource::parse_str("#shader vertex\na\n#shader geometry\nb\n");
        assert_eq!(s.vertex, "a\nb\n");
    }

    #[test]
    fn repeated_sections_accumulate() {
        let s =
            ShaderSource::parse_str("#shader vertex\na\n#shader fragment\nf\n#shader vertex\nb\n");
        assert_eq!(s.vertex, "a\nb\n");
        assert_eq!(s.fragment, "f\n");
    }

    #[test]
    fn blank_lines_are_kept_verbatim() {
        let s = ShaderSource::parse_str("#shader vertex\n\n  indented\n");
        assert_eq!(s.vertex, "\n  indented\n");
    }

    #[test]
    fn crlf_terminators_are_normalized() {
        let s = ShaderSource::parse_str("#shader vertex\r\nv\r\n#shader fragment\r\nf\r\n");
        assert_eq!(s.vertex, "v\n");
        assert_eq!(s.fragment, "f\n");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ShaderSource::load("does/not/exist.shader").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.to_string().contains("exist.shader"));
    }

    #[test]
    fn load_or_empty_degrades_to_empty_sources() {
        let s = ShaderSource::load_or_empty("does/not/exist.shader");
        assert_eq!(s.vertex, "");
        assert_eq!(s.fragment, "");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("ember-shader-{}.shader", std::process::id()));
        std::fs::write(&path, "#shader vertex\nv\n#shader fragment\nf\n").unwrap();
        let s = ShaderSource::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(s.vertex, "v\n");
        assert_eq!(s.fragment, "f\n");
    }
}

//! Style profiles attached to title text nodes.

use marquee_traits::surface::ProbeStyle;

/// Case transform applied when rendering and measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
}

/// Kind of text run inside a title block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// A stacked primary line. Fills the full block width.
    Line,
    /// The decorative script overlay. Fills a configurable fraction of the
    /// block width.
    Script,
}

/// Immutable style description for one node kind.
///
/// Profiles attach per kind, not per node instance: every line node shares
/// the line profile, the script node gets the script profile. Only the
/// properties that influence advance widths (or the oblique presentation)
/// live here; colors, gradients and shadows belong to the presentation
/// layer.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleProfile {
    /// Ordered font fallback list.
    pub font_stack: Vec<String>,
    /// Additional per-glyph tracking, in em.
    pub letter_spacing_em: Option<f32>,
    /// Word spacing adjustment, in ch units.
    pub word_spacing_ch: Option<f32>,
    /// Case transform applied when rendering and measuring.
    pub transform: TextTransform,
    /// Baseline oblique presentation.
    pub italic: bool,
}

impl StyleProfile {
    /// Built-in profile for the stacked primary lines.
    pub fn line() -> Self {
        Self {
            font_stack: vec![
                "Beethoven".into(),
                "GN Kill Gothic U".into(),
                "sans-serif".into(),
            ],
            letter_spacing_em: None,
            word_spacing_ch: None,
            transform: TextTransform::Uppercase,
            italic: false,
        }
    }

    /// Built-in profile for the script overlay.
    pub fn script() -> Self {
        Self {
            font_stack: vec!["Xtreem".into(), "851 Chikara".into(), "fantasy".into()],
            letter_spacing_em: None,
            word_spacing_ch: Some(-0.15),
            transform: TextTransform::None,
            italic: false,
        }
    }

    /// The built-in profile for a node kind.
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Line => Self::line(),
            NodeKind::Script => Self::script(),
        }
    }

    /// Snapshot of this profile at a candidate size, ready to apply to a
    /// measurement probe.
    pub fn probe_style(&self, font_size_em: f32, oblique: bool) -> ProbeStyle {
        ProbeStyle {
            font_stack: self.font_stack.clone(),
            font_size_em,
            letter_spacing_em: self.letter_spacing_em,
            word_spacing_ch: self.word_spacing_ch,
            uppercase: matches!(self.transform, TextTransform::Uppercase),
            oblique: self.italic || oblique,
        }
    }
}

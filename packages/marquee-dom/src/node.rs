//! The nodes themselves, and their fit state.

use bitflags::bitflags;
use marquee_text::normalize::CJK_SCALE;
use marquee_text::style::NodeKind;
use marquee_traits::watch::WatchId;

/// Name of the style variable each node publishes its fitted size under.
pub const FONT_SIZE_VAR: &str = "--font-size-fit";

bitflags! {
    /// Per-node state bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// A refit is currently running for this node. Same-node refits
        /// are serialized, never overlapped.
        const FITTING_IN_FLIGHT = 0b0000_0001;
    }
}

/// Lifecycle of a node's fit state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitState {
    /// Not owned by a block; no target width can be derived, so fitting
    /// is a no-op.
    #[default]
    Unattached,
    /// Attached, with a refit pending or in flight.
    Fitting,
    /// Attached, with a published size matching the current text and
    /// width.
    Stable,
}

/// One displayed text run.
///
/// Nodes are data holders; behavior lives on
/// [`TitleDocument`](crate::TitleDocument) so that refits can reach the
/// shared measurer and the owning block.
#[derive(Debug)]
pub struct FitNode {
    pub(crate) kind: NodeKind,
    pub(crate) display_text: String,
    pub(crate) state: FitState,
    pub(crate) last_font_size_em: Option<f32>,
    pub(crate) last_measured_width_px: Option<f32>,
    pub(crate) cjk: bool,
    pub(crate) watch: Option<WatchId>,
    pub(crate) flags: NodeFlags,
}

impl FitNode {
    pub(crate) fn new(kind: NodeKind, display_text: String) -> Self {
        Self {
            kind,
            display_text,
            state: FitState::Unattached,
            last_font_size_em: None,
            last_measured_width_px: None,
            cjk: false,
            watch: None,
            flags: NodeFlags::empty(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The true content of the run. Fitting never rewrites it; it is the
    /// only content exposed for rendering.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }

    pub fn state(&self) -> FitState {
        self.state
    }

    /// Last fitted size, on the quantization grid.
    pub fn font_size_em(&self) -> Option<f32> {
        self.last_font_size_em
    }

    /// Width measured at the last fitted size, in pixels.
    pub fn measured_width_px(&self) -> Option<f32> {
        self.last_measured_width_px
    }

    /// Size actually presented: the fitted size with the CJK render boost
    /// applied, matching what the search measured.
    pub fn presentation_size_em(&self) -> Option<f32> {
        self.last_font_size_em
            .map(|size| if self.cjk { size * CJK_SCALE } else { size })
    }

    /// Whether the run presents oblique (CJK script styling).
    pub fn oblique(&self) -> bool {
        self.cjk && self.kind == NodeKind::Script
    }

    /// The published style variable, e.g. `("--font-size-fit", "21.25em")`.
    pub fn style_variable(&self) -> Option<(&'static str, String)> {
        self.presentation_size_em()
            .map(|size| (FONT_SIZE_VAR, format!("{size}em")))
    }

    /// The content watch registered for this node, while attached.
    pub fn watch(&self) -> Option<WatchId> {
        self.watch
    }
}

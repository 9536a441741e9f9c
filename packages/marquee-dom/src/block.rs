//! The owning container for a stack of title text runs.

use marquee_text::style::NodeKind;
use marquee_traits::watch::WatchId;

/// Container that owns 1..3 line nodes and at most one script node, and
/// derives their target widths from its own box width.
#[derive(Debug)]
pub struct TitleBlock {
    pub(crate) measured_width_px: Option<f32>,
    pub(crate) script_ratio: f32,
    pub(crate) lines: Vec<usize>,
    pub(crate) script: Option<usize>,
    pub(crate) watch: Option<WatchId>,
}

impl TitleBlock {
    pub(crate) fn new(script_ratio: f32) -> Self {
        Self {
            measured_width_px: None,
            script_ratio,
            lines: Vec::new(),
            script: None,
            watch: None,
        }
    }

    /// Box width from the last size observation, if any has arrived.
    pub fn measured_width_px(&self) -> Option<f32> {
        self.measured_width_px
    }

    /// Fraction of the block width granted to the script overlay.
    pub fn script_ratio(&self) -> f32 {
        self.script_ratio
    }

    /// Target width for a node kind.
    ///
    /// None until the first size observation arrives: fitting must not run
    /// against stale or zero width.
    pub fn target_width_px(&self, kind: NodeKind) -> Option<f32> {
        let width = self.measured_width_px?;
        Some(match kind {
            NodeKind::Line => width,
            NodeKind::Script => width * self.script_ratio,
        })
    }

    /// Line children, in document order.
    pub fn lines(&self) -> &[usize] {
        &self.lines
    }

    /// The script child, if one is present.
    pub fn script(&self) -> Option<usize> {
        self.script
    }

    /// The size watch registered for this block.
    pub fn watch(&self) -> Option<WatchId> {
        self.watch
    }

    /// Children in refit order: lines in document order, script last.
    pub(crate) fn children_in_order(&self) -> Vec<usize> {
        let mut out = self.lines.clone();
        out.extend(self.script);
        out
    }

    pub(crate) fn remove_child(&mut self, node_id: usize) {
        self.lines.retain(|&child| child != node_id);
        if self.script == Some(node_id) {
            self.script = None;
        }
    }
}

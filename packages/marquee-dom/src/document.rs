//! The document: node arena, watch registry, and the fitting pipeline.

use std::sync::Arc;

use marquee_text::error::FitError;
use marquee_text::fit::{FitSearch, FitTarget};
use marquee_text::measure::TextMeasurer;
use marquee_text::style::{NodeKind, StyleProfile};
use marquee_traits::status::{DummyStatusProvider, StatusProvider};
use marquee_traits::surface::MeasurementSurface;
use marquee_traits::watch::WatchEvent;
use slab::Slab;
use tokio::sync::watch;

use crate::block::TitleBlock;
use crate::config::{DocumentConfig, FitOptions};
use crate::events::{EventQueue, WatchRegistry, WatchTarget};
use crate::node::{FitNode, FitState, NodeFlags};

/// Input record for [`TitleDocument::populate`].
///
/// Values are trimmed; fields that trim to nothing are treated as absent
/// and the corresponding node is removed. `color_scheme` is carried
/// through untouched for the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleRecord {
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub line3: Option<String>,
    pub script: Option<String>,
    pub color_scheme: Option<String>,
}

/// Cloneable handle for awaiting document readiness.
///
/// Construction of the document's node kinds may finish after the caller
/// that wants to populate it already holds a handle; awaiting readiness
/// bridges that gap.
#[derive(Debug, Clone)]
pub struct Readiness {
    rx: watch::Receiver<bool>,
}

impl Readiness {
    /// Resolves once both node-kind styles are registered. Already-ready
    /// documents resolve immediately.
    pub async fn wait(mut self) {
        while !*self.rx.borrow() {
            // A closed channel means the document is gone; its last value
            // already answered the question.
            if self.rx.changed().await.is_err() {
                break;
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        *self.rx.borrow()
    }
}

#[derive(Debug, Default)]
struct KindStyles {
    line: Option<StyleProfile>,
    script: Option<StyleProfile>,
}

impl KindStyles {
    fn get(&self, kind: NodeKind) -> Option<&StyleProfile> {
        match kind {
            NodeKind::Line => self.line.as_ref(),
            NodeKind::Script => self.script.as_ref(),
        }
    }

    fn set(&mut self, kind: NodeKind, profile: StyleProfile) {
        match kind {
            NodeKind::Line => self.line = Some(profile),
            NodeKind::Script => self.script = Some(profile),
        }
    }

    fn complete(&self) -> bool {
        self.line.is_some() && self.script.is_some()
    }
}

/// A retained stack of auto-fitted title text runs.
///
/// The document owns the node arena, the block, the injected measurement
/// surface and the watch registry; all fitting behavior funnels through it
/// (nodes and blocks are data holders). Everything is synchronous and
/// single-threaded: watchers deliver raw events in, at most one refit per
/// target comes out.
pub struct TitleDocument<S: MeasurementSurface> {
    nodes: Slab<FitNode>,
    block: TitleBlock,
    search: FitSearch<S>,
    options: FitOptions,
    styles: KindStyles,
    status: Arc<dyn StatusProvider>,
    watches: WatchRegistry,
    queue: EventQueue,
    ready_tx: watch::Sender<bool>,
    color_scheme: Option<String>,
}

impl<S: MeasurementSurface> TitleDocument<S> {
    /// Construct a document around an injected measurement surface.
    pub fn new(surface: S, config: DocumentConfig) -> Self {
        let options = config.options;
        let (ready_tx, _) = watch::channel(false);
        let mut watches = WatchRegistry::default();
        let mut block = TitleBlock::new(options.script_ratio);
        block.watch = Some(watches.subscribe(WatchTarget::Block));

        let mut doc = Self {
            nodes: Slab::new(),
            block,
            search: FitSearch::new(TextMeasurer::new(surface), options.search_params()),
            options,
            styles: KindStyles::default(),
            status: config
                .status_provider
                .unwrap_or_else(|| Arc::new(DummyStatusProvider)),
            watches,
            queue: EventQueue::default(),
            ready_tx,
            color_scheme: None,
        };

        if !config.defer_styles {
            // Built-in kinds register synchronously; there are no nodes
            // yet, so the refit pass inside is a no-op and cannot fail.
            let line = config.line_style.unwrap_or_else(StyleProfile::line);
            let script = config.script_style.unwrap_or_else(StyleProfile::script);
            let _ = doc.register_style(NodeKind::Line, line);
            let _ = doc.register_style(NodeKind::Script, script);
        }
        doc
    }

    /// Handle for awaiting readiness (both node kinds registered).
    pub fn readiness(&self) -> Readiness {
        Readiness {
            rx: self.ready_tx.subscribe(),
        }
    }

    /// Register (or replace) the style profile for a node kind.
    ///
    /// Readiness resolves once both kinds are registered. Replacing a
    /// profile refits the affected nodes against the current width.
    pub fn register_style(
        &mut self,
        kind: NodeKind,
        profile: StyleProfile,
    ) -> Result<(), FitError> {
        self.styles.set(kind, profile);
        if self.styles.complete() {
            self.ready_tx.send_replace(true);
        }
        let affected: Vec<usize> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.kind == kind)
            .map(|(id, _)| id)
            .collect();
        for node_id in affected {
            self.refit(node_id)?;
        }
        Ok(())
    }

    /// The block that owns the text runs.
    pub fn block(&self) -> &TitleBlock {
        &self.block
    }

    pub fn node(&self, node_id: usize) -> Option<&FitNode> {
        self.nodes.get(node_id)
    }

    /// The injected measurement surface.
    pub fn surface(&self) -> &S {
        self.search.measurer().surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.search.measurer_mut().surface_mut()
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Opaque presentation parameters from the last populate call.
    pub fn color_scheme(&self) -> Option<&str> {
        self.color_scheme.as_deref()
    }

    /// Create a node and attach it to the block, registering its content
    /// watch and running the initial synchronous refit.
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        text: impl Into<String>,
    ) -> Result<usize, FitError> {
        let node_id = self.nodes.insert(FitNode::new(kind, text.into()));
        self.attach(node_id)?;
        Ok(node_id)
    }

    fn attach(&mut self, node_id: usize) -> Result<(), FitError> {
        let kind = self.nodes[node_id].kind;
        match kind {
            NodeKind::Line => self.block.lines.push(node_id),
            NodeKind::Script => {
                // Ownership is exclusive; a new script node displaces any
                // previous one.
                if let Some(old) = self.block.script.replace(node_id) {
                    self.remove_node(old);
                }
            }
        }
        let watch_id = self.watches.subscribe(WatchTarget::Node(node_id));
        let node = &mut self.nodes[node_id];
        node.watch = Some(watch_id);
        node.state = FitState::Fitting;
        self.refit(node_id)
    }

    /// Detach a node from the block.
    ///
    /// The content watch is released exactly once; later mutations of the
    /// orphaned node store text but no longer trigger fitting.
    pub fn detach(&mut self, node_id: usize) {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return;
        };
        if let Some(watch_id) = node.watch.take() {
            self.watches.unsubscribe(watch_id);
        }
        node.state = FitState::Unattached;
        self.block.remove_child(node_id);
    }

    /// Detach and drop a node.
    pub fn remove_node(&mut self, node_id: usize) {
        self.detach(node_id);
        if self.nodes.contains(node_id) {
            self.nodes.remove(node_id);
        }
    }

    /// Update a node's displayed text and immediately refit it.
    ///
    /// The stored text is the true content; fitting never rewrites it.
    /// Setting the text a node already has is a no-op, mirroring the
    /// width guard.
    pub fn set_text(&mut self, node_id: usize, text: impl Into<String>) -> Result<(), FitError> {
        let Some(node) = self.nodes.get_mut(node_id) else {
            return Ok(());
        };
        let text = text.into();
        if node.display_text == text {
            return Ok(());
        }
        node.display_text = text;
        if node.state == FitState::Unattached {
            // Orphan mutation: the text is stored, fitting waits for a
            // future attach.
            return Ok(());
        }
        node.state = FitState::Fitting;
        self.refit(node_id)
    }

    /// Deliver a box width observation for the block.
    ///
    /// Redundant notifications are no-ops by value equality. The guard is
    /// load-bearing: a refit can change the rendered size, which the
    /// host's size watcher may observe and report back; equality turns
    /// that second notification into nothing instead of a cycle.
    pub fn resize(&mut self, width_px: f32) -> Result<(), FitError> {
        if self.block.measured_width_px == Some(width_px) {
            return Ok(());
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            previous = ?self.block.measured_width_px,
            width_px,
            "block width changed"
        );
        self.block.measured_width_px = Some(width_px);
        for node_id in self.block.children_in_order() {
            self.refit(node_id)?;
        }
        Ok(())
    }

    /// Recompute and publish the fitted size for one node.
    ///
    /// No-ops by design: unknown ids and unattached nodes (partial
    /// construction is an expected transient), kinds with no registered
    /// style yet, blocks with no width observation, and re-entrant calls
    /// for a node already being fitted.
    pub fn refit(&mut self, node_id: usize) -> Result<(), FitError> {
        let Some(node) = self.nodes.get(node_id) else {
            return Ok(());
        };
        if node.state == FitState::Unattached {
            return Ok(());
        }
        if node.flags.contains(NodeFlags::FITTING_IN_FLIGHT) {
            return Ok(());
        }
        let kind = node.kind;
        let Some(target_width) = self.block.target_width_px(kind) else {
            return Ok(());
        };
        let Some(style) = self.styles.get(kind).cloned() else {
            return Ok(());
        };

        {
            let node = &mut self.nodes[node_id];
            node.state = FitState::Fitting;
            node.flags.insert(NodeFlags::FITTING_IN_FLIGHT);
        }

        let is_script = kind == NodeKind::Script;
        let target = FitTarget {
            text: &self.nodes[node_id].display_text,
            style: &style,
            container_width_px: target_width,
            margin_ratio: self.options.margin_ratio,
            min_measure_length: is_script.then_some(self.options.min_measure_length),
            substitute_special_chars: is_script && self.options.substitute_special_chars,
        };
        let outcome = self.search.fit(&target);

        let node = &mut self.nodes[node_id];
        node.flags.remove(NodeFlags::FITTING_IN_FLIGHT);
        match outcome {
            Ok(result) => {
                node.last_font_size_em = Some(result.font_size_em);
                node.last_measured_width_px = Some(result.measured_width_px);
                node.cjk = result.cjk;
                node.state = FitState::Stable;
                Ok(())
            }
            Err(err) => {
                // Any published size is stale now; stay Fitting so a later
                // notification retries against a (possibly recovered)
                // surface.
                #[cfg(feature = "tracing")]
                tracing::warn!(node_id, error = %err, "refit failed");
                Err(err)
            }
        }
    }

    /// Queue a raw watch notification. Nothing runs until [`flush`].
    ///
    /// [`flush`]: Self::flush
    pub fn handle_event(&mut self, event: WatchEvent) {
        self.queue.push(event);
    }

    /// Coalesce and dispatch queued notifications.
    ///
    /// A burst collapses to at most one action per target: the last
    /// resize width wins (the equality guard may still discard it), and
    /// repeated content notifications for one node fold into one refit.
    /// Notifications for released watches are dropped.
    pub fn flush(&mut self) -> Result<(), FitError> {
        let (resize, content) = self.queue.take();
        if let Some((watch_id, width_px)) = resize {
            if self.watches.target(watch_id) == Some(WatchTarget::Block) {
                self.resize(width_px)?;
            }
        }
        for watch_id in content {
            match self.watches.target(watch_id) {
                Some(WatchTarget::Node(node_id)) => self.refit(node_id)?,
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(?watch_id, "dropping notification for released watch");
                }
            }
        }
        Ok(())
    }

    /// Apply a populate record from the form collaborator.
    ///
    /// Lines map to line nodes in order and the script value to the
    /// script node; nodes are created, retexted or removed as presence
    /// changes. The status hook fires exactly once, after the last
    /// affected node has been refitted.
    pub fn populate(&mut self, record: &TitleRecord) -> Result<(), FitError> {
        let desired: Vec<&str> = [&record.line1, &record.line2, &record.line3]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();

        let current = self.block.lines.clone();
        let shared = current.len().min(desired.len());
        for (slot, &text) in desired.iter().enumerate().take(shared) {
            self.set_text(current[slot], text)?;
        }
        for &stale in &current[shared..] {
            self.remove_node(stale);
        }
        for &text in &desired[shared..] {
            self.create_node(NodeKind::Line, text)?;
        }

        let script_text = record
            .script
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty());
        match (self.block.script, script_text) {
            (Some(node_id), Some(text)) => self.set_text(node_id, text)?,
            (Some(node_id), None) => self.remove_node(node_id),
            (None, Some(text)) => {
                self.create_node(NodeKind::Script, text)?;
            }
            (None, None) => {}
        }

        self.color_scheme = record.color_scheme.clone();

        self.status.populated();
        Ok(())
    }
}

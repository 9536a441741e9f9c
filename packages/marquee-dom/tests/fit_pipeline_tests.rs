//! Lifecycle and invalidation tests for the fitting pipeline.

use marquee_dom::{DocumentConfig, FitState, TitleDocument, FONT_SIZE_VAR};
use marquee_text::style::NodeKind;
use marquee_traits::surface::{MeasurementSurface, ProbeId, ProbeStyle, SurfaceError};
use marquee_traits::watch::WatchEvent;

/// Surface where every string measures `font_size_em * px_per_em` wide,
/// recording what it was asked to measure.
struct LinearSurface {
    px_per_em: f32,
    pending_size: Option<f32>,
    pending_text: String,
    measured_texts: Vec<String>,
    measurements: u32,
}

impl LinearSurface {
    fn new(px_per_em: f32) -> Self {
        Self {
            px_per_em,
            pending_size: None,
            pending_text: String::new(),
            measured_texts: Vec::new(),
            measurements: 0,
        }
    }
}

impl MeasurementSurface for LinearSurface {
    fn create_probe(&mut self) -> Result<ProbeId, SurfaceError> {
        Ok(ProbeId(0))
    }

    fn set_style(&mut self, _probe: ProbeId, style: &ProbeStyle) -> Result<(), SurfaceError> {
        self.pending_size = Some(style.font_size_em);
        Ok(())
    }

    fn set_text(&mut self, _probe: ProbeId, text: &str) -> Result<(), SurfaceError> {
        self.pending_text = text.to_owned();
        Ok(())
    }

    fn measured_width(&mut self, probe: ProbeId) -> Result<f32, SurfaceError> {
        let size = self
            .pending_size
            .ok_or(SurfaceError::UnknownProbe(probe))?;
        self.measurements += 1;
        self.measured_texts.push(self.pending_text.clone());
        Ok(size * self.px_per_em)
    }

    fn remove_probe(&mut self, _probe: ProbeId) {}
}

fn document(px_per_em: f32) -> TitleDocument<LinearSurface> {
    TitleDocument::new(LinearSurface::new(px_per_em), DocumentConfig::default())
}

#[test]
fn worked_scenario_through_the_document() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "MARQUEE").unwrap();

    let node = doc.node(id).unwrap();
    assert_eq!(node.state(), FitState::Stable);
    // Goal 850px at 40px/em: 21.25em measures 850 exactly.
    assert_eq!(node.font_size_em(), Some(21.25));
    assert_eq!(node.measured_width_px(), Some(850.0));
    assert_eq!(
        node.style_variable(),
        Some((FONT_SIZE_VAR, "21.25em".to_owned()))
    );
}

#[test]
fn nodes_do_not_fit_before_the_first_size_observation() {
    let mut doc = document(40.0);
    let id = doc.create_node(NodeKind::Line, "EARLY").unwrap();

    let node = doc.node(id).unwrap();
    assert_eq!(node.state(), FitState::Fitting);
    assert_eq!(node.font_size_em(), None);
    assert_eq!(doc.surface().measurements, 0);
}

#[test]
fn redundant_resize_is_a_noop() {
    let mut doc = document(40.0);
    doc.resize(800.0).unwrap();
    doc.create_node(NodeKind::Line, "TITLE").unwrap();

    let after_first = doc.surface().measurements;
    doc.resize(800.0).unwrap();
    assert_eq!(doc.surface().measurements, after_first);

    // An actual delta refits again.
    doc.resize(640.0).unwrap();
    assert!(doc.surface().measurements > after_first);
}

#[test]
fn refit_is_idempotent_for_unchanged_inputs() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "STEADY").unwrap();

    let first = doc.node(id).unwrap().font_size_em();
    doc.refit(id).unwrap();
    let second = doc.node(id).unwrap().font_size_em();
    assert_eq!(first, second);
}

#[test]
fn setting_identical_text_does_not_refit() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "SAME").unwrap();

    let before = doc.surface().measurements;
    doc.set_text(id, "SAME").unwrap();
    assert_eq!(doc.surface().measurements, before);
}

#[test]
fn detached_nodes_ignore_text_mutation() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "GOING").unwrap();

    doc.detach(id);
    let before = doc.surface().measurements;
    doc.set_text(id, "GONE").unwrap();

    assert_eq!(doc.surface().measurements, before);
    let node = doc.node(id).unwrap();
    assert_eq!(node.state(), FitState::Unattached);
    // The mutation itself still lands; only the fitting is dead.
    assert_eq!(node.display_text(), "GONE");
}

#[test]
fn released_watches_drop_their_notifications() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "WATCHED").unwrap();
    let watch_id = doc.node(id).unwrap().watch().unwrap();

    doc.detach(id);
    let before = doc.surface().measurements;
    doc.handle_event(WatchEvent::ContentChanged { watch_id });
    doc.flush().unwrap();
    assert_eq!(doc.surface().measurements, before);
}

#[test]
fn resize_bursts_coalesce_to_the_last_width() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "BURSTY").unwrap();
    let block_watch = doc.block().watch().unwrap();

    // The burst ends where it started; after last-wins coalescing the
    // equality guard discards the whole thing.
    let before = doc.surface().measurements;
    doc.handle_event(WatchEvent::BoxResized {
        watch_id: block_watch,
        width_px: 500.0,
    });
    doc.handle_event(WatchEvent::BoxResized {
        watch_id: block_watch,
        width_px: 1000.0,
    });
    doc.flush().unwrap();
    assert_eq!(doc.surface().measurements, before);
    assert_eq!(doc.block().measured_width_px(), Some(1000.0));
    assert_eq!(doc.node(id).unwrap().font_size_em(), Some(21.25));
}

#[test]
fn content_bursts_fold_into_one_refit() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let id = doc.create_node(NodeKind::Line, "NOISY").unwrap();
    let watch_id = doc.node(id).unwrap().watch().unwrap();

    // Cost of exactly one refit with these inputs.
    let before_single = doc.surface().measurements;
    doc.refit(id).unwrap();
    let single = doc.surface().measurements - before_single;
    assert!(single > 0);

    let before_burst = doc.surface().measurements;
    for _ in 0..3 {
        doc.handle_event(WatchEvent::ContentChanged { watch_id });
    }
    doc.flush().unwrap();
    assert_eq!(doc.surface().measurements - before_burst, single);
}

#[test]
fn resize_refits_lines_first_and_script_last() {
    let mut doc = document(40.0);
    doc.create_node(NodeKind::Line, "ONE").unwrap();
    doc.create_node(NodeKind::Line, "TWO").unwrap();
    doc.create_node(NodeKind::Script, "yo").unwrap();

    doc.resize(1000.0).unwrap();
    let texts = &doc.surface().measured_texts;
    assert_eq!(texts.first().map(String::as_str), Some("ONE"));
    // The script string is padded to the minimum measurement length and
    // measured after every line.
    assert_eq!(texts.last().map(String::as_str), Some("yoxxxxxx"));
}

#[test]
fn script_target_width_uses_the_script_ratio() {
    let mut doc = document(40.0);
    doc.resize(1000.0).unwrap();
    let line = doc.create_node(NodeKind::Line, "WIDE").unwrap();
    let script = doc.create_node(NodeKind::Script, "overlay!").unwrap();

    assert_eq!(doc.node(line).unwrap().font_size_em(), Some(21.25));
    // Script goal: 1000 * 0.75 * 0.85 = 637.5px -> first step at or under
    // is 15.875em (635px) at 40px/em.
    assert_eq!(doc.node(script).unwrap().font_size_em(), Some(15.875));
}

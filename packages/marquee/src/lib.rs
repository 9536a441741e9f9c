//! High-level APIs for auto-fitting title text with Marquee.
//!
//! Most embedders only need this crate: construct a
//! [`TitleDocument`] around a measurement surface, wire the host's size
//! and content watchers to [`TitleDocument::handle_event`], and hand
//! populate records to [`TitleDocument::populate`].
//!
//! The stack underneath splits the way the repository does:
//! [`marquee_traits`] holds the embedder-facing capabilities,
//! [`marquee_text`] the normalization/measurement/search engine, and
//! [`marquee_dom`] the retained nodes and the invalidation pipeline.

pub use marquee_dom::{
    DocumentConfig, FitNode, FitOptions, FitState, Readiness, TitleBlock, TitleDocument,
    TitleRecord, FONT_SIZE_VAR,
};
pub use marquee_text::{
    contains_cjk, normalize, FitError, FitParams, FitResult, FitSearch, FitTarget,
    FontMetricsSurface, NodeKind, NormalizeOptions, Normalized, StyleProfile, TextMeasurer,
    TextTransform, CJK_SCALE,
};
pub use marquee_traits::status::{DummyStatusProvider, StatusProvider};
pub use marquee_traits::surface::{
    DummyMeasurementSurface, MeasurementSurface, ProbeId, ProbeStyle, SurfaceError,
};
pub use marquee_traits::watch::{WatchEvent, WatchId};

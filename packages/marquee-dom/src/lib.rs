//! Retained title-text nodes and the reactive fitting pipeline.
//!
//! This crate implements a headless [`TitleDocument`]: a block of 1..3
//! stacked line runs plus an optional script overlay, each auto-sized so
//! its rendered width fills a target derived from the block's box width.
//! The document is designed to be embedded in and driven by external code:
//!
//!  - the embedder injects a
//!    [`MeasurementSurface`](marquee_traits::surface::MeasurementSurface)
//!    at construction and feeds raw size/content notifications through
//!    [`TitleDocument::handle_event`] / [`TitleDocument::flush`] (or the
//!    direct [`TitleDocument::resize`] / [`TitleDocument::set_text`]
//!    entry points);
//!  - a form collaborator supplies records via
//!    [`TitleDocument::populate`], awaiting [`TitleDocument::readiness`]
//!    first when construction is asynchronous;
//!  - each node publishes its fitted size as the [`FONT_SIZE_VAR`] style
//!    variable for the presentation layer.
//!
//! Everything runs on one thread; bursts of notifications coalesce into a
//! single refit pass, and redundant width observations are no-ops so a
//! refit-induced resize notification cannot loop.

mod block;
mod config;
mod document;
mod events;

/// The nodes themselves, and their fit state.
pub mod node;

pub use block::TitleBlock;
pub use config::{DocumentConfig, FitOptions};
pub use document::{Readiness, TitleDocument, TitleRecord};
pub use node::{FitNode, FitState, NodeFlags, FONT_SIZE_VAR};

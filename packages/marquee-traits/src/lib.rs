//! Shared traits and types for the Marquee title-fitting engine.
//!
//! This crate defines the capabilities an embedder supplies to the core:
//!
//!  - [`surface::MeasurementSurface`]: the isolated, off-surface probe
//!    environment that candidate renders are measured against. Fitting
//!    never touches the live render surface, so the embedder decides what
//!    "measuring" means (a hidden DOM span, parsed font metrics, a stub).
//!  - [`status::StatusProvider`]: the completion hook fired once a populate
//!    pass has settled, consumed by accessibility collaborators.
//!  - [`watch`]: the change-notification types for explicit watch
//!    subscriptions, replacing implicit host observers.
//!
//! `Dummy*` implementations are included for tests and headless use.

pub mod status;
pub mod surface;
pub mod watch;

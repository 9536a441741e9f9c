//! Text measurement and fit-to-width search for Marquee.
//!
//! Given a text run, a style profile and a target width, this crate finds
//! the quantized font size whose rendered width best fills the target:
//!
//!  - the `normalize` module derives the *measurement string* from the
//!    displayed text (CJK classification, special-character substitution,
//!    minimum-length padding). The displayed text is never altered.
//!  - [`measure::TextMeasurer`]: measures one string at one candidate size
//!    against an injected
//!    [`MeasurementSurface`](marquee_traits::surface::MeasurementSurface),
//!    creating and destroying a probe per call.
//!  - [`fit::FitSearch`]: the linear hill-climb over candidate sizes.
//!  - [`metrics_surface::FontMetricsSurface`]: a deterministic surface
//!    backed by parsed font faces, for embedders without a DOM.

pub mod error;
pub mod fit;
pub mod measure;
pub mod metrics_surface;
pub mod normalize;
pub mod style;

pub use error::FitError;
pub use fit::{FitParams, FitResult, FitSearch, FitTarget};
pub use measure::TextMeasurer;
pub use metrics_surface::FontMetricsSurface;
pub use normalize::{contains_cjk, normalize, NormalizeOptions, Normalized, CJK_SCALE};
pub use style::{NodeKind, StyleProfile, TextTransform};

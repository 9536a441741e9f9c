//! Error taxonomy for fitting operations.

use marquee_traits::surface::SurfaceError;
use thiserror::Error;

/// Errors surfaced by measurement and fitting.
///
/// Degenerate fits (zero-width targets, runaway searches) are not errors;
/// the search recovers by clamping to its floor. Only host measurement
/// faults propagate, unchanged and without retry.
#[derive(Debug, Clone, Error)]
pub enum FitError {
    /// The measurement surface failed or is unreachable.
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

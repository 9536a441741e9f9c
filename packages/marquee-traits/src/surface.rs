//! The measurement surface capability.
//!
//! Fitting derives sizes by measuring throwaway probe renders, never the
//! visible output. A [`MeasurementSurface`] hosts those probes: it creates
//! an isolated, non-reflowing element, applies a style snapshot and a
//! candidate size, sets text content, and reports the rendered width.
//! Probes must not affect the host's layout or be visible to assistive
//! technology.

use thiserror::Error;

/// Handle to a probe hosted on a [`MeasurementSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProbeId(pub u32);

/// Style snapshot applied to a probe before its width is read back.
///
/// Deliberately flat: a probe participates in no cascade, so everything
/// that affects advance widths is spelled out per measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeStyle {
    /// Ordered font fallback list.
    pub font_stack: Vec<String>,
    /// Candidate size in em units.
    pub font_size_em: f32,
    /// Additional per-glyph tracking, in em.
    pub letter_spacing_em: Option<f32>,
    /// Word spacing adjustment, in ch units.
    pub word_spacing_ch: Option<f32>,
    /// Map the probe text to uppercase before measuring.
    pub uppercase: bool,
    /// Oblique presentation.
    pub oblique: bool,
}

/// Errors reported by a measurement surface.
#[derive(Debug, Clone, Error)]
pub enum SurfaceError {
    /// No measurement surface is reachable. Deterministic: retrying the
    /// same call cannot succeed.
    #[error("no measurement surface reachable")]
    Unavailable,

    /// The surface was asked about a probe it does not host.
    #[error("unknown probe {0:?}")]
    UnknownProbe(ProbeId),

    /// The surface failed while servicing a probe operation.
    #[error("probe operation failed: {0}")]
    Probe(String),
}

/// An isolated environment for measuring candidate renders.
///
/// All operations are synchronous, and measurements are never interleaved:
/// the surface is borrowed mutably for the duration of each one. Callers
/// are responsible for removing every probe they create;
/// [`remove_probe`](Self::remove_probe) is infallible so teardown can run
/// on error paths too.
pub trait MeasurementSurface {
    /// Create an empty probe.
    fn create_probe(&mut self) -> Result<ProbeId, SurfaceError>;

    /// Apply a style snapshot to a probe.
    fn set_style(&mut self, probe: ProbeId, style: &ProbeStyle) -> Result<(), SurfaceError>;

    /// Replace a probe's text content.
    fn set_text(&mut self, probe: ProbeId, text: &str) -> Result<(), SurfaceError>;

    /// Read back the rendered width of a probe, in pixels.
    fn measured_width(&mut self, probe: ProbeId) -> Result<f32, SurfaceError>;

    /// Destroy a probe. Unknown probes are ignored.
    fn remove_probe(&mut self, probe: ProbeId);
}

/// Surface that refuses every measurement.
///
/// Stand-in for headless contexts with no measurement environment at all;
/// every fit against it fails with [`SurfaceError::Unavailable`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMeasurementSurface;

impl MeasurementSurface for DummyMeasurementSurface {
    fn create_probe(&mut self) -> Result<ProbeId, SurfaceError> {
        Err(SurfaceError::Unavailable)
    }

    fn set_style(&mut self, _probe: ProbeId, _style: &ProbeStyle) -> Result<(), SurfaceError> {
        Err(SurfaceError::Unavailable)
    }

    fn set_text(&mut self, _probe: ProbeId, _text: &str) -> Result<(), SurfaceError> {
        Err(SurfaceError::Unavailable)
    }

    fn measured_width(&mut self, _probe: ProbeId) -> Result<f32, SurfaceError> {
        Err(SurfaceError::Unavailable)
    }

    fn remove_probe(&mut self, _probe: ProbeId) {}
}

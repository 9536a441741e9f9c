//! Probe-based text measurement.

use marquee_traits::surface::{MeasurementSurface, ProbeId};

use crate::error::FitError;
use crate::normalize::CJK_SCALE;
use crate::style::StyleProfile;

/// Measures the rendered width of a text run on an injected surface.
///
/// One probe is created per measurement and removed on every exit path,
/// so a failing surface cannot leak probes into the host.
#[derive(Debug)]
pub struct TextMeasurer<S> {
    surface: S,
}

impl<S: MeasurementSurface> TextMeasurer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// The injected surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Measure `text` under `style` at a candidate size, in pixels.
    ///
    /// CJK runs are measured at the boosted scale they render at. Empty
    /// text measures as zero without touching the surface.
    pub fn measure(
        &mut self,
        text: &str,
        style: &StyleProfile,
        font_size_em: f32,
        cjk: bool,
    ) -> Result<f32, FitError> {
        if text.is_empty() {
            return Ok(0.0);
        }

        let size = if cjk { font_size_em * CJK_SCALE } else { font_size_em };

        let probe = self.surface.create_probe()?;
        let width = self.probe_width(probe, text, style, size, cjk);
        // Teardown runs no matter how the measurement went.
        self.surface.remove_probe(probe);
        width
    }

    fn probe_width(
        &mut self,
        probe: ProbeId,
        text: &str,
        style: &StyleProfile,
        font_size_em: f32,
        oblique: bool,
    ) -> Result<f32, FitError> {
        self.surface
            .set_style(probe, &style.probe_style(font_size_em, oblique))?;
        self.surface.set_text(probe, text)?;
        Ok(self.surface.measured_width(probe)?)
    }
}

#[cfg(test)]
mod tests {
    use marquee_traits::surface::{
        DummyMeasurementSurface, MeasurementSurface, ProbeId, ProbeStyle, SurfaceError,
    };

    use super::TextMeasurer;
    use crate::error::FitError;
    use crate::style::StyleProfile;

    /// Surface that errors on width reads but tracks probe lifecycles.
    #[derive(Default)]
    struct FailingSurface {
        live_probes: usize,
        next_probe: u32,
    }

    impl MeasurementSurface for FailingSurface {
        fn create_probe(&mut self) -> Result<ProbeId, SurfaceError> {
            let id = ProbeId(self.next_probe);
            self.next_probe += 1;
            self.live_probes += 1;
            Ok(id)
        }

        fn set_style(&mut self, _probe: ProbeId, _style: &ProbeStyle) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn set_text(&mut self, _probe: ProbeId, _text: &str) -> Result<(), SurfaceError> {
            Ok(())
        }

        fn measured_width(&mut self, _probe: ProbeId) -> Result<f32, SurfaceError> {
            Err(SurfaceError::Probe("flaky host".into()))
        }

        fn remove_probe(&mut self, _probe: ProbeId) {
            self.live_probes -= 1;
        }
    }

    #[test]
    fn empty_text_measures_zero_without_a_probe() {
        let mut measurer = TextMeasurer::new(DummyMeasurementSurface);
        let width = measurer
            .measure("", &StyleProfile::line(), 2.0, false)
            .unwrap();
        assert_eq!(width, 0.0);
    }

    #[test]
    fn unavailable_surface_propagates() {
        let mut measurer = TextMeasurer::new(DummyMeasurementSurface);
        let err = measurer
            .measure("abc", &StyleProfile::line(), 2.0, false)
            .unwrap_err();
        assert!(matches!(
            err,
            FitError::Surface(SurfaceError::Unavailable)
        ));
    }

    #[test]
    fn probe_is_removed_on_the_error_path() {
        let mut measurer = TextMeasurer::new(FailingSurface::default());
        assert!(measurer
            .measure("abc", &StyleProfile::line(), 2.0, false)
            .is_err());
        assert_eq!(measurer.surface().live_probes, 0);
    }
}

//! The fit-to-width search.

use marquee_traits::surface::MeasurementSurface;

use crate::error::FitError;
use crate::measure::TextMeasurer;
use crate::normalize::{normalize, NormalizeOptions, Normalized};
use crate::style::StyleProfile;

/// Search knobs, shared across every fit a document runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    /// Rendered pixels per em assumed when seeding the search.
    pub seed_divisor: f32,
    /// Quantization step: one visually distinct size increment.
    pub size_step_em: f32,
    /// Smallest size the search will return. Must be positive.
    pub min_font_size_em: f32,
    /// Upper bound on re-measurements for a single fit.
    pub max_search_iterations: u32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            seed_divisor: 32.0,
            size_step_em: 0.125,
            min_font_size_em: 0.125,
            max_search_iterations: 256,
        }
    }
}

/// One fit request.
#[derive(Debug, Clone)]
pub struct FitTarget<'a> {
    /// The displayed text. Normalization derives the measured string.
    pub text: &'a str,
    /// Style profile of the node kind being fitted.
    pub style: &'a StyleProfile,
    /// Box width of the owning container, in pixels.
    pub container_width_px: f32,
    /// Fraction of the container width the run should occupy.
    pub margin_ratio: f32,
    /// Pad short measurement strings up to this many characters.
    pub min_measure_length: Option<usize>,
    /// Substitute special-character runs before measuring.
    pub substitute_special_chars: bool,
}

/// Outcome of a fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Fitted size: a positive multiple of the step.
    pub font_size_em: f32,
    /// Width measured at the fitted size, in pixels.
    pub measured_width_px: f32,
    /// Classification the measurement string was derived under.
    pub cjk: bool,
}

/// Linear hill-climb over quantized candidate sizes.
///
/// Deliberately not a binary search: the step is one visually distinct
/// increment, realistic targets converge within a handful of measurements,
/// and walking guarantees the returned size is the first crossing of the
/// goal from whichever side the seed landed on.
#[derive(Debug)]
pub struct FitSearch<S> {
    measurer: TextMeasurer<S>,
    params: FitParams,
}

impl<S: MeasurementSurface> FitSearch<S> {
    pub fn new(measurer: TextMeasurer<S>, params: FitParams) -> Self {
        Self { measurer, params }
    }

    pub fn params(&self) -> &FitParams {
        &self.params
    }

    pub fn measurer(&self) -> &TextMeasurer<S> {
        &self.measurer
    }

    pub fn measurer_mut(&mut self) -> &mut TextMeasurer<S> {
        &mut self.measurer
    }

    /// Find the size at which the measured width first crosses the goal.
    ///
    /// Degenerate inputs (goal <= 0, a measurement that never reaches the
    /// goal, stepping that would cross below the floor) clamp to
    /// `min_font_size_em` and return normally; only surface faults error.
    pub fn fit(&mut self, target: &FitTarget<'_>) -> Result<FitResult, FitError> {
        let FitParams {
            seed_divisor,
            size_step_em: step,
            min_font_size_em: floor,
            max_search_iterations,
        } = self.params;

        let goal = target.container_width_px * target.margin_ratio;
        let normalized = normalize(
            target.text,
            &NormalizeOptions {
                substitute_special_chars: target.substitute_special_chars,
                min_measure_length: target.min_measure_length,
            },
        );

        if goal <= 0.0 {
            // Nothing to fill. Absent or collapsed containers are an
            // expected transient state, not an error.
            return Ok(FitResult {
                font_size_em: floor,
                measured_width_px: 0.0,
                cjk: normalized.cjk,
            });
        }

        // Seed from the pixels-per-em heuristic, on the step grid.
        let mut size = ((goal / seed_divisor) / step).floor() * step;
        if size < floor {
            size = floor;
        }

        let mut measured = self.measure_at(&normalized, target.style, size)?;

        if measured < goal {
            // Grow until the goal is first met or passed.
            let mut iterations = 0u32;
            while measured < goal {
                if iterations >= max_search_iterations {
                    log::debug!(
                        "fit search exhausted {max_search_iterations} iterations growing \
                         towards {goal}px; clamping to floor"
                    );
                    return self.floored(&normalized, target.style);
                }
                size += step;
                measured = self.measure_at(&normalized, target.style, size)?;
                iterations += 1;
            }
        } else if measured > goal {
            // Shrink until the goal is first met or undershot.
            let mut iterations = 0u32;
            while measured > goal {
                if size - step < floor || iterations >= max_search_iterations {
                    return self.floored(&normalized, target.style);
                }
                size -= step;
                measured = self.measure_at(&normalized, target.style, size)?;
                iterations += 1;
            }
        }

        Ok(FitResult {
            font_size_em: size,
            measured_width_px: measured,
            cjk: normalized.cjk,
        })
    }

    fn measure_at(
        &mut self,
        normalized: &Normalized,
        style: &StyleProfile,
        font_size_em: f32,
    ) -> Result<f32, FitError> {
        self.measurer
            .measure(&normalized.text, style, font_size_em, normalized.cjk)
    }

    fn floored(
        &mut self,
        normalized: &Normalized,
        style: &StyleProfile,
    ) -> Result<FitResult, FitError> {
        let floor = self.params.min_font_size_em;
        let measured = self.measure_at(normalized, style, floor)?;
        Ok(FitResult {
            font_size_em: floor,
            measured_width_px: measured,
            cjk: normalized.cjk,
        })
    }
}

//! Document construction options.

use std::sync::Arc;

use marquee_text::fit::FitParams;
use marquee_text::style::StyleProfile;
use marquee_traits::status::StatusProvider;

/// Recognized fitting options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Fraction of the derived target width a run should fill.
    pub margin_ratio: f32,
    /// Fraction of the block width granted to the script overlay.
    pub script_ratio: f32,
    /// Minimum measurement length for the script node.
    pub min_measure_length: usize,
    /// Substitute special characters in non-CJK script text.
    pub substitute_special_chars: bool,
    /// Quantization step for fitted sizes.
    pub size_step_em: f32,
    /// Smallest size a fit may return. Must be positive.
    pub min_font_size_em: f32,
    /// Upper bound on re-measurements per fit.
    pub max_search_iterations: u32,
    /// Pixels-per-em heuristic used to seed the search.
    pub seed_divisor: f32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            margin_ratio: 0.85,
            script_ratio: 0.75,
            min_measure_length: 8,
            substitute_special_chars: true,
            size_step_em: 0.125,
            min_font_size_em: 0.125,
            max_search_iterations: 256,
            seed_divisor: 32.0,
        }
    }
}

impl FitOptions {
    pub(crate) fn search_params(&self) -> FitParams {
        FitParams {
            seed_divisor: self.seed_divisor,
            size_step_em: self.size_step_em,
            min_font_size_em: self.min_font_size_em,
            max_search_iterations: self.max_search_iterations,
        }
    }
}

/// Options used when constructing a
/// [`TitleDocument`](crate::TitleDocument).
#[derive(Default)]
pub struct DocumentConfig {
    /// Fitting knobs. Defaults match the shipped title styling.
    pub options: FitOptions,
    /// Style profile override for line nodes.
    pub line_style: Option<StyleProfile>,
    /// Style profile override for the script node.
    pub script_style: Option<StyleProfile>,
    /// Defer node-kind registration to the embedder (readiness stays
    /// pending until both kinds arrive via `register_style`). Used when
    /// profiles depend on asynchronously loaded fonts.
    pub defer_styles: bool,
    /// Receiver for populate-settled announcements.
    pub status_provider: Option<Arc<dyn StatusProvider>>,
}

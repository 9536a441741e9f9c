//! A deterministic measurement surface backed by parsed font faces.
//!
//! Embedders without a layout engine still need widths. This surface loads
//! raw font data, resolves per-character horizontal advances through the
//! face fallback chain, and sums them at the probe's candidate size. It is
//! fully synchronous, keeps no global state, and its probes are plain
//! entries in a map, so it trivially satisfies the isolation contract.

use std::collections::HashMap;

use marquee_traits::surface::{MeasurementSurface, ProbeId, ProbeStyle, SurfaceError};
use ttf_parser::Face;

/// Advance assumed for characters no loaded face covers, in em.
const MISSING_GLYPH_ADVANCE_EM: f32 = 0.65;

/// Default base font size: rendered pixels per em at size 1.
const DEFAULT_PX_PER_EM: f32 = 16.0;

/// Owned font data. ttf-parser faces borrow their backing bytes, so the
/// surface keeps the bytes and re-parses on demand (parsing only validates
/// headers; the tables are read lazily).
struct LoadedFace {
    data: Vec<u8>,
    index: u32,
}

#[derive(Default)]
struct Probe {
    text: String,
    style: Option<ProbeStyle>,
}

/// Font-metrics measurement surface.
pub struct FontMetricsSurface {
    faces: Vec<LoadedFace>,
    px_per_em: f32,
    probes: HashMap<ProbeId, Probe>,
    next_probe: u32,
}

impl Default for FontMetricsSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetricsSurface {
    pub fn new() -> Self {
        Self::with_px_per_em(DEFAULT_PX_PER_EM)
    }

    /// Surface with a non-default base font size.
    pub fn with_px_per_em(px_per_em: f32) -> Self {
        Self {
            faces: Vec::new(),
            px_per_em,
            probes: HashMap::new(),
            next_probe: 0,
        }
    }

    /// Register a font face. Earlier faces win the fallback chain.
    ///
    /// The data is validated up front so measurement never hits a parse
    /// fault mid-search.
    pub fn load_face(&mut self, data: Vec<u8>) -> Result<(), SurfaceError> {
        Face::parse(&data, 0)
            .map_err(|err| SurfaceError::Probe(format!("font parse failed: {err}")))?;
        self.faces.push(LoadedFace { data, index: 0 });
        Ok(())
    }

    /// Number of live probes. Probes should only exist inside a
    /// measurement call, so anything non-zero between calls is a leak.
    pub fn live_probes(&self) -> usize {
        self.probes.len()
    }

    /// Advance of one character in em, resolved through the fallback
    /// chain.
    fn char_advance_em(&self, ch: char) -> f32 {
        for loaded in &self.faces {
            let Ok(face) = Face::parse(&loaded.data, loaded.index) else {
                continue;
            };
            if let Some(glyph) = face.glyph_index(ch) {
                if let Some(advance) = face.glyph_hor_advance(glyph) {
                    return f32::from(advance) / f32::from(face.units_per_em());
                }
            }
        }
        MISSING_GLYPH_ADVANCE_EM
    }

    fn width_px(&self, probe: &Probe) -> Result<f32, SurfaceError> {
        let style = probe
            .style
            .as_ref()
            .ok_or_else(|| SurfaceError::Probe("probe measured before styling".into()))?;

        let mut width_em = 0.0f32;
        let mut glyphs = 0usize;
        let mut spaces = 0usize;
        for ch in probe.text.chars() {
            if style.uppercase {
                for upper in ch.to_uppercase() {
                    width_em += self.char_advance_em(upper);
                    glyphs += 1;
                }
            } else {
                width_em += self.char_advance_em(ch);
                glyphs += 1;
            }
            if ch == ' ' {
                spaces += 1;
            }
        }

        if let Some(tracking) = style.letter_spacing_em {
            width_em += tracking * glyphs.saturating_sub(1) as f32;
        }
        if let Some(word_spacing) = style.word_spacing_ch {
            // ch unit approximated by the '0' advance, as rendered.
            width_em += word_spacing * self.char_advance_em('0') * spaces as f32;
        }

        Ok(width_em.max(0.0) * style.font_size_em * self.px_per_em)
    }
}

impl MeasurementSurface for FontMetricsSurface {
    fn create_probe(&mut self) -> Result<ProbeId, SurfaceError> {
        let id = ProbeId(self.next_probe);
        self.next_probe = self.next_probe.wrapping_add(1);
        self.probes.insert(id, Probe::default());
        Ok(id)
    }

    fn set_style(&mut self, probe: ProbeId, style: &ProbeStyle) -> Result<(), SurfaceError> {
        let entry = self
            .probes
            .get_mut(&probe)
            .ok_or(SurfaceError::UnknownProbe(probe))?;
        entry.style = Some(style.clone());
        Ok(())
    }

    fn set_text(&mut self, probe: ProbeId, text: &str) -> Result<(), SurfaceError> {
        let entry = self
            .probes
            .get_mut(&probe)
            .ok_or(SurfaceError::UnknownProbe(probe))?;
        entry.text.clear();
        entry.text.push_str(text);
        Ok(())
    }

    fn measured_width(&mut self, probe: ProbeId) -> Result<f32, SurfaceError> {
        let entry = self
            .probes
            .get(&probe)
            .ok_or(SurfaceError::UnknownProbe(probe))?;
        self.width_px(entry)
    }

    fn remove_probe(&mut self, probe: ProbeId) {
        self.probes.remove(&probe);
    }
}

//! Measurement-string normalization.
//!
//! The string handed to the measurer is derived from the displayed text
//! and may differ from it: CJK classification switches the padding filler
//! and suppresses substitution, special characters collapse to a
//! fixed-width placeholder, and short strings are padded so they are not
//! over-magnified. The displayed text itself is never altered here.

/// CJK / Kana / fullwidth ranges used for classification.
const CJK_RANGES: [(u32, u32); 6] = [
    (0x3000, 0x303F), // CJK symbols and punctuation
    (0x3040, 0x309F), // hiragana
    (0x30A0, 0x30FF), // katakana
    (0xFF00, 0xFF9F), // fullwidth forms, halfwidth kana
    (0x4E00, 0x9FAF), // unified ideographs
    (0x3400, 0x4DBF), // ideographs extension A
];

/// Measure/render scale applied to CJK text: +12.5% over the fitted size.
pub const CJK_SCALE: f32 = 1.125;

/// Placeholder substituted for each run of special characters. Two
/// characters wide, approximating the companion glyph set those
/// characters render from at a smaller scale.
const PLACEHOLDER: &str = "xx";

/// Filler appended to reach the minimum measurement length.
const LATIN_FILLER: char = 'x';
/// Kana filler used instead when the text classifies as CJK.
const KANA_FILLER: char = 'あ';

/// Whether a single character falls in one of the CJK ranges.
pub fn is_cjk(ch: char) -> bool {
    let code = ch as u32;
    CJK_RANGES.iter().any(|&(lo, hi)| (lo..=hi).contains(&code))
}

/// Whether any character classifies the run as CJK.
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Knobs for deriving a measurement string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeOptions {
    /// Replace special-character runs with the fixed placeholder.
    /// Suppressed for CJK text regardless of this flag.
    pub substitute_special_chars: bool,
    /// Pad the measurement string with filler up to this many characters.
    pub min_measure_length: Option<usize>,
}

/// A measurement string plus the classification that shaped it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    /// The string to measure. May differ from the displayed text.
    pub text: String,
    /// Whether the displayed text classified as CJK.
    pub cjk: bool,
}

/// Derive the measurement string for a displayed text run.
pub fn normalize(text: &str, options: &NormalizeOptions) -> Normalized {
    let cjk = contains_cjk(text);

    let mut out = if options.substitute_special_chars && !cjk {
        substitute_special_runs(text)
    } else {
        text.to_owned()
    };

    if let Some(min_len) = options.min_measure_length {
        let filler = if cjk { KANA_FILLER } else { LATIN_FILLER };
        let mut len = out.chars().count();
        while len < min_len {
            out.push(filler);
            len += 1;
        }
    }

    Normalized { text: out, cjk }
}

/// Characters measured as themselves; anything else belongs to a
/// substituted run.
fn is_plain(ch: char) -> bool {
    ch.is_ascii_alphabetic()
        || matches!(
            ch,
            '\'' | '"' | '!' | '@' | '(' | ')' | '_' | '-' | '^' | ' '
        )
}

/// Replace each maximal run of special characters with [`PLACEHOLDER`].
fn substitute_special_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if is_plain(ch) {
            out.push(ch);
            in_run = false;
        } else if !in_run {
            out.push_str(PLACEHOLDER);
            in_run = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> NormalizeOptions {
        NormalizeOptions::default()
    }

    #[test]
    fn kana_classifies_as_cjk() {
        assert!(contains_cjk("こんにちは"));
    }

    #[test]
    fn latin_does_not_classify_as_cjk() {
        assert!(!contains_cjk("HELLO"));
    }

    #[test]
    fn ideographs_and_fullwidth_classify_as_cjk() {
        assert!(contains_cjk("進撃"));
        assert!(contains_cjk("ＡＢＣ"));
        // A single CJK character amid Latin flips the whole run.
        assert!(contains_cjk("abc の xyz"));
    }

    #[test]
    fn special_runs_collapse_to_placeholder() {
        let opts = NormalizeOptions {
            substitute_special_chars: true,
            min_measure_length: None,
        };
        assert_eq!(normalize("A&B", &opts).text, "AxxB");
        // A maximal run substitutes once, not per character.
        assert_eq!(normalize("A&&&B", &opts).text, "AxxB");
        assert_eq!(normalize("#1", &opts).text, "xx");
        // Allow-set characters survive untouched.
        assert_eq!(normalize("it's (fine)!", &opts).text, "it's (fine)!");
    }

    #[test]
    fn substitution_suppressed_for_cjk() {
        let opts = NormalizeOptions {
            substitute_special_chars: true,
            min_measure_length: None,
        };
        let normalized = normalize("進撃&巨人", &opts);
        assert!(normalized.cjk);
        assert_eq!(normalized.text, "進撃&巨人");
    }

    #[test]
    fn short_text_pads_to_minimum_length() {
        let opts = NormalizeOptions {
            substitute_special_chars: false,
            min_measure_length: Some(8),
        };
        let normalized = normalize("abc", &opts);
        assert_eq!(normalized.text, "abcxxxxx");
        assert_eq!(normalized.text.chars().count(), 8);
    }

    #[test]
    fn cjk_pads_with_kana_filler() {
        let opts = NormalizeOptions {
            substitute_special_chars: false,
            min_measure_length: Some(5),
        };
        let normalized = normalize("進撃", &opts);
        assert_eq!(normalized.text, "進撃あああ");
    }

    #[test]
    fn long_text_is_untouched() {
        let opts = NormalizeOptions {
            substitute_special_chars: false,
            min_measure_length: Some(4),
        };
        assert_eq!(normalize("attack on titan", &opts).text, "attack on titan");
    }

    #[test]
    fn no_options_is_identity() {
        assert_eq!(normalize("A&B", &plain()).text, "A&B");
    }
}

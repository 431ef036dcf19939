//! Text measurement and width-budgeted truncation for axis labels.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub const ELLIPSIS: &str = "...";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    pub family: String,
    /// Size in pixels.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Roboto, sans-serif".to_string(),
            size: 12.0,
        }
    }
}

impl FontSpec {
    /// CSS shorthand, e.g. `12px Roboto, sans-serif`.
    pub fn css(&self) -> String {
        format!("{}px {}", self.size, self.family)
    }
}

/// Off-screen text measurement, usually backed by a hidden canvas.
pub trait TextMeasurer: Send + Sync {
    /// Rendered width of `text` in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// Estimates widths from an average glyph advance. Used when no canvas is available.
#[derive(Clone, Copy, Debug)]
pub struct ApproxTextMeasurer {
    /// Average glyph advance as a fraction of the font size.
    pub glyph_ratio: f32,
}

impl Default for ApproxTextMeasurer {
    fn default() -> Self {
        Self { glyph_ratio: 0.6 }
    }
}

impl TextMeasurer for ApproxTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.glyph_ratio
    }
}

/// Memoizes another measurer per (font, text).
pub struct CachedMeasurer {
    inner: Arc<dyn TextMeasurer>,
    cache: Mutex<HashMap<(String, String), f32>>,
}

impl CachedMeasurer {
    pub fn new(inner: Arc<dyn TextMeasurer>) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.lock().len()
    }
}

impl TextMeasurer for CachedMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        let key = (font.css(), text.to_string());
        if let Some(width) = self.cache.lock().get(&key) {
            return *width;
        }
        let width = self.inner.measure(text, font);
        self.cache.lock().insert(key, width);
        width
    }
}

/// Shortens `text` with a trailing ellipsis so it fits `max_width`.
///
/// Text that measures as zero or non-finite is returned unchanged. When not
/// even one character fits, the ellipsis alone is returned.
pub fn truncate_text(
    measurer: &dyn TextMeasurer,
    font: &FontSpec,
    text: &str,
    max_width: f32,
) -> String {
    let full = measurer.measure(text, font);
    if !full.is_finite() || full <= 0.0 || full <= max_width {
        return text.to_string();
    }

    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let fits = |chars: usize| {
        let prefix = &text[..boundaries[chars]];
        measurer.measure(&format!("{prefix}{ELLIPSIS}"), font) <= max_width
    };

    // Largest prefix length whose ellipsized form fits; widths grow with length.
    let (mut lo, mut hi) = (0usize, boundaries.len());
    while lo + 1 < hi {
        let mid = (lo + hi) / 2;
        if fits(mid) {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    if lo == 0 {
        return ELLIPSIS.to_string();
    }
    format!("{}{ELLIPSIS}", &text[..boundaries[lo]])
}

/// Widest label in pixels, 0 for none.
pub fn longest_width<S: AsRef<str>>(measurer: &dyn TextMeasurer, font: &FontSpec, labels: &[S]) -> f32 {
    labels
        .iter()
        .map(|l| measurer.measure(l.as_ref(), font))
        .filter(|w| w.is_finite())
        .fold(0.0, f32::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ZeroWidth;

    impl TextMeasurer for ZeroWidth {
        fn measure(&self, _text: &str, _font: &FontSpec) -> f32 {
            0.0
        }
    }

    fn font() -> FontSpec {
        FontSpec {
            family: "mono".into(),
            size: 10.0,
        }
    }

    #[test]
    fn fitting_text_is_untouched() {
        let m = ApproxTextMeasurer { glyph_ratio: 1.0 };
        assert_eq!(truncate_text(&m, &font(), "abc", 30.0), "abc");
    }

    #[test]
    fn long_text_gets_ellipsis() {
        let m = ApproxTextMeasurer { glyph_ratio: 1.0 };
        // 10px per glyph: "ab..." is 50px.
        assert_eq!(truncate_text(&m, &font(), "abcdefgh", 55.0), "ab...");
        assert_eq!(truncate_text(&m, &font(), "abcdefgh", 20.0), "...");
    }

    #[test]
    fn unmeasurable_text_is_returned_as_is() {
        assert_eq!(truncate_text(&ZeroWidth, &font(), "abcdefgh", 1.0), "abcdefgh");
    }

    #[test]
    fn multibyte_text_truncates_on_char_boundaries() {
        let m = ApproxTextMeasurer { glyph_ratio: 1.0 };
        assert_eq!(truncate_text(&m, &font(), "éàüöß", 45.0), "é...");
    }

    #[test]
    fn cache_memoizes_per_font_and_text() {
        let cached = CachedMeasurer::new(Arc::new(ApproxTextMeasurer::default()));
        cached.measure("abc", &font());
        cached.measure("abc", &font());
        cached.measure("abcd", &font());
        assert_eq!(cached.cached_entries(), 2);
    }
}

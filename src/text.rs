use std::marker::PhantomData;

use raylib::prelude::*;

pub trait TextMeasure {
    /// Width in pixels of `text` drawn with the default font at `size`.
    fn text_width(&self, text: &str, size: i32) -> f32;
}

/// Measures with raylib's default font. Needs an open window, which the
/// thread token proves.
pub struct RaylibMeasure<'a>(PhantomData<&'a RaylibThread>);

impl<'a> RaylibMeasure<'a> {
    pub fn new(_thread: &'a RaylibThread) -> Self {
        Self(PhantomData)
    }
}

impl TextMeasure for RaylibMeasure<'_> {
    fn text_width(&self, text: &str, size: i32) -> f32 {
        raylib::core::text::measure_text(text, size) as f32
    }
}

/// Greedy word wrap. A word wider than `max_width` gets a line of its own.
pub fn wrap_text(text: &str, max_width: f32, size: i32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure.text_width(&candidate, size) <= max_width {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Every glyph is half the font size wide.
    pub(crate) struct MonoMeasure;

    impl TextMeasure for MonoMeasure {
        fn text_width(&self, text: &str, size: i32) -> f32 {
            text.chars().count() as f32 * size as f32 * 0.5
        }
    }

    #[test]
    fn wraps_on_word_boundaries() {
        // 10px glyphs, 100px lines: ten characters per line
        let lines = wrap_text("the quick brown fox jumps", 100.0, 20, &MonoMeasure);
        assert_eq!(lines, ["the quick", "brown fox", "jumps"]);
    }

    #[test]
    fn long_words_get_their_own_line() {
        let lines = wrap_text("a disarmament b", 60.0, 20, &MonoMeasure);
        assert_eq!(lines, ["a", "disarmament", "b"]);
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("   ", 100.0, 20, &MonoMeasure).is_empty());
    }
}

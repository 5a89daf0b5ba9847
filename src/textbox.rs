//! Rectangular boxes holding wrapped text.
//!
//! Text width is estimated, not measured: every character is taken to be
//! half the font size wide. Wrapping is greedy and never splits words.

use crate::size::Size;

/// Font and spacing parameters of a [`TextBox`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font_size: Size,
    pub padding: Size,
    pub line_spacing: Size,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font_size: Size::points(10.0),
            padding: Size::points(4.0),
            line_spacing: Size::points(1.5),
        }
    }
}

/// One wrapped line with the position of its baseline center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextLine<'a> {
    pub text: &'a str,
    pub x: Size,
    pub y: Size,
}

/// A box with text inside.
///
/// The box is sized so that all wrapped lines fit vertically. Geometry
/// setters do not reflow; call [`TextBox::reflow`] after changing the width.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    x0: Size,
    y0: Size,
    width: Size,
    max_width: Size,
    height: Size,
    text: String,
    lines: Vec<String>,
    style: TextStyle,
    href: Option<String>,
}

impl TextBox {
    /// Create a box at the origin and wrap `text` to fit `width`.
    pub fn new(text: impl Into<String>, width: Size, style: TextStyle) -> Self {
        let text = text.into();
        let mut textbox = TextBox {
            x0: Size::ZERO,
            y0: Size::ZERO,
            width,
            max_width: Size::ZERO,
            height: Size::ZERO,
            lines: hard_lines(&text),
            text,
            style,
            href: None,
        };
        textbox.reflow();
        textbox
    }

    /// Create a box with an explicit height; the text is not wrapped.
    pub fn fixed(x0: Size, y0: Size, width: Size, height: Size, text: impl Into<String>) -> Self {
        let text = text.into();
        TextBox {
            x0,
            y0,
            width,
            max_width: Size::ZERO,
            height,
            lines: hard_lines(&text),
            text,
            style: TextStyle::default(),
            href: None,
        }
    }

    /// Allow the box to grow up to `max_width` when that saves lines.
    pub fn with_max_width(mut self, max_width: Size) -> Self {
        self.max_width = max_width;
        self.reflow();
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn at(mut self, x0: Size, y0: Size) -> Self {
        self.move_to(x0, y0);
        self
    }

    pub fn x0(&self) -> Size {
        self.x0
    }

    pub fn y0(&self) -> Size {
        self.y0
    }

    pub fn x1(&self) -> Size {
        self.x0 + self.width
    }

    pub fn y1(&self) -> Size {
        self.y0 + self.height
    }

    pub fn midx(&self) -> Size {
        self.x0 + self.width / 2.0
    }

    pub fn midy(&self) -> Size {
        self.y0 + self.height / 2.0
    }

    pub fn width(&self) -> Size {
        self.width
    }

    pub fn max_width(&self) -> Size {
        self.max_width
    }

    pub fn height(&self) -> Size {
        self.height
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn font_size(&self) -> Size {
        self.style.font_size
    }

    pub fn href(&self) -> Option<&str> {
        self.href.as_deref()
    }

    pub fn move_to(&mut self, x0: Size, y0: Size) {
        self.x0 = x0;
        self.y0 = y0;
    }

    pub fn set_x0(&mut self, x0: Size) {
        self.x0 = x0;
    }

    pub fn set_y0(&mut self, y0: Size) {
        self.y0 = y0;
    }

    pub fn set_width(&mut self, width: Size) {
        self.width = width;
    }

    /// Re-wrap the text for the current width and recompute the height.
    pub fn reflow(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.lines = self.split_text(&text);
        self.text = text;

        let nlines = self.lines.len() as f64;
        self.height = nlines * self.style.font_size
            + (nlines - 1.0) * self.style.line_spacing
            + 2.0 * self.style.padding;
    }

    /// Wrapped lines with their baseline positions, top to bottom.
    pub fn positioned_lines(&self) -> impl Iterator<Item = TextLine<'_>> {
        let x = self.midx();
        self.lines.iter().enumerate().map(move |(i, line)| TextLine {
            text: line,
            x,
            y: self.y0
                + self.style.padding
                + self.style.font_size * (i + 1) as f64
                + self.style.line_spacing * i as f64,
        })
    }

    /// Wrap within the nominal width, widening up to `max_width` when that
    /// gives fewer lines.
    fn split_text(&mut self, text: &str) -> Vec<String> {
        let width = self.width - 2.0 * self.style.padding;
        let lines = self.split_within(text, width);

        if lines.len() > 1 && self.max_width > self.width {
            let wide = self.max_width - 2.0 * self.style.padding;
            let wide_lines = self.split_within(text, wide);
            if wide_lines.len() < lines.len() {
                let widest = wide_lines
                    .iter()
                    .map(|line| self.text_width(line))
                    .fold(Size::ZERO, Size::max);
                self.width = widest + 2.0 * self.style.padding;
                return wide_lines;
            }
        }

        lines
    }

    fn split_within(&self, text: &str, width: Size) -> Vec<String> {
        let mut lines = Vec::new();
        for segment in text.split('\n') {
            let mut words: Vec<String> = segment.split_whitespace().map(str::to_string).collect();
            let mut idx = 0;
            while idx + 1 < words.len() {
                let joined = format!("{} {}", words[idx], words[idx + 1]);
                if self.text_width(&joined) <= width {
                    words[idx] = joined;
                    words.remove(idx + 1);
                } else {
                    idx += 1;
                }
            }
            lines.extend(words);
        }
        lines
    }

    fn text_width(&self, text: &str) -> Size {
        self.style.font_size * text.chars().count() as f64 * 0.5
    }
}

fn hard_lines(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(value: f64) -> Size {
        Size::points(value)
    }

    fn assert_close(actual: Size, expected: Size) {
        assert!(
            (actual.pt() - expected.pt()).abs() < 1e-9,
            "expected {}pt, got {}pt",
            expected.pt(),
            actual.pt()
        );
    }

    // ==== Geometry tests ====

    #[test]
    fn fixed_box_keeps_dimensions() {
        let textbox = TextBox::fixed(Size::inches(1.0), Size::inches(2.0), Size::inches(4.0), Size::inches(8.0), "abc");
        assert_eq!(textbox.x0().in_inches(), 1.0);
        assert_eq!(textbox.y0().in_inches(), 2.0);
        assert_eq!(textbox.width().in_inches(), 4.0);
        assert_eq!(textbox.height().in_inches(), 8.0);
        assert_eq!(textbox.text(), "abc");
    }

    #[test]
    fn derived_coordinates() {
        let textbox = TextBox::fixed(Size::inches(1.0), Size::inches(2.0), Size::inches(4.0), Size::inches(8.0), "");
        assert_eq!(textbox.x1().in_inches(), 5.0);
        assert_eq!(textbox.y1().in_inches(), 10.0);
        assert_eq!(textbox.midx().in_inches(), 3.0);
        assert_eq!(textbox.midy().in_inches(), 6.0);
    }

    #[test]
    fn move_and_resize() {
        let mut textbox = TextBox::new("abc", pt(36.0), TextStyle::default()).at(pt(10.0), pt(20.0));
        assert_eq!(textbox.x0(), pt(10.0));
        assert_eq!(textbox.y0(), pt(20.0));
        textbox.set_x0(pt(1.0));
        textbox.set_y0(pt(2.0));
        textbox.set_width(pt(50.0));
        assert_eq!(textbox.x0(), pt(1.0));
        assert_eq!(textbox.y0(), pt(2.0));
        assert_eq!(textbox.width(), pt(50.0));
    }

    // ==== Wrapping tests ====

    #[test]
    fn split_words() {
        let mut textbox = TextBox::new("", pt(36.0), TextStyle::default());
        assert_eq!(textbox.split_text("abcdefg"), ["abcdefg"]);
        assert_eq!(textbox.split_text("abcdefg ABCDEFG"), ["abcdefg", "ABCDEFG"]);
        assert_eq!(textbox.split_text("abcdefg     ABCDEFG"), ["abcdefg", "ABCDEFG"]);
        assert_eq!(
            textbox.split_text("abc defg   ABCD EFG"),
            ["abc", "defg", "ABCD", "EFG"]
        );
    }

    #[test]
    fn hard_breaks_split_first() {
        let style = TextStyle {
            padding: Size::ZERO,
            ..TextStyle::default()
        };
        let textbox = TextBox::new("a b\nc d", pt(100.0), style);
        assert_eq!(textbox.lines(), ["a b", "c d"]);
    }

    #[test]
    fn fit_is_inclusive() {
        // "a b" is three characters, 1.5in wide at a one inch font.
        let style = TextStyle {
            font_size: Size::inches(1.0),
            padding: Size::ZERO,
            line_spacing: Size::ZERO,
        };
        let textbox = TextBox::new("a b", Size::inches(1.5), style);
        assert_eq!(textbox.lines(), ["a b"]);
        let textbox = TextBox::new("a b", Size::inches(1.49), style);
        assert_eq!(textbox.lines(), ["a", "b"]);
    }

    #[test]
    fn long_word_is_never_split() {
        let textbox = TextBox::new("Supercalifragilistic", pt(20.0), TextStyle::default());
        assert_eq!(textbox.lines(), ["Supercalifragilistic"]);
        assert_eq!(textbox.width(), pt(20.0));
    }

    #[test]
    fn empty_text_has_no_lines() {
        let textbox = TextBox::new("   ", pt(36.0), TextStyle::default());
        assert!(textbox.lines().is_empty());
        // no lines still subtracts one line gap
        assert_close(textbox.height(), pt(6.5));
    }

    // ==== Reflow tests ====

    #[test]
    fn reflow_sets_height() {
        let style = TextStyle {
            font_size: pt(10.0),
            line_spacing: pt(3.0),
            padding: pt(5.0),
        };
        let mut textbox = TextBox::new("abcdefg ABCDEFG", pt(36.0), style);
        textbox.reflow();
        assert_close(textbox.height(), pt(10.0 * 2.0 + 3.0 + 2.0 * 5.0));
    }

    #[test]
    fn reflow_is_idempotent() {
        let mut textbox = TextBox::new("John Jacob Jingleheimer Schmidt", pt(60.0), TextStyle::default())
            .with_max_width(pt(120.0));
        let before = textbox.clone();
        textbox.reflow();
        assert_eq!(textbox, before);
    }

    #[test]
    fn max_width_widens_box() {
        // 60pt leaves 52pt for text: one word per line.
        let textbox = TextBox::new("abcdefg ABCDEFG", pt(60.0), TextStyle::default());
        assert_eq!(textbox.lines().len(), 2);

        // 100pt leaves 92pt, enough for 15 characters at 5pt each.
        let textbox = textbox.with_max_width(pt(100.0));
        assert_eq!(textbox.lines(), ["abcdefg ABCDEFG"]);
        assert_close(textbox.width(), pt(75.0 + 8.0));
        assert_close(textbox.height(), pt(10.0 + 8.0));
    }

    #[test]
    fn max_width_ignored_without_gain() {
        let textbox = TextBox::new("abcdefg ABCDEFG", pt(60.0), TextStyle::default())
            .with_max_width(pt(70.0));
        assert_eq!(textbox.lines().len(), 2);
        assert_eq!(textbox.width(), pt(60.0));
    }

    // ==== Line position tests ====

    #[test]
    fn line_positions() {
        let style = TextStyle {
            font_size: pt(10.0),
            line_spacing: pt(3.0),
            padding: pt(5.0),
        };
        let textbox = TextBox::new("abcdefg ABCDEFG", pt(36.0), style);
        let lines: Vec<_> = textbox.positioned_lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "abcdefg");
        assert_close(lines[0].x, pt(18.0));
        assert_close(lines[0].y, pt(15.0));
        assert_eq!(lines[1].text, "ABCDEFG");
        assert_close(lines[1].y, pt(28.0));
    }
}

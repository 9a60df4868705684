//! Frame diffing for the terminal app.
//!
//! A [`Frame`] is the styled text of every screen row. [`RowDiff`] keeps the
//! previous frame and rewrites only rows whose content changed, inside one
//! synchronized update, so counter ticks touch a single row instead of the
//! whole screen.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use crate::types::Attr;

/// A run of text drawn with one set of attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub x: u16,
    pub attr: Attr,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frame {
    width: u16,
    rows: Vec<Vec<Span>>,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            rows: vec![Vec::new(); usize::from(height)],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    /// Add a span. Rows outside the frame are dropped.
    pub fn push(&mut self, y: u16, x: u16, attr: Attr, text: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(usize::from(y)) {
            row.push(Span {
                x,
                attr,
                text: text.into(),
            });
        }
    }

    pub fn row(&self, y: u16) -> &[Span] {
        self.rows.get(usize::from(y)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Plain text of a row, spans placed at their columns.
    pub fn row_text(&self, y: u16) -> String {
        let mut line: Vec<char> = Vec::new();
        for span in self.row(y) {
            let start = usize::from(span.x);
            for (i, c) in span.text.chars().enumerate() {
                if line.len() <= start + i {
                    line.resize(start + i + 1, ' ');
                }
                line[start + i] = c;
            }
        }
        line.into_iter().collect::<String>().trim_end().to_string()
    }
}

pub(crate) fn queue_attrs<W: Write>(out: &mut W, attr: Attr) -> io::Result<()> {
    for (flag, attribute) in [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::REVERSE, Attribute::Reverse),
    ] {
        if attr.contains(flag) {
            queue!(out, SetAttribute(attribute))?;
        }
    }
    Ok(())
}

/// Row-level differential renderer.
#[derive(Debug, Default)]
pub struct RowDiff {
    previous: Option<Frame>,
}

impl RowDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame; the next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Write the rows of `frame` that differ from the previous frame.
    ///
    /// Returns the number of rows written. Nothing is written, not even a
    /// flush, when the frame is unchanged.
    pub fn render<W: Write>(&mut self, out: &mut W, frame: Frame) -> io::Result<usize> {
        let full = match &self.previous {
            Some(prev) => prev.width != frame.width || prev.rows.len() != frame.rows.len(),
            None => true,
        };

        let changed: Vec<u16> = (0..frame.height())
            .filter(|&y| {
                full || self
                    .previous
                    .as_ref()
                    .is_none_or(|prev| prev.row(y) != frame.row(y))
            })
            .collect();

        if changed.is_empty() {
            self.previous = Some(frame);
            return Ok(0);
        }

        queue!(out, BeginSynchronizedUpdate, SetAttribute(Attribute::Reset))?;
        if full {
            queue!(out, Clear(ClearType::All))?;
        }
        for &y in &changed {
            queue!(out, MoveTo(0, y), Clear(ClearType::CurrentLine))?;
            for span in frame.row(y) {
                queue!(out, MoveTo(span.x, y))?;
                queue_attrs(out, span.attr)?;
                queue!(out, Print(&span.text), SetAttribute(Attribute::Reset))?;
            }
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;

        self.previous = Some(frame);
        Ok(changed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(rows: &[&str]) -> Frame {
        let mut frame = Frame::new(20, rows.len() as u16);
        for (y, text) in rows.iter().enumerate() {
            frame.push(y as u16, 0, Attr::NONE, *text);
        }
        frame
    }

    #[test]
    fn test_first_render_writes_every_row() {
        let mut diff = RowDiff::new();
        let mut out: Vec<u8> = Vec::new();

        let written = diff.render(&mut out, frame(&["a", "b", "c"])).unwrap();

        assert_eq!(written, 3);
        assert!(diff.has_previous());
        assert!(!out.is_empty());
    }

    #[test]
    fn test_unchanged_frame_writes_nothing() {
        let mut diff = RowDiff::new();
        diff.render(&mut std::io::sink(), frame(&["a", "b"])).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let written = diff.render(&mut out, frame(&["a", "b"])).unwrap();

        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_only_changed_rows_are_written() {
        let mut diff = RowDiff::new();
        diff.render(&mut std::io::sink(), frame(&["title", "0+", "footer"])).unwrap();

        let mut out: Vec<u8> = Vec::new();
        let written = diff
            .render(&mut out, frame(&["title", "113+", "footer"]))
            .unwrap();

        assert_eq!(written, 1);
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("113+"));
        assert!(!text.contains("title"));
        assert!(!text.contains("footer"));
    }

    #[test]
    fn test_attribute_change_counts_as_change() {
        let mut diff = RowDiff::new();
        diff.render(&mut std::io::sink(), frame(&["card"])).unwrap();

        let mut dimmed = Frame::new(20, 1);
        dimmed.push(0, 0, Attr::DIM, "card");
        assert_eq!(diff.render(&mut std::io::sink(), dimmed).unwrap(), 1);
    }

    #[test]
    fn test_size_change_and_invalidate_redraw_everything() {
        let mut diff = RowDiff::new();
        diff.render(&mut std::io::sink(), frame(&["a", "b"])).unwrap();

        assert_eq!(diff.render(&mut std::io::sink(), frame(&["a", "b", "c"])).unwrap(), 3);

        diff.invalidate();
        assert_eq!(diff.render(&mut std::io::sink(), frame(&["a", "b", "c"])).unwrap(), 3);
    }

    #[test]
    fn test_row_text_places_spans() {
        let mut frame = Frame::new(20, 1);
        frame.push(0, 0, Attr::BOLD, "12,000+");
        frame.push(0, 10, Attr::NONE, "98%");
        frame.push(5, 0, Attr::NONE, "dropped");

        assert_eq!(frame.row_text(0), "12,000+   98%");
        assert_eq!(frame.row_text(5), "");
    }
}

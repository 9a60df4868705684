//! Document layout with Taffy.
//!
//! Every document node becomes a flex node. Containers stack their children
//! in a column; `.row` containers put them side by side with equal shares of
//! the width. Text leaves are measured by wrapping their current text to the
//! available width, one terminal row per line.
//!
//! The result is an absolute rect per node in page coordinates (cells), which
//! is what [`ScrollViewport`](crate::observe::ScrollViewport) needs.

use std::collections::HashMap;

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, LengthPercentageAuto,
    NodeId as TaffyNode, Rect as TaffyRect, Size, Style, TaffyTree,
};

use crate::dom::Document;
use crate::error::Result;
use crate::pages::ROW_CLASS;
use crate::types::{NodeId, Rect};

/// Gap between the cells of a `.row`.
const ROW_GAP: f32 = 2.0;

/// Tags that keep one blank line below them.
const BLOCK_TAGS: [&str; 4] = ["header", "section", "article", "footer"];

// =============================================================================
// TEXT MEASUREMENT
// =============================================================================

/// Display width of one character in terminal cells.
fn char_width(c: char) -> u16 {
    if c.is_ascii() {
        return if c.is_ascii_control() { 0 } else { 1 };
    }
    let code = c as u32;
    if (0x1100..=0x115F).contains(&code)
        || (0x2E80..=0x9FFF).contains(&code)
        || (0xAC00..=0xD7A3).contains(&code)
        || (0xF900..=0xFAFF).contains(&code)
        || (0xFF00..=0xFF60).contains(&code)
        || (0x1F300..=0x1F9FF).contains(&code)
    {
        2
    } else {
        1
    }
}

pub fn string_width(s: &str) -> u16 {
    s.chars()
        .fold(0u16, |width, c| width.saturating_add(char_width(c)))
}

/// Word-wrap `text` to `width` cells. Words wider than a line are broken.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_width = 0u16;

        for word in paragraph.split_whitespace() {
            let word_width = string_width(word);
            if line_width > 0 && line_width.saturating_add(1 + word_width) > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if line_width > 0 {
                line.push(' ');
                line_width += 1;
            }
            for c in word.chars() {
                let w = char_width(c);
                if line_width > 0 && line_width.saturating_add(w) > width {
                    lines.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(c);
                line_width = line_width.saturating_add(w);
            }
        }

        lines.push(line);
    }

    lines
}

fn measure_text(
    text: &str,
    known: Size<Option<f32>>,
    available: Size<AvailableSpace>,
) -> Size<f32> {
    if text.is_empty() {
        return Size::ZERO;
    }

    let wrap_at = match (known.width, available.width) {
        (Some(w), _) => w as u16,
        (None, AvailableSpace::Definite(w)) => w as u16,
        (None, AvailableSpace::MinContent) => {
            text.split_whitespace().map(string_width).max().unwrap_or(0)
        }
        (None, AvailableSpace::MaxContent) => u16::MAX,
    };

    let lines = wrap_text(text, wrap_at);
    let widest = lines.iter().map(|l| string_width(l)).max().unwrap_or(0);

    Size {
        width: known.width.unwrap_or(widest as f32),
        height: known.height.unwrap_or(lines.len() as f32),
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_style(doc: &Document, node: NodeId, in_row: bool) -> Style {
    let row = doc.has_class(node, ROW_CLASS);
    let block = BLOCK_TAGS.contains(&doc.tag(node));

    let mut style = Style {
        display: Display::Flex,
        flex_direction: if row {
            FlexDirection::Row
        } else {
            FlexDirection::Column
        },
        gap: Size {
            width: LengthPercentage::Length(if row { ROW_GAP } else { 0.0 }),
            height: LengthPercentage::Length(0.0),
        },
        margin: TaffyRect {
            top: LengthPercentageAuto::Length(0.0),
            right: LengthPercentageAuto::Length(0.0),
            bottom: LengthPercentageAuto::Length(if block { 1.0 } else { 0.0 }),
            left: LengthPercentageAuto::Length(0.0),
        },
        ..Default::default()
    };

    if in_row {
        // Equal columns regardless of content width.
        style.flex_grow = 1.0;
        style.flex_shrink = 1.0;
        style.flex_basis = Dimension::Length(0.0);
    }

    style
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out the whole document at `width` columns.
///
/// Height is unconstrained: the page grows as tall as its content and the
/// viewport scrolls over it.
pub fn layout_document(doc: &Document, width: u16) -> Result<HashMap<NodeId, Rect>> {
    let order = doc.descendants(doc.root());
    let mut tree: TaffyTree<NodeId> = TaffyTree::new();
    let mut nodes: HashMap<NodeId, TaffyNode> = HashMap::with_capacity(order.len());

    for &node in &order {
        let in_row = doc
            .parent(node)
            .is_some_and(|parent| doc.has_class(parent, ROW_CLASS));
        let mut style = build_style(doc, node, in_row);
        if node == doc.root() {
            style.size = Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Auto,
            };
        }
        let id = tree.new_leaf_with_context(style, node)?;
        nodes.insert(node, id);
    }

    // Preorder: every parent exists before its children are attached.
    for &node in &order {
        let Some(&child) = nodes.get(&node) else { continue };
        if let Some(parent) = doc.parent(node).and_then(|p| nodes.get(&p)) {
            tree.add_child(*parent, child)?;
        }
    }

    let Some(&root) = nodes.get(&doc.root()) else {
        return Ok(HashMap::new());
    };

    let available = Size {
        width: AvailableSpace::Definite(width as f32),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout_with_measure(
        root,
        available,
        |known, available, _taffy_node, context: Option<&mut NodeId>, _style| match context {
            Some(&mut node) if doc.children(node).is_empty() => {
                measure_text(&doc.text(node), known, available)
            }
            _ => Size::ZERO,
        },
    )?;

    // Taffy locations are parent-relative; accumulate in document order.
    let mut rects: HashMap<NodeId, Rect> = HashMap::with_capacity(order.len());
    for &node in &order {
        let Some(&id) = nodes.get(&node) else { continue };
        let layout = tree.layout(id)?;
        let (origin_x, origin_y) = doc
            .parent(node)
            .and_then(|p| rects.get(&p))
            .map_or((0.0, 0.0), |r| (r.x, r.y));
        rects.insert(
            node,
            Rect::new(
                origin_x + layout.location.x,
                origin_y + layout.location.y,
                layout.size.width,
                layout.size.height,
            ),
        );
    }

    Ok(rects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    #[test]
    fn test_wrap_breaks_at_words() {
        assert_eq!(wrap_text("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap_text("one two three", 100), vec!["one two three"]);
        assert!(wrap_text("", 10).is_empty());
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn test_wrap_keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
    }

    #[test]
    fn test_string_width() {
        assert_eq!(string_width("hello"), 5);
        assert_eq!(string_width("₹3,496"), 6);
        assert_eq!(string_width("日本"), 4);
    }

    #[test]
    fn test_column_stacks_text() {
        let mut doc = Document::new();
        let root = doc.root();
        let first = doc.append(root, Element::new("p").text("hello"));
        let second = doc.append(root, Element::new("p").text("world"));

        let rects = layout_document(&doc, 40).unwrap();

        assert_eq!(rects[&first].y, 0.0);
        assert_eq!(rects[&first].height, 1.0);
        assert_eq!(rects[&second].y, 1.0);
        assert_eq!(rects[&root].width, 40.0);
    }

    #[test]
    fn test_narrow_width_wraps_taller() {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append(root, Element::new("p").text("one two three four"));

        let wide = layout_document(&doc, 40).unwrap();
        let narrow = layout_document(&doc, 8).unwrap();

        assert_eq!(wide[&p].height, 1.0);
        assert!(narrow[&p].height >= 3.0);
    }

    #[test]
    fn test_row_places_children_side_by_side() {
        let mut doc = Document::new();
        let root = doc.root();
        let row = doc.append(root, Element::new("div").class(ROW_CLASS));
        let a = doc.append(row, Element::new("span").text("a"));
        let b = doc.append(row, Element::new("span").text("b"));

        let rects = layout_document(&doc, 20).unwrap();

        assert_eq!(rects[&a].y, rects[&b].y);
        assert!(rects[&b].x > rects[&a].x);
    }

    #[test]
    fn test_sections_are_absolute_and_spaced() {
        let mut doc = Document::new();
        let root = doc.root();
        let s1 = doc.append(root, Element::new("section"));
        doc.append(s1, Element::new("p").text("x"));
        let s2 = doc.append(root, Element::new("section"));
        let inner = doc.append(s2, Element::new("p").text("y"));

        let rects = layout_document(&doc, 20).unwrap();

        // one line of content plus one line of margin
        assert_eq!(rects[&s2].y, 2.0);
        assert_eq!(rects[&inner].y, 2.0);
    }
}

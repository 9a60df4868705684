//! Terminal App - a page rendered in the terminal with crossterm.
//!
//! Owns the document, the mounted [`PageView`] and a [`PageHost`]. Each pass
//! of the loop advances the virtual clock by real elapsed time, pumps the
//! host, redraws, then waits for input until the next timer is due.
//!
//! Keys: `↑`/`k` and `↓`/`j` scroll a line, `PgUp`/`PgDn`/space scroll a
//! page, `Home`/`End` jump, `q`/`Esc`/`Ctrl+C` quit. Pages with state take
//! `1`-`9` (choose), `Tab` (next FAQ tab), `s` (send) and `x` (close).
//!
//! Revealable blocks that have not been revealed yet are drawn dimmed, so the
//! page is always legible; a reveal brings them to full intensity. Frames go
//! through a [`RowDiff`], so only changed rows reach the terminal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::dom::Document;
use crate::engine::PageView;
use crate::error::Result;
use crate::pages::{PageInput, PageKind, PageState};
use crate::types::{Attr, Markers, NodeId};

use super::PageHost;
use super::frame::{Frame, RowDiff};
use super::layout::{layout_document, wrap_text};

/// Longest wait for input when no timer is due.
const IDLE_POLL: Duration = Duration::from_millis(250);

// =============================================================================
// KEY MAPPING
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    ScrollBy(f32),
    PageUp,
    PageDown,
    Top,
    Bottom,
    Page(PageInput),
    Quit,
}

/// Map a key press to an action. Releases and unbound keys map to nothing.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(Action::ScrollBy(-1.0)),
        KeyCode::Down | KeyCode::Char('j') => Some(Action::ScrollBy(1.0)),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown | KeyCode::Char(' ') => Some(Action::PageDown),
        KeyCode::Home | KeyCode::Char('g') => Some(Action::Top),
        KeyCode::End | KeyCode::Char('G') => Some(Action::Bottom),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(c @ '1'..='9') => Some(Action::Page(PageInput::Choose(
            (c as usize) - ('1' as usize),
        ))),
        KeyCode::Tab => Some(Action::Page(PageInput::NextTab)),
        KeyCode::Char('s') => Some(Action::Page(PageInput::Submit)),
        KeyCode::Char('x') => Some(Action::Page(PageInput::Close)),
        _ => None,
    }
}

// =============================================================================
// STYLING
// =============================================================================

/// Text attributes for a node given its tag and reveal state.
pub fn attrs_for(doc: &Document, node: NodeId) -> Attr {
    let mut attr = match doc.tag(node) {
        "h1" | "h2" | "h3" => Attr::BOLD,
        "a" => Attr::UNDERLINE,
        "small" => Attr::ITALIC,
        _ => Attr::NONE,
    };
    if doc.markers(node).contains(Markers::COUNTER) {
        attr |= Attr::BOLD;
    }

    let pending = std::iter::once(node)
        .chain(doc.ancestors(node))
        .map(|n| doc.markers(n))
        .any(|m| m.contains(Markers::REVEAL) && !m.contains(Markers::REVEALED));
    if pending {
        attr |= Attr::DIM;
    }
    attr
}

// =============================================================================
// APP
// =============================================================================

pub struct TerminalApp {
    page: PageKind,
    doc: Document,
    view: PageView,
    host: PageHost,
    state: PageState,
    renderer: RowDiff,
    running: bool,
}

impl TerminalApp {
    /// Build the page, lay it out at `width` x `height` and mount the engine.
    pub fn new(
        page: PageKind,
        config: &EngineConfig,
        reduced_motion: bool,
        width: u16,
        height: u16,
    ) -> Result<Self> {
        let mut doc = page.build();
        let mut host = PageHost::new(width, height.saturating_sub(1))
            .with_reduced_motion(reduced_motion || config.motion.reduced_motion);
        host.viewport.set_rects(layout_document(&doc, width)?);

        let root = doc.root();
        let view = PageView::mount(&mut doc, root, &mut host, config);
        let state = PageState::new(page, &doc);
        info!(%page, width, height, "page mounted in terminal");

        Ok(Self {
            page,
            doc,
            view,
            host,
            state,
            renderer: RowDiff::new(),
            running: true,
        })
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn view(&self) -> &PageView {
        &self.view
    }

    pub fn host(&self) -> &PageHost {
        &self.host
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Apply one action. Returns whether the viewport moved or page text changed.
    pub fn apply(&mut self, action: Action) -> bool {
        if let Action::Page(input) = action {
            if !self.state.handle(&self.doc, input) {
                return false;
            }
            if let Err(err) = self.relayout() {
                warn!(%err, "relayout after page input failed");
            }
            return true;
        }

        let viewport = &mut self.host.viewport;
        let page = f32::from(viewport.size().1.saturating_sub(1).max(1));
        match action {
            Action::ScrollBy(delta) => viewport.scroll_by(delta),
            Action::PageUp => viewport.scroll_by(-page),
            Action::PageDown => viewport.scroll_by(page),
            Action::Top => {
                let before = viewport.scroll_y();
                viewport.scroll_to_top();
                viewport.scroll_y() != before
            }
            Action::Bottom => {
                let before = viewport.scroll_y();
                viewport.scroll_to_bottom();
                viewport.scroll_y() != before
            }
            Action::Quit => {
                self.running = false;
                false
            }
            Action::Page(_) => false,
        }
    }

    /// Terminal resized: relayout and keep the scroll position in range.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        self.host.viewport.set_size(width, height.saturating_sub(1));
        self.relayout()?;
        self.renderer.invalidate();
        debug!(width, height, "relayout after resize");
        Ok(())
    }

    fn relayout(&mut self) -> Result<()> {
        let (width, _) = self.host.viewport.size();
        self.host
            .viewport
            .set_rects(layout_document(&self.doc, width)?);
        Ok(())
    }

    /// Advance by `elapsed` and deliver everything that became due.
    pub fn step(&mut self, elapsed: Duration) {
        self.host.advance(&mut self.doc, &mut self.view, elapsed);
    }

    /// Run until quit. Restores the terminal on every exit path.
    pub fn run(mut self) -> Result<()> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide)?;

        let result = self.event_loop(&mut out);

        let restored = execute!(out, SetAttribute(Attribute::Reset), Show, LeaveAlternateScreen)
            .and_then(|()| terminal::disable_raw_mode());

        let Self { view, mut host, .. } = self;
        view.unmount(&mut host);

        result?;
        restored?;
        Ok(())
    }

    fn event_loop<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let mut last = Instant::now();
        self.step(Duration::ZERO);

        while self.running {
            let now = Instant::now();
            self.step(now - last);
            last = now;

            self.draw(out)?;

            let wait = self
                .host
                .timers
                .next_due_in()
                .map_or(IDLE_POLL, |due| due.min(IDLE_POLL));
            if !event::poll(wait)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => {
                    if let Some(action) = action_for(key) {
                        self.apply(action);
                    }
                }
                Event::Resize(width, height) => self.resize(width, height)?,
                _ => {}
            }
        }

        info!(page = %self.page, "terminal app stopped");
        Ok(())
    }

    /// The visible slice of the page plus a status line.
    pub fn frame(&self) -> Frame {
        let viewport = &self.host.viewport;
        let (width, rows) = viewport.size();
        let scroll = viewport.scroll_y();
        let mut frame = Frame::new(width, rows.saturating_add(1));

        for node in self.doc.descendants(self.doc.root()) {
            if !self.doc.children(node).is_empty() {
                continue;
            }
            let Some(rect) = viewport.rect(node) else { continue };
            let text = self.doc.text(node);
            if text.is_empty() {
                continue;
            }

            let attr = attrs_for(&self.doc, node);
            let wrap = (rect.width.max(1.0) as u16).min(width);
            for (i, line) in wrap_text(&text, wrap).into_iter().enumerate() {
                let y = rect.y + i as f32 - scroll;
                if y < 0.0 || y >= f32::from(rows) {
                    continue;
                }
                frame.push(y as u16, rect.x as u16, attr, line);
            }
        }

        frame.push(rows, 0, Attr::REVERSE, self.status_line(width));
        frame
    }

    /// Draw the rows that changed since the last draw.
    pub fn draw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let frame = self.frame();
        self.renderer.render(out, frame)?;
        Ok(())
    }

    fn status_line(&self, width: u16) -> String {
        let viewport = &self.host.viewport;
        let max = viewport.max_scroll();
        let percent = if max > 0.0 {
            (viewport.scroll_y() / max * 100.0).round() as u32
        } else {
            100
        };
        let mut text = format!(
            " groundzero · {} · {}/{} revealed · {percent}% · ↑↓ scroll  ",
            self.page,
            self.view.reveal().revealed_count(),
            self.view.reveal().revealed_count() + self.view.reveal().watched_count(),
        );
        let hint = self.page.hint();
        if !hint.is_empty() {
            text.push_str(hint);
            text.push_str("  ");
        }
        text.push_str("q quit");
        let mut line: String = text.chars().take(width as usize).collect();
        let pad = (width as usize).saturating_sub(line.chars().count());
        line.extend(std::iter::repeat_n(' ', pad));
        line
    }
}

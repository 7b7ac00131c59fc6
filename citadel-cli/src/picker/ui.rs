//! # Picker Rendering
//!
//! Draws the controller's state with ratatui and records where each
//! clickable element landed, so mouse events can be mapped back to the
//! controller without the renderer owning any state.
//!
//! Layout, top to bottom: the simulated latency field, the search field with
//! the selected tags inline, the results popover (only while the query is
//! non-empty) and a one-line key legend.

use citadel_core::highlight::Highlighted;
use citadel_core::{CharacterId, Focus, PopoverView, ResultRow, SearchController, SelectionHeader, Status};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::consts::SPINNER_FRAMES;

const DESELECT_ALL_LABEL: &str = "[ Deselect All ]";
const SEARCH_PLACEHOLDER: &str = "Search for a character...";
const LATENCY_FIELD_WIDTH: u16 = 28;
/// Each result row spans the name line and the details line
const ROW_HEIGHT: u16 = 2;

const TAG_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Cyan);
const TAG_REMOVE_STYLE: Style = Style::new()
  .fg(Color::Red)
  .bg(Color::Cyan)
  .add_modifier(Modifier::BOLD);
const FOCUSED_ROW_STYLE: Style = Style::new().fg(Color::White).bg(Color::Blue);
const MATCH_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);
const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Something a mouse click can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
  LatencyField,
  SearchField,
  ClearQuery,
  RemoveTag(CharacterId),
  DeselectAll,
  Row(CharacterId),
}

/// Screen regions of the clickable elements from the last frame. Elements
/// drawn later sit on top of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
  targets: Vec<(Rect, HitTarget)>,
}

impl HitMap {
  fn push(&mut self, area: Rect, target: HitTarget) {
    if !area.is_empty() {
      self.targets.push((area, target));
    }
  }

  /// The topmost element under a cell
  pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
    self
      .targets
      .iter()
      .rev()
      .find(|(area, _)| area.contains(Position::new(column, row)))
      .map(|(_, target)| *target)
  }

  /// Where a target was drawn, if it was
  pub fn area_of(&self, target: HitTarget) -> Option<Rect> {
    self
      .targets
      .iter()
      .find(|(_, candidate)| *candidate == target)
      .map(|(area, _)| *area)
  }
}

/// Draw one frame. `tick` advances the spinner.
pub fn render(frame: &mut Frame, controller: &SearchController, tick: usize) -> HitMap {
  let mut hits = HitMap::default();

  let [latency_area, search_area, popover_area, help_area] = Layout::vertical([
    Constraint::Length(3),
    Constraint::Length(3),
    Constraint::Min(0),
    Constraint::Length(1),
  ])
  .areas(frame.area());

  render_latency(frame, controller, latency_area, &mut hits);
  render_search(frame, controller, search_area, &mut hits);
  render_popover(frame, controller, popover_area, tick, &mut hits);
  render_help(frame, help_area);

  hits
}

fn field_block(title: &str, focused: bool) -> Block<'_> {
  let border = if focused {
    Style::new().fg(Color::Cyan)
  } else {
    DIM_STYLE
  };
  Block::bordered().title(title).border_style(border)
}

fn text_width(text: &str) -> u16 {
  u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn render_latency(frame: &mut Frame, controller: &SearchController, area: Rect, hits: &mut HitMap) {
  let [area, _] = Layout::horizontal([Constraint::Length(LATENCY_FIELD_WIDTH), Constraint::Min(0)]).areas(area);
  let focused = controller.focus() == Focus::Latency;
  let block = field_block(" Simulated latency (ms) ", focused);
  let inner = block.inner(area);
  let text = controller.latency().text();

  frame.render_widget(Paragraph::new(text).block(block), area);
  hits.push(area, HitTarget::LatencyField);

  if focused && !inner.is_empty() {
    let x = inner.x + text_width(text).min(inner.width - 1);
    frame.set_cursor_position(Position::new(x, inner.y));
  }
}

fn render_search(frame: &mut Frame, controller: &SearchController, area: Rect, hits: &mut HitMap) {
  let focused = controller.focus() == Focus::Search;
  let block = field_block(" Search characters ", focused);
  let inner = block.inner(area);
  frame.render_widget(block, area);
  hits.push(area, HitTarget::SearchField);

  if inner.is_empty() {
    return;
  }

  let query = controller.query();
  // Keep a column free for the clear control whenever there is a query
  let clear_width = if query.is_empty() { 0 } else { 2 };
  let visible_width = inner.width.saturating_sub(clear_width);

  // Offsets are relative to the start of the line, before scrolling
  let mut spans = Vec::new();
  let mut removers = Vec::new();
  let mut offset: u16 = 0;
  for character in controller.selected().iter() {
    let label = format!(" {} ", character.name);
    offset = offset.saturating_add(text_width(&label));
    spans.push(Span::styled(label, TAG_STYLE));
    removers.push((offset, character.id));
    spans.push(Span::styled("×", TAG_REMOVE_STYLE));
    spans.push(Span::raw(" "));
    offset = offset.saturating_add(2);
  }

  if query.is_empty() && controller.selected().is_empty() {
    spans.push(Span::styled(SEARCH_PLACEHOLDER, DIM_STYLE));
  } else {
    spans.push(Span::raw(query));
  }
  let cursor = offset.saturating_add(text_width(query));

  // Scroll left far enough to keep the cursor in view
  let scroll = cursor.saturating_add(1).saturating_sub(visible_width);
  frame.render_widget(
    Paragraph::new(Line::from(spans)).scroll((0, scroll)),
    Rect {
      width: visible_width,
      ..inner
    },
  );

  for (offset, id) in removers {
    if offset >= scroll && offset - scroll < visible_width {
      hits.push(
        Rect::new(inner.x + offset - scroll, inner.y, 1, 1),
        HitTarget::RemoveTag(id),
      );
    }
  }

  if !query.is_empty() {
    let clear = Rect::new(inner.right() - 1, inner.y, 1, 1);
    frame.render_widget(Paragraph::new(Span::styled("×", DIM_STYLE)), clear);
    hits.push(clear, HitTarget::ClearQuery);
  }

  if focused {
    let x = inner.x + cursor.saturating_sub(scroll).min(visible_width.saturating_sub(1));
    frame.set_cursor_position(Position::new(x, inner.y));
  }
}

fn popover_height(view: &PopoverView<'_>) -> u16 {
  match view {
    PopoverView::Listing { rows, .. } => {
      let rows = u16::try_from(rows.len()).unwrap_or(u16::MAX);
      rows.saturating_mul(ROW_HEIGHT).saturating_add(3)
    }
    _ => 3,
  }
}

fn render_popover(frame: &mut Frame, controller: &SearchController, area: Rect, tick: usize, hits: &mut HitMap) {
  let view = controller.view();
  if view == PopoverView::Hidden {
    return;
  }

  let area = Rect {
    height: popover_height(&view).min(area.height),
    ..area
  };
  let block = Block::bordered().title(" Results ").border_style(DIM_STYLE);
  let inner = block.inner(area);
  frame.render_widget(block, area);

  match view {
    PopoverView::Hidden => {}
    PopoverView::Searching => {
      let spinner = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
      let line = Line::from(vec![
        Span::styled(spinner, Style::new().fg(Color::Cyan)),
        Span::raw(" Searching..."),
      ]);
      frame.render_widget(Paragraph::new(line), inner);
    }
    PopoverView::Failed { message } => {
      frame.render_widget(Paragraph::new(Span::styled(message, Style::new().fg(Color::Red))), inner);
    }
    PopoverView::Empty => {
      frame.render_widget(Paragraph::new(Span::styled("No results found", DIM_STYLE)), inner);
    }
    PopoverView::Listing { header, rows } => render_listing(frame, inner, header, &rows, hits),
  }
}

fn render_listing(frame: &mut Frame, area: Rect, header: SelectionHeader, rows: &[ResultRow<'_>], hits: &mut HitMap) {
  let [header_area, rows_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

  frame.render_widget(Paragraph::new(Span::styled(header.label(), DIM_STYLE)), header_area);
  let button_width = text_width(DESELECT_ALL_LABEL);
  if header.show_deselect_all() && header_area.width > button_width {
    let button = Rect {
      x: header_area.right() - button_width,
      width: button_width,
      ..header_area
    };
    frame.render_widget(
      Paragraph::new(Span::styled(DESELECT_ALL_LABEL, Style::new().fg(Color::Yellow))),
      button,
    );
    hits.push(button, HitTarget::DeselectAll);
  }

  let capacity = usize::from(rows_area.height / ROW_HEIGHT);
  if capacity == 0 {
    return;
  }
  let focused = rows.iter().position(|row| row.focused).unwrap_or(0);
  let first = (focused + 1).saturating_sub(capacity);

  for (slot, row) in rows.iter().skip(first).take(capacity).enumerate() {
    // slot < capacity, which came from a u16
    let y = rows_area.y + (slot as u16) * ROW_HEIGHT;
    let row_area = Rect::new(rows_area.x, y, rows_area.width, ROW_HEIGHT);

    let style = if row.focused {
      FOCUSED_ROW_STYLE
    } else {
      Style::new()
    };
    frame.render_widget(Paragraph::new(row_lines(row)).style(style), row_area);
    hits.push(row_area, HitTarget::Row(row.character.id));
  }
}

fn row_lines<'a>(row: &ResultRow<'a>) -> Vec<Line<'a>> {
  let marker = if row.selected { "[x] " } else { "[ ] " };
  let mut name = vec![Span::raw(marker)];
  match row.name {
    Highlighted::Match { before, matched, after } => {
      name.push(Span::raw(before));
      name.push(Span::styled(matched, MATCH_STYLE));
      name.push(Span::raw(after));
    }
    Highlighted::Plain(plain) => name.push(Span::raw(plain)),
  }

  let status_color = match row.character.status {
    Status::Alive => Color::Green,
    Status::Dead => Color::Red,
    Status::Unknown => Color::DarkGray,
  };
  let details = vec![
    Span::raw("    "),
    Span::raw(row.episodes_label()),
    Span::raw(" · "),
    Span::styled(row.character.status.to_string(), Style::new().fg(status_color)),
    Span::raw(" · "),
    Span::raw(row.character.species.to_string()),
  ];

  vec![Line::from(name), Line::from(details)]
}

fn render_help(frame: &mut Frame, area: Rect) {
  let help = "↑/↓ move · Enter/Space toggle · Enter confirm · Esc clear · Ctrl+X deselect all · Tab latency · Ctrl+C quit";
  frame.render_widget(Paragraph::new(Span::styled(help, DIM_STYLE)), area);
}

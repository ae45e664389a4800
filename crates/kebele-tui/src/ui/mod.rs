//! TUI rendering — orchestrates all panes.

pub mod certificates;
pub mod register;
pub mod resident_detail;
pub mod resident_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0]);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " kebele  resident registry",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.content.len() as u16)
    .saturating_sub(right.content.len() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  match app.screen {
    Screen::ResidentList => resident_list::draw(f, area, app),
    Screen::ResidentDetail => resident_detail::draw(f, area, app),
    Screen::Register => register::draw(f, area, app),
    Screen::Certificates => certificates::draw(f, area, app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  // An active prompt owns the status line.
  if let Some(prompt) = &app.prompt {
    let line = Line::from(vec![
      Span::styled(
        format!(" {}: ", prompt.label),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
      ),
      Span::raw(format!("{}_", prompt.buffer)),
    ]);
    f.render_widget(
      Paragraph::new(line).style(Style::default().bg(Color::Black)),
      area,
    );
    return;
  }

  let (mode_label, hints) = match app.screen {
    Screen::ResidentList if app.search_active => {
      ("SEARCH", "Type to filter  Esc clear  Enter done")
    }
    Screen::ResidentList => (
      "LIST",
      "↑↓ move  Enter detail  / search  g m a filter  s o sort  t toggle  n register  c certificates  r reload  q quit",
    ),
    Screen::ResidentDetail => (
      "DETAIL",
      "Tab tabs  f family  d document  v service  r reload  Esc back  q quit",
    ),
    Screen::Register => (
      "REGISTER",
      "Type to edit  ↑↓ field  Enter next step/submit  Ctrl-P photo  Esc back",
    ),
    Screen::Certificates => (
      "CERTIFY",
      "Type to search  ↑↓ pick  Tab type  Ctrl-T template  Enter generate  Ctrl-G backend  Esc back",
    ),
  };

  let status = if app.generating {
    "Generating…".to_string()
  } else if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

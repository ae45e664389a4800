//! Certificate workflow screen: pick a resident, pick a type and template,
//! preview, generate.

use kebele_cert::{
  synthesize::certificate_record,
  template::{self, TemplateBody},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::App;

/// Render the certificate workflow into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  draw_picker(f, cols[0], app);
  draw_workbench(f, cols[1], app);
}

// ─── Resident picker ──────────────────────────────────────────────────────────

fn draw_picker(f: &mut Frame, area: Rect, app: &App) {
  let candidates = app.cert_candidates();

  let block = Block::default()
    .title(format!(" Residents ({}) ", candidates.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Search line at the top.
  if inner.height > 1 {
    let search_area = Rect { height: 1, ..inner };
    inner.y += 1;
    inner.height -= 1;
    f.render_widget(
      Paragraph::new(format!("find: {}_", app.cert_search))
        .style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if candidates.is_empty() {
    f.render_widget(
      Paragraph::new("No matching residents.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let items: Vec<ListItem> = candidates
    .iter()
    .map(|r| {
      let id = r
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "?".to_string());
      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<24}", r.full_name())),
        Span::styled(format!("#{id}"), Style::default().fg(Color::Gray)),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(app.cert_cursor.min(candidates.len() - 1)));

  f.render_stateful_widget(
    List::new(items)
      .highlight_style(
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD),
      )
      .highlight_symbol(""),
    inner,
    &mut state,
  );
}

// ─── Workbench: type, template, preview, results ──────────────────────────────

fn draw_workbench(f: &mut Frame, area: Rect, app: &App) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // selectors
      Constraint::Min(6),    // preview
      Constraint::Length(6), // generated documents
    ])
    .split(area);

  draw_selectors(f, rows[0], app);
  draw_preview(f, rows[1], app);
  draw_generated(f, rows[2], app);
}

fn draw_selectors(f: &mut Frame, area: Rect, app: &App) {
  let line = Line::from(vec![
    Span::styled("Type: ", Style::default().fg(Color::Cyan)),
    Span::styled(
      app.cert_kind.title(),
      Style::default().add_modifier(Modifier::BOLD),
    ),
    Span::raw("   "),
    Span::styled("Template: ", Style::default().fg(Color::Cyan)),
    Span::styled(
      app.cert_template.label(),
      Style::default().add_modifier(Modifier::BOLD),
    ),
  ]);

  let mut lines = vec![line];
  if let Some(notice) = &app.cert_notice {
    lines.push(Line::from(Span::styled(
      notice.clone(),
      Style::default().fg(Color::Red),
    )));
  }
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_preview(f: &mut Frame, area: Rect, app: &App) {
  let frame_char = app.cert_template.frame_char().to_string();
  let block = Block::default()
    .title(" Preview ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let Some(resident) = app.cert_candidates().get(app.cert_cursor).copied() else {
    f.render_widget(
      Paragraph::new("Pick a resident to preview.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let record = certificate_record(resident, app.cert_kind, app.reference.as_ref());
  let layout = template::render(app.cert_template, &record);

  let rule = frame_char.repeat(inner.width.saturating_sub(2) as usize);
  let mut lines: Vec<Line> = Vec::new();
  lines.push(Line::from(Span::styled(
    rule.clone(),
    Style::default().fg(Color::DarkGray),
  )));
  if let Some(authority) = &layout.authority {
    lines.push(centered(authority, Style::default().fg(Color::Gray)));
  }
  lines.push(centered(
    &layout.heading,
    Style::default().add_modifier(Modifier::BOLD),
  ));
  lines.push(centered(&layout.subheading, Style::default().fg(Color::Gray)));
  lines.push(Line::from(""));

  match &layout.body {
    TemplateBody::Narrative(narrative) => {
      for text in narrative {
        lines.push(centered(text, Style::default()));
      }
    }
    TemplateBody::Registry(fields) => {
      for (label, value) in fields {
        lines.push(Line::from(vec![
          Span::styled(
            format!("{label:<18}"),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
          ),
          Span::raw(value.clone()),
        ]));
      }
    }
  }

  lines.push(Line::from(""));
  lines.push(centered(&layout.footnote, Style::default().fg(Color::DarkGray)));
  lines.push(Line::from(Span::styled(rule, Style::default().fg(Color::DarkGray))));

  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_generated(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(format!(" Generated ({}) ", app.generated.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if app.generated.is_empty() {
    f.render_widget(
      Paragraph::new("Nothing generated yet.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  }

  let lines: Vec<Line> = app
    .generated
    .iter()
    .rev()
    .map(|d| {
      Line::from(vec![
        Span::raw(format!("{:<36}", d.file_name)),
        Span::styled(
          d.issued_at.format("%Y-%m-%d %H:%M").to_string(),
          Style::default().fg(Color::Gray),
        ),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), inner);
}

fn centered(text: &str, style: Style) -> Line<'static> {
  Line::from(Span::styled(text.to_string(), style)).centered()
}

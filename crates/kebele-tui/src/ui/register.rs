//! Registration wizard screen.

use kebele_core::registration::{Field, Step};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Render the wizard into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Register resident ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(2), // step indicator
      Constraint::Min(0),    // fields
      Constraint::Length(2), // notice
    ])
    .split(inner);

  draw_steps(f, rows[0], app);
  draw_fields(f, rows[1], app);
  draw_notice(f, rows[2], app);
}

// ─── Step indicator ───────────────────────────────────────────────────────────

fn draw_steps(f: &mut Frame, area: Rect, app: &App) {
  let mut spans = Vec::new();
  for (i, step) in Step::ORDER.iter().enumerate() {
    let style = if *step == app.form.step() {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {}. {} ", i + 1, step.title()), style));
    if i + 1 < Step::ORDER.len() {
      spans.push(Span::styled("  >  ", Style::default().fg(Color::DarkGray)));
    }
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ─── Fields ───────────────────────────────────────────────────────────────────

fn draw_fields(f: &mut Frame, area: Rect, app: &App) {
  let fields = Field::for_step(app.form.step());
  let focus = app.form_focus.min(fields.len() - 1);

  let mut lines: Vec<Line> = Vec::new();
  for (i, field) in fields.iter().enumerate() {
    let focused = i == focus;
    let marker = if focused { "> " } else { "  " };
    let label_style = if focused {
      Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Cyan)
    };

    let value = app.form.value(*field);
    let value_span = if focused {
      Span::styled(format!("{value}_"), Style::default().add_modifier(Modifier::BOLD))
    } else if value.is_empty() {
      Span::styled("-", Style::default().fg(Color::DarkGray))
    } else {
      Span::raw(value.to_string())
    };

    let mut spans = vec![
      Span::raw(marker),
      Span::styled(format!("{:<18}", field.label()), label_style),
      value_span,
    ];
    if let Some(hint) = select_hint(app, *field) {
      spans.push(Span::styled(format!("  ({hint})"), Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(spans));

    // Inline, field-keyed error directly beneath the field.
    if let Some(err) = app.form.error(*field) {
      lines.push(Line::from(Span::styled(
        format!("    {err}"),
        Style::default().fg(Color::Red),
      )));
    }
  }

  if let Some(photo) = app.form.photo() {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
      format!("  Photo: {}", photo.display()),
      Style::default().fg(Color::Gray),
    )));
  }

  f.render_widget(Paragraph::new(lines), area);
}

/// Options hint for select-like fields, fed by reference data where the
/// location cascade applies.
fn select_hint(app: &App, field: Field) -> Option<String> {
  let data = app.reference.as_ref();
  let parse = |v: &str| v.trim().parse::<u64>().ok();

  match field {
    Field::Gender => Some("male / female".to_string()),
    Field::MaritalStatus => Some("single / married / divorced / widowed".to_string()),
    Field::Region => data.map(|d| {
      d.regions
        .iter()
        .map(|r| format!("{}={}", r.id, r.name))
        .collect::<Vec<_>>()
        .join("  ")
    }),
    Field::Zone => {
      let region_id = parse(app.form.value(Field::Region))?;
      let d = data?;
      Some(
        kebele_core::reference::zones_in(&d.zones, region_id)
          .iter()
          .map(|z| format!("{}={}", z.id, z.name))
          .collect::<Vec<_>>()
          .join("  "),
      )
    }
    Field::Woreda => {
      let zone_id = parse(app.form.value(Field::Zone))?;
      let d = data?;
      Some(
        kebele_core::reference::woredas_in(&d.woredas, zone_id)
          .iter()
          .map(|w| format!("{}={}", w.id, w.name))
          .collect::<Vec<_>>()
          .join("  "),
      )
    }
    Field::Kebele => {
      let woreda_id = parse(app.form.value(Field::Woreda))?;
      let d = data?;
      Some(
        kebele_core::reference::kebeles_in(&d.kebeles, woreda_id)
          .iter()
          .map(|k| format!("{}={}", k.id, k.name))
          .collect::<Vec<_>>()
          .join("  "),
      )
    }
    _ => None,
  }
}

// ─── Notice ───────────────────────────────────────────────────────────────────

fn draw_notice(f: &mut Frame, area: Rect, app: &App) {
  if let Some(notice) = &app.register_notice {
    f.render_widget(
      Paragraph::new(Span::styled(notice.clone(), Style::default().fg(Color::Red))),
      area,
    );
  }
}

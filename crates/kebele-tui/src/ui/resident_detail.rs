//! Resident detail — tabbed view over the record and its sub-lists.

use kebele_core::{
  certificate::format_long_date,
  resident::{Persistence, ResidentRecord},
};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::app::{App, DetailTab, Load};

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail screen into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let title = match app.detail.ready() {
    Some(r) => format!(" {} ", r.full_name()),
    None => " Resident ".to_string(),
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  match &app.detail {
    Load::Loading => {
      f.render_widget(
        Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
      return;
    }
    Load::Failed(err) => {
      f.render_widget(
        Paragraph::new(vec![
          Line::from(Span::styled(
            format!("Could not load resident: {err}"),
            Style::default().fg(Color::Red),
          )),
          Line::from(Span::styled(
            "Press r to retry.",
            Style::default().fg(Color::DarkGray),
          )),
        ]),
        inner,
      );
      return;
    }
    Load::Ready(_) => {}
  }

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(1), Constraint::Min(0)])
    .split(inner);

  draw_tabs(f, rows[0], app);

  let Some(resident) = app.detail.ready() else {
    return;
  };
  match app.detail_tab {
    DetailTab::Overview => draw_overview(f, rows[1], app, resident),
    DetailTab::Family => draw_family(f, rows[1], app),
    DetailTab::Documents => draw_documents(f, rows[1], app),
    DetailTab::Services => draw_services(f, rows[1], app),
  }
}

// ─── Tabs ─────────────────────────────────────────────────────────────────────

fn draw_tabs(f: &mut Frame, area: Rect, app: &App) {
  let mut spans = Vec::new();
  for tab in [
    DetailTab::Overview,
    DetailTab::Family,
    DetailTab::Documents,
    DetailTab::Services,
  ] {
    let style = if tab == app.detail_tab {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(format!(" {} ", tab.label()), style));
    spans.push(Span::raw(" "));
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ─── Overview ─────────────────────────────────────────────────────────────────

fn draw_overview(f: &mut Frame, area: Rect, app: &App, r: &ResidentRecord) {
  let field = |label: &str, value: String| -> Line {
    Line::from(vec![
      Span::styled(
        format!("{label:<16}"),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
      ),
      Span::raw(if value.is_empty() { "-".to_string() } else { value }),
    ])
  };

  // Location ids resolve to names once reference data is loaded; until
  // then the bare id shows.
  let place = |name: Option<&str>, id: Option<u64>| match (name, id) {
    (Some(n), _) => n.to_string(),
    (None, Some(id)) => format!("#{id}"),
    (None, None) => String::new(),
  };
  let data = app.reference.as_ref();

  let status = match (r.is_active, r.deceased) {
    (_, true) => "deceased",
    (true, false) => "active",
    (false, false) => "inactive",
  };

  let lines = vec![
    field("National ID", r.national_id.clone()),
    field("Gender", r.gender.map(|g| g.label().to_string()).unwrap_or_default()),
    field("Born", format_long_date(&r.date_of_birth)),
    field(
      "Marital status",
      r.marital_status.map(|m| m.label().to_string()).unwrap_or_default(),
    ),
    field("Nationality", r.nationality.clone()),
    field("Education", r.education_level.clone()),
    field("Occupation", r.occupation.clone()),
    Line::from(""),
    field("Phone", r.phone.clone()),
    field("Email", r.email.clone()),
    field("House", r.house_number.clone()),
    field("Street", r.street.clone()),
    field(
      "Kebele",
      place(data.zip(r.kebele_id).and_then(|(d, id)| d.kebele_name(id)), r.kebele_id),
    ),
    field(
      "Woreda",
      place(data.zip(r.woreda_id).and_then(|(d, id)| d.woreda_name(id)), r.woreda_id),
    ),
    field(
      "Zone",
      place(data.zip(r.zone_id).and_then(|(d, id)| d.zone_name(id)), r.zone_id),
    ),
    field(
      "Region",
      place(data.zip(r.region_id).and_then(|(d, id)| d.region_name(id)), r.region_id),
    ),
    Line::from(""),
    field("Status", status.to_string()),
  ];

  f.render_widget(Paragraph::new(lines), area);
}

// ─── Sub-lists ────────────────────────────────────────────────────────────────

/// Badge for the persistence tag; confirmed rows carry none.
fn persistence_span(p: Persistence) -> Span<'static> {
  match p {
    Persistence::Confirmed => Span::raw(""),
    Persistence::Pending => Span::styled(" ~ saving", Style::default().fg(Color::Yellow)),
    Persistence::Failed => Span::styled(" ! not saved", Style::default().fg(Color::Red)),
  }
}

fn draw_empty_hint(f: &mut Frame, area: Rect, hint: &str) {
  f.render_widget(
    Paragraph::new(hint.to_string()).style(Style::default().fg(Color::DarkGray)),
    area,
  );
}

fn draw_family(f: &mut Frame, area: Rect, app: &App) {
  if app.family.is_empty() {
    draw_empty_hint(f, area, "No family members. Press f to add one.");
    return;
  }
  let lines: Vec<Line> = app
    .family
    .iter()
    .map(|m| {
      Line::from(vec![
        Span::raw(format!("{:<28}", m.full_name)),
        Span::styled(format!("{:<14}", m.relationship), Style::default().fg(Color::Gray)),
        persistence_span(m.persistence),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_documents(f: &mut Frame, area: Rect, app: &App) {
  if app.documents.is_empty() {
    draw_empty_hint(f, area, "No identity documents. Press d to add one.");
    return;
  }
  let lines: Vec<Line> = app
    .documents
    .iter()
    .map(|d| {
      let validity = match d.validity {
        kebele_core::resident::DocumentValidity::Active => {
          Span::styled("active ", Style::default().fg(Color::Green))
        }
        kebele_core::resident::DocumentValidity::Expired => {
          Span::styled("expired", Style::default().fg(Color::Red))
        }
      };
      Line::from(vec![
        Span::raw(format!("{:<20}", d.kind)),
        Span::styled(format!("{:<18}", d.number), Style::default().fg(Color::Gray)),
        validity,
        persistence_span(d.persistence),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), area);
}

fn draw_services(f: &mut Frame, area: Rect, app: &App) {
  if app.services.is_empty() {
    draw_empty_hint(f, area, "No service requests. Press v to add one.");
    return;
  }
  let lines: Vec<Line> = app
    .services
    .iter()
    .map(|s| {
      use kebele_core::resident::ServiceStatus;
      let status = match s.status {
        ServiceStatus::Pending => Span::styled("pending    ", Style::default().fg(Color::Yellow)),
        ServiceStatus::Approved => Span::styled("approved   ", Style::default().fg(Color::Green)),
        ServiceStatus::Rejected => Span::styled("rejected   ", Style::default().fg(Color::Red)),
        ServiceStatus::InProgress => {
          Span::styled("in progress", Style::default().fg(Color::Cyan))
        }
      };
      Line::from(vec![
        Span::raw(format!("{:<28}", s.service)),
        status,
        persistence_span(s.persistence),
      ])
    })
    .collect();
  f.render_widget(Paragraph::new(lines), area);
}

//! Resident list — the main screen.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::app::{App, Load};
use kebele_core::roster::ActiveFilter;

/// Render the resident list into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let view = app.roster_view();
  let total = app.residents.ready().map(Vec::len).unwrap_or(0);

  let mut filters = Vec::new();
  if let Some(g) = app.query.gender {
    filters.push(g.label().to_lowercase());
  }
  if let Some(m) = app.query.marital_status {
    filters.push(m.label().to_lowercase());
  }
  if app.query.active != ActiveFilter::All {
    filters.push(app.query.active.label().to_string());
  }
  let filter_note = if filters.is_empty() {
    String::new()
  } else {
    format!(" [{}]", filters.join(", "))
  };

  let title = format!(
    " Residents ({}/{}){} by {}{} ",
    view.len(),
    total,
    filter_note,
    app.sort_key.label(),
    if app.sort_desc { " desc" } else { "" }
  );

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let mut inner = block.inner(area);
  f.render_widget(block, area);

  // Loading, error and empty states render distinctly.
  match &app.residents {
    Load::Loading => {
      f.render_widget(
        Paragraph::new("Loading residents…").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
      return;
    }
    Load::Failed(err) => {
      f.render_widget(
        Paragraph::new(vec![
          Line::from(Span::styled(
            format!("Could not load residents: {err}"),
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
    Load::Ready(_) if view.is_empty() => {
      f.render_widget(
        Paragraph::new("No residents match.").style(Style::default().fg(Color::DarkGray)),
        inner,
      );
      return;
    }
    Load::Ready(_) => {}
  }

  // Search bar at the bottom of the pane while active or set.
  if (app.search_active || !app.query.search.is_empty()) && inner.height > 2 {
    let search_area = Rect {
      x:      inner.x,
      y:      inner.y + inner.height - 1,
      width:  inner.width,
      height: 1,
    };
    inner.height = inner.height.saturating_sub(1);

    let text = if app.search_active {
      format!("/{}_", app.query.search)
    } else {
      format!("/{}", app.query.search)
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  let items: Vec<ListItem> = view
    .iter()
    .map(|r| {
      let status = if r.is_active { "active  " } else { "inactive" };
      let status_style = if r.is_active {
        Style::default().fg(Color::Green)
      } else {
        Style::default().fg(Color::Red)
      };
      let gender = r.gender.map(|g| g.label()).unwrap_or("-");

      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<30}", truncate(&r.full_name(), 29))),
        Span::styled(format!("{:<18}", truncate(&r.national_id, 17)), Style::default().fg(Color::Gray)),
        Span::raw(format!("{gender:<8}")),
        Span::styled(status, status_style),
      ]))
    })
    .collect();

  let mut state = ListState::default();
  state.select((!view.is_empty()).then_some(app.list_cursor));

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

fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let cut: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{cut}…")
  }
}

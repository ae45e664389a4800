//! Document planning: an explicit cursor threaded through wrap and
//! pagination, emitting draw operations.
//!
//! Nothing here touches the PDF backend. The plan is a pure function of the
//! record, the metrics and the issue timestamp, which is what makes the
//! pagination behavior deterministic and testable.

use chrono::{DateTime, Utc};
use kebele_core::certificate::CertificateRecord;

use crate::{
  measure::{text_width, wrap},
  template::{field_rows, subtitle},
};

// ─── Page metrics ────────────────────────────────────────────────────────────

/// Fixed page geometry, millimetres. One set of metrics governs the whole
/// document; every page is the same size with the same frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PageMetrics {
  pub page_width:  f64,
  pub page_height: f64,
  /// Uniform content margin.
  pub margin: f64,
  /// Inset of the full-page border rectangle.
  pub border_inset: f64,
  pub line_height:  f64,
  /// A row never starts below `page_height - bottom_reserve`.
  pub bottom_reserve: f64,
  /// Width of the bold label column; values start after it.
  pub label_column: f64,
  /// Footer baseline, measured from the bottom edge of the last page.
  pub footer_offset: f64,

  pub title_size:    f64,
  pub subtitle_size: f64,
  pub section_size:  f64,
  pub body_size:     f64,
  pub footer_size:   f64,
}

impl Default for PageMetrics {
  /// A4 portrait.
  fn default() -> Self {
    Self {
      page_width:     210.0,
      page_height:    297.0,
      margin:         16.0,
      border_inset:   8.0,
      line_height:    7.0,
      bottom_reserve: 20.0,
      label_column:   52.0,
      footer_offset:  12.0,
      title_size:     20.0,
      subtitle_size:  11.5,
      section_size:   13.0,
      body_size:      11.0,
      footer_size:    9.0,
    }
  }
}

impl PageMetrics {
  pub fn content_width(&self) -> f64 {
    self.page_width - 2.0 * self.margin
  }

  /// Maximum rendered width of a wrapped value:
  /// `page_width - 2 * margin - label_column`.
  pub fn value_width(&self) -> f64 {
    self.content_width() - self.label_column
  }

  pub fn value_x(&self) -> f64 {
    self.margin + self.label_column
  }

  fn page_limit(&self) -> f64 {
    self.page_height - self.bottom_reserve
  }

  fn top(&self) -> f64 {
    self.margin + self.line_height
  }
}

// ─── Cursor and draw operations ──────────────────────────────────────────────

/// Vertical position within the document; `y` grows downward from the top of
/// `page`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cursor {
  pub y:    f64,
  pub page: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
  /// The full-page frame, repeated on every page.
  PageBorder { page: usize },
  Text {
    page: usize,
    x:    f64,
    y:    f64,
    text: String,
    size: f64,
    bold: bool,
  },
  Rule { page: usize, x1: f64, x2: f64, y: f64 },
}

impl DrawOp {
  pub fn page(&self) -> usize {
    match self {
      Self::PageBorder { page } | Self::Text { page, .. } | Self::Rule { page, .. } => *page,
    }
  }
}

/// The planned document: draw operations plus the geometry they were planned
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentPlan {
  pub metrics:    PageMetrics,
  pub ops:        Vec<DrawOp>,
  pub page_count: usize,
}

// ─── Planning helpers ────────────────────────────────────────────────────────

/// Start a fresh page: advance the page index, reset to the top margin and
/// re-emit the frame.
fn break_page(m: &PageMetrics, cursor: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
  let page = cursor.page + 1;
  ops.push(DrawOp::PageBorder { page });
  Cursor { y: m.top(), page }
}

/// The pagination rule: checked before every drawn line, not once per row,
/// so a long wrapped value can force a break before its label is drawn.
fn ensure_room(m: &PageMetrics, cursor: Cursor, ops: &mut Vec<DrawOp>) -> Cursor {
  if cursor.y > m.page_limit() {
    break_page(m, cursor, ops)
  } else {
    cursor
  }
}

fn push_centered(
  m: &PageMetrics,
  ops: &mut Vec<DrawOp>,
  cursor: Cursor,
  text: &str,
  size: f64,
  bold: bool,
) -> Cursor {
  let width = text_width(text, size, bold);
  let x = ((m.page_width - width) / 2.0).max(m.margin);
  ops.push(DrawOp::Text {
    page: cursor.page,
    x,
    y: cursor.y,
    text: text.to_string(),
    size,
    bold,
  });
  Cursor { y: cursor.y + m.line_height, page: cursor.page }
}

/// One labeled row: bold label at the margin, wrapped value in the value
/// column. Advances by `line_height × lines`, never less than one line.
fn push_field_row(
  m: &PageMetrics,
  ops: &mut Vec<DrawOp>,
  mut cursor: Cursor,
  label: &str,
  value: &str,
) -> Cursor {
  let lines = wrap(value, m.value_width(), m.body_size, false);
  for (i, line) in lines.iter().enumerate() {
    cursor = ensure_room(m, cursor, ops);
    if i == 0 {
      ops.push(DrawOp::Text {
        page: cursor.page,
        x:    m.margin,
        y:    cursor.y,
        text: label.to_string(),
        size: m.body_size,
        bold: true,
      });
    }
    ops.push(DrawOp::Text {
      page: cursor.page,
      x:    m.value_x(),
      y:    cursor.y,
      text: line.clone(),
      size: m.body_size,
      bold: false,
    });
    cursor.y += m.line_height;
  }
  cursor
}

fn push_plain_line(
  m: &PageMetrics,
  ops: &mut Vec<DrawOp>,
  cursor: Cursor,
  text: &str,
  size: f64,
  bold: bool,
) -> Cursor {
  let cursor = ensure_room(m, cursor, ops);
  ops.push(DrawOp::Text {
    page: cursor.page,
    x:    m.margin,
    y:    cursor.y,
    text: text.to_string(),
    size,
    bold,
  });
  Cursor { y: cursor.y + m.line_height, page: cursor.page }
}

// ─── Plan ────────────────────────────────────────────────────────────────────

/// Plan the full printable certificate for `record`.
pub fn plan_certificate(
  record: &CertificateRecord,
  metrics: &PageMetrics,
  issued_at: DateTime<Utc>,
) -> DocumentPlan {
  let m = metrics;
  let mut ops = vec![DrawOp::PageBorder { page: 0 }];
  let mut cursor = Cursor { y: m.top() + m.line_height, page: 0 };

  // Title, measured and centered.
  let title = record
    .certificate_type
    .map(|k| k.title())
    .unwrap_or("Certificate");
  cursor = push_centered(m, &mut ops, cursor, title, m.title_size, true);
  cursor.y += m.line_height / 2.0;

  // Subtitle, then a thin rule across the inner content width.
  cursor = push_centered(m, &mut ops, cursor, subtitle(record), m.subtitle_size, false);
  ops.push(DrawOp::Rule {
    page: cursor.page,
    x1:   m.margin,
    x2:   m.page_width - m.margin,
    y:    cursor.y,
  });
  cursor.y += m.line_height;

  // Field section.
  cursor = push_plain_line(m, &mut ops, cursor, "Resident Details", m.section_size, true);
  for (label, value) in field_rows(record) {
    cursor = push_field_row(m, &mut ops, cursor, label, &value);
  }

  // Issuer block, subject to the same pagination rule per line.
  cursor.y += m.line_height;
  cursor = push_plain_line(m, &mut ops, cursor, "Issuer Information", m.section_size, true);
  let kebele = record.display(&record.kebele);
  cursor = push_plain_line(
    m,
    &mut ops,
    cursor,
    &format!("Issued by: {kebele} Kebele Administration Office"),
    m.body_size,
    false,
  );
  cursor = push_plain_line(
    m,
    &mut ops,
    cursor,
    &format!(
      "Woreda: {}   Zone: {}   Region: {}",
      record.display(&record.woreda),
      record.display(&record.zone),
      record.display(&record.region)
    ),
    m.body_size,
    false,
  );
  let issued = issued_at.format("%A, %B %-d, %Y at %H:%M UTC");
  cursor = push_plain_line(
    m,
    &mut ops,
    cursor,
    &format!("Issued on {issued}"),
    m.body_size,
    false,
  );

  // Footer: fixed offset from the bottom of the last page only, centered.
  let footer = "Valid only with the seal of the issuing kebele. Void if altered.";
  let footer_cursor = Cursor {
    y:    m.page_height - m.footer_offset,
    page: cursor.page,
  };
  push_centered(m, &mut ops, footer_cursor, footer, m.footer_size, false);

  DocumentPlan {
    metrics:    m.clone(),
    ops,
    page_count: cursor.page + 1,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use kebele_core::certificate::CertificateType;

  fn record() -> CertificateRecord {
    CertificateRecord {
      certificate_type: Some(CertificateType::Birth),
      recipient_name:   Some("Abdi Tolera".into()),
      date_of_birth:    Some("1990-01-15".into()),
      place_of_birth:   Some("Adama".into()),
      gender:           Some("Male".into()),
      father_name:      Some("Tolera Lemma".into()),
      mother_name:      Some("Abebech Hailu".into()),
      nationality:      Some("Ethiopian".into()),
      kebele:           Some("Kebele 05".into()),
      woreda:           Some("Adama".into()),
      zone:             Some("East Shewa".into()),
      region:           Some("Oromia".into()),
      ..CertificateRecord::default()
    }
  }

  fn issued() -> DateTime<Utc> {
    use chrono::TimeZone;
    Utc.with_ymd_and_hms(2024, 6, 5, 9, 30, 0).unwrap()
  }

  // ── Wrap-then-advance law ─────────────────────────────────────────────────

  #[test]
  fn field_row_advances_line_height_times_wrapped_lines() {
    let m = PageMetrics::default();
    let value = "House 114, Kebele 05, Adama Woreda, East Shewa Zone, \
                 Oromia Region, Federal Democratic Republic of Ethiopia";
    let expected_lines = wrap(value, m.value_width(), m.body_size, false).len();
    assert!(expected_lines >= 2, "fixture must actually wrap");

    let mut ops = Vec::new();
    let start = Cursor { y: 50.0, page: 0 };
    let end = push_field_row(&m, &mut ops, start, "Address", value);

    assert_eq!(end.page, 0);
    let advanced = end.y - start.y;
    assert!(
      (advanced - m.line_height * expected_lines as f64).abs() < 1e-9,
      "advanced {advanced}, expected {} lines x {}",
      expected_lines,
      m.line_height
    );
  }

  #[test]
  fn short_value_still_advances_one_full_line() {
    let m = PageMetrics::default();
    let mut ops = Vec::new();
    let start = Cursor { y: 50.0, page: 0 };
    let end = push_field_row(&m, &mut ops, start, "Gender", "Male");
    assert_eq!(end.page, 0);
    assert!((end.y - start.y - m.line_height).abs() < 1e-9);
  }

  // ── Pagination rule ───────────────────────────────────────────────────────

  #[test]
  fn row_breaks_page_before_the_label_when_past_the_reserve() {
    let m = PageMetrics::default();
    let mut ops = Vec::new();
    let start = Cursor { y: m.page_limit() + 1.0, page: 0 };
    let end = push_field_row(&m, &mut ops, start, "Kebele", "Kebele 05");

    assert_eq!(end.page, 1);
    assert!(matches!(ops[0], DrawOp::PageBorder { page: 1 }));
    // Both the label and the value landed on the new page.
    assert!(
      ops
        .iter()
        .filter_map(|op| match op {
          DrawOp::Text { page, .. } => Some(*page),
          _ => None,
        })
        .all(|p| p == 1)
    );
  }

  #[test]
  fn long_wrapped_value_continues_across_the_break() {
    let m = PageMetrics::default();
    let mut ops = Vec::new();
    // Two lines fit before the limit; the rest must flow to page 1.
    let start = Cursor { y: m.page_limit() - m.line_height, page: 0 };
    let long = "word ".repeat(120);
    let end = push_field_row(&m, &mut ops, start, "Notes", long.trim());

    assert!(end.page >= 1);
    let first_page_lines = ops
      .iter()
      .filter(|op| matches!(op, DrawOp::Text { page: 0, .. }))
      .count();
    assert!(first_page_lines >= 1, "some of the value stays on page 0");
  }

  // ── Whole-document planning ───────────────────────────────────────────────

  #[test]
  fn plan_is_deterministic() {
    let m = PageMetrics::default();
    let a = plan_certificate(&record(), &m, issued());
    let b = plan_certificate(&record(), &m, issued());
    assert_eq!(a, b);
  }

  #[test]
  fn single_page_plan_has_one_border_and_a_footer() {
    let m = PageMetrics::default();
    let plan = plan_certificate(&record(), &m, issued());

    assert_eq!(plan.page_count, 1);
    let borders = plan
      .ops
      .iter()
      .filter(|op| matches!(op, DrawOp::PageBorder { .. }))
      .count();
    assert_eq!(borders, 1);
    assert!(
      plan.ops.iter().any(|op| matches!(
        op,
        DrawOp::Text { text, .. } if text.contains("Void if altered")
      ))
    );
  }

  #[test]
  fn title_is_centered_by_measurement() {
    let m = PageMetrics::default();
    let plan = plan_certificate(&record(), &m, issued());
    let title_op = plan
      .ops
      .iter()
      .find_map(|op| match op {
        DrawOp::Text { x, text, size, .. }
          if text == "Birth Certificate" && *size == m.title_size =>
        {
          Some(*x)
        }
        _ => None,
      })
      .expect("title op present");

    let width = text_width("Birth Certificate", m.title_size, true);
    assert!((title_op - (m.page_width - width) / 2.0).abs() < 1e-9);
    assert!(title_op > m.margin, "a measured title is visibly centered, not flush left");
  }

  #[test]
  fn overflowing_document_repeats_the_border_per_page_and_footers_only_the_last() {
    // Shrink the page so the registry rows cannot fit on one page.
    let m = PageMetrics { page_height: 90.0, ..PageMetrics::default() };
    let plan = plan_certificate(&record(), &m, issued());

    assert!(plan.page_count > 1, "fixture must overflow");
    let border_pages: Vec<usize> = plan
      .ops
      .iter()
      .filter_map(|op| match op {
        DrawOp::PageBorder { page } => Some(*page),
        _ => None,
      })
      .collect();
    assert_eq!(border_pages, (0..plan.page_count).collect::<Vec<_>>());

    let footer_pages: Vec<usize> = plan
      .ops
      .iter()
      .filter_map(|op| match op {
        DrawOp::Text { page, text, .. } if text.contains("Void if altered") => Some(*page),
        _ => None,
      })
      .collect();
    assert_eq!(footer_pages, vec![plan.page_count - 1]);
  }

  #[test]
  fn per_field_page_assignment_is_stable_across_runs() {
    let m = PageMetrics { page_height: 90.0, ..PageMetrics::default() };
    let assignment = |plan: &DocumentPlan| -> Vec<(String, usize)> {
      plan
        .ops
        .iter()
        .filter_map(|op| match op {
          DrawOp::Text { page, text, bold: true, .. } => Some((text.clone(), *page)),
          _ => None,
        })
        .collect()
    };
    let a = plan_certificate(&record(), &m, issued());
    let b = plan_certificate(&record(), &m, issued());
    assert_eq!(assignment(&a), assignment(&b));
  }

  #[test]
  fn issuer_block_carries_the_full_weekday_and_month() {
    let m = PageMetrics::default();
    let plan = plan_certificate(&record(), &m, issued());
    assert!(plan.ops.iter().any(|op| matches!(
      op,
      DrawOp::Text { text, .. } if text.contains("Wednesday, June 5, 2024")
    )));
  }
}

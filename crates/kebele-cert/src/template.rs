//! Presentational certificate templates.
//!
//! Four interchangeable skins over two body kinds. A template is a pure
//! mapping from a [`CertificateRecord`] to a [`TemplateLayout`]; the terminal
//! preview and the PDF planner both consume the result. Every skin must
//! tolerate every field being absent — the placeholder shows, nothing throws.

use kebele_core::certificate::{
  CertificateRecord, CertificateType, LayoutKind, PLACEHOLDER, format_long_date,
};

// ─── Template ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Template {
  #[default]
  Modern,
  Elegant,
  Creative,
  Ethiopian,
}

impl Template {
  pub const ALL: [Template; 4] = [
    Self::Modern,
    Self::Elegant,
    Self::Creative,
    Self::Ethiopian,
  ];

  pub fn label(self) -> &'static str {
    match self {
      Self::Modern => "Modern",
      Self::Elegant => "Elegant",
      Self::Creative => "Creative",
      Self::Ethiopian => "Ethiopian",
    }
  }

  pub fn cycle(self) -> Self {
    match self {
      Self::Modern => Self::Elegant,
      Self::Elegant => Self::Creative,
      Self::Creative => Self::Ethiopian,
      Self::Ethiopian => Self::Modern,
    }
  }

  /// Character used for the preview frame.
  pub fn frame_char(self) -> char {
    match self {
      Self::Modern => '─',
      Self::Elegant => '═',
      Self::Creative => '~',
      Self::Ethiopian => '█',
    }
  }

  fn presentation_line(self) -> &'static str {
    match self {
      Self::Modern => "This certifies that",
      Self::Elegant => "It is an honor to present this certificate to",
      Self::Creative => "With great celebration, this certificate goes to",
      Self::Ethiopian => "This certificate is presented to",
    }
  }

  fn footnote(self) -> &'static str {
    match self {
      Self::Modern => "Verified digital record of the kebele administration",
      Self::Elegant => "Issued with honor and distinction",
      Self::Creative => "Crafted to mark a memorable achievement",
      Self::Ethiopian => "Issued under the authority of the kebele administration",
    }
  }
}

// ─── Layout ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateBody {
  /// Prose lines, centered when previewed.
  Narrative(Vec<String>),
  /// Label/value grid.
  Registry(Vec<(String, String)>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateLayout {
  pub heading:    String,
  pub subheading: String,
  /// Extra authority banner; only the Ethiopian skin carries one.
  pub authority:  Option<String>,
  pub body:       TemplateBody,
  pub footnote:   String,
}

/// Subtitle line under the document title, by layout kind.
pub fn subtitle(record: &CertificateRecord) -> &'static str {
  match record.certificate_type.map(CertificateType::layout) {
    Some(LayoutKind::Narrative) => "Awarded in recognition of successful completion",
    _ => "Official extract from the kebele civil register",
  }
}

/// The labeled field rows for a record, in display order.
///
/// Which rows appear depends only on the certificate type; values are always
/// placeholder-substituted, dates long-formatted.
pub fn field_rows(record: &CertificateRecord) -> Vec<(&'static str, String)> {
  let text = |f: &Option<String>| record.display(f).to_string();
  let date = |f: &Option<String>| match f.as_deref().map(str::trim) {
    Some(v) if !v.is_empty() => format_long_date(v),
    _ => PLACEHOLDER.to_string(),
  };

  match record.certificate_type {
    Some(CertificateType::Birth) => vec![
      ("Full Name", text(&record.recipient_name)),
      ("Date of Birth", date(&record.date_of_birth)),
      ("Place of Birth", text(&record.place_of_birth)),
      ("Gender", text(&record.gender)),
      ("Father's Name", text(&record.father_name)),
      ("Mother's Name", text(&record.mother_name)),
      ("Nationality", text(&record.nationality)),
      ("Kebele", text(&record.kebele)),
      ("Woreda", text(&record.woreda)),
      ("Zone", text(&record.zone)),
      ("Region", text(&record.region)),
    ],
    Some(CertificateType::Marriage) => vec![
      ("Full Name", text(&record.recipient_name)),
      ("Spouse Name", text(&record.spouse_name)),
      ("Date of Marriage", date(&record.date_of_marriage)),
      ("Place of Marriage", text(&record.place_of_marriage)),
      ("Nationality", text(&record.nationality)),
      ("Kebele", text(&record.kebele)),
      ("Woreda", text(&record.woreda)),
      ("Zone", text(&record.zone)),
      ("Region", text(&record.region)),
    ],
    Some(CertificateType::Death) => vec![
      ("Full Name", text(&record.recipient_name)),
      ("Date of Birth", date(&record.date_of_birth)),
      ("Date of Death", date(&record.date_of_death)),
      ("Place of Death", text(&record.place_of_death)),
      ("Cause of Death", text(&record.cause_of_death)),
      ("Gender", text(&record.gender)),
      ("Kebele", text(&record.kebele)),
      ("Woreda", text(&record.woreda)),
      ("Region", text(&record.region)),
    ],
    // Narrative kinds and untyped records share the education rows.
    _ => vec![
      ("Recipient", text(&record.recipient_name)),
      ("Program", text(&record.program)),
      ("Institution", text(&record.institution)),
      ("Completion Date", date(&record.completion_date)),
      ("Kebele", text(&record.kebele)),
      ("Woreda", text(&record.woreda)),
    ],
  }
}

/// Map a record through a template skin.
pub fn render(template: Template, record: &CertificateRecord) -> TemplateLayout {
  let kind = record.certificate_type;
  let heading = kind.map(|k| k.title().to_string()).unwrap_or_else(|| "Certificate".to_string());

  let authority = match template {
    Template::Ethiopian => Some(
      "Federal Democratic Republic of Ethiopia, Kebele Administration".to_string(),
    ),
    _ => None,
  };

  let body = match kind.map(CertificateType::layout) {
    Some(LayoutKind::Narrative) => {
      TemplateBody::Narrative(narrative_lines(template, record))
    }
    _ => TemplateBody::Registry(
      field_rows(record)
        .into_iter()
        .map(|(label, value)| (label.to_string(), value))
        .collect(),
    ),
  };

  TemplateLayout {
    heading,
    subheading: subtitle(record).to_string(),
    authority,
    body,
    footnote: template.footnote().to_string(),
  }
}

fn narrative_lines(template: Template, record: &CertificateRecord) -> Vec<String> {
  let recipient = record.display(&record.recipient_name).to_string();
  let program = record.display(&record.program).to_string();
  let institution = record.display(&record.institution).to_string();
  let raw_date = record.completion_date.clone().unwrap_or_default();

  vec![
    template.presentation_line().to_string(),
    recipient,
    format!("for the successful completion of {program}"),
    format!("offered by {institution}"),
    // Empty completion dates show the formatter's own placeholder.
    format_long_date(&raw_date),
  ]
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn empty_record(kind: CertificateType) -> CertificateRecord {
    CertificateRecord {
      certificate_type: Some(kind),
      ..CertificateRecord::default()
    }
  }

  // ── Placeholder invariant ─────────────────────────────────────────────────

  #[test]
  fn every_template_substitutes_placeholders_for_empty_records() {
    for kind in CertificateType::ALL {
      for template in Template::ALL {
        let layout = render(template, &empty_record(kind));
        let flat = match &layout.body {
          TemplateBody::Narrative(lines) => lines.join("\n"),
          TemplateBody::Registry(rows) => rows
            .iter()
            .map(|(l, v)| format!("{l}: {v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        };
        assert!(
          !flat.contains("undefined") && !flat.contains("null"),
          "{template:?}/{kind:?} leaked a raw absent value:\n{flat}"
        );
        assert!(
          flat.contains(PLACEHOLDER) || flat.contains("Date"),
          "{template:?}/{kind:?} shows no placeholder at all:\n{flat}"
        );
      }
    }
  }

  #[test]
  fn layout_kind_picks_the_body_shape() {
    let narrative = render(Template::Modern, &empty_record(CertificateType::Completion));
    assert!(matches!(narrative.body, TemplateBody::Narrative(_)));

    let registry = render(Template::Modern, &empty_record(CertificateType::Birth));
    assert!(matches!(registry.body, TemplateBody::Registry(_)));
  }

  #[test]
  fn only_the_ethiopian_skin_carries_an_authority_banner() {
    let rec = empty_record(CertificateType::Birth);
    assert!(render(Template::Ethiopian, &rec).authority.is_some());
    for t in [Template::Modern, Template::Elegant, Template::Creative] {
      assert!(render(t, &rec).authority.is_none());
    }
  }

  // ── Field rows ────────────────────────────────────────────────────────────

  #[test]
  fn birth_rows_long_format_the_date() {
    let mut rec = empty_record(CertificateType::Birth);
    rec.recipient_name = Some("Abdi Tolera".into());
    rec.date_of_birth = Some("1990-01-15".into());

    let rows = field_rows(&rec);
    assert_eq!(rows[0], ("Full Name", "Abdi Tolera".to_string()));
    assert_eq!(rows[1], ("Date of Birth", "January 15, 1990".to_string()));
  }

  #[test]
  fn marriage_rows_include_the_spouse() {
    let mut rec = empty_record(CertificateType::Marriage);
    rec.spouse_name = Some("Chaltu Bekele".into());
    let rows = field_rows(&rec);
    assert!(rows.iter().any(|(l, v)| *l == "Spouse Name" && v == "Chaltu Bekele"));
    // Marriage ignores death fields entirely.
    assert!(rows.iter().all(|(l, _)| !l.contains("Death")));
  }

  #[test]
  fn absent_dates_in_rows_show_the_field_placeholder() {
    let rows = field_rows(&empty_record(CertificateType::Death));
    let dod = rows.iter().find(|(l, _)| *l == "Date of Death").unwrap();
    assert_eq!(dod.1, PLACEHOLDER);
  }

  #[test]
  fn narrative_empty_date_shows_the_date_placeholder() {
    let layout = render(Template::Elegant, &empty_record(CertificateType::Completion));
    let TemplateBody::Narrative(lines) = layout.body else {
      panic!("completion must be narrative")
    };
    assert_eq!(lines.last().map(String::as_str), Some("Date"));
    assert!(!lines.iter().any(|l| l.contains("Invalid")));
  }

  #[test]
  fn skins_differ_in_wording_but_not_in_facts() {
    let mut rec = empty_record(CertificateType::Completion);
    rec.recipient_name = Some("Tigist Alemu".into());

    let modern = render(Template::Modern, &rec);
    let creative = render(Template::Creative, &rec);
    assert_ne!(modern, creative);

    for layout in [modern, creative] {
      let TemplateBody::Narrative(lines) = layout.body else { panic!() };
      assert!(lines.iter().any(|l| l == "Tigist Alemu"));
    }
  }
}

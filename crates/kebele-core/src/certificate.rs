//! Certificate types and the flat field bag handed to renderers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::{Error, resident::ResidentRecord};

/// Rendered in place of any absent or empty field. Renderers must emit this
/// — never "null", "undefined" or a panic.
pub const PLACEHOLDER: &str = "N/A";

// ─── CertificateType ─────────────────────────────────────────────────────────

/// Closed set of certificate kinds.
///
/// The education kinds share a single-subject narrative layout; the registry
/// kinds share a tabular key-value layout. Every place that decides which
/// fields to show consults this partition through [`CertificateType::layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificateType {
  Completion,
  Achievement,
  Appreciation,
  Participation,
  Birth,
  Marriage,
  Death,
}

/// Which of the two body layouts a certificate type uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
  /// Single recipient + course/program prose.
  Narrative,
  /// Registry-style label/value field grid.
  Registry,
}

impl CertificateType {
  pub const ALL: [CertificateType; 7] = [
    Self::Completion,
    Self::Achievement,
    Self::Appreciation,
    Self::Participation,
    Self::Birth,
    Self::Marriage,
    Self::Death,
  ];

  pub fn layout(self) -> LayoutKind {
    match self {
      Self::Completion | Self::Achievement | Self::Appreciation | Self::Participation => {
        LayoutKind::Narrative
      }
      Self::Birth | Self::Marriage | Self::Death => LayoutKind::Registry,
    }
  }

  /// Document title, e.g. `Birth Certificate`.
  pub fn title(self) -> &'static str {
    match self {
      Self::Completion => "Completion Certificate",
      Self::Achievement => "Achievement Certificate",
      Self::Appreciation => "Appreciation Certificate",
      Self::Participation => "Participation Certificate",
      Self::Birth => "Birth Certificate",
      Self::Marriage => "Marriage Certificate",
      Self::Death => "Death Certificate",
    }
  }

  /// Lower-case underscore form used as a document category and in file
  /// names, e.g. `birth_certificate`.
  pub fn slug(self) -> String {
    self.title().to_lowercase().replace(' ', "_")
  }
}

impl fmt::Display for CertificateType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.title())
  }
}

impl FromStr for CertificateType {
  type Err = Error;

  /// Accepts the bare kind (`birth`), the title (`Birth Certificate`) and
  /// the slug (`birth_certificate`), case-insensitively.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let key = s.trim().to_lowercase().replace([' ', '-'], "_");
    let key = key.strip_suffix("_certificate").unwrap_or(&key);
    match key {
      "completion" => Ok(Self::Completion),
      "achievement" => Ok(Self::Achievement),
      "appreciation" => Ok(Self::Appreciation),
      "participation" => Ok(Self::Participation),
      "birth" => Ok(Self::Birth),
      "marriage" => Ok(Self::Marriage),
      "death" => Ok(Self::Death),
      _ => Err(Error::UnknownCertificateType(s.to_string())),
    }
  }
}

// ─── CertificateRecord ───────────────────────────────────────────────────────

/// Flat bag of optional string fields feeding certificate rendering.
///
/// Exactly one `certificate_type` selects which subset is semantically
/// meaningful; renderers ignore the rest. Every accessor substitutes
/// [`PLACEHOLDER`] for absent or empty values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateRecord {
  pub certificate_type: Option<CertificateType>,

  pub recipient_name: Option<String>,
  pub father_name:    Option<String>,
  pub mother_name:    Option<String>,
  pub gender:         Option<String>,
  pub nationality:    Option<String>,

  pub date_of_birth:  Option<String>,
  pub place_of_birth: Option<String>,

  pub spouse_name:       Option<String>,
  pub date_of_marriage:  Option<String>,
  pub place_of_marriage: Option<String>,

  pub date_of_death:  Option<String>,
  pub place_of_death: Option<String>,
  pub cause_of_death: Option<String>,

  pub completion_date: Option<String>,
  pub program:         Option<String>,
  pub institution:     Option<String>,

  pub kebele: Option<String>,
  pub woreda: Option<String>,
  pub zone:   Option<String>,
  pub region: Option<String>,
}

impl CertificateRecord {
  /// Seed a record from a resident for the given certificate type.
  ///
  /// Location fields hold ids on the resident; callers resolve them to names
  /// with [`CertificateRecord::with_location`] once reference data is at
  /// hand.
  pub fn for_resident(resident: &ResidentRecord, kind: CertificateType) -> Self {
    let name = resident.full_name();
    Self {
      certificate_type: Some(kind),
      recipient_name:   (!name.is_empty()).then_some(name),
      gender:           resident.gender.map(|g| g.label().to_string()),
      nationality:      non_empty(&resident.nationality),
      date_of_birth:    non_empty(&resident.date_of_birth),
      ..Self::default()
    }
  }

  pub fn with_location(
    mut self,
    kebele: Option<String>,
    woreda: Option<String>,
    zone: Option<String>,
    region: Option<String>,
  ) -> Self {
    self.kebele = kebele;
    self.woreda = woreda;
    self.zone = zone;
    self.region = region;
    self
  }

  /// The value to render for a field: the trimmed content, or the
  /// placeholder when the field is absent or blank.
  pub fn display<'a>(&self, field: &'a Option<String>) -> &'a str {
    match field.as_deref().map(str::trim) {
      Some(v) if !v.is_empty() => v,
      _ => PLACEHOLDER,
    }
  }
}

fn non_empty(s: &str) -> Option<String> {
  let t = s.trim();
  (!t.is_empty()).then(|| t.to_string())
}

// ─── Date formatting ─────────────────────────────────────────────────────────

/// Long-form date for display: `June 5, 2024`.
///
/// Empty input yields the literal placeholder `Date`; non-empty input that
/// does not parse is returned unchanged, so stored data is never replaced by
/// an "Invalid Date" artifact.
pub fn format_long_date(raw: &str) -> String {
  let raw = raw.trim();
  if raw.is_empty() {
    return "Date".to_string();
  }
  // Accept bare ISO dates and datetime strings with a date prefix.
  let date_part = raw.get(..10).unwrap_or(raw);
  match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
    Ok(d) => d.format("%B %-d, %Y").to_string(),
    Err(_) => raw.to_string(),
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! Resident records and their owned sub-records.
//!
//! A resident is the unit the backend stores; sub-records (family members,
//! identity documents, service requests) are owned by exactly one resident.
//! Records arriving from the network are deserialised into these types at
//! the edge — nothing loosely-shaped flows past this module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Demographic enums ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
}

impl Gender {
  pub fn label(self) -> &'static str {
    match self {
      Self::Male => "Male",
      Self::Female => "Female",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
  Single,
  Married,
  Divorced,
  Widowed,
}

impl MaritalStatus {
  pub fn label(self) -> &'static str {
    match self {
      Self::Single => "Single",
      Self::Married => "Married",
      Self::Divorced => "Divorced",
      Self::Widowed => "Widowed",
    }
  }
}

// ─── ResidentRecord ──────────────────────────────────────────────────────────

/// A registered resident as stored by the backend.
///
/// String fields default to empty on deserialisation — the backend omits
/// fields it has no value for, and an absent field must never fail a parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResidentRecord {
  /// Backend-assigned identifier; `None` only on drafts that never left the
  /// client.
  pub id: Option<u64>,

  #[serde(default)]
  pub first_name:  String,
  #[serde(default)]
  pub middle_name: String,
  #[serde(default)]
  pub last_name:   String,

  pub gender:         Option<Gender>,
  #[serde(default)]
  pub date_of_birth:  String,
  #[serde(default)]
  pub national_id:    String,
  pub marital_status: Option<MaritalStatus>,
  #[serde(default)]
  pub nationality:     String,
  #[serde(default)]
  pub education_level: String,
  #[serde(default)]
  pub occupation:      String,

  #[serde(default)]
  pub phone: String,
  #[serde(default)]
  pub email: String,

  #[serde(default)]
  pub house_number: String,
  #[serde(default)]
  pub street:       String,
  pub kebele_id:    Option<u64>,
  pub woreda_id:    Option<u64>,
  pub zone_id:      Option<u64>,
  pub region_id:    Option<u64>,

  /// Server-side path of the profile photo, if one was uploaded.
  pub photo_path: Option<String>,

  #[serde(default = "default_true")]
  pub is_active: bool,
  #[serde(default)]
  pub deceased:  bool,
}

fn default_true() -> bool {
  true
}

impl ResidentRecord {
  /// Join the non-empty name parts with single spaces.
  pub fn full_name(&self) -> String {
    [&self.first_name, &self.middle_name, &self.last_name]
      .iter()
      .map(|s| s.trim())
      .filter(|s| !s.is_empty())
      .collect::<Vec<_>>()
      .join(" ")
  }
}

// ─── Persistence tag ─────────────────────────────────────────────────────────

/// Whether a sub-record has made it to the backend.
///
/// Locally-created rows start as `Pending`; a successful round-trip flips
/// them to `Confirmed`, a failed one to `Failed`. The UI renders all three
/// distinctly so an unsaved row can never masquerade as a stored one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persistence {
  #[default]
  Confirmed,
  Pending,
  Failed,
}

impl Persistence {
  pub fn is_confirmed(self) -> bool {
    matches!(self, Self::Confirmed)
  }
}

// ─── Sub-records ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilyMember {
  /// Backend-assigned id once confirmed.
  pub id: Option<u64>,
  /// Stable local key; assigned at creation, survives confirmation.
  #[serde(default = "Uuid::new_v4")]
  pub local_key: Uuid,

  pub full_name:     String,
  pub relationship:  String,
  #[serde(default)]
  pub date_of_birth: String,
  /// Set when the family member is themselves a registered resident.
  pub resident_id:   Option<u64>,

  #[serde(default)]
  pub persistence: Persistence,
}

impl FamilyMember {
  /// A locally-echoed row awaiting its persistence round-trip.
  pub fn pending(full_name: impl Into<String>, relationship: impl Into<String>) -> Self {
    Self {
      id:            None,
      local_key:     Uuid::new_v4(),
      full_name:     full_name.into(),
      relationship:  relationship.into(),
      date_of_birth: String::new(),
      resident_id:   None,
      persistence:   Persistence::Pending,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentValidity {
  Active,
  Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDocument {
  pub id:        Option<u64>,
  #[serde(default = "Uuid::new_v4")]
  pub local_key: Uuid,

  /// Document kind, e.g. "National ID", "Passport".
  pub kind:       String,
  pub number:     String,
  #[serde(default)]
  pub issued_on:  String,
  #[serde(default)]
  pub expires_on: String,
  pub validity:   DocumentValidity,

  #[serde(default)]
  pub persistence: Persistence,
}

impl IdentityDocument {
  pub fn pending(kind: impl Into<String>, number: impl Into<String>) -> Self {
    Self {
      id:          None,
      local_key:   Uuid::new_v4(),
      kind:        kind.into(),
      number:      number.into(),
      issued_on:   String::new(),
      expires_on:  String::new(),
      validity:    DocumentValidity::Active,
      persistence: Persistence::Pending,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
  Pending,
  Approved,
  Rejected,
  #[serde(rename = "in-progress")]
  InProgress,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRequest {
  pub id:        Option<u64>,
  #[serde(default = "Uuid::new_v4")]
  pub local_key: Uuid,

  /// Requested service, e.g. "ID renewal", "Residence letter".
  pub service:      String,
  #[serde(default)]
  pub requested_on: String,
  pub status:       ServiceStatus,

  #[serde(default)]
  pub persistence: Persistence,
}

impl ServiceRequest {
  pub fn pending(service: impl Into<String>) -> Self {
    Self {
      id:           None,
      local_key:    Uuid::new_v4(),
      service:      service.into(),
      requested_on: String::new(),
      status:       ServiceStatus::Pending,
      persistence:  Persistence::Pending,
    }
  }
}

// ─── GeneratedDocument ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
  Approved,
  PendingReview,
}

/// Descriptor of one certificate synthesis. Immutable once produced; a new
/// generation appends a new descriptor, never updates one in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedDocument {
  pub title:     String,
  /// Slugified certificate type, e.g. `birth_certificate`.
  pub category:  String,
  pub status:    DocumentStatus,
  pub file_name: String,
  pub issued_at: DateTime<Utc>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  #[test]
  fn full_name_skips_empty_parts() {
    let mut r = sample_resident();
    r.middle_name = String::new();
    assert_eq!(r.full_name(), "Abdi Tolera");
    r.middle_name = "Lemma".into();
    assert_eq!(r.full_name(), "Abdi Lemma Tolera");
  }

  #[test]
  fn resident_deserialises_with_sparse_fields() {
    // The backend omits anything it has no value for; the edge must cope.
    let r: ResidentRecord =
      serde_json::from_str(r#"{"id": 7, "first_name": "Abdi"}"#).unwrap();
    assert_eq!(r.id, Some(7));
    assert_eq!(r.first_name, "Abdi");
    assert_eq!(r.last_name, "");
    assert!(r.is_active, "is_active defaults to true");
    assert!(!r.deceased);
    assert!(r.gender.is_none());
  }

  #[test]
  fn pending_sub_records_carry_the_pending_tag() {
    let f = FamilyMember::pending("Chaltu Tolera", "sister");
    assert_eq!(f.persistence, Persistence::Pending);
    assert!(f.id.is_none());

    let d = IdentityDocument::pending("Passport", "EP1234567");
    assert_eq!(d.persistence, Persistence::Pending);

    let s = ServiceRequest::pending("Residence letter");
    assert_eq!(s.persistence, Persistence::Pending);
    assert_eq!(s.status, ServiceStatus::Pending);
  }

  #[test]
  fn sub_record_deserialised_from_backend_defaults_to_confirmed() {
    let f: FamilyMember = serde_json::from_str(
      r#"{"id": 3, "local_key": "7f1ad9e2-84f2-4a96-a2b2-94c0fa4ef3ff",
          "full_name": "Chaltu", "relationship": "sister",
          "resident_id": null}"#,
    )
    .unwrap();
    assert_eq!(f.persistence, Persistence::Confirmed);
  }

  #[test]
  fn service_status_wire_names() {
    let s: ServiceStatus = serde_json::from_str(r#""in-progress""#).unwrap();
    assert_eq!(s, ServiceStatus::InProgress);
    assert_eq!(
      serde_json::to_string(&DocumentStatus::Approved).unwrap(),
      r#""approved""#
    );
  }

  pub(crate) fn sample_resident() -> ResidentRecord {
    ResidentRecord {
      id:              Some(42),
      first_name:      "Abdi".into(),
      middle_name:     String::new(),
      last_name:       "Tolera".into(),
      gender:          Some(Gender::Male),
      date_of_birth:   "1990-01-15".into(),
      national_id:     "ETH-0042-1990".into(),
      marital_status:  Some(MaritalStatus::Married),
      nationality:     "Ethiopian".into(),
      education_level: "Diploma".into(),
      occupation:      "Carpenter".into(),
      phone:           "+251911234567".into(),
      email:           String::new(),
      house_number:    "H-114".into(),
      street:          String::new(),
      kebele_id:       Some(5),
      woreda_id:       Some(3),
      zone_id:         Some(2),
      region_id:       Some(1),
      photo_path:      None,
      is_active:       true,
      deceased:        false,
    }
  }
}

//! Registration wizard state machine.
//!
//! Pure state: field values, a field-keyed error map, and the current step.
//! The terminal front-end drives it; all gating and cascade rules live here
//! so they are testable without a UI.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::PathBuf};

// ─── Steps and fields ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Personal,
  Contact,
  Address,
}

impl Step {
  pub const ORDER: [Step; 3] = [Step::Personal, Step::Contact, Step::Address];

  pub fn title(self) -> &'static str {
    match self {
      Self::Personal => "Personal",
      Self::Contact => "Contact",
      Self::Address => "Address",
    }
  }

  fn next(self) -> Option<Step> {
    match self {
      Self::Personal => Some(Self::Contact),
      Self::Contact => Some(Self::Address),
      Self::Address => None,
    }
  }

  fn prev(self) -> Option<Step> {
    match self {
      Self::Personal => None,
      Self::Contact => Some(Self::Personal),
      Self::Address => Some(Self::Contact),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
  // Personal
  FirstName,
  MiddleName,
  LastName,
  Gender,
  DateOfBirth,
  NationalId,
  MaritalStatus,
  Nationality,
  EducationLevel,
  Occupation,
  // Contact
  Phone,
  Email,
  // Address
  Region,
  Zone,
  Woreda,
  Kebele,
  HouseNumber,
  Street,
}

impl Field {
  pub fn label(self) -> &'static str {
    match self {
      Self::FirstName => "First name",
      Self::MiddleName => "Middle name",
      Self::LastName => "Last name",
      Self::Gender => "Gender",
      Self::DateOfBirth => "Date of birth",
      Self::NationalId => "National ID",
      Self::MaritalStatus => "Marital status",
      Self::Nationality => "Nationality",
      Self::EducationLevel => "Education level",
      Self::Occupation => "Occupation",
      Self::Phone => "Phone",
      Self::Email => "Email",
      Self::Region => "Region",
      Self::Zone => "Zone",
      Self::Woreda => "Woreda",
      Self::Kebele => "Kebele",
      Self::HouseNumber => "House number",
      Self::Street => "Street",
    }
  }

  pub fn step(self) -> Step {
    match self {
      Self::FirstName
      | Self::MiddleName
      | Self::LastName
      | Self::Gender
      | Self::DateOfBirth
      | Self::NationalId
      | Self::MaritalStatus
      | Self::Nationality
      | Self::EducationLevel
      | Self::Occupation => Step::Personal,
      Self::Phone | Self::Email => Step::Contact,
      Self::Region
      | Self::Zone
      | Self::Woreda
      | Self::Kebele
      | Self::HouseNumber
      | Self::Street => Step::Address,
    }
  }

  /// Fields shown for a step, in focus order.
  pub fn for_step(step: Step) -> &'static [Field] {
    match step {
      Step::Personal => &[
        Self::FirstName,
        Self::MiddleName,
        Self::LastName,
        Self::Gender,
        Self::DateOfBirth,
        Self::NationalId,
        Self::MaritalStatus,
        Self::Nationality,
        Self::EducationLevel,
        Self::Occupation,
      ],
      Step::Contact => &[Self::Phone, Self::Email],
      Step::Address => &[
        Self::Region,
        Self::Zone,
        Self::Woreda,
        Self::Kebele,
        Self::HouseNumber,
        Self::Street,
      ],
    }
  }

  fn required(step: Step) -> &'static [Field] {
    match step {
      Step::Personal => &[
        Self::FirstName,
        Self::LastName,
        Self::Gender,
        Self::DateOfBirth,
        Self::NationalId,
      ],
      Step::Contact => &[Self::Phone],
      Step::Address => &[Self::Kebele, Self::Woreda, Self::Zone, Self::HouseNumber],
    }
  }
}

// ─── ResidentDraft ───────────────────────────────────────────────────────────

/// Everything the wizard collects, shaped for submission. The photo travels
/// as a multipart file part, not as JSON, hence the serde skip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResidentDraft {
  pub first_name:      String,
  pub middle_name:     String,
  pub last_name:       String,
  pub gender:          String,
  pub date_of_birth:   String,
  pub national_id:     String,
  pub marital_status:  String,
  pub nationality:     String,
  pub education_level: String,
  pub occupation:      String,
  pub phone:           String,
  pub email:           String,
  pub house_number:    String,
  pub street:          String,
  pub region_id:       Option<u64>,
  pub zone_id:         Option<u64>,
  pub woreda_id:       Option<u64>,
  pub kebele_id:       Option<u64>,

  #[serde(skip)]
  pub photo: Option<PathBuf>,
}

// ─── RegistrationForm ────────────────────────────────────────────────────────

/// Multi-step form state: `Personal → Contact → Address`.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
  step:   Step,
  values: BTreeMap<Field, String>,
  errors: BTreeMap<Field, String>,
  photo:  Option<PathBuf>,
}

impl Default for RegistrationForm {
  fn default() -> Self {
    Self::new()
  }
}

impl RegistrationForm {
  pub fn new() -> Self {
    Self {
      step:   Step::Personal,
      values: BTreeMap::new(),
      errors: BTreeMap::new(),
      photo:  None,
    }
  }

  pub fn step(&self) -> Step {
    self.step
  }

  pub fn value(&self, field: Field) -> &str {
    self.values.get(&field).map(String::as_str).unwrap_or("")
  }

  pub fn error(&self, field: Field) -> Option<&str> {
    self.errors.get(&field).map(String::as_str)
  }

  pub fn errors(&self) -> &BTreeMap<Field, String> {
    &self.errors
  }

  pub fn photo(&self) -> Option<&PathBuf> {
    self.photo.as_ref()
  }

  pub fn set_photo(&mut self, path: Option<PathBuf>) {
    self.photo = path;
  }

  /// Set a field value.
  ///
  /// The field's error entry is cleared immediately — not on resubmission.
  /// Changing a location select resets its stale descendants: a zone chosen
  /// under the old region could reference an incompatible parent.
  pub fn set(&mut self, field: Field, value: impl Into<String>) {
    self.values.insert(field, value.into());
    self.errors.remove(&field);

    let descendants: &[Field] = match field {
      Field::Region => &[Field::Zone, Field::Woreda, Field::Kebele],
      Field::Zone => &[Field::Woreda, Field::Kebele],
      Field::Woreda => &[Field::Kebele],
      _ => &[],
    };
    for d in descendants {
      self.values.remove(d);
      self.errors.remove(d);
    }
  }

  /// Validate `step`, inserting an error entry per missing required field.
  /// Returns `true` when the step is clean.
  pub fn validate_step(&mut self, step: Step) -> bool {
    let mut ok = true;
    for field in Field::required(step) {
      if self.value(*field).trim().is_empty() {
        self
          .errors
          .insert(*field, format!("{} is required", field.label()));
        ok = false;
      }
    }
    ok
  }

  /// Move forward one step. Refused (step unchanged, errors populated) while
  /// the active step has missing required fields.
  pub fn advance(&mut self) -> bool {
    if !self.validate_step(self.step) {
      return false;
    }
    if let Some(next) = self.step.next() {
      self.step = next;
    }
    true
  }

  /// Move back one step. Never validates.
  pub fn back(&mut self) {
    if let Some(prev) = self.step.prev() {
      self.step = prev;
    }
  }

  /// Validate every step and assemble the draft for submission.
  pub fn finish(&mut self) -> Option<ResidentDraft> {
    let mut ok = true;
    for step in Step::ORDER {
      ok &= self.validate_step(step);
    }
    if !ok {
      return None;
    }

    let id = |form: &Self, f: Field| form.value(f).trim().parse::<u64>().ok();
    Some(ResidentDraft {
      first_name:      self.value(Field::FirstName).trim().to_string(),
      middle_name:     self.value(Field::MiddleName).trim().to_string(),
      last_name:       self.value(Field::LastName).trim().to_string(),
      gender:          self.value(Field::Gender).trim().to_lowercase(),
      date_of_birth:   self.value(Field::DateOfBirth).trim().to_string(),
      national_id:     self.value(Field::NationalId).trim().to_string(),
      marital_status:  self.value(Field::MaritalStatus).trim().to_lowercase(),
      nationality:     self.value(Field::Nationality).trim().to_string(),
      education_level: self.value(Field::EducationLevel).trim().to_string(),
      occupation:      self.value(Field::Occupation).trim().to_string(),
      phone:           self.value(Field::Phone).trim().to_string(),
      email:           self.value(Field::Email).trim().to_string(),
      house_number:    self.value(Field::HouseNumber).trim().to_string(),
      street:          self.value(Field::Street).trim().to_string(),
      region_id:       id(self, Field::Region),
      zone_id:         id(self, Field::Zone),
      woreda_id:       id(self, Field::Woreda),
      kebele_id:       id(self, Field::Kebele),
      photo:           self.photo.clone(),
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn filled_personal(form: &mut RegistrationForm) {
    form.set(Field::FirstName, "Abdi");
    form.set(Field::LastName, "Tolera");
    form.set(Field::Gender, "male");
    form.set(Field::DateOfBirth, "1990-01-15");
    form.set(Field::NationalId, "ETH-0042-1990");
  }

  // ── Step gating ───────────────────────────────────────────────────────────

  #[test]
  fn advance_refused_while_personal_fields_missing() {
    let mut form = RegistrationForm::new();
    form.set(Field::FirstName, "Abdi");

    assert!(!form.advance());
    assert_eq!(form.step(), Step::Personal, "step must be unchanged");
    assert!(form.error(Field::LastName).is_some());
    assert!(form.error(Field::Gender).is_some());
    assert!(form.error(Field::DateOfBirth).is_some());
    assert!(form.error(Field::NationalId).is_some());
    assert!(form.error(Field::FirstName).is_none());
  }

  #[test]
  fn advance_proceeds_once_required_fields_are_set() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    assert!(form.advance());
    assert_eq!(form.step(), Step::Contact);
  }

  #[test]
  fn whitespace_only_does_not_satisfy_a_required_field() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    form.set(Field::FirstName, "   ");
    assert!(!form.advance());
    assert!(form.error(Field::FirstName).is_some());
  }

  #[test]
  fn error_cleared_the_moment_the_field_changes() {
    let mut form = RegistrationForm::new();
    assert!(!form.advance());
    assert!(form.error(Field::FirstName).is_some());

    form.set(Field::FirstName, "Abdi");
    assert!(form.error(Field::FirstName).is_none(), "cleared on edit, not on resubmit");
    // Others remain until they change.
    assert!(form.error(Field::LastName).is_some());
  }

  #[test]
  fn back_never_validates() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    assert!(form.advance());
    form.set(Field::Phone, "");
    form.back();
    assert_eq!(form.step(), Step::Personal);
    assert!(form.errors().is_empty());
  }

  // ── Cascading selects ─────────────────────────────────────────────────────

  #[test]
  fn changing_region_resets_zone_woreda_kebele() {
    let mut form = RegistrationForm::new();
    form.set(Field::Region, "1");
    form.set(Field::Zone, "10");
    form.set(Field::Woreda, "100");
    form.set(Field::Kebele, "1000");

    form.set(Field::Region, "2");
    assert_eq!(form.value(Field::Zone), "");
    assert_eq!(form.value(Field::Woreda), "");
    assert_eq!(form.value(Field::Kebele), "");
    assert_eq!(form.value(Field::Region), "2");
  }

  #[test]
  fn changing_zone_resets_only_descendants() {
    let mut form = RegistrationForm::new();
    form.set(Field::Region, "1");
    form.set(Field::Zone, "10");
    form.set(Field::Woreda, "100");
    form.set(Field::Kebele, "1000");

    form.set(Field::Zone, "11");
    assert_eq!(form.value(Field::Region), "1");
    assert_eq!(form.value(Field::Zone), "11");
    assert_eq!(form.value(Field::Woreda), "");
    assert_eq!(form.value(Field::Kebele), "");
  }

  // ── Finish ────────────────────────────────────────────────────────────────

  #[test]
  fn finish_collects_all_steps_and_parses_location_ids() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    form.set(Field::Phone, "+251911234567");
    form.set(Field::Region, "1");
    form.set(Field::Zone, "10");
    form.set(Field::Woreda, "100");
    form.set(Field::Kebele, "1000");
    form.set(Field::HouseNumber, "H-114");

    let draft = form.finish().expect("complete form must yield a draft");
    assert_eq!(draft.first_name, "Abdi");
    assert_eq!(draft.kebele_id, Some(1000));
    assert_eq!(draft.region_id, Some(1));
    assert_eq!(draft.gender, "male");
  }

  #[test]
  fn finish_refused_when_any_step_is_incomplete() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    // Contact and Address never filled.
    assert!(form.finish().is_none());
    assert!(form.error(Field::Phone).is_some());
    assert!(form.error(Field::Kebele).is_some());
  }

  #[test]
  fn draft_serialises_without_the_photo() {
    let mut form = RegistrationForm::new();
    filled_personal(&mut form);
    form.set(Field::Phone, "0911");
    form.set(Field::Zone, "10");
    form.set(Field::Woreda, "100");
    form.set(Field::Kebele, "1000");
    form.set(Field::HouseNumber, "H-1");
    form.set_photo(Some(PathBuf::from("/tmp/photo.jpg")));

    let draft = form.finish().unwrap();
    let json = serde_json::to_value(&draft).unwrap();
    assert!(json.get("photo").is_none());
    assert_eq!(json["house_number"], "H-1");
  }
}

//! In-memory query operations over an already-fetched resident collection.
//!
//! The list view fetches once and then searches, filters and sorts locally;
//! nothing here triggers a refetch.

use crate::{
  Error, Result,
  resident::{Gender, MaritalStatus, ResidentRecord},
};

// ─── Query parameters ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFilter {
  #[default]
  All,
  Active,
  Inactive,
}

impl ActiveFilter {
  pub fn cycle(self) -> Self {
    match self {
      Self::All => Self::Active,
      Self::Active => Self::Inactive,
      Self::Inactive => Self::All,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::All => "all",
      Self::Active => "active",
      Self::Inactive => "inactive",
    }
  }

  fn admits(self, is_active: bool) -> bool {
    match self {
      Self::All => true,
      Self::Active => is_active,
      Self::Inactive => !is_active,
    }
  }
}

/// Search and filter parameters; all optional, all intersecting.
#[derive(Debug, Clone, Default)]
pub struct RosterQuery {
  /// Case-insensitive substring over full name and national id.
  pub search:          String,
  pub gender:          Option<Gender>,
  pub marital_status:  Option<MaritalStatus>,
  pub active:          ActiveFilter,
  pub kebele_id:       Option<u64>,
  pub education_level: Option<String>,
  pub occupation:      Option<String>,
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
  #[default]
  Name,
  NationalId,
  DateOfBirth,
  /// Booleans order as 0/1 so inactive residents group together.
  Active,
}

impl SortKey {
  pub fn cycle(self) -> Self {
    match self {
      Self::Name => Self::NationalId,
      Self::NationalId => Self::DateOfBirth,
      Self::DateOfBirth => Self::Active,
      Self::Active => Self::Name,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::NationalId => "national id",
      Self::DateOfBirth => "birth date",
      Self::Active => "status",
    }
  }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Look up a resident by backend id in the fetched collection.
pub fn find_by_id(residents: &[ResidentRecord], id: u64) -> Result<&ResidentRecord> {
  residents
    .iter()
    .find(|r| r.id == Some(id))
    .ok_or(Error::ResidentNotFound(id))
}

/// Apply search and filters, preserving the collection's order.
pub fn filter<'a>(residents: &'a [ResidentRecord], query: &RosterQuery) -> Vec<&'a ResidentRecord> {
  let needle = query.search.trim().to_lowercase();
  residents
    .iter()
    .filter(|r| {
      if !needle.is_empty() {
        let haystack = format!("{} {}", r.full_name(), r.national_id).to_lowercase();
        if !haystack.contains(&needle) {
          return false;
        }
      }
      if let Some(g) = query.gender
        && r.gender != Some(g)
      {
        return false;
      }
      if let Some(m) = query.marital_status
        && r.marital_status != Some(m)
      {
        return false;
      }
      if !query.active.admits(r.is_active) {
        return false;
      }
      if let Some(k) = query.kebele_id
        && r.kebele_id != Some(k)
      {
        return false;
      }
      if let Some(ref e) = query.education_level
        && !r.education_level.eq_ignore_ascii_case(e)
      {
        return false;
      }
      if let Some(ref o) = query.occupation
        && !r.occupation.eq_ignore_ascii_case(o)
      {
        return false;
      }
      true
    })
    .collect()
}

/// Sort a filtered view in place. String keys compare case-insensitively.
pub fn sort(rows: &mut [&ResidentRecord], key: SortKey, descending: bool) {
  rows.sort_by(|a, b| {
    let ord = match key {
      SortKey::Name => a.full_name().to_lowercase().cmp(&b.full_name().to_lowercase()),
      SortKey::NationalId => a
        .national_id
        .to_lowercase()
        .cmp(&b.national_id.to_lowercase()),
      SortKey::DateOfBirth => a.date_of_birth.cmp(&b.date_of_birth),
      SortKey::Active => (a.is_active as u8).cmp(&(b.is_active as u8)),
    };
    if descending { ord.reverse() } else { ord }
  });
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn resident(name: &str, gender: Gender, is_active: bool) -> ResidentRecord {
    let mut r = crate::resident::tests::sample_resident();
    r.first_name = name.to_string();
    r.middle_name = String::new();
    r.last_name = String::new();
    r.gender = Some(gender);
    r.is_active = is_active;
    r
  }

  #[test]
  fn find_by_id_distinguishes_missing_residents() {
    let rows = vec![resident("Abebe", Gender::Male, true)];
    assert_eq!(find_by_id(&rows, 42).unwrap().first_name, "Abebe");
    assert!(matches!(find_by_id(&rows, 999), Err(Error::ResidentNotFound(999))));
  }

  #[test]
  fn search_is_case_insensitive_substring() {
    let rows = vec![
      resident("Abebe", Gender::Male, true),
      resident("Tigist", Gender::Female, false),
    ];
    let query = RosterQuery { search: "TIG".into(), ..Default::default() };
    let hits = filter(&rows, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "Tigist");
  }

  #[test]
  fn search_matches_national_id_too() {
    let mut rows = vec![resident("Abebe", Gender::Male, true)];
    rows[0].national_id = "ETH-7781".into();
    let query = RosterQuery { search: "7781".into(), ..Default::default() };
    assert_eq!(filter(&rows, &query).len(), 1);
  }

  #[test]
  fn search_and_filters_intersect() {
    let rows = vec![
      resident("Abebe", Gender::Male, true),
      resident("Tigist", Gender::Female, false),
    ];
    let query = RosterQuery {
      search: "ti".into(),
      active: ActiveFilter::Inactive,
      ..Default::default()
    };
    let hits = filter(&rows, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "Tigist");

    // The same search with the opposite status filter excludes her.
    let query = RosterQuery {
      search: "ti".into(),
      active: ActiveFilter::Active,
      ..Default::default()
    };
    assert!(filter(&rows, &query).is_empty());
  }

  #[test]
  fn exact_filters_apply() {
    let mut rows = vec![
      resident("Abebe", Gender::Male, true),
      resident("Chaltu", Gender::Female, true),
    ];
    rows[1].occupation = "Teacher".into();

    let query = RosterQuery { gender: Some(Gender::Female), ..Default::default() };
    assert_eq!(filter(&rows, &query).len(), 1);

    let query = RosterQuery { occupation: Some("teacher".into()), ..Default::default() };
    let hits = filter(&rows, &query);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "Chaltu");
  }

  #[test]
  fn sort_by_name_ignores_case() {
    let rows = vec![
      resident("tigist", Gender::Female, true),
      resident("Abebe", Gender::Male, true),
    ];
    let mut view: Vec<&ResidentRecord> = rows.iter().collect();
    sort(&mut view, SortKey::Name, false);
    assert_eq!(view[0].first_name, "Abebe");
    sort(&mut view, SortKey::Name, true);
    assert_eq!(view[0].first_name, "tigist");
  }

  #[test]
  fn sort_by_status_coerces_bool_to_ordinal() {
    let rows = vec![
      resident("Abebe", Gender::Male, true),
      resident("Tigist", Gender::Female, false),
      resident("Chaltu", Gender::Female, true),
    ];
    let mut view: Vec<&ResidentRecord> = rows.iter().collect();
    sort(&mut view, SortKey::Active, false);
    assert!(!view[0].is_active, "inactive (0) sorts first ascending");
    assert!(view[1].is_active && view[2].is_active);
  }
}

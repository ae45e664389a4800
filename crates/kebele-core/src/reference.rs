//! Administrative-location reference data.
//!
//! Fetched once from the backend and filtered client-side: region → zone →
//! woreda → kebele, each child list narrowed by its parent id.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
  pub id:   u64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
  pub id:        u64,
  pub region_id: u64,
  pub name:      String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Woreda {
  pub id:      u64,
  pub zone_id: u64,
  pub name:    String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kebele {
  pub id:        u64,
  pub woreda_id: u64,
  pub name:      String,
}

pub fn zones_in(zones: &[Zone], region_id: u64) -> Vec<&Zone> {
  zones.iter().filter(|z| z.region_id == region_id).collect()
}

pub fn woredas_in(woredas: &[Woreda], zone_id: u64) -> Vec<&Woreda> {
  woredas.iter().filter(|w| w.zone_id == zone_id).collect()
}

pub fn kebeles_in(kebeles: &[Kebele], woreda_id: u64) -> Vec<&Kebele> {
  kebeles.iter().filter(|k| k.woreda_id == woreda_id).collect()
}

/// Bundle of all four lookup lists, fetched together on wizard entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
  pub regions: Vec<Region>,
  pub zones:   Vec<Zone>,
  pub woredas: Vec<Woreda>,
  pub kebeles: Vec<Kebele>,
}

impl ReferenceData {
  pub fn region_name(&self, id: u64) -> Option<&str> {
    self.regions.iter().find(|r| r.id == id).map(|r| r.name.as_str())
  }

  pub fn zone_name(&self, id: u64) -> Option<&str> {
    self.zones.iter().find(|z| z.id == id).map(|z| z.name.as_str())
  }

  pub fn woreda_name(&self, id: u64) -> Option<&str> {
    self.woredas.iter().find(|w| w.id == id).map(|w| w.name.as_str())
  }

  pub fn kebele_name(&self, id: u64) -> Option<&str> {
    self.kebeles.iter().find(|k| k.id == id).map(|k| k.name.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn fixture() -> ReferenceData {
    ReferenceData {
      regions: vec![
        Region { id: 1, name: "Oromia".into() },
        Region { id: 2, name: "Amhara".into() },
      ],
      zones: vec![
        Zone { id: 10, region_id: 1, name: "East Shewa".into() },
        Zone { id: 11, region_id: 1, name: "West Arsi".into() },
        Zone { id: 20, region_id: 2, name: "North Gondar".into() },
      ],
      woredas: vec![
        Woreda { id: 100, zone_id: 10, name: "Adama".into() },
        Woreda { id: 200, zone_id: 20, name: "Debark".into() },
      ],
      kebeles: vec![
        Kebele { id: 1000, woreda_id: 100, name: "Kebele 04".into() },
        Kebele { id: 1001, woreda_id: 100, name: "Kebele 05".into() },
        Kebele { id: 2000, woreda_id: 200, name: "Kebele 01".into() },
      ],
    }
  }

  #[test]
  fn children_are_narrowed_by_parent_id() {
    let data = fixture();
    let zones = zones_in(&data.zones, 1);
    assert_eq!(zones.len(), 2);
    assert!(zones.iter().all(|z| z.region_id == 1));

    assert_eq!(woredas_in(&data.woredas, 20).len(), 1);
    assert_eq!(kebeles_in(&data.kebeles, 100).len(), 2);
    assert!(kebeles_in(&data.kebeles, 999).is_empty());
  }

  #[test]
  fn name_lookups() {
    let data = fixture();
    assert_eq!(data.region_name(2), Some("Amhara"));
    assert_eq!(data.kebele_name(2000), Some("Kebele 01"));
    assert_eq!(data.woreda_name(7), None);
  }
}

//! The synthesis operation: resident + certificate type → downloadable
//! artifact plus its document descriptor.

use chrono::{DateTime, Utc};
use kebele_core::{
  certificate::{CertificateRecord, CertificateType},
  reference::ReferenceData,
  resident::{DocumentStatus, GeneratedDocument, ResidentRecord},
};

use crate::{
  Error, Result,
  layout::{PageMetrics, plan_certificate},
  pdf::PdfEngine,
};

/// One completed synthesis: the descriptor the document list records, and
/// the bytes the caller writes out.
#[derive(Debug, Clone)]
pub struct SynthesizedCertificate {
  pub document: GeneratedDocument,
  pub bytes:    Vec<u8>,
}

/// `Birth Certificate` + resident 42 → `Birth_Certificate_42.pdf`.
pub fn file_name(kind: CertificateType, resident_id: u64) -> String {
  format!("{}_{}.pdf", kind.title().replace(' ', "_"), resident_id)
}

/// Synthesize a certificate for `resident`.
///
/// Fails before any artifact exists: a resident without a backend id cannot
/// be certified, and a backend render error yields no bytes. On success the
/// caller is expected to write `bytes` under `document.file_name` and append
/// `document` to its document list — exactly once per call.
pub fn synthesize(
  engine: &PdfEngine,
  resident: &ResidentRecord,
  kind: CertificateType,
  reference: Option<&ReferenceData>,
  issued_at: DateTime<Utc>,
) -> Result<SynthesizedCertificate> {
  let resident_id = resident.id.ok_or(Error::MissingResidentId)?;

  let record = certificate_record(resident, kind, reference);
  let plan = plan_certificate(&record, &PageMetrics::default(), issued_at);
  let bytes = engine.render(&plan, kind.title())?;

  let file_name = file_name(kind, resident_id);
  tracing::info!(%file_name, pages = plan.page_count, "certificate synthesized");

  Ok(SynthesizedCertificate {
    document: GeneratedDocument {
      title: format!("{} for {}", kind.title(), resident.full_name()),
      category: kind.slug(),
      status: DocumentStatus::Approved,
      file_name,
      issued_at,
    },
    bytes,
  })
}

/// Seed the renderer's field bag from the resident, resolving location ids
/// to names when reference data is available.
pub fn certificate_record(
  resident: &ResidentRecord,
  kind: CertificateType,
  reference: Option<&ReferenceData>,
) -> CertificateRecord {
  let kebele = reference
    .zip(resident.kebele_id)
    .and_then(|(d, id)| d.kebele_name(id))
    .map(str::to_string);
  let woreda = reference
    .zip(resident.woreda_id)
    .and_then(|(d, id)| d.woreda_name(id))
    .map(str::to_string);
  let zone = reference
    .zip(resident.zone_id)
    .and_then(|(d, id)| d.zone_name(id))
    .map(str::to_string);
  let region = reference
    .zip(resident.region_id)
    .and_then(|(d, id)| d.region_name(id))
    .map(str::to_string);

  CertificateRecord::for_resident(resident, kind).with_location(kebele, woreda, zone, region)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;
  use kebele_core::resident::Gender;

  fn resident() -> ResidentRecord {
    ResidentRecord {
      id:              Some(42),
      first_name:      "Abdi".into(),
      middle_name:     String::new(),
      last_name:       "Tolera".into(),
      gender:          Some(Gender::Male),
      date_of_birth:   "1990-01-15".into(),
      national_id:     "ETH-0042-1990".into(),
      marital_status:  None,
      nationality:     "Ethiopian".into(),
      education_level: String::new(),
      occupation:      String::new(),
      phone:           String::new(),
      email:           String::new(),
      house_number:    "H-114".into(),
      street:          String::new(),
      kebele_id:       None,
      woreda_id:       None,
      zone_id:         None,
      region_id:       None,
      photo_path:      None,
      is_active:       true,
      deceased:        false,
    }
  }

  fn issued() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 5, 9, 30, 0).unwrap()
  }

  #[test]
  fn file_name_replaces_spaces_with_underscores() {
    assert_eq!(
      file_name(CertificateType::Birth, 42),
      "Birth_Certificate_42.pdf"
    );
    assert_eq!(
      file_name(CertificateType::Completion, 7),
      "Completion_Certificate_7.pdf"
    );
  }

  #[test]
  fn happy_path_yields_named_pdf_and_approved_descriptor() {
    let engine = PdfEngine::initialize().unwrap();
    let out = synthesize(&engine, &resident(), CertificateType::Birth, None, issued()).unwrap();

    assert_eq!(out.document.file_name, "Birth_Certificate_42.pdf");
    assert_eq!(out.document.status, DocumentStatus::Approved);
    assert_eq!(out.document.category, "birth_certificate");
    assert_eq!(out.document.issued_at, issued());
    assert!(out.document.title.contains("Abdi Tolera"));
    assert!(out.bytes.starts_with(b"%PDF"));
  }

  #[test]
  fn unsaved_resident_fails_before_any_artifact() {
    let engine = PdfEngine::initialize().unwrap();
    let mut unsaved = resident();
    unsaved.id = None;

    let err = synthesize(&engine, &unsaved, CertificateType::Birth, None, issued());
    assert!(matches!(err, Err(Error::MissingResidentId)));
  }

  #[test]
  fn location_ids_resolve_to_names_when_reference_data_is_present() {
    use kebele_core::reference::{Kebele, ReferenceData, Region, Woreda, Zone};

    let mut r = resident();
    r.kebele_id = Some(1000);
    r.woreda_id = Some(100);
    r.zone_id = Some(10);
    r.region_id = Some(1);

    let data = ReferenceData {
      regions: vec![Region { id: 1, name: "Oromia".into() }],
      zones:   vec![Zone { id: 10, region_id: 1, name: "East Shewa".into() }],
      woredas: vec![Woreda { id: 100, zone_id: 10, name: "Adama".into() }],
      kebeles: vec![Kebele { id: 1000, woreda_id: 100, name: "Kebele 05".into() }],
    };

    let record = certificate_record(&r, CertificateType::Birth, Some(&data));
    assert_eq!(record.kebele.as_deref(), Some("Kebele 05"));
    assert_eq!(record.region.as_deref(), Some("Oromia"));

    // Without reference data the ids stay unresolved and render as N/A.
    let record = certificate_record(&r, CertificateType::Birth, None);
    assert!(record.kebele.is_none());
  }
}

//! Async HTTP client for the kebele registry backend.
//!
//! Wraps the JSON/multipart REST API behind typed methods. All responses
//! pass through the [`envelope`] boundary, so callers never see a raw
//! `serde_json::Value`; all uploads pass the [`upload`] checks before any
//! bytes are sent. Auth, when configured, is a bearer token.

pub mod envelope;
pub mod error;
pub mod upload;

pub use error::{Error, Result};

use std::{path::Path, time::Duration};

use kebele_core::{
  certificate::CertificateType,
  reference::{Kebele, ReferenceData, Region, Woreda, Zone},
  registration::ResidentDraft,
  resident::{FamilyMember, GeneratedDocument, IdentityDocument, ResidentRecord, ServiceRequest},
};
use reqwest::{Client, RequestBuilder, multipart};
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
  envelope::{Ack, ErrorBody},
  upload::AttachmentKind,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for the registry API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Bearer token; empty means unauthenticated.
  pub token:    String,
}

/// Async HTTP client for the registry REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/api{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    if self.config.token.is_empty() {
      req
    } else {
      req.bearer_auth(&self.config.token)
    }
  }

  /// Send a request and run the response through the envelope boundary.
  async fn send_enveloped<T: DeserializeOwned>(
    &self,
    req: RequestBuilder,
    what: &str,
  ) -> Result<T> {
    let resp = req.send().await?;
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
      if let Ok(parsed) = serde_json::from_str::<ErrorBody>(&body)
        && let Some(message) = parsed.error
      {
        return Err(Error::Backend(message));
      }
      return Err(Error::Status { what: what.to_string(), status: status.as_u16() });
    }

    envelope::decode(&body, what)
  }

  // ── Residents ─────────────────────────────────────────────────────────────

  /// `GET /api/residents`
  pub async fn list_residents(&self) -> Result<Vec<ResidentRecord>> {
    tracing::debug!("listing residents");
    let p: ResidentsPayload = self
      .send_enveloped(self.auth(self.client.get(self.url("/residents"))), "listing residents")
      .await?;
    Ok(p.residents)
  }

  /// `GET /api/residents/{id}`
  pub async fn get_resident(&self, id: u64) -> Result<ResidentRecord> {
    tracing::debug!(id, "fetching resident");
    let p: ResidentPayload = self
      .send_enveloped(
        self.auth(self.client.get(self.url(&format!("/residents/{id}")))),
        "fetching resident",
      )
      .await?;
    Ok(p.resident)
  }

  /// `POST /api/residents` — JSON when no photo is attached, multipart
  /// otherwise.
  pub async fn create_resident(&self, draft: &ResidentDraft) -> Result<ResidentRecord> {
    tracing::info!(name = %draft.first_name, "creating resident");
    let req = self.auth(self.client.post(self.url("/residents")));
    let req = match &draft.photo {
      Some(_) => req.multipart(self.draft_form(draft).await?),
      None => req.json(draft),
    };
    let p: ResidentPayload = self.send_enveloped(req, "creating resident").await?;
    Ok(p.resident)
  }

  /// `PUT /api/residents/{id}`
  pub async fn update_resident(&self, id: u64, draft: &ResidentDraft) -> Result<ResidentRecord> {
    tracing::info!(id, "updating resident");
    let req = self.auth(self.client.put(self.url(&format!("/residents/{id}"))));
    let req = match &draft.photo {
      Some(_) => req.multipart(self.draft_form(draft).await?),
      None => req.json(draft),
    };
    let p: ResidentPayload = self.send_enveloped(req, "updating resident").await?;
    Ok(p.resident)
  }

  /// `POST /api/residents/{id}/status` — soft activate/deactivate.
  pub async fn set_resident_status(&self, id: u64, is_active: bool) -> Result<()> {
    tracing::info!(id, is_active, "toggling resident status");
    self
      .send_enveloped::<Ack>(
        self
          .auth(self.client.post(self.url(&format!("/residents/{id}/status"))))
          .json(&serde_json::json!({ "is_active": is_active })),
        "toggling resident status",
      )
      .await?;
    Ok(())
  }

  // ── Sub-records ───────────────────────────────────────────────────────────

  /// `GET /api/residents/{id}/family`
  pub async fn family_members(&self, resident_id: u64) -> Result<Vec<FamilyMember>> {
    let p: FamilyListPayload = self
      .send_enveloped(
        self.auth(self.client.get(self.url(&format!("/residents/{resident_id}/family")))),
        "listing family members",
      )
      .await?;
    Ok(p.family_members)
  }

  /// `POST /api/residents/{id}/family`
  pub async fn add_family_member(
    &self,
    resident_id: u64,
    member: &FamilyMember,
  ) -> Result<FamilyMember> {
    let body = serde_json::json!({
      "full_name":     member.full_name,
      "relationship":  member.relationship,
      "date_of_birth": member.date_of_birth,
      "resident_id":   member.resident_id,
    });
    let p: FamilyMemberPayload = self
      .send_enveloped(
        self
          .auth(self.client.post(self.url(&format!("/residents/{resident_id}/family"))))
          .json(&body),
        "adding family member",
      )
      .await?;
    Ok(p.family_member)
  }

  /// `GET /api/residents/{id}/documents`
  pub async fn identity_documents(&self, resident_id: u64) -> Result<Vec<IdentityDocument>> {
    let p: DocumentListPayload = self
      .send_enveloped(
        self.auth(
          self
            .client
            .get(self.url(&format!("/residents/{resident_id}/documents"))),
        ),
        "listing identity documents",
      )
      .await?;
    Ok(p.documents)
  }

  /// `POST /api/residents/{id}/documents`
  pub async fn add_identity_document(
    &self,
    resident_id: u64,
    document: &IdentityDocument,
  ) -> Result<IdentityDocument> {
    let body = serde_json::json!({
      "kind":       document.kind,
      "number":     document.number,
      "issued_on":  document.issued_on,
      "expires_on": document.expires_on,
      "validity":   document.validity,
    });
    let p: DocumentPayload = self
      .send_enveloped(
        self
          .auth(
            self
              .client
              .post(self.url(&format!("/residents/{resident_id}/documents"))),
          )
          .json(&body),
        "adding identity document",
      )
      .await?;
    Ok(p.document)
  }

  /// `GET /api/residents/{id}/services`
  pub async fn service_requests(&self, resident_id: u64) -> Result<Vec<ServiceRequest>> {
    let p: ServiceListPayload = self
      .send_enveloped(
        self.auth(
          self
            .client
            .get(self.url(&format!("/residents/{resident_id}/services"))),
        ),
        "listing service requests",
      )
      .await?;
    Ok(p.services)
  }

  /// `POST /api/residents/{id}/services`
  pub async fn add_service_request(
    &self,
    resident_id: u64,
    request: &ServiceRequest,
  ) -> Result<ServiceRequest> {
    let body = serde_json::json!({
      "service":      request.service,
      "requested_on": request.requested_on,
      "status":       request.status,
    });
    let p: ServicePayload = self
      .send_enveloped(
        self
          .auth(
            self
              .client
              .post(self.url(&format!("/residents/{resident_id}/services"))),
          )
          .json(&body),
        "adding service request",
      )
      .await?;
    Ok(p.service)
  }

  // ── Reference data ────────────────────────────────────────────────────────

  /// Fetch all four lookup lists. One failure fails the bundle; a wizard
  /// with half its selects empty is worse than an error banner.
  pub async fn reference_data(&self) -> Result<ReferenceData> {
    tracing::debug!("fetching reference data");
    let regions: RegionsPayload = self
      .send_enveloped(self.auth(self.client.get(self.url("/regions"))), "listing regions")
      .await?;
    let zones: ZonesPayload = self
      .send_enveloped(self.auth(self.client.get(self.url("/zones"))), "listing zones")
      .await?;
    let woredas: WoredasPayload = self
      .send_enveloped(self.auth(self.client.get(self.url("/woredas"))), "listing woredas")
      .await?;
    let kebeles: KebelesPayload = self
      .send_enveloped(self.auth(self.client.get(self.url("/kebeles"))), "listing kebeles")
      .await?;
    Ok(ReferenceData {
      regions: regions.regions,
      zones:   zones.zones,
      woredas: woredas.woredas,
      kebeles: kebeles.kebeles,
    })
  }

  // ── Certificates ──────────────────────────────────────────────────────────

  /// `POST /api/certificates/generate` — server-side generation; returns
  /// the URL of the rendered document.
  pub async fn generate_certificate(
    &self,
    resident_id: u64,
    kind: CertificateType,
  ) -> Result<String> {
    tracing::info!(resident_id, kind = %kind, "requesting server-side generation");
    let p: GeneratePayload = self
      .send_enveloped(
        self
          .auth(self.client.post(self.url("/certificates/generate")))
          .json(&serde_json::json!({
            "resident_id":      resident_id,
            "certificate_type": kind.slug(),
          })),
        "generating certificate",
      )
      .await?;
    Ok(p.download_url)
  }

  /// Download a generated document. Accepts the absolute URLs the backend
  /// hands out as well as paths relative to the base URL.
  pub async fn fetch_document(&self, url: &str) -> Result<Vec<u8>> {
    let full = if url.starts_with("http://") || url.starts_with("https://") {
      url.to_string()
    } else {
      format!(
        "{}/{}",
        self.config.base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
      )
    };
    tracing::debug!(url = %full, "downloading document");
    let resp = self.auth(self.client.get(&full)).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(Error::Status {
        what:   "downloading document".to_string(),
        status: status.as_u16(),
      });
    }
    Ok(resp.bytes().await?.to_vec())
  }

  /// `GET /api/certificates`
  pub async fn list_certificates(&self) -> Result<Vec<GeneratedDocument>> {
    let p: CertificatesPayload = self
      .send_enveloped(
        self.auth(self.client.get(self.url("/certificates"))),
        "listing certificates",
      )
      .await?;
    Ok(p.certificates)
  }

  // ── Multipart assembly ────────────────────────────────────────────────────

  /// Serialise a draft as multipart form data, attaching the photo after it
  /// passes the client-side checks.
  async fn draft_form(&self, draft: &ResidentDraft) -> Result<multipart::Form> {
    let mut form = multipart::Form::new()
      .text("first_name", draft.first_name.clone())
      .text("middle_name", draft.middle_name.clone())
      .text("last_name", draft.last_name.clone())
      .text("gender", draft.gender.clone())
      .text("date_of_birth", draft.date_of_birth.clone())
      .text("national_id", draft.national_id.clone())
      .text("marital_status", draft.marital_status.clone())
      .text("nationality", draft.nationality.clone())
      .text("education_level", draft.education_level.clone())
      .text("occupation", draft.occupation.clone())
      .text("phone", draft.phone.clone())
      .text("email", draft.email.clone())
      .text("house_number", draft.house_number.clone())
      .text("street", draft.street.clone());

    for (key, value) in [
      ("region_id", draft.region_id),
      ("zone_id", draft.zone_id),
      ("woreda_id", draft.woreda_id),
      ("kebele_id", draft.kebele_id),
    ] {
      if let Some(id) = value {
        form = form.text(key, id.to_string());
      }
    }

    if let Some(photo) = &draft.photo {
      form = form.part("photo", self.photo_part(photo).await?);
    }
    Ok(form)
  }

  async fn photo_part(&self, path: &Path) -> Result<multipart::Part> {
    let io_err = |source: std::io::Error| Error::AttachmentIo {
      path: path.display().to_string(),
      source,
    };
    let meta = tokio::fs::metadata(path).await.map_err(io_err)?;
    upload::check_attachment(AttachmentKind::Photo, path, meta.len())?;

    let bytes = tokio::fs::read(path).await.map_err(io_err)?;
    let file_name = path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "photo".to_string());
    Ok(
      multipart::Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(upload::mime_for(path))?,
    )
  }
}

// ─── Response payloads ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ResidentsPayload {
  residents: Vec<ResidentRecord>,
}

#[derive(Debug, Deserialize)]
struct ResidentPayload {
  resident: ResidentRecord,
}

#[derive(Debug, Deserialize)]
struct FamilyListPayload {
  family_members: Vec<FamilyMember>,
}

#[derive(Debug, Deserialize)]
struct FamilyMemberPayload {
  family_member: FamilyMember,
}

#[derive(Debug, Deserialize)]
struct DocumentListPayload {
  documents: Vec<IdentityDocument>,
}

#[derive(Debug, Deserialize)]
struct DocumentPayload {
  document: IdentityDocument,
}

#[derive(Debug, Deserialize)]
struct ServiceListPayload {
  services: Vec<ServiceRequest>,
}

#[derive(Debug, Deserialize)]
struct ServicePayload {
  service: ServiceRequest,
}

#[derive(Debug, Deserialize)]
struct RegionsPayload {
  regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
struct ZonesPayload {
  zones: Vec<Zone>,
}

#[derive(Debug, Deserialize)]
struct WoredasPayload {
  woredas: Vec<Woreda>,
}

#[derive(Debug, Deserialize)]
struct KebelesPayload {
  kebeles: Vec<Kebele>,
}

#[derive(Debug, Deserialize)]
struct GeneratePayload {
  download_url: String,
}

#[derive(Debug, Deserialize)]
struct CertificatesPayload {
  certificates: Vec<GeneratedDocument>,
}

//! PDF backend: replays a [`DocumentPlan`] into `printpdf`.
//!
//! The drawing capability is modelled as a handle obtained once via
//! [`PdfEngine::initialize`] and passed to the synthesizer. Callers that
//! never obtained a handle cannot attempt a render, so "the renderer wasn't
//! ready yet" is an initialization-time error, not a mid-generation crash.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};

use crate::{
  Error, Result,
  layout::{DocumentPlan, DrawOp},
};

/// Handle to a verified PDF drawing capability.
#[derive(Debug, Clone, Copy)]
pub struct PdfEngine {
  _verified: (),
}

impl PdfEngine {
  /// Verify the backend up front: the built-in fonts must resolve.
  pub fn initialize() -> Result<Self> {
    let (probe, _page, _layer) = PdfDocument::new("probe", Mm(10.0), Mm(10.0), "probe");
    probe
      .add_builtin_font(BuiltinFont::Helvetica)
      .map_err(|e| Error::EngineUnavailable(e.to_string()))?;
    probe
      .add_builtin_font(BuiltinFont::HelveticaBold)
      .map_err(|e| Error::EngineUnavailable(e.to_string()))?;
    tracing::debug!("pdf engine ready");
    Ok(Self { _verified: () })
  }

  /// Serialise a planned document. The plan's top-down y coordinates are
  /// converted to the PDF's bottom-up space here and nowhere else.
  pub fn render(&self, plan: &DocumentPlan, doc_title: &str) -> Result<Vec<u8>> {
    let m = &plan.metrics;
    let backend = |e: printpdf::Error| Error::Backend(e.to_string());

    let (doc, first_page, first_layer) =
      PdfDocument::new(doc_title, Mm(m.page_width as f32), Mm(m.page_height as f32), "Page 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(backend)?;
    let bold = doc
      .add_builtin_font(BuiltinFont::HelveticaBold)
      .map_err(backend)?;

    let mut layers: Vec<PdfLayerReference> =
      vec![doc.get_page(first_page).get_layer(first_layer)];
    for n in 1..plan.page_count {
      let (page, layer) =
        doc.add_page(Mm(m.page_width as f32), Mm(m.page_height as f32), format!("Page {}", n + 1));
      layers.push(doc.get_page(page).get_layer(layer));
    }

    for op in &plan.ops {
      let layer = &layers[op.page()];
      match op {
        DrawOp::Text { x, y, text, size, bold: is_bold, .. } => {
          let font: &IndirectFontRef = if *is_bold { &bold } else { &regular };
          layer.use_text(
            text.clone(),
            *size as f32,
            Mm(*x as f32),
            Mm((m.page_height - *y) as f32),
            font,
          );
        }
        DrawOp::Rule { x1, x2, y, .. } => {
          layer.set_outline_thickness(0.4);
          layer.add_line(Line {
            points:    vec![
              (Point::new(Mm(*x1 as f32), Mm((m.page_height - *y) as f32)), false),
              (Point::new(Mm(*x2 as f32), Mm((m.page_height - *y) as f32)), false),
            ],
            is_closed: false,
          });
        }
        DrawOp::PageBorder { .. } => {
          let inset = m.border_inset;
          layer.set_outline_thickness(1.2);
          layer.add_line(Line {
            points:    vec![
              (Point::new(Mm(inset as f32), Mm(inset as f32)), false),
              (Point::new(Mm((m.page_width - inset) as f32), Mm(inset as f32)), false),
              (
                Point::new(
                  Mm((m.page_width - inset) as f32),
                  Mm((m.page_height - inset) as f32),
                ),
                false,
              ),
              (
                Point::new(Mm(inset as f32), Mm((m.page_height - inset) as f32)),
                false,
              ),
            ],
            is_closed: true,
          });
        }
      }
    }

    tracing::debug!(pages = plan.page_count, ops = plan.ops.len(), "rendering pdf");
    doc.save_to_bytes().map_err(backend)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use crate::layout::{PageMetrics, plan_certificate};
  use chrono::{TimeZone, Utc};
  use kebele_core::certificate::{CertificateRecord, CertificateType};

  #[test]
  fn initialize_succeeds_with_builtin_fonts() {
    assert!(PdfEngine::initialize().is_ok());
  }

  #[test]
  fn render_produces_a_pdf_header() {
    let engine = PdfEngine::initialize().unwrap();
    let record = CertificateRecord {
      certificate_type: Some(CertificateType::Birth),
      recipient_name:   Some("Abdi Tolera".into()),
      ..CertificateRecord::default()
    };
    let plan = plan_certificate(
      &record,
      &PageMetrics::default(),
      Utc.with_ymd_and_hms(2024, 6, 5, 9, 30, 0).unwrap(),
    );
    let bytes = engine.render(&plan, "Birth Certificate").unwrap();
    assert!(bytes.starts_with(b"%PDF"), "missing pdf magic");
    assert!(bytes.len() > 500);
  }

  #[test]
  fn multi_page_plans_render_too() {
    let engine = PdfEngine::initialize().unwrap();
    let record = CertificateRecord {
      certificate_type: Some(CertificateType::Death),
      cause_of_death:   Some("unknown ".repeat(80).trim().to_string()),
      ..CertificateRecord::default()
    };
    let metrics = PageMetrics { page_height: 90.0, ..PageMetrics::default() };
    let plan = plan_certificate(
      &record,
      &metrics,
      Utc.with_ymd_and_hms(2024, 6, 5, 9, 30, 0).unwrap(),
    );
    assert!(plan.page_count > 1);
    let bytes = engine.render(&plan, "Death Certificate").unwrap();
    assert!(bytes.starts_with(b"%PDF"));
  }
}

//! Certificate synthesis: resident record in, paginated PDF out.
//!
//! The pipeline is split so the interesting part stays pure:
//!
//! 1. [`template`] maps a [`kebele_core::certificate::CertificateRecord`] to
//!    a presentational layout (four skins over two body kinds);
//! 2. [`layout`] plans the printable document — an explicit cursor threaded
//!    through wrap and pagination, emitting draw operations;
//! 3. [`pdf`] replays the operations into the PDF backend behind an
//!    explicitly-initialised capability handle.
//!
//! Only step 3 touches `printpdf`; the laws the document must obey (wrap,
//! pagination, determinism) are testable without it.

pub mod error;
pub mod layout;
pub mod measure;
pub mod pdf;
pub mod synthesize;
pub mod template;

pub use error::{Error, Result};
pub use pdf::PdfEngine;
pub use synthesize::{SynthesizedCertificate, file_name, synthesize};

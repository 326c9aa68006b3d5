//! Render pipeline: layout, then materialization.

use billsmith_billing::Invoice;
use billsmith_clients::Client;
use chrono::{DateTime, Utc};

use crate::error::DocumentResult;
use crate::instruction::DrawInstruction;
use crate::layout::layout_invoice;
use crate::page::PageMetrics;
use crate::pdf::PdfMaterializer;
use crate::profile::BrandProfile;

/// Rendered output document: the bytes of a one-page PDF, or whatever the
/// configured materializer emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Converts positioned draw instructions into a binary artifact.
///
/// Layout never touches this boundary, which keeps the algorithm testable
/// against a recording fake instead of a real document backend.
pub trait Materializer {
    fn materialize(
        &self,
        page: &PageMetrics,
        instructions: &[DrawInstruction],
    ) -> DocumentResult<Artifact>;
}

/// Invoice document renderer.
///
/// Stateless between calls: every render builds its own cursor and
/// instruction list, so one renderer may serve concurrent callers freely.
#[derive(Debug, Clone)]
pub struct Renderer<M = PdfMaterializer> {
    profile: BrandProfile,
    page: PageMetrics,
    materializer: M,
}

impl Renderer<PdfMaterializer> {
    /// Renderer with the default letterhead and PDF output.
    pub fn new() -> Self {
        Self::with_profile(BrandProfile::default())
    }

    /// Renderer with a custom letterhead and PDF output.
    pub fn with_profile(profile: BrandProfile) -> Self {
        Self {
            profile,
            page: PageMetrics::default(),
            materializer: PdfMaterializer::new(),
        }
    }
}

impl Default for Renderer<PdfMaterializer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Materializer> Renderer<M> {
    /// Renderer with a caller-supplied materializer: fakes in tests,
    /// alternative backends otherwise.
    pub fn with_materializer(profile: BrandProfile, materializer: M) -> Self {
        Self {
            profile,
            page: PageMetrics::default(),
            materializer,
        }
    }

    /// Render one invoice/client pair into a document artifact.
    pub fn render(&self, invoice: &Invoice, client: &Client) -> DocumentResult<Artifact> {
        self.render_at(invoice, client, Utc::now())
    }

    /// Render with a pinned generation timestamp, for callers that need
    /// reproducible output. Only the footer reads the clock.
    pub fn render_at(
        &self,
        invoice: &Invoice,
        client: &Client,
        generated_at: DateTime<Utc>,
    ) -> DocumentResult<Artifact> {
        let instructions = layout_invoice(invoice, client, &self.profile, &self.page, generated_at)?;
        let artifact = self.materializer.materialize(&self.page, &instructions)?;
        tracing::info!(
            invoice = %invoice.number,
            instructions = instructions.len(),
            bytes = artifact.len(),
            "invoice document rendered"
        );
        Ok(artifact)
    }
}

/// Render with the default letterhead and PDF materializer.
pub fn render(invoice: &Invoice, client: &Client) -> DocumentResult<Artifact> {
    Renderer::new().render(invoice, client)
}

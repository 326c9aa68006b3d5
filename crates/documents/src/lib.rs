//! Invoice document rendering.
//!
//! Takes a read-only invoice/client pair and deterministically lays it out
//! into a one-page PDF: fixed header and closing blocks, a line-items table
//! and notes section threaded on a running vertical cursor, and a floating
//! payment block. Layout produces positioned draw instructions; a separate
//! materialization step turns them into bytes. Rendering is pure; the only
//! IO in this crate lives in [`deliver()`](deliver::deliver).

pub mod deliver;
pub mod error;
pub mod format;
pub mod instruction;
pub mod layout;
pub mod page;
pub mod pdf;
pub mod profile;
pub mod render;
pub mod text;

pub use deliver::deliver;
pub use error::{DocumentError, DocumentResult};
pub use instruction::{Color, DrawInstruction, TextAlign};
pub use layout::layout_invoice;
pub use page::PageMetrics;
pub use pdf::PdfMaterializer;
pub use profile::BrandProfile;
pub use render::{Artifact, Materializer, Renderer, render};

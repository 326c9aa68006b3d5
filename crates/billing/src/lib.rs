//! Billing domain records.
//!
//! This crate contains the invoice record as supplied by the external billing
//! store: line items, dates, status, grand total, optional notes. The records
//! are read-only inputs to document rendering and carry no business rules
//! beyond presence helpers (no IO, no HTTP, no storage).

pub mod invoice;

pub use invoice::{Invoice, InvoiceId, InvoiceStatus, LineItem};

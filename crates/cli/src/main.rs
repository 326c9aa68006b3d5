//! Invoice render tool: JSON records in, a one-page PDF on disk out.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use billsmith_billing::Invoice;
use billsmith_clients::Client;
use billsmith_documents::{BrandProfile, Renderer, deliver};

/// Render an invoice record to a one-page PDF document.
#[derive(Debug, Parser)]
#[command(name = "billsmith", version, about)]
struct Args {
    /// Invoice record JSON, as exported by the billing store.
    #[arg(long)]
    invoice: PathBuf,

    /// Client record JSON, as exported by the client store.
    #[arg(long)]
    client: PathBuf,

    /// Destination file for the rendered PDF.
    #[arg(long, default_value = "invoice.pdf")]
    out: PathBuf,

    /// Brand profile JSON overriding the built-in letterhead.
    #[arg(long)]
    profile: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    billsmith_observability::init();

    let args = Args::parse();

    let invoice: Invoice = read_json(&args.invoice).context("reading invoice record")?;
    let client: Client = read_json(&args.client).context("reading client record")?;
    let profile: BrandProfile = match &args.profile {
        Some(path) => read_json(path).context("reading brand profile")?,
        None => BrandProfile::default(),
    };

    let artifact = Renderer::with_profile(profile).render(&invoice, &client)?;
    deliver(&artifact, &args.out)?;

    tracing::info!(
        invoice = %invoice.number,
        out = %args.out.display(),
        bytes = artifact.len(),
        "invoice rendered"
    );
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

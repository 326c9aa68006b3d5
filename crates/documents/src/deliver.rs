//! Artifact delivery to the host filesystem.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{DocumentError, DocumentResult};
use crate::render::Artifact;

/// Hand `artifact` to the host filesystem under `path`.
///
/// The bytes are staged through a temporary file in the destination
/// directory and moved into place only once fully written, so the target
/// never holds a partial document. The staging file's drop guard removes it
/// on every failure path; a failed delivery leaves nothing behind.
pub fn deliver(artifact: &Artifact, path: impl AsRef<Path>) -> DocumentResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(artifact.as_bytes())?;
    staged
        .persist(path)
        .map_err(|e| DocumentError::DeliveryFailure(e.error))?;

    tracing::info!(
        path = %path.display(),
        bytes = artifact.len(),
        "invoice document delivered"
    );
    Ok(())
}

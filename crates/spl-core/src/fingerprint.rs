//! Content fingerprint of a document's derived outputs.

use serde::Serialize;
use sha2::{Digest, Sha256};

use spl_hierarchy::DocumentHierarchies;
use spl_render::DocumentRenderContext;

#[derive(Serialize)]
struct Fingerprinted<'a> {
    hierarchies: &'a DocumentHierarchies,
    render: &'a DocumentRenderContext,
}

/// Hex SHA-256 of the serialized hierarchies and rendering context.
///
/// Equal inputs give equal fingerprints, so two runs can be compared without
/// diffing the structures themselves.
pub fn fingerprint(
    hierarchies: &DocumentHierarchies,
    render: &DocumentRenderContext,
) -> Result<String, serde_json::Error> {
    let bytes = serde_json::to_vec(&Fingerprinted {
        hierarchies,
        render,
    })?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

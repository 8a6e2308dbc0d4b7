//! Stable identifier construction.
//!
//! Entity ids must be identical across repeated runs over the same input so
//! that output diffs and relation ids stay reproducible. The id embeds a
//! short content hash of (type, canonical name) rather than a random suffix.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Build a deterministic entity id from its type and canonical name.
///
/// Shape: `{Type}-{slug}-{hash8}` where `hash8` is the first 8 hex chars of
/// sha256("{Type}:{name}").
pub fn entity_id(kind: &str, name: &str) -> String {
    format!("{}-{}-{}", kind, slug(name), short_hash(kind, name))
}

/// Build an id for an entity with no stable name. The suffix is opaque and
/// random; callers must derive the dedup key from (type, canonical name)
/// independently of it.
pub fn opaque_entity_id(kind: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", kind, &suffix[..6])
}

/// Build a relation id from its type and endpoint ids. Stable for identical
/// inputs; relation dedup keys on this id directly.
pub fn relation_id(kind: &str, subject_id: &str, object_id: Option<&str>) -> String {
    match object_id {
        Some(object_id) => format!("{}-{}-{}", kind, subject_id, object_id),
        None => format!("{}-{}", kind, subject_id),
    }
}

fn slug(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn short_hash(kind: &str, name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(kind.as_bytes());
    hasher.update(b":");
    hasher.update(name.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..8].to_string()
}

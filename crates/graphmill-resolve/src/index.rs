//! Read-only lookup structures over a finalized entity list.
//!
//! Built wholesale after deduplication; relation resolution must not start
//! before the full index exists because it performs cross-document lookups
//! by canonical name. No mutation: rebuild if the entity set changes.

use std::collections::HashMap;

use graphmill_core::EntityRecord;

pub struct EntityIndex<'a> {
    by_type: HashMap<&'a str, Vec<&'a EntityRecord>>,
    by_name: HashMap<&'a str, &'a EntityRecord>,
}

impl<'a> EntityIndex<'a> {
    /// Build the projection. The name map is last-write-wins, which is
    /// acceptable only because dedup has already collapsed (type, name)
    /// conflicts.
    pub fn build(entities: &'a [EntityRecord]) -> Self {
        let mut by_type: HashMap<&str, Vec<&EntityRecord>> = HashMap::new();
        let mut by_name: HashMap<&str, &EntityRecord> = HashMap::new();
        for entity in entities {
            by_type.entry(entity.kind.as_str()).or_default().push(entity);
            if let Some(name) = entity.attr_str("name") {
                by_name.insert(name, entity);
            }
        }
        Self { by_type, by_name }
    }

    /// First entity of the given type, in deduplicated insertion order.
    pub fn first_of_type(&self, kind: &str) -> Option<&'a EntityRecord> {
        self.of_type(kind).first().copied()
    }

    /// All entities of the given type, in deduplicated insertion order.
    pub fn of_type(&self, kind: &str) -> &[&'a EntityRecord] {
        self.by_type.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Entity of the given type whose canonical name matches exactly.
    pub fn find_by_name(&self, kind: &str, name: &str) -> Option<&'a EntityRecord> {
        self.of_type(kind)
            .iter()
            .find(|entity| entity.attr_str("name") == Some(name))
            .copied()
    }

    /// Entity of any type by canonical name (identity-style lookups).
    pub fn by_canonical_name(&self, name: &str) -> Option<&'a EntityRecord> {
        self.by_name.get(name).copied()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.by_type
            .values()
            .flatten()
            .any(|entity| entity.id == id)
    }

    pub fn len(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

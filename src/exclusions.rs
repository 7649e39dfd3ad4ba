//! Discovery exclusion sets.

use std::any::TypeId;
use std::collections::HashSet;

/// A mutable pair of (type-identity set, namespace set) used to filter discovery candidates
/// during registration.
///
/// A candidate is excluded iff its `TypeId` is in `types`, or its namespace (Rust module
/// path) is in `namespaces`.
#[derive(Debug, Default, Clone)]
pub struct Exclusions {
  types: HashSet<TypeId>,
  namespaces: HashSet<String>,
}

impl Exclusions {
  /// An empty exclusion set: nothing is excluded.
  pub fn new() -> Self {
    Self::default()
  }

  /// Exclude a specific resource type by its `TypeId`.
  pub fn exclude_type(&mut self, type_id: TypeId) {
    self.types.insert(type_id);
  }

  /// Exclude every resource whose namespace equals `namespace`.
  pub fn exclude_namespace(&mut self, namespace: impl Into<String>) {
    self.namespaces.insert(namespace.into());
  }

  /// True iff `type_id` or `namespace` is excluded.
  pub fn is_excluded(&self, type_id: TypeId, namespace: &str) -> bool {
    self.types.contains(&type_id) || self.namespaces.contains(namespace)
  }

  /// Snapshot this set into a read-only view that rejects further mutation.
  pub fn freeze(&self) -> FrozenExclusions {
    FrozenExclusions { types: self.types.clone(), namespaces: self.namespaces.clone() }
  }
}

/// A read-only snapshot of an `Exclusions` set, taken at `build()` time.
#[derive(Debug, Clone)]
pub struct FrozenExclusions {
  types: HashSet<TypeId>,
  namespaces: HashSet<String>,
}

impl FrozenExclusions {
  /// True iff `type_id` or `namespace` is excluded.
  pub fn is_excluded(&self, type_id: TypeId, namespace: &str) -> bool {
    self.types.contains(&type_id) || self.namespaces.contains(namespace)
  }
}

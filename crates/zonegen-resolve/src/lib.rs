//! Scope resolver (component C).
//!
//! Given a (possibly qualified) type name and a starting entity, walk
//! nested scopes then enclosing scopes to find the defining entity.

use zonegen_core::{EntityId, Model, text::split_namespaces};

/// Resolves `name` to the entity that defines it, searching outward from
/// `starting`.
///
/// A leading `::` forces a root-relative search (only the model root's
/// scope is tried). Otherwise, the search starts at `starting` itself and
/// walks outward through each enclosing owner, attempting a full
/// segment-by-segment descent at each level; the first complete match wins.
/// Inner scopes shadow outer ones because `starting` is tried before any
/// owner. Within one scope, the first matching child in declaration order
/// wins (see [`Model::find_class`]).
pub fn resolve(model: &Model, name: &str, starting: EntityId) -> Option<EntityId> {
    let segments = split_namespaces(name);
    let (mut scope, segments): (EntityId, &[&str]) = match segments.first() {
        Some(&"") => (model.root(), &segments[1..]),
        _ => (starting, &segments[..]),
    };

    if segments.is_empty() {
        return None;
    }

    loop {
        if let Some(found) = descend(model, scope, segments) {
            return Some(found);
        }
        scope = model.get(scope).owner?;
    }
}

/// Attempts a full segment-by-segment descent from `scope`; aborts the
/// whole descent (returning `None`) the moment one segment is unresolved.
fn descend(model: &Model, scope: EntityId, segments: &[&str]) -> Option<EntityId> {
    let mut current = scope;
    for segment in segments {
        current = model.find_class(current, segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonegen_model::ModelBuilder;

    #[test]
    fn resolves_sibling_in_same_scope() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let ns = b.namespace(root, "app");
        let foo = b.interface(ns, "Foo");
        let bar = b.interface(ns, "Bar");
        let model = b.build();

        assert_eq!(resolve(&model, "Bar", foo), Some(bar));
    }

    #[test]
    fn resolves_outward_through_enclosing_scopes() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let ns = b.namespace(root, "app");
        let top_level = b.interface(ns, "Shared");
        let inner_ns = b.namespace(ns, "inner");
        let start = b.interface(inner_ns, "Local");
        let model = b.build();

        assert_eq!(resolve(&model, "Shared", start), Some(top_level));
    }

    #[test]
    fn inner_scope_shadows_outer() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let outer_target = b.interface(root, "Target");
        let ns = b.namespace(root, "app");
        let inner_target = b.interface(ns, "Target");
        let start = b.interface(ns, "Start");
        let model = b.build();

        let found = resolve(&model, "Target", start).unwrap();
        assert_eq!(found, inner_target);
        assert_ne!(found, outer_target);
    }

    #[test]
    fn leading_double_colon_forces_root_relative_search() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let top = b.interface(root, "Top");
        let ns = b.namespace(root, "app");
        let _shadow = b.interface(ns, "Top");
        let start = b.interface(ns, "Start");
        let model = b.build();

        assert_eq!(resolve(&model, "::Top", start), Some(top));
    }

    #[test]
    fn qualified_name_descends_into_namespace() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let ns = b.namespace(root, "app");
        let foo = b.interface(ns, "Foo");
        let start = b.interface(root, "Elsewhere");
        let model = b.build();

        assert_eq!(resolve(&model, "app::Foo", start), Some(foo));
    }

    #[test]
    fn unresolved_name_returns_none() {
        let mut b = ModelBuilder::new();
        let root = b.root();
        let start = b.interface(root, "Start");
        let model = b.build();

        assert_eq!(resolve(&model, "Nonexistent", start), None);
    }
}

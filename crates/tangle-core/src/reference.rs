//! Cycle breaking and alias preservation via referential identity

use crate::error::Error;
use crate::plugin::Plugin;
use tangle_graph::{assign, resolve, GraphValue, NodePath};

/// Key of the reserved back-reference marker
const REF_KEY: &str = "$ref";

/// Collapses repeat sightings of one instance into `$ref` markers
///
/// Holds the per-call ordered list of `(path, instance)` pairs. Instances
/// are compared by referential identity, never structural equality — two
/// equal-but-distinct records must not be merged. The first sighting wins,
/// so every emitted marker points to a path visited earlier in breadth-first
/// order; that is also what terminates traversal of cyclic graphs.
#[derive(Default)]
pub struct ReferencePlugin {
    seen: Vec<(NodePath, GraphValue)>,
}

impl ReferencePlugin {
    /// Create a plugin with an empty sighting list
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Plugin for ReferencePlugin {
    fn map(
        &mut self,
        input: &GraphValue,
        output: &GraphValue,
        path: &NodePath,
    ) -> Result<bool, Error> {
        let instance = resolve(input, path)?;
        if !instance.is_composite() {
            return Ok(false);
        }

        if let Some((first, _)) = self.seen.iter().find(|(_, seen)| seen.ptr_eq(&instance)) {
            tracing::trace!(at = %path, first_seen = %first, "collapsing repeat sighting");
            let marker = GraphValue::map_of([(REF_KEY, first.to_string())]);
            assign(output, path, marker)?;
            return Ok(true);
        }

        self.seen.push((path.clone(), instance));
        Ok(false)
    }

    fn unmap(&mut self, doc: &GraphValue, path: &NodePath) -> Result<bool, Error> {
        let node = resolve(doc, path)?;
        let GraphValue::Map(map) = &node else {
            return Ok(false);
        };

        let target = {
            let map = map.borrow();
            if map.len() != 1 {
                return Ok(false);
            }
            match map.get(REF_KEY) {
                Some(GraphValue::String(stored)) => stored.clone(),
                _ => return Ok(false),
            }
        };

        let referent = resolve(doc, &NodePath::from(target.as_str())).map_err(|source| {
            Error::MalformedReference {
                path: target.clone(),
                source,
            }
        })?;
        assign(doc, path, referent)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tangle_graph::ROOT_KEY;

    fn wrap(graph: GraphValue) -> GraphValue {
        GraphValue::map_of([(ROOT_KEY, graph)])
    }

    #[test]
    fn first_sighting_records_and_descends() {
        let input = wrap(GraphValue::map_of([("x", 1i64)]));
        let output = GraphValue::map();
        let mut plugin = ReferencePlugin::new();

        let handled = plugin
            .map(&input, &output, &NodePath::from("#"))
            .unwrap();
        assert!(!handled);
    }

    #[test]
    fn second_sighting_writes_a_marker() {
        let shared = GraphValue::map_of([("x", 1i64)]);
        let input = wrap(GraphValue::map_of([
            ("a", shared.clone()),
            ("b", shared),
        ]));
        let output = GraphValue::map_of([(ROOT_KEY, GraphValue::map())]);
        let mut plugin = ReferencePlugin::new();

        plugin.map(&input, &output, &NodePath::root()).unwrap();
        plugin.map(&input, &output, &NodePath::from("#")).unwrap();
        assert!(!plugin.map(&input, &output, &NodePath::from("#/a")).unwrap());
        assert!(plugin.map(&input, &output, &NodePath::from("#/b")).unwrap());

        let marker = resolve(&output, &NodePath::from("#/b")).unwrap();
        assert_eq!(marker, GraphValue::map_of([("$ref", "#/a")]));
    }

    #[test]
    fn equal_but_distinct_records_are_not_collapsed() {
        let input = wrap(GraphValue::map_of([
            ("a", GraphValue::map_of([("x", 1i64)])),
            ("b", GraphValue::map_of([("x", 1i64)])),
        ]));
        let output = GraphValue::map_of([(ROOT_KEY, GraphValue::map())]);
        let mut plugin = ReferencePlugin::new();

        plugin.map(&input, &output, &NodePath::from("#/a")).unwrap();
        assert!(!plugin.map(&input, &output, &NodePath::from("#/b")).unwrap());
    }

    #[test]
    fn leaves_are_not_tracked() {
        let input = wrap(GraphValue::map_of([("a", "text"), ("b", "text")]));
        let output = GraphValue::map_of([(ROOT_KEY, GraphValue::map())]);
        let mut plugin = ReferencePlugin::new();

        assert!(!plugin.map(&input, &output, &NodePath::from("#/a")).unwrap());
        assert!(!plugin.map(&input, &output, &NodePath::from("#/b")).unwrap());
    }

    #[test]
    fn unmap_restores_the_shared_handle() {
        let doc = wrap(GraphValue::map_of([
            ("a", GraphValue::map_of([("x", 1i64)])),
            ("b", GraphValue::map_of([("$ref", "#/a")])),
        ]));
        let mut plugin = ReferencePlugin::new();

        assert!(plugin.unmap(&doc, &NodePath::from("#/b")).unwrap());

        let a = resolve(&doc, &NodePath::from("#/a")).unwrap();
        let b = resolve(&doc, &NodePath::from("#/b")).unwrap();
        assert!(a.ptr_eq(&b));
    }

    #[test]
    fn unmap_ignores_wider_maps_and_non_string_refs() {
        let doc = wrap(GraphValue::map_of([
            ("wide", GraphValue::map_of([("$ref", "#"), ("extra", "x")])),
            ("odd", GraphValue::map_of([("$ref", 5i64)])),
        ]));
        let mut plugin = ReferencePlugin::new();

        assert!(!plugin.unmap(&doc, &NodePath::from("#/wide")).unwrap());
        assert!(!plugin.unmap(&doc, &NodePath::from("#/odd")).unwrap());
    }

    #[test]
    fn unmap_unresolvable_target_is_malformed() {
        let doc = wrap(GraphValue::map_of([(
            "b",
            GraphValue::map_of([("$ref", "#/missing")]),
        )]));
        let mut plugin = ReferencePlugin::new();

        let err = plugin.unmap(&doc, &NodePath::from("#/b")).unwrap_err();
        assert!(matches!(err, Error::MalformedReference { path, .. } if path == "#/missing"));
    }
}

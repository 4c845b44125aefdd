//! Field paths addressing values inside a descriptor.

use serde::{Serialize, Serializer};
use std::fmt;

/// One step of a [`FieldPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A named field, rendered as `.name`
    Field(String),
    /// A position in a list, rendered as `[i]`
    Index(usize),
    /// An entry of a key/value map, rendered as `[key]`
    Key(String),
}

/// Immutable location of a value inside a descriptor
///
/// Paths are extended with [`child`](FieldPath::child), [`index`](FieldPath::index)
/// and [`key`](FieldPath::key), each of which returns a new path and leaves the
/// receiver untouched, so one parent path can be shared by every sibling check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// The empty path
    pub fn root() -> Self {
        Self::default()
    }

    /// Shorthand for `FieldPath::root().child(name)`
    pub fn new(name: impl Into<String>) -> Self {
        Self::root().child(name)
    }

    /// Path to the field `name` below this one
    pub fn child(&self, name: impl Into<String>) -> Self {
        self.extended(Segment::Field(name.into()))
    }

    /// Path to element `i` of the list at this path
    pub fn index(&self, i: usize) -> Self {
        self.extended(Segment::Index(i))
    }

    /// Path to entry `key` of the map at this path
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.extended(Segment::Key(key.into()))
    }

    fn extended(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Render as `spec.drivers[0].name`; the root renders as `<root>`
    pub fn render(&self) -> String {
        if self.is_root() {
            return "<root>".to_string();
        }
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => {
                    if !out.is_empty() {
                        out.push('.');
                    }
                    out.push_str(name);
                }
                Segment::Index(i) => {
                    out.push('[');
                    out.push_str(&i.to_string());
                    out.push(']');
                }
                Segment::Key(key) => {
                    out.push('[');
                    out.push_str(key);
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_renders_placeholder() {
        assert!(FieldPath::root().is_root());
        assert_eq!(FieldPath::root().render(), "<root>");
    }

    #[test]
    fn test_nested_render() {
        let path = FieldPath::new("spec")
            .child("drivers")
            .index(2)
            .child("topologyKeys")
            .index(0);
        assert_eq!(path.render(), "spec.drivers[2].topologyKeys[0]");
    }

    #[test]
    fn test_map_key_render() {
        let path = FieldPath::new("metadata").child("labels").key("app");
        assert_eq!(path.to_string(), "metadata.labels[app]");
    }

    #[test]
    fn test_child_does_not_mutate_parent() {
        let parent = FieldPath::new("spec");
        let a = parent.child("attacher");
        let b = parent.child("nodeName");
        assert_eq!(parent.render(), "spec");
        assert_eq!(a.render(), "spec.attacher");
        assert_eq!(b.render(), "spec.nodeName");
    }

    #[test]
    fn test_equal_paths_compare_equal() {
        assert_eq!(
            FieldPath::new("spec").child("source"),
            FieldPath::root().child("spec").child("source")
        );
        assert_ne!(FieldPath::new("a").index(0), FieldPath::new("a").key("0"));
    }
}

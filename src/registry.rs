//! Named shape storage

use std::collections::HashMap;

use crate::shapes::{Shape, ShapeKind};
use crate::types::DisplayPoint;

/// Owns every shape created in a session, keyed by name.
///
/// The registry does not enforce uniqueness itself; callers check
/// [`Registry::contains`] before [`Registry::add`]. Lookups hand out shared
/// references only.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    shapes: HashMap<String, ShapeKind>,
    /// Names in insertion order
    order: Vec<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.shapes.contains_key(name)
    }

    /// Store `shape` under `name`. The name must not be in use yet.
    pub fn add(&mut self, name: impl Into<String>, shape: ShapeKind) {
        let name = name.into();
        if self.shapes.insert(name.clone(), shape).is_none() {
            self.order.push(name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&ShapeKind> {
        self.shapes.get(name)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Shapes in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ShapeKind)> {
        self.order
            .iter()
            .filter_map(|name| self.shapes.get_key_value(name.as_str()))
            .map(|(name, shape)| (name.as_str(), shape))
    }

    /// One `name: Kind centered at (x,y)` line per shape, in insertion order.
    pub fn describe(&self) -> Vec<String> {
        self.iter()
            .map(|(name, shape)| {
                format!(
                    "{name}: {} centered at {}",
                    shape.kind(),
                    DisplayPoint(shape.center())
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tolerances;
    use crate::shapes::{LineShape, RectangleShape};
    use crate::types::pt;

    fn line(name: &str) -> ShapeKind {
        LineShape::new(name, pt(0.0, 0.0), pt(1.0, 0.0)).into()
    }

    #[test]
    fn add_and_get() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.add("a", line("a"));
        assert!(registry.contains("a"));
        assert!(!registry.contains("b"));
        assert_eq!(registry.get("a").map(|s| s.name()), Some("a"));
        assert!(registry.get("b").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn repeated_get_is_stable() {
        let mut registry = Registry::new();
        registry.add("a", line("a"));
        let first = registry.get("a").unwrap() as *const ShapeKind;
        let second = registry.get("a").unwrap() as *const ShapeKind;
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn iter_follows_insertion_order() {
        let mut registry = Registry::new();
        for name in ["z", "a", "m"] {
            registry.add(name, line(name));
        }
        let names: Vec<_> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }

    #[test]
    fn describe_lists_shapes_in_order() {
        let mut registry = Registry::new();
        registry.add("z", line("z"));
        let rect = RectangleShape::from_corners(
            "box",
            [pt(0.0, 0.0), pt(4.0, 0.0), pt(4.0, 2.0), pt(0.0, 2.0)],
            &Tolerances::default(),
        )
        .unwrap();
        registry.add("box", rect.into());
        insta::assert_snapshot!(registry.describe().join("\n"), @r"
        z: Line centered at (0.5,0)
        box: Rectangle centered at (2,1)
        ");
    }
}

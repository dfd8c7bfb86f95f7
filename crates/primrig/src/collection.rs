//! Ordered, append-only list of a vehicle's parts.

use crate::{
    parts::PartRole,
    shape::{Rgb, Shape},
};

/// A shape together with the label and role it was attached under.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub label: String,
    pub role: PartRole,
    pub shape: Shape,
}

/// Owned parts in draw order.
///
/// Parts can be appended but never removed, so an index stays valid for the
/// vehicle's lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapeCollection {
    parts: Vec<Part>,
}

impl ShapeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unlabeled shape. Returns its index.
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        let label = format!("part{}", self.parts.len());
        self.add_part(label, PartRole::Other, shape)
    }

    /// Append a shape under `label` and `role`. Returns its index.
    pub fn add_part(&mut self, label: impl Into<String>, role: PartRole, shape: Shape) -> usize {
        self.parts.push(Part {
            label: label.into(),
            role,
            shape,
        });
        self.parts.len() - 1
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.parts.get(index).map(|part| &part.shape)
    }

    /// Find a part by label.
    pub fn find(&self, label: &str) -> Option<&Part> {
        self.parts.iter().find(|part| part.label == label)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Shapes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Shape> {
        self.parts.iter().map(|part| &part.shape)
    }

    /// Mutable shapes in insertion order.
    ///
    /// Only rotation and color can change through this; capabilities are
    /// fixed by construction.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Shape> {
        self.parts.iter_mut().map(|part| &mut part.shape)
    }

    /// Shapes that track spin.
    pub fn spinning(&self) -> impl Iterator<Item = &Shape> {
        self.iter().filter(|shape| shape.can_spin())
    }

    /// Shapes that track steering.
    pub fn steering(&self) -> impl Iterator<Item = &Shape> {
        self.iter().filter(|shape| shape.can_steer())
    }

    /// Recolor every part with the given role. Returns how many matched.
    pub fn paint_role(&mut self, role: PartRole, color: Rgb) -> usize {
        let mut painted = 0;
        for part in self.parts.iter_mut().filter(|part| part.role == role) {
            part.shape.set_color(color.r, color.g, color.b);
            painted += 1;
        }
        painted
    }

    /// Recolor the part with `label`. Returns whether it exists.
    pub fn paint_part(&mut self, label: &str, color: Rgb) -> bool {
        match self.parts.iter_mut().find(|part| part.label == label) {
            Some(part) => {
                part.shape.set_color(color.r, color.g, color.b);
                true
            }
            None => false,
        }
    }
}

impl<'a> IntoIterator for &'a ShapeCollection {
    type Item = &'a Part;
    type IntoIter = std::slice::Iter<'a, Part>;

    fn into_iter(self) -> Self::IntoIter {
        self.parts.iter()
    }
}

//! Transform-stack rendering interface.
//!
//! Vehicles and shapes draw through [`Canvas`], an immediate-mode interface
//! in the style of a fixed-function matrix stack. [`TransformScope`] pairs
//! every push with a pop, even if drawing unwinds.
//!
//! # Implementations
//!
//! - [`MatrixStack`]: resolves transforms with `glam` and records draw calls

use std::ops::{Deref, DerefMut};

use glam::{DMat4, DVec3};

use crate::shape::{Rgb, Solid};

/// A stack of modeling transforms.
///
/// Transforms compose onto the current matrix (post-multiplied), so the
/// last one applied is the first one a vertex sees.
pub trait TransformStack {
    /// Save the current transform.
    fn push(&mut self);

    /// Restore the most recently saved transform.
    fn pop(&mut self);

    fn translate(&mut self, offset: DVec3);

    /// Rotate by `angle_degs` about `axis` (need not be normalized).
    fn rotate(&mut self, angle_degs: f64, axis: DVec3);

    fn scale(&mut self, factors: DVec3);
}

/// A transform stack that can also draw solids.
pub trait Canvas: TransformStack {
    /// Draw a solid in the current frame.
    fn draw_solid(&mut self, solid: &Solid, color: Rgb);
}

/// Pushes on creation and pops on drop.
///
/// Derefs to the wrapped stack so transforms and draws go through it.
pub struct TransformScope<'a, T: TransformStack + ?Sized> {
    stack: &'a mut T,
}

impl<'a, T: TransformStack + ?Sized> TransformScope<'a, T> {
    pub fn new(stack: &'a mut T) -> Self {
        stack.push();
        Self { stack }
    }
}

impl<T: TransformStack + ?Sized> Deref for TransformScope<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.stack
    }
}

impl<T: TransformStack + ?Sized> DerefMut for TransformScope<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.stack
    }
}

impl<T: TransformStack + ?Sized> Drop for TransformScope<'_, T> {
    fn drop(&mut self) {
        self.stack.pop();
    }
}

/// A solid drawn with a fully resolved world transform.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawCall {
    pub solid: Solid,
    pub color: Rgb,
    pub transform: DMat4,
}

/// Matrix stack that records every draw call.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: DMat4,
    saved: Vec<DMat4>,
    calls: Vec<DrawCall>,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    pub fn new() -> Self {
        Self {
            current: DMat4::IDENTITY,
            saved: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// The transform new draws would use.
    pub fn current(&self) -> DMat4 {
        self.current
    }

    /// Number of unmatched pushes.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the stack ready for the next frame.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }
}

impl TransformStack for MatrixStack {
    fn push(&mut self) {
        self.saved.push(self.current);
    }

    fn pop(&mut self) {
        if let Some(matrix) = self.saved.pop() {
            self.current = matrix;
        } else {
            tracing::warn!("transform stack underflow; pop ignored");
        }
    }

    fn translate(&mut self, offset: DVec3) {
        self.current *= DMat4::from_translation(offset);
    }

    fn rotate(&mut self, angle_degs: f64, axis: DVec3) {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return;
        }
        self.current *= DMat4::from_axis_angle(axis, angle_degs.to_radians());
    }

    fn scale(&mut self, factors: DVec3) {
        self.current *= DMat4::from_scale(factors);
    }
}

impl Canvas for MatrixStack {
    fn draw_solid(&mut self, solid: &Solid, color: Rgb) {
        self.calls.push(DrawCall {
            solid: *solid,
            color,
            transform: self.current,
        });
    }
}

//! Line-segment outlines of primitive solids.
//!
//! Every solid is a 2D profile in the xy plane extruded along z, centred on
//! z = 0. Edges are in the solid's local frame; callers apply the draw
//! call's transform.

use glam::{DVec2, DVec3};
use primrig::Solid;

/// Sides used to approximate a cylinder.
pub const CYLINDER_SEGMENTS: usize = 16;

/// A line segment.
pub type Edge = (DVec3, DVec3);

/// Outline of `solid`.
///
/// Cylinders get one extra spoke on their front face so spin is visible.
pub fn edges(solid: &Solid) -> Vec<Edge> {
    match *solid {
        Solid::Cylinder { radius, depth } => {
            let ring: Vec<DVec2> = (0..CYLINDER_SEGMENTS)
                .map(|i| {
                    let angle = std::f64::consts::TAU * i as f64 / CYLINDER_SEGMENTS as f64;
                    DVec2::from_angle(angle) * radius
                })
                .collect();
            let mut edges = extrude(&ring, depth);
            let front = depth / 2.0;
            edges.push((DVec3::new(0.0, 0.0, front), ring[0].extend(front)));
            edges
        }
        Solid::RectPrism {
            x_len,
            y_len,
            z_len,
        } => {
            let half = x_len / 2.0;
            extrude(
                &[
                    DVec2::new(-half, 0.0),
                    DVec2::new(half, 0.0),
                    DVec2::new(half, y_len),
                    DVec2::new(-half, y_len),
                ],
                z_len,
            )
        }
        Solid::TriPrism { a, b, angle, depth } => {
            let left = -a / 2.0;
            let apex = DVec2::new(left, 0.0) + DVec2::from_angle(angle.to_radians()) * b;
            extrude(&[DVec2::new(left, 0.0), DVec2::new(a / 2.0, 0.0), apex], depth)
        }
        Solid::TrapPrism {
            a,
            b,
            height,
            offset,
            depth,
        } => {
            let left = -a / 2.0;
            extrude(
                &[
                    DVec2::new(left, 0.0),
                    DVec2::new(a / 2.0, 0.0),
                    DVec2::new(left + offset + b, height),
                    DVec2::new(left + offset, height),
                ],
                depth,
            )
        }
    }
}

/// Front face, back face and the connecting edges of a closed profile.
fn extrude(profile: &[DVec2], depth: f64) -> Vec<Edge> {
    let front = depth / 2.0;
    let back = -front;
    let mut edges = Vec::with_capacity(profile.len() * 3);
    for (i, point) in profile.iter().enumerate() {
        let next = profile[(i + 1) % profile.len()];
        edges.push((point.extend(front), next.extend(front)));
        edges.push((point.extend(back), next.extend(back)));
        edges.push((point.extend(front), point.extend(back)));
    }
    edges
}

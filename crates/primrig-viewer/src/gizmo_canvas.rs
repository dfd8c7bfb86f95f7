//! Renders recorded draw calls as gizmo wireframes.

use bevy::prelude::*;
use primrig::{DrawCall, Rgb};
use primrig_viewer::wireframe;

fn to_color(color: Rgb) -> Color {
    Color::srgb(color.r as f32, color.g as f32, color.b as f32)
}

/// Draw every call's outline in world space.
pub fn draw_calls(gizmos: &mut Gizmos, calls: &[DrawCall]) {
    for call in calls {
        let color = to_color(call.color);
        for (a, b) in wireframe::edges(&call.solid) {
            gizmos.line(
                call.transform.transform_point3(a).as_vec3(),
                call.transform.transform_point3(b).as_vec3(),
                color,
            );
        }
    }
}

/// Draw a square ground grid centred on `center`, snapped to the grid.
pub fn draw_ground_grid(gizmos: &mut Gizmos, center: Vec3, half_extent: f32, spacing: f32) {
    let color = Color::srgb(0.25, 0.25, 0.25);
    let snap = |v: f32| (v / spacing).round() * spacing;
    let (cx, cz) = (snap(center.x), snap(center.z));
    let lines = (half_extent / spacing) as i32;
    for i in -lines..=lines {
        let offset = i as f32 * spacing;
        gizmos.line(
            Vec3::new(cx + offset, 0.0, cz - half_extent),
            Vec3::new(cx + offset, 0.0, cz + half_extent),
            color,
        );
        gizmos.line(
            Vec3::new(cx - half_extent, 0.0, cz + offset),
            Vec3::new(cx + half_extent, 0.0, cz + offset),
            color,
        );
    }
}

//! Screen-space primitives for arena entities

use glam::Vec2;

use super::frame::{DrawCommand, TextSize};
use crate::camera::Camera;
use crate::sim::{AbsorbedRecord, Cell, Player, Rgb};

/// Background grid color
pub const GRID_COLOR: Rgb = [230, 240, 240];
/// Grid cell size in world units
pub const GRID_SPACING: usize = 25;
/// Grid line width in pixels
pub const GRID_LINE_WIDTH: f32 = 3.0;
/// Name label color
pub const FONT_COLOR: Rgb = [50, 50, 50];
/// Outline thickness around a player body (world units)
pub const OUTLINE_WIDTH: f32 = 3.0;
/// Outline thickness around an absorbed record (pixels)
pub const ABSORBED_OUTLINE_WIDTH: f32 = 2.0;
/// Absorbed records smaller than this radius (pixels) get no label
pub const ABSORBED_LABEL_MIN_RADIUS: f32 = 10.0;

/// Horizontal and vertical grid lines covering the arena
pub fn grid_lines(camera: &Camera, arena_size: f32, out: &mut Vec<DrawCommand>) {
    let far = camera.scale(arena_size + 1.0);
    let origin = camera.offset;

    for i in (0..=arena_size as usize).step_by(GRID_SPACING) {
        let t = camera.scale(i as f32);
        out.push(DrawCommand::Line {
            from: Vec2::new(origin.x, origin.y + t),
            to: Vec2::new(origin.x + far, origin.y + t),
            width: GRID_LINE_WIDTH,
            color: GRID_COLOR,
        });
        out.push(DrawCommand::Line {
            from: Vec2::new(origin.x + t, origin.y),
            to: Vec2::new(origin.x + t, origin.y + far),
            width: GRID_LINE_WIDTH,
            color: GRID_COLOR,
        });
    }
}

/// A food cell is a plain circle of radius `mass`
pub fn cell_shape(cell: &Cell, camera: &Camera) -> DrawCommand {
    DrawCommand::Circle {
        center: camera.world_to_screen(cell.pos),
        radius: camera.scale(cell.mass),
        color: cell.color,
    }
}

/// Outline, body, nested absorbed players, then the name on top
pub fn player_shapes(player: &Player, camera: &Camera, out: &mut Vec<DrawCommand>) {
    let center = camera.world_to_screen(player.pos);
    let radius = camera.scale(player.mass / 2.0);

    out.push(DrawCommand::Circle {
        center,
        radius: camera.scale(player.mass / 2.0 + OUTLINE_WIDTH),
        color: player.outline_color,
    });
    out.push(DrawCommand::Circle {
        center,
        radius,
        color: player.color,
    });

    for record in &player.absorbed {
        absorbed_shapes(record, player.mass, center, radius, camera, out);
    }

    out.push(DrawCommand::Text {
        text: player.name.clone(),
        pos: center,
        size: TextSize::Normal,
        color: FONT_COLOR,
    });
}

/// Screen radius of an absorbed record inside an owner of `owner_mass`
pub fn absorbed_radius(record: &AbsorbedRecord, owner_mass: f32, camera: &Camera) -> f32 {
    camera.scale((record.mass / 3.0).min(owner_mass / 4.0))
}

/// Screen position of an absorbed record inside the owner's body
pub fn absorbed_center(record: &AbsorbedRecord, owner_center: Vec2, owner_radius: f32, inner_radius: f32) -> Vec2 {
    let reach = record.distance_factor * (owner_radius - inner_radius);
    owner_center + Vec2::new(record.angle.cos(), record.angle.sin()) * reach
}

fn absorbed_shapes(
    record: &AbsorbedRecord,
    owner_mass: f32,
    owner_center: Vec2,
    owner_radius: f32,
    camera: &Camera,
    out: &mut Vec<DrawCommand>,
) {
    let inner_radius = absorbed_radius(record, owner_mass, camera);
    let center = absorbed_center(record, owner_center, owner_radius, inner_radius);

    out.push(DrawCommand::Circle {
        center,
        radius: inner_radius + ABSORBED_OUTLINE_WIDTH,
        color: record.outline_color,
    });
    out.push(DrawCommand::Circle {
        center,
        radius: inner_radius,
        color: record.color,
    });

    if inner_radius > ABSORBED_LABEL_MIN_RADIUS {
        out.push(DrawCommand::Text {
            text: record.name.clone(),
            pos: center,
            size: TextSize::Small,
            color: FONT_COLOR,
        });
    }
}

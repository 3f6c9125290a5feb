//! Point of view over the arena
//!
//! World positions map to the viewport through `p * zoom + offset`. The
//! camera zooms out as the tracked player grows and keeps that player at
//! the viewport center.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{INITIAL_ZOOM, MIN_ZOOM, ZOOM_MASS_SCALE};
use crate::sim::Player;

/// What `Camera::centre` should center on
#[derive(Debug, Clone, Copy)]
pub enum CameraTarget<'a> {
    /// Use the point directly as the offset (zoom is not applied)
    Offset(Vec2),
    /// Put the player's position at the viewport center
    Player(&'a Player),
}

impl From<Vec2> for CameraTarget<'_> {
    fn from(offset: Vec2) -> Self {
        CameraTarget::Offset(offset)
    }
}

impl<'a> From<&'a Player> for CameraTarget<'a> {
    fn from(player: &'a Player) -> Self {
        CameraTarget::Player(player)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Screen-space translation applied after zoom
    pub offset: Vec2,
    pub zoom: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: INITIAL_ZOOM,
            viewport,
        }
    }

    /// Zoom factor for a tracked mass. Always above `MIN_ZOOM`.
    #[inline]
    pub fn zoom_for_mass(mass: f32) -> f32 {
        ZOOM_MASS_SCALE / mass + MIN_ZOOM
    }

    #[inline]
    pub fn viewport_center(&self) -> Vec2 {
        self.viewport / 2.0
    }

    /// Center the view. Players are centered with the current zoom taken
    /// into account; a raw offset is applied as-is.
    pub fn centre<'a>(&mut self, target: impl Into<CameraTarget<'a>>) {
        match target.into() {
            CameraTarget::Offset(offset) => self.offset = offset,
            CameraTarget::Player(player) => {
                self.offset = self.viewport_center() - player.pos * self.zoom;
            }
        }
    }

    /// Re-zoom for the tracked player's mass and center on it
    pub fn update(&mut self, tracked: &Player) {
        self.zoom = Self::zoom_for_mass(tracked.mass);
        self.centre(tracked);
    }

    #[inline]
    pub fn world_to_screen(&self, pos: Vec2) -> Vec2 {
        pos * self.zoom + self.offset
    }

    #[inline]
    pub fn screen_to_world(&self, pos: Vec2) -> Vec2 {
        (pos - self.offset) / self.zoom
    }

    /// Convert a world-space length to pixels
    #[inline]
    pub fn scale(&self, len: f32) -> f32 {
        len * self.zoom
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::new(crate::consts::SCREEN_WIDTH, crate::consts::SCREEN_HEIGHT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PlayerKind, state::PLAYER_COLORS};
    use proptest::prelude::*;

    fn player_at(pos: Vec2, mass: f32) -> Player {
        Player::new(1, "P", mass, pos, PLAYER_COLORS[0], PlayerKind::Controlled)
    }

    #[test]
    fn test_initial_camera() {
        let cam = Camera::default();
        assert_eq!(cam.zoom, 0.5);
        assert_eq!(cam.offset, Vec2::ZERO);
        assert_eq!(cam.viewport_center(), Vec2::new(400.0, 250.0));
    }

    #[test]
    fn test_update_centers_tracked_player() {
        let mut cam = Camera::default();
        let p = player_at(Vec2::new(1234.0, 321.0), 80.0);
        cam.update(&p);

        assert!((cam.zoom - 1.55).abs() < 1e-5);
        let screen = cam.world_to_screen(p.pos);
        assert!((screen - cam.viewport_center()).length() < 1e-3);
    }

    #[test]
    fn test_centre_raw_offset_ignores_zoom() {
        let mut cam = Camera::default();
        cam.zoom = 2.0;
        cam.centre(Vec2::new(10.0, -20.0));
        assert_eq!(cam.offset, Vec2::new(10.0, -20.0));
        assert_eq!(cam.zoom, 2.0);
    }

    #[test]
    fn test_screen_to_world_inverts() {
        let mut cam = Camera::default();
        cam.update(&player_at(Vec2::new(500.0, 700.0), 150.0));
        let world = Vec2::new(37.5, 1999.0);
        let back = cam.screen_to_world(cam.world_to_screen(world));
        assert!((back - world).length() < 1e-2);
        assert!((cam.scale(10.0) - 10.0 * cam.zoom).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn zoom_decreases_with_mass(mass in 1.0f32..10_000.0, extra in 1.0f32..1_000.0) {
            let small = Camera::zoom_for_mass(mass);
            let big = Camera::zoom_for_mass(mass + extra);
            prop_assert!(big < small);
            prop_assert!(big > MIN_ZOOM);
        }
    }
}

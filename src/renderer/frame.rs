//! Frame description handed to the presenter
//!
//! Commands are listed in painter order: whatever comes later is drawn on
//! top. Coordinates are screen pixels.

use glam::Vec2;

use super::shapes;
use crate::leaderboard::Leaderboard;
use crate::sim::{GameState, Rgb};

/// Background fill
pub const BACKGROUND_COLOR: Rgb = [242, 251, 255];
/// Translucent HUD panel fill (RGBA)
pub const PANEL_COLOR: [u8; 4] = [50, 50, 50, 80];
/// HUD text color
pub const HUD_TEXT_COLOR: Rgb = [255, 255, 255];
/// Highlight for the tracked player's leaderboard row
pub const HUD_HIGHLIGHT_COLOR: Rgb = [210, 0, 0];

/// Leaderboard panel size
const LEADERBOARD_PANEL: Vec2 = Vec2::new(155.0, 278.0);
/// Score panel size
const SCORE_PANEL: Vec2 = Vec2::new(95.0, 25.0);
/// Vertical spacing of leaderboard rows
const ROW_HEIGHT: f32 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    Small,
    Normal,
    Large,
}

/// A single screen-space draw primitive
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgb,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgb,
    },
    /// Text centered on `pos`
    Text {
        text: String,
        pos: Vec2,
        size: TextSize,
        color: Rgb,
    },
    /// Text with its top-left corner at `pos`
    Label {
        text: String,
        pos: Vec2,
        size: TextSize,
        color: Rgb,
    },
    Panel {
        min: Vec2,
        size: Vec2,
        color: [u8; 4],
    },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Frame {
    pub background: Rgb,
    pub commands: Vec<DrawCommand>,
}

/// Build the draw list: grid, food, players in roster order, HUD
pub fn build_frame(state: &GameState) -> Frame {
    let camera = &state.camera;
    let mut commands = Vec::with_capacity(state.cells().len() + state.players().len() * 4 + 200);

    shapes::grid_lines(camera, state.arena_size, &mut commands);

    commands.extend(state.cells().iter().map(|cell| shapes::cell_shape(cell, camera)));

    for player in state.players() {
        shapes::player_shapes(player, camera, &mut commands);
    }

    hud(state, &mut commands);

    Frame {
        background: BACKGROUND_COLOR,
        commands,
    }
}

/// Score panel bottom-left, leaderboard top-right
fn hud(state: &GameState, out: &mut Vec<DrawCommand>) {
    let viewport = state.camera.viewport;

    if let Some(player) = state.tracked_player() {
        out.push(DrawCommand::Panel {
            min: Vec2::new(8.0, viewport.y - 30.0),
            size: SCORE_PANEL,
            color: PANEL_COLOR,
        });
        out.push(DrawCommand::Label {
            text: format!("Score: {}", player.score()),
            pos: Vec2::new(10.0, viewport.y - 30.0),
            size: TextSize::Normal,
            color: HUD_TEXT_COLOR,
        });
    }

    let left = viewport.x - 157.0;
    out.push(DrawCommand::Panel {
        min: Vec2::new(viewport.x - 160.0, 15.0),
        size: LEADERBOARD_PANEL,
        color: PANEL_COLOR,
    });
    out.push(DrawCommand::Label {
        text: "Leaderboard".to_string(),
        pos: Vec2::new(left, 20.0),
        size: TextSize::Large,
        color: HUD_TEXT_COLOR,
    });

    let board = Leaderboard::from_state(state);
    for (i, entry) in board.entries.iter().enumerate() {
        out.push(DrawCommand::Label {
            text: format!("{}. {}", i + 1, entry.name),
            pos: Vec2::new(left, 20.0 + ROW_HEIGHT * (i + 1) as f32),
            size: TextSize::Normal,
            color: if entry.tracked {
                HUD_HIGHLIGHT_COLOR
            } else {
                HUD_TEXT_COLOR
            },
        });
    }
}

impl Frame {
    /// Number of circles in the frame
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// All text drawn in the frame, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } | DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{FOOD_COLORS, PLAYER_COLORS};
    use crate::sim::PlayerKind;

    fn small_arena() -> GameState {
        let mut state = GameState::empty(1, Vec2::new(800.0, 500.0));
        state.arena_size = 100.0;
        let id = state.add_player("You", 80.0, Vec2::new(50.0, 50.0), PLAYER_COLORS[0], PlayerKind::Controlled);
        state.tracked = Some(id);
        state.add_player("Bot 1", 20.0, Vec2::new(10.0, 10.0), PLAYER_COLORS[1], PlayerKind::bot());
        state.add_cell(Vec2::new(90.0, 90.0), FOOD_COLORS[0]);
        state.add_cell(Vec2::new(80.0, 20.0), FOOD_COLORS[1]);
        let tracked = state.tracked_player().cloned().unwrap();
        state.camera.update(&tracked);
        state
    }

    #[test]
    fn test_frame_painter_order() {
        let state = small_arena();
        let frame = build_frame(&state);

        // Grid first
        assert!(matches!(frame.commands[0], DrawCommand::Line { .. }));
        // 2 food + 2 players with outline and body
        assert_eq!(frame.circle_count(), 2 + 2 * 2);

        let texts: Vec<&str> = frame.texts().collect();
        assert_eq!(
            texts,
            vec!["You", "Bot 1", "Score: 160", "Leaderboard", "1. You", "2. Bot 1"]
        );
    }

    #[test]
    fn test_tracked_player_drawn_at_center() {
        let state = small_arena();
        let frame = build_frame(&state);
        let center = state.camera.viewport_center();

        let name_pos = frame.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, pos, .. } if text == "You" => Some(*pos),
            _ => None,
        });
        let name_pos = name_pos.expect("name label");
        assert!((name_pos - center).length() < 1e-3);
    }

    #[test]
    fn test_no_score_after_defeat() {
        let mut state = small_arena();
        state.tracked = None;
        let frame = build_frame(&state);
        assert!(frame.texts().all(|t| !t.starts_with("Score")));
    }
}

//! Board rendering and click handling

use crate::board::CENTER_RING;
use crate::{Board, Pos, Stone, BOARD_SIZE};
use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use super::theme::*;

/// What the board should highlight this frame
pub struct BoardOverlay {
    /// Color of the stone the player to move would place
    pub turn: Stone,
    pub last_move: Option<Pos>,
    pub hint: Option<Pos>,
    /// Whether clicks place stones right now
    pub accepting_input: bool,
}

/// Draws the board. Row "19" is at the top.
pub struct BoardView {
    cell_size: f32,
    board_rect: Rect,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
        }
    }
}

impl BoardView {
    /// Render the board and return the legal cell clicked, if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay) -> Option<Pos> {
        let available_size = ui.available_size();
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (BOARD_SIZE as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());
        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);
        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, board);

        if let Some(pos) = overlay.last_move {
            painter.circle_filled(self.board_to_screen(pos), LAST_MOVE_MARKER_RADIUS, LAST_MOVE_MARKER);
        }
        if let Some(pos) = overlay.hint {
            self.draw_hint(&painter, pos, overlay.turn);
        }

        if !overlay.accepting_input {
            return None;
        }

        // Only cells the board would accept get a preview
        let hovered = response
            .hover_pos()
            .and_then(|pointer| self.screen_to_board(pointer))
            .filter(|&pos| board.in_bounds(pos) && board.is_empty(pos) && !board.is_game_over())?;

        if let Some(color) = hover_preview(overlay.turn) {
            painter.circle_filled(self.board_to_screen(hovered), self.stone_radius(), color);
        }
        response.clicked().then_some(hovered)
    }

    fn stone_radius(&self) -> f32 {
        self.cell_size * STONE_RADIUS_RATIO
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let far = BOARD_MARGIN + (BOARD_SIZE as f32 - 1.0) * self.cell_size;

        for i in 0..BOARD_SIZE {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;
            let min = self.board_rect.min;
            painter.line_segment([min + Vec2::new(offset, BOARD_MARGIN), min + Vec2::new(offset, far)], stroke);
            painter.line_segment([min + Vec2::new(BOARD_MARGIN, offset), min + Vec2::new(far, offset)], stroke);
        }
    }

    /// The center and the ring the second white stone may not enter
    fn draw_star_points(&self, painter: &Painter) {
        for pos in std::iter::once(Pos::CENTER).chain(CENTER_RING) {
            painter.circle_filled(self.board_to_screen(pos), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// A-S along the top and bottom, 1-19 along the sides
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);

        for col in 0..BOARD_SIZE {
            let letter = (b'A' + col as u8) as char;
            let x = self.board_rect.min.x + BOARD_MARGIN + col as f32 * self.cell_size;
            for y in [self.board_rect.min.y + 14.0, self.board_rect.max.y - 14.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, letter, font.clone(), GRID_LINE);
            }
        }

        for row in 0..BOARD_SIZE as u8 {
            let y = self.board_to_screen(Pos::new(row, 0)).y;
            let label = (row + 1).to_string();
            for x in [self.board_rect.min.x + 14.0, self.board_rect.max.x - 14.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
            }
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board) {
        for pos in Pos::all() {
            match board.get(pos) {
                Stone::Empty => {}
                stone => self.draw_stone(painter, pos, stone),
            }
        }
    }

    fn draw_stone(&self, painter: &Painter, pos: Pos, stone: Stone) {
        let center = self.board_to_screen(pos);
        let radius = self.stone_radius();
        let shadow = center + Vec2::new(2.0, 2.0);

        match stone {
            Stone::Black => {
                painter.circle_filled(shadow, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 60));
                painter.circle_filled(center, radius, BLACK_STONE);
                painter.circle_filled(center - Vec2::splat(radius * 0.3), radius * 0.2, BLACK_STONE_HIGHLIGHT);
            }
            Stone::White => {
                painter.circle_filled(shadow, radius, Color32::from_rgba_unmultiplied(0, 0, 0, 40));
                painter.circle_filled(center, radius, WHITE_STONE);
                painter.circle_stroke(center, radius * 0.85, Stroke::new(radius * 0.1, WHITE_STONE_SHADOW));
            }
            Stone::Empty => {}
        }
    }

    fn draw_hint(&self, painter: &Painter, pos: Pos, turn: Stone) {
        let center = self.board_to_screen(pos);
        if let Some(color) = hover_preview(turn) {
            painter.circle_filled(center, self.stone_radius(), color);
        }
        painter.circle_stroke(center, self.stone_radius() + 2.0, Stroke::new(2.0, HINT_MARKER));
        painter.text(center, egui::Align2::CENTER_CENTER, "?", egui::FontId::proportional(14.0), HINT_MARKER);
    }

    /// Nearest intersection to a screen point
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = ((relative.x - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;
        let y = ((relative.y - BOARD_MARGIN) / self.cell_size + 0.5).floor() as i32;

        let last = BOARD_SIZE as i32 - 1;
        Pos::checked(last - y, x)
    }

    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let flipped = (BOARD_SIZE - 1) as f32 - pos.row as f32;
        Pos2::new(
            self.board_rect.min.x + BOARD_MARGIN + pos.col as f32 * self.cell_size,
            self.board_rect.min.y + BOARD_MARGIN + flipped * self.cell_size,
        )
    }
}

//! A live brick positioned on the field.

use crate::brick::{Brick, BrickKind, ColorKey, DIMENSION};
use crate::field::Field;

/// Brick instance with box origin (x, y). Once frozen, every move is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    brick: Brick,
    x: i32,
    y: i32,
    frozen: bool,
}

impl Figure {
    /// New figure at the top-centre of a field with `columns` columns.
    pub fn spawn(kind: BrickKind, columns: usize) -> Self {
        let x = (columns as i32 - i32::from(DIMENSION)) / 2;
        Self::at(kind, x, 0)
    }

    pub fn at(kind: BrickKind, x: i32, y: i32) -> Self {
        Self {
            brick: Brick::new(kind),
            x,
            y,
            frozen: false,
        }
    }

    pub fn brick(&self) -> &Brick {
        &self.brick
    }

    pub fn kind(&self) -> BrickKind {
        self.brick.kind()
    }

    pub fn name(&self) -> &'static str {
        self.brick.name()
    }

    pub fn color_key(&self) -> ColorKey {
        self.brick.color_key()
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Absolute grid coordinates of the 4 occupied cells.
    pub fn cells(&self) -> [(i32, i32); 4] {
        self.brick
            .plain_coordinates()
            .map(|(dx, dy)| (self.x + i32::from(dx), self.y + i32::from(dy)))
    }

    /// Applies the offset unless the result collides; returns whether it moved.
    pub fn try_move(&mut self, field: &Field, dx: i32, dy: i32) -> bool {
        if self.frozen {
            return false;
        }
        self.x += dx;
        self.y += dy;
        if field.collides(self.cells()) {
            self.x -= dx;
            self.y -= dy;
            return false;
        }
        true
    }

    /// One row down; a blocked step freezes the figure into the field.
    pub fn step_down(&mut self, field: &mut Field) {
        if !self.try_move(field, 0, 1) {
            self.freeze(field);
        }
    }

    pub fn move_left(&mut self, field: &Field) {
        self.try_move(field, -1, 0);
    }

    pub fn move_right(&mut self, field: &Field) {
        self.try_move(field, 1, 0);
    }

    /// Drops until blocked, then freezes.
    pub fn fall_to_bottom(&mut self, field: &mut Field) {
        while self.try_move(field, 0, 1) {}
        self.freeze(field);
    }

    /// Rotates in place; a rotation that collides is undone. Returns whether it rotated.
    pub fn rotate(&mut self, field: &Field) -> bool {
        if self.frozen || !self.brick.rotate_forward() {
            return false;
        }
        if field.collides(self.cells()) {
            self.brick.rotate_backward();
            return false;
        }
        true
    }

    fn freeze(&mut self, field: &mut Field) {
        if self.frozen {
            return;
        }
        field.freeze(self.cells(), self.color_key());
        self.frozen = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Cell;
    use proptest::prelude::*;

    #[test]
    fn test_spawn_is_centred() {
        assert_eq!(Figure::spawn(BrickKind::T, 16).position(), (6, 0));
        assert_eq!(Figure::spawn(BrickKind::T, 4).position(), (0, 0));
        assert_eq!(Figure::spawn(BrickKind::T, 7).position(), (1, 0));
    }

    #[test]
    fn test_square_falls_to_floor_and_freezes() {
        let mut field = Field::new(4, 4);
        let mut figure = Figure::spawn(BrickKind::O, field.columns());
        let (_, start_y) = figure.position();
        figure.fall_to_bottom(&mut field);

        assert!(figure.is_frozen());
        assert_eq!(figure.position().1, start_y + 1);
        let mut occupied: Vec<(usize, usize)> = field
            .iter()
            .filter(|(_, _, c)| c.is_occupied())
            .map(|(x, y, _)| (x, y))
            .collect();
        occupied.sort_unstable();
        assert_eq!(occupied, vec![(1, 2), (1, 3), (2, 2), (2, 3)]);
        assert_eq!(field.get(1, 2), Some(Cell::Occupied(BrickKind::O.color_key())));
    }

    #[test]
    fn test_step_down_freezes_only_when_blocked() {
        let mut field = Field::new(4, 4);
        let mut figure = Figure::spawn(BrickKind::O, 4);
        figure.step_down(&mut field);
        assert!(!figure.is_frozen());
        figure.step_down(&mut field);
        assert!(figure.is_frozen());
    }

    #[test]
    fn test_frozen_figure_rejects_moves() {
        let mut field = Field::new(6, 6);
        let mut figure = Figure::spawn(BrickKind::T, 6);
        figure.fall_to_bottom(&mut field);
        let before = field.clone();
        let position = figure.position();

        assert!(!figure.try_move(&field, 0, -1));
        assert!(!figure.rotate(&field));
        figure.move_left(&field);
        figure.step_down(&mut field);
        figure.fall_to_bottom(&mut field);
        assert_eq!(figure.position(), position);
        assert_eq!(field, before);
    }

    #[test]
    fn test_wall_blocks_sideways_move() {
        let field = Field::new(4, 8);
        let mut figure = Figure::at(BrickKind::I, 0, 0);
        figure.move_left(&field);
        figure.move_right(&field);
        assert_eq!(figure.position(), (0, 0));
    }

    #[test]
    fn test_rotation_into_wall_is_rejected() {
        // Vertical I in column 0 of its box; turning it flat needs box columns 0..4.
        let field = Field::new(4, 8);
        let mut figure = Figure::at(BrickKind::I, -1, 0);
        figure.brick.rotate_forward();
        assert!(!field.collides(figure.cells()));

        assert!(!figure.rotate(&field));
        assert_eq!(figure.brick().variant(), 1);
        assert_eq!(figure.position(), (-1, 0));
    }

    proptest! {
        #[test]
        fn rotate_never_moves_the_figure(
            kind in prop::sample::select(BrickKind::ALL.to_vec()),
            x in -1i32..6,
            y in 0i32..6,
            turns in 1usize..8,
            blockers in prop::collection::vec((0usize..8, 0usize..8), 0..12),
        ) {
            let mut field = Field::new(8, 8);
            for (bx, by) in blockers {
                field.set(bx, by, Cell::Occupied(1));
            }
            let mut figure = Figure::at(kind, x, y);
            for _ in 0..turns {
                let variant = figure.brick().variant();
                let rotated = figure.rotate(&field);
                prop_assert_eq!(figure.position(), (x, y));
                prop_assert_eq!(rotated, figure.brick().variant() != variant);
            }
        }
    }
}

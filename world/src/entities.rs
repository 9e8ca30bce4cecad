//! Authoritative board entity storage.

use escape_room_core::{
    BoardLayout, CellCoord, Direction, GridGeometry, PixelPoint, PixelRect, WallPlacement,
};

/// Lifecycle of a single trap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TrapStatus {
    /// Still able to catch the player.
    Armed,
    /// Triggered on purpose from an adjacent cell.
    Sprung,
    /// Disarmed by a paid removal.
    Removed,
}

/// Wall stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct WallState {
    /// Cell edge the wall was generated on.
    pub(crate) placement: WallPlacement,
    /// Pixel area covered by the wall.
    pub(crate) area: PixelRect,
}

/// Trap stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct TrapState {
    pub(crate) cell: CellCoord,
    pub(crate) area: PixelRect,
    pub(crate) status: TrapStatus,
}

/// Prize stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct PrizeState {
    pub(crate) cell: CellCoord,
    pub(crate) area: PixelRect,
    pub(crate) collected: bool,
}

/// Every entity placed on the board. Positions never change once installed.
#[derive(Clone, Debug)]
pub(crate) struct Board {
    pub(crate) walls: Vec<WallState>,
    pub(crate) traps: Vec<TrapState>,
    pub(crate) prizes: Vec<PrizeState>,
}

impl Board {
    /// Materialises a layout using the provided geometry.
    pub(crate) fn from_layout(geometry: &GridGeometry, layout: &BoardLayout) -> Self {
        Self {
            walls: layout
                .walls
                .iter()
                .map(|&placement| WallState {
                    placement,
                    area: geometry.wall_area(placement),
                })
                .collect(),
            traps: layout
                .traps
                .iter()
                .map(|&cell| TrapState {
                    cell,
                    area: geometry.item_area(cell),
                    status: TrapStatus::Armed,
                })
                .collect(),
            prizes: layout
                .prizes
                .iter()
                .map(|&cell| PrizeState {
                    cell,
                    area: geometry.item_area(cell),
                    collected: false,
                })
                .collect(),
        }
    }

    /// Re-arms every trap and restores every prize in place.
    pub(crate) fn reactivate(&mut self) {
        for trap in &mut self.traps {
            trap.status = TrapStatus::Armed;
        }
        for prize in &mut self.prizes {
            prize.collected = false;
        }
    }

    pub(crate) fn armed_trap_at(&self, point: PixelPoint) -> Option<&TrapState> {
        self.traps
            .iter()
            .find(|trap| trap.status == TrapStatus::Armed && trap.area.contains(point))
    }

    pub(crate) fn armed_trap_at_mut(&mut self, point: PixelPoint) -> Option<&mut TrapState> {
        self.traps
            .iter_mut()
            .find(|trap| trap.status == TrapStatus::Armed && trap.area.contains(point))
    }

    pub(crate) fn available_prize_at_mut(&mut self, point: PixelPoint) -> Option<&mut PrizeState> {
        self.prizes
            .iter_mut()
            .find(|prize| !prize.collected && prize.area.contains(point))
    }

    /// Reports whether any wall lies across the path between two positions.
    pub(crate) fn wall_blocks(&self, from: PixelPoint, to: PixelPoint, direction: Direction) -> bool {
        self.walls
            .iter()
            .any(|wall| crosses(wall.area, from, to, direction))
    }
}

/// Edge-crossing test for a single wall. Bounds are inclusive on both ends.
fn crosses(area: PixelRect, from: PixelPoint, to: PixelPoint, direction: Direction) -> bool {
    let spans_row = (area.y()..=area.bottom()).contains(&from.y());
    let spans_column = (area.x()..=area.right()).contains(&from.x());
    match direction {
        Direction::Right => from.x() <= area.x() && area.x() <= to.x() && spans_row,
        Direction::Left => from.x() >= area.x() && area.x() >= to.x() && spans_row,
        Direction::Down => from.y() <= area.y() && area.y() <= to.y() && spans_column,
        Direction::Up => from.y() >= area.y() && area.y() >= to.y() && spans_column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_room_core::WallOrientation;

    fn board_with(layout: BoardLayout) -> Board {
        Board::from_layout(&GridGeometry::STANDARD, &layout)
    }

    #[test]
    fn vertical_wall_blocks_both_horizontal_directions() {
        let board = board_with(BoardLayout {
            walls: vec![WallPlacement {
                cell: CellCoord::new(0, 0),
                orientation: WallOrientation::Vertical,
            }],
            ..BoardLayout::default()
        });
        let west = PixelPoint::new(15, 15);
        let east = PixelPoint::new(75, 15);

        assert!(board.wall_blocks(west, east, Direction::Right));
        assert!(board.wall_blocks(east, west, Direction::Left));
        assert!(!board.wall_blocks(west, PixelPoint::new(15, 75), Direction::Down));
    }

    #[test]
    fn horizontal_wall_blocks_both_vertical_directions() {
        let board = board_with(BoardLayout {
            walls: vec![WallPlacement {
                cell: CellCoord::new(1, 0),
                orientation: WallOrientation::Horizontal,
            }],
            ..BoardLayout::default()
        });
        let north = PixelPoint::new(75, 15);
        let south = PixelPoint::new(75, 75);

        assert!(board.wall_blocks(north, south, Direction::Down));
        assert!(board.wall_blocks(south, north, Direction::Up));
        assert!(!board.wall_blocks(north, PixelPoint::new(135, 15), Direction::Right));
    }

    #[test]
    fn wall_in_other_row_does_not_block() {
        let board = board_with(BoardLayout {
            walls: vec![WallPlacement {
                cell: CellCoord::new(0, 2),
                orientation: WallOrientation::Vertical,
            }],
            ..BoardLayout::default()
        });

        assert!(!board.wall_blocks(
            PixelPoint::new(15, 15),
            PixelPoint::new(75, 15),
            Direction::Right
        ));
    }

    #[test]
    fn reactivate_restores_consumed_entities() {
        let mut board = board_with(BoardLayout {
            traps: vec![CellCoord::new(2, 2)],
            prizes: vec![CellCoord::new(2, 2)],
            ..BoardLayout::default()
        });
        let point = PixelPoint::new(135, 135);

        board
            .armed_trap_at_mut(point)
            .expect("armed trap")
            .status = TrapStatus::Sprung;
        board.available_prize_at_mut(point).expect("prize").collected = true;
        assert!(board.armed_trap_at(point).is_none());

        board.reactivate();

        assert!(board.armed_trap_at(point).is_some());
        assert!(board.available_prize_at_mut(point).is_some());
    }
}

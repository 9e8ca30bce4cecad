use escape_room_core::{CellCoord, PixelPoint, WallOrientation};
use escape_room_world::query::BoardView;

/// Draws the board as text, one line per row.
///
/// The player is `@`, uncollected prizes `$` and the exit cell `F`. A `|`
/// follows a cell with a wall on its right edge and a `_` line below a row
/// marks walls on bottom edges. Traps are never drawn.
pub(crate) fn render(view: &BoardView) -> String {
    let geometry = view.geometry;
    let player = geometry.cell_at(view.player);
    let mut text = String::new();

    for row in 0..geometry.rows() {
        let mut cells = String::new();
        let mut floor = String::new();
        for column in 0..geometry.columns() {
            let cell = CellCoord::new(column, row);
            cells.push(symbol(view, cell, player));
            cells.push(edge(view, cell, WallOrientation::Vertical, '|'));
            floor.push(edge(view, cell, WallOrientation::Horizontal, '_'));
            floor.push(' ');
        }
        text.push_str(cells.trim_end());
        text.push('\n');
        let floor = floor.trim_end();
        if !floor.is_empty() {
            text.push_str(floor);
            text.push('\n');
        }
    }
    text
}

fn symbol(view: &BoardView, cell: CellCoord, player: Option<CellCoord>) -> char {
    let spot = view.geometry.item_area(cell);
    if player == Some(cell) {
        '@'
    } else if view.available_prizes.contains(&cell) {
        '$'
    } else if view
        .geometry
        .in_finish_region(PixelPoint::new(spot.x(), spot.y()), view.finish)
    {
        'F'
    } else {
        '.'
    }
}

fn edge(view: &BoardView, cell: CellCoord, orientation: WallOrientation, mark: char) -> char {
    let walled = view
        .walls
        .iter()
        .any(|wall| wall.cell == cell && wall.orientation == orientation);
    if walled {
        mark
    } else {
        ' '
    }
}

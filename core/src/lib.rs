#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Escape Room engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. The session controller submits
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values.
//! Score changes travel exclusively as [`Event::ScoreAdjusted`] so that
//! callers can total a batch with [`score_delta`].

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to EscapeRoom!";

/// Points awarded for collecting a prize.
pub const PRIZE_VALUE: i32 = 10;
/// Points awarded for springing a trap, charged when no trap is there.
pub const TRAP_VALUE: i32 = 5;
/// Points awarded for reaching the finish, charged when quitting early.
pub const END_VALUE: i32 = 10;
/// Points charged when finishing with more collisions than [`COLLISION_LIMIT`].
pub const COLLISION_LIMIT_PENALTY: i32 = 5;
/// Points charged for every trap removal attempt.
pub const TRAP_REMOVAL_COST: i32 = 5;
/// Points charged per step while the sticky trap penalty applies.
pub const STEP_PENALTY: i32 = 1;
/// Points charged for a paid adjacent-trap scan.
pub const CHECK_COST: i32 = 1;
/// Points charged when the player declines to remove a trap they hit.
pub const DECLINE_PENALTY: i32 = 1;
/// Number of trap collisions tolerated before the finish bonus is withheld.
pub const COLLISION_LIMIT: u32 = 6;
/// Maximum number of accepted trap removals per game.
pub const MAX_TRAP_REMOVALS: u32 = 2;

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing x.
    Right,
    /// Movement toward decreasing x.
    Left,
    /// Movement toward decreasing y.
    Up,
    /// Movement toward increasing y.
    Down,
}

impl Direction {
    /// Every direction in the order adjacent-trap scans report them.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// Lower-case word used when presenting the direction to players.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// Unit offset of the direction as `(dx, dy)` in cells.
    #[must_use]
    pub const fn unit(self) -> (i32, i32) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
        }
    }
}

/// Location on the board expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelPoint {
    x: i32,
    y: i32,
}

impl PixelPoint {
    /// Creates a new pixel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Horizontal pixel coordinate.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Vertical pixel coordinate.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the point displaced by the provided pixel offsets.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned rectangle expressed in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PixelRect {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
}

impl PixelRect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Reports whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are
    /// exclusive. Empty rectangles contain nothing.
    #[must_use]
    pub const fn contains(&self, point: PixelPoint) -> bool {
        self.width > 0
            && self.height > 0
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Orientation of a wall segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallOrientation {
    /// Wall running along the right edge of its cell.
    Vertical,
    /// Wall running along the bottom edge of its cell.
    Horizontal,
}

/// Wall anchored to a cell and one of its edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallPlacement {
    /// Cell whose edge carries the wall.
    pub cell: CellCoord,
    /// Edge of the cell the wall runs along.
    pub orientation: WallOrientation,
}

/// Which right-hand corner of the board hosts the exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishSide {
    /// Exit in the top-right region.
    Top,
    /// Exit in the bottom-right region.
    Bottom,
}

/// Positions of every wall, trap, and prize on a board.
///
/// Entities may share cells; a trap may hide a prize.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    /// Wall segments placed on cell edges.
    pub walls: Vec<WallPlacement>,
    /// Cells containing a trap.
    pub traps: Vec<CellCoord>,
    /// Cells containing a prize.
    pub prizes: Vec<CellCoord>,
}

/// Pixel dimensions of the board and of the entities drawn on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridGeometry {
    width: i32,
    height: i32,
    cell_size: i32,
    columns: u32,
    rows: u32,
    start: PixelPoint,
}

impl GridGeometry {
    /// The 8 by 5 board of 60 pixel cells the game is played on.
    pub const STANDARD: GridGeometry = GridGeometry {
        width: 510,
        height: 360,
        cell_size: 60,
        columns: 8,
        rows: 5,
        start: PixelPoint::new(15, 15),
    };

    const ITEM_INSET: i32 = 15;
    const ITEM_SIZE: i32 = 15;
    const WALL_INSET: i32 = 5;
    const WALL_THICKNESS: i32 = 8;

    /// Total board width in pixels.
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.width
    }

    /// Total board height in pixels.
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Side length of a cell, which is also the distance of a single move.
    #[must_use]
    pub const fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of cell columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of cell rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Location the player occupies at the start of every game.
    #[must_use]
    pub const fn start(&self) -> PixelPoint {
        self.start
    }

    /// Pixel offset of a single move in the given direction.
    #[must_use]
    pub const fn step(&self, direction: Direction) -> (i32, i32) {
        let (dx, dy) = direction.unit();
        (dx * self.cell_size, dy * self.cell_size)
    }

    /// Reports whether the player may stand at the provided point.
    #[must_use]
    pub const fn within_bounds(&self, point: PixelPoint) -> bool {
        point.x() >= 0
            && point.x() <= self.width - self.cell_size
            && point.y() >= 0
            && point.y() <= self.height - self.cell_size
    }

    /// Reports whether the point lies in the exit region for `side`.
    #[must_use]
    pub const fn in_finish_region(&self, point: PixelPoint, side: FinishSide) -> bool {
        let at_right = point.x() > self.width - 2 * self.cell_size;
        let at_side = match side {
            FinishSide::Top => point.y() < self.cell_size,
            FinishSide::Bottom => point.y() > self.height - 2 * self.cell_size,
        };
        at_right && at_side
    }

    /// Cell containing the point, if it lies on the grid.
    #[must_use]
    pub fn cell_at(&self, point: PixelPoint) -> Option<CellCoord> {
        if point.x() < 0 || point.y() < 0 {
            return None;
        }
        let column = u32::try_from(point.x() / self.cell_size).ok()?;
        let row = u32::try_from(point.y() / self.cell_size).ok()?;
        (column < self.columns && row < self.rows).then_some(CellCoord::new(column, row))
    }

    /// Area a trap or prize occupies within its cell.
    #[must_use]
    pub fn item_area(&self, cell: CellCoord) -> PixelRect {
        let (x, y) = self.cell_origin(cell);
        PixelRect::new(
            x + Self::ITEM_INSET,
            y + Self::ITEM_INSET,
            Self::ITEM_SIZE,
            Self::ITEM_SIZE,
        )
    }

    /// Area a wall occupies along its cell edge.
    #[must_use]
    pub fn wall_area(&self, wall: WallPlacement) -> PixelRect {
        let (x, y) = self.cell_origin(wall.cell);
        let s = self.cell_size;
        match wall.orientation {
            WallOrientation::Vertical => {
                PixelRect::new(x + s - Self::WALL_INSET, y, Self::WALL_THICKNESS, s)
            }
            WallOrientation::Horizontal => {
                PixelRect::new(x, y + s - Self::WALL_INSET, s, Self::WALL_THICKNESS)
            }
        }
    }

    fn cell_origin(&self, cell: CellCoord) -> (i32, i32) {
        let column = i32::try_from(cell.column()).unwrap_or(i32::MAX / 2);
        let row = i32::try_from(cell.row()).unwrap_or(i32::MAX / 2);
        (column * self.cell_size, row * self.cell_size)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Movement modifier applied to the next directional command.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    /// Spring the trap in the chosen direction instead of moving.
    Spring,
    /// Move two cells in the chosen direction.
    Jump,
}

/// Validated player input accepted by the command vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// Move one cell, or apply the pending modifier in this direction.
    Direction(Direction),
    /// Arm a modifier for the next directional command.
    Arm(Modifier),
    /// Fused modifier and direction, equivalent to `Arm` then `Direction`.
    Modified(Modifier, Direction),
    /// Collect a prize on the current cell.
    Pickup,
    /// Free scan for traps in the four adjacent cells.
    Find,
    /// Paid scan for traps in the four adjacent cells.
    Check,
    /// Attempt to remove a trap on the current cell.
    RemoveTrap,
    /// Answer to a yes/no question.
    Confirm(bool),
    /// Show score and counters.
    Status,
    /// Show the command summary.
    Help,
    /// End the game.
    Quit,
    /// Reset the current board and score the attempt.
    Replay,
    /// Generate a new board and zero the score.
    Restart,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the player a single cell.
    MovePlayer {
        /// Direction of travel.
        direction: Direction,
    },
    /// Springs the trap in the adjacent cell.
    SpringTrap {
        /// Direction of the targeted neighbour.
        direction: Direction,
    },
    /// Collects the prize on the player's cell.
    PickupPrize,
    /// Removes the trap on the player's cell.
    RemoveTrap,
    /// Acknowledges the pending trap collision.
    ClearPendingTrapCollision,
    /// Scores the player's position at the end of the session.
    EndGame,
    /// Scores the attempt, then resets the current layout.
    Replay {
        /// Exit side for the next attempt.
        finish: FinishSide,
    },
    /// Installs a fresh layout and resets all counters.
    Restart {
        /// Layout replacing the current board.
        layout: BoardLayout,
        /// Exit side for the new board.
        finish: FinishSide,
    },
}

/// Reasons a move left the player in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The target lies outside the board.
    OffGrid,
    /// A wall crosses the path to the target.
    Wall,
}

/// Result of scoring the player's position when a game ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FinishOutcome {
    /// The player reached the exit within the collision limit.
    Escaped,
    /// The player reached the exit after too many collisions.
    TooManyCollisions,
    /// The player was not at the exit.
    QuitEarly,
}

impl FinishOutcome {
    /// Score change associated with the outcome.
    #[must_use]
    pub const fn score(self) -> i32 {
        match self {
            Self::Escaped => END_VALUE,
            Self::TooManyCollisions => -COLLISION_LIMIT_PENALTY,
            Self::QuitEarly => -END_VALUE,
        }
    }
}

/// Distinguishes the two ways a board is reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResetKind {
    /// Same layout, entities reactivated.
    Replay,
    /// Newly generated layout.
    Restart,
}

/// Explains why the score changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreReason {
    /// Moving while standing on a trap after removals ran out.
    StandingOnTrap,
    /// Hitting a trap after removals ran out.
    TrapCollision,
    /// Springing an armed trap.
    TrapSprung,
    /// Springing where no armed trap exists.
    NothingToSpring,
    /// Collecting a prize.
    PrizeCollected,
    /// Paying for a trap removal attempt.
    TrapRemoval,
    /// Scoring the end-of-game position.
    Finish(FinishOutcome),
    /// Paying for an adjacent-trap check.
    TrapCheck,
    /// Declining to remove a trap that was hit.
    DeclinedRemoval,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The player moved to a new cell.
    PlayerMoved {
        /// Position before the move.
        from: PixelPoint,
        /// Position after the move.
        to: PixelPoint,
    },
    /// The move was rejected and the player stayed in place.
    MoveBlocked {
        /// Position the player remains at.
        at: PixelPoint,
        /// Direction of the rejected move.
        direction: Direction,
        /// Why the move was rejected.
        reason: MoveRejection,
    },
    /// The player stepped onto an armed trap.
    TrapCollision {
        /// Number of collisions so far, including this one.
        collisions: u32,
        /// Whether the player may still remove the trap.
        removal_offered: bool,
    },
    /// A trap in an adjacent cell was sprung.
    TrapSprung {
        /// Cell the trap occupied.
        cell: CellCoord,
    },
    /// A spring was attempted where no armed trap exists.
    NothingToSpring,
    /// A prize on the player's cell was collected.
    PrizeCollected {
        /// Cell the prize occupied.
        cell: CellCoord,
    },
    /// A pickup was attempted where no prize exists.
    NoPrizeHere,
    /// A trap on the player's cell was removed.
    TrapRemoved {
        /// Accepted removals so far, including this one.
        removals: u32,
    },
    /// A removal was attempted where no armed trap exists.
    NoTrapToRemove,
    /// A removal was attempted after the removal cap was reached.
    RemovalLimitReached,
    /// The score changed.
    ScoreAdjusted {
        /// Signed change to apply to the running score.
        delta: i32,
        /// Why the score changed.
        reason: ScoreReason,
    },
    /// The player's position was scored at the end of an attempt.
    GameEvaluated {
        /// Outcome of the evaluation.
        outcome: FinishOutcome,
    },
    /// The board was reset.
    BoardReset {
        /// Whether the layout was kept or replaced.
        kind: ResetKind,
        /// Exit side for the next attempt.
        finish: FinishSide,
    },
}

/// Sums every score adjustment contained in the event batch.
#[must_use]
pub fn score_delta(events: &[Event]) -> i32 {
    events
        .iter()
        .map(|event| match event {
            Event::ScoreAdjusted { delta, .. } => *delta,
            _ => 0,
        })
        .sum()
}

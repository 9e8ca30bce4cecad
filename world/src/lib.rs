#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Escape Room.
//!
//! The world owns the board, the player, and every per-attempt counter. All
//! mutation goes through [`apply`]; adapters and systems observe the state via
//! the [`query`] module.

mod entities;

use escape_room_core::{
    BoardLayout, Command, Direction, Event, FinishOutcome, FinishSide, GridGeometry,
    MoveRejection, PixelPoint, ResetKind, ScoreReason, COLLISION_LIMIT, MAX_TRAP_REMOVALS,
    PRIZE_VALUE, STEP_PENALTY, TRAP_REMOVAL_COST, TRAP_VALUE, WELCOME_BANNER,
};

use self::entities::{Board, TrapStatus};

/// Represents the authoritative Escape Room world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    geometry: GridGeometry,
    board: Board,
    player: PixelPoint,
    finish: FinishSide,
    steps: u32,
    trap_collisions: u32,
    trap_removals: u32,
    removal_chances_used: u32,
    pending_trap_collision: bool,
}

impl World {
    /// Creates a world on the standard board with the provided layout.
    #[must_use]
    pub fn new(layout: &BoardLayout, finish: FinishSide) -> Self {
        let geometry = GridGeometry::STANDARD;
        Self {
            banner: WELCOME_BANNER,
            board: Board::from_layout(&geometry, layout),
            player: geometry.start(),
            geometry,
            finish,
            steps: 0,
            trap_collisions: 0,
            trap_removals: 0,
            removal_chances_used: 0,
            pending_trap_collision: false,
        }
    }

    fn reset_attempt(&mut self, finish: FinishSide) {
        self.player = self.geometry.start();
        self.finish = finish;
        self.steps = 0;
        self.trap_collisions = 0;
        self.trap_removals = 0;
        self.removal_chances_used = 0;
        self.pending_trap_collision = false;
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let standing_on_trap = self.removal_chances_used >= MAX_TRAP_REMOVALS
            && self.board.armed_trap_at(self.player).is_some();

        self.steps = self.steps.saturating_add(1);
        if standing_on_trap {
            charge(out_events, -STEP_PENALTY, ScoreReason::StandingOnTrap);
        }

        let (dx, dy) = self.geometry.step(direction);
        let target = self.player.offset(dx, dy);
        let rejection = if !self.geometry.within_bounds(target) {
            Some(MoveRejection::OffGrid)
        } else if self.board.wall_blocks(self.player, target, direction) {
            Some(MoveRejection::Wall)
        } else {
            None
        };

        if let Some(reason) = rejection {
            log::info!("move {direction:?} from {:?} rejected: {reason:?}", self.player);
            out_events.push(Event::MoveBlocked {
                at: self.player,
                direction,
                reason,
            });
            return;
        }

        let from = self.player;
        self.player = target;
        out_events.push(Event::PlayerMoved { from, to: target });
        self.evaluate_collision(out_events);
    }

    fn evaluate_collision(&mut self, out_events: &mut Vec<Event>) {
        if self.board.armed_trap_at(self.player).is_none() {
            return;
        }

        self.trap_collisions = self.trap_collisions.saturating_add(1);
        let removal_offered = self.removal_chances_used < MAX_TRAP_REMOVALS;
        out_events.push(Event::TrapCollision {
            collisions: self.trap_collisions,
            removal_offered,
        });

        if removal_offered {
            self.pending_trap_collision = true;
        } else {
            charge(out_events, -STEP_PENALTY, ScoreReason::TrapCollision);
        }
    }

    fn spring_trap(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let (dx, dy) = self.geometry.step(direction);
        let target = self.player.offset(dx, dy);

        match self.board.armed_trap_at_mut(target) {
            Some(trap) => {
                trap.status = TrapStatus::Sprung;
                out_events.push(Event::TrapSprung { cell: trap.cell });
                charge(out_events, TRAP_VALUE, ScoreReason::TrapSprung);
            }
            None => {
                out_events.push(Event::NothingToSpring);
                charge(out_events, -TRAP_VALUE, ScoreReason::NothingToSpring);
            }
        }
    }

    fn pickup_prize(&mut self, out_events: &mut Vec<Event>) {
        match self.board.available_prize_at_mut(self.player) {
            Some(prize) => {
                prize.collected = true;
                out_events.push(Event::PrizeCollected { cell: prize.cell });
                charge(out_events, PRIZE_VALUE, ScoreReason::PrizeCollected);
            }
            None => out_events.push(Event::NoPrizeHere),
        }
    }

    fn remove_trap(&mut self, out_events: &mut Vec<Event>) {
        if self.removal_chances_used >= MAX_TRAP_REMOVALS {
            out_events.push(Event::RemovalLimitReached);
        } else if let Some(trap) = self.board.armed_trap_at_mut(self.player) {
            trap.status = TrapStatus::Removed;
            self.trap_removals = self.trap_removals.saturating_add(1);
            self.removal_chances_used = self.removal_chances_used.saturating_add(1);
            out_events.push(Event::TrapRemoved {
                removals: self.trap_removals,
            });
        } else {
            out_events.push(Event::NoTrapToRemove);
        }
        charge(out_events, -TRAP_REMOVAL_COST, ScoreReason::TrapRemoval);
    }

    fn finish_outcome(&self) -> FinishOutcome {
        if !self.geometry.in_finish_region(self.player, self.finish) {
            FinishOutcome::QuitEarly
        } else if self.trap_collisions > COLLISION_LIMIT {
            FinishOutcome::TooManyCollisions
        } else {
            FinishOutcome::Escaped
        }
    }

    fn evaluate_finish(&self, out_events: &mut Vec<Event>) {
        let outcome = self.finish_outcome();
        out_events.push(Event::GameEvaluated { outcome });
        charge(out_events, outcome.score(), ScoreReason::Finish(outcome));
    }
}

fn charge(out_events: &mut Vec<Event>, delta: i32, reason: ScoreReason) {
    out_events.push(Event::ScoreAdjusted { delta, reason });
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::SpringTrap { direction } => world.spring_trap(direction, out_events),
        Command::PickupPrize => world.pickup_prize(out_events),
        Command::RemoveTrap => world.remove_trap(out_events),
        Command::ClearPendingTrapCollision => world.pending_trap_collision = false,
        Command::EndGame => world.evaluate_finish(out_events),
        Command::Replay { finish } => {
            world.evaluate_finish(out_events);
            world.board.reactivate();
            world.reset_attempt(finish);
            log::info!("board replayed, exit now {finish:?}");
            out_events.push(Event::BoardReset {
                kind: ResetKind::Replay,
                finish,
            });
        }
        Command::Restart { layout, finish } => {
            world.board = Board::from_layout(&world.geometry, &layout);
            world.reset_attempt(finish);
            log::info!(
                "board restarted with {} walls, {} traps, {} prizes, exit {finish:?}",
                layout.walls.len(),
                layout.traps.len(),
                layout.prizes.len()
            );
            out_events.push(Event::BoardReset {
                kind: ResetKind::Restart,
                finish,
            });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use escape_room_core::{
        CellCoord, Direction, FinishSide, GridGeometry, PixelPoint, WallPlacement,
    };

    use super::World;

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Board dimensions the world was created with.
    #[must_use]
    pub fn geometry(world: &World) -> GridGeometry {
        world.geometry
    }

    /// Current player position in pixels.
    #[must_use]
    pub fn player_position(world: &World) -> PixelPoint {
        world.player
    }

    /// Number of move attempts in the current attempt, including rejected ones.
    #[must_use]
    pub fn steps(world: &World) -> u32 {
        world.steps
    }

    /// Number of armed traps the player has stepped on.
    #[must_use]
    pub fn trap_collisions(world: &World) -> u32 {
        world.trap_collisions
    }

    /// Number of traps removed by paid removal.
    #[must_use]
    pub fn trap_removals(world: &World) -> u32 {
        world.trap_removals
    }

    /// Number of removal chances consumed by accepted removals.
    #[must_use]
    pub fn removal_chances_used(world: &World) -> u32 {
        world.removal_chances_used
    }

    /// Number of traps placed on the board, armed or not.
    #[must_use]
    pub fn total_traps(world: &World) -> usize {
        world.board.traps.len()
    }

    /// Exit side for the current attempt.
    #[must_use]
    pub fn finish_side(world: &World) -> FinishSide {
        world.finish
    }

    /// Reports whether the last move hit a trap that awaits a removal decision.
    #[must_use]
    pub fn has_pending_trap_collision(world: &World) -> bool {
        world.pending_trap_collision
    }

    /// Reports whether an armed trap occupies the neighbouring cell.
    #[must_use]
    pub fn is_trap(world: &World, direction: Direction) -> bool {
        let (dx, dy) = world.geometry.step(direction);
        world
            .board
            .armed_trap_at(world.player.offset(dx, dy))
            .is_some()
    }

    /// Reports whether an armed trap occupies the player's cell.
    #[must_use]
    pub fn is_on_trap(world: &World) -> bool {
        world.board.armed_trap_at(world.player).is_some()
    }

    /// Reports whether the player stands in the exit region.
    #[must_use]
    pub fn is_at_finish(world: &World) -> bool {
        world.geometry.in_finish_region(world.player, world.finish)
    }

    /// Captures a read-only snapshot of everything a renderer may draw.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView {
        BoardView {
            geometry: world.geometry,
            player: world.player,
            steps: world.steps,
            finish: world.finish,
            walls: world.board.walls.iter().map(|wall| wall.placement).collect(),
            armed_traps: world
                .board
                .traps
                .iter()
                .filter(|trap| trap.status == super::TrapStatus::Armed)
                .map(|trap| trap.cell)
                .collect(),
            available_prizes: world
                .board
                .prizes
                .iter()
                .filter(|prize| !prize.collected)
                .map(|prize| prize.cell)
                .collect(),
        }
    }

    /// Read-only snapshot of the board for presentation purposes.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct BoardView {
        /// Board dimensions.
        pub geometry: GridGeometry,
        /// Player position in pixels.
        pub player: PixelPoint,
        /// Move attempts in the current attempt.
        pub steps: u32,
        /// Exit side for the current attempt.
        pub finish: FinishSide,
        /// Every wall on the board.
        pub walls: Vec<WallPlacement>,
        /// Cells holding a trap that can still be triggered.
        pub armed_traps: Vec<CellCoord>,
        /// Cells holding a prize that can still be collected.
        pub available_prizes: Vec<CellCoord>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_room_core::{score_delta, CellCoord};

    fn empty_world() -> World {
        World::new(&BoardLayout::default(), FinishSide::Bottom)
    }

    fn run(world: &mut World, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, command, &mut events);
        events
    }

    #[test]
    fn new_world_places_player_at_start() {
        let world = empty_world();
        assert_eq!(query::player_position(&world), PixelPoint::new(15, 15));
        assert_eq!(query::steps(&world), 0);
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn off_grid_move_counts_step_without_moving() {
        let mut world = empty_world();
        let events = run(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Up,
            },
        );

        assert_eq!(query::steps(&world), 1);
        assert_eq!(query::player_position(&world), PixelPoint::new(15, 15));
        assert_eq!(score_delta(&events), 0);
        assert!(events.contains(&Event::MoveBlocked {
            at: PixelPoint::new(15, 15),
            direction: Direction::Up,
            reason: MoveRejection::OffGrid,
        }));
    }

    #[test]
    fn collision_with_removals_left_defers_scoring() {
        let mut world = World::new(
            &BoardLayout {
                traps: vec![CellCoord::new(0, 1)],
                ..BoardLayout::default()
            },
            FinishSide::Top,
        );
        let events = run(
            &mut world,
            Command::MovePlayer {
                direction: Direction::Down,
            },
        );

        assert_eq!(score_delta(&events), 0);
        assert!(query::has_pending_trap_collision(&world));
        assert_eq!(query::trap_collisions(&world), 1);

        let _ = run(&mut world, Command::ClearPendingTrapCollision);
        assert!(!query::has_pending_trap_collision(&world));
        assert!(query::is_on_trap(&world));
    }

    #[test]
    fn end_game_outcome_depends_on_collision_count() {
        let mut world = empty_world();
        world.player = PixelPoint::new(435, 255);
        world.trap_collisions = COLLISION_LIMIT;
        assert_eq!(score_delta(&run(&mut world, Command::EndGame)), 10);

        world.trap_collisions = COLLISION_LIMIT + 1;
        let events = run(&mut world, Command::EndGame);
        assert_eq!(score_delta(&events), -5);
        assert!(events.contains(&Event::GameEvaluated {
            outcome: FinishOutcome::TooManyCollisions,
        }));
    }

    #[test]
    fn restart_installs_new_layout_without_scoring() {
        let mut world = empty_world();
        let layout = BoardLayout {
            traps: vec![CellCoord::new(5, 3), CellCoord::new(6, 3)],
            prizes: vec![CellCoord::new(1, 1)],
            ..BoardLayout::default()
        };
        let events = run(
            &mut world,
            Command::Restart {
                layout,
                finish: FinishSide::Top,
            },
        );

        assert_eq!(score_delta(&events), 0);
        assert_eq!(query::total_traps(&world), 2);
        assert_eq!(query::finish_side(&world), FinishSide::Top);
        assert_eq!(
            query::board_view(&world).available_prizes,
            vec![CellCoord::new(1, 1)]
        );
    }
}

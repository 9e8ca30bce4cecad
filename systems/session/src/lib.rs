#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session controller that turns validated player input into world commands.
//!
//! The session owns the world and the board generator, tracks the cumulative
//! score, the one-shot movement modifier, and the detrap negotiation that
//! follows a trap collision. Everything worth showing to the player is pushed
//! to the caller as a [`Notice`].

use escape_room_core::{
    score_delta, Command, Direction, Event, GridGeometry, Input, Modifier, ScoreReason,
    CHECK_COST, COLLISION_LIMIT, DECLINE_PENALTY, TRAP_REMOVAL_COST,
};
use escape_room_system_board_generator::{BoardGenerator, Config};
use escape_room_world::{self as world, query, World};

/// Stage of the command loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next command.
    AwaitingCommand,
    /// A trap was hit and the player must decide whether to remove it.
    AwaitingDetrapDecision,
    /// The game has been scored; further input is ignored.
    Finished,
}

/// Counters shown by the `status` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusReport {
    /// Cumulative score.
    pub score: i32,
    /// Move attempts in the current attempt.
    pub steps: u32,
    /// Traps hit in the current attempt.
    pub trap_collisions: u32,
    /// Collisions tolerated before the finish bonus is withheld.
    pub collision_limit: u32,
    /// Traps removed in the current attempt.
    pub trap_removals: u32,
}

/// Totals reported once the game is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FinalReport {
    /// Score after the end-of-game evaluation.
    pub score: i32,
    /// Move attempts in the last attempt.
    pub steps: u32,
    /// Commands accepted over the whole session.
    pub commands_issued: u64,
}

/// Something the player should be told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Event reported by the world.
    Engine(Event),
    /// A modifier now waits for a direction.
    ModifierArmed(Modifier),
    /// Result of scanning the four neighbouring cells.
    TrapScan {
        /// Whether the scan was the paid `check` variant.
        paid: bool,
        /// Directions with an armed trap, in right/left/up/down order.
        directions: Vec<Direction>,
    },
    /// Score change decided by the session rather than the world.
    Charged {
        /// Signed change applied to the score.
        delta: i32,
        /// Why the score changed.
        reason: ScoreReason,
    },
    /// Current counters.
    Status(StatusReport),
    /// Command summary was requested.
    Help,
    /// The cumulative score was zeroed by a restart.
    ScoreReset,
    /// The player must answer whether to remove the trap they hit.
    DetrapPrompt {
        /// Points a removal costs.
        cost: i32,
    },
    /// The player reached the exit.
    ExitReached,
    /// Running score after a command.
    ScoreNow(i32),
    /// The game ended.
    GameOver(FinalReport),
}

/// Interactive game session driving a single world.
#[derive(Debug)]
pub struct Session {
    world: World,
    generator: BoardGenerator,
    phase: Phase,
    pending_modifier: Option<Modifier>,
    score: i32,
    commands_issued: u64,
    quit_requested: bool,
}

impl Session {
    /// Creates a session on a freshly generated board.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut generator = BoardGenerator::new(config);
        let layout = generator.generate(&GridGeometry::STANDARD);
        let finish = generator.roll_finish_side();
        Self::from_parts(World::new(&layout, finish), generator)
    }

    /// Creates a session around an existing world. The generator is used for
    /// restarts and exit rolls.
    #[must_use]
    pub fn from_parts(world: World, generator: BoardGenerator) -> Self {
        Self {
            world,
            generator,
            phase: Phase::AwaitingCommand,
            pending_modifier: None,
            score: 0,
            commands_issued: 0,
            quit_requested: false,
        }
    }

    /// Current stage of the command loop.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Cumulative score.
    #[must_use]
    pub const fn score(&self) -> i32 {
        self.score
    }

    /// Commands accepted at the main prompt so far.
    #[must_use]
    pub const fn commands_issued(&self) -> u64 {
        self.commands_issued
    }

    /// Modifier waiting for the next directional command.
    #[must_use]
    pub const fn pending_modifier(&self) -> Option<Modifier> {
        self.pending_modifier
    }

    /// Read-only access to the world for rendering and reporting.
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// Processes one validated input.
    pub fn handle(&mut self, input: Input, out: &mut Vec<Notice>) {
        match self.phase {
            Phase::Finished => log::debug!("game over, ignoring {input:?}"),
            Phase::AwaitingDetrapDecision => match input {
                Input::Confirm(accept) => {
                    self.answer_detrap(accept, out);
                    self.settle(out);
                }
                other => log::debug!("awaiting detrap answer, ignoring {other:?}"),
            },
            Phase::AwaitingCommand => {
                self.commands_issued = self.commands_issued.saturating_add(1);
                log::debug!("command #{}: {input:?}", self.commands_issued);
                self.dispatch(input, out);

                if query::has_pending_trap_collision(&self.world) {
                    self.phase = Phase::AwaitingDetrapDecision;
                    out.push(Notice::DetrapPrompt {
                        cost: TRAP_REMOVAL_COST,
                    });
                } else {
                    self.settle(out);
                }
            }
        }
    }

    /// Ends the game because no more input will arrive. An unanswered detrap
    /// question counts as declined.
    pub fn end_of_input(&mut self, out: &mut Vec<Notice>) {
        if self.phase == Phase::AwaitingDetrapDecision {
            self.answer_detrap(false, out);
        }
        if self.phase != Phase::Finished {
            self.finish(out);
        }
    }

    fn dispatch(&mut self, input: Input, out: &mut Vec<Notice>) {
        match input {
            Input::Direction(direction) => self.directional(direction, out),
            Input::Arm(modifier) => {
                self.pending_modifier = Some(modifier);
                out.push(Notice::ModifierArmed(modifier));
            }
            Input::Modified(modifier, direction) => {
                self.pending_modifier = Some(modifier);
                self.directional(direction, out);
            }
            Input::Pickup => {
                let _ = self.execute(Command::PickupPrize, out);
            }
            Input::Find => self.scan(false, out),
            Input::Check => self.scan(true, out),
            Input::RemoveTrap => {
                let _ = self.execute(Command::RemoveTrap, out);
            }
            Input::Confirm(_) => {}
            Input::Status => out.push(Notice::Status(self.status())),
            Input::Help => out.push(Notice::Help),
            Input::Quit => self.quit_requested = true,
            Input::Replay => {
                let finish = self.generator.roll_finish_side();
                let _ = self.execute(Command::Replay { finish }, out);
            }
            Input::Restart => {
                let layout = self.generator.generate(&query::geometry(&self.world));
                let finish = self.generator.roll_finish_side();
                let _ = self.execute(Command::Restart { layout, finish }, out);
                self.score = 0;
                out.push(Notice::ScoreReset);
            }
        }
    }

    fn directional(&mut self, direction: Direction, out: &mut Vec<Notice>) {
        match self.pending_modifier.take() {
            Some(Modifier::Spring) => {
                let _ = self.execute(Command::SpringTrap { direction }, out);
            }
            Some(Modifier::Jump) => self.jump(direction, out),
            None => {
                let _ = self.execute(Command::MovePlayer { direction }, out);
            }
        }
    }

    /// Moves twice; the second step is skipped only when the first one was
    /// blocked.
    fn jump(&mut self, direction: Direction, out: &mut Vec<Notice>) {
        let first = self.execute(Command::MovePlayer { direction }, out);
        let moved = first
            .iter()
            .any(|event| matches!(event, Event::PlayerMoved { .. }));

        if moved {
            let _ = self.execute(Command::MovePlayer { direction }, out);
        } else {
            log::info!("jump {direction:?} blocked on the first step");
        }
    }

    fn scan(&mut self, paid: bool, out: &mut Vec<Notice>) {
        let directions = Direction::ALL
            .into_iter()
            .filter(|&direction| query::is_trap(&self.world, direction))
            .collect();
        out.push(Notice::TrapScan { paid, directions });
        if paid {
            self.charge(-CHECK_COST, ScoreReason::TrapCheck, out);
        }
    }

    fn answer_detrap(&mut self, accept: bool, out: &mut Vec<Notice>) {
        if accept {
            let _ = self.execute(Command::RemoveTrap, out);
        } else {
            self.charge(-DECLINE_PENALTY, ScoreReason::DeclinedRemoval, out);
        }
        let _ = self.execute(Command::ClearPendingTrapCollision, out);
        self.phase = Phase::AwaitingCommand;
    }

    fn settle(&mut self, out: &mut Vec<Notice>) {
        if query::is_at_finish(&self.world) {
            out.push(Notice::ExitReached);
            self.finish(out);
        } else if self.quit_requested {
            self.finish(out);
        } else {
            out.push(Notice::ScoreNow(self.score));
        }
    }

    fn finish(&mut self, out: &mut Vec<Notice>) {
        let _ = self.execute(Command::EndGame, out);
        self.phase = Phase::Finished;
        out.push(Notice::GameOver(FinalReport {
            score: self.score,
            steps: query::steps(&self.world),
            commands_issued: self.commands_issued,
        }));
    }

    fn status(&self) -> StatusReport {
        StatusReport {
            score: self.score,
            steps: query::steps(&self.world),
            trap_collisions: query::trap_collisions(&self.world),
            collision_limit: COLLISION_LIMIT,
            trap_removals: query::trap_removals(&self.world),
        }
    }

    fn charge(&mut self, delta: i32, reason: ScoreReason, out: &mut Vec<Notice>) {
        self.score += delta;
        out.push(Notice::Charged { delta, reason });
    }

    /// Applies a world command, folds its score changes into the running
    /// total, and forwards the resulting events.
    fn execute(&mut self, command: Command, out: &mut Vec<Notice>) -> Vec<Event> {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        self.score += score_delta(&events);
        out.extend(events.iter().cloned().map(Notice::Engine));
        events
    }
}

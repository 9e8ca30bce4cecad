//! Player-facing wording for session notices.

use escape_room_core::{
    Direction, Event, FinishOutcome, FinishSide, Modifier, MoveRejection, ResetKind, ScoreReason,
    COLLISION_LIMIT, MAX_TRAP_REMOVALS, TRAP_REMOVAL_COST,
};
use escape_room_system_command_input::Vocabulary;
use escape_room_system_session::{Notice, StatusReport};

const HELP_TEXT: &str = "\
Commands:
  right|left|up|down (r|l|u|d)   move one cell
  t <direction>                  spring the trap next to you (+5, -5 if none)
  space|jump <direction>         jump two cells
  jr|jl|ju|jd, sr|sl|su|sd       jump or spring in one token
  pickup|p                       collect a prize (+10)
  find                           look for traps next to you
  check|c                        look for traps next to you (-1)
  removetrap|rt                  remove the trap you stand on (-5)
  score|status                   show score and counters
  replay                         score this attempt and play the board again
  restart                        new board, score back to 0
  quit|q                         end the game
  help|?|h                       show this text";

/// Text shown before reading a line in the given vocabulary.
pub(crate) fn prompt(vocabulary: Vocabulary) -> String {
    match vocabulary {
        Vocabulary::Commands => "> ".to_owned(),
        Vocabulary::Confirmation => format!("Detrap for {TRAP_REMOVAL_COST} points? (y/n): "),
    }
}

/// Line printed after a token is rejected.
pub(crate) const RETRY: &str = "Invalid input. Please try again";

/// Renders a notice for the player. Notices that need no text yield `None`.
pub(crate) fn describe(notice: &Notice) -> Option<String> {
    match notice {
        Notice::Engine(event) => describe_event(event),
        Notice::ModifierArmed(Modifier::Spring) => {
            Some("Spring mode: pick a direction.".to_owned())
        }
        Notice::ModifierArmed(Modifier::Jump) => Some("Jump mode: pick a direction.".to_owned()),
        Notice::TrapScan { paid, directions } => Some(describe_scan(*paid, directions)),
        Notice::Charged {
            delta,
            reason: ScoreReason::TrapCheck,
        } => Some(format!("Checking cost {} point.", -delta)),
        Notice::Charged {
            delta,
            reason: ScoreReason::DeclinedRemoval,
        } => Some(format!("The trap stays. Penalty {} point.", -delta)),
        Notice::Charged { .. } => None,
        Notice::Status(report) => Some(status_line(report)),
        Notice::Help => Some(HELP_TEXT.to_owned()),
        Notice::ScoreReset => Some("New board. Score reset to 0.".to_owned()),
        Notice::DetrapPrompt { .. } => None,
        Notice::ExitReached => Some("You found the exit.".to_owned()),
        Notice::ScoreNow(score) => Some(format!("Score now: {score}")),
        Notice::GameOver(report) => Some(format!(
            "Final score: {}\nTotal steps: {}\nCommands issued: {}",
            report.score, report.steps, report.commands_issued
        )),
    }
}

fn describe_event(event: &Event) -> Option<String> {
    let text = match event {
        Event::PlayerMoved { .. } => return None,
        Event::MoveBlocked {
            reason: MoveRejection::OffGrid,
            ..
        } => "OFF THE GRID!".to_owned(),
        Event::MoveBlocked {
            reason: MoveRejection::Wall,
            ..
        } => "A WALL IS IN THE WAY".to_owned(),
        Event::TrapCollision { collisions, .. } => {
            format!("TRAP COLLISION! ({collisions}/{COLLISION_LIMIT})")
        }
        Event::TrapSprung { .. } => "TRAP IS SPRUNG!".to_owned(),
        Event::NothingToSpring => "THERE IS NO TRAP HERE TO SPRING".to_owned(),
        Event::PrizeCollected { .. } => "YOU PICKED UP A PRIZE!".to_owned(),
        Event::NoPrizeHere => "OOPS, NO PRIZE HERE".to_owned(),
        Event::TrapRemoved { removals } => {
            format!("TRAP REMOVED! ({removals}/{MAX_TRAP_REMOVALS} removals used)")
        }
        Event::NoTrapToRemove => "NO TRAP HERE TO REMOVE!".to_owned(),
        Event::RemovalLimitReached => {
            "TRAP REMOVAL LIMIT REACHED! Traps are now permanent.".to_owned()
        }
        Event::ScoreAdjusted {
            delta,
            reason: ScoreReason::StandingOnTrap,
        } => format!("Still standing on a trap: {delta}"),
        Event::ScoreAdjusted { .. } => return None,
        Event::GameEvaluated { outcome } => match outcome {
            FinishOutcome::Escaped => "YOU MADE IT!".to_owned(),
            FinishOutcome::TooManyCollisions => {
                "TOO MANY TRAP COLLISIONS! Pay 5 points to finish anyway.".to_owned()
            }
            FinishOutcome::QuitEarly => "OOPS, YOU QUIT TOO SOON!".to_owned(),
        },
        Event::BoardReset { kind, finish } => {
            let what = match kind {
                ResetKind::Replay => "Board reset.",
                ResetKind::Restart => "New board generated.",
            };
            format!("{what} The exit is {}.", exit_label(*finish))
        }
    };
    Some(text)
}

fn describe_scan(paid: bool, directions: &[Direction]) -> String {
    let heading = if paid { "Check" } else { "Find Trap" };
    if directions.is_empty() {
        return format!("{heading}: no traps adjacent");
    }
    let labels: Vec<_> = directions.iter().map(|direction| direction.label()).collect();
    format!("{heading}: {}", labels.join(" "))
}

fn exit_label(finish: FinishSide) -> &'static str {
    match finish {
        FinishSide::Top => "top right",
        FinishSide::Bottom => "bottom right",
    }
}

/// Counters line shown by `status`.
fn status_line(report: &StatusReport) -> String {
    format!(
        "Score: {}, Steps: {}, Trap Collisions: {}/{}, Trap Removals: {}",
        report.score,
        report.steps,
        report.trap_collisions,
        report.collision_limit,
        report.trap_removals
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use escape_room_core::PixelPoint;
    use escape_room_system_session::FinalReport;

    #[test]
    fn status_line_matches_counter_format() {
        let report = StatusReport {
            score: 15,
            steps: 9,
            trap_collisions: 2,
            collision_limit: COLLISION_LIMIT,
            trap_removals: 1,
        };
        assert_eq!(
            status_line(&report),
            "Score: 15, Steps: 9, Trap Collisions: 2/6, Trap Removals: 1"
        );
    }

    #[test]
    fn engine_events_use_game_wording() {
        let blocked = Notice::Engine(Event::MoveBlocked {
            at: PixelPoint::new(15, 15),
            direction: Direction::Up,
            reason: MoveRejection::OffGrid,
        });
        assert_eq!(describe(&blocked).as_deref(), Some("OFF THE GRID!"));

        let collision = Notice::Engine(Event::TrapCollision {
            collisions: 3,
            removal_offered: true,
        });
        assert_eq!(
            describe(&collision).as_deref(),
            Some("TRAP COLLISION! (3/6)")
        );

        let removed = Notice::Engine(Event::TrapRemoved { removals: 2 });
        assert_eq!(
            describe(&removed).as_deref(),
            Some("TRAP REMOVED! (2/2 removals used)")
        );
    }

    #[test]
    fn silent_notices_produce_no_text() {
        let moved = Notice::Engine(Event::PlayerMoved {
            from: PixelPoint::new(15, 15),
            to: PixelPoint::new(75, 15),
        });
        assert_eq!(describe(&moved), None);
        assert_eq!(describe(&Notice::DetrapPrompt { cost: 5 }), None);
    }

    #[test]
    fn scan_lists_directions_in_order() {
        let scan = Notice::TrapScan {
            paid: false,
            directions: vec![Direction::Right, Direction::Down],
        };
        assert_eq!(
            describe(&scan).as_deref(),
            Some("Find Trap: right down")
        );

        let check = Notice::TrapScan {
            paid: true,
            directions: vec![Direction::Right],
        };
        assert_eq!(describe(&check).as_deref(), Some("Check: right"));

        let empty = Notice::TrapScan {
            paid: true,
            directions: Vec::new(),
        };
        assert_eq!(
            describe(&empty).as_deref(),
            Some("Check: no traps adjacent")
        );
    }

    #[test]
    fn running_score_line_reads_score_now() {
        assert_eq!(
            describe(&Notice::ScoreNow(-4)).as_deref(),
            Some("Score now: -4")
        );
    }

    #[test]
    fn game_over_reports_score_and_steps() {
        let over = Notice::GameOver(FinalReport {
            score: -10,
            steps: 4,
            commands_issued: 6,
        });
        assert_eq!(
            describe(&over).as_deref(),
            Some("Final score: -10\nTotal steps: 4\nCommands issued: 6")
        );
    }

    #[test]
    fn detrap_prompt_names_the_cost() {
        assert_eq!(
            prompt(Vocabulary::Confirmation),
            "Detrap for 5 points? (y/n): "
        );
    }
}

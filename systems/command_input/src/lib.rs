#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command vocabulary and validated line input for Escape Room.
//!
//! Raw lines come from any iterator of strings. The CLI feeds them through a
//! [`ChannelSource`] so that a producer thread can own stdin while the session
//! consumes commands one at a time.

use std::sync::mpsc::{self, Receiver, Sender};

use escape_room_core::{Direction, Input, Modifier};
use thiserror::Error;

const COMMAND_TOKENS: &[(&str, Input)] = &[
    ("right", Input::Direction(Direction::Right)),
    ("left", Input::Direction(Direction::Left)),
    ("up", Input::Direction(Direction::Up)),
    ("down", Input::Direction(Direction::Down)),
    ("r", Input::Direction(Direction::Right)),
    ("l", Input::Direction(Direction::Left)),
    ("u", Input::Direction(Direction::Up)),
    ("d", Input::Direction(Direction::Down)),
    ("t", Input::Arm(Modifier::Spring)),
    ("space", Input::Arm(Modifier::Jump)),
    ("jump", Input::Arm(Modifier::Jump)),
    ("jr", Input::Modified(Modifier::Jump, Direction::Right)),
    ("jl", Input::Modified(Modifier::Jump, Direction::Left)),
    ("jumpleft", Input::Modified(Modifier::Jump, Direction::Left)),
    ("ju", Input::Modified(Modifier::Jump, Direction::Up)),
    ("jumpup", Input::Modified(Modifier::Jump, Direction::Up)),
    ("jd", Input::Modified(Modifier::Jump, Direction::Down)),
    ("jumpdown", Input::Modified(Modifier::Jump, Direction::Down)),
    ("springr", Input::Modified(Modifier::Spring, Direction::Right)),
    ("springl", Input::Modified(Modifier::Spring, Direction::Left)),
    ("springu", Input::Modified(Modifier::Spring, Direction::Up)),
    ("springd", Input::Modified(Modifier::Spring, Direction::Down)),
    ("sr", Input::Modified(Modifier::Spring, Direction::Right)),
    ("sl", Input::Modified(Modifier::Spring, Direction::Left)),
    ("su", Input::Modified(Modifier::Spring, Direction::Up)),
    ("sd", Input::Modified(Modifier::Spring, Direction::Down)),
    ("pickup", Input::Pickup),
    ("p", Input::Pickup),
    ("find", Input::Find),
    ("check", Input::Check),
    ("c", Input::Check),
    ("removetrap", Input::RemoveTrap),
    ("rt", Input::RemoveTrap),
    ("yes", Input::Confirm(true)),
    ("no", Input::Confirm(false)),
    ("y", Input::Confirm(true)),
    ("n", Input::Confirm(false)),
    ("score", Input::Status),
    ("status", Input::Status),
    ("quit", Input::Quit),
    ("q", Input::Quit),
    ("replay", Input::Replay),
    ("restart", Input::Restart),
    ("help", Input::Help),
    ("?", Input::Help),
    ("h", Input::Help),
];

const CONFIRMATION_TOKENS: &[(&str, Input)] = &[
    ("y", Input::Confirm(true)),
    ("n", Input::Confirm(false)),
    ("yes", Input::Confirm(true)),
    ("no", Input::Confirm(false)),
];

/// Reasons a line was not accepted.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InputError {
    /// The line held nothing but whitespace.
    #[error("empty input")]
    Empty,
    /// The token is not part of the active vocabulary.
    #[error("unknown command `{0}`")]
    Unknown(String),
}

/// Closed set of tokens accepted at a prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// Everything accepted at the main command prompt.
    Commands,
    /// Only yes/no answers.
    Confirmation,
}

impl Vocabulary {
    fn table(self) -> &'static [(&'static str, Input)] {
        match self {
            Self::Commands => COMMAND_TOKENS,
            Self::Confirmation => CONFIRMATION_TOKENS,
        }
    }

    /// Trims and lower-cases the line, then looks the token up.
    pub fn parse(self, raw: &str) -> Result<Input, InputError> {
        let token = raw.trim().to_lowercase();
        if token.is_empty() {
            return Err(InputError::Empty);
        }
        self.table()
            .iter()
            .find(|(candidate, _)| *candidate == token)
            .map(|(_, input)| *input)
            .ok_or(InputError::Unknown(token))
    }
}

/// Pulls lines until one parses, reporting each rejection to `on_rejected`.
///
/// Returns `None` once the line source is exhausted.
pub fn next_input<I, F>(lines: &mut I, vocabulary: Vocabulary, mut on_rejected: F) -> Option<Input>
where
    I: Iterator<Item = String>,
    F: FnMut(&InputError),
{
    for line in lines {
        match vocabulary.parse(&line) {
            Ok(input) => return Some(input),
            Err(error) => {
                log::debug!("rejected input: {error}");
                on_rejected(&error);
            }
        }
    }
    None
}

/// Consumer half of the command channel.
///
/// Iteration blocks until the producer sends a line and ends once every
/// sender has been dropped.
#[derive(Debug)]
pub struct ChannelSource {
    receiver: Receiver<String>,
}

impl Iterator for ChannelSource {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.receiver.recv().ok()
    }
}

/// Creates a FIFO command channel between an input producer and the session.
#[must_use]
pub fn command_channel() -> (Sender<String>, ChannelSource) {
    let (sender, receiver) = mpsc::channel();
    (sender, ChannelSource { receiver })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalises_case_and_whitespace() {
        assert_eq!(
            Vocabulary::Commands.parse("  RIGHT \n"),
            Ok(Input::Direction(Direction::Right))
        );
        assert_eq!(
            Vocabulary::Commands.parse("SpringU"),
            Ok(Input::Modified(Modifier::Spring, Direction::Up))
        );
    }

    #[test]
    fn blank_lines_are_rejected_as_empty() {
        assert_eq!(Vocabulary::Commands.parse("   "), Err(InputError::Empty));
    }

    #[test]
    fn confirmation_vocabulary_only_accepts_answers() {
        assert_eq!(
            Vocabulary::Confirmation.parse("right"),
            Err(InputError::Unknown("right".to_owned()))
        );
        assert_eq!(Vocabulary::Confirmation.parse("Yes"), Ok(Input::Confirm(true)));
        assert_eq!(Vocabulary::Confirmation.parse("n"), Ok(Input::Confirm(false)));
    }

    #[test]
    fn command_tokens_are_unique() {
        let mut tokens: Vec<_> = COMMAND_TOKENS.iter().map(|(token, _)| *token).collect();
        let total = tokens.len();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), total);
    }
}

use std::thread;

use escape_room_core::{Direction, Input, Modifier};
use escape_room_system_command_input::{command_channel, next_input, InputError, Vocabulary};

fn lines(raw: &[&str]) -> std::vec::IntoIter<String> {
    raw.iter()
        .map(|line| (*line).to_owned())
        .collect::<Vec<_>>()
        .into_iter()
}

#[test]
fn retries_until_a_valid_token_arrives() {
    let mut source = lines(&["dance", "", "  Jr  ", "left"]);
    let mut rejected = Vec::new();

    let input = next_input(&mut source, Vocabulary::Commands, |error| {
        rejected.push(error.clone());
    });

    assert_eq!(input, Some(Input::Modified(Modifier::Jump, Direction::Right)));
    assert_eq!(
        rejected,
        vec![InputError::Unknown("dance".to_owned()), InputError::Empty]
    );
    assert_eq!(source.next().as_deref(), Some("left"));
}

#[test]
fn exhausted_source_yields_none() {
    let mut source = lines(&["maybe"]);
    let mut rejections = 0;
    let input = next_input(&mut source, Vocabulary::Confirmation, |_| rejections += 1);
    assert_eq!(input, None);
    assert_eq!(rejections, 1);
}

#[test]
fn every_movement_alias_parses() {
    for (token, direction) in [
        ("r", Direction::Right),
        ("l", Direction::Left),
        ("u", Direction::Up),
        ("d", Direction::Down),
    ] {
        assert_eq!(
            Vocabulary::Commands.parse(token),
            Ok(Input::Direction(direction))
        );
    }
    assert_eq!(
        Vocabulary::Commands.parse("space"),
        Ok(Input::Arm(Modifier::Jump))
    );
    assert_eq!(
        Vocabulary::Commands.parse("t"),
        Ok(Input::Arm(Modifier::Spring))
    );
}

#[test]
fn channel_delivers_in_order_and_closes_with_sender() {
    let (sender, mut source) = command_channel();
    let producer = thread::spawn(move || {
        for token in ["u", "bogus", "find", "q"] {
            sender.send(token.to_owned()).expect("receiver alive");
        }
    });

    let mut seen = Vec::new();
    while let Some(input) = next_input(&mut source, Vocabulary::Commands, |_| {}) {
        seen.push(input);
    }
    producer.join().expect("producer finished");

    assert_eq!(
        seen,
        vec![
            Input::Direction(Direction::Up),
            Input::Find,
            Input::Quit
        ]
    );
}

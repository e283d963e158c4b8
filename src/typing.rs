use crate::config::TypingTimings;
use crate::schedule::{Tick, Ticker};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Typing,
    Deleting,
}

/// Types each phrase one character at a time, holds it, deletes it, then moves
/// to the next phrase. Never finishes.
#[derive(Clone, Debug)]
pub struct TypingMachine {
    phrases: Vec<Vec<char>>,
    timings: TypingTimings,
    phrase_index: usize,
    char_count: usize,
    phase: Phase,
}

impl TypingMachine {
    /// Returns `None` when no non-empty phrase is left to type.
    pub fn new<I, S>(phrases: I, timings: TypingTimings) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<Vec<char>> = phrases
            .into_iter()
            .map(|phrase| phrase.as_ref().chars().collect::<Vec<_>>())
            .filter(|chars| !chars.is_empty())
            .collect();

        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases,
            timings,
            phrase_index: 0,
            char_count: 0,
            phase: Phase::Typing,
        })
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase_index
    }

    fn visible_text(&self, phrase: &[char]) -> String {
        phrase[..self.char_count].iter().collect()
    }
}

impl Ticker for TypingMachine {
    type Frame = String;

    fn tick(&mut self) -> Tick<String> {
        let phrase = &self.phrases[self.phrase_index];
        let len = phrase.len();

        match self.phase {
            Phase::Typing => {
                self.char_count += 1;
                let text = self.visible_text(phrase);
                if self.char_count == len {
                    self.phase = Phase::Deleting;
                    Tick::Continue(text, self.timings.hold)
                } else {
                    Tick::Continue(text, self.timings.type_interval)
                }
            }
            Phase::Deleting => {
                self.char_count -= 1;
                let text = self.visible_text(phrase);
                if self.char_count == 0 {
                    self.phase = Phase::Typing;
                    self.phrase_index = (self.phrase_index + 1) % self.phrases.len();
                    Tick::Continue(text, self.timings.type_interval)
                } else {
                    Tick::Continue(text, self.timings.delete_interval)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::drive;
    use std::ops::ControlFlow;
    use std::time::Duration;
    use tokio::time::{sleep, timeout, Instant};

    fn timings() -> TypingTimings {
        TypingTimings {
            start: Duration::from_millis(1_000),
            type_interval: Duration::from_millis(100),
            hold: Duration::from_millis(2_000),
            delete_interval: Duration::from_millis(50),
        }
    }

    fn frame_text(tick: Tick<String>) -> String {
        match tick {
            Tick::Continue(text, _) | Tick::Finish(text) => text,
        }
    }

    #[test]
    fn empty_phrase_list_disables_effect() {
        assert!(TypingMachine::new(Vec::<String>::new(), timings()).is_none());
        assert!(TypingMachine::new(["", ""], timings()).is_none());
    }

    #[test]
    fn each_phrase_is_fully_typed_then_fully_deleted_before_advancing() {
        let phrases = ["Dev", "Student", "Ü!"];
        let mut machine = TypingMachine::new(phrases, timings()).expect("phrases present");

        for round in 0..2 {
            for (index, phrase) in phrases.iter().enumerate() {
                assert_eq!(machine.phrase_index(), index);
                let count = phrase.chars().count();
                let mut shown = Vec::new();
                for _ in 0..(count * 2) {
                    shown.push(frame_text(machine.tick()));
                }

                assert_eq!(shown[count - 1], *phrase, "round {round}");
                assert_eq!(shown.last().map(String::as_str), Some(""), "round {round}");
                assert!(shown[..count].windows(2).all(|pair| pair[1].starts_with(&pair[0])));
            }
        }
    }

    #[test]
    fn delays_follow_typing_hold_and_delete_cadence() {
        let mut machine = TypingMachine::new(["ab"], timings()).expect("phrase present");

        assert_eq!(machine.tick(), Tick::Continue("a".to_string(), Duration::from_millis(100)));
        assert_eq!(machine.tick(), Tick::Continue("ab".to_string(), Duration::from_millis(2_000)));
        assert_eq!(machine.tick(), Tick::Continue("a".to_string(), Duration::from_millis(50)));
        assert_eq!(machine.tick(), Tick::Continue(String::new(), Duration::from_millis(100)));
        assert_eq!(machine.tick(), Tick::Continue("a".to_string(), Duration::from_millis(100)));
    }

    #[tokio::test(start_paused = true)]
    async fn driven_machine_renders_on_virtual_clock() {
        let machine = TypingMachine::new(["Hi", "Yo"], timings()).expect("phrases present");
        let started = Instant::now();
        let mut frames = Vec::new();

        let _ = timeout(
            Duration::from_millis(2_300),
            drive(machine, sleep, |text| {
                frames.push((started.elapsed().as_millis(), text));
                ControlFlow::Continue(())
            }),
        )
        .await;

        let expected: Vec<(u128, String)> = vec![
            (0, "H".into()),
            (100, "Hi".into()),
            (2_100, "H".into()),
            (2_150, "".into()),
            (2_250, "Y".into()),
        ];
        assert_eq!(frames, expected);
    }
}

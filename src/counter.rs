use std::time::Duration;

use crate::schedule::{Tick, Ticker};

/// Nominal spacing of animation frames (~60 updates per second).
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Linear count from 0 up to `target`, clamped so the last frame is exactly the
/// target.
#[derive(Clone, Debug)]
pub struct CounterAnimation {
    target: u64,
    current: f64,
    increment: f64,
}

impl CounterAnimation {
    pub fn new(target: u64, duration: Duration) -> Self {
        let frames = (duration.as_secs_f64() / FRAME_INTERVAL.as_secs_f64()).max(1.0);
        Self {
            target,
            current: 0.0,
            increment: target as f64 / frames,
        }
    }
}

impl Ticker for CounterAnimation {
    type Frame = u64;

    fn tick(&mut self) -> Tick<u64> {
        self.current += self.increment;
        if self.current < self.target as f64 {
            Tick::Continue(self.current.floor() as u64, FRAME_INTERVAL)
        } else {
            Tick::Finish(self.target)
        }
    }
}

pub fn parse_counter_target(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

/// Skill bar fill in percent, clamped to `0..=100`.
pub fn parse_skill_width(raw: &str) -> Option<f64> {
    raw.trim()
        .trim_end_matches('%')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.clamp(0.0, 100.0))
}

pub fn skill_width_style(percent: f64) -> String {
    format!("width: {percent}%;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_end(target: u64) -> Vec<u64> {
        let mut animation = CounterAnimation::new(target, Duration::from_millis(2_000));
        let mut shown = Vec::new();
        loop {
            match animation.tick() {
                Tick::Continue(value, delay) => {
                    assert_eq!(delay, FRAME_INTERVAL);
                    shown.push(value);
                }
                Tick::Finish(value) => {
                    shown.push(value);
                    return shown;
                }
            }
        }
    }

    #[test]
    fn counts_are_monotonic_and_stop_exactly_at_target() {
        for target in [0, 1, 7, 50, 125, 999, 12_345] {
            let shown = run_to_end(target);

            assert_eq!(shown.last(), Some(&target), "target {target}");
            assert!(shown.windows(2).all(|pair| pair[0] <= pair[1]), "target {target}");
            assert!(shown.iter().all(|value| *value <= target), "target {target}");
        }
    }

    #[test]
    fn zero_target_finishes_on_first_frame() {
        assert_eq!(run_to_end(0), vec![0]);
    }

    #[test]
    fn animation_spans_about_two_seconds_of_frames() {
        let frames = run_to_end(1_000).len();

        assert!((124..=126).contains(&frames), "got {frames} frames");
    }

    #[test]
    fn counter_targets_parse_as_integers() {
        assert_eq!(parse_counter_target(" 42 "), Some(42));
        assert_eq!(parse_counter_target("-3"), None);
        assert_eq!(parse_counter_target("many"), None);
    }

    #[test]
    fn skill_widths_clamp_to_percentage_range() {
        assert_eq!(parse_skill_width("85"), Some(85.0));
        assert_eq!(parse_skill_width("72.5%"), Some(72.5));
        assert_eq!(parse_skill_width("140"), Some(100.0));
        assert_eq!(parse_skill_width("-5"), Some(0.0));
        assert_eq!(parse_skill_width("NaN"), None);
        assert_eq!(parse_skill_width(""), None);
        assert_eq!(skill_width_style(85.0), "width: 85%;");
    }
}

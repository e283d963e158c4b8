const FOLLOW_FACTOR: f64 = 0.1;

/// Elements that enlarge the cursor on hover.
pub const HOVER_TARGETS: &str = "a, button, .skill-item, .floating-element";
pub const HOVER_SCALE: &str = "scale(1.5)";
pub const REST_SCALE: &str = "scale(1)";

const SKILL_LIFTED: &str = "translateY(-10px) scale(1.05)";
const SKILL_RESTING: &str = "translateY(0) scale(1)";

/// Transform for a `.skill-item` while the pointer is over it or not.
pub fn skill_hover_transform(hovered: bool) -> &'static str {
    if hovered {
        SKILL_LIFTED
    } else {
        SKILL_RESTING
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Trailing cursor layer that closes 10% of the remaining gap each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Follower {
    position: Point,
}

impl Follower {
    pub fn step(&mut self, pointer: Point) -> Point {
        self.position.x += (pointer.x - self.position.x) * FOLLOW_FACTOR;
        self.position.y += (pointer.y - self.position.y) * FOLLOW_FACTOR;
        self.position
    }

    pub fn position(&self) -> Point {
        self.position
    }
}

/// The custom cursor only runs on viewports wider than the breakpoint.
pub fn cursor_enabled(viewport_width: f64, breakpoint_px: u32) -> bool {
    viewport_width > f64::from(breakpoint_px)
}

/// Size and placement of a click ripple, relative to the button.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ripple {
    pub size: f64,
    pub left: f64,
    pub top: f64,
}

impl Ripple {
    /// `rect` is `(left, top, width, height)` of the button in client space.
    pub fn at(rect: (f64, f64, f64, f64), client_x: f64, client_y: f64) -> Self {
        let (left, top, width, height) = rect;
        let size = width.max(height);
        Self {
            size,
            left: client_x - left - size / 2.0,
            top: client_y - top - size / 2.0,
        }
    }

    pub fn style(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}px; top: {top}px;",
            size = self.size,
            left = self.left,
            top = self.top,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follower_closes_ten_percent_of_the_gap() {
        let mut follower = Follower::default();

        let first = follower.step(Point::new(100.0, -50.0));
        assert!((first.x - 10.0).abs() < 1e-9);
        assert!((first.y - -5.0).abs() < 1e-9);

        let second = follower.step(Point::new(100.0, -50.0));
        assert!((second.x - 19.0).abs() < 1e-9);
    }

    #[test]
    fn follower_converges_without_overshooting() {
        let target = Point::new(640.0, 360.0);
        let mut follower = Follower::default();
        let mut previous_gap = f64::MAX;
        let mut position = Point::default();

        for _ in 0..200 {
            position = follower.step(target);
            assert!(position.x <= target.x && position.y <= target.y);
            let gap = target.x - position.x;
            assert!(gap < previous_gap);
            previous_gap = gap;
        }

        assert!(previous_gap < 0.01);
        assert_eq!(follower.position(), position);
    }

    #[test]
    fn cursor_disabled_at_and_below_breakpoint() {
        assert!(!cursor_enabled(768.0, 768));
        assert!(!cursor_enabled(375.0, 768));
        assert!(cursor_enabled(769.0, 768));
    }

    #[test]
    fn skill_items_lift_only_while_hovered() {
        assert_eq!(skill_hover_transform(true), "translateY(-10px) scale(1.05)");
        assert_eq!(skill_hover_transform(false), "translateY(0) scale(1)");
    }

    #[test]
    fn ripple_centers_on_pointer() {
        let ripple = Ripple::at((10.0, 20.0, 120.0, 40.0), 70.0, 40.0);

        assert_eq!(ripple.size, 120.0);
        assert_eq!(ripple.left, 0.0);
        assert_eq!(ripple.top, -40.0);
        assert_eq!(ripple.style(), "width: 120px; height: 120px; left: 0px; top: -40px;");
    }
}

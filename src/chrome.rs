const SCROLLED_THRESHOLD_PX: f64 = 100.0;
const HIDE_HEADER_THRESHOLD_PX: f64 = 200.0;
const BACK_TO_TOP_THRESHOLD_PX: f64 = 300.0;
const PARALLAX_RATE: f64 = -0.5;
const PARALLAX_SPEED_STEP: f64 = 0.1;

/// What the header and back-to-top control should look like at one scroll
/// offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChromeView {
    pub scrolled: bool,
    pub header_hidden: bool,
    pub back_to_top_visible: bool,
}

impl ChromeView {
    pub fn header_transform(&self) -> &'static str {
        if self.header_hidden {
            "transform: translateY(-100%);"
        } else {
            "transform: translateY(0);"
        }
    }
}

/// Remembers the previous scroll offset so direction can be derived.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollChrome {
    last_y: f64,
}

impl ScrollChrome {
    pub fn new(initial_y: f64) -> Self {
        Self { last_y: initial_y }
    }

    pub fn on_scroll(&mut self, y: f64) -> ChromeView {
        let view = ChromeView {
            scrolled: y > SCROLLED_THRESHOLD_PX,
            header_hidden: y > self.last_y && y > HIDE_HEADER_THRESHOLD_PX,
            back_to_top_visible: y > BACK_TO_TOP_THRESHOLD_PX,
        };
        self.last_y = y;
        view
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }
}

/// Vertical offset for the `index`-th parallax element.
pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    scroll_y * PARALLAX_RATE * ((index + 1) as f64 * PARALLAX_SPEED_STEP)
}

pub fn parallax_transform(scroll_y: f64, index: usize) -> String {
    format!("translateY({}px)", parallax_offset(scroll_y, index))
}

/// Returns the element id for an in-page anchor, or `None` for `#` and
/// non-fragment links.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll offset that puts a section just below the fixed header.
pub fn anchor_scroll_top(target_offset_top: f64, header_height: f64) -> f64 {
    target_offset_top - header_height
}

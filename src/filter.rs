use std::time::Duration;

const WILDCARDS: &[&str] = &["*", "all"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterTag {
    All,
    Category(String),
}

impl FilterTag {
    /// Reads a `data-filter` value. `*`/`all` are the wildcard and a leading `.`
    /// (class-selector style) is ignored.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || WILDCARDS.contains(&trimmed) {
            return Self::All;
        }
        Self::Category(trimmed.trim_start_matches('.').to_string())
    }

    pub fn as_attr(&self) -> &str {
        match self {
            Self::All => "*",
            Self::Category(category) => category,
        }
    }

    pub fn matches<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => categories.iter().any(|item| item.as_ref() == category),
        }
    }
}

/// One control per tag: the wildcard first, then `categories` in order.
pub fn filter_controls<S: AsRef<str>>(categories: &[S]) -> Vec<FilterTag> {
    let categories = categories
        .iter()
        .map(|category| FilterTag::parse(category.as_ref()))
        .filter(|tag| tag != &FilterTag::All);
    std::iter::once(FilterTag::All).chain(categories).collect()
}

impl FilterTag {
    /// Button text: `All`, or the category with its first letter capitalized.
    pub fn label(&self) -> String {
        match self {
            Self::All => "All".to_string(),
            Self::Category(category) => {
                let mut chars = category.chars();
                chars
                    .next()
                    .map(|first| first.to_uppercase().chain(chars).collect())
                    .unwrap_or_default()
            }
        }
    }
}

/// Visual state of one portfolio item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemView {
    /// `hidden` class: starts the fade transition.
    pub faded: bool,
    /// `display` other than `none`.
    pub displayed: bool,
}

impl ItemView {
    const SHOWN: Self = Self {
        faded: false,
        displayed: true,
    };
}

/// A display change that must wait for the fade transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredDisplay {
    pub generation: u64,
    pub item: usize,
    pub displayed: bool,
    pub delay: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterTimings {
    pub show_delay: Duration,
    pub hide_delay: Duration,
}

/// Active filter plus the visibility of every item.
///
/// Each activation bumps `generation`; deferred changes from an older
/// generation are dropped by [`FilterBoard::settle`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterBoard {
    active: FilterTag,
    items: Vec<Vec<String>>,
    views: Vec<ItemView>,
    generation: u64,
}

impl FilterBoard {
    pub fn new(items: Vec<Vec<String>>) -> Self {
        let views = vec![ItemView::SHOWN; items.len()];
        Self {
            active: FilterTag::All,
            items,
            views,
            generation: 0,
        }
    }

    pub fn active(&self) -> &FilterTag {
        &self.active
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn views(&self) -> &[ItemView] {
        &self.views
    }

    /// Applies the immediate half of a filter change and returns the display
    /// changes to apply once their delay elapses.
    pub fn activate(&mut self, tag: FilterTag, timings: FilterTimings) -> Vec<DeferredDisplay> {
        self.generation += 1;
        let generation = self.generation;
        let mut deferred = Vec::with_capacity(self.items.len());

        for (index, categories) in self.items.iter().enumerate() {
            let matched = tag.matches(categories);
            self.views[index].faded = !matched;
            deferred.push(DeferredDisplay {
                generation,
                item: index,
                displayed: matched,
                delay: if matched {
                    timings.show_delay
                } else {
                    timings.hide_delay
                },
            });
        }

        self.active = tag;
        deferred
    }

    /// Returns `false` when the change is stale or points past the item list.
    pub fn settle(&mut self, change: DeferredDisplay) -> bool {
        if change.generation != self.generation {
            return false;
        }
        let Some(view) = self.views.get_mut(change.item) else {
            return false;
        };
        view.displayed = change.displayed;
        true
    }
}

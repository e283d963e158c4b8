/// Single-open accordion. `None` means every entry is closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Accordion {
    open: Option<usize>,
}

impl Accordion {
    /// Closes every other entry, then flips `index`.
    pub fn toggle(self, index: usize) -> Self {
        let open = match self.open {
            Some(current) if current == index => None,
            _ => Some(index),
        };
        Self { open }
    }

    pub fn is_open(&self, index: usize) -> bool {
        self.open == Some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENTRIES: usize = 5;

    fn snapshot(accordion: Accordion) -> Vec<bool> {
        (0..ENTRIES).map(|index| accordion.is_open(index)).collect()
    }

    #[test]
    fn clicking_negates_target_and_closes_all_others() {
        let clicks = [2, 2, 0, 4, 1, 1, 1, 3];
        let mut accordion = Accordion::default();

        for clicked in clicks {
            let before = snapshot(accordion);
            accordion = accordion.toggle(clicked);
            let after = snapshot(accordion);

            assert_eq!(after[clicked], !before[clicked], "click {clicked}");
            for (index, open) in after.iter().enumerate() {
                if index != clicked {
                    assert!(!open, "entry {index} left open after clicking {clicked}");
                }
            }
        }
    }

    #[test]
    fn clicking_the_open_entry_closes_everything() {
        let accordion = Accordion::default().toggle(3).toggle(3);

        assert_eq!(accordion, Accordion::default());
    }
}

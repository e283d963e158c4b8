use std::future::Future;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;
use yew::prelude::*;

use super::dom::{Subscription, VisibilityOptions};
use crate::catalog::Catalog;
use crate::config::PageConfig;
use crate::log::{log_event, LogLevel};
use crate::schedule::TaskSet;

/// Read-only state shared by every section of the page.
#[derive(Clone, PartialEq)]
pub struct PageContext {
    pub config: Rc<PageConfig>,
    pub catalog: Rc<Catalog>,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            config: Rc::new(PageConfig::default()),
            catalog: Rc::new(Catalog::default()),
        }
    }
}

#[hook]
pub fn use_page() -> PageContext {
    use_context::<PageContext>().unwrap_or_default()
}

/// Spawns `task` on the local executor, registered in `tasks` so dropping the
/// set cancels it.
pub fn spawn_tracked<F>(tasks: &mut TaskSet, task: F)
where
    F: Future<Output = ()> + 'static,
{
    spawn_local(tasks.track(task));
}

/// `true` from the first time `node` scrolls into view. The observer stops
/// watching after it fires and is disconnected on unmount.
#[hook]
pub fn use_first_visible(node: NodeRef, options: VisibilityOptions, feature: &'static str) -> bool {
    let visible = use_state(|| false);
    let page = use_page();

    {
        let visible = visible.clone();
        use_effect_with(node, move |node| {
            let subscription = node.cast::<Element>().and_then(|element| {
                Subscription::observe_once(&element, options, move || visible.set(true))
            });
            if subscription.is_none() {
                log_event(
                    &page.config,
                    LogLevel::Debug,
                    "feature_skipped",
                    serde_json::json!({ "feature": feature, "reason": "not_observable" }),
                );
            }
            move || drop(subscription)
        });
    }

    *visible
}

/// `animate-in` marker for reveal-on-scroll sections.
#[hook]
pub fn use_reveal(node: NodeRef) -> Option<&'static str> {
    use_first_visible(node, VisibilityOptions::REVEAL, "reveal")
        .then_some("animate-in")
}

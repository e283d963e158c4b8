use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, MouseEvent, Node};
use yew::prelude::*;

use super::dom::{self, Listener};
use super::hooks::{spawn_tracked, use_page};
use crate::chrome::{anchor_fragment, anchor_scroll_top, parallax_transform, ChromeView, MenuState, ScrollChrome};
use crate::config::PageConfig;
use crate::log::{log_event, LogLevel};
use crate::pointer::Ripple;
use crate::schedule::TaskSet;

const NAV_LINKS: &[(&str, &str)] = &[
    ("#home", "Home"),
    ("#about", "About"),
    ("#skills", "Skills"),
    ("#portfolio", "Portfolio"),
    ("#faq", "FAQ"),
    ("#contact", "Contact"),
];
const PARALLAX_SELECTOR: &str = ".shape, .floating-element";
const FLOATING_DELAY_STEP_S: f64 = 0.5;
const SHAPE_DELAY_STEP_S: f64 = 1.5;

#[derive(Clone, Copy, PartialEq, Eq)]
enum LoadingPhase {
    Visible,
    Fading,
    Gone,
}

#[function_component(LoadingScreen)]
pub fn loading_screen() -> Html {
    let page = use_page();
    let phase = use_state_eq(|| LoadingPhase::Visible);

    {
        let phase = phase.clone();
        let config = page.config.clone();
        use_effect_with((), move |_| {
            let mut tasks = TaskSet::default();
            spawn_tracked(&mut tasks, async move {
                dom::window_loaded().await;
                dom::sleep(config.loading_delay).await;
                phase.set(LoadingPhase::Fading);
                dom::sleep(config.loading_fade).await;
                phase.set(LoadingPhase::Gone);
            });
            move || drop(tasks)
        });
    }

    let style = if *phase == LoadingPhase::Gone { "display: none;" } else { "" };

    html! {
        <div
            id="loading-screen"
            class={classes!("loading-screen", (*phase != LoadingPhase::Visible).then_some("hidden"))}
            style={style}
            aria-hidden="true"
        >
            <div class="loader"></div>
        </div>
    }
}

fn contains_target(node: &NodeRef, target: &Node) -> bool {
    node.cast::<Node>()
        .map(|node| node.contains(Some(target)))
        .unwrap_or(false)
}

fn set_body_class(class: &str, on: bool) {
    if let Some(body) = dom::body() {
        let _ = body.class_list().toggle_with_force(class, on);
    }
}

#[function_component(SiteHeader)]
pub fn site_header() -> Html {
    let menu = use_state_eq(MenuState::default);
    let view = use_state_eq(ChromeView::default);
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let view = view.clone();
        use_effect_with((), move |_| {
            let mut chrome = ScrollChrome::new(dom::scroll_y());
            let listener = Listener::on_window("scroll", move |_| {
                view.set(chrome.on_scroll(dom::scroll_y()));
            });
            move || drop(listener)
        });
    }

    {
        let menu = menu.clone();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with((), move |_| {
            let listener = Listener::on_document("click", move |event| {
                let Some(target) = event.target().and_then(|t| t.dyn_into::<Node>().ok()) else {
                    return;
                };
                if !contains_target(&menu_ref, &target) && !contains_target(&toggle_ref, &target) {
                    menu.set(MenuState::closed());
                }
            });
            move || drop(listener)
        });
    }

    use_effect_with(menu.open, |open| {
        set_body_class("nav-open", *open);
        || set_body_class("nav-open", false)
    });

    let on_toggle = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set((*menu).toggled()))
    };
    let on_link = {
        let menu = menu.clone();
        Callback::from(move |_: MouseEvent| menu.set(MenuState::closed()))
    };
    let open = menu.open;

    html! {
        <header
            id="header"
            class={classes!("header", view.scrolled.then_some("scrolled"))}
            style={view.header_transform()}
        >
            <nav class="nav container" aria-label="Primary">
                <a href="#home" class="nav-logo">{"Tobias"}<span>{"."}</span></a>
                <ul id="nav-menu" ref={menu_ref} class={classes!("nav-menu", open.then_some("active"))}>
                    { for NAV_LINKS.iter().map(|(href, label)| html! {
                        <li class="nav-item">
                            <a href={*href} class="nav-link" onclick={on_link.clone()}>{*label}</a>
                        </li>
                    }) }
                </ul>
                <button
                    id="nav-toggle"
                    ref={toggle_ref}
                    type="button"
                    class={classes!("nav-toggle", open.then_some("active"))}
                    aria-label="Toggle navigation"
                    aria-controls="nav-menu"
                    aria-expanded={open.to_string()}
                    onclick={on_toggle}
                >
                    <span class="bar"></span>
                    <span class="bar"></span>
                    <span class="bar"></span>
                </button>
            </nav>
        </header>
    }
}

#[function_component(BackToTop)]
pub fn back_to_top() -> Html {
    let visible = use_state_eq(|| false);

    {
        let visible = visible.clone();
        use_effect_with((), move |_| {
            let mut chrome = ScrollChrome::new(dom::scroll_y());
            let listener = Listener::on_window("scroll", move |_| {
                visible.set(chrome.on_scroll(dom::scroll_y()).back_to_top_visible);
            });
            move || drop(listener)
        });
    }

    let onclick = Callback::from(|event: MouseEvent| {
        event.prevent_default();
        dom::smooth_scroll_to(0.0);
    });

    html! {
        <a
            id="back-to-top"
            href="#home"
            class={classes!("back-to-top", visible.then_some("visible"))}
            aria-label="Back to top"
            onclick={onclick}
        >
            {"↑"}
        </a>
    }
}

/// Smooth-scrolls to the anchor's section, offset by the header height.
fn follow_anchor(event: &web_sys::Event, anchor: &Element) {
    let Some(id) = anchor.get_attribute("href").and_then(|href| anchor_fragment(&href).map(str::to_string)) else {
        return;
    };
    let Some(document) = dom::document() else {
        return;
    };
    let Some(section) = document
        .get_element_by_id(&id)
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    event.prevent_default();
    let header_height = document
        .get_element_by_id("header")
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        .map(|header| f64::from(header.offset_height()))
        .unwrap_or(0.0);
    dom::smooth_scroll_to(anchor_scroll_top(f64::from(section.offset_top()), header_height));
}

fn spawn_ripple(event: &web_sys::Event, button: &Element, config: &PageConfig, tasks: &RefCell<TaskSet>) {
    let Some(mouse) = event.dyn_ref::<web_sys::MouseEvent>() else {
        return;
    };
    let Some(document) = dom::document() else {
        return;
    };
    let Ok(ripple) = document.create_element("span") else {
        return;
    };

    let rect = button.get_bounding_client_rect();
    let geometry = Ripple::at(
        (rect.left(), rect.top(), rect.width(), rect.height()),
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    );
    let _ = ripple.set_attribute("style", &geometry.style());
    let _ = ripple.class_list().add_1("ripple");
    if button.append_child(&ripple).is_err() {
        return;
    }

    let lifetime = config.ripple_lifetime;
    spawn_tracked(&mut tasks.borrow_mut(), async move {
        dom::sleep(lifetime).await;
        ripple.remove();
    });
}

fn stagger_animation_delays(selector: &str, step_seconds: f64) {
    for (index, element) in dom::query_all(selector).iter().enumerate() {
        dom::set_style(element, "animation-delay", &format!("{}s", index as f64 * step_seconds));
    }
}

fn init_animation_library(config: &PageConfig) {
    let Some(win) = web_sys::window() else {
        return;
    };
    let Ok(library) = js_sys::Reflect::get(&win, &JsValue::from_str("AOS")) else {
        return;
    };
    if library.is_undefined() || library.is_null() {
        log_event(
            config,
            LogLevel::Debug,
            "feature_skipped",
            serde_json::json!({ "feature": "aos", "reason": "library_missing" }),
        );
        return;
    }

    let options = js_sys::Object::new();
    let entries: [(&str, JsValue); 5] = [
        ("duration", JsValue::from_f64(800.0)),
        ("easing", JsValue::from_str("ease-in-out")),
        ("once", JsValue::TRUE),
        ("mirror", JsValue::FALSE),
        ("offset", JsValue::from_f64(100.0)),
    ];
    for (key, value) in entries {
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str(key), &value);
    }
    dom::call_optional_method(&library, "init", &options);
}

/// Page-wide wiring that is not tied to one section: parallax, anchor
/// scrolling, button ripples, the animation library and pausing CSS animations
/// while the tab is hidden.
#[hook]
pub fn use_page_effects(config: Rc<PageConfig>) {
    use_effect_with(config, |config| {
        let config = config.clone();
        init_animation_library(&config);
        stagger_animation_delays(".floating-element", FLOATING_DELAY_STEP_S);
        stagger_animation_delays(".shape", SHAPE_DELAY_STEP_S);

        let tasks = Rc::new(RefCell::new(TaskSet::default()));
        let parallax_targets = dom::query_all(PARALLAX_SELECTOR);
        let mut listeners = Vec::new();

        listeners.push(Listener::on_window("scroll", move |_| {
            let scrolled = dom::scroll_y();
            for (index, element) in parallax_targets.iter().enumerate() {
                dom::set_style(element, "transform", &parallax_transform(scrolled, index));
            }
        }));

        {
            let tasks = tasks.clone();
            let config = config.clone();
            listeners.push(Listener::on_document("click", move |event| {
                let Some(target) = dom::target_element(&event) else {
                    return;
                };
                if let Ok(Some(anchor)) = target.closest("a[href^=\"#\"]") {
                    follow_anchor(&event, &anchor);
                }
                if let Ok(Some(button)) = target.closest(".btn") {
                    spawn_ripple(&event, &button, &config, &tasks);
                }
            }));
        }

        listeners.push(Listener::on_document("visibilitychange", |_| {
            let hidden = dom::document().map(|d| d.hidden()).unwrap_or(false);
            if let Some(body) = dom::body() {
                let state = if hidden { "paused" } else { "running" };
                dom::set_style(&body, "animation-play-state", state);
            }
        }));

        move || {
            drop(listeners);
            tasks.borrow_mut().abort_all();
        }
    });
}

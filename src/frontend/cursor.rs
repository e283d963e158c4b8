use std::cell::Cell;
use std::rc::Rc;
use web_sys::{HtmlElement, MouseEvent};
use wasm_bindgen::JsCast;
use yew::prelude::*;

use super::dom::{self, Listener};
use super::hooks::{spawn_tracked, use_page};
use crate::pointer::{cursor_enabled, Follower, Point, HOVER_SCALE, HOVER_TARGETS, REST_SCALE};
use crate::schedule::TaskSet;

fn place(element: &HtmlElement, point: Point) {
    dom::set_style(element, "left", &format!("{}px", point.x));
    dom::set_style(element, "top", &format!("{}px", point.y));
}

/// Point cursor plus an eased follower. Both are hidden and the frame loop is
/// stopped at or below the configured breakpoint.
#[function_component(CursorLayer)]
pub fn cursor_layer() -> Html {
    let page = use_page();
    let breakpoint = page.config.cursor_breakpoint_px;
    let enabled = use_state_eq(|| cursor_enabled(dom::viewport_width(), breakpoint));
    let cursor_ref = use_node_ref();
    let follower_ref = use_node_ref();

    {
        let enabled = enabled.clone();
        use_effect_with(breakpoint, move |breakpoint| {
            let breakpoint = *breakpoint;
            enabled.set(cursor_enabled(dom::viewport_width(), breakpoint));
            let listener = Listener::on_window("resize", move |_| {
                enabled.set(cursor_enabled(dom::viewport_width(), breakpoint));
            });
            move || drop(listener)
        });
    }

    {
        let cursor_ref = cursor_ref.clone();
        let follower_ref = follower_ref.clone();
        use_effect_with(*enabled, move |enabled| {
            let mut tasks = TaskSet::default();
            let mut listeners = Vec::new();

            let layers = cursor_ref
                .cast::<HtmlElement>()
                .zip(follower_ref.cast::<HtmlElement>());
            if let (true, Some((cursor, follower))) = (*enabled, layers) {
                let pointer = Rc::new(Cell::new(Point::default()));

                {
                    let pointer = pointer.clone();
                    listeners.push(Listener::on_document("mousemove", move |event| {
                        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                            pointer.set(Point::new(f64::from(mouse.client_x()), f64::from(mouse.client_y())));
                        }
                    }));
                }

                {
                    let cursor = cursor.clone();
                    let follower = follower.clone();
                    listeners.push(Listener::on_document("mouseover", move |event| {
                        let hovering = dom::target_element(&event)
                            .and_then(|target| target.closest(HOVER_TARGETS).ok().flatten())
                            .is_some();
                        let scale = if hovering { HOVER_SCALE } else { REST_SCALE };
                        dom::set_style(&cursor, "transform", scale);
                        dom::set_style(&follower, "transform", scale);
                    }));
                }

                spawn_tracked(&mut tasks, async move {
                    let mut trail = Follower::default();
                    loop {
                        dom::next_frame().await;
                        let target = pointer.get();
                        place(&cursor, target);
                        place(&follower, trail.step(target));
                    }
                });
            }

            move || {
                drop(listeners);
                drop(tasks);
            }
        });
    }

    let style = if *enabled { "display: block;" } else { "display: none;" };

    html! {
        <>
            <div class="cursor" ref={cursor_ref} style={style} aria-hidden="true"></div>
            <div class="cursor-follower" ref={follower_ref} style={style} aria-hidden="true"></div>
        </>
    }
}

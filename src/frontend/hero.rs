use std::ops::ControlFlow;
use yew::prelude::*;

use super::dom;
use super::hooks::{spawn_tracked, use_page, use_reveal};
use crate::log::{log_event, LogLevel};
use crate::schedule::{drive, TaskSet};
use crate::typing::TypingMachine;

const SHAPES: usize = 4;
const FLOATING_BADGES: &[&str] = &["Rust", "JavaScript", "CSS", "Git"];

#[function_component(Hero)]
pub fn hero() -> Html {
    let page = use_page();
    let subtitle = use_state_eq(String::new);
    let subtitle_ref = use_node_ref();
    let greeting_ref = use_node_ref();
    let title_ref = use_node_ref();
    let subtitle_line_ref = use_node_ref();
    let actions_ref = use_node_ref();
    let greeting_reveal = use_reveal(greeting_ref.clone());
    let title_reveal = use_reveal(title_ref.clone());
    let subtitle_reveal = use_reveal(subtitle_line_ref.clone());
    let actions_reveal = use_reveal(actions_ref.clone());

    {
        let subtitle = subtitle.clone();
        let subtitle_ref = subtitle_ref.clone();
        let config = page.config.clone();
        use_effect_with(page.config.clone(), move |_| {
            let mut tasks = TaskSet::default();
            match TypingMachine::new(&config.typing_phrases, config.typing) {
                Some(machine) => {
                    let start = config.typing.start;
                    spawn_tracked(&mut tasks, async move {
                        dom::sleep(start).await;
                        drive(machine, dom::sleep, move |text| {
                            if subtitle_ref.get().is_none() {
                                return ControlFlow::Break(());
                            }
                            subtitle.set(text);
                            ControlFlow::Continue(())
                        })
                        .await;
                    });
                }
                None => log_event(
                    &config,
                    LogLevel::Debug,
                    "feature_skipped",
                    serde_json::json!({ "feature": "typing", "reason": "no_phrases" }),
                ),
            }
            move || drop(tasks)
        });
    }

    html! {
        <section id="home" class="hero">
            <div class="hero-shapes" aria-hidden="true">
                { for (0..SHAPES).map(|index| html! {
                    <div class={classes!("shape", format!("shape-{}", index + 1))}></div>
                }) }
            </div>
            <div class="hero-content container">
                <p class={classes!("hero-greeting", greeting_reveal)} ref={greeting_ref} data-aos="fade-up">
                    {"Hello, I'm"}
                </p>
                <h1 class={classes!("hero-title", title_reveal)} ref={title_ref} data-aos="fade-up">
                    {"Tobias Verbeek"}
                </h1>
                <p class={classes!("hero-subtitle", subtitle_reveal)} ref={subtitle_line_ref} data-aos="fade-up">
                    <span class="subtitle-text" ref={subtitle_ref}>{(*subtitle).clone()}</span>
                    <span class="subtitle-cursor" aria-hidden="true">{"|"}</span>
                </p>
                <div class={classes!("hero-actions", actions_reveal)} ref={actions_ref} data-aos="fade-up">
                    <a href="#portfolio" class="btn btn-primary">{"View my work"}</a>
                    <a href="#contact" class="btn btn-outline">{"Get in touch"}</a>
                </div>
            </div>
            <div class="hero-floating" aria-hidden="true">
                { for FLOATING_BADGES.iter().map(|label| html! {
                    <span class="floating-element">{*label}</span>
                }) }
            </div>
        </section>
    }
}

use yew::prelude::*;

use super::hooks::use_reveal;
use crate::faq::Accordion;

const ENTRIES: &[(&str, &str)] = &[
    (
        "What kind of projects do you build?",
        "Mostly browser games and small web tools. Each one is a chance to try a technique I haven't used before.",
    ),
    (
        "Which technologies do you use most?",
        "HTML, CSS and JavaScript for the web, with Rust for anything that needs to be fast or well typed.",
    ),
    (
        "Are the projects open source?",
        "Yes. Every project in the portfolio links to its source code.",
    ),
    (
        "Are you available for collaboration?",
        "I'm happy to hear about school projects, game jams and open-source work. Use the contact form below.",
    ),
    (
        "How quickly do you reply to messages?",
        "Usually within a couple of days.",
    ),
];

#[function_component(FaqSection)]
pub fn faq_section() -> Html {
    let accordion = use_state_eq(Accordion::default);
    let list_ref = use_node_ref();
    let reveal = use_reveal(list_ref.clone());

    html! {
        <section id="faq" class="faq section">
            <div class="container">
                <h2 class="section-title">{"Frequently asked questions"}</h2>
                <div class={classes!("faq-list", reveal)} ref={list_ref} data-aos="fade-up">
                    { for ENTRIES.iter().enumerate().map(|(index, (question, answer))| {
                        let open = accordion.is_open(index);
                        let onclick = {
                            let accordion = accordion.clone();
                            Callback::from(move |_: MouseEvent| accordion.set(accordion.toggle(index)))
                        };
                        let answer_id = format!("faq-answer-{index}");
                        html! {
                            <div class={classes!("faq-item", open.then_some("active"))}>
                                <button
                                    type="button"
                                    class="faq-question"
                                    aria-expanded={open.to_string()}
                                    aria-controls={answer_id.clone()}
                                    onclick={onclick}
                                >
                                    <span>{*question}</span>
                                    <span class="faq-icon" aria-hidden="true">{if open { "−" } else { "+" }}</span>
                                </button>
                                <div id={answer_id} class="faq-answer">
                                    <p>{*answer}</p>
                                </div>
                            </div>
                        }
                    }) }
                </div>
            </div>
        </section>
    }
}

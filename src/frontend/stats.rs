use std::ops::ControlFlow;
use yew::prelude::*;

use super::dom::{self, VisibilityOptions};
use super::hooks::{spawn_tracked, use_first_visible, use_page, use_reveal};
use crate::counter::{parse_counter_target, parse_skill_width, skill_width_style, CounterAnimation};
use crate::pointer::skill_hover_transform;
use crate::schedule::{drive, TaskSet};

const STATS: &[(&str, &str)] = &[
    ("12", "Projects completed"),
    ("3", "Years of coding"),
    ("8", "Technologies"),
];

const SKILLS: &[(&str, &str)] = &[
    ("HTML & CSS", "90"),
    ("JavaScript", "80"),
    ("Rust", "65"),
    ("Git", "75"),
    ("UI Design", "60"),
];

#[derive(Properties, PartialEq)]
struct CounterProps {
    target: AttrValue,
    label: AttrValue,
}

#[function_component(Counter)]
fn counter(props: &CounterProps) -> Html {
    let page = use_page();
    let node = use_node_ref();
    let visible = use_first_visible(node.clone(), VisibilityOptions::HALF_VISIBLE, "counter");
    let shown = use_state_eq(|| 0u64);
    let target = parse_counter_target(&props.target);

    {
        let shown = shown.clone();
        let duration = page.config.counter_duration;
        use_effect_with((visible, target), move |(visible, target)| {
            let mut tasks = TaskSet::default();
            if let (true, Some(target)) = (*visible, *target) {
                let animation = CounterAnimation::new(target, duration);
                spawn_tracked(&mut tasks, async move {
                    drive(animation, |_| dom::next_frame(), move |value| {
                        shown.set(value);
                        ControlFlow::Continue(())
                    })
                    .await;
                });
            }
            move || drop(tasks)
        });
    }

    let text = match target {
        Some(_) => shown.to_string(),
        None => props.target.to_string(),
    };

    html! {
        <div class="stat-item">
            <span class="stat-number" ref={node} data-counter={props.target.clone()}>{text}</span>
            <span class="stat-label">{props.label.clone()}</span>
        </div>
    }
}

#[function_component(AboutSection)]
pub fn about_section() -> Html {
    let text_ref = use_node_ref();
    let reveal = use_reveal(text_ref.clone());

    html! {
        <section id="about" class="about section">
            <div class="container">
                <h2 class="section-title">{"About me"}</h2>
                <div class={classes!("about-text", reveal)} ref={text_ref} data-aos="fade-right">
                    <p>
                        {"I'm a software development student who enjoys turning ideas into small, \
                          polished games and tools for the web."}
                    </p>
                    <p>
                        {"Most of my projects start as a question about how something works and end \
                          as something people can click on."}
                    </p>
                </div>
                <div class="about-stats">
                    { for STATS.iter().map(|(target, label)| html! {
                        <Counter target={*target} label={*label} />
                    }) }
                </div>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
struct SkillBarProps {
    name: AttrValue,
    width: AttrValue,
}

#[function_component(SkillBar)]
fn skill_bar(props: &SkillBarProps) -> Html {
    let node = use_node_ref();
    let visible = use_first_visible(node.clone(), VisibilityOptions::HALF_VISIBLE, "skill_bar");
    let hovered = use_state_eq(|| None::<bool>);
    let width = parse_skill_width(&props.width);
    let style = match (visible, width) {
        (true, Some(percent)) => skill_width_style(percent),
        _ => String::new(),
    };
    let item_style = hovered.map(|hovered| format!("transform: {};", skill_hover_transform(hovered)));
    let hover = |lifted: bool| {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(Some(lifted)))
    };

    html! {
        <div
            class="skill-item"
            style={item_style}
            onmouseenter={hover(true)}
            onmouseleave={hover(false)}
        >
            <div class="skill-header">
                <span class="skill-name">{props.name.clone()}</span>
                <span class="skill-percent">{format!("{}%", props.width)}</span>
            </div>
            <div class="skill-bar">
                <div class="skill-progress" ref={node} data-width={props.width.clone()} style={style}></div>
            </div>
        </div>
    }
}

#[function_component(SkillsSection)]
pub fn skills_section() -> Html {
    let grid_ref = use_node_ref();
    let reveal = use_reveal(grid_ref.clone());

    html! {
        <section id="skills" class="skills section">
            <div class="container">
                <h2 class="section-title">{"Skills"}</h2>
                <div class={classes!("skills-grid", reveal)} ref={grid_ref} data-aos="fade-up">
                    { for SKILLS.iter().map(|(name, width)| html! {
                        <SkillBar name={*name} width={*width} />
                    }) }
                </div>
            </div>
        </section>
    }
}

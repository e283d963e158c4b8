use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{KeyboardEvent, MouseEvent, Node};
use yew::prelude::*;

use super::dom::{self, Listener, VisibilityOptions};
use super::hooks::{spawn_tracked, use_first_visible, use_page, use_reveal};
use crate::catalog::ProjectRecord;
use crate::filter::{filter_controls, DeferredDisplay, FilterBoard, FilterTag, FilterTimings};
use crate::log::{log_event, LogLevel};
use crate::schedule::TaskSet;

#[derive(Clone, PartialEq)]
struct BoardState {
    board: FilterBoard,
    pending: Rc<Vec<DeferredDisplay>>,
}

enum BoardAction {
    Activate(FilterTag, FilterTimings),
    Settle(DeferredDisplay),
}

impl Reducible for BoardState {
    type Action = BoardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            BoardAction::Activate(tag, timings) => {
                next.pending = Rc::new(next.board.activate(tag, timings));
            }
            BoardAction::Settle(change) => {
                if !next.board.settle(change) {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
struct LazyImageProps {
    src: AttrValue,
    alt: AttrValue,
}

/// `img[data-src]` that only gets its real `src` once it scrolls into view.
#[function_component(LazyImage)]
fn lazy_image(props: &LazyImageProps) -> Html {
    let node = use_node_ref();
    let visible = use_first_visible(node.clone(), VisibilityOptions::ANY, "lazy_image");

    html! {
        <img
            ref={node}
            class={classes!((!visible).then_some("lazy"))}
            data-src={props.src.clone()}
            src={visible.then(|| props.src.clone())}
            alt={props.alt.clone()}
        />
    }
}

#[derive(Properties, PartialEq)]
struct ProjectModalProps {
    project: Option<ProjectRecord>,
    on_close: Callback<()>,
}

#[function_component(ProjectModal)]
fn project_modal(props: &ProjectModalProps) -> Html {
    let open = props.project.is_some();
    let modal_ref = use_node_ref();

    {
        let on_close = props.on_close.clone();
        use_effect_with(open, move |open| {
            let listener = open
                .then(|| {
                    Listener::on_document("keydown", move |event| {
                        if event.dyn_ref::<KeyboardEvent>().map(|key| key.key()).as_deref() == Some("Escape") {
                            on_close.emit(());
                        }
                    })
                })
                .flatten();
            move || drop(listener)
        });
    }

    use_effect_with(open, |open| {
        let locked = *open;
        if locked {
            set_body_overflow("hidden");
        }
        move || {
            if locked {
                set_body_overflow("auto");
            }
        }
    });

    let on_backdrop = {
        let on_close = props.on_close.clone();
        let modal_ref = modal_ref.clone();
        Callback::from(move |event: MouseEvent| {
            let clicked = event.target().and_then(|target| target.dyn_into::<Node>().ok());
            if clicked.is_some() && clicked == modal_ref.get() {
                on_close.emit(());
            }
        })
    };
    let on_close_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let body = match &props.project {
        Some(project) => html! {
            <>
                <img id="modal-image" src={project.image.clone()} alt={project.title.clone()} />
                <h3 id="modal-title">{project.title.clone()}</h3>
                <p id="modal-description">{project.description.clone()}</p>
                <div id="modal-tech" class="modal-tech">
                    { for project.technologies.iter().map(|tech| html! {
                        <span class="tech-tag">{tech.clone()}</span>
                    }) }
                </div>
                <ul id="modal-features" class="modal-features">
                    { for project.features.iter().map(|feature| html! { <li>{feature.clone()}</li> }) }
                </ul>
                <div class="modal-links">
                    <a id="modal-demo" class="btn btn-primary" href={project.demo.clone()}>{"Live demo"}</a>
                    <a id="modal-github" class="btn btn-outline" href={project.source.clone()}>{"Source"}</a>
                </div>
            </>
        },
        None => Html::default(),
    };

    html! {
        <div
            id="project-modal"
            ref={modal_ref}
            class={classes!("modal", open.then_some("active"))}
            role="dialog"
            aria-modal="true"
            aria-hidden={(!open).to_string()}
            onclick={on_backdrop}
        >
            <div class="modal-content">
                <button type="button" class="modal-close" aria-label="Close" onclick={on_close_click}>
                    {"×"}
                </button>
                {body}
            </div>
        </div>
    }
}

fn set_body_overflow(value: &str) {
    if let Some(body) = dom::body() {
        dom::set_style(&body, "overflow", value);
    }
}

fn item_style(displayed: bool) -> &'static str {
    if displayed {
        "display: block;"
    } else {
        "display: none;"
    }
}

#[function_component(Portfolio)]
pub fn portfolio() -> Html {
    let page = use_page();
    let grid_ref = use_node_ref();
    let reveal = use_reveal(grid_ref.clone());
    let opened = use_state(|| None::<ProjectRecord>);

    let board = {
        let catalog = page.catalog.clone();
        use_reducer(move || BoardState {
            board: FilterBoard::new(
                catalog
                    .records()
                    .iter()
                    .map(|record| record.categories.clone())
                    .collect(),
            ),
            pending: Rc::default(),
        })
    };

    {
        let dispatcher = board.dispatcher();
        let pending = board.pending.clone();
        use_effect_with(board.board.generation(), move |_| {
            let mut tasks = TaskSet::default();
            for change in pending.iter().copied() {
                let dispatcher = dispatcher.clone();
                spawn_tracked(&mut tasks, async move {
                    dom::sleep(change.delay).await;
                    dispatcher.dispatch(BoardAction::Settle(change));
                });
            }
            move || drop(tasks)
        });
    }

    let timings = FilterTimings {
        show_delay: page.config.filter_show_delay,
        hide_delay: page.config.filter_hide_delay,
    };
    let on_filter = |tag: FilterTag| {
        let board = board.clone();
        let config = page.config.clone();
        Callback::from(move |_: MouseEvent| {
            log_event(
                &config,
                LogLevel::Debug,
                "filter_activate",
                serde_json::json!({ "filter": tag.as_attr() }),
            );
            board.dispatch(BoardAction::Activate(tag.clone(), timings));
        })
    };

    let on_details = |id: String| {
        let opened = opened.clone();
        let page = page.clone();
        Callback::from(move |_: MouseEvent| match page.catalog.modal_for(&id) {
            Some(project) => {
                log_event(&page.config, LogLevel::Info, "modal_open", serde_json::json!({ "project_id": id }));
                opened.set(Some(project));
            }
            None => log_event(
                &page.config,
                LogLevel::Debug,
                "modal_unknown_project",
                serde_json::json!({ "project_id": id }),
            ),
        })
    };
    let on_close = {
        let opened = opened.clone();
        Callback::from(move |()| opened.set(None))
    };

    let active = board.board.active().clone();
    let filters = filter_controls(&page.catalog.categories());

    html! {
        <section id="portfolio" class="portfolio section">
            <div class="container">
                <h2 class="section-title">{"Portfolio"}</h2>
                <div class="portfolio-filters" role="group" aria-label="Filter projects">
                    { for filters.into_iter().map(|tag| html! {
                        <button
                            type="button"
                            class={classes!("filter-btn", (tag == active).then_some("active"))}
                            data-filter={tag.as_attr().to_string()}
                            onclick={on_filter(tag.clone())}
                        >
                            {tag.label()}
                        </button>
                    }) }
                </div>
                <div class={classes!("portfolio-grid", reveal)} ref={grid_ref} data-aos="fade-up">
                    { for page.catalog.records().iter().zip(board.board.views()).map(|(project, view)| html! {
                        <article
                            class={classes!(
                                "portfolio-item",
                                project.categories.clone(),
                                view.faded.then_some("hidden")
                            )}
                            style={item_style(view.displayed)}
                        >
                            <div class="portfolio-image">
                                <LazyImage src={project.image.clone()} alt={project.title.clone()} />
                            </div>
                            <div class="portfolio-content">
                                <h3>{project.title.clone()}</h3>
                                <p>{project.description.clone()}</p>
                                <button
                                    type="button"
                                    class="btn btn-outline"
                                    data-project={project.id.clone()}
                                    onclick={on_details(project.id.clone())}
                                >
                                    {"View details"}
                                </button>
                            </div>
                        </article>
                    }) }
                </div>
            </div>
            <ProjectModal project={(*opened).clone()} on_close={on_close} />
        </section>
    }
}

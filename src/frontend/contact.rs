use std::rc::Rc;
use web_sys::{Element, HtmlInputElement, HtmlTextAreaElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};
use yew::prelude::*;

use super::dom;
use super::hooks::{spawn_tracked, use_page, use_reveal};
use crate::form::{run_submission, Field, FieldInput, FormAction, FormModel, SubmitPhase, SubmitTimings};
use crate::log::{log_event, LogLevel};
use crate::schedule::TaskSet;

impl Reducible for FormModel {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

fn scroll_into_center(node: &NodeRef) {
    let Some(element) = node.cast::<Element>() else {
        return;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Center);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

fn field_text(form: &FormModel, field: Field) -> String {
    match field {
        Field::Name => form.draft.name.clone(),
        Field::Email => form.draft.email.clone(),
        Field::Subject => form.draft.subject.clone(),
        Field::Message => form.draft.message.clone(),
        Field::Privacy => String::new(),
    }
}

#[function_component(ContactSection)]
pub fn contact_section() -> Html {
    let page = use_page();
    let form = use_reducer_eq(FormModel::default);
    let tasks = use_mut_ref(TaskSet::default);
    let status_ref = use_node_ref();
    let form_ref = use_node_ref();
    let reveal = use_reveal(form_ref.clone());

    {
        let tasks = tasks.clone();
        use_effect_with((), move |_| move || tasks.borrow_mut().abort_all());
    }

    {
        let dispatcher = form.dispatcher();
        let config = page.config.clone();
        let tasks = tasks.clone();
        use_effect_with(form.phase.is_sending(), move |sending| {
            if *sending {
                let timings = SubmitTimings {
                    delivery: config.submit_delay,
                    status_hide: config.status_hide_delay,
                };
                let mut tasks = tasks.borrow_mut();
                tasks.abort_all();
                spawn_tracked(&mut tasks, async move {
                    run_submission(timings, dom::sleep, move |phase| {
                        match &phase {
                            SubmitPhase::Delivered => {
                                log_event(&config, LogLevel::Info, "form_submit_complete", serde_json::json!({}))
                            }
                            SubmitPhase::Failed(error) => log_event(
                                &config,
                                LogLevel::Error,
                                "form_submit_failed",
                                serde_json::json!({ "message": error.to_string() }),
                            ),
                            _ => {}
                        }
                        dispatcher.dispatch(FormAction::Phase(phase));
                    })
                    .await;
                });
            }
        });
    }

    {
        let status_ref = status_ref.clone();
        use_effect_with(form.phase == SubmitPhase::Delivered, move |delivered| {
            if *delivered {
                scroll_into_center(&status_ref);
            }
        });
    }

    let on_submit = {
        let form = form.clone();
        let config = page.config.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let checked = (*form).clone().apply(FormAction::Submit);
            if !checked.errors.is_empty() {
                let fields: Vec<&str> = checked.errors.keys().map(|field| field.name()).collect();
                log_event(&config, LogLevel::Debug, "form_invalid", serde_json::json!({ "fields": fields }));
            }
            form.dispatch(FormAction::Submit);
        })
    };

    let on_text = |field: Field| {
        let form = form.clone();
        Callback::from(move |event: InputEvent| {
            let value = event
                .target_dyn_into::<HtmlInputElement>()
                .map(|input| input.value())
                .or_else(|| event.target_dyn_into::<HtmlTextAreaElement>().map(|area| area.value()));
            if let Some(value) = value {
                form.dispatch(FormAction::Input(field, FieldInput::Text(value)));
            }
        })
    };
    let on_blur = |field: Field| {
        let form = form.clone();
        Callback::from(move |_: FocusEvent| form.dispatch(FormAction::Blur(field)))
    };
    let on_privacy = {
        let form = form.clone();
        Callback::from(move |event: Event| {
            if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                form.dispatch(FormAction::Input(Field::Privacy, FieldInput::Checked(input.checked())));
            }
        })
    };

    let error_text = |field: Field| form.error(field).map(ToString::to_string).unwrap_or_default();
    let error_class = |field: Field| form.error(field).is_some().then_some("error");

    let text_field = |field: Field, kind: &'static str| {
        html! {
            <div class="form-group">
                <label for={field.name()}>{field.label()}</label>
                <input
                    type={kind}
                    id={field.name()}
                    name={field.name()}
                    class={classes!(error_class(field))}
                    required={field.required()}
                    value={field_text(&form, field)}
                    oninput={on_text(field)}
                    onblur={on_blur(field)}
                />
                <span id={field.error_id()} class="error-message">{error_text(field)}</span>
            </div>
        }
    };

    let sending = form.phase.is_sending();
    let hidden_when = |hide: bool| if hide { "display: none;" } else { "display: inline;" };
    let status = match &form.phase {
        SubmitPhase::Delivered => html! {
            <div class="status-success">
                <h3>{"Message sent!"}</h3>
                <p>{"Thanks for reaching out. I'll get back to you soon."}</p>
            </div>
        },
        SubmitPhase::Failed(error) => html! {
            <div class="status-error" role="alert">
                <p>{error.to_string()}</p>
            </div>
        },
        _ => Html::default(),
    };
    let status_visible = matches!(form.phase, SubmitPhase::Delivered | SubmitPhase::Failed(_));

    html! {
        <section id="contact" class="contact section">
            <div class="container">
                <h2 class="section-title">{"Get in touch"}</h2>
                <form
                    id="contact-form"
                    ref={form_ref}
                    class={classes!("contact-form", reveal)}
                    data-aos="fade-up"
                    novalidate=true
                    onsubmit={on_submit}
                >
                    {text_field(Field::Name, "text")}
                    {text_field(Field::Email, "email")}
                    {text_field(Field::Subject, "text")}
                    <div class="form-group">
                        <label for={Field::Message.name()}>{Field::Message.label()}</label>
                        <textarea
                            id={Field::Message.name()}
                            name={Field::Message.name()}
                            rows="5"
                            class={classes!(error_class(Field::Message))}
                            required=true
                            value={form.draft.message.clone()}
                            oninput={on_text(Field::Message)}
                            onblur={on_blur(Field::Message)}
                        />
                        <span id={Field::Message.error_id()} class="error-message">
                            {error_text(Field::Message)}
                        </span>
                    </div>
                    <div class="form-group form-checkbox">
                        <input
                            type="checkbox"
                            id={Field::Privacy.name()}
                            name={Field::Privacy.name()}
                            class={classes!(error_class(Field::Privacy))}
                            checked={form.draft.privacy}
                            onchange={on_privacy}
                            onblur={on_blur(Field::Privacy)}
                        />
                        <label for={Field::Privacy.name()}>
                            {"I agree to the Privacy Policy and Terms of Service"}
                        </label>
                        <span id={Field::Privacy.error_id()} class="error-message">
                            {error_text(Field::Privacy)}
                        </span>
                    </div>
                    <button type="submit" class="btn btn-primary btn-submit" disabled={sending}>
                        <span class="btn-text" style={hidden_when(sending)}>{"Send message"}</span>
                        <span class="btn-loading" style={hidden_when(!sending)}>{"Sending..."}</span>
                    </button>
                </form>
                <div
                    id="form-status"
                    ref={status_ref}
                    class="form-status"
                    style={if status_visible { "display: block;" } else { "display: none;" }}
                    aria-live="polite"
                >
                    {status}
                </div>
            </div>
        </section>
    }
}

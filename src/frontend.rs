mod chrome;
mod contact;
mod cursor;
mod dom;
mod faq;
mod hero;
mod hooks;
mod portfolio;
mod stats;

use std::rc::Rc;
use web_sys::window;
use yew::prelude::*;

use crate::catalog::Catalog;
use crate::config::PageConfig;
use crate::log::{log_event, LogLevel};
use chrome::{use_page_effects, BackToTop, LoadingScreen, SiteHeader};
use contact::ContactSection;
use cursor::CursorLayer;
use faq::FaqSection;
use hero::Hero;
use hooks::PageContext;
use portfolio::Portfolio;
use stats::{AboutSection, SkillsSection};

const MOUNT_ID: &str = "app";
const RUNTIME_STYLE_ID: &str = "folio-runtime-style";
const RUNTIME_STYLE: &str = include_str!("runtime.css");

#[derive(Properties, PartialEq)]
struct AppProps {
    page: PageContext,
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    use_page_effects(props.page.config.clone());

    html! {
        <ContextProvider<PageContext> context={props.page.clone()}>
            <LoadingScreen />
            <CursorLayer />
            <SiteHeader />
            <main id="content">
                <Hero />
                <AboutSection />
                <SkillsSection />
                <Portfolio />
                <FaqSection />
                <ContactSection />
            </main>
            <footer class="footer">
                <p>{"© Tobias Verbeek. Built with Rust and WebAssembly."}</p>
            </footer>
            <BackToTop />
        </ContextProvider<PageContext>>
    }
}

/// The ripple, error, lazy and reveal rules the page relies on at runtime.
fn inject_runtime_style() {
    let Some(document) = dom::document() else {
        return;
    };
    if document.get_element_by_id(RUNTIME_STYLE_ID).is_some() {
        return;
    }
    let Some(head) = document.head() else {
        return;
    };
    let Ok(style) = document.create_element("style") else {
        return;
    };
    style.set_id(RUNTIME_STYLE_ID);
    style.set_text_content(Some(RUNTIME_STYLE));
    let _ = head.append_child(&style);
}

fn load_catalog(config: &PageConfig) -> Catalog {
    Catalog::embedded().unwrap_or_else(|error| {
        log_event(
            config,
            LogLevel::Error,
            "catalog_decode_failed",
            serde_json::json!({ "message": error.to_string() }),
        );
        Catalog::default()
    })
}

pub fn run() {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(MOUNT_ID))
        .expect("missing #app mount point");

    let config = PageConfig::from_lookup(|name| root.get_attribute(name));
    let catalog = load_catalog(&config);
    inject_runtime_style();

    log_event(
        &config,
        LogLevel::Info,
        "page_init",
        serde_json::json!({
            "projects": catalog.records().len(),
            "phrases": config.typing_phrases.len(),
            "log_level": config.log_level.as_str(),
        }),
    );

    let page = PageContext {
        config: Rc::new(config),
        catalog: Rc::new(catalog),
    };
    yew::Renderer::<App>::with_root_and_props(root, AppProps { page }).render();
}

// Page logic is only reachable from the wasm frontend; native builds exist for tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod catalog;
mod chrome;
mod config;
mod counter;
mod faq;
mod filter;
mod form;
mod log;
mod pointer;
mod schedule;
mod typing;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This project is frontend-only. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}

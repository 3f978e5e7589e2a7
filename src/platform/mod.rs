//! Host bindings
//!
//! The simulation is host-agnostic; this layer adapts it to a runtime.
//! - `web`: wasm-bindgen facade driven by a JS `requestAnimationFrame` loop
//!
//! The native host is the headless runner in `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;

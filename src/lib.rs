//! Momentum and eased smooth scrolling for web pages.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It tracks
//! scroll velocity, keeps the page coasting with exponential friction after
//! input stops, stops instantly on the next user interaction, animates
//! in-page anchor jumps with an easing curve, and clears stray scroll-to-top
//! buttons. All of it is disabled in favor of instant jumps when the user
//! prefers reduced motion.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Browser engine and testable [`engine::ScrollCore`] |
//! | [`momentum`] | Velocity state and sampling |
//! | [`easing`] | Easing curves for `scroll_to` |
//! | [`frame`] | Animation-frame tokens, one outstanding per loop |
//! | [`config`] | Tunable configuration and partial updates |
//! | [`anchor`] | In-page anchor filtering and header offset |
//! | [`sweep`] | Stray scroll-to-top button removal |
//! | [`dom`] | Window/document reads and writes |
//! | [`api`] | `wasm-bindgen` exports |
//! | [`error`] | Crate error type |
//! | [`consts`] | Default tuning and fixed timings |

pub mod anchor;
pub mod api;
pub mod config;
pub mod consts;
pub mod dom;
pub mod easing;
pub mod engine;
pub mod error;
pub mod frame;
pub mod momentum;
pub mod sweep;

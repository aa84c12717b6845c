// CtrlMend - core/mod.rs
//
// Core business logic layer: pure text transformations and rule sets.
// Must NOT depend on: platform, app, or perform file I/O directly.

pub mod annotate;
pub mod export;
pub mod garble;
pub mod model;
pub mod patcher;
pub mod pipeline;
pub mod route;
pub mod rules;

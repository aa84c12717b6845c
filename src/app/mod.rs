// CtrlMend - app/mod.rs
//
// Application layer: rule set selection, per-file repair, batch driving.
// Dependencies: core and platform layers.

pub mod batch;
pub mod repair;
pub mod rules_mgr;

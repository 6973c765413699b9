// Wizard core: static step catalog, per-session state, and the navigation
// controller. The controller is the only writer for user-driven edits; the
// prefill merger and the ingestion mapper are the other two writers.

pub mod controller;
pub mod handlers;
pub mod session;
pub mod steps;

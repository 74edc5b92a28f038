pub mod dispatcher;
pub mod graph;
pub mod inspector;
pub mod ratio;
pub mod role;
// Strategies are only reachable through the dispatcher, which tracks the resolution path.
pub(in crate::strategy) mod conversion;
pub(in crate::strategy) mod mint;
pub(in crate::strategy) mod peer;
pub(in crate::strategy) mod wrap;

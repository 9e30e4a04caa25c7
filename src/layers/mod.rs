pub mod base;
pub mod reachability;
pub mod registry;
pub mod style;
pub mod tile;

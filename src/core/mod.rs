pub mod contributors;
pub mod engine;
pub mod links;
pub mod loader;
pub mod reachability;

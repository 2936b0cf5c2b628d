pub mod config;
pub mod engine;
pub mod graph;
pub mod playthrough;
pub mod session;
pub mod view;

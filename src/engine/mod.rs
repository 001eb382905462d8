// src/engine/mod.rs
mod builder;
mod runner;

pub use builder::EngineBuilder;
pub use runner::Engine;

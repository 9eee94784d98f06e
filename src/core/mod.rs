pub mod alphabet;
pub mod analyzer;
pub mod engine;
pub mod transitions;
pub mod types;

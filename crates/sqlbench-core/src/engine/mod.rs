pub mod answer;
pub mod runner;

pub use answer::{Answer, Answerer};
pub use runner::{RunState, Runner};

pub mod config;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod model;
pub mod prompts;
pub mod providers;
pub mod report;
pub mod sanitize;
pub mod storage;

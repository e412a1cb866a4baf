#![doc = "portfolio-sync CLI crate: argument parsing, configuration loading and the concrete GitHub/OpenAI clients behind the core trait seams."]

pub mod cli;
pub mod describer;
pub mod github;
pub mod load_config;

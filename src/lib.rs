pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod reader;
pub mod scanner;

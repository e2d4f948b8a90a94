pub mod audit;
pub mod aws;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod provider;
pub mod report;

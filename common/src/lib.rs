// Shared library for the booking directory: model, rules, persistence, ambient setup

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod directory;
pub mod errors;
pub mod formatting;
pub mod forms;
pub mod models;
pub mod storage;
pub mod telemetry;

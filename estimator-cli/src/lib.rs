pub mod app;
pub mod config;
pub mod logging;
pub mod prompter;
pub mod views;
pub mod wizard;

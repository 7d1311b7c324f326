mod commands;
mod logging;
mod menu;
mod render;
mod setup;

pub use commands::run;

pub mod app;
pub mod assets;
pub mod config;
pub mod error;
pub mod frame;
pub mod game;
pub mod protocol;
pub mod runtime;
pub mod transport;

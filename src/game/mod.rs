pub mod bot;
pub mod collision;
pub mod constants;
pub mod food;
pub mod grid;
pub mod input;
pub mod math;
pub mod session;
pub mod snake;
pub mod store;
pub mod types;

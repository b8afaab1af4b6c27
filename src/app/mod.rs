pub mod routes;
pub mod state;
pub mod time;

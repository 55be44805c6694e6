pub mod controls;
pub mod state;
pub mod store;

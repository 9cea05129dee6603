pub mod members;
pub mod state;

pub mod presenter;
pub mod state;

pub mod config;
pub mod deck;
pub mod error;
pub mod presenter;
pub mod scheduler;
pub mod session;
pub mod state;
pub mod timer;

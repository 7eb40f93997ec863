pub mod handlers;
pub mod listeners;

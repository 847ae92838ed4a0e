//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod display;
pub mod ticker;

// Re-export main items
pub use display::display_task;
pub use ticker::TickerHandle;

pub mod content;
pub mod message;
pub mod normalized;

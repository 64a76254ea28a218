pub mod base;
pub mod configs;
pub mod logger;
pub mod memory;
pub mod registry;
pub mod trace;

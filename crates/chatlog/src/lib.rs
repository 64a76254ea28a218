pub mod completion;
pub mod errors;
pub mod ids;
pub mod loggers;
pub mod models;
pub mod normalize;

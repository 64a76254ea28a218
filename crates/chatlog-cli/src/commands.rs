pub mod normalize;
pub mod record;

pub mod normalize;
pub mod quantity;
pub mod schema_gate;

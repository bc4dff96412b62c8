pub mod math;
pub mod store;

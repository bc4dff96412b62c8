pub mod pet;
pub mod food;
pub mod trail;
pub mod feeder;

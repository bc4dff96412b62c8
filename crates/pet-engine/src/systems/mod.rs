pub mod behavior;
pub mod physics;
pub mod pet;
pub mod trail;
pub mod feeding;

pub mod clock;
pub mod timing;
pub mod trigger;

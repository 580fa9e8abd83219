pub mod angle;
pub mod display;
pub mod geocode;
pub mod position;
pub mod prelude;
pub mod time;
pub mod tle;

pub extern crate nalgebra as na;

pub mod config;
pub mod convert;
pub mod countries;
pub mod geocoder;
pub mod imagery;
pub mod propagator;
pub mod tle_source;
pub mod units;
pub mod view;

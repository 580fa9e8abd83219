pub use crate::angle::*;
pub use crate::display::*;
pub use crate::geocode::*;
pub use crate::position::*;
pub use crate::time::*;
pub use crate::tle::*;

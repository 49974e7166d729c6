pub mod error;
pub mod filesystem;
pub mod result;
pub mod units;

pub use error::*;
pub use filesystem::*;
pub use result::*;
pub use units::*;

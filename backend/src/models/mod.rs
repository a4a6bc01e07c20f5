pub mod flight;
pub mod selection;

pub use flight::*;
pub use selection::*;

pub mod baseer;
pub mod fahis;
pub mod raqib;

pub use baseer::Baseer;
pub use fahis::Fahis;
pub use raqib::Raqib;

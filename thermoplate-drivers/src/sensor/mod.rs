//! Temperature sensor drivers

pub mod ds1624;

pub use ds1624::{Ds1624, Ds1624Config, Error as Ds1624Error};

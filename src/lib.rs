/*
    Top-level
*/

mod decimal;
mod dyadic;
mod error;
mod number;
mod real;
mod round;

pub mod ieee754;
pub use decimal::*;
pub use dyadic::*;
pub use error::*;
pub use number::*;
pub use real::*;
pub use round::*;

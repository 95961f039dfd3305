//! Ranges and requirement trees

mod builder;
mod ivy;
mod operator;
mod range;
mod requirement;

pub use builder::MAX_GROUP_DEPTH;
pub use operator::{InvalidOperatorError, RangeOperator};
pub use range::Range;
pub use requirement::{Connective, Requirement};

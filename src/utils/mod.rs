pub mod calendar;
pub mod compare;
pub mod datetime;
pub mod hash;
pub mod tokens;

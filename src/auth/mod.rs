mod extractors;
mod jwt;

pub use extractors::*;
pub use jwt::*;

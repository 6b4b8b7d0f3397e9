mod pool;
pub mod queries;
pub mod schema;

pub use pool::*;
pub use schema::init_database;

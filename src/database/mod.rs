pub mod bootstrap;
pub mod pool;
pub mod postgres;
pub mod schema;
pub mod store;

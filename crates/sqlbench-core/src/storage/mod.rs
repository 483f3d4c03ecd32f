pub mod query;
pub mod schema;
pub mod store;

pub use query::{QueryExecutor, ResultSet};
pub use schema::SchemaDescription;
pub use store::Store;

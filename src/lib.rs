pub mod config;
pub mod error;
pub mod graphql;
pub mod query;
pub mod server;
pub mod storage;

pub use config::ServerConfig;
pub use error::{DbError, DbResult};
pub use graphql::{GraphQLError, GraphQLResponse, Operation, OperationType, SelectionNode};
pub use query::{QueryResult, QuerySpec};
pub use server::create_router;
pub use storage::{DocumentStore, MemoryStore};

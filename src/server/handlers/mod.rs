pub mod documents;
pub mod graphql;
pub mod system;

pub use documents::*;
pub use graphql::*;
pub use system::*;

pub mod schema;
pub mod snapshot;

// Re-export for convenience
pub use schema::*;
pub use snapshot::BoardSnapshot;

pub mod index;

pub use index::{PgVectorIndex, VectorIndex};

//! SQL access used by SQL executors.

mod cursor;
mod error;

pub use cursor::SqlCursor;
pub use error::SqlError;

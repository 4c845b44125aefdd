//! Field addressing and error accumulation
//!
//! [`FieldPath`] names a location inside a descriptor; [`FieldError`] ties a
//! failure kind to such a location; [`ErrorList`] accumulates them in
//! traversal order.

pub mod error;
pub mod path;

pub use error::{ErrorKind, ErrorList, FieldError, Limit};
pub use path::{FieldPath, Segment};

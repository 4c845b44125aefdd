pub mod features;
pub mod validate;

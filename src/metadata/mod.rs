pub mod error;
pub mod exiftool;
pub mod extract;
pub mod raw;
pub mod transform;
pub mod validate;

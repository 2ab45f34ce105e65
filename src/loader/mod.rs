pub mod input;
pub mod personal;

pub use input::{load_records, Record};
pub use personal::contains_match;

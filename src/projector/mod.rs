pub mod columns;
pub mod path;
pub mod project;

pub use columns::ColumnOrder;
pub use path::resolve;
pub use project::{project_record, ProjectedItem};

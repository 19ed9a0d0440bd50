pub mod list_data_source;

pub use list_data_source::{ListDataSource, PageQuery};

pub mod data_source;
pub mod table_reader;

pub use data_source::{DataSource, TableFiles};
pub use table_reader::TableReader;

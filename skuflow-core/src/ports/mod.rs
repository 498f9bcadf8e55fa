pub mod sheet;

pub use sheet::SheetSource;

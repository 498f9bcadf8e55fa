pub mod jinja;

pub use jinja::{DATA_OVERVIEW_TEMPLATE, JinjaRenderer};

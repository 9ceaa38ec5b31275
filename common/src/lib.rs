mod database;
pub use database::*;

mod section;
pub use section::*;

mod config;
pub use config::*;

pub mod test_case;

pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;

pub type StringId = usize;

//! Driver queries
//!
//! One module per query: the query struct, its error enum, and an async
//! `handle` function running a single parameterized statement.

pub mod get_driver;
pub mod list_drivers;
pub mod season_drivers;

pub use get_driver::GetDriverQuery;
pub use list_drivers::ListDriversQuery;
pub use season_drivers::SeasonDriversQuery;

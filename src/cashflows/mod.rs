//! Cash-flow series and their loaders

mod series;
mod loader;

pub use series::CashFlowSeries;
pub use loader::{list_series_files, load_series, load_series_from_reader, parse_series};

// Screener filter normalization
pub mod fields;
pub mod normalizer;
pub mod sort;

pub use fields::{FieldUnit, RangeField};
pub use normalizer::{normalize, normalize_with, Normalize, RawScreenerFilters, ScreenerDefaults, ScreenerPayload};
pub use sort::{SortDirection, SortKey};

/// Backend endpoint that accepts a `ScreenerPayload`.
pub const SCREENER_RUN_PATH: &str = "/screener/run";

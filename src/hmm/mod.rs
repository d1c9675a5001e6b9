pub mod decoder;
pub mod model;
pub mod trainer;

/// Synthetic origin state prepended to every sequence. It has no emissions
/// and never appears in decoder output.
pub const START_LABEL: &str = "#";

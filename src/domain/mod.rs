pub mod item;
pub mod result;
pub mod source;

pub use item::Item;
pub use result::AggregationResult;
pub use source::Source;

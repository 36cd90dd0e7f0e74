pub mod aggregate;
pub mod category;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod sanitize;
pub mod writer;

pub use aggregate::Aggregate;
pub use category::map_product_type;
pub use error::ExportError;
pub use filter::filter_rows;
pub use normalize::{product_to_rows, products_to_rows};
pub use sanitize::sanitize_text;
pub use writer::{to_csv, to_json};

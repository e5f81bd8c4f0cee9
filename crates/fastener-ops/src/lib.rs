pub mod builders;
pub mod catalog;
pub mod params;
pub mod profile;
pub mod types;

pub use builders::build_fastener;
pub use catalog::{catalog, CatalogEntry};
pub use params::*;
pub use profile::{hex_circumradius, hexagon_points};
pub use types::OpError;

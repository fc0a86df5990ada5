//! Static lookup data - the item catalog and council directory.
//!
//! Both datasets are compiled in, standing in for what a real deployment
//! would load from a database.

mod councils;
mod items;

pub use councils::CouncilDirectory;
pub use items::ItemCatalog;

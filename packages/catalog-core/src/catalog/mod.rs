//! The two catalog subsystems.
//!
//! Each catalog wraps its entity stores in a single `RwLock` so that
//! multi-row operations (cast replace, movie delete with link cleanup) are
//! atomic with respect to concurrent readers.

pub mod films;
pub mod plants;

pub use films::FilmCatalog;
pub use plants::PlantCatalog;

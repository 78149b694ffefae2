//! Card system: identities, catalog, and instances.
//!
//! ## Key Types
//!
//! - `PairKey`: The identity two matching cards share
//! - `DisplayMode`: Which of the pair's two faces a card shows
//! - `CardIdentity`: Immutable per-card data (pair, face, audio)
//! - `CardCatalog`: Ordered list of pairs a board draws from
//! - `CardInstance`: Runtime card state and the flip protocol

pub mod catalog;
pub mod identity;
pub mod instance;

pub use catalog::{CardCatalog, CatalogEntry, VisualRefs};
pub use identity::{AudioClip, CardIdentity, ClipId, ClipSegment, DisplayMode, PairKey};
pub use instance::{CardInstance, CardState, FlipDirection};

//! A single-threaded 3D bin-packing core.
//!
//! Packs items into bins grouped by consolidation key, trying every allowed
//! rotation of each item against a kd-tree-indexed set of already-placed
//! items, honoring per-bin or per-item gravity constraints. The core never
//! raises errors for packing outcomes — unfitted items and empty-result
//! exceptions are recorded on [`packer::Packer`] and its [`cluster::Cluster`]s,
//! not returned as `Result`s. Parsing and serialization live outside this
//! crate; parallelism, if any, belongs to the caller running independent
//! requests concurrently, never inside one.

pub mod bin;
pub mod cluster;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod gravity;
pub mod intersection_cache;
pub mod item;
pub mod kdtree;
pub mod layer_hint;
pub mod packer;
pub mod registry;

pub use bin::{Bin, PackingDirection};
pub use cluster::{Cluster, ClusterSpec};
pub use error::Error;
pub use gravity::Gravity;
pub use item::{Item, ItemHandle};
pub use packer::{pack_many, Packer, PackerSpec};
pub use registry::{ItemRegistry, SortMethod};

//! # vorosweep
//!
//! `vorosweep` is a Rust library for 2D Voronoi diagrams, designed to be used in Rust
//! as well as compiled to WebAssembly (WASM). It constructs the diagram with Fortune's
//! sweep line algorithm and clips every cell against a bounding rectangle.
//!
//! ## Features
//!
//! - **WASM-first**: Built with `wasm-bindgen` for seamless integration with JavaScript and TypeScript.
//! - **Sweep Line Construction**: Site and circle events over a cancellable priority queue and a beachline tree.
//! - **Bounded Cells**: Every cell is a closed convex polygon clipped to the bounding rectangle.
//! - **Cell Queries**: Area, centroid and point containment per cell.
//!
//! ## Example
//!
//! See the `demos/` directory for usage with SVG plotting.
//!
//! ## Main Interface
//!
//! The primary entry point is the [`Diagram`] struct, which manages the sites and cells.

mod beachline;
mod bounds;
mod cell;
mod diagram;
mod edges;
mod events;
mod faces;
mod geometry;
mod sweep;

pub use bounds::BoundingBox;
pub use cell::Cell;
pub use diagram::Diagram;

//! Drawing surfaces: the canvas-style [`Surface`](surface::Surface) seam, its CPU implementation,
//! and immutable pixel [`Snapshot`](snapshot::Snapshot)s.

pub mod composite;
pub mod cpu;
pub mod snapshot;
pub mod surface;

pub mod box_shape;
pub mod ring;
pub mod triangle;

pub use box_shape::create_box;
pub use ring::{RingOptions, create_ring};
pub use triangle::create_triangle;

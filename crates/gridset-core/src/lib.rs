pub mod coord;
pub mod error;
pub mod grid;

pub use coord::{coords, CellCoord, CoordIter};
pub use error::{GridError, Result};
pub use grid::{Grid, Iter};

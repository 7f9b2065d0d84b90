pub mod dimension;
pub mod warp_data;

pub use dimension::{DimensionId, InvalidDimension};
pub use warp_data::{WarpData, WarpLoadError, WarpPoint, WarpSaveError};

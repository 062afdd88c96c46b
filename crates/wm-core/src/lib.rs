pub mod config;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod image;
pub mod model;

pub use config::{EditorConfig, MASK_PADDING};
pub use coords::{DisplayRect, map_to_image};
pub use error::{EditError, HistoryStep};
pub use geometry::{MIN_REGION_SIZE, Point, Region};
pub use image::ImageInfo;
pub use model::{Draft, RegionModel};

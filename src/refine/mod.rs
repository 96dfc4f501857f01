//! Mask refinement: turning a noisy segmentation mask into a clean,
//! full-resolution, outlined cutout.

mod border;
mod composite;
mod dilate;
mod fill;
mod labeler;
mod upscale;
pub mod types;

pub use border::{find_border, refine_border};
pub use composite::{apply_mask, CompositeStyle};
pub use dilate::grow_border;
pub use fill::{find_interior_seed, flood_fill, SeedWindow};
pub use labeler::ComponentLabeler;
pub use types::{Coord, LabelMatrix, MaskMatrix, MaskState, Matrix};
pub use upscale::{scale2x, scale2x_n};

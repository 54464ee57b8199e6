/// Percent vs absolute-pixel coordinates
pub mod coordinate;
/// Bit-packed bright-pixel mask
pub mod matrix;
/// 2D point
pub mod point;
/// Editable tooth placement
pub mod position;
/// Pixel bounds, percent boxes and detector output
pub mod region;
/// FDI numbers, quadrants and dentition
pub mod tooth;

pub use coordinate::{CanvasSize, Coordinate};
pub use matrix::BitMatrix;
pub use point::Point;
pub use position::{PositionSource, ToothPosition};
pub use region::{DetectedRegion, PercentBox, PixelBounds};
pub use tooth::{Dentition, Quadrant, ToothNumber};

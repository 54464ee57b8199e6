//! Breadth-first flood fill over a bright-pixel mask.
//!
//! The image is scanned in raster order; every unvisited bright pixel seeds a
//! new cluster, which grows through adjacent bright pixels while tracking its
//! bounding box and pixel count. Cluster order therefore follows the raster
//! position of each seed, which makes runs reproducible.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::models::{BitMatrix, PixelBounds};

/// Pixel neighborhood used when growing a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Edge neighbors only
    #[default]
    Four,
    /// Edge and corner neighbors
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const EIGHT: [(isize, isize); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

impl std::str::FromStr for Connectivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "4" | "four" => Ok(Connectivity::Four),
            "8" | "eight" => Ok(Connectivity::Eight),
            other => Err(format!("connectivity must be 4 or 8, got {other:?}")),
        }
    }
}

/// One connected group of bright pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cluster {
    /// Inclusive pixel bounds
    pub bounds: PixelBounds,
    /// Number of pixels in the group
    pub pixel_area: usize,
}

/// Find every connected group of bright pixels, unfiltered
pub fn find_bright_clusters(mask: &BitMatrix, connectivity: Connectivity) -> Vec<Cluster> {
    let width = mask.width();
    let height = mask.height();
    let mut visited = BitMatrix::new(width, height);
    let mut queue = VecDeque::new();
    let mut clusters = Vec::new();

    for y in 0..height {
        for x in 0..width {
            if !mask.get(x, y) || visited.get(x, y) {
                continue;
            }
            clusters.push(flood(mask, &mut visited, &mut queue, x, y, connectivity));
        }
    }

    clusters
}

fn flood(
    mask: &BitMatrix,
    visited: &mut BitMatrix,
    queue: &mut VecDeque<(usize, usize)>,
    seed_x: usize,
    seed_y: usize,
    connectivity: Connectivity,
) -> Cluster {
    let mut bounds = PixelBounds::at(seed_x, seed_y);
    let mut pixel_area = 0usize;

    visited.set(seed_x, seed_y, true);
    queue.push_back((seed_x, seed_y));

    while let Some((x, y)) = queue.pop_front() {
        pixel_area += 1;
        bounds.include(x, y);

        for &(dx, dy) in connectivity.offsets() {
            let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
                continue;
            };
            // BitMatrix::get reads out-of-range as dark, covering the far edges.
            if mask.get(nx, ny) && !visited.get(nx, ny) {
                visited.set(nx, ny, true);
                queue.push_back((nx, ny));
            }
        }
    }

    Cluster { bounds, pixel_area }
}

/// Outcome of applying the area band
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaFilter {
    /// Clusters with `min_area <= pixel_area <= max_area`
    pub kept: Vec<Cluster>,
    /// Count below `min_area`
    pub too_small: usize,
    /// Count above `max_area`
    pub too_large: usize,
}

/// Keep clusters inside the inclusive `[min_area, max_area]` band
pub fn filter_by_area(clusters: Vec<Cluster>, min_area: usize, max_area: usize) -> AreaFilter {
    let mut out = AreaFilter::default();
    for cluster in clusters {
        if cluster.pixel_area < min_area {
            out.too_small += 1;
        } else if cluster.pixel_area > max_area {
            out.too_large += 1;
        } else {
            out.kept.push(cluster);
        }
    }
    out
}

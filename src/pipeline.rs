use crate::config::DetectionParams;
use crate::detector::flood_fill::{Cluster, filter_by_area, find_bright_clusters};
use crate::detector::numbering::{duplicate_numbers, number_for_center};
use crate::error::Result;
use crate::models::{DetectedRegion, PercentBox, ToothNumber};
use crate::utils::binarization::threshold_bright;
use crate::utils::grayscale::check_buffer;

/// Stage-level counters for one detection run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionReport {
    /// Pixels at or above the brightness threshold
    pub bright_pixels: usize,
    /// Connected clusters before the area band
    pub clusters_found: usize,
    /// Clusters under `min_area`
    pub rejected_small: usize,
    /// Clusters over `max_area`
    pub rejected_large: usize,
    /// Regions returned
    pub regions: usize,
    /// Numbers given to more than one region
    pub duplicate_numbers: Vec<ToothNumber>,
}

fn region_from_cluster(
    id: usize,
    cluster: &Cluster,
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> DetectedRegion {
    let bounding_box = PercentBox::from_pixels(&cluster.bounds, width, height);
    DetectedRegion {
        id,
        bounding_box,
        pixel_area: cluster.pixel_area,
        confidence: params.clamped_confidence(),
        assigned_tooth_number: number_for_center(bounding_box.center(), params.dentition),
    }
}

/// Threshold, cluster, filter and number a grayscale image.
///
/// Either the whole run succeeds or nothing is returned.
pub(crate) fn detect_regions(
    gray: &[u8],
    width: usize,
    height: usize,
    params: &DetectionParams,
) -> Result<(Vec<DetectedRegion>, DetectionReport)> {
    params.validate()?;
    check_buffer(gray, width, height, 1)?;

    let mut report = DetectionReport::default();

    let mask = threshold_bright(gray, width, height, params.threshold);
    report.bright_pixels = mask.count_set();

    let clusters = find_bright_clusters(&mask, params.connectivity);
    report.clusters_found = clusters.len();

    let filtered = filter_by_area(clusters, params.min_area, params.max_area);
    report.rejected_small = filtered.too_small;
    report.rejected_large = filtered.too_large;

    let regions: Vec<DetectedRegion> = filtered
        .kept
        .iter()
        .enumerate()
        .map(|(id, cluster)| region_from_cluster(id, cluster, width, height, params))
        .collect();
    report.regions = regions.len();
    report.duplicate_numbers = duplicate_numbers(&regions);

    log::debug!(
        "detect {}x{} threshold={}: bright={} clusters={} small={} large={} regions={}",
        width,
        height,
        params.threshold,
        report.bright_pixels,
        report.clusters_found,
        report.rejected_small,
        report.rejected_large,
        report.regions
    );
    if !report.duplicate_numbers.is_empty() {
        log::warn!(
            "tooth numbers assigned to several regions: {:?}",
            report
                .duplicate_numbers
                .iter()
                .map(|n| n.value())
                .collect::<Vec<_>>()
        );
    }

    Ok((regions, report))
}

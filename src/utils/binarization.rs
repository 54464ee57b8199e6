use crate::models::BitMatrix;

/// Classify pixels by a global brightness cutoff.
/// Returns a BitMatrix where true = bright (`gray >= threshold`)
pub fn threshold_bright(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut bright = BitMatrix::new(width, height);

    for (y, row) in gray.chunks(width.max(1)).take(height).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value >= threshold {
                bright.set(x, y, true);
            }
        }
    }

    bright
}

/// Otsu's optimal threshold for a grayscale buffer.
///
/// Offered to operators as a starting point for the brightness slider; the
/// detector itself never picks a threshold on its own.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    // Build histogram
    let mut histogram = [0u64; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total = gray.len() as f64;
    if total == 0.0 {
        return 128;
    }
    let total_sum: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut below_count = 0.0f64;
    let mut below_sum = 0.0f64;
    let mut max_variance = 0.0f64;
    let mut optimal_threshold = 128u8;

    // Class 1 holds intensities < t, class 2 holds >= t.
    for t in 1..=255usize {
        below_count += histogram[t - 1] as f64;
        below_sum += (t - 1) as f64 * histogram[t - 1] as f64;
        let above_count = total - below_count;
        if below_count == 0.0 || above_count == 0.0 {
            continue;
        }

        let mean_below = below_sum / below_count;
        let mean_above = (total_sum - below_sum) / above_count;
        let w1 = below_count / total;
        let w2 = above_count / total;
        let variance = w1 * w2 * (mean_below - mean_above).powi(2);

        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = t as u8;
        }
    }

    optimal_threshold
}

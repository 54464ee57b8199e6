use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use flexi_logger::{Logger, LoggerHandle};
use odontogram::tools::{grayscale_stats, load_gray, preview_threshold};
use odontogram::{Connectivity, DetectionParams, Dentition, ToothDetector, ToothLayout, chart};

#[derive(Parser)]
#[command(name = "odontotool", version, about = "Odontogram tooth detection tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Detect tooth regions in a reference image
    Detect {
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        tuning: Tuning,
        /// Write the merged tooth layout JSON here
        #[arg(long)]
        output: Option<PathBuf>,
        /// Start the layout from the static chart before merging
        #[arg(long)]
        seed_chart: bool,
    },
    /// Print grayscale and threshold statistics for an image
    Stats {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Print the static chart layout as JSON
    Chart {
        #[arg(long, default_value = "permanent")]
        dentition: Dentition,
    },
}

#[derive(clap::Args)]
struct Tuning {
    /// JSON params file; ODONTO_* env vars and the flags below override it
    #[arg(long)]
    params: Option<PathBuf>,
    #[arg(long)]
    threshold: Option<u8>,
    #[arg(long)]
    min_area: Option<usize>,
    #[arg(long)]
    max_area: Option<usize>,
    /// 4 or 8
    #[arg(long)]
    connectivity: Option<Connectivity>,
    #[arg(long)]
    dentition: Option<Dentition>,
}

impl Tuning {
    fn resolve(&self) -> anyhow::Result<DetectionParams> {
        let mut params = match &self.params {
            Some(path) => DetectionParams::from_json_file(path)
                .with_context(|| format!("reading params {}", path.display()))?
                .with_env_overrides(),
            None => DetectionParams::from_env(),
        };
        if let Some(v) = self.threshold {
            params.threshold = v;
        }
        if let Some(v) = self.min_area {
            params.min_area = v;
        }
        if let Some(v) = self.max_area {
            params.max_area = v;
        }
        if let Some(v) = self.connectivity {
            params.connectivity = v;
        }
        if let Some(v) = self.dentition {
            params.dentition = v;
        }
        params.validate()?;
        Ok(params)
    }
}

fn setup_logging() -> anyhow::Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;
    Ok(handle)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = setup_logging()?;

    match cli.command {
        Command::Detect {
            image,
            tuning,
            output,
            seed_chart,
        } => detect_cmd(&image, &tuning, output.as_deref(), seed_chart),
        Command::Stats { image, threshold } => stats_cmd(&image, threshold),
        Command::Chart { dentition } => chart_cmd(dentition),
    }
}

fn detect_cmd(
    image: &Path,
    tuning: &Tuning,
    output: Option<&Path>,
    seed_chart: bool,
) -> anyhow::Result<()> {
    let params = tuning.resolve()?;
    let (gray, width, height) = load_gray(image)?;
    println!("Image: {} ({}x{})", image.display(), width, height);

    let detector = ToothDetector::new(params);
    let start = Instant::now();
    let (regions, report) = detector.detect_gray(&gray, width, height)?;
    let elapsed = start.elapsed();

    println!(
        "Clusters: {} found, {} too small, {} too large ({:.1} ms)",
        report.clusters_found,
        report.rejected_small,
        report.rejected_large,
        elapsed.as_secs_f64() * 1000.0
    );
    println!("Found {} tooth regions", regions.len());
    for r in &regions {
        let b = r.bounding_box;
        println!(
            "  [{}] tooth {} at ({:.1}%, {:.1}%) {:.1}x{:.1}% area={}px confidence={:.2}",
            r.id, r.assigned_tooth_number, b.x, b.y, b.width, b.height, r.pixel_area, r.confidence
        );
    }
    if !report.duplicate_numbers.is_empty() {
        let dups: Vec<String> = report
            .duplicate_numbers
            .iter()
            .map(|n| n.to_string())
            .collect();
        println!("Duplicate numbers (last one wins on merge): {}", dups.join(", "));
    }

    if let Some(path) = output {
        let mut layout = if seed_chart {
            ToothLayout::from_chart(detector.params().dentition)
        } else {
            ToothLayout::new()
        };
        layout.apply_detected(&regions);
        layout
            .export_to_file(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote {} positions to {}", layout.len(), path.display());
    }
    Ok(())
}

fn stats_cmd(image: &Path, threshold: Option<u8>) -> anyhow::Result<()> {
    let (gray, width, height) = load_gray(image)?;
    println!("Image: {} ({}x{})", image.display(), width, height);

    let stats = grayscale_stats(&gray);
    println!(
        "Grayscale range: {}-{}, average: {}, suggested threshold: {}",
        stats.min, stats.max, stats.avg, stats.suggested_threshold
    );

    let threshold = threshold.unwrap_or(DetectionParams::from_env().threshold);
    let mask = preview_threshold(&gray, width, height, threshold);
    println!(
        "Threshold {}: bright_pixels={} total={} bright_ratio={:.2}%",
        threshold,
        mask.bright_pixels,
        mask.total_pixels,
        mask.bright_ratio * 100.0
    );
    Ok(())
}

fn chart_cmd(dentition: Dentition) -> anyhow::Result<()> {
    let layout = ToothLayout::from_chart(dentition);
    log::info!(
        "{} teeth on a {}x{} chart canvas",
        layout.len(),
        chart::CHART_CANVAS.width,
        chart::CHART_CANVAS.height
    );
    println!("{}", layout.to_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_params_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        std::fs::write(&path, r#"{"threshold": 90, "minArea": 40, "maxArea": 900}"#).unwrap();
        let tuning = Tuning {
            params: Some(path),
            threshold: Some(150),
            min_area: None,
            max_area: None,
            connectivity: Some(Connectivity::Eight),
            dentition: None,
        };
        let params = tuning.resolve().unwrap();
        assert_eq!(params.threshold, 150);
        assert_eq!(params.min_area, 40);
        assert_eq!(params.max_area, 900);
        assert_eq!(params.connectivity, Connectivity::Eight);
    }

    #[test]
    fn test_flags_cannot_invert_area_band() {
        let tuning = Tuning {
            params: None,
            threshold: None,
            min_area: Some(500),
            max_area: Some(50),
            connectivity: None,
            dentition: None,
        };
        assert!(tuning.resolve().is_err());
    }
}

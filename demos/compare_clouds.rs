use pcqm::metric::{write_csv_header, write_csv_line};
use pcqm::{compute_quality_metric, Colors, CompressionStats, PointCloud, QualityParams};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Synthetic reference cloud: 1000 pseudo-random points with a color ramp
    let n = 1000;
    let reference = PointCloud::from_xyz(
        (0..n).map(|i| (i as f32 * 0.731) % 10.0).collect(),
        (0..n).map(|i| (i as f32 * 0.419) % 10.0).collect(),
        (0..n).map(|i| (i as f32 * 0.257) % 10.0).collect(),
    )
    .with_colors(Colors {
        r: (0..n).map(|i| (i % 256) as u8).collect(),
        g: (0..n).map(|i| (255 - i % 256) as u8).collect(),
        b: vec![128; n],
    });

    // "Decoded" cloud: positions quantized to a 0.1 grid, colors to 16 levels
    let mut decoded = reference.map_positions(|p| p.map(|v| (v * 10.0).round() / 10.0));
    if let Some(colors) = decoded.colors.as_mut() {
        for channel in [&mut colors.r, &mut colors.g, &mut colors.b] {
            for c in channel.iter_mut() {
                *c &= 0xf0;
            }
        }
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_csv_header(&mut out)?;

    for (label, params) in [
        ("raw", QualityParams::default()),
        ("normalized", QualityParams::default().normalized()),
    ] {
        if let Some(metric) = compute_quality_metric(&reference, &decoded, &params)? {
            let metric = metric.with_compression(CompressionStats {
                compressed_size: 4096,
                ..CompressionStats::default()
            });
            write_csv_line(&metric, label, &mut out)?;
        }
    }

    Ok(())
}

#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]

use chainmap::{ChainStats, ChainedHashMap, TableConfig, chain_stats, logger::initialize_logger};
use log::info;
use plotters::prelude::*;
use rand::{Rng, distr::Alphanumeric};

// Keys inserted into every table
const NUM_KEYS: usize = 50_000;
const KEY_LENGTH: usize = 12;
// Growth thresholds compared in the chain-length plot
const THRESHOLDS: [f64; 6] = [0.25, 0.5, 0.75, 1.0, 1.5, 2.0];
// Sample the default table's capacity every this many inserts
const SAMPLE_EVERY: usize = 250;

fn random_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| (&mut rng).sample_iter(&Alphanumeric).take(KEY_LENGTH).map(char::from).collect())
        .collect()
}

fn fill(keys: &[String], config: TableConfig) -> Result<ChainedHashMap<usize>, Box<dyn std::error::Error>> {
    let mut map = ChainedHashMap::with_config(config)?;
    for (i, key) in keys.iter().enumerate() {
        map.set(key, i)?;
    }
    Ok(map)
}

fn plot_chain_lengths(stats: &[(f64, ChainStats)]) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new("chain_lengths.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_chain = stats.iter().map(|(_, s)| s.longest_chain).max().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Chain Length by Load Factor Threshold", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..THRESHOLDS[THRESHOLDS.len() - 1] * 1.1, 0.0..max_chain)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor Threshold")
        .y_desc("Chain Length (entries)")
        .axis_desc_style((font_family, 16))
        .draw()?;

    let series: [(&str, RGBColor, fn(&ChainStats) -> f64); 2] = [
        ("Mean chain (non-empty buckets)", RGBColor(50, 90, 220), |s| s.mean_chain),
        ("Longest chain", RGBColor(220, 50, 50), |s| s.longest_chain as f64),
    ];

    for (label, color, metric) in series {
        let line_style = ShapeStyle::from(&color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(stats.iter().map(|(t, s)| (*t, metric(s))), line_style))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(stats.iter().map(|(t, s)| Circle::new((*t, metric(s)), 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn plot_capacity_growth(samples: &[(usize, usize)]) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let root = BitMapBackend::new("capacity_growth.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_capacity = samples.iter().map(|(_, c)| *c).max().unwrap_or(1) as f64 * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption("Bucket Count of the Default Table", (font_family, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(0..NUM_KEYS, 0.0..max_capacity)?;

    chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Capacity (buckets)")
        .axis_desc_style((font_family, 16))
        .draw()?;

    let line_style = ShapeStyle::from(&RGBColor(50, 180, 50)).stroke_width(2);
    chart
        .draw_series(LineSeries::new(samples.iter().map(|(n, c)| (*n, *c as f64)), line_style))?
        .label("capacity")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    initialize_logger();

    let keys = random_keys(NUM_KEYS);
    info!("generated {} random keys of length {KEY_LENGTH}", keys.len());

    let mut stats = Vec::with_capacity(THRESHOLDS.len());
    for threshold in THRESHOLDS {
        let map = fill(&keys, TableConfig::default().with_load_factor(threshold))?;
        let s = chain_stats(&map);
        info!(
            "threshold {threshold:.2}: {} buckets, {} empty, mean chain {:.2}, longest {}",
            s.buckets, s.empty_buckets, s.mean_chain, s.longest_chain
        );
        stats.push((threshold, s));
    }

    let mut map = ChainedHashMap::new();
    let mut samples = vec![(0, map.capacity())];
    for (i, key) in keys.iter().enumerate() {
        map.set(key, i)?;
        if (i + 1) % SAMPLE_EVERY == 0 {
            samples.push((i + 1, map.capacity()));
        }
    }
    info!("default table ends at {} buckets for {} keys", map.capacity(), map.len());

    plot_chain_lengths(&stats)?;
    plot_capacity_growth(&samples)?;

    info!("Generated plot images: chain_lengths.png, capacity_growth.png");

    Ok(())
}

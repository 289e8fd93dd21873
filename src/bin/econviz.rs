use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use econviz::choropleth::{self, ColorScaleOptions, RegionColor};
use econviz::{assign_axes, build_color_scale, legend, stats, storage, style};
use serde_json::json;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "econviz",
    version,
    about = "Axis assignment & choropleth color scales for economic data"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide which y-axis each series in a data set is drawn against.
    Axes(AxesArgs),
    /// Build an outlier-robust choropleth color scale.
    Choropleth(ChoroplethArgs),
}

#[derive(Args, Debug)]
struct AxesArgs {
    /// Series observations, .csv (series_id,year,value) or .json.
    #[arg(short, long)]
    input: PathBuf,
    /// Also assign a display color to every series.
    #[arg(long, default_value_t = false)]
    colors: bool,
    /// Print per-series summary statistics to stderr.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct ChoroplethArgs {
    /// Region observations, .csv (region,category,value) or .json.
    #[arg(short, long)]
    input: PathBuf,
    /// Scale each category independently (for metrics not comparable
    /// across categories).
    #[arg(long, default_value_t = false)]
    per_category: bool,
    /// Number of palette stops.
    #[arg(long, default_value_t = choropleth::DEFAULT_PALETTE_SIZE)]
    palette_size: usize,
    /// Locale for legend number formatting (en, de, fr, ...).
    #[arg(long, default_value = "en")]
    locale: String,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Axes(args) => cmd_axes(args),
        Command::Choropleth(args) => cmd_choropleth(args),
    }
}

fn cmd_axes(args: AxesArgs) -> Result<()> {
    let points = storage::load_series(&args.input)?;
    log::debug!("loaded {} series observations", points.len());

    let summaries = stats::max_magnitudes(&points);
    let assignment = assign_axes(&summaries).context("assign axes")?;

    let mut out = json!({ "assignment": assignment });
    if args.colors {
        let ids: Vec<&str> = summaries.iter().map(|s| s.series_id.as_str()).collect();
        out["colors"] = serde_json::to_value(style::assign_series_colors(&ids))?;
    }
    println!("{}", serde_json::to_string_pretty(&out)?);
    eprintln!(
        "Assigned {} series ({})",
        assignment.len(),
        if assignment.is_split() {
            "split axes"
        } else {
            "single axis"
        }
    );

    if args.stats {
        for s in stats::grouped_summary(&points) {
            eprintln!(
                "{}  count={} missing={}  min={} max={} mean={} median={}",
                s.series_id,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }
    Ok(())
}

fn cmd_choropleth(args: ChoroplethArgs) -> Result<()> {
    let observations = storage::load_regions(&args.input)?;
    log::debug!("loaded {} region observations", observations.len());

    let scale = build_color_scale(
        &observations,
        ColorScaleOptions {
            per_category: args.per_category,
            palette_size: args.palette_size,
        },
    )
    .context("build color scale")?;

    let ramp = style::choropleth_ramp(scale.palette_size());
    let regions: serde_json::Map<String, serde_json::Value> = scale
        .regions()
        .map(|(region, color)| {
            let v = match color {
                RegionColor::NoData => {
                    json!({ "bucket": null, "fill": style::NO_DATA_COLOR.hex() })
                }
                RegionColor::Bucket(i) => json!({ "bucket": i, "fill": ramp[i].hex() }),
            };
            (region.to_string(), v)
        })
        .collect();

    let mut out = json!({
        "palette": ramp.iter().map(|c| c.hex()).collect::<Vec<_>>(),
        "regions": regions,
        "stats": scale.stats(),
        "legend": legend::legend_for(scale.stats(), scale.thresholds(), &args.locale),
    });
    if !scale.categories().is_empty() {
        let categories: serde_json::Map<String, serde_json::Value> = scale
            .categories()
            .iter()
            .map(|(cat, cs)| {
                (
                    cat.clone(),
                    json!({
                        "stats": cs.stats,
                        "legend": legend::legend_for(&cs.stats, &cs.thresholds, &args.locale),
                    }),
                )
            })
            .collect();
        out["categories"] = serde_json::Value::Object(categories);
    }
    println!("{}", serde_json::to_string_pretty(&out)?);

    let no_data = scale
        .regions()
        .filter(|(_, c)| matches!(c, RegionColor::NoData))
        .count();
    eprintln!("Scaled {} regions ({} no data)", scale.len(), no_data);
    Ok(())
}

use insilicogel::render_export::export_paged_svg;
use insilicogel::render_plotly::{export_scrollable_figure, export_scrollable_html, figure_to_json};
use insilicogel::{
    GEL_LADDERS, about,
    gel_layout::{build_paged_layout, build_scrollable_layout, load_sample_sheet},
    migrate::migrate,
};
use serde::Serialize;
use std::{env, fs};

const DEFAULT_TITLE: &str = "In-silico gel";
const DEFAULT_LADDER: &str = "1kb+";
const DEFAULT_ROW_LEN: usize = 12;
const DEFAULT_VISIBLE_LANES: usize = 20;

#[derive(Serialize)]
struct LadderSummary {
    name: String,
    display_name: String,
    bands: usize,
    min_bp: f64,
    max_bp: f64,
}

#[derive(Serialize)]
struct MigrateReport {
    ladder: String,
    sizes_bp: Vec<f64>,
    positions: Vec<f64>,
}

struct RenderOptions {
    title: String,
    ladder: String,
    row_len: usize,
    visible_lanes: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            ladder: DEFAULT_LADDER.to_string(),
            row_len: DEFAULT_ROW_LEN,
            visible_lanes: DEFAULT_VISIBLE_LANES,
        }
    }
}

fn usage() {
    eprintln!(
        "Usage:\n  \
  insilicogel_cli --version\n  \
  insilicogel_cli ladders\n  \
  insilicogel_cli [--ladder NAME] migrate SIZE_BP...\n  \
  insilicogel_cli [OPTIONS] render-svg SHEET.json OUTPUT.svg\n  \
  insilicogel_cli [OPTIONS] render-plotly SHEET.json OUTPUT.json\n  \
  insilicogel_cli [OPTIONS] render-html SHEET.json OUTPUT.html\n\n  \
  Options:\n  \
  --title TEXT     figure title (default: {DEFAULT_TITLE})\n  \
  --ladder NAME    reference ladder (default: {DEFAULT_LADDER})\n  \
  --row-len N      samples per row for render-svg (default: {DEFAULT_ROW_LEN})\n  \
  --visible N      initially visible lanes for render-plotly/render-html (default: {DEFAULT_VISIBLE_LANES})\n\n  \
  Sample sheets are JSON arrays of {{\"name\", \"sizes_bp\"}} objects"
    );
}

fn parse_options(args: &[String]) -> Result<(RenderOptions, usize), String> {
    let mut options = RenderOptions::default();
    let mut idx = 1usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--title" => {
                options.title = take_value(args, &mut idx, "--title")?;
            }
            "--ladder" => {
                options.ladder = take_value(args, &mut idx, "--ladder")?;
            }
            "--row-len" => {
                let value = take_value(args, &mut idx, "--row-len")?;
                options.row_len = value
                    .parse()
                    .map_err(|e| format!("Invalid --row-len '{value}': {e}"))?;
            }
            "--visible" => {
                let value = take_value(args, &mut idx, "--visible")?;
                options.visible_lanes = value
                    .parse()
                    .map_err(|e| format!("Invalid --visible '{value}': {e}"))?;
            }
            _ => break,
        }
    }
    Ok((options, idx))
}

fn take_value(args: &[String], idx: &mut usize, flag: &str) -> Result<String, String> {
    if *idx + 1 >= args.len() {
        return Err(format!("Missing value after {flag}"));
    }
    let value = args[*idx + 1].clone();
    *idx += 2;
    Ok(value)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Could not serialize JSON output: {e}"))?;
    println!("{text}");
    Ok(())
}

fn ladder_summaries() -> Vec<LadderSummary> {
    let mut summaries: Vec<LadderSummary> = GEL_LADDERS
        .iter()
        .map(|ladder| LadderSummary {
            name: ladder.name().to_string(),
            display_name: ladder.kind().display_name().to_string(),
            bands: ladder.points().len(),
            min_bp: ladder.min_bp(),
            max_bp: ladder.max_bp(),
        })
        .collect();
    summaries.sort_by(|a, b| a.name.cmp(&b.name));
    summaries
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();
    if args.len() <= 1 {
        usage();
        return Err("Missing command".to_string());
    }
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("{}", about::version_cli_text());
        return Ok(());
    }

    let (options, cmd_idx) = parse_options(&args)?;
    if args.len() <= cmd_idx {
        usage();
        return Err("Missing command".to_string());
    }

    let command = &args[cmd_idx];

    match command.as_str() {
        "ladders" => print_json(&ladder_summaries()),
        "migrate" => {
            if args.len() <= cmd_idx + 1 {
                usage();
                return Err("migrate requires at least one size in bp".to_string());
            }
            let sizes_bp = args[cmd_idx + 1..]
                .iter()
                .map(|a| {
                    a.parse::<f64>()
                        .map_err(|e| format!("Invalid size '{a}': {e}"))
                })
                .collect::<Result<Vec<_>, String>>()?;
            let positions = migrate(&sizes_bp, &options.ladder).map_err(|e| e.to_string())?;
            let ladder = GEL_LADDERS
                .resolve(&options.ladder)
                .map_err(|e| e.to_string())?;
            print_json(&MigrateReport {
                ladder: ladder.name().to_string(),
                sizes_bp,
                positions,
            })
        }
        "render-svg" => {
            let (sheet_path, output) = render_paths(&args, cmd_idx, "render-svg", "OUTPUT.svg")?;
            let samples = load_sample_sheet(sheet_path).map_err(|e| e.to_string())?;
            let layout =
                build_paged_layout(&samples, &options.title, &options.ladder, options.row_len)
                    .map_err(|e| e.to_string())?;
            let svg = export_paged_svg(&layout);
            fs::write(output, svg)
                .map_err(|e| format!("Could not write SVG output '{output}': {e}"))?;
            println!(
                "Wrote paged gel SVG for {} samples in {} rows to '{output}'",
                layout.sample_count,
                layout.rows.len()
            );
            Ok(())
        }
        "render-plotly" => {
            let (sheet_path, output) =
                render_paths(&args, cmd_idx, "render-plotly", "OUTPUT.json")?;
            let samples = load_sample_sheet(sheet_path).map_err(|e| e.to_string())?;
            let layout = build_scrollable_layout(
                &samples,
                &options.title,
                &options.ladder,
                options.visible_lanes,
            )
            .map_err(|e| e.to_string())?;
            let figure = export_scrollable_figure(&layout);
            let json = figure_to_json(&figure).map_err(|e| e.to_string())?;
            fs::write(output, json)
                .map_err(|e| format!("Could not write figure output '{output}': {e}"))?;
            println!(
                "Wrote scrollable gel figure for {} lanes to '{output}'",
                layout.lane_count()
            );
            Ok(())
        }
        "render-html" => {
            let (sheet_path, output) = render_paths(&args, cmd_idx, "render-html", "OUTPUT.html")?;
            let samples = load_sample_sheet(sheet_path).map_err(|e| e.to_string())?;
            let layout = build_scrollable_layout(
                &samples,
                &options.title,
                &options.ladder,
                options.visible_lanes,
            )
            .map_err(|e| e.to_string())?;
            let figure = export_scrollable_figure(&layout);
            let html = export_scrollable_html(&figure).map_err(|e| e.to_string())?;
            fs::write(output, html)
                .map_err(|e| format!("Could not write HTML output '{output}': {e}"))?;
            println!(
                "Wrote scrollable gel page for {} lanes to '{output}'",
                layout.lane_count()
            );
            Ok(())
        }
        _ => {
            usage();
            Err(format!("Unknown command '{command}'"))
        }
    }
}

fn render_paths<'a>(
    args: &'a [String],
    cmd_idx: usize,
    command: &str,
    output_hint: &str,
) -> Result<(&'a str, &'a str), String> {
    if args.len() <= cmd_idx + 2 {
        usage();
        return Err(format!("{command} requires: SHEET.json {output_hint}"));
    }
    Ok((args[cmd_idx + 1].as_str(), args[cmd_idx + 2].as_str()))
}

use insilicogel::example_sheets::{interactive_demo, minimal_pair, pcr_panel};
use insilicogel::gel_layout::{build_paged_layout, build_scrollable_layout, save_sample_sheet};
use insilicogel::render_export::export_paged_svg;
use insilicogel::render_plotly::{export_scrollable_figure, export_scrollable_html, figure_to_json};
use serde::Serialize;
use std::{env, fs, process};

const DEFAULT_OUTPUT_DIR: &str = "docs/examples/gels";

#[derive(Debug, Default)]
struct CliArgs {
    show_help: bool,
    output_dir: String,
}

#[derive(Debug, Serialize)]
struct ExampleGelReport {
    output_dir: String,
    sheet_count: usize,
    generated_files: Vec<String>,
}

fn usage() {
    eprintln!(
        "Usage:\n  \
insilicogel_examples [generate] [--output DIR]\n\n  \
Renders the bundled example sample sheets into DIR.\n\n  \
Defaults:\n  \
  --output {DEFAULT_OUTPUT_DIR}"
    );
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        ..CliArgs::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--help" | "-h" => {
                parsed.show_help = true;
                idx += 1;
            }
            "--output" => {
                if idx + 1 >= args.len() {
                    return Err("Missing DIR after --output".to_string());
                }
                parsed.output_dir = args[idx + 1].clone();
                idx += 2;
            }
            "generate" => {
                idx += 1;
            }
            other => {
                return Err(format!("Unknown argument '{other}'"));
            }
        }
    }
    Ok(parsed)
}

fn write_text(path: &str, text: &str, generated: &mut Vec<String>) -> Result<(), String> {
    fs::write(path, text).map_err(|e| format!("Could not write '{path}': {e}"))?;
    generated.push(path.to_string());
    Ok(())
}

fn run_generate_mode(output_dir: &str) -> Result<(), String> {
    fs::create_dir_all(output_dir)
        .map_err(|e| format!("Could not create output directory '{output_dir}': {e}"))?;
    let mut generated = vec![];

    let panel = pcr_panel();
    let sheet_path = format!("{output_dir}/pcr_panel.sheet.json");
    save_sample_sheet(&sheet_path, &panel).map_err(|e| e.to_string())?;
    generated.push(sheet_path);
    let layout = build_paged_layout(&panel, "PCR panel", "1kb+", 12).map_err(|e| e.to_string())?;
    write_text(
        &format!("{output_dir}/pcr_panel.svg"),
        &export_paged_svg(&layout),
        &mut generated,
    )?;

    let pair = minimal_pair();
    let sheet_path = format!("{output_dir}/minimal_pair.sheet.json");
    save_sample_sheet(&sheet_path, &pair).map_err(|e| e.to_string())?;
    generated.push(sheet_path);
    let layout =
        build_paged_layout(&pair, "Two-sample check", "1kb+", 12).map_err(|e| e.to_string())?;
    write_text(
        &format!("{output_dir}/minimal_pair.svg"),
        &export_paged_svg(&layout),
        &mut generated,
    )?;

    let demo = interactive_demo();
    let sheet_path = format!("{output_dir}/interactive_demo.sheet.json");
    save_sample_sheet(&sheet_path, &demo).map_err(|e| e.to_string())?;
    generated.push(sheet_path);
    let layout =
        build_scrollable_layout(&demo, "Example gel", "1kb+", 20).map_err(|e| e.to_string())?;
    let figure = export_scrollable_figure(&layout);
    write_text(
        &format!("{output_dir}/interactive_demo.figure.json"),
        &figure_to_json(&figure).map_err(|e| e.to_string())?,
        &mut generated,
    )?;
    write_text(
        &format!("{output_dir}/interactive_demo.html"),
        &export_scrollable_html(&figure).map_err(|e| e.to_string())?,
        &mut generated,
    )?;

    let report = ExampleGelReport {
        output_dir: output_dir.to_string(),
        sheet_count: 3,
        generated_files: generated,
    };
    let pretty = serde_json::to_string_pretty(&report)
        .map_err(|e| format!("Could not serialize generation report: {e}"))?;
    println!("{pretty}");
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let parsed = match parse_args(&args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{e}");
            usage();
            process::exit(1);
        }
    };
    if parsed.show_help {
        usage();
        return;
    }

    if let Err(e) = run_generate_mode(&parsed.output_dir) {
        eprintln!("{e}");
        process::exit(1);
    }
}

use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tabular_export::config::config::Config;
use tabular_export::config::settings::VisualSettings;
use tabular_export::data::data_exporter::{CsvQuoting, ExportFormat};
use tabular_export::data::data_view::{DataView, VisualUpdateOptions};
use tabular_export::data::datatable::DataTable;
use tabular_export::data::projector::CellRendering;
use tabular_export::host::{DirectorySaver, RenderSurface, Visual};
use tabular_export::ui::html_surface::HtmlTableSurface;
use tabular_export::ui::table_visual::{RenderState, TableVisual};
use tabular_export::ui::terminal_surface::TerminalTableSurface;
use tabular_export::utils::logging;

fn print_help() {
    println!("{}", "tabular-export - render a data view and export it".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  tabular-export [OPTIONS] <FILE.json|FILE.csv>");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}  - Export format (csv, json)", "--format <FMT>".green());
    println!("  {} - CSV quoting (minimal, none)", "--quoting <MODE>".green());
    println!("  {}     - Render 0, false and \"\" as blank", "--blank-falsy".green());
    println!("  {}   - Write the HTML table to PATH", "--html <PATH>".green());
    println!("  {}     - Export directory (default: .)", "--out <DIR>".green());
    println!("  {}       - Render only, do not export", "--no-export".green());
    println!("  {}       - Print recent log entries", "--show-log".green());
    println!(
        "  {} - Generate config file with defaults",
        "--generate-config".green()
    );
    println!("  {}            - Show this help", "--help".green());
    println!();
}

/// Value following a `--flag` argument
fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|arg| arg == flag) {
        Some(pos) => args
            .get(pos + 1)
            .map(|v| Some(v.as_str()))
            .ok_or_else(|| anyhow!("{} needs a value", flag)),
        None => Ok(None),
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

fn load_update(path: &Path) -> Result<VisualUpdateOptions> {
    if has_extension(path, "csv") {
        let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
        let table = DataTable::from_csv_reader(file)?;
        Ok(VisualUpdateOptions::single(DataView::from_table(&table)))
    } else {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read {}", path.display()))?;
        VisualUpdateOptions::from_json_str(&text)
    }
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, Config::create_default_with_comments())?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.iter().any(|a| a == "--generate-config") {
        return generate_config();
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("{}", format!("Using default config: {}", e).yellow());
        Config::default()
    });
    let log_buffer = logging::init_tracing(&config.logging);

    let mut settings: VisualSettings = config.visual_settings();
    if let Some(format) = flag_value(&args, "--format")? {
        settings.export.format = format.parse::<ExportFormat>()?;
    }
    if let Some(quoting) = flag_value(&args, "--quoting")? {
        settings.export.quoting = quoting.parse::<CsvQuoting>()?;
    }
    if args.iter().any(|a| a == "--blank-falsy") {
        settings.display.cell_rendering = CellRendering::Falsy;
    }

    let html_path = flag_value(&args, "--html")?.map(PathBuf::from);
    let out_dir = flag_value(&args, "--out")?
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    let input = args
        .iter()
        .filter(|arg| !arg.starts_with("--"))
        .find(|arg| {
            let path = Path::new(arg);
            has_extension(path, "json") || has_extension(path, "csv")
        })
        .ok_or_else(|| anyhow!("No input file given (expected FILE.json or FILE.csv)"))?;

    let update = load_update(Path::new(input))?;

    let mut visual = TableVisual::new(TerminalTableSurface::new(), settings.clone());
    visual.on_data_changed(&update);

    if let Some(path) = &html_path {
        let mut html_visual = TableVisual::new(HtmlTableSurface::new(), settings);
        html_visual.on_data_changed(&update);
        fs::write(path, html_visual.surface().to_html())
            .with_context(|| format!("Cannot write {}", path.display()))?;
        println!("{}", format!("HTML written to {}", path.display()).green());
    }

    match visual.state() {
        RenderState::Empty => {
            println!("{}", "No data to draw table.".yellow());
        }
        RenderState::Rendered { rows, .. } => {
            if let Some(table) = visual.surface().render() {
                println!("{table}");
            }
            println!("\n{}", format!("{} rows rendered", rows).green());

            if !args.iter().any(|a| a == "--no-export") {
                if let Some(trigger) = visual.surface().export_control() {
                    let saver = DirectorySaver::new(out_dir.clone());
                    let mut failed = false;
                    trigger.invoke(&saver).apply_to_status(
                        |message| println!("{}", message.green()),
                        |prefix, error| {
                            eprintln!("{}", format!("{}: {:#}", prefix, error).red());
                            failed = true;
                        },
                    );
                    if failed {
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    if args.iter().any(|a| a == "--show-log") {
        for entry in log_buffer.get_recent(50) {
            println!("{}", entry.format_for_display());
        }
    }

    Ok(())
}

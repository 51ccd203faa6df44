//! CLI entry point.
//!
//! # Responsibility
//! - Render dashboard sections over the seeded data for local checks.
//! - Export CSV documents to a directory.
//! - Keep output deterministic apart from the wall clock.

use clap::{Args, Parser, Subcommand};
use log::info;
use recordkeeper_core::{
    init_logging, AppConfig, AppContext, Facet, FilterState, LogNotifier, Presenter, RecordId,
    Section, SystemClock, TextPresenter,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "recordkeeper", version, about = "Smart Record Keeper dashboard")]
struct Cli {
    /// JSON config file; defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage information.
    Ping,
    /// List the sidebar sections.
    Sections,
    /// Render one section.
    Show(ShowArgs),
    /// Write a CSV export.
    #[command(subcommand)]
    Export(ExportCommand),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Sidebar label, e.g. `invoices` or `sales-track`.
    section: String,
    #[arg(long, default_value = "")]
    search: String,
    /// Facet selection as `facet=value`; repeatable.
    #[arg(long = "select", value_parser = parse_selection)]
    selections: Vec<(Facet, String)>,
    /// Print the view-model as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Subcommand)]
enum ExportCommand {
    /// All sales as `sales_export.csv`.
    Sales {
        #[arg(long)]
        out: PathBuf,
    },
    /// One generated report.
    Report {
        id: String,
        #[arg(long)]
        out: PathBuf,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Ping => "ping",
            Self::Sections => "sections",
            Self::Show(_) => "show",
            Self::Export(ExportCommand::Sales { .. }) => "export_sales",
            Self::Export(ExportCommand::Report { .. }) => "export_report",
        }
    }
}

fn parse_selection(raw: &str) -> Result<(Facet, String), String> {
    let (facet, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected facet=value, got `{raw}`"))?;
    let facet = Facet::parse(facet).ok_or_else(|| format!("unknown facet `{facet}`"))?;
    Ok((facet, value.trim().to_string()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = AppConfig::load(cli.config.as_deref()).map_err(|err| err.to_string())?;
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.log_dir = Some(dir);
    }
    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir)?;
    }

    let ctx = AppContext::new(config, Arc::new(SystemClock), Arc::new(LogNotifier));
    info!("event=cli_dispatch module=cli status=ok command={}", cli.command.name());
    match cli.command {
        Command::Ping => {
            println!("recordkeeper_core ping={}", recordkeeper_core::ping());
            println!(
                "recordkeeper_core version={}",
                recordkeeper_core::core_version()
            );
        }
        Command::Sections => {
            for section in Section::ALL {
                println!("{}", section.label());
            }
        }
        Command::Show(args) => {
            let filter = args.selections.into_iter().fold(
                FilterState::new().with_search(args.search),
                |filter, (facet, value)| filter.with_selection(facet, value),
            );
            let view = ctx.render_section_filtered(Section::from_label(&args.section), filter);
            if args.json {
                let json = serde_json::to_string_pretty(&view).map_err(|err| err.to_string())?;
                println!("{json}");
            } else {
                print!("{}", TextPresenter.section(&view));
            }
        }
        Command::Export(ExportCommand::Sales { out }) => {
            let path = ctx
                .sales()
                .export_csv()
                .write_into(&out)
                .map_err(|err| err.to_string())?;
            println!("{}", path.display());
        }
        Command::Export(ExportCommand::Report { id, out }) => {
            let document = ctx
                .reports()
                .download(&RecordId::new(id.clone()))
                .ok_or_else(|| format!("no report with id `{id}`"))?;
            let path = document.write_into(&out).map_err(|err| err.to_string())?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

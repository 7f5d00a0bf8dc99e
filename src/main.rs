use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use foodware_projections::catalog::store::{load_catalog, write_catalog};
use foodware_projections::catalog::{CatalogData, StaticCatalog};
use foodware_projections::config::{Config, ConfigOverrides};
use foodware_projections::lineitem::{LineItemKind, RawLineItem};
use foodware_projections::options::{EngineOptions, ProjectCategory};
use foodware_projections::output::csv::{rollup_to_csv, summary_to_csv};
use foodware_projections::output::json::render_json;
use foodware_projections::output::table::{
    render_catalog_table, render_environmental_table, render_financial_table,
    render_reusable_items_table, render_rollup_table, render_summary_table,
};
use foodware_projections::projection::{ProjectionEngine, ProjectionsResponse};
use foodware_projections::rollup::{GroupBy, RollupRow};
use foodware_projections::server::run_server;
use serde::Deserialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "foodware-projections",
    about = "Baseline vs forecast projections for single-use and reusable foodware"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    /// Project category: default or event.
    #[arg(long)]
    category: Option<ProjectCategory>,
    /// Show shrinkage (items lost) instead of return rate.
    #[arg(long)]
    shrinkage: bool,
    /// Show weights in kilograms and water in liters.
    #[arg(long)]
    metric: bool,
    /// JSON product catalog to use instead of the configured one.
    #[arg(long)]
    catalog: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Project {
        #[arg(short, long)]
        input: PathBuf,
    },
    Rollup {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(long, default_value = "category")]
        by: GroupBy,
        /// Roll up reusable products instead of single-use products.
        #[arg(long)]
        reusable: bool,
        #[arg(long)]
        active_only: bool,
    },
    Catalog {
        /// Write the active catalog to a JSON file.
        #[arg(long)]
        export: Option<PathBuf>,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

/// Input files hold either a bare list of line items or a project object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProjectFile {
    Items(Vec<RawLineItem>),
    #[serde(rename_all = "camelCase")]
    Project { line_items: Vec<RawLineItem> },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        project_category: cli.category,
        use_shrinkage_rate: cli.shrinkage.then_some(true),
        display_as_metric: cli.metric.then_some(true),
        catalog_path: cli.catalog.clone(),
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }

    let catalog = load_catalog(config.resolved_catalog_path().as_deref())?;

    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, catalog, addr).await;
    }

    let options = config.engine_options();
    let engine = ProjectionEngine::new(&catalog, &config.factors, &config.bottle_station);

    match &cli.command {
        Commands::Project { input } => {
            let line_items = read_line_items(input)?;
            let run = engine.project(&line_items, &options)?;
            for orphan in &run.orphans {
                warn!("{orphan}");
            }
            print_projections(&run.response, &options, cli.output)?;
        }
        Commands::Rollup {
            input,
            by,
            reusable,
            active_only,
        } => {
            let line_items = read_line_items(input)?;
            let kind = if *reusable {
                LineItemKind::Reusable
            } else {
                LineItemKind::SingleUse
            };
            let options = EngineOptions {
                active_groups_only: *active_only,
                ..options
            };
            let rows = engine.rollup(&line_items, *by, Some(kind), &options)?;
            print_rollup(&rows, *by, &options, cli.output)?;
        }
        Commands::Catalog { export } => {
            if let Some(path) = export {
                write_catalog(path, catalog.data())?;
                info!("wrote catalog to {}", path.display());
            }
            print_catalog(&catalog, cli.output)?;
        }
        Commands::Config { .. } => {}
        Commands::Serve { .. } => unreachable!("serve command handled before dispatch"),
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &PathBuf) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn read_line_items(path: &Path) -> Result<Vec<RawLineItem>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading line items: {}", path.display()))?;
    let parsed: ProjectFile = serde_json::from_str(&data)
        .with_context(|| format!("failed parsing line items JSON: {}", path.display()))?;
    Ok(match parsed {
        ProjectFile::Items(items) => items,
        ProjectFile::Project { line_items } => line_items,
    })
}

fn print_projections(
    response: &ProjectionsResponse,
    options: &EngineOptions,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_summary_table(response, options.display_as_metric));
            println!("{}", render_financial_table(&response.financial_results));
            println!(
                "{}",
                render_environmental_table(&response.environmental_results, options.display_as_metric)
            );
            let single_use = &response.single_use_results.grouped.by_category;
            if !single_use.is_empty() {
                println!(
                    "{}",
                    render_rollup_table(single_use, GroupBy::Category, options.display_as_metric)
                );
            }
            let reusables = &response.reusable_results.items;
            if !reusables.is_empty() {
                println!(
                    "{}",
                    render_reusable_items_table(reusables, options.use_shrinkage_rate)
                );
            }
            let bottles = &response.bottle_station_results;
            if bottles.station_count > 0 {
                println!(
                    "Bottle stations: {} dispensing {:.0} gal/yr, {:.0} bottles avoided",
                    bottles.station_count, bottles.annual_gallons_dispensed, bottles.bottles_avoided
                );
            }
        }
        OutputFormat::Json => println!("{}", render_json(response)?),
        OutputFormat::Csv => println!("{}", summary_to_csv(response, options.display_as_metric)?),
    }
    Ok(())
}

fn print_rollup(
    rows: &[RollupRow],
    group_by: GroupBy,
    options: &EngineOptions,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => println!(
            "{}",
            render_rollup_table(rows, group_by, options.display_as_metric)
        ),
        OutputFormat::Json => println!("{}", render_json(rows)?),
        OutputFormat::Csv => println!(
            "{}",
            rollup_to_csv(rows, group_by, options.display_as_metric)?
        ),
    }
    Ok(())
}

fn print_catalog(catalog: &StaticCatalog, format: OutputFormat) -> Result<()> {
    let data: &CatalogData = catalog.data();
    match format {
        OutputFormat::Table => println!("{}", render_catalog_table(data)),
        OutputFormat::Json => println!("{}", render_json(data)?),
        OutputFormat::Csv => {
            warn!("CSV output for catalog not implemented, using JSON");
            println!("{}", render_json(data)?);
        }
    }
    Ok(())
}

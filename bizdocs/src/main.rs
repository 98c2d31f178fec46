mod cli;
mod config;
mod macros;
mod model;
mod records;
mod sink;
mod template;

use std::{
    error::Error,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use model::Document;
use resolve_path::PathResolveExt;
use sink::{DownloadSink, PrintSink};
use template::TemplateFactory;

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(bin_name = env!("CARGO_BIN_NAME"))]
enum Cli {
    #[command(about = "Prints tool version")]
    #[command(long_about = None)]
    Version,

    #[command(about = "Render documents from a record file to stdout")]
    #[command(long_about = None)]
    Render(RenderArgs),

    #[command(about = "Open documents in the browser and print them")]
    #[command(long_about = None)]
    Print(PrintArgs),

    #[command(about = "Save documents as HTML files")]
    #[command(long_about = None)]
    Download(DownloadArgs),

    #[command(about = "Create a record interactively")]
    #[command(long_about = None)]
    Create(CreateArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    #[arg()]
    records: PathBuf,
}

#[derive(clap::Args)]
struct PrintArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    #[arg(required = true)]
    records: Vec<PathBuf>,
}

#[derive(clap::Args)]
struct DownloadArgs {
    #[arg(short='c', long, default_value=Some("./config.toml"))]
    config_path: PathBuf,

    /// Overrides `output_dir` from the config.
    #[arg(short = 'o', long)]
    out_dir: Option<PathBuf>,

    #[arg(required = true)]
    records: Vec<PathBuf>,
}

#[derive(clap::Args)]
struct CreateArgs {
    #[arg(value_enum)]
    kind: Kind,

    /// Where to save the record. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy)]
enum Kind {
    Receipt,
    Quotation,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match Cli::parse() {
        Cli::Version => {
            println!(env!("CARGO_PKG_VERSION"));
        }
        Cli::Render(args) => {
            let cfg = load_config(args.config_path)?;
            let factory = TemplateFactory::new(cfg.branding);

            for doc in load_records(&args.records)? {
                println!("{}", template::render_template(&doc, &factory));
            }
        }
        Cli::Print(args) => {
            let cfg = load_config(args.config_path)?;
            let factory = TemplateFactory::new(cfg.branding);
            let sink = PrintSink::new(cfg.print_delay_ms);

            for path in args.records {
                for doc in load_records(&path)? {
                    template::print_document(&doc, &factory, &sink)
                        .with_context(|| format!("print {}", doc.number()))?;
                }
            }
        }
        Cli::Download(args) => {
            let cfg = load_config(args.config_path)?;

            let out_dir = match args.out_dir {
                Some(dir) => dir.try_resolve()?.into_owned(),
                None => cfg.output_dir,
            };

            let factory = TemplateFactory::new(cfg.branding);
            let sink = DownloadSink::new(out_dir);

            for path in args.records {
                for doc in load_records(&path)? {
                    let outcome = template::download_document(&doc, &factory, &sink)
                        .with_context(|| format!("download {}", doc.number()))?;

                    println!("{}", outcome.path().display());
                }
            }
        }
        Cli::Create(args) => {
            let doc = match args.kind {
                Kind::Receipt => Document::Receipt(cli::ask_receipt()?),
                Kind::Quotation => Document::Quotation(cli::ask_quotation()?),
            };

            match args.out {
                Some(path) => {
                    records::save(&doc, &path)?;
                    info!("Запись {} сохранена в {:?}", doc.number(), path);
                }
                None => println!("{}", records::to_string(&doc)?),
            }
        }
    };

    Ok(())
}

fn load_config(path: PathBuf) -> anyhow::Result<config::Config> {
    debug!("Подгружаем конфиг из {:?}", path);

    config::load(path.clone()).with_context(|| format!("load config {:?}", path))
}

fn load_records(path: &Path) -> anyhow::Result<Vec<Document>> {
    debug!("Подгружаем записи из {:?}", path);

    records::load(path).with_context(|| format!("load records from {:?}", path))
}

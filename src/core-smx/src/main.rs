use std::path::PathBuf;

use clap::Parser;

use core_smx::sitemap::{SectionKind, SitemapConfig, build_index, build_section, render_sitemap_index, render_url_set, select_chunk};
use core_smx::{get_db_pool, setup_logging};
use data_model_smx::store::PgStore;

/// One-off sitemap document generation against the live database.
#[derive(Parser)]
#[command(name = "smx-gen")]
#[command(about = "Render a sitemap document to stdout or a file", long_about = None)]
struct SmxGen {
    /// Section to render (static, states, cities, locations, services,
    /// service-locations, profiles, dentists, posts, insurance).
    /// Omit to render the sitemap-index document.
    #[arg(short, long)]
    section: Option<String>,

    /// 1-based chunk of a chunkable section.
    #[arg(short, long)]
    chunk: Option<usize>,

    /// Output file path; prints to stdout when omitted.
    #[arg(short, long, value_parser = validate_output_file)]
    output: Option<PathBuf>,
}

fn validate_output_file(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    if path.exists() && path.is_dir() {
        return Err(format!("Output path is a directory: {}", path.display()));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        return Err(format!(
            "Output file parent directory does not exist: {}",
            parent.display()
        ));
    }

    Ok(path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("core_smx=info,data_model_smx=info");

    let cli = SmxGen::parse();
    let config = SitemapConfig::from_env();

    let xml = match &cli.section {
        None => render_sitemap_index(&build_index(&config, chrono::Utc::now().date_naive()))?,
        Some(raw) => {
            let kind: SectionKind = raw.parse()?;
            let store = PgStore::new(get_db_pool().await);
            let entries = build_section(&store, &config, kind).await?;
            let page = select_chunk(&config, kind, &entries, cli.chunk);
            tracing::info!(section = kind.query_value(), entries = page.len(), "rendered section");
            render_url_set(page)?
        }
    };

    match &cli.output {
        Some(path) => std::fs::write(path, xml)?,
        None => println!("{xml}"),
    }

    Ok(())
}

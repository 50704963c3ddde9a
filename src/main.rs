use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use listing_scout::config::AppConfig;
use listing_scout::models::{CategoryDetails, DetailRecord, Listing, PriceSource, Priced};
use listing_scout::pricing::{
    format_price_for_display, parse_marketplace_price, Area, Distance, PriceConversionService,
};
use listing_scout::scrapers::details::extract_url_from_markdown;
use listing_scout::scrapers::{slugify, HttpFetcher, ListingPaginator, Region, SearchParams};
use listing_scout::services::{
    CsvExporter, DetailBatchFetcher, DolarApiClient, FetchStrategy, LogNotifier, RecordExporter,
    SearchProducts,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-scout", about = "Scrape marketplace listings and normalize their prices")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scrape search results for a query
    Search {
        /// Search terms
        query: String,
        /// Country site code (ar, mx, br, ...)
        #[arg(long, default_value = "ar")]
        region: Region,
        /// Listings wanted; the last page may overshoot it
        #[arg(long, default_value_t = 100)]
        limit: usize,
        /// Also scrape every listing's detail page
        #[arg(long)]
        details: bool,
        /// sequential or concurrent detail fetching
        #[arg(long, default_value = "concurrent")]
        strategy: FetchStrategy,
        /// Add local and USD prices using the current exchange rate
        #[arg(long)]
        convert: bool,
        /// Write the listings to CSV in the data directory
        #[arg(long)]
        export: bool,
    },
    /// Scrape the given detail pages
    Details {
        #[arg(required = true)]
        urls: Vec<String>,
        #[arg(long, default_value = "concurrent")]
        strategy: FetchStrategy,
        #[arg(long)]
        convert: bool,
        /// Export under this name
        #[arg(long)]
        export: Option<String>,
    },
}

#[derive(Serialize)]
struct Report<'a, T> {
    name: &'a str,
    scraped_at: DateTime<Utc>,
    count: usize,
    items: &'a [T],
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    info!("🛒 Listing Scout");

    match cli.command {
        Command::Search {
            query,
            region,
            limit,
            details,
            strategy,
            convert,
            export,
        } => {
            let params = SearchParams { region, query, limit };
            run_search(&config, &params, details, strategy, convert, export).await
        }
        Command::Details {
            urls,
            strategy,
            convert,
            export,
        } => run_details(&config, &urls, strategy, convert, export.as_deref()).await,
    }
}

async fn run_search(
    config: &AppConfig,
    params: &SearchParams,
    details: bool,
    strategy: FetchStrategy,
    convert: bool,
    export: bool,
) -> Result<()> {
    let fetcher = HttpFetcher::new(config.http_timeout)?;
    let paginator = ListingPaginator::new(fetcher.clone(), LogNotifier, config.scraper.clone());
    let exporter = export.then(|| CsvExporter::new(&config.data_dir, config.csv_separator));
    let search = SearchProducts::new(paginator, exporter);

    let listings = search
        .execute(params)
        .await
        .with_context(|| format!("Search for '{}' failed", params.query))?;

    info!("✅ Scraped {} listings", listings.len());

    if convert {
        let priced = convert_prices(config, listings.clone()).await?;
        print_listings(&priced);
        write_report(&config.data_dir, &params.query, &priced).await?;
    } else {
        let unpriced: Vec<_> = listings.iter().cloned().map(Priced::unconverted).collect();
        print_listings(&unpriced);
        write_report(&config.data_dir, &params.query, &listings).await?;
    }

    if details {
        let urls: Vec<String> = listings.iter().filter_map(|l| l.detail_url.clone()).collect();
        let name = format!("{} details", params.query);
        let export_name = export.then_some(name.as_str());
        run_details(config, &urls, strategy, convert, export_name).await?;
    }

    Ok(())
}

async fn run_details(
    config: &AppConfig,
    urls: &[String],
    strategy: FetchStrategy,
    convert: bool,
    export: Option<&str>,
) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(config.http_timeout)?);
    let batch = DetailBatchFetcher::new(fetcher);

    info!("Visiting {} detail pages ({})", urls.len(), strategy);
    let records = batch.fetch_details(urls, strategy).await;
    info!("✅ Scraped {} of {} detail pages", records.len(), urls.len());

    let name = export.unwrap_or("details");
    let exporter = CsvExporter::new(&config.data_dir, config.csv_separator);

    if convert {
        let priced = convert_prices(config, records).await?;
        print_details(&priced);
        if export.is_some() {
            exporter.export(&priced, name);
        }
        write_report(&config.data_dir, name, &priced).await?;
    } else {
        let priced: Vec<_> = records.into_iter().map(Priced::unconverted).collect();
        print_details(&priced);
        if export.is_some() {
            exporter.export(&priced, name);
        }
        write_report(&config.data_dir, name, &priced).await?;
    }

    Ok(())
}

async fn convert_prices<T>(config: &AppConfig, items: Vec<T>) -> Result<Vec<Priced<T>>>
where
    T: PriceSource,
{
    let provider = DolarApiClient::new(config.rate_url.clone(), config.http_timeout)?;
    let service = PriceConversionService::new(provider);
    Ok(service.convert_prices(items).await)
}

fn print_listings(listings: &[Priced<Listing>]) {
    for (i, priced) in listings.iter().enumerate() {
        let listing = &priced.item;
        println!(
            "{}. {} ({})",
            i + 1,
            listing.title.as_deref().unwrap_or("-"),
            listing.price.as_deref().unwrap_or("no price")
        );
        print_prices(priced.price_pesos, priced.price_usd);
        if let Some(url) = &listing.detail_url {
            println!("   URL: {}", url);
        }
        println!();
    }
}

fn print_details(records: &[Priced<DetailRecord>]) {
    for (i, priced) in records.iter().enumerate() {
        let record = &priced.item;
        println!(
            "{}. {} [{:?}]",
            i + 1,
            record.title.as_deref().unwrap_or("-"),
            record.category()
        );
        if let Some(price) = &record.price_text {
            match parse_marketplace_price(price) {
                Ok(money) => println!("   Price: {} ({})", price, money.currency()),
                Err(_) => println!("   Price: {}", price),
            }
        }
        match &record.details {
            CategoryDetails::Vehicle {
                year,
                distance_text,
            } => {
                let km = distance_text.as_deref().and_then(Distance::parse);
                println!(
                    "   Year: {}, km: {}",
                    year.as_deref().unwrap_or("-"),
                    km.map(|d| d.value.to_string()).unwrap_or_else(|| "-".to_string())
                );
            }
            CategoryDetails::RealEstate { area_text } => {
                if let Some(area) = area_text.as_deref().and_then(Area::parse) {
                    println!("   Area: {} m²", area.value);
                }
            }
            CategoryDetails::General => {}
        }
        print_prices(priced.price_pesos, priced.price_usd);
        if let Some(seller) = &record.seller {
            println!("   Seller: {}", seller);
        }
        if let Some(url) = record.canonical_link.as_deref().and_then(extract_url_from_markdown) {
            println!("   URL: {}", url);
        }
        println!();
    }
}

fn print_prices(pesos: Option<f64>, usd: Option<f64>) {
    if let (Some(pesos), Some(usd)) = (pesos, usd) {
        println!("   {} / USD {}", format_price_for_display(pesos), usd);
    }
}

async fn write_report<T: Serialize>(data_dir: &Path, name: &str, items: &[T]) -> Result<()> {
    let report = Report {
        name,
        scraped_at: Utc::now(),
        count: items.len(),
        items,
    };

    tokio::fs::create_dir_all(data_dir).await?;
    let path = data_dir.join(format!("{}.json", slugify(name)));
    let json = serde_json::to_string_pretty(&report)?;
    tokio::fs::write(&path, json).await?;
    info!("💾 Saved report to {}", path.display());

    Ok(())
}

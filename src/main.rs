use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use url::Url;

use fare_scout::application::FareScrapeService;
use fare_scout::domain::fare::FareResult;
use fare_scout::domain::query::{FareQuery, PartyComposition};
use fare_scout::infrastructure::extraction::{reconcile, ExtractionConfig};
use fare_scout::infrastructure::logging;
use fare_scout::infrastructure::page_source::{
    FilePageSource, HttpPageSource, HttpSourceConfig, PageSource,
};

#[derive(Parser)]
#[command(name = "fare-scout", about = "Extract airline fares from rendered booking pages")]
struct Cli {
    /// Origin airport (IATA code)
    #[arg(short, long)]
    origin: String,

    /// Destination airport (IATA code)
    #[arg(short, long)]
    destination: String,

    /// Travel date, YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,

    /// Travellers aged 16+
    #[arg(long, default_value = "1")]
    adults: u8,

    /// Travellers aged 12-15
    #[arg(long, default_value = "0")]
    teens: u8,

    /// Travellers aged 2-11
    #[arg(long, default_value = "0")]
    children: u8,

    /// Lap infants under 2
    #[arg(long, default_value = "0")]
    infants: u8,

    /// Fare search page base URL
    #[arg(long)]
    base_url: Option<Url>,

    /// Extract from a saved page snapshot instead of fetching
    #[arg(long, value_name = "HTML_FILE")]
    from_file: Option<PathBuf>,

    /// JSON file overriding the built-in selector configuration
    #[arg(long, value_name = "JSON_FILE")]
    selectors: Option<PathBuf>,

    /// Emit the result as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Verbose logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let party = PartyComposition {
        adults: cli.adults,
        teens: cli.teens,
        children: cli.children,
        infants: cli.infants,
    };
    let query = FareQuery::new(&cli.origin, &cli.destination, cli.date, party)
        .context("Invalid fare query")?;

    let config = match &cli.selectors {
        Some(path) => ExtractionConfig::from_json_file(path)
            .context("Failed to load selector configuration")?,
        None => ExtractionConfig::default(),
    };

    let (source, base_url): (Box<dyn PageSource>, Url) = match (&cli.from_file, &cli.base_url) {
        (Some(path), _) => (
            Box::new(FilePageSource::new(path)),
            Url::parse("file:///snapshot")?,
        ),
        (None, Some(base)) => (
            Box::new(HttpPageSource::new(&HttpSourceConfig::default())?),
            base.clone(),
        ),
        (None, None) => bail!("either --base-url or --from-file is required"),
    };

    let service = FareScrapeService::new(&config, source, base_url)
        .context("Failed to build fare scrape service")?;
    let result = service.run(&query).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }
    print_offers(&result);
    print_nearby_dates(&result);
    Ok(())
}

fn print_offers(result: &FareResult) {
    if result.offers.is_empty() {
        println!("No offers extracted.");
        return;
    }
    println!(
        "{:<10} {:<8} {:<8} {:<10} {:>14}  Route",
        "Flight", "Depart", "Arrive", "Duration", "Price"
    );
    for offer in &result.offers {
        let price = format!("{} {}", offer.price.amount, offer.price.currency_symbol);
        println!(
            "{:<10} {:<8} {:<8} {:<10} {:>14}  {}-{}",
            offer.flight_number,
            offer.departure_time,
            offer.arrival_time,
            offer.duration,
            price.trim(),
            offer.origin_code,
            offer.destination_code
        );
    }
    if let Some(cheapest) = reconcile::select_cheapest(&result.offers) {
        println!(
            "\nCheapest: {} {} ({} {} -> {})",
            cheapest.price.amount,
            cheapest.price.currency_symbol,
            cheapest.departure_time,
            cheapest.origin_code,
            cheapest.destination_code
        );
    }
}

fn print_nearby_dates(result: &FareResult) {
    if result.nearby_dates.is_empty() {
        return;
    }
    println!("\nNearby dates:");
    for point in &result.nearby_dates {
        let marker = if point.is_selected_date { "*" } else { " " };
        println!(
            "{} {:<10} {:<4} {:>10} {}",
            marker,
            point.calendar_label,
            point.weekday,
            point.price.amount,
            point.price.currency_symbol
        );
    }
}

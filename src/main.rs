use movie_ratings::cli::{self, Invocation, INVALID_YEAR_MESSAGE, USAGE};
use movie_ratings::{logging, report, Config, RatingsPipeline};
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Credentials may live in a local .env file
    dotenv::dotenv().ok();

    let (query, json, verbose) = match cli::parse_invocation(std::env::args_os()) {
        Invocation::Lookup {
            query,
            json,
            verbose,
        } => (query, json, verbose),
        Invocation::Usage => {
            println!("{USAGE}");
            return Ok(());
        }
        Invocation::InvalidYear(_) => {
            println!("\n{INVALID_YEAR_MESSAGE}\n\n");
            println!("{USAGE}");
            std::process::exit(1);
        }
        Invocation::Info(e) => e.exit(),
    };

    logging::init_logging(verbose);

    let config = Config::load()?;
    let pipeline = RatingsPipeline::from_config(&config)?;

    println!("{}", cli::searching_message(&query));

    match pipeline.lookup(&query).await {
        Ok(Some(movie_report)) => {
            info!("Lookup finished for '{}'", movie_report.movie.title);
            if json {
                println!("{}", report::render_json(&movie_report)?);
            } else {
                print!("{}", report::render_report(&movie_report));
            }
        }
        Ok(None) => {
            println!("\nMovie not found.\n");
        }
        Err(e) => {
            error!("Lookup failed: {}", e);
            eprintln!("❌ Lookup failed: {e}");
            std::process::exit(1);
        }
    }
    Ok(())
}

//! Hobart CLI binary.
//!
//! Interactive (and one-shot) command-line interface for the Hobart
//! crypto correlation dashboard.

mod render;
mod settings;

use clap::Parser;
use hobart::Session;
use hobart_data::CoinGeckoClient;
use indicatif::{ProgressBar, ProgressStyle};
use settings::Settings;
use std::io::{self, BufRead, Write};
use std::process;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: cryptocurrency correlation dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Ticker symbols to select (comma-separated, e.g. btc,eth)
    #[arg(long, value_delimiter = ',')]
    symbols: Vec<String>,

    /// Coin identifiers to select among the symbol candidates
    /// (comma-separated, e.g. bitcoin,ethereum)
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Render once and exit instead of entering the interactive loop
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let settings = Settings::new()
        .map_err(|e| format!("configuration error (is HOBART_API_KEY set?): {}", e))?;
    let client = CoinGeckoClient::with_base_url(&settings.base_url, &settings.api_key)?;

    let mut session = Session::new();

    if !cli.symbols.is_empty() {
        let candidates = session.select_symbols(&client, cli.symbols.clone()).await?;
        print_candidates(&candidates);
    }
    if !cli.ids.is_empty() {
        session.select_ids(&client, cli.ids.clone()).await?;
    }

    if one_shot(&cli) {
        rerun_and_render(&mut session, &client).await?;
        return Ok(());
    }

    interactive_loop(&mut session, &client).await
}

/// Whether the invocation renders once and exits instead of entering the
/// interactive loop.
fn one_shot(cli: &Cli) -> bool {
    !cli.symbols.is_empty() || !cli.ids.is_empty() || cli.once
}

async fn interactive_loop(
    session: &mut Session,
    client: &CoinGeckoClient,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Crypto Correlation Analysis");
    println!("Shows the correlation between daily USD prices of cryptocurrencies");
    println!("over the trailing 365 days.\n");
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let result = match command {
            "symbols" if rest.is_empty() => match session.catalog.load(client).await {
                Ok(assets) => {
                    let symbols = hobart_data::coingecko::unique_symbols(assets);
                    let sample: Vec<&str> =
                        symbols.iter().take(8).map(String::as_str).collect();
                    println!(
                        "{} ticker symbols available (e.g. {}).",
                        symbols.len(),
                        sample.join(", ")
                    );
                    println!("Select with `symbols <sym,...>`.");
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            "symbols" => {
                match session.select_symbols(client, parse_list(rest)).await {
                    Ok(candidates) => {
                        print_candidates(&candidates);
                        rerun_and_render(session, client).await
                    }
                    Err(e) => Err(e.into()),
                }
            }
            "ids" => match session.select_ids(client, parse_list(rest)).await {
                Ok(()) => rerun_and_render(session, client).await,
                Err(e) => Err(e.into()),
            },
            "candidates" => match session.candidate_assets(client).await {
                Ok(candidates) => {
                    print_candidates(&candidates);
                    Ok(())
                }
                Err(e) => Err(e.into()),
            },
            "show" => rerun_and_render(session, client).await,
            "clear" => {
                session.selection.clear();
                session.charts.clear();
                println!("Selection and cached series cleared.");
                Ok(())
            }
            "help" => {
                print_help();
                Ok(())
            }
            "quit" | "exit" => break,
            other => {
                println!("Unknown command: {}. Type `help` for the command list.", other);
                Ok(())
            }
        };

        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

async fn rerun_and_render(
    session: &mut Session,
    client: &CoinGeckoClient,
) -> Result<(), Box<dyn std::error::Error>> {
    // The rerun may hit the network for uncached identifiers, which is the
    // slow step thanks to provider rate limiting.
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Fetching price series...");

    let outcome = session.rerun(client).await;
    pb.finish_and_clear();

    let outcome = outcome?;
    if !outcome.fetches.is_empty() {
        println!("Series:");
        print!("{}", render::fetch_summary(&outcome.fetches));
        println!();
    }

    match outcome.matrix {
        Some(matrix) => print!("{}", render::heatmap(&matrix)),
        None => println!("{}", render::NO_DATA_MESSAGE),
    }
    println!();

    Ok(())
}

fn print_candidates(candidates: &[hobart_data::Asset]) {
    if candidates.is_empty() {
        println!("No candidate coins for the current symbol selection.");
        return;
    }
    println!("Candidate coins (pick with `ids <id,...>`):");
    for asset in candidates {
        println!("  {:<24} {:<8} {}", asset.id, asset.symbol, asset.name);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  symbols             list the available ticker symbols");
    println!("  symbols <sym,...>   select ticker symbols (e.g. symbols btc,eth)");
    println!("  ids <id,...>        select coin ids among the candidates");
    println!("  candidates          list candidate coins for the selected symbols");
    println!("  show                re-render the correlation heatmap");
    println!("  clear               drop the selection and cached series");
    println!("  help                show this message");
    println!("  quit                exit");
    println!();
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_trims_and_lowercases() {
        assert_eq!(parse_list("BTC, eth , "), vec!["btc", "eth"]);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(parse_list("").is_empty());
    }

    #[test]
    fn test_one_shot_from_flags() {
        let cli = Cli::try_parse_from(["hobart", "--symbols", "btc,eth"]).unwrap();
        assert!(one_shot(&cli));

        let cli = Cli::try_parse_from(["hobart", "--ids", "bitcoin"]).unwrap();
        assert!(one_shot(&cli));

        let cli = Cli::try_parse_from(["hobart", "--once"]).unwrap();
        assert!(one_shot(&cli));
    }

    #[test]
    fn test_no_flags_enters_interactive_mode() {
        let cli = Cli::try_parse_from(["hobart"]).unwrap();
        assert!(!one_shot(&cli));
    }
}

//! portfolio-cli: analyze a portfolio from the terminal.
//!
//! Usage:
//!   portfolio-cli --pdf statement.pdf
//!   portfolio-cli --text "AAPL 10 shares, MSFT 5 shares"
//!   portfolio-cli --pdf statement.pdf --sections
//!
//! The PDF wins when both `--pdf` and `--text` are given. The recommendation
//! is printed as markdown on stdout; status lines go to stderr.

use analysis_core::{AnalysisError, RecommendationSections};
use analysis_orchestrator::AnalysisOrchestrator;
use anyhow::Context;
use llm_client::LlmConfig;
use portfolio_reader::{extract_text_async, select_input};

struct CliArgs {
    pdf_path: Option<String>,
    text: Option<String>,
    show_sections: bool,
}

fn parse_args(args: &[String]) -> CliArgs {
    let value_of = |flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .filter(|v| !v.starts_with("--"))
            .cloned()
    };

    CliArgs {
        pdf_path: value_of("--pdf"),
        text: value_of("--text"),
        show_sections: args.iter().any(|a| a == "--sections"),
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  portfolio-cli --pdf PATH      Analyze a portfolio statement PDF");
    eprintln!("  portfolio-cli --text TEXT     Analyze a portfolio described in text");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --sections    Also print the parsed Keep / Sell / Buy lists");
}

fn format_sections(sections: &RecommendationSections) -> String {
    let mut out = String::new();
    for (label, items) in [
        ("Keep", &sections.keep),
        ("Sell", &sections.sell),
        ("Buy", &sections.buy),
    ] {
        let line = match items {
            Some(items) if !items.is_empty() => items.join(", "),
            Some(_) => "(none)".to_string(),
            None => "(not found)".to_string(),
        };
        out.push_str(&format!("{}: {}\n", label, line));
    }
    out
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_cli=info,llm_client=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args);

    let pdf_text = match &cli.pdf_path {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path))?;
            Some(extract_text_async(bytes).await?)
        }
        None => None,
    };

    let input = match select_input(pdf_text, cli.text.as_deref()) {
        Ok(input) => input,
        Err(AnalysisError::NoInput) => {
            print_usage();
            std::process::exit(1);
        }
        Err(e) => return Err(e.into()),
    };
    eprintln!("{}", input.source.status_message());

    let orchestrator = AnalysisOrchestrator::with_groq(LlmConfig::from_env()?)?;
    eprintln!("Processing portfolio... Please wait.");

    let recommendation = orchestrator.analyze(&input).await?;

    println!("### Full Recommendation");
    println!();
    println!("{}", recommendation.markdown);

    if cli.show_sections {
        println!();
        print!("{}", format_sections(&recommendation.sections));
    }

    Ok(())
}

//! Wheelwright CLI binary: generate a futures wheel from the command line.
//!
//! Default mode expands a free-form wheel with configurable branch counts;
//! the `steepv` subcommand uses the STEEPV framework (six domain branches)
//! with an optional business-aware prompt for final nodes.

mod steepv;

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::info;
use wheelwright::llm::DEFAULT_MODEL;
use wheelwright::{
    load_business_description, save_wheel, Confirm, OpenAiCompletion, WheelConfig, WheelGenerator,
    WheelVariant,
};

#[derive(Parser, Debug)]
#[command(name = "wheelwright")]
#[command(about = "Wheelwright — generate a futures wheel with an LLM")]
struct Args {
    #[command(subcommand)]
    cmd: Option<Command>,

    /// Central topic for the futures wheel
    #[arg(short, long, default_value = "The future of education")]
    topic: String,

    /// Comma-separated branch counts per depth level
    #[arg(short, long, default_value = "4,3,2,1")]
    branches: String,

    /// Confirm each branch expansion interactively
    #[arg(short, long)]
    interactive: bool,

    /// Delay in seconds between completion calls (rate-limit courtesy)
    #[arg(long, default_value_t = 1)]
    delay: u64,

    /// Output filename stem (without extension)
    #[arg(short, long, default_value = "futures_wheel")]
    output: String,

    /// Output directory for the .puml and .json artifacts
    #[arg(long, default_value = "files", value_name = "DIR")]
    out_dir: PathBuf,

    /// Wheel variant: neutral, positive, negative, or long_shot
    #[arg(long, default_value = "neutral")]
    variant: WheelVariant,

    /// Sampling temperature (higher = more creative; default 0.7, long_shot
    /// forces 1.0 unless set explicitly)
    #[arg(long)]
    temperature: Option<f32>,

    /// Chat model to use
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a wheel with the STEEPV framework (Social, Technological,
    /// Economic, Environmental, Political, Values first-level branches)
    Steepv(steepv::SteepvArgs),
}

/// Confirmation channel over stdin: any answer other than `y` prunes the branch.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, topic: &str, depth: usize, path: &[usize]) -> bool {
        println!("\nCurrent topic: {}", topic);
        println!("Depth: {}, Path: {:?}", depth, path);
        print!("Generate impacts for this topic? (y/n): ");
        let _ = std::io::stdout().flush();
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line).is_err() {
            return false;
        }
        line.trim().eq_ignore_ascii_case("y")
    }
}

/// Parses "4,3,2,1" into branch counts; zero or non-numeric entries are errors.
fn parse_branch_counts(s: &str) -> Result<Vec<usize>, String> {
    let counts = s
        .split(',')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid branch counts '{}': {}", s, e))?;
    if counts.is_empty() || counts.contains(&0) {
        return Err(format!("branch counts must be positive integers: '{}'", s));
    }
    Ok(counts)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Builds the plain-mode config. An explicit --temperature overrides the
/// variant-forced value; otherwise the variant's choice stands (long_shot
/// stays at 1.0).
fn build_plain_config(args: &Args) -> Result<WheelConfig, String> {
    let branch_counts = parse_branch_counts(&args.branches)?;
    let mut config = WheelConfig::new(branch_counts)
        .with_variant(args.variant)
        .with_interactive(args.interactive)
        .with_delay(Duration::from_secs(args.delay));
    if let Some(temperature) = args.temperature {
        config = config.with_temperature(temperature);
    }
    Ok(config)
}

async fn run_plain(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_plain_config(&args)?;

    info!(topic = %args.topic, variant = %args.variant, "generating futures wheel");
    let client = OpenAiCompletion::new(args.model);
    let mut generator = WheelGenerator::new(config, Box::new(client));
    if args.interactive {
        generator = generator.with_confirm(Box::new(StdinConfirm));
    }

    let wheel = generator.generate(&args.topic).await?;
    let (puml, json) = save_wheel(&wheel, &args.out_dir, &args.output)?;

    println!("Futures wheel saved to {} and {}", puml.display(), json.display());
    println!("To view the diagram, use a PlantUML viewer or http://www.plantuml.com/plantuml/");
    Ok(())
}

async fn run_steepv(args: steepv::SteepvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = WheelConfig::new(steepv::BRANCH_COUNTS.to_vec())
        .with_variant(args.variant)
        .with_interactive(args.interactive)
        .with_delay(Duration::from_secs(args.delay));
    steepv::apply_prompts(&mut config);

    if !args.no_business {
        let description = load_business_description(&args.business)?;
        if description.is_empty() {
            info!(
                path = %args.business.display(),
                "business description empty, final-node prompt disabled"
            );
        } else {
            config.set_business_description(description);
            config.set_final_node_prompt(steepv::FINAL_NODE_PROMPT);
        }
    }

    let stem = steepv::output_stem(&args.output, &args.topic, args.variant);
    info!(topic = %args.topic, stem = %stem, "generating STEEPV futures wheel");

    let client = OpenAiCompletion::new(args.model);
    let mut generator = WheelGenerator::new(config, Box::new(client));
    if args.interactive {
        generator = generator.with_confirm(Box::new(StdinConfirm));
    }

    let wheel = generator.generate(&args.topic).await?;
    let (puml, json) = save_wheel(&wheel, &args.out_dir, &stem)?;

    println!("Futures wheel saved to {} and {}", puml.display(), json.display());
    println!("To view the diagram, use a PlantUML viewer or http://www.plantuml.com/plantuml/");
    Ok(())
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let result = match args.cmd {
        Some(Command::Steepv(s)) => run_steepv(s).await,
        None => run_plain(args).await,
    };
    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: well-formed branch lists parse; empty, zero, and junk entries fail.
    #[test]
    fn parse_branch_counts_accepts_and_rejects() {
        assert_eq!(parse_branch_counts("4,3,2,1").unwrap(), vec![4, 3, 2, 1]);
        assert_eq!(parse_branch_counts(" 2 , 1 ").unwrap(), vec![2, 1]);
        assert!(parse_branch_counts("").is_err());
        assert!(parse_branch_counts("3,0").is_err());
        assert!(parse_branch_counts("a,b").is_err());
    }

    /// **Scenario**: clap definition is internally consistent.
    #[test]
    fn cli_args_debug_assert() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    /// **Scenario**: --variant long_shot without an explicit --temperature keeps
    /// the forced 1.0 instead of falling back to the 0.7 default.
    #[test]
    fn long_shot_variant_keeps_forced_temperature() {
        let args = Args::parse_from(["wheelwright", "--variant", "long_shot"]);
        let config = build_plain_config(&args).unwrap();
        assert_eq!(config.temperature, 1.0);
        assert_eq!(config.variant, WheelVariant::LongShot);
    }

    /// **Scenario**: an explicit --temperature overrides the variant-forced
    /// value; without either, the 0.7 default applies.
    #[test]
    fn explicit_temperature_overrides_variant() {
        let args =
            Args::parse_from(["wheelwright", "--variant", "long_shot", "--temperature", "0.5"]);
        assert_eq!(build_plain_config(&args).unwrap().temperature, 0.5);

        let args = Args::parse_from(["wheelwright"]);
        assert_eq!(build_plain_config(&args).unwrap().temperature, 0.7);
    }
}

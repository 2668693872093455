use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalsim_core::{
    DEFAULT_OBSERVATION_COUNT, DEFAULT_SUBJECT, FhirHttpClient, GeneratorConfig, Observation,
    ObservationStream, ObservationSubmitter, SubmissionConfig, Trend,
    config::{base_url_from_env_value, seed_from_env_value, timeout_from_env_value},
    generate_observations, local_now,
};

#[derive(Parser)]
#[command(name = "vitalsim")]
#[command(version)]
#[command(about = "Synthetic FHIR heart-rate observation generator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print generated observations to stdout
    Generate {
        #[command(flatten)]
        generation: GenerationArgs,

        /// Output format (JSON is one resource per line)
        #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Generate observations and POST each one to a FHIR server
    Submit {
        #[command(flatten)]
        generation: GenerationArgs,

        /// FHIR base URL (overrides VITALSIM_FHIR_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Per-request timeout in seconds (overrides VITALSIM_TIMEOUT_SECS)
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[derive(Args)]
struct GenerationArgs {
    /// Subject reference written into each observation
    #[arg(short, long, default_value = DEFAULT_SUBJECT)]
    subject: String,

    /// Number of daily observations, the last one dated now
    #[arg(short = 'n', long, default_value_t = DEFAULT_OBSERVATION_COUNT)]
    count: usize,

    /// Series shape: none or rising-spike
    #[arg(short, long, default_value = "rising-spike")]
    trend: Trend,

    /// RNG seed for reproducible output (overrides VITALSIM_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Baseline mean in beats/minute
    #[arg(long)]
    base_mean: Option<f64>,

    /// Baseline standard deviation in beats/minute
    #[arg(long)]
    base_std_dev: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

/// Entry point for the vitalsim CLI.
///
/// Generated resources go to stdout; logs go to stderr.
///
/// # Environment Variables
/// - `VITALSIM_SEED`: RNG seed (default: seeded from entropy)
/// - `VITALSIM_FHIR_BASE_URL`: FHIR server base URL (default: "http://hapi.fhir.org/baseR4")
/// - `VITALSIM_TIMEOUT_SECS`: per-request submission timeout (default: 30)
/// - `RUST_LOG`: log filter
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("vitalsim={level}").parse()?)
                .add_directive(format!("vitalsim_core={level}").parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Generate { generation, format }) => {
            let stream = observation_stream(&generation)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();

            for observation in stream {
                let observation = observation.context("Failed to generate observation")?;
                match format {
                    OutputFormat::Json => {
                        writeln!(out, "{}", Observation::render_json(&observation)?)?;
                    }
                    OutputFormat::Yaml => {
                        write!(out, "---\n{}", Observation::render_yaml(&observation)?)?;
                    }
                }
            }
        }
        Some(Commands::Submit {
            generation,
            base_url,
            timeout_secs,
        }) => {
            let base_url = base_url_from_env_value(
                base_url.or_else(|| std::env::var("VITALSIM_FHIR_BASE_URL").ok()),
            );
            let timeout = timeout_from_env_value(
                timeout_secs
                    .map(|s| s.to_string())
                    .or_else(|| std::env::var("VITALSIM_TIMEOUT_SECS").ok()),
            )?;
            let config = SubmissionConfig::new(&base_url, timeout)
                .with_context(|| format!("Invalid submission settings for {base_url}"))?;
            let client = FhirHttpClient::new(&config)?;

            tracing::info!("-- Submitting to {}", client.observation_url());

            let stream = observation_stream(&generation)?;
            let mut submitted = 0usize;
            for observation in stream {
                let observation = observation.context("Failed to generate observation")?;
                let reply = client.submit(&observation).with_context(|| {
                    format!(
                        "Failed to submit observation dated {}",
                        observation.effective_date_time()
                    )
                })?;
                println!("{reply}");
                submitted += 1;
            }

            tracing::info!("Submitted {} observations", submitted);
        }
        None => {
            println!("Use 'vitalsim --help' for commands");
        }
    }

    Ok(())
}

/// Resolve seed and baseline, then start a lazy observation stream ending now.
fn observation_stream(args: &GenerationArgs) -> anyhow::Result<ObservationStream<StdRng>> {
    let seed = match args.seed {
        Some(seed) => Some(seed),
        None => seed_from_env_value(std::env::var("VITALSIM_SEED").ok())?,
    };
    let rng = match seed {
        Some(seed) => {
            tracing::debug!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let defaults = GeneratorConfig::heart_rate();
    let generator = GeneratorConfig::new(
        args.base_mean.unwrap_or(defaults.base_mean()),
        args.base_std_dev.unwrap_or(defaults.base_std_dev()),
        defaults.bounds(),
    )
    .context("Invalid baseline")?;

    let request = generator
        .sample_request(args.count, args.trend)
        .context("Invalid generation request")?;

    Ok(generate_observations(
        &args.subject,
        request,
        rng,
        local_now(),
    )?)
}

mod output;
mod root;

use anyhow::Context;
use clap::Parser;
use releasify_core::config::{Config, DEFAULT_CONFIG_FILE};
use releasify_core::operator::ConsoleOperator;
use releasify_core::runner::Runner;
use releasify_core::ReleasifyError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "releasify",
    about = "Run the file-system actions declared in a releasify config",
    version
)]
struct Cli {
    /// Path to the config file; its directory becomes the working directory
    #[arg(default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Never delete the releasify executable, even with `remove-self: true`
    #[arg(long, env = "RELEASIFY_KEEP_SELF")]
    keep_self: bool,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    println!("Using {}", cli.config.display());

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(ReleasifyError::ConfigNotFound(path)) => {
            println!("Config file {} does not exist.", path.display());
            return Ok(());
        }
        Err(ReleasifyError::Yaml(e)) => {
            println!("There was a parse error in {}:", cli.config.display());
            println!("{e}");
            return Ok(());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to read {}", cli.config.display()))
        }
    };

    for warning in config.validate() {
        println!("Warning! {}.", warning.message);
    }

    // Resolve before changing directory; a relative argv[0] would go stale.
    let self_artifact = std::env::current_exe().context("failed to locate own executable")?;

    let dir = root::resolve_working_directory(&cli.config, config.working_directory());
    std::env::set_current_dir(&dir)
        .with_context(|| format!("failed to enter working directory {}", dir.display()))?;
    let cwd = std::env::current_dir().context("failed to read working directory")?;
    println!("Working in {}", cwd.display());

    let mut settings = config.settings();
    if cli.keep_self && settings.remove_self {
        tracing::info!("--keep-self overrides remove-self");
        settings.remove_self = false;
    }

    let mut console = ConsoleOperator::stdio();
    let report = Runner::new(settings, &mut console)
        .with_self_artifact(self_artifact)
        .run(&config.actions)?;

    output::print_summary(&report).context("failed to write run summary")?;
    Ok(())
}

use anyhow::{Context, Result};
use renderer::Renderer;
use tracing_subscriber::EnvFilter;
use viewconfig::ViewerConfig;

use crate::bindings::keymap_table;
use crate::cli::{Cli, Command, RunArgs};
use crate::paths::AppPaths;
use crate::settings::renderer_config;

pub fn run(cli: Cli) -> Result<()> {
    initialise_tracing();

    match cli.command {
        Some(Command::Keys) => {
            print!("{}", keymap_table());
            Ok(())
        }
        Some(Command::Where) => print_where(),
        None => run_viewer(&cli.run),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn print_where() -> Result<()> {
    let paths = AppPaths::discover()?;
    let file = paths.config_file();
    let status = if file.is_file() { "present" } else { "missing" };
    println!("config dir:  {}", paths.config_dir().display());
    println!("config file: {} ({status})", file.display());
    Ok(())
}

fn load_config(args: &RunArgs) -> Result<ViewerConfig> {
    if let Some(path) = args.config.as_ref() {
        let config = ViewerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        return Ok(config);
    }

    let paths = AppPaths::discover()?;
    let path = paths.config_file();
    let config = ViewerConfig::load_or_default(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        present = path.is_file(),
        "resolved default config file"
    );
    Ok(config)
}

fn run_viewer(args: &RunArgs) -> Result<()> {
    let file = load_config(args)?;
    let config = renderer_config(args, &file);
    tracing::debug!(?config, "resolved renderer configuration");

    let mut renderer = Renderer::new(config);
    renderer.run().context("viewer terminated with an error")
}

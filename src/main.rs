//! Folio - a static site generator for sectioned blogs.

mod build;
mod cli;
mod config;
mod content;
mod deploy;
mod generator;
mod html;
mod index;
mod logger;
mod output;
mod steps;
mod theme;
mod utils;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::ContentModel;
use output::FsTarget;
use std::{path::Path, process::ExitCode};
use theme::DefaultTheme;
use utils::exec::SystemRunner;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Build { .. } => build_all(&config),
        Commands::Deploy { skip_build, .. } => {
            if !skip_build {
                build_all(&config)?;
            }
            deploy_all(&config)
        }
        Commands::Check => check(&config),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found.");
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate(&cli.command)?;

    log!("config"; "{}", config.config_path.display());
    Ok(config)
}

fn load_content(config: &SiteConfig) -> Result<ContentModel> {
    let content = content::loader::load(&config.build.content, &config.site)?;
    if content.item_count() == 0 {
        log!("warn"; "no items found in {}", config.build.content.display());
    }
    Ok(content)
}

/// Render the site and write it to the output directory.
fn build_all(config: &SiteConfig) -> Result<()> {
    let content = load_content(config)?;
    let theme = DefaultTheme::new(config.theme.clone());
    let tree = build::build(&config.site, &content, &theme, &config.build)?;

    let mut target = FsTarget::new(&config.build.output);
    target.prepare(config.build.clean)?;
    output::write(&tree, &mut target)?;

    log!("write"; "{} files to {}", tree.len(), target.root().display());
    Ok(())
}

/// Run the configured deploy steps against the written output.
fn deploy_all(config: &SiteConfig) -> Result<()> {
    if !config.build.output.exists() {
        bail!(
            "output directory {} does not exist, build the site first",
            config.build.output.display()
        );
    }

    let timeout = config.deploy.timeout().context("invalid [deploy.timeout]")?;
    let mut runner = SystemRunner::new(timeout);
    let report = deploy::run_steps(
        &config.deploy.steps,
        &config.build.output,
        &config.root,
        &mut runner,
    )?;

    for (step, state) in &report.states {
        log!("deploy"; "{step}: {state}");
    }
    if report.is_clean() {
        log!("done"; "deployed");
    } else {
        log!("warn"; "deployed with {} warning(s)", report.warnings.len());
    }
    Ok(())
}

/// Load and validate content, reporting every violation.
fn check(config: &SiteConfig) -> Result<()> {
    let content = load_content(config)?;
    if let Err(errors) = content.validate(&config.site, &config.build.generated_paths()) {
        for violation in errors.violations() {
            log!("error"; "{violation}");
        }
        bail!("{} content violation(s)", errors.violations().len());
    }

    log!(
        "done";
        "{} sections, {} items, {} pages",
        content.sections.len(),
        content.item_count(),
        content.pages.len()
    );
    Ok(())
}

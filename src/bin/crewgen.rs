use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{bail, ensure, Context, Result};
use clap::Parser;
use crewgen::{
    args::{Args, Commands},
    error, info,
    manifest::{AppConfig, BackendPlatform, Values},
    palette::{Palette, Rgb},
    renderer::Renderer,
    trace,
};

fn app(args: &Args) -> Result<()> {
    match args.command {
        Commands::Palette { ref color } => {
            let base: Rgb = color.parse()?;

            for (step, color) in Palette::derive(base).iter() {
                println!("{step: >4}: {color}");
            }

            Ok(())
        }
        Commands::DebugManifest { ref path } => {
            trace!("Reading: {}", path.display());

            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read manifest {}", path.display()))?;
            let values = Values::from_str(&contents, path)?;

            println!("{values:#?}");
            println!("{:#?}", AppConfig::from_values(&values)?);

            Ok(())
        }
        Commands::Generate {
            ref manifest,
            ref cli_keys,
            ref output,
            ref templates,
            overwrite,
            dry_run,
        } => {
            let contents = std::fs::read_to_string(manifest)
                .with_context(|| format!("Failed to read manifest {}", manifest.display()))?;
            let values =
                Values::from_str(&contents, manifest)?.stash(Values::from_cli_pairs(cli_keys)?);

            let mut config = AppConfig::from_values(&values)?;
            if let Some(output) = output {
                config.output_path.clone_from(output);
            }

            let templates_dir = resolve_templates_dir(templates.as_deref())?;
            trace!("Templates: {}", templates_dir.display());

            let mut overwrite = overwrite;
            if config.output_path.exists() && !overwrite && !dry_run {
                let proceed = inquire::Confirm::new(&format!(
                    "Output directory {} already exists. Overwrite its files?",
                    config.output_path.display()
                ))
                .with_default(false)
                .prompt()?;

                if !proceed {
                    bail!("Aborted");
                }
                overwrite = true;
            }

            info!("Generating {}", config.app_name);

            let renderer = Renderer {
                config: &config,
                dry_run,
                overwrite,
            };
            let summary = renderer.render(&templates_dir)?;

            info!(
                "Project created at {} ({} rendered, {} copied)",
                config.output_path.display(),
                summary.rendered,
                summary.copied
            );

            if !dry_run {
                print_next_steps(&config);
            }

            Ok(())
        }
    }
}

/// Template tree lookup, in order: `--templates`, `./templates`, then
/// `crewgen/templates` under the user's config directory.
fn resolve_templates_dir(flag: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }

    let local = Path::new("templates");
    if local.is_dir() {
        return Ok(local.to_path_buf());
    }

    let global = directories::BaseDirs::new()
        .context("Failed to get user's home directory")?
        .config_dir()
        .join("crewgen")
        .join("templates");

    ensure!(
        global.is_dir(),
        "No template tree found. Provide one with --templates, a ./templates \
         directory, or {}",
        global.display()
    );

    Ok(global)
}

fn print_next_steps(config: &AppConfig) {
    println!("\nNext steps:");
    println!("1. cd {}/frontend", config.output_path.display());
    println!("2. npm install");
    println!("3. Copy .env.example to .env and fill in your Firebase config");
    println!("4. npm run dev");

    if config.feature_notifications || config.feature_slack {
        println!("\nWorker setup:");
        println!("1. cd {}/worker", config.output_path.display());
        println!("2. npm install");
        match config.backend_platform {
            BackendPlatform::Cloudflare => {
                println!("3. Configure wrangler.toml with your secrets");
                println!("4. npx wrangler deploy");
            }
            BackendPlatform::Vercel => println!("3. npx vercel deploy"),
            BackendPlatform::Aws => println!("3. Deploy with your AWS tooling of choice"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match app(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !args.no_errors() {
                error!("{e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

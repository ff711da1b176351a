use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scriptdef_core::{Config, Report, Severity};
use scriptdef_engine::{ClassContext, FileScript, ProfileRegistry, ScriptFlavor};
use scriptdef_resolver::{ResolverEnvironment, StaticResolver};

/// scriptdef - compilation profiles and dependency refinement for build scripts
#[derive(Parser)]
#[command(name = "scriptdef")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: scriptdef.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the static compilation profile of a script flavor
    Profile {
        /// Script flavor (build, settings, init)
        #[arg(short, long, default_value = "build")]
        flavor: ScriptFlavor,
    },

    /// Refine the compilation configuration of one script
    Refine {
        /// Script to refine
        script: PathBuf,

        /// Script flavor (default: derived from the file name)
        #[arg(short, long)]
        flavor: Option<ScriptFlavor>,

        /// Output file for report.json
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config if specified
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new("scriptdef.toml").exists() {
        Config::from_file(Path::new("scriptdef.toml"))?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    tracing::debug!(project_root = %config.project_root.display(), "configuration loaded");

    match cli.command {
        Commands::Profile { flavor } => profile_command(&config, flavor),
        Commands::Refine { script, flavor, output } => {
            refine_command(&config, &script, flavor, &output, cli.verbose).await
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn registry_for(config: &Config) -> ProfileRegistry {
    let class_context = ClassContext::from_config(config);
    let resolver = StaticResolver::from_config(&config.resolver_declarations().unwrap_or_default());
    ProfileRegistry::with_resolver(&class_context, Arc::new(resolver))
}

fn environment_for(config: &Config) -> ResolverEnvironment {
    let mut environment: ResolverEnvironment = config.environment.clone().into();
    if environment.get(ResolverEnvironment::PROJECT_ROOT).is_none() {
        environment.insert(
            ResolverEnvironment::PROJECT_ROOT,
            config.project_root.display().to_string(),
        );
    }
    environment
}

/// Profile command - print a static profile as JSON
fn profile_command(config: &Config, flavor: ScriptFlavor) -> Result<()> {
    let registry = registry_for(config);
    let profile = registry.get(flavor);

    let json = serde_json::json!({
        "profile": profile.name(),
        "flavor": profile.flavor(),
        "configuration": profile.configuration(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);

    Ok(())
}

/// Refine command - resolve one script and write report.json
async fn refine_command(
    config: &Config,
    script_path: &Path,
    flavor: Option<ScriptFlavor>,
    output: &Path,
    verbose: bool,
) -> Result<()> {
    let flavor = match flavor {
        Some(flavor) => flavor,
        None => {
            let file_name = script_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            ScriptFlavor::from_file_name(file_name).ok_or_else(|| {
                anyhow::anyhow!(
                    "Cannot tell the flavor of '{}'. Pass --flavor build|settings|init",
                    script_path.display()
                )
            })?
        }
    };

    if verbose {
        eprintln!("{} {} ({} script)", "Refining".cyan(), script_path.display(), flavor);
    }

    let script = FileScript::load(script_path)
        .map_err(|e| anyhow::anyhow!("Failed to read script {}: {}", script_path.display(), e))?;

    let registry = registry_for(config);
    let profile = registry.get(flavor);
    let environment = environment_for(config);

    let refined = profile.refine(&script, Some(&environment)).await?;

    let metadata = serde_json::json!({
        "script": script_path.display().to_string(),
        "profile": profile.name(),
        "configuration": &refined.configuration,
    });
    let report = Report::from_diagnostics(refined.diagnostics).with_metadata(metadata);

    report.save_to_file(output)?;

    if verbose {
        eprintln!("{} {}", "Report saved to:".green(), output.display());
    }

    print_refine_summary(&report, refined.configuration.classpath.len());

    Ok(())
}

/// Print refinement summary to stdout
fn print_refine_summary(report: &Report, classpath_entries: usize) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "Script Refinement Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    println!("Classpath entries: {}", classpath_entries);
    println!();

    println!("{}", "Summary:".bold());
    println!("  Total diagnostics: {}", report.summary.total);

    if report.summary.errors > 0 {
        println!("  Errors:   {}", format!("{}", report.summary.errors).red().bold());
    } else {
        println!("  Errors:   {}", format!("{}", report.summary.errors).green());
    }

    if report.summary.warnings > 0 {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).yellow());
    } else {
        println!("  Warnings: {}", format!("{}", report.summary.warnings).green());
    }

    println!("  Info:     {}", report.summary.info);
    println!();

    if report.diagnostics.is_empty() {
        println!("{}", "✓ Dependencies resolved without issues".green().bold());
    } else {
        println!("{}", "Diagnostics:".bold());
        for diag in &report.diagnostics {
            let severity_str = match diag.severity {
                Severity::Error => "ERROR".red().bold(),
                Severity::Warning => "WARN".yellow().bold(),
                Severity::Info => "INFO".cyan(),
            };

            println!("  [{}] {}", severity_str, diag.message);

            if let Some(script) = &diag.script {
                print!("    at {}", script);
                if let Some(position) = diag.position {
                    // Editors count lines from 1
                    print!(":{}:{}", position.line + 1, position.column);
                }
                println!();
            }
        }
    }

    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

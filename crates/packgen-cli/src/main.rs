//! packgen - scaffold webpack projects from plugins

mod plugins;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use packgen_core::tui::CreateArgs;
use packgen_core::{Manifest, PackageManager, Plugin, Preset};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter
const LOG_ENV: &str = "PACKGEN_LOG";

/// packgen preset: built-in webpack plugins plus YAML plugins
#[derive(Clone)]
pub struct WebpackPreset;

impl Preset for WebpackPreset {
    fn name(&self) -> &'static str {
        "packgen"
    }

    fn display_name(&self) -> &'static str {
        "packgen"
    }

    fn plugin_dir_env(&self) -> &'static str {
        "PACKGEN_PLUGIN_DIR"
    }

    fn builtin_plugins(&self) -> Vec<Box<dyn Plugin>> {
        plugins::builtin()
    }

    fn next_steps(&self, dir: &Path, manifest: &Manifest, pm: PackageManager) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        if current.as_deref() != Some(dir) {
            steps.push(format!("cd {}", dir.display()));
        }

        steps.push(pm.install_command().to_string());

        for script in ["dev", "build"] {
            if manifest.get(&format!("scripts.{}", script)).is_some() {
                steps.push(pm.run_command(script));
            }
        }

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "packgen")]
#[command(about = "CLI for scaffolding webpack projects from plugins")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate webpack.config.js and package.json
    Create(CliCreateArgs),
    /// List the plugins that would be installed
    Plugins(ListArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Project directory to generate into
    #[arg(short, long)]
    pub directory: Option<PathBuf>,

    /// Package name written to package.json
    #[arg(short, long)]
    pub name: Option<String>,

    /// Existing package.json to start from
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Directory of YAML plugins to load after the built-in ones
    #[arg(long = "plugin-dir", env = "PACKGEN_PLUGIN_DIR")]
    pub plugin_dir: Option<PathBuf>,

    /// Skip the built-in plugins
    #[arg(long = "no-builtin")]
    pub no_builtin: bool,

    /// Answer every prompt with its default (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        CreateArgs {
            directory: args.directory,
            name: args.name,
            manifest: args.manifest,
            plugin_dir: args.plugin_dir,
            no_builtin: args.no_builtin,
            yes: args.yes,
        }
    }
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Directory of YAML plugins to include in the listing
    #[arg(long = "plugin-dir", env = "PACKGEN_PLUGIN_DIR")]
    pub plugin_dir: Option<PathBuf>,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn list_plugins(preset: &WebpackPreset, args: ListArgs) -> Result<()> {
    let builtin = preset.builtin_plugins();
    println!("{}", "Built-in plugins".bold());
    for plugin in &builtin {
        println!("  {} {}", "•".cyan(), plugin.id());
    }

    let Some(dir) = packgen_core::preset::plugin_dir(preset, args.plugin_dir.as_deref()) else {
        println!();
        println!(
            "{}",
            format!("No plugin directory set (use --plugin-dir or {})", preset.plugin_dir_env())
                .dimmed()
        );
        return Ok(());
    };

    let loaded = packgen_core::load_plugin_dir(&dir)?;
    println!();
    println!("{} {}", "Plugins from".bold(), dir.display().to_string().bold());
    if loaded.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for plugin in &loaded {
        let shadowed = builtin.iter().any(|b| b.id() == plugin.id);
        if shadowed {
            println!("  {} {} {}", "•".cyan(), plugin.id, "(same id as a built-in)".yellow());
        } else {
            println!("  {} {}", "•".cyan(), plugin.id);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);
    tracing::debug!(command = ?args.command, "parsed arguments");
    let preset = WebpackPreset;

    match args.command {
        Some(Command::Plugins(list_args)) => list_plugins(&preset, list_args),
        command => {
            let create_args = match command {
                Some(Command::Create(create_args)) => create_args.into(),
                // No subcommand provided, default to create behavior (interactive mode)
                _ => CreateArgs::default(),
            };
            let result = packgen_core::run(&preset, create_args).await;

            // Ensure cursor is visible on normal exit
            let _ = console::Term::stderr().show_cursor();

            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_flags() {
        let args = Args::try_parse_from([
            "packgen", "create", "-d", "web", "-n", "site", "--no-builtin", "-y", "-vv",
        ])
        .unwrap();

        assert_eq!(args.verbose, 2);
        let Some(Command::Create(create)) = args.command else {
            panic!("expected create");
        };
        let create: CreateArgs = create.into();
        assert_eq!(create.directory, Some(PathBuf::from("web")));
        assert_eq!(create.name.as_deref(), Some("site"));
        assert!(create.no_builtin);
        assert!(create.yes);
    }

    #[test]
    fn test_next_steps_follow_scripts() {
        let mut manifest = Manifest::named("demo");
        manifest.script("build", "webpack");

        let steps = WebpackPreset.next_steps(Path::new("/nowhere/demo"), &manifest, PackageManager::Pnpm);
        assert_eq!(steps, vec!["cd /nowhere/demo", "pnpm install", "pnpm build"]);
    }

    #[test]
    fn test_builtin_plugin_ids() {
        let ids: Vec<String> = WebpackPreset
            .builtin_plugins()
            .iter()
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(ids, vec!["base", "typescript", "babel", "css", "html", "dev-server"]);
    }
}

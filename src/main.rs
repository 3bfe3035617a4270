use anyhow::{Context, Result, anyhow};
use clap::{ArgAction, Parser};
use keyguard::chrome::{self, Visibility};
use keyguard::{Config, Dispatcher, Platform, Policy, hook, platform, shutdown, suppress};
use log::{info, warn};
use std::path::{Path, PathBuf};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("KEYGUARD_GIT_HASH"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "keyguard")]
#[command(
    version = VERSION,
    about = "Suppress system key combinations and toggle desktop chrome"
)]
struct Cli {
    /// Hide or show the taskbar (Windows) or the menu bar and Dock (macOS)
    #[arg(
        long,
        value_name = "hide|show",
        num_args = 0..=1,
        default_missing_value = "",
        conflicts_with = "suppress_keys"
    )]
    taskbar: Option<String>,

    /// Swallow blocked key combinations system-wide until interrupted
    #[arg(long, action = ArgAction::SetTrue)]
    suppress_keys: bool,

    /// Print the suppression rules that would be active and exit
    #[arg(long, action = ArgAction::SetTrue, conflicts_with_all = ["taskbar", "suppress_keys"])]
    list_rules: bool,

    /// Write a documented default config file and exit
    #[arg(
        long,
        action = ArgAction::SetTrue,
        conflicts_with_all = ["taskbar", "suppress_keys", "list_rules"]
    )]
    init_config: bool,

    /// Use this platform's rule table instead of the detected one
    #[arg(long, value_name = "windows|macos|other")]
    platform: Option<Platform>,

    /// Config file (default: <config dir>/keyguard/config.toml)
    #[arg(long, short = 'c', value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log at debug level, including every key press
    #[arg(long, short = 'v', action = ArgAction::SetTrue)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Application started.");
    let result = run(&cli);
    info!("Application shutting down.");

    result
}

fn init_logging(verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<()> {
    if cli.init_config {
        let path = Config::create_default_file(cli.config.as_deref())?;
        println!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let detected = platform::detect();
    let platform = cli.platform.unwrap_or(detected);
    if platform != detected {
        info!("Using {} rules (detected platform: {})", platform, detected);
    }

    if let Some(arg) = cli.taskbar.as_deref() {
        return set_taskbar(platform, arg);
    }

    if cli.list_rules {
        let config = Config::load(cli.config.as_deref())?;
        print_rules(&suppress::build_policy(platform, &config.suppression));
        return Ok(());
    }

    if cli.suppress_keys {
        return run_key_suppressor(platform, cli.config.as_deref());
    }

    warn!("No arguments provided. Use '--taskbar' or '--suppress-keys'.");
    print_usage();
    Ok(())
}

fn set_taskbar(platform: Platform, arg: &str) -> Result<()> {
    let visibility: Visibility = arg.parse().map_err(|_| {
        warn!("Invalid taskbar argument. Use 'hide' or 'show'.");
        anyhow!("Invalid taskbar argument '{}'", arg)
    })?;

    chrome::set_visibility(platform, visibility).context("Failed to set taskbar visibility")
}

fn run_key_suppressor(platform: Platform, config_path: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let policy = suppress::build_policy(platform, &config.suppression);

    if policy.rules().is_empty() {
        warn!(
            "No suppression rules active on platform '{}'; all keys will be forwarded",
            platform
        );
    }
    for rule in policy.rules() {
        info!("Suppressing {}", rule);
    }

    shutdown::install()?;

    hook::run(Dispatcher::new(policy)).context("Keyboard hook stopped")?;
    Ok(())
}

fn print_rules(policy: &Policy) {
    if policy.rules().is_empty() {
        println!(
            "No suppression rules active on platform '{}' (all keys are forwarded).",
            policy.platform()
        );
        return;
    }

    println!("Suppression rules for {}:", policy.platform());
    for rule in policy.rules() {
        println!("  {rule}");
    }
}

fn print_usage() {
    println!("keyguard: Suppress system key combinations and toggle desktop chrome");
    println!();
    println!("Usage:");
    println!("  keyguard --suppress-keys     Swallow blocked key combinations until Ctrl+C");
    println!("  keyguard --taskbar hide      Hide the taskbar (menu bar and Dock on macOS)");
    println!("  keyguard --taskbar show      Show it again");
    println!("  keyguard --list-rules        Print the active suppression rules");
    println!("  keyguard --init-config       Write a default config file");
    println!("  keyguard --help              Show help");
    println!();
    println!("Built-in rules:");
    println!("  Windows: Alt+Tab, Alt+Space, Windows key");
    println!("  macOS:   F3 / Mission Control, Cmd+W");
    println!();
    println!("Requirements:");
    println!("  - macOS: Accessibility permission for the terminal or binary");
    println!("  - Linux: read access to /dev/input (keys are forwarded unchanged)");
}

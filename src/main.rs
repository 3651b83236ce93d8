//  _  __               ____                __  _
// | |/ /  ___  _   _  / ___| _ __   __ _  / _|| |_   ___  _ __
// | ' /  / _ \| | | || |    | '__| / _` || |_ | __| / _ \| '__|
// | . \ |  __/| |_| || |___ | |   | (_| ||  _|| |_ |  __/| |
// |_|\_\ \___| \__, | \____||_|    \__,_||_|   \__| \___||_|
//              |___/
//
// Author : Sidney Zhang <zly@lyzhang.me>
// Date : 2026-10-19
// Version : 0.1.0
// License : Mulan PSL v2
//
// Create powerful and one-of-a-kind passwords.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keycrafter::GenerationOptions;
use keycrafter::configtool::Config;
use keycrafter::setclip::{self, ClipboardSink, DetachedClipboard};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "keycrafter", version)]
#[command(about = "Create powerful and one-of-a-kind passwords", long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive generator (default)
    Run,

    /// Generate passwords and print them
    Gen(GenArgs),

    /// Show the security rating a configuration would get
    Rate(RateArgs),

    /// Serve copied text in the background until another program takes the clipboard
    #[command(name = "hold-clipboard", hide = true)]
    HoldClipboard,
}

#[derive(Debug, Args)]
struct ClassArgs {
    /// Length of the password
    #[arg(short, long)]
    length: Option<usize>,

    /// Exclude lowercase letters
    #[arg(long, default_value_t = false)]
    no_lowercase: bool,

    /// Exclude uppercase letters
    #[arg(long, default_value_t = false)]
    no_uppercase: bool,

    /// Exclude numbers
    #[arg(long, default_value_t = false)]
    no_numbers: bool,

    /// Exclude special characters
    #[arg(long, default_value_t = false)]
    no_special: bool,
}

impl ClassArgs {
    fn apply(&self, base: GenerationOptions) -> GenerationOptions {
        GenerationOptions {
            length: self.length.unwrap_or(base.length),
            include_lower: base.include_lower && !self.no_lowercase,
            include_upper: base.include_upper && !self.no_uppercase,
            include_digits: base.include_digits && !self.no_numbers,
            include_special: base.include_special && !self.no_special,
        }
    }
}

#[derive(Debug, Args)]
struct GenArgs {
    #[command(flatten)]
    classes: ClassArgs,

    /// Number of passwords to generate
    #[arg(short = 'n', long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    count: u32,

    /// Copy the last generated password to the clipboard
    #[arg(short, long, default_value_t = false)]
    copy: bool,

    /// Seed the random source for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct RateArgs {
    #[command(flatten)]
    classes: ClassArgs,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Command::Run);
    if let Command::HoldClipboard = command {
        return setclip::hold_clipboard(io::stdin().lock(), io::stdout().lock())
            .context("Failed to hold clipboard");
    }

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match command {
        Command::Run => commands::interactive::run(&config),
        Command::Gen(args) => {
            let options = args.classes.apply(config.initial_options());
            let mut clipboard = DetachedClipboard::new();
            let sink: Option<&mut dyn ClipboardSink> = if args.copy { Some(&mut clipboard) } else { None };
            commands::password_gen::generate_random(&config, options, args.count, args.seed, sink)
        }
        Command::Rate(args) => {
            let options = args.classes.apply(config.initial_options());
            commands::rate::show_rating(&config, &options)
        }
        Command::HoldClipboard => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keycrafter::setclip::HOLD_COMMAND;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn class_flags_override_config_defaults() {
        let cli = Cli::parse_from(["keycrafter", "gen", "-l", "16", "--no-special", "-n", "3"]);
        let Some(Command::Gen(args)) = cli.command else {
            panic!("expected gen subcommand");
        };
        let options = args.classes.apply(GenerationOptions::default());
        assert_eq!(options.length, 16);
        assert!(!options.include_special);
        assert!(options.include_upper);
        assert_eq!(args.count, 3);
    }

    #[test]
    fn hold_command_name_matches_subcommand() {
        let cli = Cli::parse_from(["keycrafter", HOLD_COMMAND]);
        assert!(matches!(cli.command, Some(Command::HoldClipboard)));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["keycrafter", "gen", "-n", "0"]).is_err());
    }
}

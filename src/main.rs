//! CLI entry point for pantry.

mod cli;

use clap::Parser;
use crossterm::style::{Color, Stylize};
use pantry::api::{ChatCompletionsClient, DishSuggester, FoodImageClient};
use pantry::build_info;
use pantry::config::{initialize_default_global_config, load_config, Config, GlobalConfigInitResult};
use pantry::host::{Appearance, ManualAppearance, TokioScheduler};
use pantry::media::{MediaRotator, RandomIndex, RotationOptions, Selection};
use pantry::ui::theme::{ThemeController, ThemeState, ThemeToken};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Command;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantry=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = cli::Args::parse();
    let command = args.command();

    if let Command::Init { force } = command {
        match initialize_default_global_config(force) {
            Ok(GlobalConfigInitResult::Created { path }) => {
                println!("wrote {}", path.display());
            }
            Ok(GlobalConfigInitResult::AlreadyInitialized { path }) => {
                println!("{} already exists (use --force to overwrite)", path.display());
            }
            Ok(GlobalConfigInitResult::Overwritten { path, backup_path }) => {
                println!("wrote {} (previous copy at {})", path.display(), backup_path.display());
            }
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if args.no_color {
        config.display.color = false;
    }

    match command {
        Command::Run => {
            if let Err(e) = run(&config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Command::Image { name } => {
            let name = name.join(" ");
            let client = FoodImageClient::new(&config.food, config.network.timeout());
            match client.lookup(&name).await {
                Some(url) => println!("{url}"),
                None => {
                    eprintln!("no image found for \"{name}\"");
                    std::process::exit(2);
                }
            }
        }
        Command::Suggest { ingredients } => {
            let generator = ChatCompletionsClient::new(&config.suggest, config.network.timeout());
            let dishes = DishSuggester::new(generator).suggest(&ingredients).await;
            if dishes.is_empty() {
                eprintln!("no suggestions available");
                std::process::exit(2);
            }
            for dish in dishes {
                let title = if config.display.color {
                    dish.name.as_str().bold().to_string()
                } else {
                    dish.name.clone()
                };
                println!("{title}");
                if !dish.description.is_empty() {
                    println!("  {}", dish.description);
                }
                if !dish.ingredients.is_empty() {
                    println!("  uses: {}", dish.ingredients.join(", "));
                }
            }
        }
        Command::Init { .. } => {}
    }
}

/// Line commands accepted by `pantry run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunInput {
    Appearance(Appearance),
    Toggle,
    Ended,
    Status,
    Help,
    Quit,
    Empty,
    Unknown,
}

fn parse_run_input(line: &str) -> RunInput {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => RunInput::Empty,
        "dark" => RunInput::Appearance(Appearance::Dark),
        "light" => RunInput::Appearance(Appearance::Light),
        "system" | "unspecified" => RunInput::Appearance(Appearance::Unspecified),
        "t" | "toggle" => RunInput::Toggle,
        "n" | "next" | "ended" => RunInput::Ended,
        "s" | "status" => RunInput::Status,
        "?" | "help" => RunInput::Help,
        "q" | "quit" | "exit" => RunInput::Quit,
        _ => RunInput::Unknown,
    }
}

const RUN_HELP: &str =
    "commands: dark | light | system (host appearance), toggle, next (playback ended), status, quit";

async fn run(config: &Config) -> Result<(), String> {
    let color = config.display.color;
    println!("{}", build_info::banner());

    let host = ManualAppearance::new(config.theme.appearance);
    let mut theme = ThemeController::initialize(&host, config.theme.palettes);

    let scheduler = TokioScheduler::from_current()
        .ok_or_else(|| "no async runtime available for the rotation timer".to_string())?;
    let options = RotationOptions {
        period: config.media.rotation_period(),
        indices: Box::new(RandomIndex::from_entropy()),
    };
    let mut media = MediaRotator::initialize_with(config.media.playlist.iter().cloned(), &scheduler, options)
        .map_err(|e| format!("media: {e}"))?;

    let report = |e: pantry::error::ControllerError| e.to_string();
    print_theme(&theme.current_theme().map_err(report)?, color);
    println!("background: {}", media.current_resource().map_err(report)?);

    theme
        .subscribe(move |state: &ThemeState| print_theme(state, color))
        .map_err(report)?;
    media
        .subscribe(move |selection: &Selection| print_selection(selection, color))
        .map_err(report)?;

    println!("{RUN_HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => break,
        };
        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "stdin read failed");
                break;
            }
        };
        match parse_run_input(&line) {
            RunInput::Appearance(appearance) => host.set(appearance),
            RunInput::Toggle => {
                theme.toggle_theme().map_err(report)?;
            }
            RunInput::Ended => {
                media.on_resource_ended().map_err(report)?;
            }
            RunInput::Status => {
                print_theme(&theme.current_theme().map_err(report)?, color);
                println!(
                    "background: {} (#{}, every {}s)",
                    media.current_resource().map_err(report)?,
                    media.current_index().map_err(report)?,
                    media.period().as_secs()
                );
            }
            RunInput::Help => println!("{RUN_HELP}"),
            RunInput::Quit => break,
            RunInput::Empty => {}
            RunInput::Unknown => println!("unknown command; {RUN_HELP}"),
        }
    }

    theme.dispose();
    media.dispose();
    tracing::debug!(listeners = host.listener_count(), "controllers disposed");
    Ok(())
}

fn print_theme(state: &ThemeState, color: bool) {
    let mut line = format!("theme: {}", state.mode.as_str());
    for token in ThemeToken::all() {
        let value = state.color(*token);
        line.push_str("  ");
        if color {
            line.push_str(&"  ".on(value.to_terminal()).to_string());
            line.push(' ');
        }
        line.push_str(&format!("{}={}", token.key(), value.to_hex()));
    }
    println!("{line}");
}

fn print_selection(selection: &Selection, color: bool) {
    let label = format!("#{}", selection.index);
    let label = if color {
        label.with(Color::DarkGrey).to_string()
    } else {
        label
    };
    println!("background: {} {label}", selection.resource);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_input_accepts_host_appearance_words() {
        assert_eq!(parse_run_input(" Dark "), RunInput::Appearance(Appearance::Dark));
        assert_eq!(parse_run_input("light"), RunInput::Appearance(Appearance::Light));
        assert_eq!(
            parse_run_input("system"),
            RunInput::Appearance(Appearance::Unspecified)
        );
    }

    #[test]
    fn run_input_short_aliases() {
        assert_eq!(parse_run_input("t"), RunInput::Toggle);
        assert_eq!(parse_run_input("n"), RunInput::Ended);
        assert_eq!(parse_run_input("q"), RunInput::Quit);
        assert_eq!(parse_run_input(""), RunInput::Empty);
        assert_eq!(parse_run_input("bogus"), RunInput::Unknown);
    }
}

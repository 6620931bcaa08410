use clap::{Parser, Subcommand};
use squadlog_cli::CliContext;
use squadlog_cli::commands;
use squadlog_cli::dir_watcher;
use squadlog_cli::logging;
use squadlog_cli::readline;
use squadlog_cli::repl::split_command;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    if let Some(handle) = dir_watcher::init_watcher(&ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }

    loop {
        let line = readline()?;
        if line.is_empty() {
            // stdin closed
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    ctx.tasks.lock().await.abort_all();
    Ok(())
}

#[derive(Parser)]
#[command(version, about = "squadlog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Post the cumulative leaderboard, sorted by the given column
    #[command(name = "raidStats", alias = "raid-stats")]
    RaidStats { sort: Option<String> },
    /// Reset the leaderboard and forget processed logs
    Clear,
    Introduce,
    /// Run the fight pipeline on a JSON document or raw combat log
    Process {
        #[arg(short, long)]
        path: String,
    },
    Config,
    SetDirectory {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = split_command(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "squadlog".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::RaidStats { sort }) => commands::raid_stats(sort.as_deref(), ctx).await,
        Some(Commands::Clear) => commands::clear(ctx).await,
        Some(Commands::Introduce) => commands::introduce(ctx).await,
        Some(Commands::Process { path }) => commands::process_file(path, ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SetDirectory { path }) => commands::set_directory(path, ctx).await,
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}

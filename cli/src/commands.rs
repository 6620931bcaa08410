use squadlog_core::context::clear_directory;
use squadlog_core::{AppConfigExt, Command, FightReport, ReportError, Response};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::CliContext;
use crate::dir_watcher;

/// Stand-in for the chat platform: one delivered message per call.
pub fn deliver(channel: &str, message: &str) {
    println!("[#{channel}] {message}");
}

pub fn deliver_attachment(channel: &str, path: &Path) {
    println!("[#{channel}] attachment: {}", path.display());
}

async fn stats_channel(ctx: &CliContext) -> String {
    ctx.config.read().await.delivery.stats_channel.clone()
}

fn deliver_response(channel: &str, response: Response) {
    match response {
        Response::Messages {
            messages,
            attachment,
        } => {
            for message in &messages {
                deliver(channel, message);
            }
            if let Some(path) = attachment {
                deliver_attachment(channel, &path);
            }
        }
        Response::Status(status) => deliver(channel, &status),
    }
}

pub async fn deliver_fight_report(ctx: &CliContext, report: &FightReport) {
    let channel = stats_channel(ctx).await;
    deliver(&channel, &report.header);
    for message in report.friendly_chunks.iter().chain(&report.enemy_chunks) {
        deliver(&channel, message);
    }
}

pub async fn deliver_error(ctx: &CliContext, error: &ReportError) {
    let channel = stats_channel(ctx).await;
    deliver_response(&channel, Response::from_error(error));
}

/// `!raidStats [sort]`. Without a hint the leaderboard is sorted by damage.
pub async fn raid_stats(sort: Option<&str>, ctx: &CliContext) {
    let sort = sort.unwrap_or("damage").to_string();
    let response = ctx
        .service
        .respond(Command::RaidStats { sort: Some(sort) })
        .await;
    let channel = stats_channel(ctx).await;
    deliver_response(&channel, response);
}

/// `!clear`. Resets the leaderboard and forgets processed logs, then empties
/// the log and converter output directories when configured to.
pub async fn clear(ctx: &CliContext) {
    let response = ctx.service.respond(Command::Reset).await;
    ctx.processed.lock().await.clear();

    let (clear_directories, directories) = {
        let config = ctx.config.read().await;
        (
            config.clear_directories_on_reset,
            [
                PathBuf::from(&config.log_directory),
                PathBuf::from(&config.converter.output_directory),
            ],
        )
    };

    if clear_directories {
        for dir in directories.iter().filter(|d| !d.as_os_str().is_empty()) {
            if let Err(e) = clear_directory(dir).await {
                tracing::warn!(dir = %dir.display(), error = %e, "Failed to clear directory");
            }
        }
    }

    let channel = stats_channel(ctx).await;
    deliver_response(&channel, response);
}

/// `!introduce`. Announced on the general channel.
pub async fn introduce(ctx: &CliContext) {
    let response = ctx.service.respond(Command::Introduce).await;
    let channel = ctx.config.read().await.delivery.general_channel.clone();
    deliver_response(&channel, response);
}

/// Run the pipeline on a file given by hand. JSON documents are processed
/// directly, raw combat logs go through the converter first.
pub async fn process_file(path: &str, ctx: &CliContext) {
    let path = PathBuf::from(path);
    if !path.is_file() {
        println!("No such file: {}", path.display());
        return;
    }

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        match ctx.service.process_fight_file(&path).await {
            Ok(report) => deliver_fight_report(ctx, &report).await,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to process fight");
                deliver_error(ctx, &e).await;
            }
        }
    } else {
        process_log(&path, ctx).await;
    }
}

/// Claim, convert and process one raw combat log.
pub async fn process_log(path: &Path, ctx: &CliContext) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !ctx.processed.lock().await.claim(&name) {
        tracing::info!(log = %name, "Log already processed, skipping");
        return;
    }

    let result = async {
        let document = ctx.converter().await.convert(path).await?;
        ctx.service.process_fight_file(&document).await
    }
    .await;

    match result {
        Ok(report) => deliver_fight_report(ctx, &report).await,
        Err(e) => {
            tracing::error!(log = %name, error = %e, "Failed to process combat log");
            deliver_error(ctx, &e).await;
        }
    }
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    println!("Log directory:       {}", config.log_directory);
    println!("Converter:           {}", config.converter.executable);
    println!("Converter settings:  {}", config.converter.config_file);
    println!("Converter output:    {}", config.converter.output_directory);
    println!("Leaderboard backup:  {}", config.backup_file().display());
    println!(
        "Message budget:      {} ({} reserved)",
        config.delivery.message_budget, config.delivery.reserved
    );
    println!(
        "Channels:            #{} / #{}",
        config.delivery.stats_channel, config.delivery.general_channel
    );
    println!("Clear dirs on reset: {}", config.clear_directories_on_reset);
    println!(
        "Players tracked:     {} ({} logs processed)",
        ctx.service.leaderboard().len(),
        ctx.processed.lock().await.len()
    );
}

pub async fn set_directory(new_directory: &str, ctx: &CliContext) {
    let filepath = PathBuf::from(new_directory);
    if !filepath.is_dir() {
        println!("Update failed. Invalid directory name given.");
        return;
    }

    let updated = {
        let mut config = ctx.config.write().await;
        if new_directory == config.log_directory {
            println!("Log directory already configured to {}", new_directory);
            return;
        }
        config.log_directory = new_directory.to_string();
        config.clone()
    };

    if let Err(e) = updated.save() {
        tracing::warn!(error = %e, "Failed to save configuration");
    }

    ctx.tasks.lock().await.abort_all();
    if let Some(handle) = dir_watcher::init_watcher(ctx).await {
        ctx.tasks.lock().await.watcher = Some(handle);
    }
}

pub fn exit() {
    print!("quitting...");
    let _ = std::io::stdout().flush();
}

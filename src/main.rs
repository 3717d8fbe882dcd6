//! NOVA: career intelligence from the command line

use chrono::Local;
use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use nova::cli::{self, Cli, Commands, ConfigAction, NotifyAction, NotifyKind};
use nova::config::{Config, Credentials, OutputFormat};
use nova::error::{NovaError, Result};
use nova::input::InputManager;
use nova::jobs::{JobSearchParams, JobService};
use nova::notify::{Notification, TelegramNotifier};
use nova::output::{save_report_to_file, suggest_filename, CareerReport, RenderedReport, ReportGenerator};
use nova::processing::roadmap::format_rate;
use nova::processing::CareerEngine;
use nova::session::{CareerSession, UserProfile};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown", "doc", "docx"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            field,
            salary,
            name,
            timeframe,
            output,
            save,
            detailed,
            offline,
        } => {
            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| NovaError::InvalidInput(format!("Resume file: {}", e)))?;

            let format = output.unwrap_or(config.output.format);
            let timeframe = timeframe.unwrap_or(config.analysis.default_timeframe);
            let salary = salary.unwrap_or(config.analysis.default_target_salary);
            let credentials = credentials(offline);

            println!("🚀 NOVA career analysis");
            println!("📄 Resume: {}", resume.display());
            println!("🎯 Target: {} at ${}/hr", field, format_rate(salary));
            println!("🛣️  Roadmap: {}", timeframe);
            if offline {
                println!("⚠️  Offline mode: using built-in data");
            }

            let engine = CareerEngine::new(&config, &credentials)?;
            let mut session = CareerSession::new(UserProfile::new(name, field, salary));
            session.begin();

            println!("\n📂 Extracting résumé text...");
            let extracted = InputManager::new().extract(&resume).await?;
            println!("  • {} words from {}", extracted.word_count, extracted.file_name);
            session.attach_resume(extracted)?;

            let spinner = spinner("Analyzing résumé, building roadmap and matching jobs...");
            let outcome = session.submit(&engine, timeframe).await;
            spinner.finish_and_clear();
            let report = outcome?;
            println!("✅ Analysis complete in {}ms\n", report.metadata.processing_time_ms);

            let use_colors = config.output.color_output && save.is_none();
            let generator = ReportGenerator::with_options(use_colors, detailed || config.output.detailed);
            let rendered = generator.generate_report(report, format)?;

            let save = match (save, format) {
                (Some(path), _) => Some(path),
                (None, OutputFormat::Pdf) => Some(PathBuf::from(suggest_filename(
                    format,
                    &report.profile.name,
                    Local::now().date_naive(),
                ))),
                (None, _) => None,
            };
            emit(&rendered, save.as_deref())?;
        }

        Commands::Jobs {
            field,
            salary,
            location,
            offline,
        } => {
            let credentials = credentials(offline);
            let service = JobService::new(&config.services, &config.analysis, credentials.rapidapi_key)?;

            let mut params = JobSearchParams::for_field(&field);
            if let Some(salary) = salary {
                params = params.with_salary_min(salary);
            }
            if let Some(location) = location {
                params = params.with_location(location);
            }

            let results = service.search(&params).await;
            println!("💼 {} openings for {} ({} data)\n", results.listings.len(), field, results.source);
            for (i, job) in results.listings.iter().enumerate() {
                println!(
                    "  {}. {} at {}",
                    i + 1,
                    job.title.as_deref().unwrap_or("Untitled role").bold(),
                    job.company.as_deref().unwrap_or("Unknown company")
                );
                println!(
                    "     📍 {}  💰 {}",
                    job.location.as_deref().unwrap_or("Remote"),
                    rate_range(job.salary_min, job.salary_max)
                );
                if let Some(skills) = job.required_skills.as_ref().filter(|s| !s.is_empty()) {
                    println!("     🛠️  {}", skills.join(", "));
                }
                if let Some(url) = &job.apply_url {
                    println!("     🔗 {}", url);
                }
            }
        }

        Commands::Salary { field, location } => {
            let service = JobService::new(&config.services, &config.analysis, None)?;
            let data = service.salary_data(&field, location.as_deref());
            let ranges = &data.salary_ranges;

            println!("💰 Salary bands for {} ({})\n", data.field, data.location);
            for (label, band) in [
                ("Entry", ranges.entry),
                ("Mid", ranges.mid),
                ("Senior", ranges.senior),
                ("Lead", ranges.lead),
            ] {
                println!("  • {:<7} ${}-{}/hr", label, format_rate(band.min), format_rate(band.max));
            }
            println!("\n📊 Market average: ${}/hr", format_rate(data.market_average));
            println!("📈 Demand: {}", data.demand_level);
        }

        Commands::Notify { action } => {
            let credentials = Credentials::from_env();
            let token = credentials.telegram_bot_token.unwrap_or_default();
            let notifier = TelegramNotifier::new(
                &config.services.telegram_api_url,
                &token,
                config.services.request_timeout_secs,
            )?;

            match action {
                NotifyAction::Send { report, chat_id, kind } => {
                    let report = CareerReport::load(&report)?;
                    let notification = match kind {
                        NotifyKind::Digest => Notification::daily_digest(&report),
                        NotifyKind::JobAlert => Notification::top_job_alert(&report).ok_or_else(|| {
                            NovaError::InvalidInput("The report has no job matches to alert on".to_string())
                        })?,
                    };

                    if notifier.send(&chat_id, &notification).await? {
                        println!("✅ Message sent to chat {}", chat_id);
                    } else {
                        return Err(NovaError::Notification("Telegram did not accept the message".to_string()));
                    }
                }

                NotifyAction::Verify => match notifier.verify().await? {
                    Some(bot) => println!(
                        "✅ Bot token is valid: @{} (id {})",
                        bot.username.as_deref().unwrap_or("unnamed"),
                        bot.id
                    ),
                    None => {
                        return Err(NovaError::Notification("Telegram rejected the bot token".to_string()));
                    }
                },

                NotifyAction::ChatId { username } => match notifier.chat_id_for(&username).await? {
                    Some(chat_id) => println!("💬 Chat id for {}: {}", username, chat_id),
                    None => {
                        warn!("No recent messages from {}", username);
                        println!("⚠️  {} has not messaged the bot yet. Send it any message and retry.", username);
                    }
                },
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("File: {}", config_path.display());
                println!("\nServices:");
                println!("  OpenAI: {} ({} / {})",
                    config.services.openai_base_url,
                    config.services.analysis_model,
                    config.services.roadmap_model
                );
                println!("  Jobs API: {}", config.services.job_api_base_url);
                println!("  Telegram: {}", config.services.telegram_api_url);
                println!("  Timeout: {}s", config.services.request_timeout_secs);
                println!("\nAnalysis:");
                println!("  Default salary: ${}/hr", format_rate(config.analysis.default_target_salary));
                println!("  Default timeframe: {}", config.analysis.default_timeframe);
                println!("  Job matches: {}", config.analysis.max_job_matches);
                println!("  Job location: {}", config.analysis.job_location);
                println!("\nOutput:");
                println!("  Format: {:?}", config.output.format);
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);

                let credentials = Credentials::from_env();
                println!("\nCredentials:");
                println!("  OpenAI: {}", status(credentials.usable_openai_key().is_some()));
                println!("  RapidAPI: {}", status(credentials.rapidapi_key.is_some()));
                println!("  Telegram: {}", status(credentials.telegram_bot_token.is_some()));
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(&config_path)?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn credentials(offline: bool) -> Credentials {
    if offline {
        info!("Offline mode, ignoring configured API keys");
        Credentials::offline()
    } else {
        Credentials::from_env()
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Print text output, or write it to `save` when given
fn emit(rendered: &RenderedReport, save: Option<&Path>) -> Result<()> {
    match (save, rendered) {
        (Some(path), _) => {
            save_report_to_file(rendered, path)?;
            println!("💾 Report saved to {}", path.display());
        }
        (None, RenderedReport::Text(text)) => println!("{}", text),
        (None, RenderedReport::Binary(_)) => {
            return Err(NovaError::InvalidInput("Binary output needs a --save path".to_string()));
        }
    }
    Ok(())
}

fn rate_range(min: Option<f64>, max: Option<f64>) -> String {
    match (min, max) {
        (Some(min), Some(max)) => format!("${}-{}/hr", format_rate(min), format_rate(max)),
        (Some(rate), None) | (None, Some(rate)) => format!("${}/hr", format_rate(rate)),
        (None, None) => "Rate not listed".to_string(),
    }
}

fn status(configured: bool) -> ColoredString {
    if configured {
        "configured".green()
    } else {
        "not set (offline data)".yellow()
    }
}

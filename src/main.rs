#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;

use anyhow::Error;
use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use yansi::Paint;

use crate::application::cli;
use crate::application::cli::RunMode;
use crate::application::repl;
use crate::application::server;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CreativeMode;
use crate::domain::models::PersonaConfig;
use crate::domain::services::Conversation;
use crate::domain::services::ProxyService;
use crate::domain::services::ProxySettings;
use crate::infrastructure::backends::generation_client::GenerationClient;
use crate::infrastructure::upstreams::gemini::Gemini;

fn handle_error(err: Error) {
    eprintln!(
        "{}",
        Paint::red(format!(
            "Oh no! Maya has failed with the following app version and error.\n\nVersion: {}\nError: {}",
            env!("CARGO_PKG_VERSION"),
            err
        ))
    );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

fn debug_enabled() -> bool {
    return env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("maya");
}

/// The proxy logs to stdout. The chat session owns the terminal, so it only
/// logs to a file and only when asked to.
fn init_tracing(mode: RunMode) -> Option<WorkerGuard> {
    match mode {
        RunMode::Serve => {
            let level = if debug_enabled() {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            };
            tracing_subscriber::fmt().with_max_level(level).init();
            return None;
        }
        RunMode::Chat => {
            if !debug_enabled() {
                return None;
            }

            let log_path = cli::log_path();
            let debug_log_dir = env::var("MAYA_LOG_DIR").unwrap_or_else(|_| {
                return log_path
                    .parent()
                    .map(|dir| return dir.to_string_lossy().to_string())
                    .unwrap_or_default();
            });

            let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .json()
                .with_max_level(tracing::Level::DEBUG)
                .with_writer(writer)
                .init();
            return Some(guard);
        }
    }
}

async fn serve() -> Result<()> {
    let settings = ProxySettings::load().await?;
    let upstream = Gemini::from_config()?;
    tracing::info!(
        persona = %settings.persona.name,
        model = %Config::get(ConfigKey::Model),
        "Starting proxy"
    );

    return server::start(ProxyService::new(settings, Box::new(upstream))).await;
}

async fn chat() -> Result<()> {
    let persona = PersonaConfig::load_or_default(&Config::get(ConfigKey::PersonaFile)).await?;
    let mode = CreativeMode::parse(&Config::get(ConfigKey::CreativeMode)).unwrap_or_default();
    let backend = GenerationClient::from_config()?;
    tracing::info!(persona = %persona.name, creative_mode = %mode, "Starting chat session");

    let conversation = Conversation::new(&persona.greeting, Box::new(backend), mode);
    return repl::start(conversation, &persona.name).await;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let mode = match cli::parse().await {
        Ok(Some(mode)) => mode,
        Ok(None) => process::exit(0),
        Err(err) => {
            handle_error(err);
            return;
        }
    };

    let guard = init_tracing(mode);
    Config::trace_loaded();
    let res = match mode {
        RunMode::Serve => serve().await,
        RunMode::Chat => chat().await,
    };

    drop(guard);
    if let Err(err) = res {
        handle_error(err);
    }

    process::exit(0);
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::application::repl::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::CreativeMode;

/// What `main` should run once the command line has been handled.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    Serve,
    Chat,
}

pub fn log_path() -> path::PathBuf {
    return dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("maya/debug.log");
}

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(&config_file_path).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Maya")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when chatting with environment variable RUST_LOG=maya")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_chat() -> Command {
    return Command::new("chat").about("Start a new chat session with Maya in the terminal.");
}

fn subcommand_serve() -> Command {
    return Command::new("serve")
        .about("Run the proxy that attaches the persona and forwards chat requests to Gemini.");
}

fn arg_config(key: ConfigKey, env: &'static str, help: String) -> Arg {
    return Arg::new(key.to_string())
        .long(key.to_string())
        .env(env)
        .num_args(1)
        .help(help)
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("maya")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_chat())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_serve())
        .arg(
            arg_config(
                ConfigKey::ConfigFile,
                "MAYA_CONFIG_FILE",
                format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)),
            )
            .short('c'),
        )
        .arg(
            arg_config(
                ConfigKey::CreativeMode,
                "MAYA_CREATIVE_MODE",
                format!("How poems and songs are produced. remote asks the model and falls back to the built-in collection, local only uses the built-in collection. [default: {}]", Config::default(ConfigKey::CreativeMode)),
            )
            .value_parser(PossibleValuesParser::new(CreativeMode::VARIANTS)),
        )
        .arg(arg_config(
            ConfigKey::GeminiToken,
            "GEMINI_API_KEY",
            "Google Gemini API key used by the proxy.".to_string(),
        ))
        .arg(arg_config(
            ConfigKey::GeminiURL,
            "MAYA_GEMINI_URL",
            format!("Gemini API base URL. [default: {}]", Config::default(ConfigKey::GeminiURL)),
        ))
        .arg(
            arg_config(
                ConfigKey::ListenAddress,
                "MAYA_LISTEN_ADDRESS",
                format!("Address the proxy listens on. [default: {}]", Config::default(ConfigKey::ListenAddress)),
            )
            .short('l'),
        )
        .arg(
            arg_config(
                ConfigKey::Model,
                "MAYA_MODEL",
                format!("Gemini model the proxy generates replies with. [default: {}]", Config::default(ConfigKey::Model)),
            )
            .short('m'),
        )
        .arg(arg_config(
            ConfigKey::PersonaFile,
            "MAYA_PERSONA_FILE",
            "Path to a YAML file overriding the persona name, instruction, greeting and fallback line.".to_string(),
        ))
        .arg(arg_config(
            ConfigKey::ProxyApiKey,
            "MAYA_PROXY_API_KEY",
            "Key the chat client sends to the proxy in the authorization and apikey headers.".to_string(),
        ))
        .arg(
            arg_config(
                ConfigKey::ProxyURL,
                "MAYA_PROXY_URL",
                format!("Proxy endpoint the chat client talks to. [default: {}]", Config::default(ConfigKey::ProxyURL)),
            )
            .short('u'),
        )
        .arg(arg_config(
            ConfigKey::RequestTimeout,
            "MAYA_REQUEST_TIMEOUT",
            format!("Time to wait in milliseconds for the proxy to answer a chat request. [default: {}]", Config::default(ConfigKey::RequestTimeout)),
        ))
        .arg(arg_config(
            ConfigKey::UpstreamRetries,
            "MAYA_UPSTREAM_RETRIES",
            format!("Number of extra attempts made against the model after a transient failure. [default: {}]", Config::default(ConfigKey::UpstreamRetries)),
        ))
        .arg(arg_config(
            ConfigKey::UpstreamTimeout,
            "MAYA_UPSTREAM_TIMEOUT",
            format!("Time to wait in milliseconds for a single model request. [default: {}]", Config::default(ConfigKey::UpstreamTimeout)),
        ));
}

pub async fn parse() -> Result<Option<RunMode>> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    println!("{}", log_path().to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(None);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(RunMode::Chat));
        }
        Some(("serve", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            return Ok(Some(RunMode::Serve));
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(None);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(None);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(None);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(None);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(None);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
            return Ok(Some(RunMode::Chat));
        }
    }
}

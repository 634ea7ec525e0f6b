#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;
use tokio::fs;

use crate::domain::models::CreativeMode;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ConfigKey {
    ConfigFile,
    CreativeMode,
    GeminiToken,
    GeminiURL,
    ListenAddress,
    Model,
    PersonaFile,
    ProxyApiKey,
    ProxyURL,
    RequestTimeout,
    UpstreamRetries,
    UpstreamTimeout,
}

impl ConfigKey {
    /// Keys that hold credentials. These are never written out or logged.
    pub fn is_secret(&self) -> bool {
        return *self == ConfigKey::GeminiToken || *self == ConfigKey::ProxyApiKey;
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn get_u64(key: ConfigKey) -> Result<u64> {
        let val = Config::get(key);
        if let Ok(num) = val.parse::<u64>() {
            return Ok(num);
        }

        bail!(format!("Config key '{key}' must be a positive number, got '{val}'"));
    }

    pub fn default(key: ConfigKey) -> String {
        let default_creative_mode = CreativeMode::default().to_string();
        let config_path = dirs::config_dir()
            .unwrap_or_else(env::temp_dir)
            .join("maya/config.toml");

        let res = match key {
            ConfigKey::CreativeMode => default_creative_mode.as_str(),
            ConfigKey::GeminiToken => "",
            ConfigKey::GeminiURL => "https://generativelanguage.googleapis.com",
            ConfigKey::ListenAddress => "127.0.0.1:8787",
            ConfigKey::Model => "gemini-2.5-flash",
            ConfigKey::PersonaFile => "",
            ConfigKey::ProxyApiKey => "",
            ConfigKey::ProxyURL => "http://127.0.0.1:8787/generate",
            ConfigKey::RequestTimeout => "30000",
            ConfigKey::UpstreamRetries => "1",
            ConfigKey::UpstreamTimeout => "20000",

            // Special
            ConfigKey::ConfigFile => return config_path.to_string_lossy().to_string(),
        };

        return res.to_string();
    }

    pub async fn load(cmd: Command, clap_arg_matches: Vec<&ArgMatches>) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        for matches in clap_arg_matches.as_slice() {
            if let Ok(Some(arg_config_file)) =
                matches.try_get_one::<String>(&ConfigKey::ConfigFile.to_string())
            {
                config_file = arg_config_file.to_string();
            }
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    // Use clap value parsers to do validation.
                    let mut possible_values = vec![];
                    if let Some(arg) = cmd
                        .get_arguments()
                        .find(|e| return e.get_long() == Some(key.to_string().as_str()))
                    {
                        if !arg.get_possible_values().is_empty() {
                            possible_values = arg
                                .get_possible_values()
                                .iter()
                                .map(|e| return e.get_name().to_string())
                                .collect::<Vec<String>>();
                        }
                    }

                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        if !possible_values.is_empty()
                            && !possible_values.contains(&val_str.to_string())
                        {
                            bail!(format!("config.toml has an invalid value for key '{key}': {val_str}\nPossible values are: {}", possible_values.join(", ")));
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            for matches in clap_arg_matches.as_slice() {
                if let Ok(Some(val)) = matches.try_get_one::<String>(&key.to_string()) {
                    if val.is_empty() {
                        continue;
                    }
                    Config::set(key, val)
                }
            }
        }

        return Ok(());
    }

    /// Logs the loaded values. Secrets only show whether they are set.
    pub fn trace_loaded() {
        tracing::debug!(
            creative_mode = %Config::get(ConfigKey::CreativeMode),
            gemini_url = %Config::get(ConfigKey::GeminiURL),
            gemini_token_set = !Config::get(ConfigKey::GeminiToken).is_empty(),
            listen_address = %Config::get(ConfigKey::ListenAddress),
            model = %Config::get(ConfigKey::Model),
            persona_file = %Config::get(ConfigKey::PersonaFile),
            proxy_url = %Config::get(ConfigKey::ProxyURL),
            proxy_api_key_set = !Config::get(ConfigKey::ProxyApiKey).is_empty(),
            "config"
        );
    }

    pub fn serialize_default(cmd: Command) -> String {
        let toml_str = ConfigKey::iter()
            .filter_map(|key| {
                if key == ConfigKey::ConfigFile {
                    return None;
                }

                let arg = cmd
                    .get_arguments()
                    .find(|e| return e.get_long() == Some(key.to_string().as_str()))?;

                let mut description = arg
                    .get_help()
                    .map(|help| return help.to_string())
                    .unwrap_or_default();

                description = description
                    .split("[default:")
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string();

                if !arg.get_possible_values().is_empty() {
                    let possible_values = arg
                        .get_possible_values()
                        .iter()
                        .map(|e| return e.get_name().to_string())
                        .collect::<Vec<_>>()
                        .join(", ");
                    description = format!("{description} [possible values: {}]", possible_values);
                }

                let mut val = Config::default(key);
                if val.is_empty() || key.is_secret() {
                    val = format!("# {key} = \"\"");
                } else if val.parse::<i32>().is_ok() {
                    val = format!("{key} = {val}");
                } else {
                    val = format!("{key} = \"{val}\"");
                }

                return Some(format!("# {description}\n{val}"));
            })
            .collect::<Vec<String>>()
            .join("\n\n");

        return toml_str;
    }
}

use std::io;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() -> Result<()> {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>()?;

    assert_eq!(doc["creative-mode"].as_str(), Some("remote"));
    assert_eq!(doc["listen-address"].as_str(), Some("127.0.0.1:8787"));
    assert_eq!(doc["model"].as_str(), Some("gemini-2.5-flash"));
    assert_eq!(doc["request-timeout"].as_integer(), Some(30000));
    assert_eq!(doc["upstream-retries"].as_integer(), Some(1));
    assert!(doc.get("config-file").is_none());

    return Ok(());
}

#[test]
fn it_never_writes_out_secrets() {
    let res = Config::serialize_default(cli::build());

    assert!(res.contains("# gemini-token = \"\""));
    assert!(res.contains("# proxy-api-key = \"\""));
}

#[test]
fn it_documents_possible_values() {
    let res = Config::serialize_default(cli::build());

    insta::assert_snapshot!(res.split("\n\n").next().unwrap_or_default(), @r###"
    # How poems and songs are produced. remote asks the model and falls back to the built-in collection, local only uses the built-in collection. [possible values: remote, local]
    creative-mode = "remote"
    "###);
}

#[test]
fn it_has_defaults_for_numeric_keys() {
    for key in [
        ConfigKey::RequestTimeout,
        ConfigKey::UpstreamRetries,
        ConfigKey::UpstreamTimeout,
    ] {
        assert!(Config::default(key).parse::<u64>().is_ok(), "{key}");
    }
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["maya", "-c", "./config.example.toml", "chat"])?;
    Config::load(cli::build(), vec![&matches]).await?;
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_loads_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["maya", "-c", "./test/bad-config.toml", "chat"])?;
    let res = Config::load(cli::build(), vec![&matches]).await;

    let err = res.unwrap_err().to_string();
    assert!(err.contains("creative-mode"));
    assert!(err.contains("remote, local"));

    return Ok(());
}

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        return Ok(buf.len());
    }

    fn flush(&mut self) -> io::Result<()> {
        return Ok(());
    }
}

#[test]
fn it_logs_loaded_values_without_secrets() {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || return writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, Config::trace_loaded);

    let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("config"));
    assert!(output.contains("listen_address="));
    assert!(output.contains("gemini_token_set="));
    assert!(output.contains("proxy_api_key_set="));
    assert!(!output.contains("gemini_token="));
    assert!(!output.contains("proxy_api_key="));
}

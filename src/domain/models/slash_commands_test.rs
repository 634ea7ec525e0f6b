use super::SlashCommand;
use crate::domain::models::CreativeKind;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_invalid_prefix() {
    let text = "!q";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_regular_chat() {
    let text = "write me a poem please";
    assert!(SlashCommand::parse(text).is_none());
}
#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_short_quit() {
    let cmd = SlashCommand::parse("/q").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_exit() {
    let cmd = SlashCommand::parse("/exit").unwrap();
    assert!(cmd.is_quit());
}
#[test]
fn it_is_not_is_quit() {
    let cmd = SlashCommand::parse("/poem").unwrap();
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_logout() {
    let cmd = SlashCommand::parse("/logout").unwrap();
    assert!(cmd.is_logout());
    assert!(!cmd.is_quit());
}

#[test]
fn it_is_help() {
    let cmd = SlashCommand::parse("/h").unwrap();
    assert!(cmd.is_help());
}

#[test]
fn it_is_short_poem() {
    let cmd = SlashCommand::parse("/p").unwrap();
    assert_eq!(cmd.creative_kind(), Some(CreativeKind::Poem));
    assert_eq!(cmd.topic(), None);
}
#[test]
fn it_is_song() {
    let cmd = SlashCommand::parse("/song").unwrap();
    assert_eq!(cmd.creative_kind(), Some(CreativeKind::Song));
}
#[test]
fn it_is_not_creative() {
    let cmd = SlashCommand::parse("/help").unwrap();
    assert_eq!(cmd.creative_kind(), None);
}

#[test]
fn it_joins_topic_args() {
    let cmd = SlashCommand::parse("  /poem   neon   rain ").unwrap();
    assert_eq!(cmd.args, vec!["neon".to_string(), "rain".to_string()]);
    assert_eq!(cmd.topic(), Some("neon rain".to_string()));
}

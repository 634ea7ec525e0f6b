use super::CreativeKind;
use super::CreativeMode;
use crate::domain::models::MessageKind;

#[test]
fn it_parses_creative_modes() {
    assert_eq!(CreativeMode::parse("remote"), Some(CreativeMode::Remote));
    assert_eq!(CreativeMode::parse("local"), Some(CreativeMode::Local));
    assert_eq!(CreativeMode::parse("sometimes"), None);
}

#[test]
fn it_maps_kinds_to_message_kinds() {
    assert_eq!(CreativeKind::Poem.message_kind(), MessageKind::Poem);
    assert_eq!(CreativeKind::Song.message_kind(), MessageKind::Song);
}

#[test]
fn it_uses_the_plain_instruction_without_a_topic() {
    assert_eq!(
        CreativeKind::Poem.prompt(None),
        CreativeKind::Poem.instruction()
    );
    assert_eq!(
        CreativeKind::Song.prompt(Some("   ")),
        CreativeKind::Song.instruction()
    );
}

#[test]
fn it_appends_a_topic() {
    let prompt = CreativeKind::Song.prompt(Some(" rainy nights "));
    assert!(prompt.starts_with(CreativeKind::Song.instruction()));
    assert!(prompt.ends_with(" Let it be about rainy nights."));
}

use super::*;
use clap_complete::Shell;

#[test]
fn cli_parse_tag_list() {
    match parse(&["winks", "tag", "list"]) {
        CliCommand::Tag(VocabularyCommand::List) => {}
        _ => panic!("expected tag list"),
    }
}

#[test]
fn cli_parse_tag_delete() {
    match parse(&["winks", "tag", "delete", "工具", "--pin", "0000"]) {
        CliCommand::Tag(VocabularyCommand::Delete { name, pin }) => {
            assert_eq!(name, "工具");
            assert_eq!(pin.as_deref(), Some("0000"));
        }
        _ => panic!("expected tag delete"),
    }
}

#[test]
fn cli_parse_classification_delete() {
    match parse(&["winks", "classification", "delete", "设计"]) {
        CliCommand::Classification(VocabularyCommand::Delete { name, pin }) => {
            assert_eq!(name, "设计");
            assert!(pin.is_none());
        }
        _ => panic!("expected classification delete"),
    }
}

#[test]
fn cli_parse_import_and_migrate() {
    match parse(&["winks", "import", "/tmp/links.json"]) {
        CliCommand::Import { path } => assert_eq!(path.to_str(), Some("/tmp/links.json")),
        _ => panic!("expected Import"),
    }
    assert!(matches!(parse(&["winks", "migrate"]), CliCommand::Migrate));
}

#[test]
fn cli_parse_pin_hash() {
    match parse(&["winks", "pin-hash", "1234"]) {
        CliCommand::PinHash { pin } => assert_eq!(pin, "1234"),
        _ => panic!("expected PinHash"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["winks", "completions", "zsh"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Zsh),
        _ => panic!("expected Completions"),
    }
    assert!(Cli::try_parse_from(["winks", "completions", "cmd.exe"]).is_err());
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

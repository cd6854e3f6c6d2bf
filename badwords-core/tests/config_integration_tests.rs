// badwords-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use badwords_core::config::{FilterConfig, Phase};
use badwords_core::rules::{CharacterRule, Repetition, Rule, WhitespaceRule};
use badwords_core::{BadwordsError, Word};

#[test]
fn test_load_standard_config() -> Result<()> {
    let config = FilterConfig::standard()?;
    assert!(config.rules(Phase::Pre).is_empty());
    assert!(!config.rules(Phase::Standard).is_empty());
    assert!(config
        .rules(Phase::Standard)
        .iter()
        .any(|r| matches!(r, Rule::Whitespace(_))));
    assert!(config.whitelisted_words().is_empty());
    Ok(())
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
pre_rules:
  - type: whitespace
rules:
  - type: character
    character: o
    alternative_characters: ["0"]
    repetition: true
  - type: character
    character: s
    repetition: 2
post_rules:
  - type: boundary
whitelist:
  - " Scunthorpe "
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = FilterConfig::load_from_file(file.path())?;

    assert_eq!(config.rules(Phase::Pre), &[Rule::Whitespace(WhitespaceRule::new())]);
    assert_eq!(config.rules(Phase::Standard).len(), 2);
    assert_eq!(config.whitelisted_words(), &["scunthorpe"]);

    let expected_o = CharacterRule::new("o")?
        .with_alternatives(&["0"])?
        .with_repetition(Repetition::detect());
    assert_eq!(config.rules(Phase::Standard)[0], Rule::from(expected_o));
    Ok(())
}

#[test]
fn test_load_from_missing_file_is_io_error() {
    let result = FilterConfig::load_from_file("/no/such/badwords.yaml");
    assert!(matches!(result, Err(BadwordsError::Io(_))));
}

#[test]
fn test_invalid_rule_in_file_is_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"rules:\n  - type: character\n    character: o\n    repetition: 0\n")?;
    let result = FilterConfig::load_from_file(file.path());
    assert!(matches!(result, Err(BadwordsError::Serialization(_))));
    Ok(())
}

#[test]
fn test_round_trip_preserves_order_and_dedup() -> Result<()> {
    let mut config = FilterConfig::new();
    config
        .add_rule(Phase::Standard, CharacterRule::new("z")?)
        .add_rule(Phase::Standard, CharacterRule::new("a")?)
        .add_rule(Phase::Standard, CharacterRule::new("z")?)
        .add_rule(Phase::Post, Rule::Boundary);
    config.add_whitelisted_words(vec!["Beta", "alpha", "beta"])?;

    let yaml = config.to_yaml_string()?;
    let restored = FilterConfig::from_yaml_str(&yaml)?;
    assert_eq!(restored, config);
    assert_eq!(restored.rules(Phase::Standard).len(), 2);
    assert_eq!(
        restored.rules(Phase::Standard)[0],
        Rule::from(CharacterRule::new("z")?)
    );
    assert_eq!(restored.whitelisted_words(), &["beta", "alpha"]);
    Ok(())
}

#[test]
fn test_standard_patterns() -> Result<()> {
    let config = FilterConfig::standard()?;

    let phrase = Word::with_boundaries("bad word", true, true)?;
    let pattern = config.apply_rules_to_word(&phrase);
    assert!(pattern.starts_with(r"(?<![\p{L}\p{N}])"));
    assert!(pattern.ends_with(r"(?![\p{L}\p{N}])"));
    assert!(pattern.contains(r"(?:\s|!|\?)*"));

    let bass = Word::new("bass")?;
    assert_eq!(
        config.apply_rules_to_word(&bass),
        r"(?:b|8)(?:a|@|\*)+(?:s|5|\$){2,}"
    );
    Ok(())
}

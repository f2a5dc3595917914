//! Tests for trigger detection

use pretty_assertions::assert_eq;

use super::*;
use crate::document::{BlockContext, INLINE_PLACEHOLDER, TextRange};

fn matcher() -> TriggerMatcher {
    TriggerMatcher::new(TriggerConfig::default()).unwrap()
}

fn matcher_with_space() -> TriggerMatcher {
    TriggerMatcher::new(TriggerConfig {
        allow_space: true,
        ..TriggerConfig::default()
    })
    .unwrap()
}

fn block(prefix: &str) -> BlockContext {
    BlockContext::new(0, 1, prefix)
}

mod mention_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_mention_at_block_start() {
        let m = matcher().match_at(&block("@foo")).unwrap();
        assert_eq!(m.kind, TriggerKind::Mention);
        assert_eq!(m.query_text, "foo");
        assert_eq!(m.range, TextRange::new(0, 4));
    }

    #[test]
    fn test_mention_after_text_excludes_leading_space() {
        let m = matcher().match_at(&block("text @foo")).unwrap();
        // range.from points exactly at '@', not the preceding space
        assert_eq!(m.range, TextRange::new(5, 9));
        assert_eq!(m.query_text, "foo");
    }

    #[test]
    fn test_bare_trigger_is_empty_query_match() {
        let m = matcher().match_at(&block("@")).unwrap();
        assert_eq!(m.query_text, "");
        assert_eq!(m.range, TextRange::new(0, 1));
    }

    #[test]
    fn test_space_terminates_run_without_allow_space() {
        assert_eq!(matcher().match_at(&block("@foo bar")), None);
    }

    #[test]
    fn test_allow_space_spans_two_runs() {
        let m = matcher_with_space().match_at(&block("@Jane Doe")).unwrap();
        assert_eq!(m.query_text, "Jane Doe");
        assert_eq!(m.range, TextRange::new(0, 9));
    }

    #[test]
    fn test_mid_word_at_sign_does_not_trigger() {
        assert_eq!(matcher().match_at(&block("mail@example")), None);
    }

    #[test]
    fn test_hyphen_and_plus_are_word_chars() {
        let m = matcher().match_at(&block("@c++-dev")).unwrap();
        assert_eq!(m.query_text, "c++-dev");
    }

    #[test]
    fn test_block_start_offset_translates_to_absolute() {
        let ctx = BlockContext::new(12, 1, "see @al");
        let m = matcher().match_at(&ctx).unwrap();
        assert_eq!(m.range, TextRange::new(16, 19));
    }
}

mod tag_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_tag_match() {
        let m = matcher().match_at(&block("note #rust")).unwrap();
        assert_eq!(m.kind, TriggerKind::Tag);
        assert_eq!(m.query_text, "rust");
        assert_eq!(m.range, TextRange::new(5, 10));
    }

    #[test]
    fn test_tag_never_allows_space_even_when_configured() {
        assert_eq!(matcher_with_space().match_at(&block("#a b")), None);
    }

    #[test]
    fn test_plus_terminates_tag_run() {
        // '+' is a mention word char but not a tag word char.
        assert_eq!(matcher().match_at(&block("#c++")), None);
    }
}

mod boundary_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_nested_block_suppresses_trigger() {
        let ctx = BlockContext::new(0, 2, "@foo");
        assert_eq!(matcher().match_at(&ctx), None);
    }

    #[test]
    fn test_placeholder_terminates_run() {
        let prefix = format!("a {INLINE_PLACEHOLDER}@x");
        let m = matcher().match_at(&block(&prefix));
        // The placeholder is neither whitespace nor a word char, so it
        // cannot precede a trigger.
        assert_eq!(m, None);
    }

    #[test]
    fn test_long_prefix_is_bounded_from_the_left() {
        let mut prefix = "x".repeat(MAX_MATCH * 2);
        prefix.push_str(" @abc");
        let m = matcher().match_at(&block(&prefix)).unwrap();
        let expected_from = MAX_MATCH * 2 + 1;
        assert_eq!(m.range, TextRange::new(expected_from, expected_from + 4));
        assert_eq!(m.query_text, "abc");
    }

    #[test]
    fn test_trigger_beyond_bound_is_ignored() {
        let mut prefix = String::from("@abc ");
        prefix.push_str(&"x ".repeat(MAX_MATCH));
        assert_eq!(matcher().match_at(&block(&prefix)), None);
    }

    #[test]
    fn test_no_trigger_in_plain_text() {
        assert_eq!(matcher().match_at(&block("just some words")), None);
    }

    #[test]
    fn test_equal_triggers_rejected() {
        let result = TriggerMatcher::new(TriggerConfig {
            mention_trigger: '@',
            hashtag_trigger: '@',
            allow_space: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_trigger_chars_are_escaped() {
        let m = TriggerMatcher::new(TriggerConfig {
            mention_trigger: '+',
            hashtag_trigger: '.',
            allow_space: false,
        })
        .unwrap();
        let found = m.match_at(&block("ping +bob")).unwrap();
        assert_eq!(found.kind, TriggerKind::Mention);
        assert_eq!(found.query_text, "bob");
    }
}

mod serde_tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_kind_serialization() {
        assert_eq!(
            serde_json::to_string(&TriggerKind::Mention).unwrap(),
            "\"mention\""
        );
        assert_eq!(serde_json::to_string(&TriggerKind::Tag).unwrap(), "\"tag\"");
    }

    #[test]
    fn test_match_round_trip() {
        let m = TriggerMatch {
            range: TextRange::new(5, 9),
            kind: TriggerKind::Mention,
            query_text: "foo".into(),
        };
        let json = serde_json::to_string(&m).unwrap();
        let parsed: TriggerMatch = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, m);
    }
}

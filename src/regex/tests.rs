use ::regex::Regex as LibRegex;
use proptest::collection::vec;
use proptest::prelude::*;

use super::super::error::Error;
use super::super::test_utils::{arb_hir, to_pattern};
use super::*;

fn preprocessed(pattern: &str) -> String {
    preprocess(&tokenize(pattern))
        .iter()
        .map(|token| token.to_string())
        .collect()
}

//  ____                                                   _
// |  _ \ _ __ ___ _ __  _ __ ___   ___ ___  ___ ___  ___ (_)_ __   __ _
// | |_) | '__/ _ \ '_ \| '__/ _ \ / __/ _ \/ __/ __|/ __|| | '_ \ / _` |
// |  __/| | |  __/ |_) | | | (_) | (_|  __/\__ \__ \\__ \| | | | | (_| |
// |_|   |_|  \___| .__/|_|  \___/ \___\___||___/___/|___/|_|_| |_|\__, |
//                |_|                                              |___/

#[test]
fn test_preprocess() {
    assert_eq!(preprocessed(""), "");
    assert_eq!(preprocessed("a"), "a");
    assert_eq!(preprocessed("ab"), "a.b");
    assert_eq!(preprocessed("a|b"), "a|b");
    assert_eq!(preprocessed("(a|ab)*c+"), "(a|a.b)*.c+");
    assert_eq!(preprocessed("a*b?c"), "a*.b?.c");
    assert_eq!(preprocessed("(a)(b)"), "(a).(b)");
}

proptest! {
    #[test]
    fn prop_preprocess_inserts_only_where_needed(pattern in "[ab1()|*?+]{0,12}") {
        let tokens = tokenize(&pattern);
        let out = preprocess(&tokens);

        // Removing markers gives back the input
        let stripped: Vec<Token> = out.iter().copied().filter(|&t| t != Token::Concat).collect();
        prop_assert_eq!(&stripped, &tokens);

        // A marker follows the i-th token iff it ends an operand and the next one begins one
        let mut out_iter = out.iter().peekable();
        for pair in tokens.windows(2) {
            prop_assert_eq!(out_iter.next(), Some(&pair[0]));
            let has_marker = out_iter.peek() == Some(&&Token::Concat);
            prop_assert_eq!(has_marker, pair[0].ends_operand() && pair[1].begins_operand());
            if has_marker {
                out_iter.next();
            }
        }
    }
}

//  ____
// |  _ \ __ _ _ __ ___  ___
// | |_) / _` | '__/ __|/ _ \
// |  __/ (_| | |  \__ \  __/
// |_|   \__,_|_|  |___/\___|
//

#[test]
fn test_parse_concat_is_right_leaning() {
    assert_eq!(
        parse("abc").unwrap(),
        Hir::concat(Hir::Char('a'), Hir::concat(Hir::Char('b'), Hir::Char('c')))
    );
}

#[test]
fn test_parse_alternation_binds_loosest() {
    assert_eq!(
        parse("a|bc").unwrap(),
        Hir::alternation(Hir::Char('a'), Hir::concat(Hir::Char('b'), Hir::Char('c')))
    );
    assert_eq!(
        parse("a|b|c").unwrap(),
        Hir::alternation(Hir::Char('a'), Hir::alternation(Hir::Char('b'), Hir::Char('c')))
    );
}

#[test]
fn test_parse_repetitions() {
    assert_eq!(
        parse("ab*").unwrap(),
        Hir::concat(Hir::Char('a'), Hir::closure(Hir::Char('b')))
    );
    assert_eq!(
        parse("(ab)?").unwrap(),
        Hir::option(Hir::concat(Hir::Char('a'), Hir::Char('b')))
    );
    assert_eq!(parse("((a))").unwrap(), Hir::Char('a'));
}

#[test]
fn test_parse_render() {
    assert_eq!(
        parse("(a|b)*abb").unwrap().to_string(),
        "(((a)|(b))*).((a).((b).(b)))"
    );
    assert_eq!(parse("a?").unwrap().to_string(), "(a)?");
    assert_eq!(parse("7").unwrap().to_string(), "7");
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        parse(""),
        Err(Error::InvalidArgument("pattern must not be empty"))
    );
    assert_eq!(
        parse("(a"),
        Err(Error::MissingSymbol { symbol: ')', position: 2 })
    );
    assert_eq!(
        parse("(a|b"),
        Err(Error::MissingSymbol { symbol: ')', position: 4 })
    );
    assert_eq!(
        parse("(a+)"),
        Err(Error::MissingSymbol { symbol: ')', position: 2 })
    );
    assert_eq!(parse("a|"), Err(Error::Parse { position: 2, found: None }));
    assert_eq!(parse("*a"), Err(Error::Parse { position: 0, found: Some('*') }));
    assert_eq!(parse("()"), Err(Error::Parse { position: 1, found: Some(')') }));
    assert_eq!(parse("a.b"), Err(Error::Parse { position: 1, found: Some('.') }));
    assert_eq!(parse("a-b"), Err(Error::Parse { position: 1, found: Some('-') }));
    assert_eq!(parse("a+"), Err(Error::TrailingInput { position: 1, found: '+' }));
    assert_eq!(parse("a)"), Err(Error::TrailingInput { position: 1, found: ')' }));
    assert_eq!(parse("a**"), Err(Error::TrailingInput { position: 2, found: '*' }));
}

#[test]
fn test_missing_symbol_after_groups() {
    assert_eq!(
        parse("(a)(b"),
        Err(Error::MissingSymbol { symbol: ')', position: 5 })
    );
    assert_eq!(
        parse("((a)|(b)c"),
        Err(Error::MissingSymbol { symbol: ')', position: 9 })
    );
}

#[test]
fn test_nesting_limit() {
    let nested = |depth: usize| format!("{}a{}", "(".repeat(depth), ")".repeat(depth));

    assert_eq!(parse(&nested(MAX_NESTING)).unwrap(), Hir::Char('a'));
    assert!(is_match(&nested(MAX_NESTING), "a"));
    assert_eq!(
        parse(&nested(MAX_NESTING + 1)),
        Err(Error::InvalidArgument("groups are nested too deeply"))
    );
}

#[test]
fn test_long_patterns() {
    let pattern = "a".repeat(20_000);
    let hir = parse(&pattern).unwrap();

    assert_eq!(hir.size(), 2 * 20_000 - 1);
    assert_eq!(hir.to_string().len(), 20_000 + 5 * 19_999);

    let matcher = compile(&"ab".repeat(5_000)).unwrap();
    assert!(matcher.matches(&"ab".repeat(5_000)));
    assert!(!matcher.matches(&"ab".repeat(4_999)));
    assert!(!matcher.matches(&format!("{}a", "ab".repeat(5_000))));

    let matcher = compile(&vec!["abc"; 3_000].join("|")).unwrap();
    assert!(matcher.matches("abc"));
    assert!(!matcher.matches("abcabc"));

    let matcher = compile(&format!("({})*", "a?".repeat(4_000))).unwrap();
    assert!(matcher.matches(""));
    assert!(matcher.matches(&"a".repeat(9_000)));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::Parse { position: 0, found: Some('*') }.to_string(),
        "expected alphanumeric character at position 0, got '*'"
    );
    assert_eq!(
        Error::Parse { position: 2, found: None }.to_string(),
        "expected alphanumeric character at position 2, got end of pattern"
    );
    assert_eq!(
        Error::MissingSymbol { symbol: ')', position: 2 }.to_string(),
        "missing symbol ')' at position 2"
    );
}

#[test]
fn test_compile_rejects_empty_pattern() {
    assert!(matches!(compile(""), Err(Error::InvalidArgument(_))));
}

//  __  __       _       _
// |  \/  | __ _| |_ ___| |__
// | |\/| |/ _` | __/ __| '_ \
// | |  | | (_| | || (__| | | |
// |_|  |_|\__,_|\__\___|_| |_|
//

#[test]
fn test_concat() {
    assert!(is_match("ab", "ab"));
    assert!(!is_match("ab", "a"));
    assert!(!is_match("ab", "c"));
}

#[test]
fn test_alternation() {
    assert!(is_match("a|b", "a"));
    assert!(is_match("a|b", "b"));
    assert!(!is_match("a|b", "ab"));
    assert!(!is_match("a|b", "c"));
}

#[test]
fn test_closure() {
    assert!(is_match("a*", ""));
    assert!(is_match("a*", "a"));
    assert!(is_match("a*", "aa"));
    assert!(!is_match("a*", "c"));
    assert!(!is_match("a*", "ac"));
}

#[test]
fn test_option() {
    assert!(is_match("a?", ""));
    assert!(is_match("a?", "a"));
    assert!(!is_match("a?", "aa"));
}

#[test]
fn test_combined() {
    assert!(is_match("(a|b)*c?", "aaaaaa"));
    assert!(is_match("(a|b)*c?", "bbbbbb"));
    assert!(is_match("(a|b)*c?", "aabbbbc"));
    assert!(!is_match("(a|b)*c?", "cc"));

    assert!(is_match("ab*", "a"));
    assert!(is_match("ab*", "abb"));
    assert!(!is_match("ab*", "ac"));
    assert!(is_match("ab?", "ab"));
    assert!(!is_match("ab?", "abb"));
    assert!(is_match("A|B", "B"));
    assert!(!is_match("A|B", "AB"));
}

#[test]
fn test_nested_closures() {
    assert!(is_match("(a*)*", ""));
    assert!(is_match("(a*)*", "aaa"));
    assert!(is_match("(a?b?)*", "abbaab"));
    assert!(!is_match("(a?b?)*", "abc"));
}

#[test]
fn test_digits_and_unicode_letters() {
    assert!(is_match("(0|1)*2", "01102"));
    assert!(!is_match("(0|1)*2", "0120"));
    assert!(is_match("é*", "éé"));
    assert!(is_match("٣|x", "٣"));
    assert!(is_match("²", "²"));
    assert!(!is_match("²", "2"));
}

proptest! {
    #[test]
    fn prop_agrees_with_regex_crate(
        hir in arb_hir(),
        inputs in vec("[abcd]{0,8}", 1..16),
    ) {
        let pattern = to_pattern(&hir);
        let matcher = compile(&pattern).unwrap();
        let oracle = LibRegex::new(&format!("^(?:{})$", pattern)).unwrap();

        for input in &inputs {
            prop_assert_eq!(
                matcher.matches(input),
                oracle.is_match(input),
                "pattern {:?} on {:?}", pattern, input
            );
        }
    }

    #[test]
    fn prop_compile_is_deterministic(
        hir in arb_hir(),
        inputs in vec("[abc]{0,6}", 1..8),
    ) {
        let pattern = to_pattern(&hir);
        let first = compile(&pattern).unwrap();
        let second = compile(&pattern).unwrap();

        prop_assert_eq!(first.get_dfa().to_string(), second.get_dfa().to_string());
        for input in &inputs {
            prop_assert_eq!(first.matches(input), second.matches(input));
        }
    }
}

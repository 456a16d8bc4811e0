//! End-to-end layout streams: the stand-in host drives the scanner over small Koka fragments.
//!
//! Streams are shown in compact form: host-lexed text as written, synthetic tokens by their spelling.

use kokascan::Symbol;
use kokascan::config::{AcceptancePolicy, DriverConfig};
use kokascan::driver::{LayoutDriver, LexemeKind, tokenize};

fn compact(source: &str) -> String {
    tokenize(source, &DriverConfig::default()).unwrap().compact(source)
}

fn compact_with(source: &str, policy: AcceptancePolicy) -> String {
    tokenize(source, &DriverConfig::default().with_policy(policy))
        .unwrap()
        .compact(source)
}

// =============================================================================
// Blocks
// =============================================================================

#[test]
fn indented_block_then_dedent() {
    insta::assert_snapshot!(compact("block:\n  x = 1\n  y = 2\nrest"), @"block : { x = 1 ; y = 2 ; } ; rest ;");
}

#[test]
fn nested_blocks_close_one_pair_per_level() {
    insta::assert_snapshot!(compact("a\n  b\n    c\nd"), @"a { b { c ; } ; } ; d ;");
}

#[test]
fn open_block_at_end_of_input_gets_only_the_terminator() {
    insta::assert_snapshot!(compact("a\n\tb\n        c"), @"a { b ; c ;");
}

#[test]
fn explicit_braces() {
    insta::assert_snapshot!(compact("f {\n  x\n}"), @"f { ; x ; } ;");
}

// =============================================================================
// Continuations
// =============================================================================

#[test]
fn conditional_keywords_continue() {
    insta::assert_snapshot!(compact("if c\n  then a\n  else b"), @"if c then a else b ;");
    insta::assert_snapshot!(compact("a\nthen b"), @"a then b ;");
}

#[test]
fn keyword_prefix_is_a_new_statement() {
    insta::assert_snapshot!(compact("a\nthenX"), @"a ; thenX ;");
}

#[test]
fn dedent_onto_continuation_drops_the_last_separator() {
    insta::assert_snapshot!(compact("x\n    y\n  .z"), @"x { y ; } . z ;");
}

#[test]
fn bracketed_arguments_under_heuristic_policy() {
    let source = "f(\n  x,\n  y)";
    insta::assert_snapshot!(compact_with(source, AcceptancePolicy::Heuristic), @"f ( x , y ) ;");
    insta::assert_snapshot!(compact_with(source, AcceptancePolicy::Permissive), @"f ( { x , ; y ) ;");
}

// =============================================================================
// Raw strings
// =============================================================================

#[test]
fn raw_string_is_one_lexeme() {
    let source = "s = r#\"a\"b\"#";
    let stream = tokenize(source, &DriverConfig::default()).unwrap();
    let raw: Vec<_> = stream.externals().filter(|(s, _)| *s == Symbol::RawString).collect();
    assert_eq!(raw.len(), 1);
    assert_eq!(raw[0].1.start, 4);
    assert_eq!(raw[0].1.end, source.len());
    insta::assert_snapshot!(stream.compact(source), @r###"s = r#"a"b"# ;"###);
}

#[test]
fn unterminated_raw_string_falls_back_to_text() {
    let source = "r#\"a\"";
    let stream = tokenize(source, &DriverConfig::default()).unwrap();
    assert!(stream.externals().all(|(s, _)| s != Symbol::RawString));
    assert_eq!(stream.lexemes[0].kind, LexemeKind::Text);
    assert_eq!(stream.lexemes[0].text(source), "r");
}

// =============================================================================
// Spans and checkpoints
// =============================================================================

#[test]
fn layout_tokens_sit_at_the_line_head() {
    let source = "block:\n  x = 1\n  y = 2\nrest";
    let stream = tokenize(source, &DriverConfig::default()).unwrap();
    let externals: Vec<(Symbol, usize)> = stream
        .externals()
        .map(|(symbol, span)| {
            assert!(span.is_empty(), "{symbol} should be zero-width");
            (symbol, span.start)
        })
        .collect();
    assert_eq!(
        externals,
        vec![
            (Symbol::OpenBrace, 9),
            (Symbol::Semicolon, 17),
            (Symbol::Semicolon, 23),
            (Symbol::CloseBrace, 23),
            (Symbol::Semicolon, 23),
            (Symbol::Semicolon, 27),
        ]
    );
}

#[test]
fn terminator_comes_last_and_is_saved() {
    for source in ["", "x", "a\n  b\n", "f {\n}\n\n", "  \n  "] {
        let stream = tokenize(source, &DriverConfig::default()).unwrap();
        let last = stream.externals().last().unwrap();
        assert_eq!(last.0, Symbol::Semicolon, "{source:?}");
        assert_eq!(last.1.start, source.len(), "{source:?}");

        // checkpoints[i + 1] follows the i-th external; byte 9 is the end-of-input flag.
        let flagged: Vec<bool> = stream.checkpoints.iter().map(|c| c.state.get(9) == Some(&1)).collect();
        assert_eq!(flagged.iter().filter(|f| **f).count(), 1, "terminator emitted more than once for {source:?}");
        assert_eq!(flagged.last(), Some(&true), "end-of-input flag not saved for {source:?}");
    }
}

#[test]
fn resume_from_middle_checkpoint() {
    let source = "a\n  b\n    c\n  d\ne";
    let config = DriverConfig::default();
    let full = tokenize(source, &config).unwrap();

    // checkpoints[3] was saved right after the third external token.
    let checkpoint = &full.checkpoints[3];
    let (index, _) = full
        .lexemes
        .iter()
        .enumerate()
        .filter(|(_, l)| l.symbol().is_some())
        .nth(2)
        .unwrap();

    let resumed = LayoutDriver::resume(source, config, checkpoint).unwrap().run().unwrap();
    assert_eq!(&resumed.checkpoints[0], checkpoint);
    assert_eq!(resumed.lexemes, full.lexemes[index + 1..]);
    assert_eq!(resumed.checkpoints[1..], full.checkpoints[4..]);
}

//! Global substitution and delimiter splitting over token sequences,
//! including the round-trip and termination properties they guarantee.

use linepat::{Error, Expr, Match, Pattern, RuntimeError, Tokens, Unmatched};
use matches::assert_matches;
use quickcheck::quickcheck;

fn pattern(expr: Expr) -> Pattern {
    Pattern::new(&expr).unwrap()
}

fn strings(seq: &[&str]) -> Vec<String> {
    seq.iter().map(|s| (*s).to_string()).collect()
}

// gsub

#[test]
fn gsub_replaces_every_match() {
    let p = pattern(Expr::text("int"));
    let seq = strings(&["int", "a", "int", "b", "double"]);

    let result = p.gsub(&seq, Tokens(strings(&["INTEGER"]))).unwrap();
    assert_eq!(result, ["INTEGER", "a", "INTEGER", "b", "double"]);
}

#[test]
fn gsub_with_regex_leaf() {
    let p = pattern(Expr::regex(r"int\s+(\w+);").unwrap());
    let seq = strings(&["int a;", "int b;", "double c;"]);

    let result = p.gsub(&seq, Tokens(strings(&["INTEGER"]))).unwrap();
    assert_eq!(result, ["INTEGER", "INTEGER", "double c;"]);
}

#[test]
fn gsub_with_multi_token_match() {
    let p = pattern(Expr::times(Expr::text("int"), 2));
    let seq = strings(&["int", "int", "double"]);

    let result = p.gsub(&seq, Tokens(strings(&["PAIR"]))).unwrap();
    assert_eq!(result, ["PAIR", "double"]);
}

#[test]
fn gsub_drops_matched_lines_with_empty_replacement() {
    let p = pattern(Expr::regex("^#").unwrap());
    let seq = strings(&["#comment", "keep", "#comment2"]);

    let result = p.gsub(&seq, Tokens(Vec::new())).unwrap();
    assert_eq!(result, ["keep"]);
}

#[test]
fn gsub_closure_sees_captures() {
    let p = pattern(Expr::concat(vec![
        Expr::regex("^Name:").unwrap(),
        Expr::group(0, Expr::regex(".*").unwrap()),
    ]));
    let seq = strings(&["Name:", "Alice", "Age: 30"]);

    let result = p
        .gsub(&seq, |m: &Match<String>| {
            m.group(0).map(<[String]>::to_vec).unwrap_or_default()
        })
        .unwrap();
    assert_eq!(result, ["Alice", "Age: 30"]);
}

#[test]
fn gsub_without_matches_is_identity() {
    let p = pattern(Expr::text("missing"));
    let seq = strings(&["a", "b", "c"]);

    let result = p.gsub(&seq, Tokens(strings(&["X"]))).unwrap();
    assert_eq!(result, seq);
}

#[test]
fn gsub_zero_width_matches_terminate_and_interleave() {
    // matches the empty run in front of every token and at the end
    let p = pattern(Expr::star(Expr::text("x")));
    let seq = strings(&["a", "b"]);

    let result = p.gsub(&seq, Tokens(strings(&["*"]))).unwrap();
    assert_eq!(result, ["*", "a", "*", "b", "*"]);
}

#[test]
fn gsub_zero_width_on_empty_input() {
    let p = pattern(Expr::star(Expr::text("x")));
    let seq: Vec<String> = Vec::new();

    let result = p.gsub(&seq, Tokens(strings(&["*"]))).unwrap();
    assert_eq!(result, ["*"]);
}

#[test]
fn gsub_drop_keeps_only_replacements() {
    let p = pattern(Expr::regex(r"^(description|product|vendor):").unwrap());
    let seq = strings(&[
        "description: CPU",
        "capabilities: x86-64",
        "product: 9900K",
        "width: 64 bits",
    ]);

    let result = p
        .gsub_with(
            &seq,
            |m: &Match<String>| m.tokens().to_vec(),
            Unmatched::Drop,
        )
        .unwrap();
    assert_eq!(result, ["description: CPU", "product: 9900K"]);
}

#[test]
fn gsub_fail_rejects_uncovered_tokens() {
    let p = pattern(Expr::regex(r"^\w+: ").unwrap());
    let seq = strings(&["Name: Alice", "not a header", "Age: 30"]);

    let err = p
        .gsub_with(&seq, Tokens(Vec::new()), Unmatched::Fail)
        .unwrap_err();
    assert_matches!(
        err,
        Error::RuntimeError(RuntimeError::UnmatchedToken { pos: 1 })
    );
}

#[test]
fn gsub_fail_accepts_fully_covered_input() {
    let p = pattern(Expr::regex(r"^\w+: ").unwrap());
    let seq = strings(&["Name: Alice", "Age: 30"]);

    let result = p
        .gsub_with(
            &seq,
            |m: &Match<String>| m.tokens().to_vec(),
            Unmatched::Fail,
        )
        .unwrap();
    assert_eq!(result, seq);
}

// split

#[test]
fn split_on_delimiter_lines() {
    let p = pattern(Expr::regex("^---$").unwrap());
    let seq = ["a", "---", "b", "c", "---", "d"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&["a"][..], &["b", "c"][..], &["d"][..]]);
}

#[test]
fn split_without_delimiter_yields_whole_sequence() {
    let p = pattern(Expr::text(";"));
    let seq = ["int", "a", "double"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&seq[..]]);
}

#[test]
fn split_delimiter_at_start_yields_empty_leading_segment() {
    let p = pattern(Expr::text(";"));
    let seq = [";", "int", "a"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&[][..], &["int", "a"][..]]);
}

#[test]
fn split_delimiter_at_end_yields_empty_trailing_segment() {
    let p = pattern(Expr::text(";"));
    let seq = ["int", "a", ";"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&["int", "a"][..], &[][..]]);
}

#[test]
fn split_consecutive_delimiters_yield_empty_segments() {
    let p = pattern(Expr::text(";"));
    let seq = ["int", ";", ";", "b"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&["int"][..], &[][..], &["b"][..]]);
}

#[test]
fn split_all_delimiters() {
    let p = pattern(Expr::text(";"));
    let seq = [";", ";", ";"];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&[] as &[&str], &[], &[], &[]]);
}

#[test]
fn split_empty_input_yields_one_empty_segment() {
    let p = pattern(Expr::text(";"));
    let seq: [&str; 0] = [];

    let segments = p.split(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments.len(), 1);
    assert!(segments[0].is_empty());
}

#[test]
fn split_keep_interleaves_delimiter_runs() {
    let p = pattern(Expr::text(";"));
    let seq = ["int", "a", ";", "double", "b"];

    let segments = p.split_keep(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(
        segments,
        [&["int", "a"][..], &[";"][..], &["double", "b"][..]]
    );
}

#[test]
fn split_with_multi_token_delimiter() {
    let p = pattern(Expr::text("--").then(Expr::text("--")));
    let seq = ["a", "--", "--", "b"];

    let segments = p.split_keep(&seq).collect::<Result<Vec<_>, _>>().unwrap();
    assert_eq!(segments, [&["a"][..], &["--", "--"][..], &["b"][..]]);
}

#[test]
fn split_zero_width_delimiter_is_an_error() {
    let p = pattern(Expr::star(Expr::text("x")));
    let seq = ["a", "b"];

    let mut segments = p.split(&seq);
    assert_matches!(
        segments.next(),
        Some(Err(Error::RuntimeError(RuntimeError::EmptyDelimiter {
            pos: 0
        })))
    );
    // the iterator is finished after the error
    assert!(segments.next().is_none());
}

#[test]
fn split_rejoins_with_delimiters_to_the_original() {
    let p = pattern(Expr::regex("^-").unwrap());
    let seq = ["x", "-1", "y", "z", "-2", "-3", "w"];

    let mut rejoined = Vec::new();
    for segment in p.split_keep(&seq) {
        rejoined.extend_from_slice(segment.unwrap());
    }
    assert_eq!(rejoined, seq);
}

// properties

fn tokens_from(raw: &[u8]) -> Vec<String> {
    raw.iter()
        .map(|b| match b % 3 {
            0 => "a".to_string(),
            1 => "b".to_string(),
            _ => ";".to_string(),
        })
        .collect()
}

quickcheck! {
    fn prop_gsub_identity_replacer_is_identity(raw: Vec<u8>) -> bool {
        let seq = tokens_from(&raw);
        let p = Pattern::new(&Expr::text(";")).unwrap();
        let result = p
            .gsub(&seq, |m: &Match<String>| m.tokens().to_vec())
            .unwrap();
        result == seq
    }

    fn prop_gsub_without_matches_is_identity(raw: Vec<u8>) -> bool {
        let seq = tokens_from(&raw);
        let p = Pattern::new(&Expr::text("absent")).unwrap();
        p.gsub(&seq, Tokens(vec!["X".to_string()])).unwrap() == seq
    }

    fn prop_split_keep_rejoins_to_original(raw: Vec<u8>) -> bool {
        let seq = tokens_from(&raw);
        let p = Pattern::new(&Expr::text(";")).unwrap();
        let mut rejoined: Vec<String> = Vec::new();
        for segment in p.split_keep(&seq) {
            rejoined.extend_from_slice(segment.unwrap());
        }
        rejoined == seq
    }

    fn prop_match_ranges_stay_in_bounds(raw: Vec<u8>) -> bool {
        let seq = tokens_from(&raw);
        let p = Pattern::new(&Expr::plus(Expr::regex("^[ab]$").unwrap())).unwrap();
        for m in p.find_iter(&seq) {
            let m = m.unwrap();
            if m.start() > m.end() || m.end() > seq.len() {
                return false;
            }
        }
        true
    }

    fn prop_greedy_consumes_at_least_as_much_as_lazy(raw: Vec<u8>) -> bool {
        let seq = tokens_from(&raw);
        let greedy = Pattern::new(&Expr::star(Expr::text("a"))).unwrap();
        let lazy =
            Pattern::new(&Expr::repeat(Expr::text("a"), 0, None, false).unwrap()).unwrap();
        let g = greedy.find_at(&seq, 0).unwrap().unwrap();
        let l = lazy.find_at(&seq, 0).unwrap().unwrap();
        g.len() >= l.len()
    }
}

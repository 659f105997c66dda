//! Property tests for span/position round-tripping over arbitrary source text.

use lyra_source::span::{Position, Span};
use proptest::prelude::*;

/// Recomputes line, column, and line-start for `offset` by scanning `source`
/// from the beginning. Used as the ground truth the incremental position
/// tracker in the lexer is expected to match.
fn position_at(source: &str, offset: usize) -> Position {
    let mut line = 1;
    let mut line_start = 0;
    let mut column = 1;

    for (i, ch) in source.char_indices() {
        if i == offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            line_start = i + ch.len_utf8();
            column = 1;
        } else {
            column += 1;
        }
    }

    Position::new(line, column, offset, line_start)
}

proptest! {
    #[test]
    fn slice_recovers_the_exact_substring(
        prefix in "[a-zA-Z0-9 \n]{0,20}",
        body in "[a-zA-Z0-9]{1,10}",
        suffix in "[a-zA-Z0-9 \n]{0,20}",
    ) {
        let source = format!("{prefix}{body}{suffix}");
        let start_offset = prefix.len();
        let end_offset = start_offset + body.len();

        let start = position_at(&source, start_offset);
        let end = position_at(&source, end_offset);
        let span = Span::new(start, end);

        prop_assert_eq!(span.slice(&source), body.as_str());
    }

    #[test]
    fn merge_is_commutative_in_coverage(
        a_start in 0usize..5,
        a_len in 1usize..5,
        b_start in 5usize..10,
        b_len in 1usize..5,
    ) {
        let source: String = "x".repeat(20);
        let a = Span::new(position_at(&source, a_start), position_at(&source, a_start + a_len));
        let b = Span::new(position_at(&source, b_start), position_at(&source, b_start + b_len));

        let merged_ab = a.merge(&b);
        let merged_ba = b.merge(&a);

        prop_assert_eq!(merged_ab.start, merged_ba.start);
        prop_assert_eq!(merged_ab.end, merged_ba.end);
        prop_assert_eq!(merged_ab.start.offset, a_start.min(b_start));
        prop_assert_eq!(merged_ab.end.offset, (a_start + a_len).max(b_start + b_len));
    }
}

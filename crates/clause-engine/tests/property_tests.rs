//! Property-based tests for the span locator and substitution engine.

use clause_engine::{locate, replace, try_replace};
use proptest::prelude::*;
use shared_types::{Risk, Severity};

fn risk(clause: String) -> Risk {
    Risk {
        id: None,
        clause,
        risk_type: "Generated".to_string(),
        severity: Severity::Low,
        explanation: String::new(),
        suggested_rewrite: None,
    }
}

/// Small alphabet so clauses collide, repeat and overlap often.
fn document() -> impl Strategy<Value = String> {
    "[abc .]{0,40}"
}

fn clauses() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc .]{0,6}", 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn segments_reconstruct_text(text in document(), clauses in clauses()) {
        let risks: Vec<Risk> = clauses.into_iter().map(risk).collect();
        let segments = locate(&text, &risks);
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        prop_assert_eq!(joined, text);
    }

    #[test]
    fn segments_are_contiguous_and_non_overlapping(text in document(), clauses in clauses()) {
        let risks: Vec<Risk> = clauses.into_iter().map(risk).collect();
        let segments = locate(&text, &risks);

        let mut cursor = 0;
        for segment in &segments {
            prop_assert_eq!(segment.start, cursor);
            prop_assert!(segment.end >= segment.start);
            prop_assert_eq!(&text[segment.range()], segment.text.as_str());
            cursor = segment.end;
        }
        prop_assert_eq!(cursor, text.len());
    }

    #[test]
    fn risky_segments_match_their_risk(text in document(), clauses in clauses()) {
        let risks: Vec<Risk> = clauses.into_iter().map(risk).collect();
        let segments = locate(&text, &risks);

        let mut seen = Vec::new();
        for segment in segments.iter().filter(|s| s.is_risky()) {
            let index = segment.risk_index.unwrap();
            prop_assert!(index < risks.len());
            prop_assert_eq!(&segment.text, &risks[index].clause);
            prop_assert!(!segment.text.is_empty());
            prop_assert!(!seen.contains(&index));
            seen.push(index);
        }
    }

    #[test]
    fn absent_clauses_get_no_segment(text in "[ab ]{0,30}", absent in "c[abc]{0,4}") {
        let risks = vec![risk("a".to_string()), risk(absent)];
        let segments = locate(&text, &risks);
        prop_assert!(segments.iter().all(|s| s.risk_index != Some(1)));
    }

    #[test]
    fn locate_is_deterministic(text in document(), clauses in clauses()) {
        let risks: Vec<Risk> = clauses.into_iter().map(risk).collect();
        prop_assert_eq!(locate(&text, &risks), locate(&text, &risks));
    }

    #[test]
    fn replace_changes_at_most_first_occurrence(
        buffer in "[ab ]{0,30}",
        original in "[ab]{1,3}",
        replacement in "[xyz]{0,4}",
    ) {
        let out = replace(&buffer, &original, &replacement);
        match buffer.find(&original) {
            None => {
                prop_assert_eq!(&out, &buffer);
                prop_assert!(try_replace(&buffer, &original, &replacement).is_none());
            }
            Some(start) => {
                let expected = format!(
                    "{}{}{}",
                    &buffer[..start],
                    replacement,
                    &buffer[start + original.len()..]
                );
                prop_assert_eq!(out, expected);
            }
        }
    }
}

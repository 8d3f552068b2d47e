//! Span locator: turns a document and its reported risks into highlight segments.

use serde::Serialize;
use shared_types::Risk;
use std::ops::Range;

/// A contiguous slice of the document, either plain or owned by one risk.
///
/// `start..end` are byte offsets into the text the segment was located in.
/// A risky segment is never empty: risks with an empty clause are not highlighted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Position of the owning risk in the list handed to [`locate`].
    pub risk_index: Option<usize>,
}

impl Segment {
    fn plain(text: &str, range: Range<usize>) -> Self {
        Self {
            text: text[range.clone()].to_string(),
            start: range.start,
            end: range.end,
            risk_index: None,
        }
    }

    fn risky(text: &str, range: Range<usize>, risk_index: usize) -> Self {
        Self {
            risk_index: Some(risk_index),
            ..Self::plain(text, range)
        }
    }

    pub fn is_risky(&self) -> bool {
        self.risk_index.is_some()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Partition `text` into plain and risky segments, in text order.
///
/// Risks are ordered by the offset of their clause's first occurrence (stable
/// for equal offsets), then matched left to right with a cursor that only
/// moves forward. A clause is searched for from the cursor, so identical
/// clauses claim successive occurrences, and a clause whose only occurrence
/// starts before the cursor (because an earlier match overlapped it) gets no
/// segment. Risks with a clause absent from the text, or an empty
/// clause, are skipped; every emitted `risk_index` still refers to the
/// caller's original ordering.
///
/// Concatenating the returned segments always reproduces `text`.
pub fn locate(text: &str, risks: &[Risk]) -> Vec<Segment> {
    if text.is_empty() || risks.is_empty() {
        return vec![Segment::plain(text, 0..text.len())];
    }

    let mut ordered: Vec<(usize, usize, &str)> = risks
        .iter()
        .enumerate()
        .filter(|(_, risk)| !risk.clause.is_empty())
        .filter_map(|(index, risk)| {
            let clause = risk.clause.as_str();
            text.find(clause).map(|offset| (offset, index, clause))
        })
        .collect();
    ordered.sort_by_key(|&(offset, _, _)| offset);

    let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
    let mut cursor = 0;

    for (_, index, clause) in ordered {
        let Some(found) = text[cursor..].find(clause) else {
            tracing::debug!(risk_index = index, cursor, "clause overlaps an earlier match, not highlighted");
            continue;
        };
        let start = cursor + found;
        let end = start + clause.len();

        if start > cursor {
            segments.push(Segment::plain(text, cursor..start));
        }
        segments.push(Segment::risky(text, start..end, index));
        cursor = end;
    }

    if cursor < text.len() {
        segments.push(Segment::plain(text, cursor..text.len()));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::Severity;

    fn risk(clause: &str) -> Risk {
        Risk {
            id: None,
            clause: clause.to_string(),
            risk_type: "Test".to_string(),
            severity: Severity::Medium,
            explanation: String::new(),
            suggested_rewrite: None,
        }
    }

    fn texts(segments: &[Segment]) -> Vec<(&str, Option<usize>)> {
        segments
            .iter()
            .map(|s| (s.text.as_str(), s.risk_index))
            .collect()
    }

    #[test]
    fn test_empty_text_is_single_plain_segment() {
        let segments = locate("", &[risk("anything")]);
        assert_eq!(texts(&segments), vec![("", None)]);
    }

    #[test]
    fn test_no_risks_is_single_plain_segment() {
        let segments = locate("Plain agreement.", &[]);
        assert_eq!(texts(&segments), vec![("Plain agreement.", None)]);
        assert_eq!(segments[0].range(), 0..16);
    }

    #[test]
    fn test_segments_follow_text_order_not_risk_order() {
        let text = "A non-compete clause applies. Liability is unlimited.";
        let risks = [
            risk("Liability is unlimited."),
            risk("A non-compete clause applies."),
        ];
        let segments = locate(text, &risks);
        assert_eq!(
            texts(&segments),
            vec![
                ("A non-compete clause applies.", Some(1)),
                (" ", None),
                ("Liability is unlimited.", Some(0)),
            ]
        );
    }

    #[test]
    fn test_overlapping_clause_after_earlier_match_is_dropped() {
        let segments = locate("ABCDEF", &[risk("ABCD"), risk("CDEF")]);
        assert_eq!(texts(&segments), vec![("ABCD", Some(0)), ("EF", None)]);
    }

    #[test]
    fn test_missing_clause_is_excluded() {
        let segments = locate("Pay within 5 days.", &[risk("not present"), risk("5 days")]);
        assert_eq!(
            texts(&segments),
            vec![("Pay within ", None), ("5 days", Some(1)), (".", None)]
        );
    }

    #[test]
    fn test_identical_clauses_claim_successive_occurrences() {
        let segments = locate("fee; fee; fee", &[risk("fee"), risk("fee")]);
        assert_eq!(
            texts(&segments),
            vec![("fee", Some(0)), ("; ", None), ("fee", Some(1)), ("; fee", None)]
        );
    }

    #[test]
    fn test_shared_start_keeps_original_order() {
        // Both start at 0; the first reported wins and the second cannot fit.
        let segments = locate("Late fees apply daily.", &[risk("Late fees"), risk("Late")]);
        assert_eq!(
            texts(&segments),
            vec![("Late fees", Some(0)), (" apply daily.", None)]
        );

        let segments = locate("Late fees apply daily.", &[risk("Late"), risk("Late fees")]);
        assert_eq!(
            texts(&segments),
            vec![("Late", Some(0)), (" fees apply daily.", None)]
        );
    }

    #[test]
    fn test_clause_search_is_case_sensitive() {
        let segments = locate("Governing LAW is Delaware.", &[risk("law")]);
        assert_eq!(texts(&segments), vec![("Governing LAW is Delaware.", None)]);
    }

    #[test]
    fn test_empty_clause_is_ignored() {
        let segments = locate("Text", &[risk("")]);
        assert_eq!(texts(&segments), vec![("Text", None)]);
    }

    #[test]
    fn test_multibyte_text_offsets() {
        let text = "Für Schäden haftet der Käufer.";
        let segments = locate(text, &[risk("haftet")]);
        assert_eq!(segments[1].text, "haftet");
        assert_eq!(&text[segments[1].range()], "haftet");
        let joined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(joined, text);
    }
}

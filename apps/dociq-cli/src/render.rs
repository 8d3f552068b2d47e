//! Plain-text rendering of a review session.

use clause_engine::{clause_preview, Segment, SeverityCounts, Suggestion};
use review_session::{Document, RevealTarget, ScrollSurface, Selection};
use shared_types::Risk;
use std::io::{self, Write};

/// The document with each risky span wrapped as `[#n ... ]`, 1-based.
/// The selected span is marked `[*n ... ]`.
pub fn write_document<W: Write>(out: &mut W, segments: &[Segment], selection: Selection) -> io::Result<()> {
    for segment in segments {
        match segment.risk_index {
            Some(index) => {
                let marker = if selection.is_selected(index) { '*' } else { '#' };
                write!(out, "[{}{} {}]", marker, index + 1, segment.text)?;
            }
            None => out.write_all(segment.text.as_bytes())?,
        }
    }
    writeln!(out)
}

pub fn write_header<W: Write>(out: &mut W, document: &Document, counts: SeverityCounts) -> io::Result<()> {
    writeln!(out, "{}", document.name)?;
    if let Some(id) = document.id {
        writeln!(out, "  Analysis ID:     #{}", id)?;
    }
    if let Some(length) = document.text_length {
        writeln!(out, "  Document length: {} characters", length)?;
    }
    writeln!(
        out,
        "  Risks found:     {} (high {}, medium {}, low {})",
        counts.total(),
        counts.high,
        counts.medium,
        counts.low
    )?;
    if let Some(summary) = document.summary.as_deref().filter(|s| !s.is_empty()) {
        writeln!(out, "\nSummary\n  {}", summary)?;
    }
    writeln!(out)
}

pub fn write_risks<W: Write>(
    out: &mut W,
    risks: &[Risk],
    selection: Selection,
    suggestions: &[Suggestion],
) -> io::Result<()> {
    if risks.is_empty() {
        return writeln!(
            out,
            "No risky clauses were detected in this document. This does not replace professional legal advice."
        );
    }

    writeln!(out, "Detected risks ({})", risks.len())?;
    for (index, risk) in risks.iter().enumerate() {
        let marker = if selection.is_selected(index) { '>' } else { ' ' };
        writeln!(
            out,
            "{} {:>2}. [{}] {}",
            marker,
            index + 1,
            risk.severity.as_str().to_uppercase(),
            risk.risk_type
        )?;
        writeln!(out, "      {}", risk.explanation)?;
        writeln!(out, "      Clause: \"{}\"", clause_preview(&risk.clause))?;

        if selection.is_selected(index) {
            writeln!(out, "      Suggested alternatives:")?;
            for (n, suggestion) in suggestions.iter().enumerate() {
                writeln!(out, "        {}) {}", n + 1, suggestion.text)?;
            }
        }
    }
    Ok(())
}

/// Scroll surface for a terminal: reports where the view would move.
pub struct TerminalSurface {
    label: &'static str,
}

impl TerminalSurface {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl ScrollSurface for TerminalSurface {
    fn reveal(&mut self, target: &RevealTarget) {
        match target {
            RevealTarget::RiskEntry(index) => {
                eprintln!("[{}] showing risk #{}", self.label, index + 1);
            }
            RevealTarget::Clause(location) => {
                eprintln!(
                    "[{}] selected characters {}..{} ({:.0}% into the document)",
                    self.label,
                    location.char_start,
                    location.char_end,
                    location.scroll_fraction * 100.0
                );
            }
        }
    }
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
            risk_type: "Short Deadline".to_string(),
            severity: Severity::High,
            explanation: "Too short.".to_string(),
            suggested_rewrite: None,
        }
    }

    fn render(segments: &[Segment], selection: Selection) -> String {
        let mut out = Vec::new();
        write_document(&mut out, segments, selection).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_document_marks_risky_spans() {
        let risks = vec![risk("within 5 days")];
        let segments = clause_engine::locate("Pay within 5 days.", &risks);
        assert_eq!(render(&segments, Selection::Idle), "Pay [#1 within 5 days].\n");
        assert_eq!(render(&segments, Selection::Selected(0)), "Pay [*1 within 5 days].\n");
    }

    #[test]
    fn test_risk_list_shows_suggestions_for_selection_only() {
        let risks = vec![risk("a"), risk("b")];
        let suggestions = clause_engine::suggestions_for(&risks[1]);
        let mut out = Vec::new();
        write_risks(&mut out, &risks, Selection::Selected(1), &suggestions).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Detected risks (2)\n"));
        assert!(text.contains(">  2. [HIGH] Short Deadline"));
        assert_eq!(text.matches("Suggested alternatives").count(), 1);
        assert!(text.contains("        3) Balanced: Both parties agree that"));
    }

    fn document(text_length: Option<usize>) -> Document {
        Document {
            id: Some(4),
            name: "lease.txt".to_string(),
            original_text: "Pay within 5 days.".to_string(),
            edited_text: "Pay within 5 days.".to_string(),
            text_length,
            summary: None,
            risks: Vec::new(),
        }
    }

    fn header(document: &Document) -> String {
        let mut out = Vec::new();
        write_header(&mut out, document, SeverityCounts::default()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_header_shows_reported_length() {
        let text = header(&document(Some(1234)));
        assert!(text.contains("  Document length: 1234 characters\n"));
        assert!(text.contains("  Analysis ID:     #4\n"));
    }

    #[test]
    fn test_header_omits_length_for_history_records() {
        assert!(!header(&document(None)).contains("Document length"));
    }

    #[test]
    fn test_empty_risk_list() {
        let mut out = Vec::new();
        write_risks(&mut out, &[], Selection::Idle, &[]).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("No risky clauses"));
    }
}

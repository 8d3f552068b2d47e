//! The review session: one document, its risks and the reviewer's edits.

use crate::analysis::{AnalysisGate, AnalysisRun};
use crate::error::SessionError;
use crate::notify::Notifications;
use crate::segments::SegmentCache;
use crate::selection::{Selection, SelectionChange, SelectionStore};
use crate::surface::{RevealTarget, SurfaceKind, SurfaceRegistry};
use clause_engine::{
    locate, locate_in_buffer, suggestions_for, try_replace, Segment, SeverityCounts, Suggestion,
};
use shared_types::{AnalysisResult, DocumentRecord, Risk};
use tokio::sync::watch;

pub const REPLACED_MESSAGE: &str = "Text replaced successfully!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// Backend id of the stored document (the analysis id for fresh results).
    pub id: Option<i64>,
    pub name: String,
    pub original_text: String,
    pub edited_text: String,
    /// Length reported by the backend; history records carry none.
    pub text_length: Option<usize>,
    pub summary: Option<String>,
    pub risks: Vec<Risk>,
}

impl Document {
    pub fn is_modified(&self) -> bool {
        self.edited_text != self.original_text
    }
}

/// State behind a single review view.
///
/// Highlight segments are computed over the original text, so they always
/// concatenate back to it; rewrites only touch the edited text. Loading or
/// resetting a document bumps the revision, and [`segments`](Self::segments)
/// only ever returns a result computed for the current revision.
#[derive(Debug, Default)]
pub struct ReviewSession {
    document: Option<Document>,
    revision: u64,
    segments: SegmentCache,
    selection: SelectionStore,
    surfaces: SurfaceRegistry,
    notifications: Notifications,
    gate: AnalysisGate,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fresh analysis. `submitted_text` is used when the response
    /// carries no `original_text` (pasted-text analyses).
    pub fn load_analysis(&mut self, result: AnalysisResult, submitted_text: Option<String>) {
        let original_text = result
            .original_text
            .or(submitted_text)
            .unwrap_or_default();
        tracing::info!(
            analysis_id = result.analysis_id,
            risks = result.risks.len(),
            "loaded analysis"
        );
        self.replace_document(Some(Document {
            id: Some(result.analysis_id),
            name: result.document_name,
            edited_text: original_text.clone(),
            original_text,
            text_length: Some(result.text_length),
            summary: result.summary,
            risks: result.risks,
        }));
    }

    /// Load a document from history, resuming from its saved edits.
    pub fn load_record(&mut self, record: DocumentRecord) {
        tracing::info!(document_id = record.id, "loaded document record");
        let edited_text = record.working_text().to_string();
        self.replace_document(Some(Document {
            id: Some(record.id),
            name: record.filename,
            original_text: record.original_text,
            edited_text,
            text_length: None,
            summary: record.summary,
            risks: record.risks,
        }));
    }

    /// Start over: drop the document and clear the selection.
    pub fn reset(&mut self) {
        tracing::info!("session reset");
        self.replace_document(None);
    }

    fn replace_document(&mut self, document: Option<Document>) {
        self.document = document;
        self.selection.reset();
        self.bump();
    }

    fn bump(&mut self) {
        self.revision += 1;
        self.segments.advance(self.revision);
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn risks(&self) -> &[Risk] {
        self.document
            .as_ref()
            .map(|doc| doc.risks.as_slice())
            .unwrap_or_default()
    }

    pub fn edited_text(&self) -> Option<&str> {
        self.document.as_ref().map(|doc| doc.edited_text.as_str())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        SeverityCounts::tally(self.risks())
    }

    /// Highlight segments for the current revision, recomputed if stale.
    pub fn segments(&mut self) -> &[Segment] {
        let revision = self.revision;
        if self.segments.get(revision).is_none() {
            let computed = self
                .document
                .as_ref()
                .map(|doc| locate(&doc.original_text, &doc.risks))
                .unwrap_or_default();
            self.segments.store(revision, computed);
        }
        self.segments.get(revision).unwrap_or(&[])
    }

    /// Replace the edited text with a direct user edit.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        let doc = self.document.as_mut().ok_or(SessionError::NoDocument)?;
        doc.edited_text = text.into();
        Ok(())
    }

    pub fn selection(&self) -> Selection {
        self.selection.current()
    }

    pub fn subscribe_selection(&self) -> watch::Receiver<Selection> {
        self.selection.subscribe()
    }

    pub fn selected_risk(&self) -> Option<(usize, &Risk)> {
        let index = self.selection.current().index()?;
        self.risks().get(index).map(|risk| (index, risk))
    }

    /// A highlighted span was clicked: select its risk and bring the risk's
    /// list entry into view. Re-clicking keeps the selection.
    pub fn click_highlight(&mut self, index: usize) -> Result<SelectionChange, SessionError> {
        self.risk(index)?;
        let change = self.selection.click_highlight(index);
        if let SelectionChange::Selected(index) = change {
            self.surfaces
                .reveal(SurfaceKind::RiskList, &RevealTarget::RiskEntry(index));
        }
        Ok(change)
    }

    /// A risk list entry was clicked: toggle it, and when it becomes selected
    /// bring its clause into view in the editor.
    pub fn click_risk(&mut self, index: usize) -> Result<SelectionChange, SessionError> {
        self.risk(index)?;
        let change = self.selection.click_list(index);
        if let SelectionChange::Selected(index) = change {
            let location = self.document.as_ref().and_then(|doc| {
                locate_in_buffer(&doc.edited_text, &doc.risks[index].clause)
            });
            if let Some(location) = location {
                self.surfaces
                    .reveal(SurfaceKind::Editor, &RevealTarget::Clause(location));
            }
        }
        Ok(change)
    }

    pub fn suggestions(&self, index: usize) -> Result<Vec<Suggestion>, SessionError> {
        self.risk(index).map(suggestions_for)
    }

    /// Substitute `replacement` for the first occurrence of risk `index`'s
    /// clause in the edited text. Returns whether anything was replaced.
    pub fn apply_rewrite(&mut self, index: usize, replacement: &str) -> Result<bool, SessionError> {
        let clause = self.risk(index)?.clause.clone();
        let doc = self.document.as_mut().ok_or(SessionError::NoDocument)?;

        let Some(updated) = try_replace(&doc.edited_text, &clause, replacement) else {
            tracing::warn!(risk_index = index, "clause not found in edited text");
            return Ok(false);
        };
        doc.edited_text = updated;
        self.notifications.push(REPLACED_MESSAGE);
        tracing::info!(risk_index = index, "rewrite applied");
        Ok(true)
    }

    pub fn surfaces_mut(&mut self) -> &mut SurfaceRegistry {
        &mut self.surfaces
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn is_analyzing(&self) -> bool {
        self.gate.is_analyzing()
    }

    pub fn analysis_gate(&self) -> AnalysisGate {
        self.gate.clone()
    }

    /// See [`AnalysisGate::begin`].
    pub fn begin_analysis(&self, estimate_secs: u64) -> Result<AnalysisRun, SessionError> {
        self.gate.begin(estimate_secs)
    }

    fn risk(&self, index: usize) -> Result<&Risk, SessionError> {
        let doc = self.document.as_ref().ok_or(SessionError::NoDocument)?;
        doc.risks.get(index).ok_or(SessionError::RiskOutOfRange {
            index,
            len: doc.risks.len(),
        })
    }
}

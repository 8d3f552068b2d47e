//! Subcommand implementations.

use crate::render::{write_document, write_header, write_risks, TerminalSurface};
use analysis_client::{AnalysisApi, ApiError, UploadFile};
use anyhow::{anyhow, bail, Context, Result};
use review_session::{
    estimate_for_file, estimate_for_text, format_elapsed, ReviewSession, SurfaceKind,
};
use std::future::Future;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_EXPORT: &str = "edited-document.txt";

pub enum Source {
    File(PathBuf),
    Text(String),
}

pub async fn analyze(api: &dyn AnalysisApi, source: Source, select: Option<usize>) -> Result<()> {
    let mut session = new_session();

    match source {
        Source::File(path) => {
            let upload = UploadFile::from_path(&path)
                .await
                .map_err(|e| anyhow!(e.user_message()))
                .with_context(|| format!("Cannot upload {}", path.display()))?;
            let estimate = estimate_for_file(upload.size());
            tracing::info!(file = %upload.filename, size = upload.size(), "uploading document");
            let result = with_progress(&session, estimate, api.analyze_document(&upload)).await?;
            session.load_analysis(result, None);
        }
        Source::Text(text) => {
            let estimate = estimate_for_text(text.chars().count());
            let result = with_progress(&session, estimate, api.analyze_text(&text)).await?;
            session.load_analysis(result, Some(text));
        }
    }

    if let Some(number) = select {
        session.click_highlight(risk_index(number)?)?;
    }
    print_session(&mut session)
}

pub async fn history(api: &dyn AnalysisApi) -> Result<()> {
    let documents = api
        .list_documents()
        .await
        .map_err(|e| anyhow!("Failed to load document history: {}", e.user_message()))?;

    let mut out = io::stdout().lock();
    if documents.is_empty() {
        writeln!(out, "No documents yet. Run `dociq analyze <file>` to get started.")?;
        return Ok(());
    }
    for doc in documents {
        writeln!(
            out,
            "{:>6}  {}  {}",
            doc.id,
            doc.created_at.format("%b %e, %Y %H:%M"),
            doc.filename
        )?;
    }
    Ok(())
}

pub async fn open(api: &dyn AnalysisApi, id: i64, select: Option<usize>) -> Result<()> {
    let mut session = load(api, id).await?;
    if let Some(number) = select {
        session.click_risk(risk_index(number)?)?;
    }
    print_session(&mut session)
}

pub struct RewriteOptions {
    pub id: i64,
    pub risk: usize,
    pub suggestion: usize,
    pub text: Option<String>,
    pub save: bool,
    pub output: Option<PathBuf>,
}

pub async fn rewrite(api: &dyn AnalysisApi, options: RewriteOptions) -> Result<()> {
    let mut session = load(api, options.id).await?;
    let index = risk_index(options.risk)?;
    session.click_risk(index)?;

    let replacement = match options.text {
        Some(text) => text,
        None => {
            let suggestions = session.suggestions(index)?;
            let chosen = options
                .suggestion
                .checked_sub(1)
                .and_then(|n| suggestions.get(n))
                .ok_or_else(|| anyhow!("Suggestion must be between 1 and {}", suggestions.len()))?;
            chosen.text.clone()
        }
    };

    if !session.apply_rewrite(index, &replacement)? {
        bail!("Clause for risk #{} no longer appears in the document", options.risk);
    }
    for toast in session.notifications().active() {
        eprintln!("{}", toast.message);
    }

    let edited = session.edited_text().unwrap_or_default().to_string();
    if options.save {
        api.update_document(options.id, &edited)
            .await
            .map_err(|e| anyhow!("Failed to save document: {}", e.user_message()))?;
        eprintln!("Document saved successfully!");
    }
    let output = options.output.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT));
    export(&output, &edited)?;

    print_session(&mut session)
}

async fn load(api: &dyn AnalysisApi, id: i64) -> Result<ReviewSession> {
    let record = api
        .get_document(id)
        .await
        .map_err(|e| anyhow!("Failed to load document: {}", e.user_message()))?;
    let mut session = new_session();
    session.load_record(record);
    Ok(session)
}

fn new_session() -> ReviewSession {
    let mut session = ReviewSession::new();
    let surfaces = session.surfaces_mut();
    surfaces.register(SurfaceKind::Editor, Box::new(TerminalSurface::new("editor")));
    surfaces.register(SurfaceKind::RiskList, Box::new(TerminalSurface::new("risks")));
    session
}

/// Await `request` as the session's analysis, reporting elapsed time on stderr.
async fn with_progress<F, T>(session: &ReviewSession, estimate: u64, request: F) -> Result<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    let run = session.begin_analysis(estimate)?;
    let mut elapsed = run.ticker().subscribe();
    let reporter = tokio::spawn(async move {
        while elapsed.changed().await.is_ok() {
            let secs = *elapsed.borrow_and_update();
            eprint!(
                "\rAnalyzing... elapsed {} / estimated ~{}",
                format_elapsed(secs),
                format_elapsed(estimate)
            );
        }
    });

    let outcome = request.await;
    run.finish();
    reporter.abort();
    eprintln!();

    outcome.map_err(|e| {
        tracing::error!(error = %e, "analysis failed");
        anyhow!(e.user_message())
    })
}

fn print_session(session: &mut ReviewSession) -> Result<()> {
    let Some(document) = session.document().cloned() else {
        bail!("No document loaded");
    };
    let counts = session.severity_counts();
    let selection = session.selection();
    let suggestions = match session.selected_risk() {
        Some((index, _)) => session.suggestions(index)?,
        None => Vec::new(),
    };

    let mut out = io::stdout().lock();
    write_header(&mut out, &document, counts)?;
    write_document(&mut out, session.segments(), selection)?;
    writeln!(out)?;
    write_risks(&mut out, &document.risks, selection, &suggestions)?;
    writeln!(
        out,
        "\nDisclaimer: This analysis is for informational purposes only and does not constitute legal advice."
    )?;
    Ok(())
}

fn export(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("Wrote {}", path.display());
    Ok(())
}

/// Risk numbers on the command line are 1-based.
fn risk_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Risk numbers start at 1"))
}

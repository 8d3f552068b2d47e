//! Rewrite suggestions offered for a selected risk.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use shared_types::Risk;

/// Offered when the backend did not generate a rewrite for a risk.
pub const FALLBACK_REWRITE: &str =
    "Consider revising this clause to be more balanced and fair to both parties.";

lazy_static! {
    static ref BINDING_VERBS: Regex = Regex::new(r"(?i)\b(shall|must|will)\b").unwrap();
    static ref OBLIGATION_TERMS: Regex = Regex::new(r"(?i)\b(required|mandatory)\b").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    /// The rewrite as generated (or the fallback).
    Base,
    /// Binding language softened to permissive language.
    Alternative,
    /// Recast as a mutual agreement.
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub text: String,
    /// True when derived from [`FALLBACK_REWRITE`] rather than a generated rewrite.
    pub is_fallback: bool,
}

/// The three suggestions shown for `risk`, base first.
pub fn suggestions_for(risk: &Risk) -> Vec<Suggestion> {
    let (base, is_fallback) = match risk.suggested_rewrite.as_deref() {
        Some(rewrite) if !rewrite.is_empty() => (rewrite, false),
        _ => (FALLBACK_REWRITE, true),
    };

    vec![
        Suggestion {
            kind: SuggestionKind::Base,
            text: base.to_string(),
            is_fallback,
        },
        Suggestion {
            kind: SuggestionKind::Alternative,
            text: format!("Alternative: {}", soften(base)),
            is_fallback,
        },
        Suggestion {
            kind: SuggestionKind::Balanced,
            text: format!("Balanced: Both parties agree that {}", base.to_lowercase()),
            is_fallback,
        },
    ]
}

fn soften(text: &str) -> String {
    let permissive = BINDING_VERBS.replace_all(text, "may");
    OBLIGATION_TERMS
        .replace_all(&permissive, "recommended")
        .into_owned()
}

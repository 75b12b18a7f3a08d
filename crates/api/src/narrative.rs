// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Natural-language commentary on the event figures.
//!
//! The text generation backend sits behind [`NarrativeClient`] so the
//! server can plug in a real model and tests can plug in a fake.

use async_trait::async_trait;
use epica_domain::Stats;
use tracing::{info, warn};

use crate::request_response::AnalysisResponse;

/// Shown when the backend answers with no text.
pub const NO_ANALYSIS_TEXT: &str = "Nessuna analisi disponibile.";
/// Shown when the backend call fails.
pub const ANALYSIS_FAILED_TEXT: &str = "Errore durante l'analisi AI.";

/// Errors raised by a narrative backend.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("no narrative backend is configured")]
    NotConfigured,
    #[error("narrative request failed: {0}")]
    Request(String),
    #[error("narrative backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed narrative response: {0}")]
    MalformedResponse(String),
}

/// A text generation backend.
#[async_trait]
pub trait NarrativeClient: Send + Sync {
    /// Generates a completion for `prompt`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or its answer
    /// cannot be read.
    async fn complete(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Backend used when no credentials are configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNarrativeClient;

#[async_trait]
impl NarrativeClient for DisabledNarrativeClient {
    async fn complete(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }
}

/// Builds the Italian analysis prompt for a set of figures.
#[must_use]
pub fn build_analysis_prompt(stats: &Stats) -> String {
    format!(
        "Analizza questi dati per l'evento \"Epica Camonica\":\n\
         Entrate: €{}\n\
         Uscite: €{}\n\
         Saldo: €{}\n\
         Partecipanti: {}\n\
         E-bike: {}\n\
         Fornisci un breve commento strategico in italiano sull'andamento dell'evento.",
        stats.total_income,
        stats.total_expense,
        stats.net_balance,
        stats.participants_count,
        stats.total_ebikes,
    )
}

/// Asks the backend for commentary on `stats`.
///
/// Never fails: a blank answer or a backend error is replaced by a fixed
/// fallback text and `available` is set to `false`.
pub async fn analyze_stats(client: &dyn NarrativeClient, stats: &Stats) -> AnalysisResponse {
    let prompt: String = build_analysis_prompt(stats);

    match client.complete(&prompt).await {
        Ok(text) if !text.trim().is_empty() => {
            info!(chars = text.len(), "Narrative analysis generated");
            AnalysisResponse {
                text,
                available: true,
            }
        }
        Ok(_) => AnalysisResponse {
            text: NO_ANALYSIS_TEXT.to_string(),
            available: false,
        },
        Err(e) => {
            warn!(error = %e, "Narrative analysis failed");
            AnalysisResponse {
                text: ANALYSIS_FAILED_TEXT.to_string(),
                available: false,
            }
        }
    }
}

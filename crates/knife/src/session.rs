//! Sessions: one pass per input edit, slow fields resolved in the background.
//!
//! Each [`Session::submit`] bumps the generation. Background jobs report back
//! tagged with the generation they were started for, and [`Session::apply`]
//! drops anything that does not match the current one. The last input wins,
//! never the first job to finish.

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinError;

use crate::error::KnifeError;
use crate::field::{Field, FieldValue};
use crate::inspect::{plan, Deferred, InspectorConfig, Plan};
use knife_core::Classification;

/// Identifies which input a derived field belongs to.
pub type Generation = u64;

/// A background result for one field.
#[derive(Debug, Clone)]
pub struct FieldUpdate {
    pub generation: Generation,
    pub field: Field,
}

/// Tracks the current input and its derived fields.
///
/// Inside a tokio runtime [`Session::submit`] spawns background tasks. Outside
/// one it resolves every field before returning.
pub struct Session {
    config: InspectorConfig,
    generation: Generation,
    classification: Classification,
    fields: Vec<Field>,
    pending: usize,
    tx: mpsc::UnboundedSender<FieldUpdate>,
    rx: mpsc::UnboundedReceiver<FieldUpdate>,
}

impl Session {
    pub fn new(config: InspectorConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            generation: 0,
            classification: Classification::Unrecognized,
            fields: Vec::new(),
            pending: 0,
            tx,
            rx,
        }
    }

    /// Replace the input. Returns the new generation.
    pub fn submit(&mut self, text: &str) -> Generation {
        self.generation += 1;
        let generation = self.generation;

        let Plan {
            classification,
            fields,
            deferred,
        } = plan(text, &self.config);

        tracing::debug!(
            generation,
            classification = classification.name(),
            deferred = deferred.len(),
            "submitted input"
        );

        self.classification = classification;
        self.fields = fields;

        match Handle::try_current() {
            Ok(handle) => {
                self.pending = deferred.len();
                for job in deferred {
                    spawn_job(&handle, generation, job, self.tx.clone());
                }
            }
            Err(_) => {
                // No runtime to run on; resolve in place so the pass still completes.
                tracing::debug!(generation, "no tokio runtime, resolving inline");
                self.pending = 0;
                for job in deferred {
                    let field = job.resolve();
                    if let Some(slot) = self.fields.iter_mut().find(|f| f.label == field.label) {
                        *slot = field;
                    }
                }
            }
        }
        generation
    }

    /// Merge a background result. Returns false if it was stale and dropped.
    pub fn apply(&mut self, update: FieldUpdate) -> bool {
        if update.generation != self.generation {
            tracing::trace!(
                stale = update.generation,
                current = self.generation,
                label = update.field.label,
                "dropping stale field"
            );
            return false;
        }
        match self.fields.iter_mut().find(|f| f.label == update.field.label) {
            Some(slot) => {
                *slot = update.field;
                self.pending = self.pending.saturating_sub(1);
                true
            }
            None => false,
        }
    }

    /// Wait for the next background result, from any generation.
    pub async fn next_update(&mut self) -> Option<FieldUpdate> {
        self.rx.recv().await
    }

    /// Receive and apply results until the current generation has none pending.
    pub async fn settle(&mut self) {
        while self.pending > 0 {
            match self.rx.recv().await {
                Some(update) => {
                    self.apply(update);
                }
                None => break,
            }
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Current fields. Unresolved background fields hold a null placeholder.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }
}

fn spawn_job(
    handle: &Handle,
    generation: Generation,
    job: Deferred,
    tx: mpsc::UnboundedSender<FieldUpdate>,
) {
    handle.spawn(async move {
        let label = job.label();
        let fallback = job.fallback();

        let joined = tokio::task::spawn_blocking(move || job.resolve()).await;
        let field = settle_join(generation, label, fallback, joined);

        // The session may be gone already; nothing is waiting for this result then.
        let _ = tx.send(FieldUpdate { generation, field });
    });
}

/// A finished job's field, or the fallback value if the job panicked or was cancelled.
fn settle_join(
    generation: Generation,
    label: &'static str,
    fallback: FieldValue,
    joined: Result<Field, JoinError>,
) -> Field {
    match joined {
        Ok(field) => field,
        Err(e) => {
            let err = KnifeError::TaskFailed(e.to_string());
            tracing::warn!(generation, label, error = %err, "derivation failed");
            Field::new(label, fallback)
        }
    }
}

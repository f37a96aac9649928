use crate::error::KernelError;
use crate::origin::RequestOrigin;
use crate::registry::{Contributor, Registration, RegistryKind};
use fxhash::FxHashMap;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Result of fanning out to every contributor of one registry.
#[derive(Debug)]
pub struct Collected<T> {
    /// One slot per registration, in registration order. Failed contributors leave an empty slot.
    pub per_contributor: Vec<Vec<T>>,
    /// Every contributor that failed, timed out or panicked.
    pub failures: Vec<KernelError>,
}

impl<T> Collected<T> {
    /// Concatenates the slots in registration order.
    pub fn into_entries(self) -> (Vec<T>, Vec<KernelError>) {
        (self.per_contributor.into_iter().flatten().collect(), self.failures)
    }
}

/// Runs all dynamic contributors concurrently and waits for each independently.
///
/// Static contributions are copied in place. A failing contributor costs only
/// its own slot; the rest of the aggregation carries on.
pub async fn collect<T>(
    kind: RegistryKind,
    registrations: &[Registration<Contributor<T>>],
    origin: &RequestOrigin,
    timeout: Duration,
) -> Collected<T>
where
    T: Clone + Send + 'static,
{
    let mut per_contributor: Vec<Vec<T>> = registrations.iter().map(|_| Vec::new()).collect();
    let mut failures = Vec::new();
    let mut tasks = JoinSet::new();
    let mut slots = FxHashMap::default();

    for (slot, registration) in registrations.iter().enumerate() {
        match &registration.contribution {
            Contributor::Static(entries) => per_contributor[slot].clone_from(entries),
            Contributor::Dynamic(callback) => {
                let callback = callback.clone();
                let origin = origin.clone();
                let handle = tasks.spawn(async move { tokio::time::timeout(timeout, callback(origin)).await });
                slots.insert(handle.id(), slot);
            },
        }
    }

    while let Some(joined) = tasks.join_next_with_id().await {
        let (id, outcome) = match joined {
            Ok((id, Ok(Ok(entries)))) => (id, Ok(entries)),
            Ok((id, Ok(Err(err)))) => (id, Err(err.to_string())),
            Ok((id, Err(_elapsed))) => (id, Err(format!("timed out after {}ms", timeout.as_millis()))),
            Err(join_err) => {
                let reason = if join_err.is_panic() { "panicked" } else { "was cancelled" };
                (join_err.id(), Err(reason.to_owned()))
            },
        };

        let Some(&slot) = slots.get(&id) else { continue };
        let module = registrations[slot].module.as_str();
        match outcome {
            Ok(entries) => {
                debug!(registry = %kind, module, count = entries.len(), "Contributor finished");
                per_contributor[slot] = entries;
            },
            Err(reason) => {
                let err = KernelError::contributor(module, reason);
                warn!(registry = %kind, module, error = %err, "Contributor failed, skipping its entries");
                failures.push(err);
            },
        }
    }

    Collected { per_contributor, failures }
}

// Single-slot holder for cancellable background jobs
// Registering a new job cancels and replaces the previous one

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Handle to one spawned background job.
///
/// Cancellation is best-effort: `cancel` aborts the task without waiting for
/// acknowledgement. An aborted task stops at its next await point and never
/// reaches its callback sites.
pub struct JobHandle {
    id: Uuid,
    task: JoinHandle<()>,
}

impl JobHandle {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self {
            id: Uuid::new_v4(),
            task,
        }
    }

    /// Identifier used to correlate log lines for this job.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// At most one job is "current" at any instant.
///
/// Both the amplitude-polling loop and in-flight transcription requests go
/// through a registry, so stale background work can never overwrite newer
/// state. The slot lives behind a single mutex; `register` swaps under the
/// lock, leaving no window in which two jobs are both current.
#[derive(Default)]
pub struct JobRegistry {
    current: Mutex<Option<JobHandle>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever job is current and make `handle` the new one.
    pub fn register(&self, handle: JobHandle) {
        let mut slot = self.current.lock();
        if let Some(previous) = slot.take() {
            crate::debug!("[jobs] job {} superseded by {}", previous.id(), handle.id());
            previous.cancel();
        }
        *slot = Some(handle);
    }

    /// Cancel the current job, if any. Idempotent.
    pub fn clear(&self) {
        let mut slot = self.current.lock();
        if let Some(previous) = slot.take() {
            crate::debug!("[jobs] job {} cancelled", previous.id());
            previous.cancel();
        }
    }

    /// Whether a registered job is still running.
    pub fn is_active(&self) -> bool {
        self.current
            .lock()
            .as_ref()
            .map(|job| !job.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
#[path = "jobs_test.rs"]
mod tests;

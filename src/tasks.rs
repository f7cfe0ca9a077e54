//! Controller Task Runner

use std::future::Future;

use aimlink_core::Outcome;
use leptos::task::spawn_local;

/// Run a controller operation, mirror the state it left, then hand the
/// outcome to `then`.
///
/// `sync` runs twice: once as soon as the operation is waiting on the
/// network (so the view shows `Loading`/`Mutating`) and once when it ends.
pub fn drive<F>(task: F, sync: impl Fn() + Copy + 'static, then: impl FnOnce(&Outcome) + 'static)
where
    F: Future<Output = Outcome> + 'static,
{
    spawn_local(async move {
        let outcome = task.await;
        match &outcome {
            Outcome::Rejected(rejection) => log::debug!("Operation rejected: {:?}", rejection),
            Outcome::Busy => log::debug!("Operation dropped, another change is in flight"),
            Outcome::Superseded => log::debug!("Load result dropped, a newer load is running"),
            _ => {}
        }
        sync();
        then(&outcome);
    });
    // Queued behind the task above, so it runs once that task first yields
    spawn_local(async move { sync() });
}

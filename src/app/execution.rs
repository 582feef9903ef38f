//! Scenario execution

use std::collections::HashMap;
use std::sync::Arc;
use anyhow::Result;
use log::{debug, info, warn};

use crate::cli::{self, Step};
use crate::display::{OutputFormat, SnapshotPrinter};
use crate::notifications::{StoreStats, ToastConfig, ToastHandle, ToastId, ToastStore};

/// Gather steps from script files followed by command line steps
pub fn collect_steps(args: &cli::Args) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for script in &args.script {
        steps.extend(cli::load_script(script)?);
    }
    for step in &args.steps {
        steps.push(step.parse::<Step>()?);
    }
    debug!("Collected {} scenario steps", steps.len());
    Ok(steps)
}

/// Outcome of a scenario run
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub steps_run: usize,
    /// Steps that named a toast the store no longer (or never) held
    pub steps_ignored: usize,
    pub stats: StoreStats,
}

/// Apply `steps` to `store`, returning what happened
pub async fn run_steps(store: &ToastStore, steps: &[Step]) -> ScenarioReport {
    let mut handles: HashMap<ToastId, ToastHandle> = HashMap::new();
    let mut ignored = 0;

    for step in steps {
        debug!("Running step {:?}", step);
        let applied = match step {
            Step::Notify(content) => {
                let handle = store.toast(content.clone());
                handles.insert(handle.id().clone(), handle);
                true
            }
            Step::Update { id, changes } => match handles.get(id) {
                Some(handle) => handle.update(changes.clone()),
                None => store.update(id, changes.clone()),
            },
            Step::Dismiss(id) => match handles.get(id) {
                Some(handle) => handle.dismiss(),
                None => store.dismiss(id),
            },
            Step::Close(id) => match store.snapshot().get(id) {
                Some(toast) => {
                    toast.on_open_change(false);
                    true
                }
                None => false,
            },
            Step::DismissAll => {
                store.dismiss_all();
                true
            }
            Step::Wait(duration) => {
                tokio::time::sleep(*duration).await;
                true
            }
        };

        if !applied {
            warn!("Step {:?} had no effect", step);
            ignored += 1;
        }
    }

    ScenarioReport {
        steps_run: steps.len(),
        steps_ignored: ignored,
        stats: store.stats(),
    }
}

/// Build a store, attach the terminal printer and replay the scenario
pub async fn run_scenario(config: ToastConfig, steps: Vec<Step>, output: OutputFormat) -> Result<ScenarioReport> {
    let store = ToastStore::new(config)?;
    let printer = Arc::new(SnapshotPrinter::new(output));
    let subscription = store.subscribe_arc(printer.clone());

    let report = run_steps(&store, &steps).await;

    subscription.unsubscribe();
    store.shutdown();

    info!(
        "Scenario finished: {} steps ({} ignored), {} snapshots printed, {} toasts created, {} removed",
        report.steps_run,
        report.steps_ignored,
        printer.printed(),
        report.stats.created,
        report.stats.removed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use crate::notifications::{ToastContent, ToastUpdate};

    fn store(limit: usize, delay_ms: u64) -> ToastStore {
        ToastStore::new(ToastConfig::new(limit, Duration::from_millis(delay_ms))).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_upload_flow() {
        let store = store(1, 1000);
        let steps = cli::parse_script(
            "notify=Uploading|report.pdf\n\
             update=1=Uploaded\n\
             dismiss=1\n\
             wait=1001\n",
        )
        .unwrap();

        let report = run_steps(&store, &steps).await;

        assert_eq!(report.steps_run, 4);
        assert_eq!(report.steps_ignored, 0);
        assert_eq!(report.stats.created, 1);
        assert_eq!(report.stats.updated, 1);
        assert_eq!(report.stats.removed, 1);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_routes_through_render_surface() {
        let store = store(2, 50);
        let steps = vec![
            Step::Notify(ToastContent::titled("A")),
            Step::Close(ToastId::from(1)),
            Step::Wait(Duration::from_millis(60)),
        ];

        let report = run_steps(&store, &steps).await;

        assert_eq!(report.stats.dismissed, 1);
        assert_eq!(report.stats.removed, 1);
        assert!(store.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_targets_counted() {
        let store = store(1, 1000);
        let steps = vec![
            Step::Dismiss(ToastId::from(9)),
            Step::Update { id: ToastId::from(9), changes: ToastUpdate::new().with_title("x") },
            Step::Close(ToastId::from(9)),
        ];

        let report = run_steps(&store, &steps).await;
        assert_eq!(report.steps_ignored, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_scenario_shuts_store_down() {
        let steps = vec![
            Step::Notify(ToastContent::titled("A")),
            Step::Notify(ToastContent::titled("B")),
            Step::DismissAll,
        ];

        let report = run_scenario(ToastConfig::default().with_limit(2), steps, OutputFormat::Json)
            .await
            .unwrap();

        assert_eq!(report.stats.created, 2);
        assert_eq!(report.stats.dismissed, 2);
        assert_eq!(report.stats.snapshots_delivered, 3);
    }
}

use crate::domain::ports::{Probe, ProbeOutcome, ProbeTarget};
use futures::stream::{self, StreamExt};
use std::time::Duration;

const PROGRESS_EVERY: usize = 10;

/// 以有限並行度探測所有目標，結果維持輸入順序。
///
/// 每個探測各自帶 timeout，單一失敗不會影響其他探測。
pub async fn probe_all<P: Probe + ?Sized>(
    probe: &P,
    targets: Vec<ProbeTarget>,
    timeout: Duration,
    concurrency: usize,
) -> Vec<(ProbeTarget, ProbeOutcome)> {
    let total = targets.len();
    let mut results = Vec::with_capacity(total);

    let mut outcomes = stream::iter(targets)
        .map(|target| async move {
            let outcome = probe.probe(&target.url, timeout).await;
            (target, outcome)
        })
        .buffered(concurrency.max(1));

    while let Some((target, outcome)) = outcomes.next().await {
        if !outcome.is_reachable() {
            tracing::warn!("⚠️  Unreachable: {} ({})", target.url, outcome.describe());
        }
        results.push((target, outcome));

        let checked = results.len();
        if checked % PROGRESS_EVERY == 0 || checked == total {
            tracing::info!("   Progress: {}/{} URLs tested", checked, total);
        }
    }

    results
}

use crate::config::ValidationOptions;
use crate::core::reachability::probe_all;
use crate::domain::ports::{Probe, Validator};
use crate::domain::report::{Finding, FindingKind, ValidationReport};

/// 先做結構檢查，再視設定做可連線性檢查；quick 與完整模式共用同一路徑
pub struct ValidationEngine<V: Validator, P: Probe> {
    validator: V,
    probe: P,
    options: ValidationOptions,
}

impl<V: Validator, P: Probe> ValidationEngine<V, P> {
    pub fn new(validator: V, probe: P, options: ValidationOptions) -> Self {
        Self {
            validator,
            probe,
            options,
        }
    }

    pub async fn run(&self) -> ValidationReport {
        let name = self.validator.name();
        tracing::info!("🔍 Starting {} validation", name);

        let report = self.validator.check_structure(ValidationReport::new(name));
        tracing::info!(
            "Structural checks done: {} fatal, {} warnings",
            report.fatal_count(),
            report.warning_count()
        );

        if self.options.skip_reachability {
            tracing::info!("⏭️  Skipping URL reachability checks");
            return report;
        }

        self.check_reachability(report).await
    }

    async fn check_reachability(&self, mut report: ValidationReport) -> ValidationReport {
        let targets = self.validator.reachability_targets();
        tracing::info!(
            "🌐 Testing {} URLs ({} in flight, {:?} timeout)",
            targets.len(),
            self.options.concurrency,
            self.options.probe_timeout
        );

        let results = probe_all(
            &self.probe,
            targets,
            self.options.probe_timeout,
            self.options.concurrency,
        )
        .await;

        let probed = results.len();
        let mut unreachable = 0;
        for (target, outcome) in results {
            if outcome.is_reachable() {
                continue;
            }
            unreachable += 1;
            report.push(Finding::warning(
                FindingKind::Unreachable,
                target.label,
                format!(
                    "URL not reachable: {} ({}), may be temporarily down or blocked",
                    target.url,
                    outcome.describe()
                ),
            ));
        }

        report.set_counter("urls_probed", probed);
        report.set_counter("unreachable", unreachable);
        report
    }
}

//! The discovery engine.

use crate::host::Host;
use crate::probe::{canonical_key, looks_like_data_dir, ProbeCache, ProbeResult};
use crate::strategy::{builtin_strategies, StrategyContext, StrategySpec, Trust};
use crate::{
    Candidate, Confidence, DiscoverOptions, DiscoveryError, DiscoveryReport, RunStatus,
    StrategyRun, StrategySource,
};
use futures::future::join_all;
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::{timeout_at, Instant};

/// Message from a strategy worker to its collector.
#[derive(Debug)]
enum WorkerEvent {
    /// One raw path and what the probe found there.
    Probed { raw: String, probe: ProbeResult },
    /// The stream was exhausted.
    Finished,
    /// The strategy could not start.
    Failed(String),
}

/// Everything gathered from one strategy before it ended.
#[derive(Debug)]
struct Collected {
    id: &'static str,
    trust: Trust,
    status: RunStatus,
    probes: Vec<ProbeResult>,
}

/// Runs a fixed set of strategies against a host and ranks what they find.
///
/// Strategies are kept sorted by descending priority; strategies with equal
/// priority keep their registration order.
///
/// # Example
///
/// ```rust,no_run
/// use tessdata_discovery::{DiscoverOptions, DiscoveryEngine};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let engine = DiscoveryEngine::system();
///     let report = engine.discover(&DiscoverOptions::default()).await.unwrap();
///     if let Some(best) = report.primary() {
///         println!("{} ({})", best.path.display(), best.confidence);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    host: Host,
    specs: Vec<StrategySpec>,
}

impl DiscoveryEngine {
    /// Create an engine over `specs`, reading the machine through `host`.
    pub fn new(host: Host, mut specs: Vec<StrategySpec>) -> Self {
        specs.sort_by_key(|spec| Reverse(spec.priority));
        Self { host, specs }
    }

    /// The real host with every built-in strategy.
    pub fn system() -> Self {
        Self::new(Host::system(), builtin_strategies())
    }

    /// Identifiers of every registered strategy, highest priority first.
    pub fn strategy_ids(&self) -> Vec<&'static str> {
        self.specs.iter().map(|spec| spec.id).collect()
    }

    /// Registered strategies, highest priority first.
    pub fn strategies(&self) -> &[StrategySpec] {
        &self.specs
    }

    /// Run one discovery.
    ///
    /// Every applicable strategy runs concurrently on a worker thread of its
    /// own, bounded by `options.timeout_per_strategy`. A strategy that fails,
    /// panics or times out is recorded in the report; only invalid options
    /// produce an error.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError`] when the options are invalid. Nothing runs
    /// in that case.
    pub async fn discover(
        &self,
        options: &DiscoverOptions,
    ) -> Result<DiscoveryReport, DiscoveryError> {
        options.validate(&self.strategy_ids())?;

        let os = options.os_family();
        let selected: Vec<&StrategySpec> = self
            .specs
            .iter()
            .filter(|spec| spec.applies_to(os) && options.allows(spec.id))
            .collect();

        if selected.is_empty() {
            tracing::debug!(%os, "no applicable strategies");
            return Ok(DiscoveryReport::empty(os));
        }

        let ctx = StrategyContext {
            host: self.host.clone(),
            os,
        };
        let cache = Arc::new(ProbeCache::new());
        let deadline = Instant::now() + options.timeout_per_strategy;

        let collectors: Vec<_> = selected
            .iter()
            .map(|spec| {
                let rx = spawn_worker(spec, ctx.clone(), Arc::clone(&cache));
                collect(spec, rx, deadline)
            })
            .collect();
        let collected = join_all(collectors).await;

        let strategies_run = collected
            .iter()
            .map(|run| StrategyRun {
                id: run.id.to_string(),
                status: run.status.clone(),
                paths_yielded: run.probes.len(),
            })
            .collect();
        let candidates = merge(&collected);

        tracing::info!(
            %os,
            strategies = collected.len(),
            probed = cache.len(),
            candidates = candidates.len(),
            "discovery finished"
        );

        Ok(DiscoveryReport::new(candidates, os, strategies_run))
    }
}

impl Default for DiscoveryEngine {
    fn default() -> Self {
        Self::system()
    }
}

/// Discover data directories on this machine with every built-in strategy.
///
/// Equivalent to `DiscoveryEngine::system().discover(options)`.
///
/// # Example
///
/// ```rust,no_run
/// use tessdata_discovery::{discover, DiscoverOptions};
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() {
///     let report = discover(&DiscoverOptions::default()).await.unwrap();
///     for candidate in report.candidates() {
///         println!("{}: {}", candidate.confidence, candidate.path.display());
///     }
/// }
/// ```
pub async fn discover(options: &DiscoverOptions) -> Result<DiscoveryReport, DiscoveryError> {
    DiscoveryEngine::system().discover(options).await
}

/// Start `spec` on a detached thread that probes each path it yields.
///
/// The thread stops at its next send once the receiver is dropped, so an
/// abandoned worker never delays the caller.
fn spawn_worker(
    spec: &StrategySpec,
    ctx: StrategyContext,
    cache: Arc<ProbeCache>,
) -> UnboundedReceiver<WorkerEvent> {
    let (tx, rx) = unbounded_channel();
    let source = spec.source();
    let id = spec.id;

    let spawned = thread::Builder::new()
        .name(format!("strategy-{id}"))
        .spawn(move || run_worker(id, source.as_ref(), &ctx, &cache, &tx));
    if let Err(e) = spawned {
        // The closure and its sender are gone; the collector sees a closed channel.
        tracing::warn!(strategy = id, error = %e, "failed to start strategy worker");
    }
    rx
}

fn run_worker(
    id: &'static str,
    source: &dyn StrategySource,
    ctx: &StrategyContext,
    cache: &ProbeCache,
    tx: &UnboundedSender<WorkerEvent>,
) {
    tracing::debug!(strategy = id, "strategy started");
    let stream = match source.produce(ctx) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = tx.send(WorkerEvent::Failed(e.to_string()));
            return;
        }
    };

    for raw in stream {
        let probe = cache.probe(&raw, ctx.host.env.as_ref());
        if tx.send(WorkerEvent::Probed { raw, probe }).is_err() {
            tracing::trace!(strategy = id, "collector gone, worker stopping");
            return;
        }
    }
    let _ = tx.send(WorkerEvent::Finished);
}

/// Drain one worker's events until it ends or `deadline` passes.
async fn collect(
    spec: &StrategySpec,
    mut rx: UnboundedReceiver<WorkerEvent>,
    deadline: Instant,
) -> Collected {
    let mut probes = Vec::new();

    let status = loop {
        match timeout_at(deadline, rx.recv()).await {
            Ok(Some(WorkerEvent::Probed { raw, probe })) => {
                tracing::trace!(strategy = spec.id, %raw, exists = probe.exists, "path probed");
                probes.push(probe);
            }
            Ok(Some(WorkerEvent::Finished)) => break RunStatus::Complete,
            Ok(Some(WorkerEvent::Failed(message))) => break RunStatus::Failed { message },
            Ok(None) => {
                break RunStatus::Failed {
                    message: "worker exited without finishing".to_string(),
                }
            }
            Err(_) => break RunStatus::TimedOut,
        }
    };

    match &status {
        RunStatus::Complete => {
            tracing::debug!(strategy = spec.id, paths = probes.len(), "strategy finished")
        }
        RunStatus::TimedOut => tracing::warn!(
            strategy = spec.id,
            paths = probes.len(),
            "strategy timed out, keeping partial results"
        ),
        RunStatus::Failed { message } => {
            tracing::warn!(strategy = spec.id, %message, "strategy skipped")
        }
    }

    Collected {
        id: spec.id,
        trust: spec.trust,
        status,
        probes,
    }
}

/// Confidence a probe earns for a strategy of the given trust, if any.
fn classify(probe: &ProbeResult, trust: Trust) -> Option<Confidence> {
    if !probe.exists || !probe.is_directory {
        return None;
    }
    if probe.file_count > 0 {
        return Some(trust.confidence());
    }
    let looks_right = probe
        .canonical
        .as_deref()
        .is_some_and(looks_like_data_dir);
    looks_right.then_some(Confidence::Possible)
}

/// Turn collected probes into ranked, deduplicated candidates.
///
/// `runs` must be in priority order; a run's position is its rank.
fn merge(runs: &[Collected]) -> Vec<Candidate> {
    // (candidate, rank, sequence)
    let mut found: Vec<(Candidate, usize, usize)> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();
    let mut sequence = 0;

    for (rank, run) in runs.iter().enumerate() {
        for probe in &run.probes {
            sequence += 1;
            let Some(confidence) = classify(probe, run.trust) else {
                continue;
            };
            let Some(path) = probe.canonical.clone() else {
                continue;
            };
            let candidate = Candidate {
                path,
                source_strategy: run.id.to_string(),
                confidence,
                file_count: probe.file_count,
            };

            match by_key.get(&canonical_key(&candidate.path)) {
                Some(&index) => {
                    if confidence > found[index].0.confidence {
                        found[index] = (candidate, rank, sequence);
                    }
                }
                None => {
                    by_key.insert(canonical_key(&candidate.path), found.len());
                    found.push((candidate, rank, sequence));
                }
            }
        }
    }

    if found.iter().any(|(c, _, _)| c.confidence.is_usable()) {
        found.retain(|(c, _, _)| c.confidence.is_usable());
    }
    found.sort_by_key(|(c, rank, seq)| (Reverse(c.confidence), *rank, *seq));
    found.into_iter().map(|(c, _, _)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticEnv;
    use crate::strategy::PathStream;
    use crate::{OsFamily, StrategyError};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    const ALL: &[OsFamily] = &[OsFamily::Windows, OsFamily::Linux, OsFamily::MacOs];

    struct FixedPaths(Vec<String>);

    impl StrategySource for FixedPaths {
        fn produce(&self, _ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
            Ok(Box::new(self.0.clone().into_iter()))
        }
    }

    /// Yields its paths, then stalls for a second.
    struct Stalling(Vec<String>);

    impl StrategySource for Stalling {
        fn produce(&self, _ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
            let stall = std::iter::from_fn(|| {
                thread::sleep(Duration::from_secs(1));
                None
            });
            Ok(Box::new(self.0.clone().into_iter().chain(stall)))
        }
    }

    struct Failing;

    impl StrategySource for Failing {
        fn produce(&self, _ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
            Err(StrategyError::Failed("registry unavailable".to_string()))
        }
    }

    struct Panicking;

    impl StrategySource for Panicking {
        fn produce(&self, _ctx: &StrategyContext) -> Result<PathStream, StrategyError> {
            Ok(Box::new(std::iter::from_fn(|| panic!("strategy bug"))))
        }
    }

    fn spec(
        id: &'static str,
        priority: u16,
        trust: Trust,
        source: impl StrategySource + 'static,
    ) -> StrategySpec {
        StrategySpec::new(id, ALL, priority, trust, source)
    }

    fn engine(specs: Vec<StrategySpec>) -> DiscoveryEngine {
        DiscoveryEngine::new(Host::isolated(StaticEnv::default()), specs)
    }

    fn linux() -> DiscoverOptions {
        DiscoverOptions {
            os_override: Some(OsFamily::Linux),
            ..Default::default()
        }
    }

    fn data_dir(parent: &Path, name: &str, files: usize) -> PathBuf {
        let dir = parent.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        for i in 0..files {
            std::fs::write(dir.join(format!("lang{i}.traineddata")), b"data").unwrap();
        }
        dir
    }

    fn raw(path: &Path) -> String {
        path.to_string_lossy().into_owned()
    }

    fn canonical(path: &Path) -> PathBuf {
        crate::probe::probe(&raw(path), &StaticEnv::default())
            .canonical
            .unwrap()
    }

    #[test]
    fn test_new_sorts_by_priority_stably() {
        let engine = engine(vec![
            spec("low", 10, Trust::Medium, FixedPaths(Vec::new())),
            spec("high-a", 90, Trust::High, FixedPaths(Vec::new())),
            spec("high-b", 90, Trust::High, FixedPaths(Vec::new())),
        ]);
        assert_eq!(engine.strategy_ids(), vec!["high-a", "high-b", "low"]);
    }

    #[tokio::test]
    async fn test_valid_and_invalid_directories() {
        let root = tempfile::tempdir().unwrap();
        let good_a = data_dir(root.path(), "a", 2);
        let good_b = data_dir(root.path(), "b", 1);
        let empty = data_dir(root.path(), "empty", 0);
        let file = root.path().join("file.traineddata");
        std::fs::write(&file, b"data").unwrap();

        let paths = vec![
            raw(&good_a),
            raw(&empty),
            raw(&root.path().join("missing")),
            raw(&file),
            raw(&good_b),
        ];
        let report = engine(vec![spec("fixed", 50, Trust::High, FixedPaths(paths))])
            .discover(&linux())
            .await
            .unwrap();

        let found: Vec<_> = report.candidates().iter().map(|c| c.path.clone()).collect();
        assert_eq!(found, vec![canonical(&good_a), canonical(&good_b)]);
        assert!(report
            .candidates()
            .iter()
            .all(|c| c.confidence == Confidence::Verified));
        assert_eq!(report.strategies_run()[0].paths_yielded, 5);
        assert_eq!(report.strategies_run()[0].status, RunStatus::Complete);
    }

    #[tokio::test]
    async fn test_dedup_keeps_highest_confidence() {
        let root = tempfile::tempdir().unwrap();
        let dir = data_dir(root.path(), "tessdata", 3);

        // The medium-trust strategy runs first but the high-trust find wins.
        let report = engine(vec![
            spec("first", 90, Trust::Medium, FixedPaths(vec![raw(&dir)])),
            spec("second", 10, Trust::High, FixedPaths(vec![raw(&dir), raw(&dir)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        assert_eq!(report.candidates().len(), 1);
        let only = &report.candidates()[0];
        assert_eq!(only.confidence, Confidence::Verified);
        assert_eq!(only.source_strategy, "second");
        assert_eq!(only.file_count, 3);
    }

    #[tokio::test]
    async fn test_dedup_tie_keeps_earliest() {
        let root = tempfile::tempdir().unwrap();
        let dir = data_dir(root.path(), "tessdata", 1);

        let report = engine(vec![
            spec("first", 90, Trust::High, FixedPaths(vec![raw(&dir)])),
            spec("second", 80, Trust::High, FixedPaths(vec![raw(&dir)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        assert_eq!(report.candidates().len(), 1);
        assert_eq!(report.candidates()[0].source_strategy, "first");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_and_target_merge_into_one_candidate() {
        let root = tempfile::tempdir().unwrap();
        let target = data_dir(root.path(), "real/tessdata", 2);
        let link = root.path().join("linked-tessdata");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let report = engine(vec![
            spec("via-link", 90, Trust::Medium, FixedPaths(vec![raw(&link)])),
            spec("via-target", 50, Trust::High, FixedPaths(vec![raw(&target)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        assert_eq!(report.candidates().len(), 1);
        let only = &report.candidates()[0];
        assert_eq!(only.path, canonical(&target));
        assert_eq!(only.confidence, Confidence::Verified);
        assert_eq!(only.source_strategy, "via-target");
        assert_eq!(only.file_count, 2);
    }

    #[tokio::test]
    async fn test_ordering_confidence_then_priority() {
        let root = tempfile::tempdir().unwrap();
        let likely = data_dir(root.path(), "likely", 1);
        let verified_low = data_dir(root.path(), "verified-low", 1);
        let verified_high = data_dir(root.path(), "verified-high", 1);

        let report = engine(vec![
            spec("scan", 95, Trust::Medium, FixedPaths(vec![raw(&likely)])),
            spec("env", 90, Trust::High, FixedPaths(vec![raw(&verified_high)])),
            spec("known", 80, Trust::High, FixedPaths(vec![raw(&verified_low)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        let order: Vec<_> = report
            .candidates()
            .iter()
            .map(|c| c.source_strategy.as_str())
            .collect();
        assert_eq!(order, vec!["env", "known", "scan"]);
        assert_eq!(report.primary_path(), Some(canonical(&verified_high).as_path()));
    }

    #[tokio::test]
    async fn test_possible_hint_only_without_usable() {
        let root = tempfile::tempdir().unwrap();
        let hint = data_dir(root.path(), "tessdata", 0);
        let other_empty = data_dir(root.path(), "models", 0);

        let report = engine(vec![spec(
            "fixed",
            50,
            Trust::High,
            FixedPaths(vec![raw(&hint), raw(&other_empty)]),
        )])
        .discover(&linux())
        .await
        .unwrap();
        assert_eq!(report.candidates().len(), 1);
        assert_eq!(report.candidates()[0].confidence, Confidence::Possible);
        assert_eq!(report.candidates()[0].file_count, 0);
        assert!(!report.has_usable());

        let real = data_dir(root.path(), "real", 1);
        let report = engine(vec![spec(
            "fixed",
            50,
            Trust::High,
            FixedPaths(vec![raw(&hint), raw(&real)]),
        )])
        .discover(&linux())
        .await
        .unwrap();
        assert_eq!(report.candidates().len(), 1);
        assert_eq!(report.candidates()[0].path, canonical(&real));
    }

    #[tokio::test]
    async fn test_timeout_returns_promptly() {
        let started = std::time::Instant::now();
        let report = engine(vec![spec("slow", 50, Trust::High, Stalling(Vec::new()))])
            .discover(&DiscoverOptions {
                timeout_per_strategy: Duration::from_millis(10),
                ..linux()
            })
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_millis(500));
        assert_eq!(report.strategies_run()[0].status, RunStatus::TimedOut);
        assert_eq!(report.incomplete_strategies().collect::<Vec<_>>(), vec!["slow"]);
    }

    #[tokio::test]
    async fn test_timeout_keeps_partial_results() {
        let root = tempfile::tempdir().unwrap();
        let dir = data_dir(root.path(), "tessdata", 1);

        let report = engine(vec![spec("slow", 50, Trust::High, Stalling(vec![raw(&dir)]))])
            .discover(&DiscoverOptions {
                timeout_per_strategy: Duration::from_millis(300),
                ..linux()
            })
            .await
            .unwrap();

        assert_eq!(report.strategies_run()[0].status, RunStatus::TimedOut);
        assert_eq!(report.strategies_run()[0].paths_yielded, 1);
        assert_eq!(report.candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_failing_strategy_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let dir = data_dir(root.path(), "tessdata", 1);

        let report = engine(vec![
            spec("broken", 90, Trust::High, Failing),
            spec("fixed", 50, Trust::High, FixedPaths(vec![raw(&dir)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        assert_eq!(
            report.strategies_run()[0].status,
            RunStatus::Failed {
                message: "registry unavailable".to_string()
            }
        );
        assert_eq!(report.strategies_run()[1].status, RunStatus::Complete);
        assert_eq!(report.candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_panicking_strategy_is_skipped() {
        let root = tempfile::tempdir().unwrap();
        let dir = data_dir(root.path(), "tessdata", 1);

        let report = engine(vec![
            spec("buggy", 90, Trust::High, Panicking),
            spec("fixed", 50, Trust::High, FixedPaths(vec![raw(&dir)])),
        ])
        .discover(&linux())
        .await
        .unwrap();

        assert!(matches!(
            report.strategies_run()[0].status,
            RunStatus::Failed { .. }
        ));
        assert_eq!(report.candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_other_os_is_empty() {
        let report = engine(vec![spec("fixed", 50, Trust::High, FixedPaths(Vec::new()))])
            .discover(&DiscoverOptions {
                os_override: Some(OsFamily::Other),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(report, DiscoveryReport::empty(OsFamily::Other));
    }

    #[tokio::test]
    async fn test_allowlist_filters_strategies() {
        let report = engine(vec![
            spec("a", 90, Trust::High, FixedPaths(Vec::new())),
            spec("b", 50, Trust::High, FixedPaths(Vec::new())),
        ])
        .discover(&DiscoverOptions {
            strategy_allowlist: Some(vec!["b".to_string()]),
            ..linux()
        })
        .await
        .unwrap();

        let ran: Vec<_> = report.strategies_run().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ran, vec!["b"]);
    }

    #[tokio::test]
    async fn test_unknown_strategy_rejected() {
        let result = engine(vec![spec("a", 90, Trust::High, FixedPaths(Vec::new()))])
            .discover(&DiscoverOptions {
                strategy_allowlist: Some(vec!["nope".to_string()]),
                ..linux()
            })
            .await;

        match result {
            Err(DiscoveryError::UnknownStrategy { id, known, .. }) => {
                assert_eq!(id, "nope");
                assert_eq!(known, vec!["a"]);
            }
            other => panic!("expected UnknownStrategy, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_discover_is_idempotent() {
        let root = tempfile::tempdir().unwrap();
        let a = data_dir(root.path(), "tessdata", 2);
        let b = data_dir(root.path(), "share/tessdata", 1);
        let engine = engine(vec![
            spec("one", 90, Trust::High, FixedPaths(vec![raw(&a), raw(&b)])),
            spec("two", 50, Trust::Medium, FixedPaths(vec![raw(&b), raw(&a)])),
        ]);

        let first = engine.discover(&linux()).await.unwrap();
        let second = engine.discover(&linux()).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_classify() {
        let populated = ProbeResult {
            exists: true,
            is_directory: true,
            file_count: 2,
            canonical: Some(PathBuf::from("/x/models")),
        };
        assert_eq!(classify(&populated, Trust::High), Some(Confidence::Verified));
        assert_eq!(classify(&populated, Trust::Medium), Some(Confidence::Likely));

        let hint = ProbeResult {
            file_count: 0,
            canonical: Some(PathBuf::from("/x/tessdata_best")),
            ..populated.clone()
        };
        assert_eq!(classify(&hint, Trust::High), Some(Confidence::Possible));

        let plain_empty = ProbeResult {
            file_count: 0,
            ..populated.clone()
        };
        assert_eq!(classify(&plain_empty, Trust::High), None);
        assert_eq!(classify(&ProbeResult::default(), Trust::High), None);
    }
}

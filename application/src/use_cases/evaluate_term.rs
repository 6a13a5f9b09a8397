//! Evaluate Term use case
//!
//! Fans one term out to every configured backend through the query runner
//! pool, joins on all outcomes for that term, and reduces them into an
//! [`EvaluationResult`].

use crate::config::EvaluationParams;
use crate::ports::output_sink::{OutputSink, SinkError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::search_backend::SearchBackend;
use crate::runner::{PendingOutcome, PoolError, QueryRunnerPool, WorkItem};
use chrono::Utc;
use futures::StreamExt;
use futures::stream::FuturesUnordered;
use srom_domain::{
    BackendOutcome, DomainError, EvaluationResult, FailureReason, PerBackendResult, Polarity,
    SentimentTemplates, Term, compose,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Errors that can occur while evaluating a term
#[derive(Error, Debug)]
pub enum EvaluateError {
    #[error("Invalid term: {0}")]
    InvalidTerm(#[from] DomainError),

    #[error("No search backends configured")]
    NoBackends,

    #[error("No usable results for term '{0}'")]
    NoUsableBackend(Term),

    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Query runner pool stopped before results for '{0}' were collected")]
    PoolStopped(Term),

    #[error("Output sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Use case for evaluating the sentiment of a term (the aggregator)
///
/// Templates and backends are fixed at construction; every call to
/// [`execute`](Self::execute) is independent and may run concurrently with
/// others on the same pool.
pub struct EvaluateTermUseCase {
    pool: QueryRunnerPool,
    backends: Vec<Arc<dyn SearchBackend>>,
    templates: SentimentTemplates,
    sink: Arc<dyn OutputSink>,
    params: EvaluationParams,
}

/// Outcomes of the two queries sent to one backend
#[derive(Default)]
struct OutcomePair {
    positive: Option<BackendOutcome>,
    negative: Option<BackendOutcome>,
}

impl EvaluateTermUseCase {
    pub fn new(
        pool: QueryRunnerPool,
        backends: Vec<Arc<dyn SearchBackend>>,
        templates: SentimentTemplates,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            pool,
            backends,
            templates,
            sink,
            params: EvaluationParams::default(),
        }
    }

    pub fn with_params(mut self, params: EvaluationParams) -> Self {
        self.params = params;
        self
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Evaluate a raw term string and return only the aggregate ratio
    pub async fn evaluate(&self, term: &str) -> Result<f64, EvaluateError> {
        let term = Term::new(term)?;
        Ok(self.execute(term).await?.ratio)
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, term: Term) -> Result<EvaluationResult, EvaluateError> {
        self.execute_with_progress(term, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        term: Term,
        progress: &dyn ProgressNotifier,
    ) -> Result<EvaluationResult, EvaluateError> {
        if self.backends.is_empty() {
            return Err(EvaluateError::NoBackends);
        }

        let timestamp = Utc::now();
        let total_queries = self.backends.len() * Polarity::ALL.len();
        info!(
            term = %term,
            backends = self.backends.len(),
            "Evaluating term ({} queries)",
            total_queries
        );

        // The deadline also bounds time spent waiting for queue capacity.
        let deadline = self.params.timeout.map(|timeout| Instant::now() + timeout);
        let pending = self.submit_all(&term, deadline).await?;
        progress.on_evaluation_start(&term, total_queries);

        let pairs = self.collect(&term, pending, deadline, progress).await;

        let mut abandoned = false;
        let backends: Vec<PerBackendResult> = self
            .backends
            .iter()
            .zip(pairs)
            .map(|(backend, pair)| {
                let positive = pair.positive.unwrap_or_else(abandoned_outcome);
                let negative = pair.negative.unwrap_or_else(abandoned_outcome);
                abandoned |= positive.is_abandoned() || negative.is_abandoned();

                let result = PerBackendResult::new(backend.identity(), positive, negative);
                info!(
                    term = %term,
                    backend = %result.backend,
                    "Positive: {}, Negative: {}, Ratio: {}",
                    result.positive,
                    result.negative,
                    result.ratio
                );
                result
            })
            .collect();

        let total = backends.len();
        let Some(result) =
            EvaluationResult::from_backends(term.clone(), timestamp, self.templates.clone(), backends)
        else {
            progress.on_evaluation_complete(&term, 0, total);
            if abandoned {
                warn!(term = %term, "Pool stopped before any backend was usable");
                return Err(EvaluateError::PoolStopped(term));
            }
            warn!(term = %term, "All backends failed");
            return Err(EvaluateError::NoUsableBackend(term));
        };

        progress.on_evaluation_complete(&term, result.included, total);
        info!(
            term = %term,
            included = result.included,
            "Aggregate ratio: {}",
            result.ratio
        );

        self.sink.write(&result).await?;
        Ok(result)
    }

    /// Build both composed queries once and submit one work item per
    /// backend and polarity. Items still waiting for queue capacity at the
    /// deadline are never submitted and come back as `None`.
    async fn submit_all(
        &self,
        term: &Term,
        deadline: Option<Instant>,
    ) -> Result<Vec<(usize, Polarity, Option<PendingOutcome>)>, EvaluateError> {
        let queries = Polarity::ALL.map(|polarity| {
            let query = compose(term, self.templates.for_polarity(polarity));
            debug!(%polarity, "Composed query: {}", query);
            (polarity, query)
        });

        let mut pending = Vec::with_capacity(self.backends.len() * queries.len());
        for (index, backend) in self.backends.iter().enumerate() {
            for (polarity, query) in &queries {
                let (item, outcome) = WorkItem::new(Arc::clone(backend), query.clone(), *polarity);
                let submitted = match deadline {
                    None => Some(self.pool.submit(item).await),
                    Some(deadline) => tokio::time::timeout_at(deadline, self.pool.submit(item))
                        .await
                        .ok(),
                };
                match submitted {
                    Some(result) => {
                        result?;
                        pending.push((index, *polarity, Some(outcome)));
                    }
                    None => {
                        debug!(backend = backend.identity(), %polarity, "Deadline passed before the query was queued");
                        pending.push((index, *polarity, None));
                    }
                }
            }
        }
        Ok(pending)
    }

    /// Join on every outcome for this term, giving up at the configured
    /// deadline.
    async fn collect(
        &self,
        term: &Term,
        pending: Vec<(usize, Polarity, Option<PendingOutcome>)>,
        deadline: Option<Instant>,
        progress: &dyn ProgressNotifier,
    ) -> Vec<OutcomePair> {
        let mut waits: FuturesUnordered<_> = pending
            .into_iter()
            .map(|(index, polarity, outcome)| async move {
                let outcome = match outcome {
                    Some(outcome) => outcome.wait_until(deadline).await,
                    None => BackendOutcome::Failed(FailureReason::TimedOut),
                };
                (index, polarity, outcome)
            })
            .collect();

        let mut pairs: Vec<OutcomePair> = std::iter::repeat_with(OutcomePair::default)
            .take(self.backends.len())
            .collect();

        while let Some((index, polarity, outcome)) = waits.next().await {
            let backend = self.backends[index].identity();
            if outcome.is_failure() {
                warn!(term = %term, backend, %polarity, "Query excluded: {}", outcome);
            }
            progress.on_query_complete(term, backend, polarity, !outcome.is_failure());

            let pair = &mut pairs[index];
            match polarity {
                Polarity::Positive => pair.positive = Some(outcome),
                Polarity::Negative => pair.negative = Some(outcome),
            }
        }

        pairs
    }
}

fn abandoned_outcome() -> BackendOutcome {
    BackendOutcome::Failed(FailureReason::Abandoned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::ports::output_sink::NoOutput;
    use crate::ports::search_backend::BackendError;
    use async_trait::async_trait;
    use crate::runner::PoolState;
    use srom_domain::{BackendRatio, ExclusionReason, TemplateSet};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::task::JoinSet;

    // ==================== Test Doubles ====================

    /// Answers positive and negative queries with fixed counts
    struct MockBackend {
        name: String,
        positive: Result<u64, String>,
        negative: Result<u64, String>,
    }

    impl MockBackend {
        fn new(name: &str, positive: u64, negative: u64) -> Arc<dyn SearchBackend> {
            Arc::new(Self {
                name: name.to_string(),
                positive: Ok(positive),
                negative: Ok(negative),
            })
        }

        fn failing_negative(name: &str, positive: u64) -> Arc<dyn SearchBackend> {
            Arc::new(Self {
                name: name.to_string(),
                positive: Ok(positive),
                negative: Err("connection reset".to_string()),
            })
        }
    }

    #[async_trait]
    impl SearchBackend for MockBackend {
        fn identity(&self) -> &str {
            &self.name
        }

        async fn query(&self, query: &str) -> Result<u64, BackendError> {
            let answer = if query.contains("rules") {
                &self.positive
            } else {
                &self.negative
            };
            answer.clone().map_err(BackendError::RequestFailed)
        }
    }

    /// Hit counts derived from the term inside the query, so results from
    /// different terms can never be confused
    struct TermLengthBackend;

    #[async_trait]
    impl SearchBackend for TermLengthBackend {
        fn identity(&self) -> &str {
            "term-length"
        }

        async fn query(&self, query: &str) -> Result<u64, BackendError> {
            // `"<term> rules"` or `"<term> sucks"`
            let term_len = query.trim_matches('"').len() as u64 - " rules".len() as u64;
            tokio::time::sleep(Duration::from_millis(term_len % 7)).await;
            if query.contains("rules") {
                Ok(term_len * 10)
            } else {
                Ok(10)
            }
        }
    }

    /// Signals when a query starts, then blocks until released
    struct GatedBackend {
        started: Arc<Notify>,
        release: Arc<Notify>,
    }

    #[async_trait]
    impl SearchBackend for GatedBackend {
        fn identity(&self) -> &str {
            "gated"
        }

        async fn query(&self, _query: &str) -> Result<u64, BackendError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok(1)
        }
    }

    struct SlowBackend;

    #[async_trait]
    impl SearchBackend for SlowBackend {
        fn identity(&self) -> &str {
            "slow"
        }

        async fn query(&self, _query: &str) -> Result<u64, BackendError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(1)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        results: Mutex<Vec<EvaluationResult>>,
    }

    #[async_trait]
    impl OutputSink for RecordingSink {
        async fn write(&self, result: &EvaluationResult) -> Result<(), SinkError> {
            self.results.lock().unwrap().push(result.clone());
            Ok(())
        }
    }

    struct FailingSink;

    #[async_trait]
    impl OutputSink for FailingSink {
        async fn write(&self, _result: &EvaluationResult) -> Result<(), SinkError> {
            Err(SinkError::Other("database unavailable".to_string()))
        }
    }

    // ==================== Helpers ====================

    fn templates() -> SentimentTemplates {
        SentimentTemplates::new(
            TemplateSet::new(["%v rules"]).unwrap(),
            TemplateSet::new(["%v sucks"]).unwrap(),
        )
    }

    fn started_pool(workers: usize) -> QueryRunnerPool {
        let pool = QueryRunnerPool::new(PoolConfig::default().with_workers(workers));
        pool.start().unwrap();
        pool
    }

    fn use_case(
        pool: &QueryRunnerPool,
        backends: Vec<Arc<dyn SearchBackend>>,
        sink: Arc<dyn OutputSink>,
    ) -> EvaluateTermUseCase {
        EvaluateTermUseCase::new(pool.clone(), backends, templates(), sink)
    }

    // ==================== Aggregation ====================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_mean_of_two_backends() {
        let pool = started_pool(2);
        let sink = Arc::new(RecordingSink::default());
        let uc = use_case(
            &pool,
            vec![MockBackend::new("a", 30, 10), MockBackend::new("b", 5, 10)],
            sink.clone(),
        );

        let ratio = uc.evaluate("foobar").await.unwrap();
        assert_eq!(ratio, (30.0 / 10.0 + 5.0 / 10.0) / 2.0);

        let written = sink.results.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].included, 2);
        assert_eq!(written[0].backends[0].backend, "a");
        assert_eq!(written[0].backends[1].backend, "b");

        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_partial_failure_excludes_backend() {
        let pool = started_pool(2);
        let uc = use_case(
            &pool,
            vec![
                MockBackend::failing_negative("flaky", 100),
                MockBackend::new("steady", 9, 3),
            ],
            Arc::new(NoOutput),
        );

        let result = uc.execute(Term::new("foobar").unwrap()).await.unwrap();
        assert_eq!(result.ratio, 3.0);
        assert_eq!(result.included, 1);
        assert_eq!(
            result.backends[0].ratio,
            BackendRatio::Excluded(ExclusionReason::NegativeFailed)
        );

        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_total_failure_is_an_error() {
        let pool = started_pool(2);
        let uc = use_case(
            &pool,
            vec![
                MockBackend::failing_negative("a", 1),
                MockBackend::failing_negative("b", 1),
            ],
            Arc::new(NoOutput),
        );

        let err = uc.evaluate("foobar").await.unwrap_err();
        assert!(matches!(err, EvaluateError::NoUsableBackend(_)));

        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_zero_counts() {
        let pool = started_pool(2);

        let uc = use_case(&pool, vec![MockBackend::new("empty", 0, 0)], Arc::new(NoOutput));
        assert!(matches!(
            uc.evaluate("foobar").await,
            Err(EvaluateError::NoUsableBackend(_))
        ));

        let uc = use_case(&pool, vec![MockBackend::new("loved", 4, 0)], Arc::new(NoOutput));
        assert_eq!(uc.evaluate("foobar").await.unwrap(), f64::INFINITY);

        pool.shutdown().await;
    }

    #[tokio::test]
    async fn test_no_backends() {
        let pool = QueryRunnerPool::new(PoolConfig::default());
        let uc = use_case(&pool, vec![], Arc::new(NoOutput));
        assert!(matches!(
            uc.evaluate("foobar").await,
            Err(EvaluateError::NoBackends)
        ));
    }

    #[tokio::test]
    async fn test_invalid_term() {
        let pool = QueryRunnerPool::new(PoolConfig::default());
        let uc = use_case(&pool, vec![MockBackend::new("a", 1, 1)], Arc::new(NoOutput));
        assert!(matches!(
            uc.evaluate("   ").await,
            Err(EvaluateError::InvalidTerm(DomainError::EmptyTerm))
        ));
    }

    #[tokio::test]
    async fn test_pool_not_running() {
        let pool = QueryRunnerPool::new(PoolConfig::default());
        let uc = use_case(&pool, vec![MockBackend::new("a", 1, 1)], Arc::new(NoOutput));
        assert!(matches!(
            uc.evaluate("foobar").await,
            Err(EvaluateError::Pool(PoolError::NotRunning))
        ));
    }

    // ==================== Sink ====================

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_sink_error_propagates() {
        let pool = started_pool(1);
        let uc = use_case(&pool, vec![MockBackend::new("a", 2, 1)], Arc::new(FailingSink));

        let err = uc.evaluate("foobar").await.unwrap_err();
        match err {
            EvaluateError::Sink(SinkError::Other(msg)) => assert_eq!(msg, "database unavailable"),
            other => panic!("unexpected error: {other}"),
        }

        pool.shutdown().await;
    }

    // ==================== Concurrency ====================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_terms_do_not_mix() {
        let pool = started_pool(3);
        let sink = Arc::new(RecordingSink::default());
        let uc = Arc::new(use_case(
            &pool,
            vec![Arc::new(TermLengthBackend), Arc::new(TermLengthBackend)],
            sink.clone(),
        ));

        let terms: Vec<String> = (1..=12).map(|n| "x".repeat(n)).collect();
        let mut join_set = JoinSet::new();
        for term in terms.clone() {
            let uc = Arc::clone(&uc);
            join_set.spawn(async move {
                let ratio = uc.evaluate(&term).await.unwrap();
                (term, ratio)
            });
        }

        let mut seen = 0;
        while let Some(joined) = join_set.join_next().await {
            let (term, ratio) = joined.unwrap();
            assert_eq!(ratio, term.len() as f64, "wrong ratio for '{term}'");
            seen += 1;
        }
        assert_eq!(seen, terms.len());
        assert_eq!(sink.results.lock().unwrap().len(), terms.len());

        pool.shutdown().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_excludes_slow_backend() {
        let pool = started_pool(4);
        let uc = use_case(
            &pool,
            vec![Arc::new(SlowBackend), MockBackend::new("fast", 6, 2)],
            Arc::new(NoOutput),
        )
        .with_params(EvaluationParams::default().with_timeout(Some(Duration::from_millis(200))));

        let result = uc.execute(Term::new("foobar").unwrap()).await.unwrap();
        assert_eq!(result.ratio, 3.0);
        assert_eq!(result.included, 1);
        assert_eq!(
            result.backends[0].positive,
            BackendOutcome::Failed(FailureReason::TimedOut)
        );

        // The slow calls are still in flight; dropping the pool handle aborts them.
        drop(uc);
        drop(pool);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_timeout_covers_waiting_for_queue_capacity() {
        let pool = QueryRunnerPool::new(
            PoolConfig::default()
                .with_workers(1)
                .with_queue_capacity(1),
        );
        pool.start().unwrap();
        let stuck: Arc<dyn SearchBackend> = Arc::new(GatedBackend {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        });
        let uc = use_case(
            &pool,
            vec![stuck, MockBackend::new("fast", 6, 2)],
            Arc::new(NoOutput),
        )
        .with_params(EvaluationParams::default().with_timeout(Some(Duration::from_millis(200))));

        let err = tokio::time::timeout(
            Duration::from_secs(5),
            uc.execute(Term::new("foobar").unwrap()),
        )
        .await
        .expect("submission ignored the deadline")
        .unwrap_err();
        assert!(matches!(err, EvaluateError::NoUsableBackend(_)), "unexpected error: {err}");

        drop(uc);
        drop(pool);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_shutdown_mid_evaluation_fails_instead_of_hanging() {
        let pool = started_pool(1);
        let started = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let backend: Arc<dyn SearchBackend> = Arc::new(GatedBackend {
            started: Arc::clone(&started),
            release: Arc::clone(&release),
        });
        let uc = Arc::new(use_case(&pool, vec![backend], Arc::new(NoOutput)));

        let evaluating = {
            let uc = Arc::clone(&uc);
            tokio::spawn(async move { uc.evaluate("foobar").await })
        };
        started.notified().await;

        let stopper = pool.clone();
        let stopping = tokio::spawn(async move { stopper.shutdown().await });
        while pool.state() != PoolState::Stopping {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
        release.notify_one();

        let err = tokio::time::timeout(Duration::from_secs(5), evaluating)
            .await
            .expect("evaluation hung after shutdown")
            .unwrap()
            .unwrap_err();
        // The negative query is either abandoned in the queue or rejected
        // on submit, depending on how far submission got.
        assert!(
            matches!(
                err,
                EvaluateError::PoolStopped(_) | EvaluateError::Pool(PoolError::NotRunning)
            ),
            "unexpected error: {err}"
        );

        stopping.await.unwrap();
        assert_eq!(pool.state(), PoolState::Stopped);
    }
}

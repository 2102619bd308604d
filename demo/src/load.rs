//! Threaded load runner for the open-debit-card-account scenario.
//!
//! # Design
//! Each virtual user is one OS thread with its own `GatewayClient`. On start
//! it creates a user; its task opens a debit card account for that user, then
//! waits a uniform random time between `min_wait` and `max_wait`. Threads stop
//! once `duration` has elapsed. A user whose start-up call fails records the
//! failure and does not run tasks. A user thread that panics counts as one
//! failed `virtual_user` sample.

use std::collections::BTreeMap;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use gateway_core::{ClientConfig, GatewayClient, Transport};
use rand::Rng;
use tracing::{info, warn};

/// Shape of one load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    pub client: ClientConfig,
    pub users: usize,
    pub duration: Duration,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            users: 10,
            duration: Duration::from_secs(60),
            min_wait: Duration::from_secs(1),
            max_wait: Duration::from_secs(3),
        }
    }
}

/// Outcome of a single request made during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub name: &'static str,
    pub elapsed: Duration,
    pub ok: bool,
}

const VIRTUAL_USER: &str = "virtual_user";

/// Request and failure counts for one request name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestCounts {
    pub requests: usize,
    pub failures: usize,
}

/// Aggregated result of a load run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub requests: usize,
    pub failures: usize,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub max: Duration,
    pub by_name: BTreeMap<&'static str, RequestCounts>,
}

impl LoadReport {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut latencies: Vec<Duration> = samples.iter().map(|sample| sample.elapsed).collect();
        latencies.sort_unstable();

        let mut by_name: BTreeMap<&'static str, RequestCounts> = BTreeMap::new();
        for sample in samples {
            let counts = by_name.entry(sample.name).or_default();
            counts.requests += 1;
            if !sample.ok {
                counts.failures += 1;
            }
        }

        Self {
            requests: samples.len(),
            failures: samples.iter().filter(|sample| !sample.ok).count(),
            p50: percentile(&latencies, 50),
            p95: percentile(&latencies, 95),
            p99: percentile(&latencies, 99),
            max: latencies.last().copied().unwrap_or_default(),
            by_name,
        }
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "requests={} failures={} p50={:?} p95={:?} p99={:?} max={:?}",
            self.requests, self.failures, self.p50, self.p95, self.p99, self.max
        )?;
        for (name, counts) in &self.by_name {
            write!(f, " {name}={}/{}", counts.requests - counts.failures, counts.requests)?;
        }
        Ok(())
    }
}

/// Nearest-rank percentile over sorted latencies.
fn percentile(sorted: &[Duration], pct: usize) -> Duration {
    if sorted.is_empty() {
        return Duration::ZERO;
    }
    let rank = (pct * sorted.len()).div_ceil(100).max(1);
    sorted[rank - 1]
}

/// Run the scenario with real HTTP clients built from `config.client`.
pub fn run(config: &LoadConfig) -> LoadReport {
    run_with(config, || GatewayClient::connect(&config.client))
}

/// Run the scenario with clients from `make_client`, one per virtual user.
pub fn run_with<T, F>(config: &LoadConfig, make_client: F) -> LoadReport
where
    T: Transport,
    F: Fn() -> GatewayClient<T> + Sync,
{
    let deadline = Instant::now() + config.duration;
    let make_client = &make_client;
    info!(users = config.users, duration_secs = config.duration.as_secs(), "load run starting");

    let samples: Vec<Sample> = thread::scope(|scope| {
        let handles: Vec<_> = (0..config.users)
            .map(move |_| scope.spawn(move || virtual_user(&make_client(), config, deadline)))
            .collect();
        handles
            .into_iter()
            .flat_map(|handle| {
                handle.join().unwrap_or_else(|_| {
                    warn!("virtual user panicked, its samples are lost");
                    vec![Sample {
                        name: VIRTUAL_USER,
                        elapsed: Duration::ZERO,
                        ok: false,
                    }]
                })
            })
            .collect()
    });

    let report = LoadReport::from_samples(&samples);
    info!(%report, "load run finished");
    report
}

fn virtual_user<T: Transport>(gateway: &GatewayClient<T>, config: &LoadConfig, deadline: Instant) -> Vec<Sample> {
    let mut samples = Vec::new();

    let (user, sample) = timed("create_user", || gateway.users().create_user());
    samples.push(sample);
    let Some(user) = user else {
        return samples;
    };

    while Instant::now() < deadline {
        let (_, sample) = timed("open_debit_card_account", || {
            gateway.accounts().open_debit_card_account(&user.id)
        });
        samples.push(sample);

        let remaining = deadline.saturating_duration_since(Instant::now());
        thread::sleep(wait_between(config.min_wait, config.max_wait).min(remaining));
    }
    samples
}

fn timed<R, E: fmt::Display>(name: &'static str, call: impl FnOnce() -> Result<R, E>) -> (Option<R>, Sample) {
    let started = Instant::now();
    let result = call();
    let elapsed = started.elapsed();
    let ok = result.is_ok();
    let value = result.inspect_err(|e| warn!(request = name, error = %e, "request failed")).ok();
    (value, Sample { name, elapsed, ok })
}

fn wait_between(min: Duration, max: Duration) -> Duration {
    if max <= min {
        return min;
    }
    let millis = rand::rng().random_range(min.as_millis() as u64..=max.as_millis() as u64);
    Duration::from_millis(millis)
}

#[cfg(test)]
mod tests {
    use gateway_core::{HttpRequest, HttpResponse, TransportError};

    use super::*;

    fn sample(millis: u64, ok: bool) -> Sample {
        Sample {
            name: "t",
            elapsed: Duration::from_millis(millis),
            ok,
        }
    }

    fn named(name: &'static str, ok: bool) -> Sample {
        Sample {
            name,
            elapsed: Duration::from_millis(1),
            ok,
        }
    }

    fn counts(requests: usize, failures: usize) -> RequestCounts {
        RequestCounts { requests, failures }
    }

    fn quick(users: usize) -> LoadConfig {
        LoadConfig {
            users,
            duration: Duration::from_millis(50),
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
            ..LoadConfig::default()
        }
    }

    #[test]
    fn report_counts_and_ranks() {
        let samples: Vec<Sample> = (1..=100).map(|ms| sample(ms, ms % 10 != 0)).collect();
        let report = LoadReport::from_samples(&samples);
        assert_eq!(report.requests, 100);
        assert_eq!(report.failures, 10);
        assert_eq!(report.p50, Duration::from_millis(50));
        assert_eq!(report.p95, Duration::from_millis(95));
        assert_eq!(report.p99, Duration::from_millis(99));
        assert_eq!(report.max, Duration::from_millis(100));
    }

    #[test]
    fn empty_report_is_zero() {
        let report = LoadReport::from_samples(&[]);
        assert_eq!(report.requests, 0);
        assert_eq!(report.p99, Duration::ZERO);
    }

    #[test]
    fn single_sample_is_every_percentile() {
        let report = LoadReport::from_samples(&[sample(7, true)]);
        assert_eq!(report.p50, Duration::from_millis(7));
        assert_eq!(report.p99, Duration::from_millis(7));
    }

    #[test]
    fn wait_stays_in_bounds() {
        let (min, max) = (Duration::from_millis(10), Duration::from_millis(20));
        for _ in 0..100 {
            let wait = wait_between(min, max);
            assert!(wait >= min && wait <= max);
        }
        assert_eq!(wait_between(max, min), max);
    }

    #[test]
    fn report_counts_each_request_name() {
        let samples = [
            named("create_user", true),
            named("open_debit_card_account", true),
            named("open_debit_card_account", false),
        ];
        let report = LoadReport::from_samples(&samples);
        assert_eq!(report.by_name["create_user"], counts(1, 0));
        assert_eq!(report.by_name["open_debit_card_account"], counts(2, 1));
        assert!(report.to_string().ends_with(" create_user=1/1 open_debit_card_account=1/2"));
    }

    #[test]
    fn panicking_user_counts_as_a_failure() {
        let report = run_with(&quick(3), || -> GatewayClient<Unreachable> { panic!("no client") });
        assert_eq!(report.requests, 3);
        assert_eq!(report.failures, 3);
        assert_eq!(report.by_name[VIRTUAL_USER], counts(3, 3));
    }

    #[test]
    fn failed_start_stops_the_user() {
        let report = run_with(&quick(2), || GatewayClient::new("http://gateway", Unreachable));
        assert_eq!(report.by_name.len(), 1);
        assert_eq!(report.by_name["create_user"], counts(2, 2));
    }

    struct Unreachable;

    impl Transport for Unreachable {
        fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Err(TransportError::Connection("refused".to_string()))
        }
    }
}

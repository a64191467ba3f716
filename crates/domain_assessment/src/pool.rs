//! Bounded worker pool
//!
//! Jobs are fed through a bounded channel to a fixed number of worker tasks.
//! Each worker pushes `(index, output)` onto a result channel, so outputs come
//! back in completion order tagged with the position of the job that produced
//! them. A failing job never stops its siblings; a panicking worker is
//! reported once every other job has drained.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::error;

use crate::error::PoolError;

/// Default number of concurrent workers
pub const DEFAULT_WORKERS: usize = 10;

/// Output of one job together with the job's input index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed<T> {
    pub index: usize,
    pub output: T,
}

/// A fixed-size pool of async workers
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    workers: usize,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(DEFAULT_WORKERS)
    }
}

impl WorkerPool {
    /// Creates a pool; zero workers is treated as one
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Runs `task` over every job with at most `workers` jobs in flight
    ///
    /// Returns one `Completed` per job, in completion order.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::WorkerFailed` if a worker panicked and some jobs
    /// produced no output.
    pub async fn run<J, T, F, Fut>(&self, jobs: Vec<J>, task: F) -> Result<Vec<Completed<T>>, PoolError>
    where
        J: Send + 'static,
        T: Send + 'static,
        F: Fn(J) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let expected = jobs.len();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let worker_count = self.workers.min(expected);
        let (job_tx, job_rx) = mpsc::channel::<(usize, J)>(worker_count);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Completed<T>>();
        let task = Arc::new(task);

        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let job_rx = Arc::clone(&job_rx);
            let result_tx = result_tx.clone();
            let task = Arc::clone(&task);

            handles.push(tokio::spawn(async move {
                loop {
                    let next = job_rx.lock().await.recv().await;
                    let Some((index, job)) = next else {
                        break;
                    };

                    let output = task(job).await;
                    if result_tx.send(Completed { index, output }).is_err() {
                        break;
                    }
                }
            }));
        }
        drop(result_tx);
        drop(job_rx);

        for (index, job) in jobs.into_iter().enumerate() {
            // Fails only when every worker is gone
            if job_tx.send((index, job)).await.is_err() {
                break;
            }
        }
        drop(job_tx);

        let mut completed = Vec::with_capacity(expected);
        while let Some(done) = result_rx.recv().await {
            completed.push(done);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Worker task terminated abnormally");
            }
        }

        if completed.len() != expected {
            return Err(PoolError::WorkerFailed {
                completed: completed.len(),
                expected,
            });
        }

        Ok(completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_empty_job_list() {
        let pool = WorkerPool::new(4);
        let out = pool.run(Vec::<u32>::new(), |n| async move { n }).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_every_job_completes_once() {
        let pool = WorkerPool::new(3);
        let jobs: Vec<u64> = (0..25).collect();

        let mut out = pool
            .run(jobs, |n| async move {
                tokio::time::sleep(Duration::from_millis(25 - n)).await;
                n * 2
            })
            .await
            .unwrap();

        assert_eq!(out.len(), 25);
        out.sort_by_key(|c| c.index);
        for (i, c) in out.iter().enumerate() {
            assert_eq!(c.index, i);
            assert_eq!(c.output, i as u64 * 2);
        }
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let pool = WorkerPool::new(4);
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let jobs: Vec<usize> = (0..20).collect();
        let (in_flight_task, peak_task) = (Arc::clone(&in_flight), Arc::clone(&peak));
        pool.run(jobs, move |_| {
            let in_flight = Arc::clone(&in_flight_task);
            let peak = Arc::clone(&peak_task);
            async move {
                let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                in_flight.fetch_sub(1, Ordering::SeqCst);
            }
        })
        .await
        .unwrap();

        let peak = peak.load(Ordering::SeqCst);
        assert!(peak <= 4, "peak concurrency was {peak}");
        assert!(peak >= 2, "jobs never overlapped");
    }

    #[tokio::test]
    async fn test_zero_workers_still_runs() {
        let pool = WorkerPool::new(0);
        assert_eq!(pool.workers(), 1);
        let out = pool.run(vec![1, 2, 3], |n| async move { n }).await.unwrap();
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn test_panicking_worker_is_reported() {
        let pool = WorkerPool::new(2);
        let result = pool
            .run(vec![1, 2, 3, 4], |n| async move {
                if n == 3 {
                    panic!("boom");
                }
                n
            })
            .await;

        match result {
            Err(PoolError::WorkerFailed { completed, expected }) => {
                assert_eq!(expected, 4);
                assert!(completed < 4);
            }
            Ok(_) => panic!("expected a worker failure"),
        }
    }
}

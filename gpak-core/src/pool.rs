//! Fixed-size worker pool for per-file parallelism.
//!
//! The directory pipelines fan independent per-file tasks out to a bounded
//! set of OS threads and collect the results in submission order. The pool is
//! deliberately small: one task queue guarded by a mutex, a condition
//! variable to wake workers, and a single-use channel per task to carry the
//! result back to the coordinator.
//!
//! Shutdown discipline: [`WorkerPool::shutdown`] (also run on drop) stops the
//! workers after their in-flight task; jobs still queued are discarded and
//! their handles report [`GpakError::TaskAbandoned`]. Callers therefore join
//! every handle before letting the pool go out of scope. Task bodies must not
//! submit to the pool they run on.

use crate::error::{GpakError, Result};
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Queue state shared between the pool handle and its workers.
struct PoolQueue {
    jobs: VecDeque<Job>,
    shutdown: bool,
}

struct PoolShared {
    queue: Mutex<PoolQueue>,
    available: Condvar,
}

/// Handle to a submitted task's eventual result.
///
/// Joining blocks until the task finishes and yields whatever the task
/// returned; pipelines submit `Result`-valued closures so a task fault
/// arrives here as an `Ok(Err(..))` to be propagated by the coordinator.
#[derive(Debug)]
pub struct TaskHandle<T> {
    result: mpsc::Receiver<T>,
}

impl<T> TaskHandle<T> {
    /// Block until the task delivers its result.
    pub fn join(self) -> Result<T> {
        self.result.recv().map_err(|_| GpakError::TaskAbandoned)
    }
}

/// A fixed-size pool of worker threads executing nullary tasks.
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Create a pool with the given number of workers.
    ///
    /// A request of `0` resolves to the hardware parallelism of the host,
    /// with a floor of one worker.
    pub fn new(thread_count: usize) -> Self {
        let count = if thread_count == 0 {
            thread::available_parallelism()
                .map(std::num::NonZeroUsize::get)
                .unwrap_or(1)
        } else {
            thread_count
        };

        let shared = Arc::new(PoolShared {
            queue: Mutex::new(PoolQueue {
                jobs: VecDeque::new(),
                shutdown: false,
            }),
            available: Condvar::new(),
        });

        let workers = (0..count)
            .map(|_| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || worker_loop(&shared))
            })
            .collect();

        Self { shared, workers }
    }

    /// Number of worker threads in the pool.
    pub fn size(&self) -> usize {
        self.workers.len()
    }

    /// Submit a task and receive a handle to its result.
    ///
    /// Fails with [`GpakError::PoolShutdown`] once the pool has been shut
    /// down.
    pub fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();

        {
            let mut queue = self.shared.queue.lock().expect("worker pool mutex poisoned");
            if queue.shutdown {
                return Err(GpakError::PoolShutdown);
            }
            queue.jobs.push_back(Box::new(move || {
                // The coordinator may have given up on this task; a closed
                // channel is not the worker's problem.
                let _ = sender.send(task());
            }));
        }

        self.shared.available.notify_one();
        Ok(TaskHandle { result: receiver })
    }

    /// Stop the workers and join them.
    ///
    /// In-flight tasks run to completion; tasks still queued are dropped
    /// without execution. Idempotent.
    pub fn shutdown(&mut self) {
        {
            let mut queue = self.shared.queue.lock().expect("worker pool mutex poisoned");
            if queue.shutdown {
                return;
            }
            queue.shutdown = true;
            queue.jobs.clear();
        }

        self.shared.available.notify_all();

        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: &PoolShared) {
    loop {
        let job = {
            let mut queue = shared.queue.lock().expect("worker pool mutex poisoned");
            loop {
                if queue.shutdown {
                    return;
                }
                if let Some(job) = queue.jobs.pop_front() {
                    break job;
                }
                queue = shared
                    .available
                    .wait(queue)
                    .expect("worker pool mutex poisoned");
            }
        };

        // Contain panicking tasks so one bad task cannot take the worker
        // down with it; the task's channel is dropped and its handle
        // reports TaskAbandoned.
        let _ = catch_unwind(AssertUnwindSafe(job));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GpakError;
    use std::time::Duration;

    #[test]
    fn test_executes_multiple_tasks() {
        let pool = WorkerPool::new(4);

        let mut handles = Vec::new();
        for i in 0..10u64 {
            handles.push(
                pool.submit(move || {
                    thread::sleep(Duration::from_millis(10));
                    i * i
                })
                .unwrap(),
            );
        }

        let results: Vec<u64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![0, 1, 4, 9, 16, 25, 36, 49, 64, 81]);
    }

    #[test]
    fn test_propagates_task_faults() {
        let pool = WorkerPool::new(2);

        let handle = pool
            .submit(|| -> Result<u32> { Err(GpakError::invalid_input("boom")) })
            .unwrap();

        let result = handle.join().unwrap();
        assert!(matches!(result, Err(GpakError::InvalidInput { .. })));
    }

    #[test]
    fn test_honors_thread_count() {
        let pool = WorkerPool::new(3);
        assert_eq!(pool.size(), 3);
    }

    #[test]
    fn test_zero_threads_resolves_to_at_least_one() {
        let pool = WorkerPool::new(0);
        assert!(pool.size() >= 1);
    }

    #[test]
    fn test_submit_after_shutdown_is_rejected() {
        let mut pool = WorkerPool::new(1);
        pool.shutdown();

        let result = pool.submit(|| 42);
        assert!(matches!(result, Err(GpakError::PoolShutdown)));
    }

    #[test]
    fn test_panicking_task_abandons_handle_only() {
        let pool = WorkerPool::new(1);

        let bad = pool.submit(|| -> u32 { panic!("task panic") }).unwrap();
        assert!(matches!(bad.join(), Err(GpakError::TaskAbandoned)));

        // The worker must survive and keep serving tasks.
        let good = pool.submit(|| 7).unwrap();
        assert_eq!(good.join().unwrap(), 7);
    }
}

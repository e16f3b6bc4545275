//! Fork-join executors for the parallel scan phases.
//!
//! Every executor provides the same guarantee: `fork_join` returns only after
//! every task it was handed has run to completion, so writes made by the tasks
//! are visible to the caller afterwards. A panicking task propagates out of
//! `fork_join`.

use crate::error::ScanError;

/// Runs a batch of independent tasks and waits for all of them.
pub trait Executor {
    fn fork_join<'a, F>(&self, tasks: Vec<F>)
    where
        F: FnOnce() + Send + 'a;
}

/// Hardware parallelism, or 1 when it cannot be queried.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Zero or one task never needs another thread.
fn run_inline<F: FnOnce()>(tasks: Vec<F>) {
    for task in tasks {
        task();
    }
}

/// Spawns one scoped OS thread per task, per phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScopedThreads;

impl Executor for ScopedThreads {
    fn fork_join<'a, F>(&self, tasks: Vec<F>)
    where
        F: FnOnce() + Send + 'a,
    {
        if tasks.len() <= 1 {
            return run_inline(tasks);
        }

        std::thread::scope(|scope| {
            for task in tasks {
                scope.spawn(task);
            }
        });
    }
}

/// Bounded worker pool reused across phases and calls.
///
/// Tasks beyond the pool size queue until a worker frees up.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Build a pool of `threads` workers; `None` uses rayon's default size.
    pub fn new(threads: Option<usize>) -> Result<Self, ScanError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.unwrap_or(0))
            .thread_name(|i| format!("parscan-worker-{i}"))
            .build()?;
        log::debug!("built worker pool with {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Executor for WorkerPool {
    fn fork_join<'a, F>(&self, tasks: Vec<F>)
    where
        F: FnOnce() + Send + 'a,
    {
        if tasks.len() <= 1 {
            return run_inline(tasks);
        }

        self.pool.scope(|scope| {
            for task in tasks {
                scope.spawn(move |_| task());
            }
        });
    }
}

/// Executor chosen at runtime, usually from a [`ScanConfig`](crate::ScanConfig).
#[derive(Debug)]
pub enum Backend {
    Scoped(ScopedThreads),
    Pool(WorkerPool),
}

impl Executor for Backend {
    fn fork_join<'a, F>(&self, tasks: Vec<F>)
    where
        F: FnOnce() + Send + 'a,
    {
        match self {
            Backend::Scoped(exec) => exec.fork_join(tasks),
            Backend::Pool(exec) => exec.fork_join(tasks),
        }
    }
}

impl<E: Executor + ?Sized> Executor for &E {
    fn fork_join<'a, F>(&self, tasks: Vec<F>)
    where
        F: FnOnce() + Send + 'a,
    {
        (**self).fork_join(tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread::ThreadId;

    fn run_counted<E: Executor>(exec: &E, n: usize) -> usize {
        let done = AtomicUsize::new(0);
        let tasks: Vec<_> = (0..n)
            .map(|_| {
                let done = &done;
                move || {
                    done.fetch_add(1, Ordering::Relaxed);
                }
            })
            .collect();
        exec.fork_join(tasks);
        done.load(Ordering::Relaxed)
    }

    #[test]
    fn test_scoped_runs_every_task() {
        for n in [0, 1, 2, 7, 33] {
            assert_eq!(run_counted(&ScopedThreads, n), n);
        }
    }

    #[test]
    fn test_pool_runs_every_task() {
        let pool = WorkerPool::new(Some(3)).unwrap();
        assert_eq!(pool.threads(), 3);
        for n in [0, 1, 2, 7, 33] {
            assert_eq!(run_counted(&pool, n), n);
        }
    }

    #[test]
    fn test_tasks_write_disjoint_slices() {
        let mut buf = vec![0usize; 12];
        let tasks: Vec<_> = buf
            .chunks_mut(3)
            .enumerate()
            .map(|(i, chunk)| move || chunk.fill(i))
            .collect();
        ScopedThreads.fork_join(tasks);
        assert_eq!(buf, [0, 0, 0, 1, 1, 1, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_single_task_runs_on_caller() {
        let caller = std::thread::current().id();
        let seen: Mutex<Option<ThreadId>> = Mutex::new(None);
        let pool = WorkerPool::new(Some(2)).unwrap();

        for exec in [Backend::Scoped(ScopedThreads), Backend::Pool(pool)] {
            *seen.lock().unwrap() = None;
            exec.fork_join(vec![|| {
                *seen.lock().unwrap() = Some(std::thread::current().id());
            }]);
            assert_eq!(*seen.lock().unwrap(), Some(caller));
        }
    }

    #[test]
    fn test_available_workers_is_positive() {
        assert!(available_workers() >= 1);
    }
}

// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-size worker pool with drain tracking.
//!
//! N long-lived threads pull boxed closures from one FIFO queue. The queue
//! counts every task from the moment it is submitted until it has finished
//! running, so [`WorkQueue::finish`] can block until the pool is truly idle,
//! including tasks that other tasks submitted while the pool was draining.
//!
//! ```text
//!  execute ──▶ pending += 1 ──▶ [ VecDeque<Task> ] ──▶ worker: run ──▶ pending -= 1
//!                                                                        │
//!  finish  ◀──────────────────── notify when pending == 0 ◀──────────────┘
//! ```
//!
//! A panicking task is caught and logged; the worker keeps going and the
//! pending count still drops, so `finish` cannot hang on a failed task.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, error};

use crate::error::{Error, Result};

type Task = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct State {
    tasks: VecDeque<Task>,
    /// Submitted but not yet finished (queued + running).
    pending: usize,
    shutdown: bool,
}

struct Shared {
    state: Mutex<State>,
    /// Signalled when a task is queued or shutdown begins.
    available: Condvar,
    /// Signalled when `pending` reaches zero.
    drained: Condvar,
}

pub struct WorkQueue {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

impl WorkQueue {
    /// Start a pool of `threads` workers (at least one).
    ///
    /// If a worker cannot be spawned, the ones already running are shut
    /// down and joined before the error is returned.
    pub fn new(threads: usize) -> Result<Self> {
        let size = threads.max(1);
        let shared = Arc::new(Shared {
            state: Mutex::new(State::default()),
            available: Condvar::new(),
            drained: Condvar::new(),
        });

        let mut workers = Vec::with_capacity(size);
        for id in 0..size {
            let worker = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("crawldex-worker-{}", id))
                .spawn(move || worker_loop(id, &worker));
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(source) => {
                    // Dropping the partial pool shuts it down.
                    drop(Self {
                        shared,
                        workers: Mutex::new(workers),
                        size,
                    });
                    return Err(Error::Spawn { id, source });
                }
            }
        }

        debug!(threads = size, "work queue started");

        Ok(Self {
            shared,
            workers: Mutex::new(workers),
            size,
        })
    }

    /// Queue a task. Never blocks on running work.
    pub fn execute<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        if state.shutdown {
            return Err(Error::QueueClosed);
        }
        state.pending += 1;
        state.tasks.push_back(Box::new(task));
        drop(state);

        self.shared.available.notify_one();
        Ok(())
    }

    /// Block until every submitted task has completed.
    ///
    /// Must not be called from inside a task of this queue: the caller's own
    /// task would never finish.
    pub fn finish(&self) {
        let mut state = self.shared.state.lock();
        while state.pending > 0 {
            self.shared.drained.wait(&mut state);
        }
    }

    /// Stop accepting work, let queued and running tasks complete, then join the workers.
    ///
    /// Safe to call more than once.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.shutdown {
                return;
            }
            state.shutdown = true;
        }
        self.shared.available.notify_all();

        let current = thread::current().id();
        let handles: Vec<JoinHandle<()>> = self.workers.lock().drain(..).collect();
        for handle in handles {
            // A worker dropping the last reference to its own pool cannot join itself.
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                error!("worker thread exited abnormally");
            }
        }
        debug!("work queue shut down");
    }

    /// Number of worker threads.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tasks submitted but not yet completed.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().pending
    }

    pub fn is_shutdown(&self) -> bool {
        self.shared.state.lock().shutdown
    }
}

impl Drop for WorkQueue {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(id: usize, shared: &Shared) {
    loop {
        let task = {
            let mut state = shared.state.lock();
            loop {
                if let Some(task) = state.tasks.pop_front() {
                    break task;
                }
                if state.shutdown {
                    debug!(worker = id, "worker exiting");
                    return;
                }
                shared.available.wait(&mut state);
            }
        };

        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(task)) {
            error!(worker = id, "task panicked: {}", panic_message(payload.as_ref()));
        }

        let mut state = shared.state.lock();
        state.pending -= 1;
        if state.pending == 0 {
            shared.drained.notify_all();
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;

pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs work after the current render commit instead of inside the event
/// handler that produced it.
pub trait DeferScheduler: Send + Sync {
    fn defer(&self, task: DeferredTask);
}

/// Defers to the next tick of the browser event loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct NextTick;

impl DeferScheduler for NextTick {
    fn defer(&self, task: DeferredTask) {
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            task();
        });
    }
}

/// Queues tasks until `run_pending` is called. Lets tests observe the state
/// between a mutation and its deferred write.
#[cfg(test)]
#[derive(Default)]
pub struct ManualScheduler {
    queue: std::sync::Mutex<Vec<DeferredTask>>,
}

#[cfg(test)]
impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    pub fn run_pending(&self) {
        let tasks: Vec<DeferredTask> = std::mem::take(&mut *self.queue.lock().unwrap());
        for task in tasks {
            task();
        }
    }
}

#[cfg(test)]
impl DeferScheduler for ManualScheduler {
    fn defer(&self, task: DeferredTask) {
        self.queue.lock().unwrap().push(task);
    }
}

use rayon::{ThreadPool, ThreadPoolBuilder};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use crate::client::{ColorEndpoint, Mode};
use crate::constants::*;
use crate::error::Result;
use crate::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Off,
    Mode(Mode),
}

/// Sends requests somewhere without waiting for the outcome.
pub trait Dispatch {
    fn dispatch(&self, color: Color);

    fn command(&self, command: Command);
}

/// Runs each request on its own pool of blocking workers, sized for network
/// waits rather than CPU count. Requests are neither ordered nor cancelled,
/// and their responses are dropped.
pub struct FireAndForget {
    endpoint: Arc<dyn ColorEndpoint>,
    pool: ThreadPool,
}

impl FireAndForget {
    pub fn new(endpoint: Arc<dyn ColorEndpoint>) -> Result<Self> {
        Self::with_workers(endpoint, POST_WORKERS)
    }

    pub fn with_workers(endpoint: Arc<dyn ColorEndpoint>, workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("post-{}", i))
            .build()?;
        Ok(Self { endpoint, pool })
    }
}

impl Dispatch for FireAndForget {
    fn dispatch(&self, color: Color) {
        let endpoint = Arc::clone(&self.endpoint);
        self.pool.spawn(move || match endpoint.push(color) {
            Ok(()) => log::debug!("posted {}", color),
            Err(e) => log::debug!("post of {} failed: {}", color, e),
        });
    }

    fn command(&self, command: Command) {
        let endpoint = Arc::clone(&self.endpoint);
        self.pool.spawn(move || {
            let result = match command {
                Command::Off => endpoint.off(),
                Command::Mode(mode) => endpoint.mode(mode),
            };
            match result {
                Ok(()) => log::debug!("sent {:?}", command),
                Err(e) => log::debug!("{:?} failed: {}", command, e),
            }
        });
    }
}

/// Reacts to a picker change: refresh the text display, then post.
pub struct ChangeHandler {
    display: Rc<RefCell<String>>,
    dispatcher: Rc<dyn Dispatch>,
}

impl ChangeHandler {
    pub fn new(display: Rc<RefCell<String>>, dispatcher: Rc<dyn Dispatch>) -> Self {
        Self { display, dispatcher }
    }

    pub fn handle(&self, color: Color) {
        *self.display.borrow_mut() = color.rgb_string();
        self.dispatcher.dispatch(color);
    }
}

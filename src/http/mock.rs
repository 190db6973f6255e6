//! Canned, call-counting [`Fetcher`] for tests.

use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use super::{FetchError, FetchFuture, Fetcher, Response};

#[derive(Clone)]
enum Reply {
    Respond(u16, String),
    Fail,
}

/// Serves fixed replies per URL. Unknown URLs get a `404`.
#[derive(Default)]
pub(crate) struct MockFetcher {
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<HashMap<String, usize>>,
    total: AtomicUsize,
}

impl MockFetcher {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer `url` with `status` and `body` from now on.
    pub(crate) fn respond(&self, url: &str, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_owned(), Reply::Respond(status, body.to_owned()));
    }

    /// Answer `url` with a transport failure from now on.
    pub(crate) fn fail(&self, url: &str) {
        self.replies
            .lock()
            .unwrap()
            .insert(url.to_owned(), Reply::Fail);
    }

    /// Hold every request for `url` until the returned handle is notified.
    pub(crate) fn gate(&self, url: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(url.to_owned(), Arc::clone(&notify));
        notify
    }

    /// Number of requests issued for `url`.
    pub(crate) fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Number of requests issued overall.
    pub(crate) fn total_calls(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }
}

impl Fetcher for MockFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> FetchFuture<'a> {
        Box::pin(async move {
            self.total.fetch_add(1, Ordering::SeqCst);
            *self.calls.lock().unwrap().entry(url.to_owned()).or_default() += 1;

            let gate = self.gates.lock().unwrap().get(url).cloned();
            if let Some(gate) = gate {
                gate.notified().await;
            }

            let reply = self.replies.lock().unwrap().get(url).cloned();
            match reply {
                Some(Reply::Respond(status, body)) => Ok(Response::new(status, body)),
                Some(Reply::Fail) => Err(FetchError::Transport {
                    url: url.to_owned(),
                    source: Box::new(io::Error::new(
                        io::ErrorKind::ConnectionRefused,
                        "connection refused",
                    )),
                }),
                None => Ok(Response::new(404, "")),
            }
        })
    }
}

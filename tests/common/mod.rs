// tests/common/mod.rs
//
// In-memory portal: routes keyed by "METHOD /path" (optionally with the
// query), every request recorded, optional hang points for interrupt tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::future::{Future, Pending};
use std::io;
use std::pin::Pin;
use std::rc::Rc;

use tokio::sync::oneshot;
use url::Url;

use launtel_speed::config::options::{Credentials, RunOptions};
use launtel_speed::core::net::{Page, Transport};
use launtel_speed::error::{PortalError, Result};
use launtel_speed::prompt::Prompter;

pub const BASE: &str = "https://portal.test";

pub const LOGIN: &str = include_str!("../fixtures/login.html");
pub const LOGIN_FAILED: &str = include_str!("../fixtures/login_failed.html");
pub const LANDING: &str = include_str!("../fixtures/landing.html");
pub const SERVICES: &str = include_str!("../fixtures/services.html");
pub const MODIFY_SERVICE: &str = include_str!("../fixtures/modify_service.html");
pub const MODIFY_SERVICE_LATEST: &str = include_str!("../fixtures/modify_service_latest.html");
pub const ADVANCED_INFO: &str = include_str!("../fixtures/advanced_info.html");
pub const CONFIRM: &str = include_str!("../fixtures/confirm.html");
pub const CHANGE_IN_PROGRESS: &str = include_str!("../fixtures/change_in_progress.html");
pub const SHAPER_UPDATED: &str = include_str!("../fixtures/shaper_updated.html");
pub const LOGGED_OUT: &str = include_str!("../fixtures/logged_out.html");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub target: String, // path plus query
    pub body: Option<String>,
}

impl Call {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

pub struct FakePortal {
    routes: HashMap<String, String>,
    calls: CallLog,
    hangs: Vec<(String, Option<oneshot::Sender<()>>)>,
}

impl FakePortal {
    /// A portal that walks the happy path for every step.
    pub fn happy() -> Self {
        let mut p = FakePortal { routes: HashMap::new(), calls: CallLog::default(), hangs: Vec::new() };
        p.route("GET /login", LOGIN)
            .route("POST /login", LANDING)
            .route("GET /services", SERVICES)
            .route("GET /service_details", ADVANCED_INFO)
            .route("GET /service", MODIFY_SERVICE)
            .route("GET /service?avcid=AVC000123456789&show_latest=1", MODIFY_SERVICE_LATEST)
            .route("GET /confirm_service", CONFIRM)
            .route("POST /confirm_service", CHANGE_IN_PROGRESS)
            .route("POST /shaper_update", SHAPER_UPDATED)
            .route("GET /logout", LOGGED_OUT);
        p
    }

    pub fn route(&mut self, key: &str, body: &str) -> &mut Self {
        self.routes.insert(key.to_string(), body.to_string());
        self
    }

    /// Never answer `key` ("METHOD /path"); fire the returned receiver when
    /// the request arrives.
    pub fn hang_on(&mut self, key: &str) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        self.hangs.push((key.to_string(), Some(tx)));
        rx
    }

    pub fn calls(&self) -> CallLog {
        Rc::clone(&self.calls)
    }

    async fn handle(&mut self, method: &'static str, url: Url, body: Option<String>) -> Result<Page> {
        let target = match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        };
        self.calls.borrow_mut().push(Call { method, target: target.clone(), body });

        let full = format!("{method} {target}");
        let bare = format!("{method} {}", url.path());
        if let Some((_, tx)) = self.hangs.iter_mut().find(|(k, _)| *k == full || *k == bare) {
            if let Some(tx) = tx.take() {
                let _ = tx.send(());
            }
            std::future::pending::<()>().await;
        }

        let body = self
            .routes
            .get(&full)
            .or_else(|| self.routes.get(&bare))
            .cloned()
            .ok_or_else(|| PortalError::missing(format!("route {full}")))?;
        Ok(Page { url, body })
    }
}

impl Transport for FakePortal {
    async fn get(&mut self, url: Url) -> Result<Page> {
        self.handle("GET", url, None).await
    }

    async fn post_form(&mut self, url: Url, body: String) -> Result<Page> {
        self.handle("POST", url, Some(body)).await
    }

    fn cookie(&self, _url: &Url, name: &str) -> Option<String> {
        (name == "session_id").then(|| "c0ffee".to_string())
    }
}

/// Prompter with canned answers; records what it was asked and told.
#[derive(Default)]
pub struct Scripted {
    pub tty: bool,
    pub answers: VecDeque<String>,
    pub asked: Vec<String>,
    pub said: Vec<String>,
}

impl Scripted {
    pub fn piped() -> Self {
        Self::default()
    }

    pub fn tty(answers: &[&str]) -> Self {
        Self { tty: true, answers: answers.iter().map(|a| a.to_string()).collect(), ..Self::default() }
    }
}

impl Prompter for Scripted {
    fn interactive(&self) -> bool {
        self.tty
    }

    fn say(&mut self, msg: &str) {
        self.said.push(msg.to_string());
    }

    async fn line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    async fn secret(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.line(prompt).await
    }
}

pub fn creds() -> Credentials {
    Credentials { username: "mick".to_string(), password: "secret".to_string() }
}

pub fn options() -> RunOptions {
    RunOptions::new(Url::parse(BASE).unwrap())
}

/// An interrupt source that never fires.
pub fn never() -> impl FnMut() -> Pending<()> {
    std::future::pending::<()>
}

pub type Interrupt = Pin<Box<dyn Future<Output = ()>>>;

/// First interrupt lands when `fired` does; any later one is immediate,
/// like a user pressing Ctrl-C again.
pub fn interrupt_after(fired: oneshot::Receiver<()>) -> impl FnMut() -> Interrupt {
    let mut first = Some(fired);
    move || -> Interrupt {
        match first.take() {
            Some(rx) => Box::pin(async move {
                let _ = rx.await;
            }),
            None => Box::pin(std::future::ready(())),
        }
    }
}

/// First interrupt lands when `fired` does; later ones never come.
pub fn interrupt_once(fired: oneshot::Receiver<()>) -> impl FnMut() -> Interrupt {
    let mut first = Some(fired);
    move || -> Interrupt {
        match first.take() {
            Some(rx) => Box::pin(async move {
                let _ = rx.await;
            }),
            None => Box::pin(std::future::pending()),
        }
    }
}

pub fn count(calls: &CallLog, method: &str, path: &str) -> usize {
    calls.borrow().iter().filter(|c| c.method == method && c.path() == path).count()
}

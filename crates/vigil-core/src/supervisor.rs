//! Top-level supervisor
//!
//! Owns every component and is the only place where they are wired
//! together: the session manager, the content monitor, the cooldown gate,
//! the status aggregator and the persistent stores. All mutable state sits
//! behind one mutex so cross-component updates are atomic; the alert router
//! task is the single consumer of the monitor's event channel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use url::Url;

use vigil_monitor::{AlertEvent, ContentMonitor, SampleError, TextSource};
use vigil_notify::{NotificationCooldown, NotificationSink, StatusAggregator, Summary};
use vigil_rules::RuleSet;
use vigil_sessions::{Session, SessionId, SessionManager};
use vigil_storage::Database;

use crate::config::Config;
use crate::credentials::{Credential, CredentialStore};
use crate::error::CoreError;
use crate::history::{HistoryEntry, HistoryStore};
use crate::renderer::{PageHandle, Renderer};
use crate::Result;

const DEFAULT_RULES_KEY: &str = "default_rules";

/// Everything the mutex protects. Cross-component invariants (monitor and
/// aggregator entries exist only for live sessions) are maintained by
/// mutating these together under one lock.
struct State {
    manager: SessionManager,
    aggregator: StatusAggregator,
    cooldown: NotificationCooldown,
    pages: HashMap<SessionId, Arc<dyn PageHandle>>,
}

/// Adapts a page handle to the monitor's text source contract.
struct PageSource(Arc<dyn PageHandle>);

impl TextSource for PageSource {
    fn current_text(&self) -> BoxFuture<'_, std::result::Result<String, SampleError>> {
        self.0.current_text()
    }
}

pub struct Supervisor {
    config: Config,
    db: Database,
    history: HistoryStore,
    credentials: CredentialStore,
    renderer: Arc<dyn Renderer>,
    sink: Arc<dyn NotificationSink>,
    monitor: ContentMonitor,
    state: Arc<Mutex<State>>,
}

impl Supervisor {
    /// Open (or create) the database at the configured path and build the
    /// supervisor around it.
    pub fn new(
        config: Config,
        renderer: Arc<dyn Renderer>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| CoreError::Config(e.to_string()))?;
            }
        }

        let db = Database::open(&config.database_path)?;
        Self::with_database(config, db, renderer, sink)
    }

    /// Build against an already-open database.
    ///
    /// Must be called from within a tokio runtime: the alert router task is
    /// spawned here.
    pub fn with_database(
        config: Config,
        db: Database,
        renderer: Arc<dyn Renderer>,
        sink: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let template = match db.get_setting(DEFAULT_RULES_KEY)? {
            Some(json) => RuleSet::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "stored default rules unreadable; using built-ins");
                RuleSet::default_template()
            }),
            None => RuleSet::default_template(),
        };

        let (monitor, alerts) =
            ContentMonitor::new(Duration::from_millis(config.sample_timeout_ms));

        let state = Arc::new(Mutex::new(State {
            manager: SessionManager::new(template),
            aggregator: StatusAggregator::new(),
            cooldown: NotificationCooldown::new(config.cooldown_ms),
            pages: HashMap::new(),
        }));

        tokio::spawn(route_alerts(alerts, Arc::clone(&state), Arc::clone(&sink)));

        tracing::info!("Supervisor initialized");

        Ok(Self {
            history: HistoryStore::new(db.clone()),
            credentials: CredentialStore::new(db.clone()),
            config,
            db,
            renderer,
            sink,
            monitor,
            state,
        })
    }

    // === Session lifecycle ===

    /// Open a new session at `address` and make it current.
    ///
    /// The address is normalized (scheme defaulted to http). A missing or
    /// blank alias defaults to "Tab N". The visit is recorded in history
    /// best-effort; a storage failure never fails the open.
    pub fn open(&self, alias: Option<String>, address: &str) -> Result<SessionId> {
        let address = normalize_address(address)?;

        let mut state = self.state.lock();

        let alias = match alias.map(|a| a.trim().to_string()).filter(|a| !a.is_empty()) {
            Some(alias) => alias,
            None => format!("Tab {}", state.manager.len() + 1),
        };

        let mut session = Session::new(
            alias.clone(),
            address.clone(),
            state.manager.template().clone(),
        );
        session.poll_interval_ms = self.config.default_poll_interval_ms;

        let rules = session.rules.clone();
        let interval = session.poll_interval_ms;
        let id = state.manager.open(session);

        let page = self.renderer.create_page(&id, &address);
        state.pages.insert(id.clone(), Arc::clone(&page));
        self.monitor
            .register(id.clone(), rules, interval, Arc::new(PageSource(page)));

        if let Err(e) = self.history.record(&alias, &address) {
            tracing::warn!(error = %e, "failed to record history entry");
        }

        Ok(id)
    }

    /// Make `id` the current session.
    pub fn switch_to(&self, id: &SessionId) -> Result<()> {
        let summary = {
            let mut state = self.state.lock();

            let (status_active, line) = {
                let session = state.manager.switch_to(id)?;
                (session.status_active, session.status_line())
            };

            if status_active {
                state.aggregator.upsert(id.clone(), line);
                Some(state.aggregator.render())
            } else {
                None
            }
        };

        if let Some(summary) = summary {
            self.sink.update_ongoing_summary(&summary);
        }

        Ok(())
    }

    /// Close `id`, disarm its monitor, drop its aggregator entry and
    /// dispose its page. Pinned sessions are rejected with nothing changed.
    pub fn close(&self, id: &SessionId) -> Result<()> {
        let (page, summary) = {
            let mut state = self.state.lock();

            let removed = state.manager.close(id)?;
            self.monitor.remove(id);
            let page = state.pages.remove(id);

            let summary = if removed.status_active {
                state.aggregator.remove(id);
                Some(state.aggregator.render())
            } else {
                None
            };

            (page, summary)
        };

        if let Some(page) = page {
            page.dispose();
        }
        if let Some(summary) = summary {
            self.sink.update_ongoing_summary(&summary);
        }

        Ok(())
    }

    pub fn set_pinned(&self, id: &SessionId, pinned: bool) -> Result<()> {
        Ok(self.state.lock().manager.set_pinned(id, pinned)?)
    }

    /// Add or drop `id` from the aggregated status summary. A no-op
    /// transition does not re-render the summary.
    pub fn set_status_active(&self, id: &SessionId, active: bool) -> Result<()> {
        let summary = {
            let mut state = self.state.lock();

            let previous = state.manager.set_status_active(id, active)?;
            if previous == active {
                None
            } else {
                if active {
                    let line = state.manager.get(id)?.status_line();
                    state.aggregator.upsert(id.clone(), line);
                } else {
                    state.aggregator.remove(id);
                }
                Some(state.aggregator.render())
            }
        };

        if let Some(summary) = summary {
            self.sink.update_ongoing_summary(&summary);
        }

        Ok(())
    }

    /// Rename the label used in notifications, refreshing the summary line
    /// when the session is status-active.
    pub fn set_display_name(&self, id: &SessionId, name: String) -> Result<()> {
        let summary = {
            let mut state = self.state.lock();

            state.manager.set_display_name(id, name)?;
            let (status_active, line) = {
                let session = state.manager.get(id)?;
                (session.status_active, session.status_line())
            };

            if status_active {
                state.aggregator.upsert(id.clone(), line);
                Some(state.aggregator.render())
            } else {
                None
            }
        };

        if let Some(summary) = summary {
            self.sink.update_ongoing_summary(&summary);
        }

        Ok(())
    }

    // === Rules and polling ===

    /// Replace the session's rule set and re-arm its monitor. Takes effect
    /// on the next tick.
    pub fn update_rules(&self, id: &SessionId, rules: RuleSet) -> Result<()> {
        let mut state = self.state.lock();
        state.manager.update_rules(id, rules.clone())?;

        let interval = state.manager.get(id)?.poll_interval_ms;
        self.monitor.rearm(id, rules, interval);

        Ok(())
    }

    pub fn set_poll_interval(&self, id: &SessionId, interval_ms: u64) -> Result<()> {
        let mut state = self.state.lock();
        state.manager.set_poll_interval(id, interval_ms)?;

        let rules = state.manager.get(id)?.rules.clone();
        self.monitor.rearm(id, rules, interval_ms);

        Ok(())
    }

    pub fn add_rule(
        &self,
        id: &SessionId,
        keyword: &str,
        threshold: u32,
        message: &str,
    ) -> Result<()> {
        let mut state = self.state.lock();
        state.manager.add_rule(id, keyword, threshold, message)?;

        let (rules, interval) = {
            let session = state.manager.get(id)?;
            (session.rules.clone(), session.poll_interval_ms)
        };
        self.monitor.rearm(id, rules, interval);

        Ok(())
    }

    pub fn remove_rule(&self, id: &SessionId, index: usize) -> Result<()> {
        let mut state = self.state.lock();
        state.manager.remove_rule(id, index)?;

        let (rules, interval) = {
            let session = state.manager.get(id)?;
            (session.rules.clone(), session.poll_interval_ms)
        };
        self.monitor.rearm(id, rules, interval);

        Ok(())
    }

    /// Replace the default template cloned into future sessions, persisting
    /// it across restarts. Existing sessions keep their own rules.
    pub fn set_default_rules(&self, rules: RuleSet) -> Result<()> {
        let json = rules.to_json()?;
        self.db.set_setting(DEFAULT_RULES_KEY, &json)?;
        self.state.lock().manager.set_template(rules);
        Ok(())
    }

    pub fn default_rules(&self) -> RuleSet {
        self.state.lock().manager.template().clone()
    }

    // === Pages ===

    /// Reload the current session's page. Returns `false` when no session
    /// is open.
    pub fn reload_current(&self) -> bool {
        let page = {
            let state = self.state.lock();
            state
                .manager
                .current_id()
                .and_then(|id| state.pages.get(id).cloned())
        };

        match page {
            Some(page) => {
                page.reload();
                true
            }
            None => false,
        }
    }

    // === Authentication ===

    /// Look up a cached credential for an authentication challenge from
    /// `host`. `None` means the challenge must be cancelled or asked.
    pub fn resolve_auth(&self, host: &str) -> Result<Option<Credential>> {
        self.credentials.get(host)
    }

    pub fn store_credential(&self, host: &str, username: &str, password: &str) -> Result<()> {
        self.credentials.put(host, username, password)
    }

    pub fn forget_credential(&self, host: &str) -> Result<bool> {
        self.credentials.forget(host)
    }

    // === History ===

    pub fn recent_history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        self.history.recent(limit)
    }

    pub fn remove_history(&self, alias: &str, address: &str) -> Result<bool> {
        self.history.remove(alias, address)
    }

    pub fn clear_history(&self) -> Result<()> {
        self.history.clear_all()
    }

    // === Accessors ===

    pub fn status_summary(&self) -> Summary {
        self.state.lock().aggregator.render()
    }

    /// Sessions in display order.
    pub fn sessions(&self) -> Vec<Session> {
        self.state
            .lock()
            .manager
            .ordered()
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn current(&self) -> Option<Session> {
        self.state.lock().manager.current().cloned()
    }

    pub fn get(&self, id: &SessionId) -> Result<Session> {
        Ok(self.state.lock().manager.get(id)?.clone())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

/// Single consumer of the monitor's alert channel.
///
/// Checks liveness (a task cancelled between send and receive can leave a
/// stale event behind), asks the cooldown gate, then delivers outside the
/// lock.
async fn route_alerts(
    mut alerts: mpsc::Receiver<AlertEvent>,
    state: Arc<Mutex<State>>,
    sink: Arc<dyn NotificationSink>,
) {
    while let Some(event) = alerts.recv().await {
        let title = {
            let mut state = state.lock();

            let title = match state.manager.get(&event.session_id) {
                Ok(session) => format!("[{}] alert", session.display_name),
                Err(_) => {
                    tracing::debug!(session_id = %event.session_id, "dropping alert for closed session");
                    continue;
                }
            };

            if state.cooldown.try_fire() {
                Some(title)
            } else {
                None
            }
        };

        if let Some(title) = title {
            tracing::info!(session_id = %event.session_id, message = %event.message, "Alert delivered");
            sink.deliver(&title, &event.message);
        }
    }
}

/// Normalize a user-entered address: trim, default the scheme to http, and
/// reject anything the url parser cannot make sense of.
fn normalize_address(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Address("address cannot be empty".to_string()));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url =
        Url::parse(&candidate).map_err(|e| CoreError::Address(format!("{trimmed}: {e}")))?;

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tokio::time;
    use vigil_sessions::SessionError;

    struct FakePage {
        text: String,
        reloads: AtomicUsize,
        disposed: AtomicBool,
    }

    impl TextSource for FakePage {
        fn current_text(&self) -> BoxFuture<'_, std::result::Result<String, SampleError>> {
            let text = self.text.clone();
            Box::pin(async move { Ok(text) })
        }
    }

    impl PageHandle for FakePage {
        fn load(&self, _address: &str) {}

        fn reload(&self) {
            self.reloads.fetch_add(1, Ordering::SeqCst);
        }

        fn dispose(&self) {
            self.disposed.store(true, Ordering::SeqCst);
        }
    }

    struct FakeRenderer {
        text: String,
        pages: Mutex<Vec<Arc<FakePage>>>,
    }

    impl FakeRenderer {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                pages: Mutex::new(Vec::new()),
            }
        }
    }

    impl Renderer for FakeRenderer {
        fn create_page(&self, _id: &SessionId, _address: &str) -> Arc<dyn PageHandle> {
            let page = Arc::new(FakePage {
                text: self.text.clone(),
                reloads: AtomicUsize::new(0),
                disposed: AtomicBool::new(false),
            });
            self.pages.lock().push(Arc::clone(&page));
            page
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        deliveries: Mutex<Vec<(String, String)>>,
        summaries: Mutex<Vec<Summary>>,
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, title: &str, body: &str) {
            self.deliveries
                .lock()
                .push((title.to_string(), body.to_string()));
        }

        fn update_ongoing_summary(&self, summary: &Summary) {
            self.summaries.lock().push(summary.clone());
        }
    }

    fn test_supervisor(text: &str) -> (Supervisor, Arc<FakeRenderer>, Arc<RecordingSink>) {
        let config = Config {
            database_path: PathBuf::from(":memory:"),
            default_poll_interval_ms: 1_000,
            cooldown_ms: 60_000,
            sample_timeout_ms: 5_000,
        };
        let db = Database::open_in_memory().unwrap();
        let renderer = Arc::new(FakeRenderer::new(text));
        let sink = Arc::new(RecordingSink::default());

        let supervisor = Supervisor::with_database(
            config,
            db,
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        )
        .unwrap();

        (supervisor, renderer, sink)
    }

    async fn wait_until(mut check: impl FnMut() -> bool) {
        for _ in 0..100 {
            if check() {
                return;
            }
            time::sleep(Duration::from_millis(100)).await;
        }
        panic!("condition never became true");
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(
            normalize_address("example.com").unwrap(),
            "http://example.com/"
        );
        assert_eq!(
            normalize_address("  example.com:8080 ").unwrap(),
            "http://example.com:8080/"
        );
        assert_eq!(
            normalize_address("https://example.com/path").unwrap(),
            "https://example.com/path"
        );
        assert!(matches!(
            normalize_address("   "),
            Err(CoreError::Address(_))
        ));
    }

    #[tokio::test]
    async fn test_open_defaults_alias_and_records_history() {
        let (supervisor, _renderer, _sink) = test_supervisor("quiet");

        let id = supervisor.open(None, "example.com").unwrap();
        let session = supervisor.get(&id).unwrap();
        assert_eq!(session.alias, "Tab 1");
        assert_eq!(session.address, "http://example.com/");
        assert_eq!(supervisor.current().unwrap().id, id);

        let history = supervisor.recent_history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].alias, "Tab 1");
        assert_eq!(history[0].address, "http://example.com/");
    }

    #[tokio::test]
    async fn test_close_disposes_page_and_selects_preceding() {
        let (supervisor, renderer, _sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        let b = supervisor.open(Some("b".to_string()), "b.example").unwrap();

        supervisor.close(&b).unwrap();

        assert_eq!(supervisor.current().unwrap().id, a);
        assert!(renderer.pages.lock()[1].disposed.load(Ordering::SeqCst));
        assert!(!renderer.pages.lock()[0].disposed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_close_pinned_is_rejected() {
        let (supervisor, renderer, _sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        supervisor.set_pinned(&a, true).unwrap();

        let err = supervisor.close(&a).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Session(SessionError::Pinned(_))
        ));
        assert_eq!(supervisor.sessions().len(), 1);
        assert!(!renderer.pages.lock()[0].disposed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_status_active_drives_summary() {
        let (supervisor, _renderer, sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        supervisor.set_status_active(&a, true).unwrap();

        let summary = sink.summaries.lock().last().cloned().unwrap();
        assert_eq!(summary.title, "running");
        assert_eq!(summary.lines, vec!["a: running"]);

        // Repeating the same value must not re-render.
        let rendered = sink.summaries.lock().len();
        supervisor.set_status_active(&a, true).unwrap();
        assert_eq!(sink.summaries.lock().len(), rendered);

        supervisor.set_status_active(&a, false).unwrap();
        let summary = sink.summaries.lock().last().cloned().unwrap();
        assert_eq!(summary.title, "idle");
        assert!(summary.lines.is_empty());
    }

    #[tokio::test]
    async fn test_rename_refreshes_active_summary_line() {
        let (supervisor, _renderer, sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        supervisor.set_status_active(&a, true).unwrap();
        supervisor
            .set_display_name(&a, "build box".to_string())
            .unwrap();

        let summary = sink.summaries.lock().last().cloned().unwrap();
        assert_eq!(summary.lines, vec!["build box: running"]);
    }

    #[tokio::test]
    async fn test_close_removes_summary_entry() {
        let (supervisor, _renderer, sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        supervisor.set_status_active(&a, true).unwrap();
        supervisor.close(&a).unwrap();

        let summary = sink.summaries.lock().last().cloned().unwrap();
        assert_eq!(summary.title, "idle");
        assert_eq!(supervisor.status_summary().count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_alert_delivered_with_display_name_title() {
        let (supervisor, _renderer, sink) = test_supervisor("Error\nError\nError");

        supervisor.open(Some("ci".to_string()), "ci.example").unwrap();

        wait_until(|| !sink.deliveries.lock().is_empty()).await;

        let (title, body) = sink.deliveries.lock()[0].clone();
        assert_eq!(title, "[ci] alert");
        assert_eq!(body, "repeated errors detected (Error x3)");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cooldown_collapses_alert_burst() {
        let (supervisor, _renderer, sink) = test_supervisor("Error\nError\nError");

        supervisor.open(Some("a".to_string()), "a.example").unwrap();
        supervisor.open(Some("b".to_string()), "b.example").unwrap();

        wait_until(|| !sink.deliveries.lock().is_empty()).await;

        // Both sessions keep matching every second, but the gate uses the
        // wall clock and the whole test runs well inside one window.
        time::sleep(Duration::from_secs(10)).await;
        assert_eq!(sink.deliveries.lock().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_session_stops_alerting() {
        let (supervisor, _renderer, sink) = test_supervisor("Error\nError\nError");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        wait_until(|| !sink.deliveries.lock().is_empty()).await;

        supervisor.close(&a).unwrap();
        let delivered = sink.deliveries.lock().len();

        time::sleep(Duration::from_secs(120)).await;
        assert_eq!(sink.deliveries.lock().len(), delivered);
    }

    #[tokio::test]
    async fn test_default_rules_persist_across_restart() {
        let config = Config {
            database_path: PathBuf::from(":memory:"),
            default_poll_interval_ms: 1_000,
            cooldown_ms: 60_000,
            sample_timeout_ms: 5_000,
        };
        let db = Database::open_in_memory().unwrap();
        let renderer = Arc::new(FakeRenderer::new("quiet"));
        let sink = Arc::new(RecordingSink::default());

        let first = Supervisor::with_database(
            config.clone(),
            db.clone(),
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        )
        .unwrap();

        let mut rules = RuleSet::new();
        rules.add("panic", 1, "panicked").unwrap();
        first.set_default_rules(rules).unwrap();
        drop(first);

        let second = Supervisor::with_database(
            config,
            db,
            Arc::clone(&renderer) as Arc<dyn Renderer>,
            sink as Arc<dyn NotificationSink>,
        )
        .unwrap();

        let template = second.default_rules();
        assert_eq!(template.len(), 1);
        assert_eq!(template.rules()[0].keyword, "panic");

        // New sessions clone the restored template.
        let id = second.open(None, "example.com").unwrap();
        assert_eq!(second.get(&id).unwrap().rules.len(), 1);
    }

    #[tokio::test]
    async fn test_new_creates_data_dir_and_reopens_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::new(dir.path().join("nested"));

        let supervisor = Supervisor::new(
            config.clone(),
            Arc::new(FakeRenderer::new("quiet")) as Arc<dyn Renderer>,
            Arc::new(RecordingSink::default()) as Arc<dyn NotificationSink>,
        )
        .unwrap();
        supervisor.open(Some("a".to_string()), "a.example").unwrap();
        drop(supervisor);

        assert!(config.database_path.exists());

        // History written by the first instance survives the restart.
        let reopened = Supervisor::new(
            config,
            Arc::new(FakeRenderer::new("quiet")) as Arc<dyn Renderer>,
            Arc::new(RecordingSink::default()) as Arc<dyn NotificationSink>,
        )
        .unwrap();
        let history = reopened.recent_history(10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].alias, "a");
    }

    #[tokio::test]
    async fn test_reload_current() {
        let (supervisor, renderer, _sink) = test_supervisor("quiet");

        assert!(!supervisor.reload_current());

        supervisor.open(Some("a".to_string()), "a.example").unwrap();
        assert!(supervisor.reload_current());
        assert_eq!(renderer.pages.lock()[0].reloads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_auth_round_trip() {
        let (supervisor, _renderer, _sink) = test_supervisor("quiet");

        assert!(supervisor.resolve_auth("example.com").unwrap().is_none());

        supervisor
            .store_credential("example.com", "alice", "s3cret")
            .unwrap();
        let credential = supervisor.resolve_auth("example.com").unwrap().unwrap();
        assert_eq!(credential.username, "alice");

        assert!(supervisor.forget_credential("example.com").unwrap());
        assert!(supervisor.resolve_auth("example.com").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rule_edits_rearm_only_that_session() {
        let (supervisor, _renderer, _sink) = test_supervisor("quiet");

        let a = supervisor.open(Some("a".to_string()), "a.example").unwrap();
        let b = supervisor.open(Some("b".to_string()), "b.example").unwrap();

        supervisor.add_rule(&a, "panic", 1, "").unwrap();
        assert_eq!(supervisor.get(&a).unwrap().rules.len(), 5);
        assert_eq!(supervisor.get(&b).unwrap().rules.len(), 4);

        supervisor.remove_rule(&a, 4).unwrap();
        assert_eq!(supervisor.get(&a).unwrap().rules.len(), 4);
    }
}

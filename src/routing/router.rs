//! Navigation controller.
//!
//! # Responsibilities
//! - Resolve a path to rendered content through the route table
//! - Enforce guards before anything is shown
//! - Run before/after hooks and report failures to the error hook
//! - Keep the sink in a whole state: previous page, loading placeholder,
//!   new page or error panel, never a mix
//!
//! # Design Decisions
//! - `navigate` never fails; every per-attempt failure becomes sink state
//! - Route table is swapped copy-on-write, so lookups take no lock
//! - Each attempt entering `Loading` takes a generation number; a resolution
//!   overtaken by a newer generation is discarded when `discard_stale` is set
//! - Providers are not cancelled by later navigations

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwap;
use futures_util::FutureExt;
use tokio::sync::broadcast;
use tracing::Instrument;

use crate::config::{RenderingConfig, RouterSettings};
use crate::error::{ConfigurationError, HookError, HookStage, NavigationError};
use crate::history::History;
use crate::lifecycle::SessionState;
use crate::observability::metrics;
use crate::pages::{self, Page};
use crate::resilience::RenderPolicy;
use crate::routing::address::{normalize_path, AddressCodec};
use crate::routing::hooks::{ErrorHook, ErrorReport, Hooks, NavigationHook, Severity};
use crate::routing::navigation::{Attempt, NavigationOutcome, NavigationStatus, Phase};
use crate::routing::table::{Lookup, RouteTable};
use crate::routing::RouteEntry;
use crate::sink::ContentSink;

/// Content obtained for an attempt.
struct Resolved {
    content: String,
    fallback: bool,
}

/// Client-side navigation controller.
pub struct Router {
    table: ArcSwap<RouteTable>,
    history: Arc<dyn History>,
    sink: Arc<dyn ContentSink>,
    session: Arc<SessionState>,
    hooks: Hooks,
    settings: RouterSettings,
    render_policy: RenderPolicy,
    addresses: AddressCodec,
    generation: AtomicU64,
}

impl Router {
    pub fn builder(history: Arc<dyn History>, sink: Arc<dyn ContentSink>) -> RouterBuilder {
        RouterBuilder::new(history, sink)
    }

    /// Push the address of `path` as a new history entry and show its content.
    pub async fn navigate(&self, path: &str) -> NavigationOutcome {
        let path = self.target(path);
        self.history.push(&self.addresses.address_for(path));
        self.update_content(path).await
    }

    /// React to a back/forward move: re-derive the path from the current
    /// address and run the same cycle, guards included.
    pub async fn handle_popstate(&self) -> NavigationOutcome {
        let path = self.current_path();
        tracing::debug!(path = %path, "History moved");
        self.update_content(&path).await
    }

    /// Show the path of the current address again without touching history.
    /// This is the error panel's recovery action, so it follows the address
    /// even when the last swap failed.
    pub async fn reload(&self) -> NavigationOutcome {
        let path = self.current_path();
        let reloads = self.session.record_reload();
        tracing::info!(path = %path, reloads, "Reloading");
        self.update_content(&path).await
    }

    /// Handle history notifications until `shutdown` fires.
    pub async fn listen(&self, mut shutdown: broadcast::Receiver<()>) {
        let mut moves = self.history.subscribe();
        tracing::info!("Listening for history changes");
        loop {
            tokio::select! {
                moved = moves.recv() => match moved {
                    Ok(()) => {
                        self.handle_popstate().await;
                    }
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // only the latest address matters
                        tracing::debug!(skipped, "History notifications coalesced");
                        self.handle_popstate().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                _ = shutdown.recv() => break,
            }
        }
        tracing::info!("History listener stopped");
    }

    /// Run one navigation cycle for `path`. Never fails; see the module docs
    /// for the sequence of phases.
    pub async fn update_content(&self, path: &str) -> NavigationOutcome {
        let path = self.target(path);
        let attempt = Attempt::new(path);
        let span = tracing::info_span!(
            "navigation",
            navigation_id = %attempt.id(),
            path = %path,
            generation = tracing::field::Empty,
        );
        let outcome = self.run_cycle(attempt).instrument(span).await;
        metrics::record_navigation(outcome.status);
        outcome
    }

    async fn run_cycle(&self, mut attempt: Attempt) -> NavigationOutcome {
        let path = attempt.path().to_string();

        attempt.advance(Phase::GuardCheck);
        let lookup = self.lookup(&path);
        if !self.evaluate_guards(&path, lookup.entry()).await {
            attempt.advance(Phase::Denied);
            tracing::warn!("Navigation denied by guard");
            metrics::record_guard_denial(lookup.entry().path());
            self.report(
                Severity::Warning,
                NavigationError::GuardDenied { path: path.clone() },
            );
            return attempt.finish(NavigationStatus::Denied);
        }

        attempt.advance(Phase::BeforeHook);
        if let Some(hook) = &self.hooks.before {
            self.run_hook(HookStage::Before, hook.as_ref(), &path).await;
        }

        attempt.advance(Phase::Loading);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::Span::current().record("generation", generation);
        if let Err(source) = self.sink.replace(&self.settings.loading_html) {
            return self.fail(attempt, NavigationError::Sink { path, source });
        }

        attempt.advance(Phase::Resolving);
        let resolved = self.resolve(&path, &lookup).await;

        if self.is_stale(generation) {
            let latest = self.generation.load(Ordering::SeqCst);
            match resolved {
                Ok(_) => tracing::debug!(latest, "Discarding content of overtaken navigation"),
                Err(error) => {
                    // not displayed, still reported
                    tracing::warn!(latest, error = %error, "Overtaken navigation failed");
                    self.report(Severity::Warning, error);
                }
            }
            return attempt.finish(NavigationStatus::Superseded);
        }

        let resolved = match resolved {
            Ok(resolved) => resolved,
            Err(error) => return self.fail(attempt, error),
        };
        if let Err(source) = self.sink.replace(&resolved.content) {
            return self.fail(attempt, NavigationError::Sink { path, source });
        }

        attempt.advance(Phase::Success);
        let navigations = self.session.record_swap(&path);
        tracing::info!(navigations, fallback = resolved.fallback, "Navigation complete");

        attempt.advance(Phase::AfterHook);
        if let Some(hook) = &self.hooks.after {
            self.run_hook(HookStage::After, hook.as_ref(), &path).await;
        }

        let status = if resolved.fallback {
            NavigationStatus::NotFound
        } else {
            NavigationStatus::Rendered
        };
        attempt.finish(status)
    }

    /// Content for `path`: the route's, the not-found route's on a miss, or
    /// the error panel if the provider fails (the failure goes to the error
    /// hook).
    pub async fn resolve_content(&self, path: &str) -> String {
        let path = self.target(path);
        match self.resolve(path, &self.lookup(path)).await {
            Ok(resolved) => resolved.content,
            Err(error) => {
                self.report(Severity::Error, error);
                self.settings.error_html.clone()
            }
        }
    }

    async fn resolve(&self, path: &str, lookup: &Lookup) -> Result<Resolved, NavigationError> {
        let entry = lookup.entry();
        if lookup.is_fallback() {
            tracing::debug!(fallback = %entry.path(), "No route registered, using fallback");
        }

        let started = Instant::now();
        let rendered = self.render_policy.render(entry.provider()).await;
        metrics::record_render(started, rendered.is_ok());

        match rendered {
            Ok(content) => Ok(Resolved {
                content,
                fallback: lookup.is_fallback(),
            }),
            Err(source) => Err(NavigationError::Content {
                path: path.to_string(),
                source,
            }),
        }
    }

    /// True iff every guard of the route `path` resolves to allows it.
    pub async fn run_guards(&self, path: &str) -> bool {
        let path = self.target(path);
        self.evaluate_guards(path, self.lookup(path).entry()).await
    }

    async fn evaluate_guards(&self, path: &str, entry: &RouteEntry) -> bool {
        for (index, guard) in entry.guards().iter().enumerate() {
            let verdict = AssertUnwindSafe(guard.check(path, entry.config()))
                .catch_unwind()
                .await;
            match verdict {
                Ok(true) => {}
                Ok(false) => {
                    tracing::debug!(guard = index, "Guard denied");
                    return false;
                }
                Err(payload) => {
                    tracing::error!(
                        guard = index,
                        panic = %crate::error::panic_message(payload.as_ref()),
                        "Guard panicked, treating as denial"
                    );
                    return false;
                }
            }
        }
        true
    }

    /// Add or replace a route at runtime. The last registration for a path
    /// wins. Paths are stored without leading or trailing slashes.
    pub fn register_route(&self, entry: RouteEntry) -> Result<(), ConfigurationError> {
        if entry.path().is_empty() {
            return Err(ConfigurationError::EmptyPath);
        }
        let entry = Arc::new(entry);
        let previous = self.table.rcu(|table| {
            let mut next = RouteTable::clone(table);
            next.insert(entry.clone());
            next
        });

        let path = entry.path();
        if previous.contains(path) {
            tracing::info!(path, "Route replaced");
        } else {
            tracing::info!(path, "Route registered");
        }
        metrics::record_route_count(self.table.load().len());
        Ok(())
    }

    /// Register every path of `page`.
    pub fn register_page(&self, page: Arc<dyn Page>) -> Result<(), ConfigurationError> {
        for entry in pages::entries_for(page) {
            self.register_route(entry)?;
        }
        Ok(())
    }

    /// The entry `path` resolves to (the not-found entry on a miss). Does not
    /// navigate.
    pub fn get_route_config(&self, path: &str) -> Arc<RouteEntry> {
        self.lookup(self.target(path)).into_entry()
    }

    /// Route path encoded in the address the history currently shows.
    pub fn current_path(&self) -> String {
        self.addresses.path_from(&self.history.current_address())
    }

    /// Registered paths in order.
    pub fn routes(&self) -> Vec<String> {
        self.table.load().paths().map(str::to_string).collect()
    }

    pub fn address_for(&self, path: &str) -> String {
        self.addresses.address_for(path)
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Table key for a requested path; no path means the default route.
    fn target<'a>(&'a self, path: &'a str) -> &'a str {
        match normalize_path(path) {
            "" => self.settings.default_path.as_str(),
            p => p,
        }
    }

    fn lookup(&self, path: &str) -> Lookup {
        self.table.load().lookup(path)
    }

    fn is_stale(&self, generation: u64) -> bool {
        self.settings.discard_stale && self.generation.load(Ordering::SeqCst) != generation
    }

    fn fail(&self, mut attempt: Attempt, error: NavigationError) -> NavigationOutcome {
        attempt.advance(Phase::Failure);
        tracing::error!(error = %error, "Navigation failed");

        if let Err(e) = self.sink.replace(&self.settings.error_html) {
            tracing::error!(error = %e, "Could not display error panel");
        }
        attempt.advance(Phase::ErrorDisplay);

        self.report(Severity::Error, error);
        attempt.finish(NavigationStatus::Failed)
    }

    async fn run_hook(&self, stage: HookStage, hook: &dyn NavigationHook, path: &str) {
        let result = AssertUnwindSafe(hook.call(path)).catch_unwind().await;
        let source = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e,
            Err(payload) => HookError::panicked(payload.as_ref()),
        };
        tracing::warn!(hook = %stage, error = %source, "Navigation hook failed");
        metrics::record_hook_failure(stage);
        self.report(
            Severity::Warning,
            NavigationError::Hook {
                path: path.to_string(),
                stage,
                source,
            },
        );
    }

    fn report(&self, severity: Severity, error: NavigationError) {
        let Some(hook) = &self.hooks.on_error else {
            return;
        };
        let report = ErrorReport {
            path: error.path().to_string(),
            severity,
            error,
        };
        if std::panic::catch_unwind(AssertUnwindSafe(|| hook.report(&report))).is_err() {
            tracing::error!(path = %report.path, "Error hook panicked");
        }
    }
}

/// Builder for [`Router`].
pub struct RouterBuilder {
    history: Arc<dyn History>,
    sink: Arc<dyn ContentSink>,
    session: Option<Arc<SessionState>>,
    settings: RouterSettings,
    rendering: RenderingConfig,
    hooks: Hooks,
    entries: Vec<RouteEntry>,
}

impl RouterBuilder {
    pub fn new(history: Arc<dyn History>, sink: Arc<dyn ContentSink>) -> Self {
        Self {
            history,
            sink,
            session: None,
            settings: RouterSettings::default(),
            rendering: RenderingConfig::default(),
            hooks: Hooks::default(),
            entries: Vec::new(),
        }
    }

    pub fn settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn rendering(mut self, rendering: RenderingConfig) -> Self {
        self.rendering = rendering;
        self
    }

    /// Share an existing session; a fresh one is created otherwise.
    pub fn session(mut self, session: Arc<SessionState>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn route(mut self, entry: RouteEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn page(mut self, page: Arc<dyn Page>) -> Self {
        self.entries.extend(pages::entries_for(page));
        self
    }

    pub fn before_navigate(mut self, hook: impl NavigationHook + 'static) -> Self {
        self.hooks.before = Some(Arc::new(hook));
        self
    }

    pub fn after_navigate(mut self, hook: impl NavigationHook + 'static) -> Self {
        self.hooks.after = Some(Arc::new(hook));
        self
    }

    pub fn on_error(mut self, hook: impl ErrorHook + 'static) -> Self {
        self.hooks.on_error = Some(Arc::new(hook));
        self
    }

    /// Fails if a route path is empty or the not-found route is missing.
    pub fn build(self) -> Result<Router, ConfigurationError> {
        let table = RouteTable::from_entries(&self.settings.not_found_path, self.entries)?;
        tracing::debug!(
            routes = table.len(),
            not_found = %self.settings.not_found_path,
            "Route table built"
        );
        metrics::record_route_count(table.len());

        Ok(Router {
            table: ArcSwap::from_pointee(table),
            history: self.history,
            sink: self.sink,
            session: self.session.unwrap_or_default(),
            hooks: self.hooks,
            addresses: AddressCodec::from_settings(&self.settings),
            render_policy: RenderPolicy::from_config(&self.rendering),
            settings: self.settings,
            generation: AtomicU64::new(0),
        })
    }
}

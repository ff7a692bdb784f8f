//! The navigation context.
//!
//! The context is the single owner of navigation state: the frozen route
//! table, the session history, and the currently active route. It is an
//! explicit object the application passes to whatever needs it, never an
//! ambient global, which keeps every operation here testable with a
//! [`MemoryHistory`] and a toy table.
//!
//! All operations are synchronous and single-threaded: navigation is
//! driven by UI events (link clicks, back/forward, programmatic pushes)
//! and is never concurrent with itself.

use octothorpe::{Location, Params, ResolvedTarget, RouteTable, UrlError};

use crate::error::NavigationError;
use crate::history::{History, MemoryHistory};
use crate::mode::HistoryMode;
use crate::NavConfig;

const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Where a navigation is asked to go: a raw location string, or a named
/// route with parameters (the URL is generated from the route's pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationTarget {
    Path(String),
    Named {
        name: String,
        params: Vec<(String, String)>,
    },
}

impl NavigationTarget {
    /// Target a named route, e.g. `NavigationTarget::named("chat",
    /// &[("character_id", "42")])`.
    pub fn named(name: impl Into<String>, params: &[(&str, &str)]) -> Self {
        NavigationTarget::Named {
            name: name.into(),
            params: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(path: &str) -> Self {
        NavigationTarget::Path(path.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(path: String) -> Self {
        NavigationTarget::Path(path)
    }
}

/// The route a view is currently mounted for.
///
/// `params` is the full capture map, queryable by any code holding the
/// context; `props` is what the view received as direct inputs on mount:
/// equal to `params` for props-mode routes, empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveRoute<V> {
    name: String,
    view: V,
    params: Params,
    props: Params,
    location: Location,
}

impl<V> ActiveRoute<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn props(&self) -> &Params {
        &self.props
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Delivered to subscribers after every committed navigation: the route
/// whose view is being unmounted (absent on the first navigation) and the
/// route whose view is being mounted.
#[derive(Debug, Clone)]
pub struct NavigationEvent<V> {
    pub from: Option<ActiveRoute<V>>,
    pub to: ActiveRoute<V>,
}

/// How a successful navigation is recorded in the history.
enum Commit {
    Push,
    Replace,
    /// History already points at the entry (back/forward traversal).
    None,
}

/// Owner of the process-wide navigation state.
///
/// # Examples
///
/// ```
/// use octothorpe::{Route, RouteTable};
/// use octothorpe_nav::NavigationContext;
///
/// let table = RouteTable::builder()
///     .route(Route::new("home", "/", "CharacterListView"))
///     .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
///     .build()
///     .unwrap();
///
/// let mut nav = NavigationContext::in_memory(table);
/// nav.push("/").unwrap();
/// nav.push("/chat/42").unwrap();
///
/// let current = nav.current().unwrap();
/// assert_eq!(current.view(), &"ChatView");
/// assert_eq!(current.props().get("character_id"), Some("42"));
///
/// nav.back().unwrap();
/// assert_eq!(nav.current().unwrap().name(), "home");
/// ```
pub struct NavigationContext<V, H = MemoryHistory> {
    table: RouteTable<V>,
    history: H,
    mode: HistoryMode,
    current: Option<ActiveRoute<V>>,
    subscribers: Vec<Box<dyn Fn(&NavigationEvent<V>)>>,
    max_redirects: usize,
}

impl<V> NavigationContext<V, MemoryHistory> {
    /// A context over an in-memory history, for tests and server-side use.
    pub fn in_memory(table: RouteTable<V>) -> Self {
        Self::new(table, MemoryHistory::new())
    }
}

impl<V, H> NavigationContext<V, H> {
    pub fn new(table: RouteTable<V>, history: H) -> Self {
        Self {
            table,
            history,
            mode: HistoryMode::web(""),
            current: None,
            subscribers: Vec::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Applies the history mode and redirect bound from a [`NavConfig`].
    pub fn from_config(table: RouteTable<V>, history: H, config: &NavConfig) -> Self {
        Self::new(table, history)
            .with_mode(config.history_mode())
            .with_max_redirects(config.routing.max_redirects)
    }

    pub fn with_mode(mut self, mode: HistoryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn mode(&self) -> &HistoryMode {
        &self.mode
    }

    /// The currently active route, if any navigation has committed yet.
    pub fn current(&self) -> Option<&ActiveRoute<V>> {
        self.current.as_ref()
    }

    /// Registers a mount/unmount observer. Subscribers run synchronously,
    /// in registration order, after the navigation state is updated.
    pub fn subscribe(&mut self, subscriber: impl Fn(&NavigationEvent<V>) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Generates the app-internal path for a named route.
    pub fn url_for<'a, I>(&self, name: &str, params: I) -> Result<String, UrlError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        self.table.url_for(name, params)
    }

    /// The browser-facing href for a target, through the history mode
    /// (base path in web mode, `#`-prefixed in hash mode).
    pub fn href(&self, target: impl Into<NavigationTarget>) -> Result<String, NavigationError> {
        let location = self.location_of(&target.into())?;
        Ok(self.mode.href(&location))
    }

    fn location_of(&self, target: &NavigationTarget) -> Result<String, NavigationError> {
        match target {
            NavigationTarget::Path(path) => Ok(path.clone()),
            NavigationTarget::Named { name, params } => {
                let pairs = params.iter().map(|(k, v)| (k.as_str(), v.as_str()));
                Ok(self.table.url_for(name, pairs)?)
            }
        }
    }
}

impl<V: Clone, H: History> NavigationContext<V, H> {
    /// Navigates to a target and records a new history entry.
    pub fn push(&mut self, target: impl Into<NavigationTarget>) -> Result<(), NavigationError> {
        self.navigate_to(target.into(), Commit::Push)
    }

    /// Navigates to a target, replacing the current history entry.
    pub fn replace(&mut self, target: impl Into<NavigationTarget>) -> Result<(), NavigationError> {
        self.navigate_to(target.into(), Commit::Replace)
    }

    /// Re-activates the previous history entry. Returns `Ok(false)` when
    /// already at the oldest entry.
    pub fn back(&mut self) -> Result<bool, NavigationError> {
        let Some(location) = self.history.back() else {
            return Ok(false);
        };
        let location = location.to_string();
        // Entries resolved when they were committed and the table is
        // immutable, so re-resolution cannot newly fail.
        self.navigate_to(NavigationTarget::Path(location), Commit::None)?;
        Ok(true)
    }

    /// Re-activates the next history entry. Returns `Ok(false)` when
    /// already at the newest entry.
    pub fn forward(&mut self) -> Result<bool, NavigationError> {
        let Some(location) = self.history.forward() else {
            return Ok(false);
        };
        let location = location.to_string();
        self.navigate_to(NavigationTarget::Path(location), Commit::None)?;
        Ok(true)
    }

    /// Feeds a browser-visible location into the context: the initial
    /// document URL, or a popstate/hashchange event. The entry under the
    /// history cursor is replaced, since the browser already moved.
    pub fn handle_browser_location(&mut self, browser: &str) -> Result<(), NavigationError> {
        let app = self
            .mode
            .app_location(browser)
            .ok_or_else(|| NavigationError::OutsideBase(browser.to_string()))?;
        self.navigate_to(NavigationTarget::Path(app), Commit::Replace)
    }

    fn navigate_to(
        &mut self,
        target: NavigationTarget,
        commit: Commit,
    ) -> Result<(), NavigationError> {
        let origin = self.location_of(&target)?;
        let mut location = origin.clone();
        let mut hops = 0usize;

        let next = loop {
            let matched = self.table.resolve(&location)?;
            match matched.target() {
                ResolvedTarget::Redirect(redirected) => {
                    hops += 1;
                    if hops > self.max_redirects {
                        return Err(NavigationError::RedirectLoop {
                            from: origin,
                            limit: self.max_redirects,
                        });
                    }
                    tracing::debug!(from = %location, to = %redirected, "following redirect");
                    location = redirected;
                }
                ResolvedTarget::View(view) => {
                    break ActiveRoute {
                        name: matched.route().name().to_string(),
                        view: view.clone(),
                        params: matched.params().clone(),
                        props: matched.props(),
                        location: matched.location().clone(),
                    };
                }
            }
        };

        let entry = next.location.to_string();
        match commit {
            Commit::Push => self.history.push(&entry),
            Commit::Replace => self.history.replace(&entry),
            Commit::None => {}
        }

        tracing::info!(
            route = next.name.as_str(),
            path = next.location.path(),
            "navigated"
        );

        let event = NavigationEvent {
            from: self.current.take(),
            to: next.clone(),
        };
        self.current = Some(next);

        for subscriber in &self.subscribers {
            subscriber(&event);
        }

        Ok(())
    }
}

//! Route declarations.
//!
//! A [`Route`] is the declarative unit of the table: a URL pattern, a unique
//! name, and the view handle (or redirect target) it maps to. Declarations
//! are plain data; compilation and validation happen when the table is
//! built, so a route list reads like configuration.

use crate::params::Params;

/// What a route maps to once matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteTarget<V> {
    /// Mount this view.
    View(V),
    /// Navigate again to the target location (captured parameters are
    /// substituted into `:name` / `*name` placeholders).
    Redirect(String),
}

/// A declarative mapping from a URL path pattern to a view.
///
/// The view type `V` is opaque to the router: a component reference, an
/// enum of screens, a label, whatever the surrounding application mounts.
///
/// # Examples
///
/// ```
/// use octothorpe::Route;
///
/// let home = Route::new("home", "/", "CharacterListView");
/// let chat = Route::new("chat", "/chat/:character_id", "ChatView").with_props();
/// let legacy = Route::<&str>::redirect("legacy-chat", "/talk/:character_id", "/chat/:character_id");
///
/// assert_eq!(chat.name(), "chat");
/// assert!(chat.passes_props());
/// assert!(legacy.is_redirect());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route<V> {
    name: String,
    path: String,
    target: RouteTarget<V>,
    props: bool,
}

impl<V> Route<V> {
    /// Declares a route mapping `path` to `view`.
    pub fn new(name: impl Into<String>, path: impl Into<String>, view: V) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            target: RouteTarget::View(view),
            props: false,
        }
    }

    /// Declares a redirect: matching `path` re-enters resolution at
    /// `target`, with captured parameters substituted.
    pub fn redirect(
        name: impl Into<String>,
        path: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            target: RouteTarget::Redirect(target.into()),
            props: false,
        }
    }

    /// Forwards captured parameters to the view as its direct inputs on
    /// mount. Without this, the view reads navigation state itself.
    pub fn with_props(mut self) -> Self {
        self.props = true;
        self
    }

    /// The unique route name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pattern string as declared.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared target: view or redirect.
    pub fn target(&self) -> &RouteTarget<V> {
        &self.target
    }

    /// The view handle, or `None` for redirect routes.
    pub fn view(&self) -> Option<&V> {
        match &self.target {
            RouteTarget::View(view) => Some(view),
            RouteTarget::Redirect(_) => None,
        }
    }

    /// The redirect target as declared, or `None` for view routes.
    pub fn redirect_to(&self) -> Option<&str> {
        match &self.target {
            RouteTarget::View(_) => None,
            RouteTarget::Redirect(target) => Some(target),
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.target, RouteTarget::Redirect(_))
    }

    pub fn passes_props(&self) -> bool {
        self.props
    }
}

/// Substitutes captured parameters into a redirect target.
///
/// Only the path part is rewritten; a `?query` or `#fragment` the target
/// carries is left as-is. Placeholder segments (`:name`, `*name`) take the
/// captured value; the table guarantees at build time that every
/// placeholder is bound.
pub(crate) fn substitute_target(target: &str, params: &Params) -> String {
    let (path_part, suffix) = match target.find(['?', '#']) {
        Some(i) => (&target[..i], &target[i..]),
        None => (target, ""),
    };

    let pieces: Vec<String> = path_part
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|segment| {
            segment
                .strip_prefix(':')
                .or_else(|| segment.strip_prefix('*'))
                .and_then(|name| params.get(name))
                .map(str::to_string)
                .unwrap_or_else(|| segment.to_string())
        })
        .collect();

    if pieces.is_empty() {
        format!("/{}", suffix)
    } else {
        format!("/{}{}", pieces.join("/"), suffix)
    }
}

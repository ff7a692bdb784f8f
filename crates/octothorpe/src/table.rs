//! The route table: registration, validation, and resolution.
//!
//! The table is built once at application start and is immutable for the
//! rest of the session. Construction validates the whole route list
//! (duplicate names, equivalent patterns, unbound redirect parameters) and
//! logs a warning for any route an earlier registration makes unreachable.
//! Resolution walks routes in registration order; first match wins.

use std::collections::HashMap;

use crate::error::{ResolveError, TableError, UrlError};
use crate::location::Location;
use crate::params::Params;
use crate::pattern::PathPattern;
use crate::route::{substitute_target, Route, RouteTarget};

/// Builder for [`RouteTable`]. Routes keep their registration order.
#[derive(Debug, Clone)]
pub struct RouteTableBuilder<V> {
    routes: Vec<Route<V>>,
    case_insensitive: bool,
}

impl<V> Default for RouteTableBuilder<V> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            case_insensitive: false,
        }
    }
}

impl<V> RouteTableBuilder<V> {
    /// Appends a route declaration.
    pub fn route(mut self, route: Route<V>) -> Self {
        self.routes.push(route);
        self
    }

    /// Appends several route declarations at once.
    pub fn routes<I>(mut self, routes: I) -> Self
    where
        I: IntoIterator<Item = Route<V>>,
    {
        self.routes.extend(routes);
        self
    }

    /// Matches literal segments ignoring ASCII case. Off by default.
    pub fn case_insensitive(mut self, yes: bool) -> Self {
        self.case_insensitive = yes;
        self
    }

    /// Compiles and validates the table.
    ///
    /// # Invariants enforced
    ///
    /// - every pattern compiles ([`TableError::Pattern`])
    /// - route names are unique ([`TableError::DuplicateName`])
    /// - no two patterns match the same set of paths
    ///   ([`TableError::EquivalentPattern`])
    /// - every parameter a redirect target references is captured by its
    ///   source pattern ([`TableError::UnboundRedirectParam`])
    ///
    /// A route that is fully shadowed by an earlier one is legal but
    /// unreachable; it is reported as a structured warning rather than an
    /// error, since overlap (e.g. `/users/new` before `/users/:id`) is the
    /// point of first-match-wins ordering.
    pub fn build(self) -> Result<RouteTable<V>, TableError> {
        let mut patterns = Vec::with_capacity(self.routes.len());
        let mut by_name: HashMap<String, usize> = HashMap::new();
        let mut shapes: HashMap<String, usize> = HashMap::new();

        for (index, route) in self.routes.iter().enumerate() {
            let pattern =
                PathPattern::parse(route.path()).map_err(|source| TableError::Pattern {
                    name: route.name().to_string(),
                    source,
                })?;

            if by_name.insert(route.name().to_string(), index).is_some() {
                return Err(TableError::DuplicateName(route.name().to_string()));
            }

            let mut shape = pattern.shape();
            if self.case_insensitive {
                shape = shape.to_ascii_lowercase();
            }
            if let Some(&first) = shapes.get(&shape) {
                return Err(TableError::EquivalentPattern {
                    first: self.routes[first].name().to_string(),
                    second: route.name().to_string(),
                    pattern: pattern.as_str().to_string(),
                });
            }
            shapes.insert(shape, index);

            if let Some(target) = route.redirect_to() {
                validate_redirect(route.name(), target, &pattern)?;
            }

            for (earlier_index, earlier) in patterns.iter().enumerate() {
                if pattern.shadowed_by(earlier, self.case_insensitive) {
                    tracing::warn!(
                        route = route.name(),
                        pattern = pattern.as_str(),
                        shadowed_by = self.routes[earlier_index].name(),
                        "route is unreachable: an earlier route matches everything it matches"
                    );
                    break;
                }
            }

            patterns.push(pattern);
        }

        Ok(RouteTable {
            routes: self.routes,
            patterns,
            by_name,
            case_insensitive: self.case_insensitive,
        })
    }
}

/// The parameters a redirect target references must be a subset of the
/// parameters its source pattern captures.
fn validate_redirect(name: &str, target: &str, source: &PathPattern) -> Result<(), TableError> {
    let path_part = target
        .find(['?', '#'])
        .map(|i| &target[..i])
        .unwrap_or(target);

    let target_pattern = PathPattern::parse(path_part).map_err(|err| TableError::Pattern {
        name: name.to_string(),
        source: err,
    })?;

    for param in target_pattern.param_names() {
        if !source.param_names().contains(param) {
            return Err(TableError::UnboundRedirectParam {
                name: name.to_string(),
                target: target.to_string(),
                param: param.clone(),
            });
        }
    }

    Ok(())
}

/// An immutable route table.
///
/// # Examples
///
/// ```
/// use octothorpe::{Route, RouteTable};
///
/// let table = RouteTable::builder()
///     .route(Route::new("home", "/", "CharacterListView"))
///     .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
///     .build()
///     .unwrap();
///
/// let m = table.resolve("/chat/42").unwrap();
/// assert_eq!(m.view(), Some(&"ChatView"));
/// assert_eq!(m.params().get("character_id"), Some("42"));
///
/// assert!(table.resolve("/chat/").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    patterns: Vec<PathPattern>,
    by_name: HashMap<String, usize>,
    case_insensitive: bool,
}

impl<V> RouteTable<V> {
    pub fn builder() -> RouteTableBuilder<V> {
        RouteTableBuilder::default()
    }

    /// Resolves a location string against the table.
    ///
    /// The input is a path with optional `?query` and `#fragment` parts; it
    /// must start with `/`. Routes are tried in registration order and the
    /// first match wins.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Malformed`]: no leading slash
    /// - [`ResolveError::NotFound`]: no pattern matches
    pub fn resolve(&self, raw: &str) -> Result<RouteMatch<'_, V>, ResolveError> {
        let location = Location::parse(raw)?;

        for (route, pattern) in self.routes.iter().zip(&self.patterns) {
            if let Some(params) = pattern.matches_in(location.path(), self.case_insensitive) {
                tracing::debug!(
                    route = route.name(),
                    pattern = pattern.as_str(),
                    path = location.path(),
                    "route matched"
                );
                return Ok(RouteMatch {
                    route,
                    params,
                    location,
                });
            }
        }

        tracing::debug!(path = location.path(), "no route matched");
        Err(ResolveError::NotFound {
            path: location.path().to_string(),
        })
    }

    /// Generates a path for a named route by substituting parameters.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe::{Route, RouteTable};
    ///
    /// let table = RouteTable::builder()
    ///     .route(Route::new("chat", "/chat/:character_id", "ChatView"))
    ///     .build()
    ///     .unwrap();
    ///
    /// let url = table.url_for("chat", [("character_id", "42")]).unwrap();
    /// assert_eq!(url, "/chat/42");
    /// ```
    pub fn url_for<'a, I>(&self, name: &str, params: I) -> Result<String, UrlError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let params: Params = params.into_iter().collect();
        self.url_for_params(name, &params)
    }

    /// Like [`RouteTable::url_for`], taking an already-built [`Params`].
    pub fn url_for_params(&self, name: &str, params: &Params) -> Result<String, UrlError> {
        let index = *self
            .by_name
            .get(name)
            .ok_or_else(|| UrlError::UnknownRoute(name.to_string()))?;
        self.patterns[index].format_url(params)
    }

    /// Looks up a route declaration by name.
    pub fn get(&self, name: &str) -> Option<&Route<V>> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// All routes in registration order.
    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

/// Result of a successful resolution: the matched route, the captured
/// parameters, and the parsed location.
#[derive(Debug)]
pub struct RouteMatch<'t, V> {
    route: &'t Route<V>,
    params: Params,
    location: Location,
}

impl<'t, V> RouteMatch<'t, V> {
    pub fn route(&self) -> &'t Route<V> {
        self.route
    }

    /// The matched view handle; `None` when the route is a redirect.
    pub fn view(&self) -> Option<&'t V> {
        self.route.view()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// The parameter map a props-mode view receives as its direct inputs.
    /// Empty for routes declared without props, so a view never sees
    /// parameters left over from a previous route.
    pub fn props(&self) -> Params {
        if self.route.passes_props() {
            self.params.clone()
        } else {
            Params::new()
        }
    }

    pub fn is_redirect(&self) -> bool {
        self.route.is_redirect()
    }

    /// The matched target with captured parameters applied: either the view
    /// to mount, or the fully substituted location to navigate to instead.
    pub fn target(&self) -> ResolvedTarget<'t, V> {
        match self.route.target() {
            RouteTarget::View(view) => ResolvedTarget::View(view),
            RouteTarget::Redirect(raw) => ResolvedTarget::Redirect(self.substituted(raw)),
        }
    }

    /// The redirect target with captured parameters substituted, or `None`
    /// for view routes.
    pub fn redirect_target(&self) -> Option<String> {
        match self.target() {
            ResolvedTarget::View(_) => None,
            ResolvedTarget::Redirect(location) => Some(location),
        }
    }

    /// Substitutes captures into a redirect target; the original query and
    /// fragment are carried over unless the target declares its own.
    fn substituted(&self, target: &str) -> String {
        let mut resolved = substitute_target(target, &self.params);

        if !target.contains(['?', '#']) {
            if let Some(query) = self.location.raw_query() {
                resolved.push('?');
                resolved.push_str(query);
            }
            if let Some(fragment) = self.location.fragment() {
                resolved.push('#');
                resolved.push_str(fragment);
            }
        }

        resolved
    }
}

/// A [`RouteMatch`] target with parameters applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget<'t, V> {
    /// Mount this view.
    View(&'t V),
    /// Navigate to this location instead.
    Redirect(String),
}

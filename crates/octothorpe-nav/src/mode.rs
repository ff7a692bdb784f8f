//! History modes: how app locations appear in the address bar.
//!
//! The same route table serves both modes; only the translation between
//! the browser-visible location and the app-internal location differs.
//! Both translations are pure functions, so they are testable without a
//! browser.

/// The browser navigation strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    /// Browser-native pathnames under a base path (the History API
    /// strategy). An empty base means the app is served from the origin
    /// root.
    Web { base: String },

    /// The app location lives in the URL fragment (`/index.html#/chat/42`),
    /// for hosts that cannot rewrite arbitrary paths to the app shell.
    Hash,
}

impl HistoryMode {
    /// Web mode with a normalized base path.
    ///
    /// The base is what the build or deployment supplies (`/app`, `/app/`,
    /// or empty); it is normalized to either `""` or `/segment[/...]` with
    /// no trailing slash.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe_nav::HistoryMode;
    ///
    /// assert_eq!(HistoryMode::web("/app/"), HistoryMode::web("/app"));
    /// assert_eq!(HistoryMode::web("/"), HistoryMode::web(""));
    /// ```
    pub fn web(base: impl AsRef<str>) -> Self {
        let raw = base.as_ref().trim_end_matches('/');
        let base = if raw.is_empty() {
            String::new()
        } else if raw.starts_with('/') {
            raw.to_string()
        } else {
            format!("/{}", raw)
        };
        HistoryMode::Web { base }
    }

    pub fn hash() -> Self {
        HistoryMode::Hash
    }

    /// The configured base path (`""` in hash mode).
    pub fn base(&self) -> &str {
        match self {
            HistoryMode::Web { base } => base,
            HistoryMode::Hash => "",
        }
    }

    /// Translates a browser-visible location (pathname + search + hash)
    /// into the app-internal location the resolver understands.
    ///
    /// Returns `None` in web mode when the location is outside the base
    /// path; such a URL does not belong to this app.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe_nav::HistoryMode;
    ///
    /// let web = HistoryMode::web("/app");
    /// assert_eq!(web.app_location("/app/chat/42?tab=voice"),
    ///            Some("/chat/42?tab=voice".to_string()));
    /// assert_eq!(web.app_location("/elsewhere"), None);
    ///
    /// let hash = HistoryMode::hash();
    /// assert_eq!(hash.app_location("/index.html#/chat/42"),
    ///            Some("/chat/42".to_string()));
    /// assert_eq!(hash.app_location("/index.html"), Some("/".to_string()));
    /// ```
    pub fn app_location(&self, browser: &str) -> Option<String> {
        match self {
            HistoryMode::Web { base } => {
                if base.is_empty() {
                    return Some(browser.to_string());
                }

                let rest = browser.strip_prefix(base.as_str())?;
                if rest.is_empty() {
                    return Some("/".to_string());
                }
                match rest.as_bytes()[0] {
                    // `/app/chat` → `/chat`; `/app?x` → `/?x`
                    b'/' => Some(rest.to_string()),
                    b'?' | b'#' => Some(format!("/{}", rest)),
                    // `/application` shares the prefix but not the base.
                    _ => None,
                }
            }
            HistoryMode::Hash => {
                let app = match browser.split_once('#') {
                    Some((_, fragment)) if !fragment.is_empty() => fragment.to_string(),
                    _ => return Some("/".to_string()),
                };
                if app.starts_with('/') {
                    Some(app)
                } else {
                    Some(format!("/{}", app))
                }
            }
        }
    }

    /// Builds the browser-facing href for an app location.
    ///
    /// The pair of [`HistoryMode::href`] and [`HistoryMode::app_location`]
    /// round-trips: `app_location(href(loc)) == Some(loc)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use octothorpe_nav::HistoryMode;
    ///
    /// assert_eq!(HistoryMode::web("/app").href("/chat/42"), "/app/chat/42");
    /// assert_eq!(HistoryMode::web("").href("/chat/42"), "/chat/42");
    /// assert_eq!(HistoryMode::hash().href("/chat/42"), "#/chat/42");
    /// ```
    pub fn href(&self, app: &str) -> String {
        match self {
            HistoryMode::Web { base } => format!("{}{}", base, app),
            HistoryMode::Hash => format!("#{}", app),
        }
    }
}

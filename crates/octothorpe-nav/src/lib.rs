//! # Octothorpe navigation runtime
//!
//! Everything around the route table that turns resolution into
//! navigation: the session [`History`] with its in-memory implementation,
//! the [`HistoryMode`] translation between browser-visible and
//! app-internal locations (including the `#`-fragment strategy the project
//! is named after), and the [`NavigationContext`]: the explicit owner of
//! the current-route state that views read instead of an ambient global.
//!
//! ```
//! use octothorpe::{Route, RouteTable};
//! use octothorpe_nav::{HistoryMode, NavigationContext, NavigationTarget};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("home", "/", "CharacterListView"))
//!     .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
//!     .build()
//!     .unwrap();
//!
//! let mut nav = NavigationContext::in_memory(table).with_mode(HistoryMode::web("/app"));
//!
//! nav.push(NavigationTarget::named("chat", &[("character_id", "42")])).unwrap();
//! assert_eq!(nav.current().unwrap().location().path(), "/chat/42");
//! assert_eq!(nav.href("/chat/42").unwrap(), "/app/chat/42");
//! ```

mod config;
mod context;
mod error;
mod history;
mod mode;

pub use config::{HistoryKind, NavConfig, RoutingConfig};
pub use context::{ActiveRoute, NavigationContext, NavigationEvent, NavigationTarget};
pub use error::NavigationError;
pub use history::{History, MemoryHistory};
pub use mode::HistoryMode;

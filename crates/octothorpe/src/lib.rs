//! # Octothorpe
//!
//! A declarative client-side route table and navigation resolver:
//! - Static routes (`/`)
//! - Dynamic parameters (`/chat/:character_id`)
//! - Optional parameters (`/posts/:id?`)
//! - Catch-all routes (`/docs/*slug`)
//! - Named routes with URL generation
//! - Redirect routes with parameter substitution
//!
//! The table is built once, validated, and frozen; resolution walks routes
//! in registration order and the first match wins. Views are opaque to the
//! router: `Route<V>` is generic over whatever handle the surrounding
//! application mounts.
//!
//! ## Path normalization
//!
//! Requested paths are normalized before matching, so the usual address-bar
//! mistakes are handled: `/chat/42/` → `/chat/42`, `/chat//42` → `/chat/42`.
//! A path missing its leading slash is rejected as malformed rather than
//! guessed at.
//!
//! ## Example
//!
//! ```
//! use octothorpe::{Route, RouteTable};
//!
//! let table = RouteTable::builder()
//!     .route(Route::new("home", "/", "CharacterListView"))
//!     .route(Route::new("chat", "/chat/:character_id", "ChatView").with_props())
//!     .build()
//!     .unwrap();
//!
//! // `/` mounts the list view with no parameters.
//! let home = table.resolve("/").unwrap();
//! assert_eq!(home.view(), Some(&"CharacterListView"));
//! assert!(home.params().is_empty());
//!
//! // `/chat/42` mounts the chat view with the captured id.
//! let chat = table.resolve("/chat/42").unwrap();
//! assert_eq!(chat.params().get("character_id"), Some("42"));
//!
//! // A missing parameter segment is not a match.
//! assert!(table.resolve("/chat/").is_err());
//! ```

mod error;
mod location;
mod params;
mod pattern;
mod route;
mod table;

pub mod path;

pub use error::{PatternError, ResolveError, TableError, UrlError};
pub use location::Location;
pub use params::Params;
pub use pattern::{PathPattern, Segment};
pub use route::{Route, RouteTarget};
pub use table::{ResolvedTarget, RouteMatch, RouteTable, RouteTableBuilder};

//! Leptos runtime wiring for the merchant console shell.
//!
//! [`AuthProvider`] owns the session store for the lifetime of the app and exposes it through
//! [`AuthSessionContext`]; [`navigation`] holds the static route table, sidebar entries, and the
//! guard that gates protected routes on the session.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod auth_context;
pub mod navigation;

pub use auth_context::{provide_auth_session, use_auth_session, AuthProvider, AuthSessionContext};
pub use navigation::{
    active_sidebar_item, guard_navigation, resolve_route, ConsoleView, NavigationDecision,
    RouteEntry, SidebarItem, LOGIN_PATH, ROUTES, SIDEBAR_ITEMS,
};

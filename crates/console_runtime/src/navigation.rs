//! Static route table, sidebar entries, and the session-aware navigation guard.

use console_host::AuthSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Top-level console views reachable through the router.
pub enum ConsoleView {
    /// Sign-in screen.
    Login,
    /// Merchant overview.
    Dashboard,
    /// Merchant records browser.
    Database,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One router entry.
pub struct RouteEntry {
    /// Stable route name.
    pub name: &'static str,
    /// Absolute path.
    pub path: &'static str,
    /// View rendered for the path.
    pub view: ConsoleView,
    /// Whether the route is reachable without a session.
    pub public: bool,
}

/// Router table, in declaration order.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        name: "login",
        path: "/",
        view: ConsoleView::Login,
        public: true,
    },
    RouteEntry {
        name: "dashboard",
        path: "/dashboard",
        view: ConsoleView::Dashboard,
        public: false,
    },
    RouteEntry {
        name: "database",
        path: "/database",
        view: ConsoleView::Database,
        public: false,
    },
];

/// Path of the login route, used for redirects.
pub const LOGIN_PATH: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One sidebar navigation entry.
pub struct SidebarItem {
    /// Display title.
    pub title: &'static str,
    /// Target path.
    pub path: &'static str,
}

/// Sidebar entries, in display order.
pub const SIDEBAR_ITEMS: &[SidebarItem] = &[
    SidebarItem {
        title: "Dashboard",
        path: "/dashboard",
    },
    SidebarItem {
        title: "Facilities",
        path: "/facilities",
    },
    SidebarItem {
        title: "Loans",
        path: "/loans",
    },
    SidebarItem {
        title: "Customers",
        path: "/customers",
    },
    SidebarItem {
        title: "Agents",
        path: "/agents",
    },
    SidebarItem {
        title: "Profit & Loss",
        path: "/profit-loss",
    },
    SidebarItem {
        title: "Repayments",
        path: "/repayments",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Outcome of [`guard_navigation`].
pub enum NavigationDecision {
    /// Render the matched route.
    Allow(&'static RouteEntry),
    /// The route needs a session; send the user to [`LOGIN_PATH`].
    RedirectToLogin,
    /// No route matches the path.
    NotFound,
}

fn normalize_path(path: &str) -> &str {
    let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

/// Finds the route for `path`, ignoring a trailing slash, query string, and fragment.
pub fn resolve_route(path: &str) -> Option<&'static RouteEntry> {
    let path = normalize_path(path);
    ROUTES.iter().find(|route| route.path == path)
}

/// Decides whether `path` may be shown for the given session.
pub fn guard_navigation(path: &str, session: &AuthSnapshot) -> NavigationDecision {
    match resolve_route(path) {
        None => NavigationDecision::NotFound,
        Some(route) if route.public || session.is_authenticated() => {
            NavigationDecision::Allow(route)
        }
        Some(_) => NavigationDecision::RedirectToLogin,
    }
}

/// Returns the sidebar entry to highlight for `path`.
///
/// An entry matches when its path equals the current path or is a parent segment of it.
pub fn active_sidebar_item(path: &str) -> Option<&'static SidebarItem> {
    let path = normalize_path(path);
    SIDEBAR_ITEMS.iter().find(|item| {
        path == item.path
            || path
                .strip_prefix(item.path)
                .is_some_and(|rest| rest.starts_with('/'))
    })
}

#[cfg(test)]
mod tests {
    use console_host::OpaqueRecord;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> OpaqueRecord {
        OpaqueRecord::new(value).expect("non-null record")
    }

    fn logged_in() -> AuthSnapshot {
        AuthSnapshot {
            user: Some(record(json!({"id": "u-1"}))),
            merchant: Some(record(json!({"id": 9}))),
            token: None,
        }
    }

    #[test]
    fn resolve_route_normalizes_paths() {
        assert_eq!(resolve_route("/").map(|r| r.view), Some(ConsoleView::Login));
        assert_eq!(resolve_route("").map(|r| r.view), Some(ConsoleView::Login));
        assert_eq!(
            resolve_route("/dashboard/").map(|r| r.view),
            Some(ConsoleView::Dashboard)
        );
        assert_eq!(
            resolve_route("/database?page=2#top").map(|r| r.name),
            Some("database")
        );
        assert_eq!(resolve_route("/loans"), None);
    }

    #[test]
    fn guard_redirects_protected_routes_when_logged_out() {
        let session = AuthSnapshot::default();
        assert_eq!(
            guard_navigation("/dashboard", &session),
            NavigationDecision::RedirectToLogin
        );
        assert!(matches!(
            guard_navigation("/", &session),
            NavigationDecision::Allow(route) if route.view == ConsoleView::Login
        ));
    }

    #[test]
    fn guard_allows_protected_routes_with_session() {
        let session = logged_in();
        assert!(matches!(
            guard_navigation("/database", &session),
            NavigationDecision::Allow(route) if route.view == ConsoleView::Database
        ));
        assert_eq!(
            guard_navigation("/repayments", &session),
            NavigationDecision::NotFound
        );
    }

    #[test]
    fn token_only_session_is_not_authenticated() {
        let session = AuthSnapshot {
            token: Some("abc".into()),
            ..AuthSnapshot::default()
        };
        assert_eq!(
            guard_navigation("/dashboard", &session),
            NavigationDecision::RedirectToLogin
        );
    }

    #[test]
    fn active_sidebar_item_matches_segment_prefixes() {
        assert_eq!(
            active_sidebar_item("/loans/17").map(|item| item.title),
            Some("Loans")
        );
        assert_eq!(
            active_sidebar_item("/profit-loss/").map(|item| item.title),
            Some("Profit & Loss")
        );
        assert_eq!(active_sidebar_item("/loansheet"), None);
        assert_eq!(active_sidebar_item("/"), None);
    }

    #[test]
    fn sidebar_paths_are_unique() {
        let mut paths = SIDEBAR_ITEMS.iter().map(|item| item.path).collect::<Vec<_>>();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), SIDEBAR_ITEMS.len());
    }
}

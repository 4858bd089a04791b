//! Provider and context wiring for the authentication session.
//!
//! The [`SessionStore`] is owned by the provider and is the only writer of session state. Views
//! read the reactive [`AuthSnapshot`] mirror and call back into the context to log in or out.

use console_host::{
    AuthSnapshot, DurableStore, OpaqueRecord, PersistOutcome, SessionError, SessionKeys,
    SessionStore, SessionToken,
};
use leptos::*;

use crate::navigation::{guard_navigation, NavigationDecision};

type BoxedSessionStore = SessionStore<Box<dyn DurableStore>>;

#[derive(Clone, Copy)]
/// Leptos context for reading the session and driving login/logout.
pub struct AuthSessionContext {
    /// Reactive mirror of the store's in-memory session.
    pub session: RwSignal<AuthSnapshot>,
    store: StoredValue<BoxedSessionStore>,
}

impl AuthSessionContext {
    /// Creates a logged-out context over `store`. Call [`AuthSessionContext::init`] to rehydrate.
    pub fn new(store: impl DurableStore + 'static, keys: SessionKeys) -> Self {
        let store: Box<dyn DurableStore> = Box::new(store);
        Self {
            session: create_rw_signal(AuthSnapshot::default()),
            store: store_value(SessionStore::new(store, keys)),
        }
    }

    /// Rehydrates the session from durable storage.
    ///
    /// Once the owning reactive scope has been disposed this does nothing, logs a warning, and
    /// returns `Ok(())`.
    ///
    /// # Errors
    ///
    /// Returns the store's [`SessionError`]; the session is left as it was.
    pub fn init(&self) -> Result<(), SessionError> {
        self.mutate(SessionStore::init).unwrap_or(Ok(()))
    }

    /// Replaces the session after a successful login and logs any persistence warnings.
    pub fn set_auth(&self, user: OpaqueRecord, merchant: OpaqueRecord, token: Option<SessionToken>) {
        if let Some(outcome) = self.mutate(|store| store.set_auth(user, merchant, token)) {
            report("set_auth", outcome);
        }
    }

    /// Clears the session and logs any persistence warnings.
    pub fn logout(&self) {
        if let Some(outcome) = self.mutate(SessionStore::logout) {
            report("logout", outcome);
        }
    }

    /// Current session (tracked).
    pub fn snapshot(&self) -> AuthSnapshot {
        self.session.get()
    }

    /// Whether a user and merchant are present (tracked).
    pub fn is_authenticated(&self) -> bool {
        self.session.with(AuthSnapshot::is_authenticated)
    }

    /// Current user record (tracked).
    pub fn user(&self) -> Option<OpaqueRecord> {
        self.session.with(|session| session.user.clone())
    }

    /// Current merchant record (tracked).
    pub fn merchant(&self) -> Option<OpaqueRecord> {
        self.session.with(|session| session.merchant.clone())
    }

    /// Current session token (tracked).
    pub fn token(&self) -> Option<SessionToken> {
        self.session.with(|session| session.token.clone())
    }

    /// Runs the navigation guard for `path` against the current session (tracked).
    pub fn guard(&self, path: &str) -> NavigationDecision {
        self.session.with(|session| guard_navigation(path, session))
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut BoxedSessionStore) -> T) -> Option<T> {
        let Some(result) = self.store.try_update_value(f) else {
            logging::warn!("auth session store used after disposal");
            return None;
        };
        let next = self.store.with_value(|store| store.snapshot().clone());
        if self.session.with_untracked(|current| current != &next) {
            self.session.set(next);
        }
        Some(result)
    }
}

fn report(operation: &str, outcome: PersistOutcome) {
    for warning in outcome.warnings {
        logging::warn!("{operation}: {warning}");
    }
}

/// Builds an [`AuthSessionContext`] over `store` and provides it to descendants.
pub fn provide_auth_session(
    store: impl DurableStore + 'static,
    keys: SessionKeys,
) -> AuthSessionContext {
    let context = AuthSessionContext::new(store, keys);
    provide_context(context);
    context
}

#[component]
/// Provides [`AuthSessionContext`] to descendant components and rehydrates the stored session
/// before they render.
pub fn AuthProvider(
    /// Durable key layout; defaults to `user`, `merchant`, and `token`.
    #[prop(optional)]
    keys: Option<SessionKeys>,
    /// Durable backend; defaults to the host strategy's store.
    #[prop(optional)]
    durable_store: Option<Box<dyn DurableStore>>,
    children: Children,
) -> impl IntoView {
    let keys = keys.unwrap_or_default();
    let auth = match durable_store {
        Some(store) => provide_auth_session(store, keys),
        None => provide_auth_session(console_host_web::durable_store(), keys),
    };
    if let Err(err) = auth.init() {
        logging::warn!("session rehydrate failed: {err}");
    }
    children().into_view()
}

/// Returns the current [`AuthSessionContext`].
///
/// # Panics
///
/// Panics if called outside [`AuthProvider`].
pub fn use_auth_session() -> AuthSessionContext {
    use_context::<AuthSessionContext>().expect("AuthSessionContext not provided")
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use console_host::{MemoryDurableStore, UnavailableDurableStore};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn record(value: serde_json::Value) -> OpaqueRecord {
        OpaqueRecord::new(value).expect("non-null record")
    }

    fn user() -> OpaqueRecord {
        record(json!({"id": "u-1"}))
    }

    fn merchant() -> OpaqueRecord {
        record(json!({"id": 5, "name": "Depot"}))
    }

    #[test]
    fn set_auth_publishes_snapshot_and_persists() {
        let _ = create_runtime();
        let backend = MemoryDurableStore::default();
        let auth = AuthSessionContext::new(backend.clone(), SessionKeys::default());

        assert!(!auth.is_authenticated());
        auth.set_auth(user(), merchant(), Some("abc".into()));

        assert!(auth.is_authenticated());
        assert_eq!(auth.user(), Some(user()));
        assert_eq!(auth.token(), Some(SessionToken::new("abc")));
        assert_eq!(backend.get("token").expect("get"), Some("abc".to_string()));
    }

    #[test]
    fn init_rehydrates_and_logout_clears() {
        let _ = create_runtime();
        let backend = MemoryDurableStore::default();
        backend.set("user", "{\"id\":\"u-1\"}").expect("set");
        backend
            .set("merchant", "{\"id\":5,\"name\":\"Depot\"}")
            .expect("set");

        let auth = AuthSessionContext::new(backend.clone(), SessionKeys::default());
        auth.init().expect("init");
        assert_eq!(auth.merchant(), Some(merchant()));
        assert!(matches!(
            auth.guard("/dashboard"),
            NavigationDecision::Allow(_)
        ));

        auth.logout();
        assert_eq!(auth.snapshot(), AuthSnapshot::default());
        assert!(backend.is_empty());
        assert_eq!(auth.guard("/dashboard"), NavigationDecision::RedirectToLogin);
    }

    #[test]
    fn init_error_leaves_context_logged_out() {
        let _ = create_runtime();
        let backend = MemoryDurableStore::default();
        backend.set("user", "not json").expect("set");

        let auth = AuthSessionContext::new(backend, SessionKeys::default());
        let err = auth.init().expect_err("malformed user");

        assert!(matches!(err, SessionError::MalformedEntry { .. }));
        assert_eq!(auth.snapshot(), AuthSnapshot::default());
    }

    #[test]
    fn unavailable_storage_still_updates_session() {
        let _ = create_runtime();
        let auth = AuthSessionContext::new(UnavailableDurableStore, SessionKeys::default());

        auth.set_auth(user(), merchant(), None);
        assert!(auth.is_authenticated());

        auth.logout();
        assert!(!auth.is_authenticated());
    }

    fn render_provider(
        durable_store: Option<Box<dyn DurableStore>>,
    ) -> (AuthSessionContext, bool) {
        let seen = Rc::new(Cell::new(None));
        let seen_in_children = Rc::clone(&seen);
        let children: Children = Box::new(move || {
            let auth = use_auth_session();
            seen_in_children.set(Some((auth, auth.is_authenticated())));
            Fragment::new(Vec::new())
        });
        let props = match durable_store {
            Some(store) => AuthProviderProps::builder()
                .durable_store(store)
                .children(children)
                .build(),
            None => AuthProviderProps::builder().children(children).build(),
        };
        let _ = AuthProvider(props).into_view();
        seen.get().expect("children rendered")
    }

    #[test]
    fn provider_rehydrates_before_children_render() {
        let _ = create_runtime();
        let backend = MemoryDurableStore::default();
        backend.set("user", "{\"id\":\"u-1\"}").expect("set");
        backend
            .set("merchant", "{\"id\":5,\"name\":\"Depot\"}")
            .expect("set");
        backend.set("token", "abc").expect("set");

        let (auth, authenticated_at_render) = render_provider(Some(Box::new(backend.clone())));

        assert!(authenticated_at_render);
        assert_eq!(auth.merchant(), Some(merchant()));
        assert_eq!(auth.token(), Some(SessionToken::new("abc")));

        auth.logout();
        assert!(backend.is_empty());
    }

    #[test]
    fn provider_defaults_to_host_strategy_store() {
        let _ = create_runtime();
        let (auth, authenticated_at_render) = render_provider(None);

        assert!(!authenticated_at_render);
        auth.set_auth(user(), merchant(), None);
        assert!(auth.is_authenticated());
    }

    #[test]
    fn disposed_context_skips_init_and_writes() {
        let _ = create_runtime();
        let backend = MemoryDurableStore::default();
        backend.set("user", "not json").expect("set");

        let slot = Rc::new(Cell::new(None));
        let trigger = create_trigger();
        {
            let slot = Rc::clone(&slot);
            let backend = backend.clone();
            create_effect(move |_| {
                trigger.track();
                slot.set(Some(AuthSessionContext::new(
                    backend.clone(),
                    SessionKeys::default(),
                )));
            });
        }
        let disposed = slot.get().expect("context created");
        trigger.notify();

        assert_eq!(disposed.init(), Ok(()));
        disposed.logout();
        assert_eq!(backend.get("user").expect("get"), Some("not json".to_string()));
    }
}

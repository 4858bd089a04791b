//! Authentication session store and its durable mirror.

use crate::storage::durable::DurableStore;

use super::{
    error::{PersistOutcome, SessionError, StorageOp},
    keys::SessionKeys,
    record::{OpaqueRecord, SessionToken},
};

#[derive(Debug, Clone, Default, PartialEq)]
/// In-memory authentication state: who is logged in, as which merchant, with what credential.
pub struct AuthSnapshot {
    /// Identity record from the identity provider.
    pub user: Option<OpaqueRecord>,
    /// Merchant record associated with the user.
    pub merchant: Option<OpaqueRecord>,
    /// Optional session credential.
    pub token: Option<SessionToken>,
}

impl AuthSnapshot {
    /// Returns the coarse login state for this snapshot.
    pub fn state(&self) -> SessionState {
        if self.user.is_some() && self.merchant.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    /// Returns `true` when both a user and a merchant are present.
    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::LoggedIn
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Coarse login state derived from an [`AuthSnapshot`].
pub enum SessionState {
    /// No user/merchant pair is present.
    LoggedOut,
    /// A user/merchant pair is present; the token may still be absent.
    LoggedIn,
}

/// Single owner of the authentication session and of its synchronization with durable storage.
///
/// The session starts empty. It changes only through [`SessionStore::init`],
/// [`SessionStore::set_auth`] and [`SessionStore::logout`].
#[derive(Debug)]
pub struct SessionStore<S: DurableStore> {
    store: S,
    keys: SessionKeys,
    session: AuthSnapshot,
}

impl<S: DurableStore> SessionStore<S> {
    /// Creates an empty (logged-out) session backed by `store`.
    pub fn new(store: S, keys: SessionKeys) -> Self {
        Self {
            store,
            keys,
            session: AuthSnapshot::default(),
        }
    }

    /// Rehydrates the in-memory session from durable storage.
    ///
    /// Each present, non-empty entry overwrites its field; missing entries leave the current value
    /// in place. Every entry is decoded before anything is assigned. Durable storage is not
    /// written.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MalformedEntry`] when a stored user or merchant is not valid JSON
    /// and [`SessionError::StorageRead`] when the backend read fails. The in-memory session is
    /// unchanged in both cases.
    pub fn init(&mut self) -> Result<(), SessionError> {
        let user = self.load_record(&self.keys.user)?;
        let merchant = self.load_record(&self.keys.merchant)?;
        let token = self.load_raw(&self.keys.token)?.map(SessionToken::from);

        if let Some(user) = user {
            self.session.user = user;
        }
        if let Some(merchant) = merchant {
            self.session.merchant = merchant;
        }
        if let Some(token) = token {
            self.session.token = Some(token);
        }
        Ok(())
    }

    /// Replaces the whole session and mirrors it to durable storage.
    ///
    /// `user` and `merchant` are always written. The token is written only when one is supplied
    /// and non-empty; otherwise any previously stored token is left as it was.
    pub fn set_auth(
        &mut self,
        user: OpaqueRecord,
        merchant: OpaqueRecord,
        token: Option<SessionToken>,
    ) -> PersistOutcome {
        let user_json = user.to_json_string();
        let merchant_json = merchant.to_json_string();
        let persisted_token = token
            .as_ref()
            .filter(|token| !token.is_empty())
            .map(|token| token.as_str().to_string());

        self.session = AuthSnapshot {
            user: Some(user),
            merchant: Some(merchant),
            token,
        };

        let mut outcome = PersistOutcome::default();
        outcome.record(
            &self.keys.user,
            StorageOp::Write,
            self.store.set(&self.keys.user, &user_json),
        );
        outcome.record(
            &self.keys.merchant,
            StorageOp::Write,
            self.store.set(&self.keys.merchant, &merchant_json),
        );
        if let Some(raw) = persisted_token {
            outcome.record(
                &self.keys.token,
                StorageOp::Write,
                self.store.set(&self.keys.token, &raw),
            );
        }
        outcome
    }

    /// Clears the session and removes all three durable entries.
    pub fn logout(&mut self) -> PersistOutcome {
        self.session = AuthSnapshot::default();

        let mut outcome = PersistOutcome::default();
        for key in [&self.keys.user, &self.keys.merchant, &self.keys.token] {
            outcome.record(key, StorageOp::Remove, self.store.remove(key));
        }
        outcome
    }

    /// Borrows the current in-memory session.
    pub fn snapshot(&self) -> &AuthSnapshot {
        &self.session
    }

    /// Current user record, if any.
    pub fn user(&self) -> Option<&OpaqueRecord> {
        self.session.user.as_ref()
    }

    /// Current merchant record, if any.
    pub fn merchant(&self) -> Option<&OpaqueRecord> {
        self.session.merchant.as_ref()
    }

    /// Current session token, if any.
    pub fn token(&self) -> Option<&SessionToken> {
        self.session.token.as_ref()
    }

    /// Coarse login state.
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Returns `true` when a user and a merchant are present.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    fn load_raw(&self, key: &str) -> Result<Option<String>, SessionError> {
        let raw = self
            .store
            .get(key)
            .map_err(|message| SessionError::StorageRead {
                key: key.to_string(),
                message,
            })?;
        Ok(raw.filter(|raw| !raw.is_empty()))
    }

    /// Outer `None` means "no entry"; inner `None` means the entry decoded to JSON `null`.
    fn load_record(&self, key: &str) -> Result<Option<Option<OpaqueRecord>>, SessionError> {
        let Some(raw) = self.load_raw(key)? else {
            return Ok(None);
        };
        OpaqueRecord::parse(&raw)
            .map(Some)
            .map_err(|e| SessionError::MalformedEntry {
                key: key.to_string(),
                message: e.to_string(),
            })
    }
}

use std::sync::{Arc, Mutex};

use tracing::info;

use super::domain::{NewUserInput, ProfilePatch, User, UserId};
use crate::marketplace::persistence::{
    keys, read_snapshot, write_snapshot, PersistenceAdapter, StorageError,
};
use crate::marketplace::seed;

/// Owns the `User` collection and the current session, keeping both in
/// lock-step with the persistence backend. One instance per process; handed
/// to consumers as an `Arc`.
pub struct IdentityStore<P> {
    adapter: Arc<P>,
    state: Mutex<IdentityState>,
}

struct IdentityState {
    users: Vec<User>,
    session: Option<User>,
    next_id: u64,
}

/// Error raised by identity operations.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("an account already exists for '{0}'")]
    DuplicateEmail(String),
    #[error("no account matches '{0}'")]
    UnknownEmail(String),
    #[error("user '{0}' does not exist")]
    UnknownUser(UserId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Smallest id the allocator will hand out after scanning `ids`.
pub(crate) fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> u64 {
    ids.filter_map(|id| id.parse::<u64>().ok())
        .max()
        .map_or(1, |max| max + 1)
}

impl<P> IdentityStore<P>
where
    P: PersistenceAdapter,
{
    /// Open the store against `adapter`, loading persisted collections or
    /// falling back to the built-in seed dataset on first run.
    pub fn open(adapter: Arc<P>) -> Result<Self, StorageError> {
        let users: Vec<User> = match read_snapshot(adapter.as_ref(), keys::USERS)? {
            Some(users) => users,
            None => seed::users(),
        };
        // The session key holds `null` after logout; both null and an absent
        // key read back as signed out.
        let session: Option<User> = read_snapshot(adapter.as_ref(), keys::SESSION)?.flatten();
        let next_id = next_numeric_id(users.iter().map(|user| user.id.0.as_str()));

        Ok(Self {
            adapter,
            state: Mutex::new(IdentityState {
                users,
                session,
                next_id,
            }),
        })
    }

    /// Register a new account. Fails when the email is already taken; the new
    /// record is persisted before being returned. Does not sign the user in.
    pub fn register(&self, input: NewUserInput) -> Result<User, IdentityError> {
        let mut state = self.state.lock().expect("identity store mutex poisoned");

        if state.users.iter().any(|user| user.email == input.email) {
            return Err(IdentityError::DuplicateEmail(input.email));
        }

        let NewUserInput {
            email,
            name,
            role,
            password: _,
            avatar,
            department,
            company,
            bio,
            skills,
            experience,
        } = input;

        let user = User {
            id: UserId(state.next_id.to_string()),
            email,
            name,
            role,
            avatar,
            department,
            company,
            bio,
            skills,
            experience,
        };

        let mut users = state.users.clone();
        users.push(user.clone());
        write_snapshot(self.adapter.as_ref(), keys::USERS, &users)?;

        state.users = users;
        state.next_id += 1;
        info!(user = %user.id, role = user.role.label(), "registered account");
        Ok(user)
    }

    /// Sign in by email, setting and persisting the session snapshot. The
    /// password is accepted unchecked (see [`NewUserInput`]).
    pub fn login(&self, email: &str, _password: &str) -> Result<User, IdentityError> {
        let mut state = self.state.lock().expect("identity store mutex poisoned");

        let user = state
            .users
            .iter()
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| IdentityError::UnknownEmail(email.to_string()))?;

        write_snapshot(self.adapter.as_ref(), keys::SESSION, &Some(user.clone()))?;
        state.session = Some(user.clone());
        Ok(user)
    }

    /// Clear the session and its persisted copy. Safe to call when already
    /// signed out.
    pub fn logout(&self) -> Result<(), IdentityError> {
        let mut state = self.state.lock().expect("identity store mutex poisoned");

        write_snapshot(self.adapter.as_ref(), keys::SESSION, &None::<User>)?;
        state.session = None;
        Ok(())
    }

    /// Merge `patch` into the matching user record. When the target is the
    /// session user, the session snapshot is refreshed and re-persisted in
    /// the same operation.
    pub fn update_profile(
        &self,
        user_id: &UserId,
        patch: ProfilePatch,
    ) -> Result<User, IdentityError> {
        let mut state = self.state.lock().expect("identity store mutex poisoned");

        let mut users = state.users.clone();
        let user = users
            .iter_mut()
            .find(|user| &user.id == user_id)
            .ok_or_else(|| IdentityError::UnknownUser(user_id.clone()))?;
        user.apply_patch(patch);
        let updated = user.clone();

        write_snapshot(self.adapter.as_ref(), keys::USERS, &users)?;

        let session_touched = state
            .session
            .as_ref()
            .is_some_and(|session| &session.id == user_id);
        if session_touched {
            write_snapshot(self.adapter.as_ref(), keys::SESSION, &Some(updated.clone()))?;
        }

        state.users = users;
        if session_touched {
            state.session = Some(updated.clone());
        }
        Ok(updated)
    }

    /// Snapshot of the full user collection.
    pub fn users(&self) -> Vec<User> {
        let state = self.state.lock().expect("identity store mutex poisoned");
        state.users.clone()
    }

    /// Look up a single user by id.
    pub fn user(&self, user_id: &UserId) -> Option<User> {
        let state = self.state.lock().expect("identity store mutex poisoned");
        state.users.iter().find(|user| &user.id == user_id).cloned()
    }

    /// The currently signed-in user, if any.
    pub fn session(&self) -> Option<User> {
        let state = self.state.lock().expect("identity store mutex poisoned");
        state.session.clone()
    }
}

//! The role registry: tracks which client holds which role.
//!
//! # Concurrency note
//!
//! `RoleRegistry` is NOT thread-safe by itself; it uses plain `HashMap`s.
//! That is intentional: the registry is owned by the session actor and
//! every access goes through that actor's command queue, so adding locks
//! here would only hide the real serialization boundary.

use std::collections::HashMap;

use lightmaze_protocol::{ClientId, Role};

use crate::RoleError;

/// Tracks role ownership for the single maze session.
///
/// Two maps kept in sync: `claims` answers "who holds role R?",
/// `held` answers "what does client C hold?". A client holds at most one
/// role, a role is held by at most one client.
#[derive(Debug, Default)]
pub struct RoleRegistry {
    claims: HashMap<Role, ClientId>,
    held: HashMap<ClientId, Role>,
}

impl RoleRegistry {
    /// Creates an empty registry: every role starts in the unclaimed pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attempts to claim `role` for `client`.
    ///
    /// Re-claiming a role the client already holds is an idempotent
    /// success, so a client that re-sends `join-as` after a UI hiccup is
    /// simply confirmed.
    ///
    /// # Errors
    /// - [`RoleError::RoleAlreadyClaimed`] if another client holds `role`.
    /// - [`RoleError::RoleAlreadyHeld`] if `client` holds a different role.
    pub fn claim(&mut self, role: Role, client: ClientId) -> Result<(), RoleError> {
        if let Some(holder) = self.claims.get(&role) {
            if *holder == client {
                return Ok(());
            }
            return Err(RoleError::RoleAlreadyClaimed(role));
        }
        if let Some(held) = self.held.get(&client) {
            return Err(RoleError::RoleAlreadyHeld {
                client,
                held: *held,
            });
        }

        self.claims.insert(role, client);
        self.held.insert(client, role);
        Ok(())
    }

    /// Releases `role`, returning it to the unclaimed pool.
    ///
    /// # Errors
    /// Returns [`RoleError::NotHolder`] unless `client` is the current
    /// holder; releasing someone else's role is never allowed.
    pub fn release(&mut self, role: Role, client: ClientId) -> Result<(), RoleError> {
        match self.claims.get(&role) {
            Some(holder) if *holder == client => {
                self.claims.remove(&role);
                self.held.remove(&client);
                Ok(())
            }
            _ => Err(RoleError::NotHolder { client, role }),
        }
    }

    /// Releases whatever role `client` holds, if any. Called on disconnect;
    /// already-applied moves are not rolled back.
    pub fn release_client(&mut self, client: ClientId) -> Option<Role> {
        let role = self.held.remove(&client)?;
        self.claims.remove(&role);
        Some(role)
    }

    /// The role `client` currently holds.
    pub fn role_of(&self, client: ClientId) -> Option<Role> {
        self.held.get(&client).copied()
    }

    /// The client currently holding `role`.
    pub fn holder(&self, role: Role) -> Option<ClientId> {
        self.claims.get(&role).copied()
    }

    /// Whether `role` is currently held.
    pub fn is_claimed(&self, role: Role) -> bool {
        self.claims.contains_key(&role)
    }

    /// Iterates over the current role occupancy.
    pub fn occupancy(&self) -> impl Iterator<Item = (Role, ClientId)> + '_ {
        self.claims.iter().map(|(role, client)| (*role, *client))
    }

    /// Number of roles currently held.
    pub fn claimed_count(&self) -> usize {
        self.claims.len()
    }
}

// =========================================================================
// Tests
// =========================================================================

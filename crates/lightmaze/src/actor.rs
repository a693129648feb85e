//! The session actor: an isolated Tokio task that owns the one maze
//! session.
//!
//! All mutable state (the session store, the role registry, the per-client
//! outbound channels) lives inside this task; everything else talks to it
//! through an mpsc channel. Commands are processed one at a time in
//! admission order, which is the serialization guarantee the game rules
//! rely on: two simultaneous move intents can never apply against the same
//! stale position, and colliding intents resolve first-admitted-wins.

use std::collections::HashMap;

use lightmaze_game::{
    GameConfig, GameError, MoveOutcome, SessionStore, StageSet, View,
    apply_move, project, restart, set_stage,
};
use lightmaze_protocol::{ClientEvent, ClientId, Direction, Role, ServerEvent};
use lightmaze_roles::{RoleError, RoleRegistry};
use tokio::sync::mpsc;

/// Channel sender for delivering server events to one client's writer.
pub(crate) type EventSender = mpsc::UnboundedSender<ServerEvent>;

/// Commands sent to the session actor through its channel.
pub(crate) enum SessionCommand {
    /// Register a connected client's outbound channel.
    Attach {
        client: ClientId,
        sender: EventSender,
    },

    /// A connection closed: drop the channel, release any held role.
    Detach { client: ClientId },

    /// A decoded client intent.
    Intent {
        client: ClientId,
        event: ClientEvent,
    },
}

/// Handle to the running session actor. Cheap to clone; one per
/// connection handler.
#[derive(Clone)]
pub(crate) struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    pub(crate) async fn attach(&self, client: ClientId, sender: EventSender) {
        let _ = self
            .sender
            .send(SessionCommand::Attach { client, sender })
            .await;
    }

    pub(crate) async fn detach(&self, client: ClientId) {
        let _ = self.sender.send(SessionCommand::Detach { client }).await;
    }

    pub(crate) async fn intent(&self, client: ClientId, event: ClientEvent) {
        let _ = self
            .sender
            .send(SessionCommand::Intent { client, event })
            .await;
    }
}

/// Spawns the session actor task and returns a handle to it.
pub(crate) fn spawn_session(
    stages: StageSet,
    config: GameConfig,
    channel_size: usize,
) -> SessionHandle {
    let (tx, rx) = mpsc::channel(channel_size);
    let actor = SessionActor {
        store: SessionStore::new(stages, config),
        roles: RoleRegistry::new(),
        senders: HashMap::new(),
        receiver: rx,
    };
    tokio::spawn(actor.run());
    SessionHandle { sender: tx }
}

/// The internal actor state. Runs inside a Tokio task.
struct SessionActor {
    store: SessionStore,
    roles: RoleRegistry,
    senders: HashMap<ClientId, EventSender>,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    async fn run(mut self) {
        tracing::info!(
            stages = self.store.snapshot().stage_count(),
            "session actor started"
        );

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::Attach { client, sender } => {
                    self.senders.insert(client, sender);
                    tracing::debug!(%client, "client attached");
                }
                SessionCommand::Detach { client } => {
                    self.handle_detach(client);
                }
                SessionCommand::Intent { client, event } => {
                    self.handle_intent(client, event);
                }
            }
        }

        tracing::info!("session actor stopped");
    }

    fn handle_detach(&mut self, client: ClientId) {
        self.senders.remove(&client);
        // Disconnection releases the claim but rolls back nothing.
        if let Some(role) = self.roles.release_client(client) {
            tracing::info!(%client, %role, "role released on disconnect");
        } else {
            tracing::debug!(%client, "client detached");
        }
    }

    fn handle_intent(&mut self, client: ClientId, event: ClientEvent) {
        match event {
            ClientEvent::JoinAs { role } => self.handle_join(client, role),
            ClientEvent::LeaveRole { role } => self.handle_leave(client, role),
            ClientEvent::Move { direction } => {
                self.handle_move(client, direction)
            }
            ClientEvent::RestartFirstMaze => self.handle_restart(client),
            ClientEvent::AdminSetMaze { index } => {
                self.handle_set_maze(client, index)
            }
        }
    }

    fn handle_join(&mut self, client: ClientId, name: String) {
        let Some(role) = Role::from_wire(&name) else {
            let err = GameError::UnknownRole(name);
            self.send_error(client, 400, err.to_string());
            return;
        };

        match self.roles.claim(role, client) {
            Ok(()) => {
                tracing::info!(%client, %role, "role claimed");
                self.send_to(client, ServerEvent::RoleAssigned { role });
                let maze =
                    project(self.store.snapshot(), role).into_maze();
                self.send_to(client, ServerEvent::InitMaze { maze });
            }
            Err(RoleError::RoleAlreadyClaimed(role)) => {
                tracing::debug!(%client, %role, "claim rejected: role taken");
                self.send_to(client, ServerEvent::RoleTaken { role });
            }
            Err(err) => self.send_error(client, 409, err.to_string()),
        }
    }

    fn handle_leave(&mut self, client: ClientId, name: String) {
        let Some(role) = Role::from_wire(&name) else {
            let err = GameError::UnknownRole(name);
            self.send_error(client, 400, err.to_string());
            return;
        };

        match self.roles.release(role, client) {
            Ok(()) => tracing::info!(%client, %role, "role released"),
            Err(err) => self.send_error(client, 403, err.to_string()),
        }
    }

    fn handle_move(&mut self, client: ClientId, direction: Direction) {
        let Some(role) = self.roles.role_of(client) else {
            let err = GameError::ActionNotPermitted(
                "no role claimed".into(),
            );
            self.send_error(client, 403, err.to_string());
            return;
        };

        let result =
            self.store.apply(|state| apply_move(state, role, direction));

        match result {
            Err(err) => self.send_error(client, 403, err.to_string()),
            Ok(MoveOutcome::Blocked) => {
                // Legal attempt, no-op outcome: nothing mutated, nothing
                // to broadcast.
                tracing::debug!(%client, %role, %direction, "move blocked");
            }
            Ok(outcome) => {
                tracing::debug!(
                    %client, %role, %direction, ?outcome, "move applied"
                );
                self.broadcast_state();
                match outcome {
                    MoveOutcome::StageCleared => {
                        tracing::info!(
                            stage = self.store.snapshot().stage_index(),
                            "stage cleared, next stage loaded"
                        );
                    }
                    MoveOutcome::GameCleared => {
                        tracing::info!("final stage exited, session cleared");
                        self.broadcast(ServerEvent::GameClear);
                    }
                    _ => {}
                }
            }
        }
    }

    fn handle_restart(&mut self, client: ClientId) {
        match self.roles.role_of(client) {
            Some(Role::Guide | Role::Admin) => {
                self.store.apply(restart);
                tracing::info!(%client, "session restarted to first stage");
                self.broadcast_state();
            }
            _ => {
                let err = GameError::ActionNotPermitted(
                    "restart requires the guide or admin role".into(),
                );
                self.send_error(client, 403, err.to_string());
            }
        }
    }

    fn handle_set_maze(&mut self, client: ClientId, index: usize) {
        if self.roles.role_of(client) != Some(Role::Admin) {
            let err = GameError::ActionNotPermitted(
                "admin-set-maze requires the admin role".into(),
            );
            self.send_error(client, 403, err.to_string());
            return;
        }

        match self.store.apply(|state| set_stage(state, index)) {
            Ok(()) => {
                tracing::info!(%client, stage = index, "admin stage jump");
                self.broadcast_state();
            }
            Err(err) => self.send_error(client, 400, err.to_string()),
        }
    }

    /// Sends every role-holding client its own projection of the session.
    /// Clients that have not claimed a role are still on role selection
    /// and receive nothing.
    fn broadcast_state(&self) {
        let state = self.store.snapshot();
        for (client, sender) in &self.senders {
            let Some(role) = self.roles.role_of(*client) else {
                continue;
            };
            let event = state_event(project(state, role), state.stage_index());
            let _ = sender.send(event);
        }
    }

    /// Sends one event to every role-holding client.
    fn broadcast(&self, event: ServerEvent) {
        for (client, sender) in &self.senders {
            if self.roles.role_of(*client).is_some() {
                let _ = sender.send(event.clone());
            }
        }
    }

    /// Sends an event to a single client. Silently drops if the receiver
    /// is gone (connection already closed).
    fn send_to(&self, client: ClientId, event: ServerEvent) {
        if let Some(sender) = self.senders.get(&client) {
            let _ = sender.send(event);
        }
    }

    fn send_error(&self, client: ClientId, code: u16, message: String) {
        self.send_to(client, ServerEvent::Error { code, message });
    }
}

/// Flattens a projected view into the `game-state` wire event.
fn state_event(view: View, stage_index: usize) -> ServerEvent {
    match view {
        View::Full(v) => ServerEvent::GameState {
            player_position: v.player,
            y_positions: v.hazards,
            maze: v.maze,
            maze_index: stage_index,
            maze_count: None,
        },
        View::Mover(v) => ServerEvent::GameState {
            player_position: v.player,
            y_positions: v.hazards,
            maze: v.maze,
            maze_index: stage_index,
            maze_count: None,
        },
        View::Admin(v) => ServerEvent::GameState {
            player_position: v.player,
            y_positions: v.hazards,
            maze: v.maze,
            maze_index: v.stage_index,
            maze_count: Some(v.stage_count),
        },
    }
}

// =========================================================================
// Tests
// =========================================================================

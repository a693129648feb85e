//! Integration tests for the lightmaze server: full WebSocket flow from
//! connect through role claims, movement, progression, and admin commands.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use lightmaze::LightmazeServerBuilder;
use lightmaze_game::{Grid, StageSet, StageTemplate};
use lightmaze_protocol::{
    Cell, ClientEvent, Codec, Direction, JsonCodec, Position, Role,
    ServerEvent,
};
use tokio_tungstenite::tungstenite::Message;

type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

// =========================================================================
// Helpers
// =========================================================================

/// The 5x5 corridor: player (1,1), exit (3,3), solved by
/// right, right, down, down.
fn corridor_stage() -> StageTemplate {
    let grid = Grid::from_codes(&[
        &[1, 1, 1, 1, 1],
        &[1, 0, 0, 0, 1],
        &[1, 1, 1, 0, 1],
        &[1, 1, 1, 2, 1],
        &[1, 1, 1, 1, 1],
    ])
    .unwrap();
    StageTemplate::new(grid, Position::new(1, 1), vec![]).unwrap()
}

/// Starts a server on a random port with the given stages; returns the
/// address.
async fn start_server(stages: StageSet) -> String {
    let server = LightmazeServerBuilder::new()
        .bind("127.0.0.1:0")
        .stages(stages)
        .build()
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Single corridor stage: reaching the exit clears the whole session.
async fn start_corridor_server() -> String {
    start_server(StageSet::new(vec![corridor_stage()]).unwrap()).await
}

async fn connect(addr: &str) -> Ws {
    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}"))
        .await
        .expect("should connect");
    ws
}

async fn send(ws: &mut Ws, event: &ClientEvent) {
    let bytes = JsonCodec.encode(event).unwrap();
    ws.send(Message::Binary(bytes.into())).await.unwrap();
}

async fn recv(ws: &mut Ws) -> ServerEvent {
    let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for event")
        .expect("stream ended")
        .expect("websocket error");
    JsonCodec.decode(&msg.into_data()).expect("decodable event")
}

/// Claims a role and drains the role-assigned + init-maze pair, returning
/// the seeded maze.
async fn claim(ws: &mut Ws, role: &str) -> Vec<Vec<Cell>> {
    send(
        ws,
        &ClientEvent::JoinAs {
            role: role.to_string(),
        },
    )
    .await;
    let assigned = recv(ws).await;
    assert!(
        matches!(assigned, ServerEvent::RoleAssigned { .. }),
        "expected role-assigned, got {assigned:?}"
    );
    match recv(ws).await {
        ServerEvent::InitMaze { maze } => maze,
        other => panic!("expected init-maze, got {other:?}"),
    }
}

fn has_wall(maze: &[Vec<Cell>]) -> bool {
    maze.iter().flatten().any(|c| *c == Cell::Wall)
}

// =========================================================================
// Role claims
// =========================================================================

#[tokio::test]
async fn test_claim_assigns_role_and_seeds_projected_view() {
    let addr = start_corridor_server().await;

    let mut guide = connect(&addr).await;
    let guide_maze = claim(&mut guide, "guide").await;
    assert!(has_wall(&guide_maze), "guide seed view keeps walls");

    let mut mover = connect(&addr).await;
    let mover_maze = claim(&mut mover, "mover-right").await;
    assert!(!has_wall(&mover_maze), "mover seed view is masked");
    // Exits survive the mask.
    assert_eq!(mover_maze[3][3], Cell::Exit);
}

#[tokio::test]
async fn test_contested_role_goes_to_exactly_one_client() {
    let addr = start_corridor_server().await;

    let mut first = connect(&addr).await;
    claim(&mut first, "guide").await;

    let mut second = connect(&addr).await;
    send(
        &mut second,
        &ClientEvent::JoinAs {
            role: "guide".into(),
        },
    )
    .await;

    assert_eq!(
        recv(&mut second).await,
        ServerEvent::RoleTaken { role: Role::Guide }
    );
}

#[tokio::test]
async fn test_left_role_is_reclaimable() {
    let addr = start_corridor_server().await;

    let mut first = connect(&addr).await;
    claim(&mut first, "mover-up").await;
    send(
        &mut first,
        &ClientEvent::LeaveRole {
            role: "mover-up".into(),
        },
    )
    .await;

    // The release has no confirmation event; the observable effect is
    // that another client can now claim the role.
    let mut second = connect(&addr).await;
    claim(&mut second, "mover-up").await;
}

#[tokio::test]
async fn test_disconnect_releases_role() {
    let addr = start_corridor_server().await;

    {
        let mut first = connect(&addr).await;
        claim(&mut first, "jumper").await;
        // Dropped here: the connection closes.
    }

    // The claim may take a moment to be released after the socket drops.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let mut second = connect(&addr).await;
    claim(&mut second, "jumper").await;
}

#[tokio::test]
async fn test_unknown_role_gets_error() {
    let addr = start_corridor_server().await;

    let mut ws = connect(&addr).await;
    send(
        &mut ws,
        &ClientEvent::JoinAs {
            role: "wizard".into(),
        },
    )
    .await;

    let ServerEvent::Error { code, message } = recv(&mut ws).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 400);
    assert!(message.contains("wizard"));
}

// =========================================================================
// Movement and projection
// =========================================================================

#[tokio::test]
async fn test_move_broadcasts_per_role_snapshots() {
    let addr = start_corridor_server().await;

    let mut guide = connect(&addr).await;
    claim(&mut guide, "guide").await;
    let mut mover = connect(&addr).await;
    claim(&mut mover, "mover-right").await;

    send(
        &mut mover,
        &ClientEvent::Move {
            direction: Direction::Right,
        },
    )
    .await;

    let ServerEvent::GameState {
        player_position: guide_pos,
        maze: guide_maze,
        maze_index,
        maze_count,
        ..
    } = recv(&mut guide).await
    else {
        panic!("guide should receive game-state");
    };
    let ServerEvent::GameState {
        player_position: mover_pos,
        maze: mover_maze,
        ..
    } = recv(&mut mover).await
    else {
        panic!("mover should receive game-state");
    };

    assert_eq!(guide_pos, Position::new(2, 1));
    assert_eq!(mover_pos, guide_pos);
    assert!(has_wall(&guide_maze));
    assert!(!has_wall(&mover_maze));
    assert_eq!(maze_index, 0);
    // Stage metadata is admin-only.
    assert_eq!(maze_count, None);
}

#[tokio::test]
async fn test_mismatched_direction_gets_error_and_no_broadcast() {
    let addr = start_corridor_server().await;

    let mut mover = connect(&addr).await;
    claim(&mut mover, "mover-right").await;

    send(
        &mut mover,
        &ClientEvent::Move {
            direction: Direction::Left,
        },
    )
    .await;

    let ServerEvent::Error { code, .. } = recv(&mut mover).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 403);

    // State is unchanged: a legal move afterwards starts from (1,1).
    send(
        &mut mover,
        &ClientEvent::Move {
            direction: Direction::Right,
        },
    )
    .await;
    let ServerEvent::GameState {
        player_position, ..
    } = recv(&mut mover).await
    else {
        panic!("expected game-state");
    };
    assert_eq!(player_position, Position::new(2, 1));
}

#[tokio::test]
async fn test_move_without_role_gets_error() {
    let addr = start_corridor_server().await;

    let mut ws = connect(&addr).await;
    send(
        &mut ws,
        &ClientEvent::Move {
            direction: Direction::Up,
        },
    )
    .await;

    let ServerEvent::Error { code, .. } = recv(&mut ws).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 403);
}

#[tokio::test]
async fn test_malformed_frame_gets_error() {
    let addr = start_corridor_server().await;

    let mut ws = connect(&addr).await;
    ws.send(Message::Text("not an event".into())).await.unwrap();

    let ServerEvent::Error { code, .. } = recv(&mut ws).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 400);
}

// =========================================================================
// Clearing and restarting
// =========================================================================

#[tokio::test]
async fn test_corridor_run_clears_game_and_restart_resets() {
    let addr = start_corridor_server().await;

    let mut guide = connect(&addr).await;
    claim(&mut guide, "guide").await;
    let mut right = connect(&addr).await;
    claim(&mut right, "mover-right").await;
    let mut down = connect(&addr).await;
    claim(&mut down, "mover-down").await;

    // First three moves: every role-holder gets one snapshot per move.
    let script = [
        (Direction::Right, true),
        (Direction::Right, true),
        (Direction::Down, false),
    ];
    for (direction, from_right) in script {
        {
            let ws = if from_right { &mut right } else { &mut down };
            send(ws, &ClientEvent::Move { direction }).await;
        }
        for client in [&mut guide, &mut right, &mut down] {
            assert!(matches!(
                recv(client).await,
                ServerEvent::GameState { .. }
            ));
        }
    }

    // Final move reaches the exit: snapshot plus game-clear for everyone.
    send(
        &mut down,
        &ClientEvent::Move {
            direction: Direction::Down,
        },
    )
    .await;
    for client in [&mut guide, &mut right, &mut down] {
        let ServerEvent::GameState {
            player_position, ..
        } = recv(client).await
        else {
            panic!("expected game-state before game-clear");
        };
        assert_eq!(player_position, Position::new(3, 3));
        assert_eq!(recv(client).await, ServerEvent::GameClear);
    }

    // The guide restarts the run.
    send(&mut guide, &ClientEvent::RestartFirstMaze).await;
    for client in [&mut guide, &mut right, &mut down] {
        let ServerEvent::GameState {
            player_position,
            maze_index,
            ..
        } = recv(client).await
        else {
            panic!("expected game-state after restart");
        };
        assert_eq!(player_position, Position::new(1, 1));
        assert_eq!(maze_index, 0);
    }
}

#[tokio::test]
async fn test_restart_from_mover_is_rejected() {
    let addr = start_corridor_server().await;

    let mut mover = connect(&addr).await;
    claim(&mut mover, "mover-left").await;

    send(&mut mover, &ClientEvent::RestartFirstMaze).await;

    let ServerEvent::Error { code, .. } = recv(&mut mover).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 403);
}

// =========================================================================
// Admin commands
// =========================================================================

#[tokio::test]
async fn test_admin_stage_jump_and_range_check() {
    // Builtin set: three stages.
    let addr = start_server(StageSet::builtin()).await;

    let mut admin = connect(&addr).await;
    claim(&mut admin, "admin").await;

    send(&mut admin, &ClientEvent::AdminSetMaze { index: 1 }).await;
    let ServerEvent::GameState {
        maze_index,
        maze_count,
        ..
    } = recv(&mut admin).await
    else {
        panic!("expected game-state after stage jump");
    };
    assert_eq!(maze_index, 1);
    assert_eq!(maze_count, Some(3));

    send(&mut admin, &ClientEvent::AdminSetMaze { index: 3 }).await;
    let ServerEvent::Error { code, .. } = recv(&mut admin).await else {
        panic!("expected error for out-of-range index");
    };
    assert_eq!(code, 400);
}

#[tokio::test]
async fn test_admin_set_maze_from_guide_is_rejected() {
    let addr = start_server(StageSet::builtin()).await;

    let mut guide = connect(&addr).await;
    claim(&mut guide, "guide").await;

    send(&mut guide, &ClientEvent::AdminSetMaze { index: 1 }).await;

    let ServerEvent::Error { code, .. } = recv(&mut guide).await else {
        panic!("expected error event");
    };
    assert_eq!(code, 403);
}

use super::*;

use client_core::{CommandDispatcher, ControlPad, TcpTransport};
use shared::{domain::Point, protocol::Command};
use tokio::{io::AsyncWriteExt, time::timeout};

use crate::motion::Gait;

async fn spawn_robot() -> (SharedMotion, u16) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let motion = SharedMotion::default();
    tokio::spawn(serve(listener, Arc::clone(&motion), Duration::from_secs(1)));
    (motion, port)
}

async fn wait_for(motion: &SharedMotion, ready: impl Fn(&MotionState) -> bool) -> MotionState {
    timeout(Duration::from_secs(5), async {
        loop {
            {
                let state = motion.read().await;
                if ready(&state) {
                    return state.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("robot state timeout")
}

#[tokio::test]
async fn standby_line_clears_motion() {
    let motion = SharedMotion::default();
    apply_line(&motion, "Turn left\n").await;
    assert_eq!(motion.read().await.gait(), Gait::TurnLeft);

    apply_line(&motion, "Standby\n").await;
    let state = motion.read().await;
    assert_eq!(state.current, None);
    assert_eq!(state.commands_received, 2);
}

#[tokio::test]
async fn unknown_line_falls_back_to_standby() {
    let motion = SharedMotion::default();
    apply_line(&motion, "Fast back").await;
    apply_line(&motion, "twist").await;

    let state = motion.read().await;
    assert_eq!(state.current, None);
    assert_eq!(state.commands_received, 1);
}

#[tokio::test]
async fn empty_line_is_ignored() {
    let motion = SharedMotion::default();
    apply_line(&motion, "Move back").await;
    apply_line(&motion, "").await;
    assert_eq!(motion.read().await.current, Some(Command::MoveBack));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn disconnect_returns_robot_to_standby() {
    let (motion, port) = spawn_robot().await;

    let mut stream = TcpStream::connect(("127.0.0.1", port))
        .await
        .expect("connect");
    stream.write_all(b"Fast forward\n").await.expect("write");
    stream.flush().await.expect("flush");

    let state = wait_for(&motion, |state| state.commands_received == 1).await;
    assert_eq!(state.current, Some(Command::FastForward));

    drop(stream);
    let state = wait_for(&motion, |state| state.current.is_none()).await;
    assert_eq!(state.gait(), Gait::Standby);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn pad_touches_reach_the_robot_in_order() {
    let (motion, port) = spawn_robot().await;

    let transport = TcpTransport::new("127.0.0.1", port);
    transport.connect().await.expect("connect");
    let mut pad = ControlPad::new(CommandDispatcher::spawn(transport.clone(), 8));
    pad.measure(180.0, 180.0);

    assert_eq!(pad.touch(Point::new(90.0, 40.0)), Some(Command::MoveForward));
    assert_eq!(pad.touch(Point::new(165.0, 90.0)), Some(Command::TurnRight));
    assert_eq!(pad.touch(Point::new(90.0, 170.0)), Some(Command::FastBack));

    let stats = pad.shutdown().await;
    assert_eq!(stats.sent, 3);

    let state = wait_for(&motion, |state| state.commands_received == 3).await;
    assert_eq!(state.current, Some(Command::FastBack));
    assert_eq!(state.gait(), Gait::FastBackward);

    transport.disconnect().await;
    wait_for(&motion, |state| state.current.is_none()).await;
}

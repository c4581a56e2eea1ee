mod support;

use jet_duel::domain::FacingDirection;
use jet_duel::domain::ports::{Key, SoundCue};
use jet_duel::use_cases::types::{PlayerSlot, SessionCommand, SessionNotice};

use std::time::Duration;

#[tokio::test]
async fn when_a_player_runs_out_of_lives_then_the_game_ends_exactly_once() {
    let session = support::start();
    let mut notices = session.handle.notices();

    for _ in 0..3 {
        session
            .handle
            .command_tx
            .send(SessionCommand::SelfDestruct(PlayerSlot::One))
            .await
            .expect("expected the session to accept commands");
    }

    let notice = support::next_notice_matching(&mut notices, |n| {
        matches!(n, SessionNotice::GameOver { .. })
    })
    .await;
    assert_eq!(
        notice,
        SessionNotice::GameOver {
            winner: PlayerSlot::Two
        }
    );
    assert!(session.audio.contains(SoundCue::Explosion));

    // A decided session raises nothing further.
    loop {
        match tokio::time::timeout(Duration::from_millis(300), notices.recv()).await {
            Err(_) => break,
            Ok(Ok(notice)) => {
                assert!(!matches!(notice, SessionNotice::GameOver { .. }));
            }
            Ok(Err(_)) => break,
        }
    }

    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_a_craft_explodes_then_the_sequence_runs_to_completion() {
    let session = support::start();
    let mut snapshots = session.handle.snapshot_rx.clone();

    session
        .handle
        .command_tx
        .send(SessionCommand::SelfDestruct(PlayerSlot::One))
        .await
        .expect("expected the session to accept commands");

    support::wait_for_state(&mut snapshots, |s| s.players[0].exploding).await;
    let settled = support::wait_for_state(&mut snapshots, |s| !s.players[0].exploding).await;
    assert_eq!(settled.players[0].lives, 2);

    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_saved_then_loading_restores_the_saved_lives() {
    let session = support::start();
    let mut notices = session.handle.notices();
    let mut snapshots = session.handle.snapshot_rx.clone();

    session
        .handle
        .command_tx
        .send(SessionCommand::Save)
        .await
        .expect("expected the session to accept commands");
    support::next_notice_matching(&mut notices, |n| *n == SessionNotice::Saved).await;

    session
        .handle
        .command_tx
        .send(SessionCommand::SelfDestruct(PlayerSlot::One))
        .await
        .expect("expected the session to accept commands");
    support::wait_for_state(&mut snapshots, |s| s.players[0].lives == 2).await;

    session
        .handle
        .command_tx
        .send(SessionCommand::Load)
        .await
        .expect("expected the session to accept commands");
    support::next_notice_matching(&mut notices, |n| *n == SessionNotice::Loaded).await;
    support::wait_for_state(&mut snapshots, |s| s.players[0].lives == 3).await;

    let _ = std::fs::remove_file(&session.save_path);
    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_the_save_file_is_missing_then_loading_fails_and_state_holds() {
    let session = support::start();
    let mut notices = session.handle.notices();
    let mut snapshots = session.handle.snapshot_rx.clone();

    session
        .handle
        .command_tx
        .send(SessionCommand::Load)
        .await
        .expect("expected the session to accept commands");

    let notice = support::next_notice_matching(&mut notices, |n| {
        matches!(n, SessionNotice::LoadFailed { .. })
    })
    .await;
    let SessionNotice::LoadFailed { reason } = notice else {
        unreachable!();
    };
    assert!(reason.contains("i/o"));

    let state = support::wait_for_state(&mut snapshots, |s| s.tick > 0).await;
    assert_eq!(state.players[0].lives, 3);
    assert_eq!(state.players[1].lives, 3);

    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_rotated_then_the_published_facing_walks_the_cycle() {
    let session = support::start();
    let mut snapshots = session.handle.snapshot_rx.clone();

    let cycle = [
        FacingDirection::Left,
        FacingDirection::Backward,
        FacingDirection::Right,
        FacingDirection::Forward,
    ];
    for expected in cycle {
        session
            .handle
            .command_tx
            .send(SessionCommand::Rotate(PlayerSlot::One))
            .await
            .expect("expected the session to accept commands");
        support::wait_for_state(&mut snapshots, |s| s.players[0].facing == expected).await;
    }

    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_movement_keys_are_held_then_the_craft_accelerates_and_the_engine_spools() {
    let session = support::start();
    let mut snapshots = session.handle.snapshot_rx.clone();

    let start = support::wait_for_state(&mut snapshots, |s| s.tick > 0).await;
    session.input.press(Key::Up);

    let moved = support::wait_for_state(&mut snapshots, |s| {
        s.players[0].y < start.players[0].y - 5.0
    })
    .await;
    assert!(moved.players[0].y < start.players[0].y);
    session.input.release(Key::Up);

    assert!(session.audio.contains(SoundCue::JetSpoolUp));
    assert!(session.render.presents() > 0);

    session.handle.shutdown.notify_one();
}

#[tokio::test]
async fn when_player_two_fires_then_its_round_travels_down_its_forward_axis() {
    let session = support::start();
    let mut snapshots = session.handle.snapshot_rx.clone();

    // The fresh weapon needs a handful of frames before the countdown
    // clears its initial value.
    support::wait_for_state(&mut snapshots, |s| s.tick > 10).await;
    session
        .handle
        .command_tx
        .send(SessionCommand::OpenFire(PlayerSlot::Two))
        .await
        .expect("expected the session to accept commands");

    let armed = support::wait_for_state(&mut snapshots, |s| !s.rounds.is_empty()).await;
    let first_y = armed.rounds[0].y;
    let later = support::wait_for_state(&mut snapshots, |s| {
        s.rounds.first().is_some_and(|r| r.y > first_y + 3.0)
    })
    .await;
    assert_eq!(later.rounds[0].owner, PlayerSlot::Two);

    session.handle.shutdown.notify_one();
}

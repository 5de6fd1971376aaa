use std::{sync::Arc, time::Duration};

use tokio::time::sleep;

use pomodoro_server::{
    services::InMemoryMessageStore, tasks::countdown_task, AppState, Mode, Period,
};

fn spawn_timer(mode: Mode) -> Arc<AppState> {
    let state = Arc::new(AppState::new(
        0,
        "127.0.0.1".to_string(),
        mode,
        Arc::new(InMemoryMessageStore::new()),
    ));
    tokio::spawn(countdown_task(Arc::clone(&state)));
    state
}

fn remaining(state: &AppState) -> u64 {
    state.get_timer_snapshot().unwrap().remaining_seconds
}

#[tokio::test(start_paused = true)]
async fn running_timer_counts_down_each_second() {
    let state = spawn_timer(Mode::Moderate);
    state.start_or_pause().unwrap();

    sleep(Duration::from_millis(3_500)).await;
    assert_eq!(remaining(&state), 15 * 60 - 3);
    assert_eq!(state.get_timer_snapshot().unwrap().clock, "14:57");
}

#[tokio::test(start_paused = true)]
async fn paused_timer_is_frozen() {
    let state = spawn_timer(Mode::Moderate);
    state.start_or_pause().unwrap();
    sleep(Duration::from_millis(2_500)).await;
    state.start_or_pause().unwrap();

    let frozen = remaining(&state);
    assert_eq!(frozen, 15 * 60 - 2);
    sleep(Duration::from_secs(30)).await;
    assert_eq!(remaining(&state), frozen);
}

#[tokio::test(start_paused = true)]
async fn mode_change_discards_pending_tick() {
    let state = spawn_timer(Mode::Moderate);
    state.start_or_pause().unwrap();
    sleep(Duration::from_millis(900)).await;

    state.change_mode(Mode::Neurotypical).unwrap();
    sleep(Duration::from_millis(600)).await;
    assert_eq!(remaining(&state), 25 * 60, "no stale decrement after mode change");

    sleep(Duration::from_millis(500)).await;
    assert_eq!(remaining(&state), 25 * 60 - 1);
}

#[tokio::test(start_paused = true)]
async fn expiry_advances_and_keeps_running() {
    let state = spawn_timer(Mode::Custom);
    state.set_custom_duration(Period::Work, "1").unwrap();
    state.apply_custom_durations().unwrap();
    state.start_or_pause().unwrap();

    sleep(Duration::from_millis(60_500)).await;
    let snapshot = state.get_timer_snapshot().unwrap();
    assert_eq!(snapshot.period, Period::ShortBreak);
    assert_eq!(snapshot.completed_work_cycles, 1);
    assert!(snapshot.running);
    assert_eq!(snapshot.remaining_seconds, 5 * 60);
}

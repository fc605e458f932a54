//! Integration tests for the break cycle through the public API.

use breakbell_core::audio::{ChannelCall, ChannelLog};
use breakbell_core::timer::BREAK_SECS;
use breakbell_core::{
    AudioCoordinator, Controller, Event, FixedIntervals, IntervalSource, MemoryChannel,
    SeededIntervals, Session, TimerEngine, TimerState,
};

fn controller_with<S: IntervalSource>(intervals: S) -> (Controller<S>, ChannelLog, ChannelLog) {
    let alert = MemoryChannel::new("alert");
    let ambient = MemoryChannel::new("ambient");
    let (alert_log, ambient_log) = (alert.log(), ambient.log());
    let audio = AudioCoordinator::new(Box::new(alert), Box::new(ambient));
    (
        Controller::new(TimerEngine::new(intervals), audio),
        alert_log,
        ambient_log,
    )
}

#[test]
fn test_threshold_ten_cue_and_break_timeline() {
    let (mut ctl, alert, _) = controller_with(FixedIntervals::new([10, 200]));
    ctl.start();

    let mut timeline = Vec::new();
    for _ in 0..10 {
        for event in ctl.tick() {
            if !matches!(event, Event::Tick { .. }) {
                timeline.push((ctl.session().elapsed_secs, event.kind()));
            }
        }
    }

    assert_eq!(timeline, vec![(6, "PreBreakCue"), (10, "BreakStarted")]);
    assert_eq!(alert.plays(), 1);
    assert_eq!(ctl.state(), TimerState::Break);
    assert_eq!(ctl.session().break_secs_remaining, BREAK_SECS);
}

#[test]
fn test_break_countdown_and_new_threshold() {
    let (mut ctl, _, ambient) = controller_with(FixedIntervals::new([10, 250]));
    ctl.start();
    for _ in 0..10 {
        ctl.tick();
    }

    let mut remaining = Vec::new();
    for _ in 0..BREAK_SECS {
        ctl.tick();
        remaining.push(ctl.session().break_secs_remaining);
    }

    assert_eq!(remaining, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, BREAK_SECS]);
    let s = ctl.session();
    assert!(!s.on_break);
    assert_eq!(s.elapsed_secs, 20);
    assert_eq!(s.next_break_at, 270);
    assert!(s.next_break_at > s.elapsed_secs);
    assert_eq!(ambient.calls().last(), Some(&ChannelCall::Stop));
}

#[test]
fn test_many_cycles_with_random_intervals() {
    let (mut ctl, alert, _) = controller_with(SeededIntervals::new(2024));
    ctl.start();

    let mut breaks = 0;
    let mut last_break_end = 0;
    for _ in 0..3_000 {
        for event in ctl.tick() {
            match event {
                Event::BreakStarted { .. } => breaks += 1,
                Event::BreakEnded {
                    elapsed_secs,
                    interval_secs,
                    next_break_at,
                    ..
                } => {
                    assert!((180..=300).contains(&interval_secs));
                    assert_eq!(next_break_at, elapsed_secs + interval_secs);
                    last_break_end = elapsed_secs;
                }
                _ => {}
            }
        }
    }

    assert!(breaks >= 3_000 / 310, "only {breaks} breaks");
    assert!(last_break_end > 0);
    // A cue may already have fired for a break that hasn't started yet.
    assert!(alert.plays() == breaks || alert.plays() == breaks + 1);
}

#[test]
fn test_pause_resume_keeps_threshold() {
    let (mut ctl, _, _) = controller_with(FixedIntervals::new([30, 99]));
    ctl.start();
    for _ in 0..5 {
        ctl.tick();
    }
    ctl.toggle();
    assert_eq!(ctl.state(), TimerState::Paused);
    assert!(ctl.tick().is_empty());

    ctl.toggle();
    assert_eq!(ctl.session().next_break_at, 30);
    assert_eq!(ctl.session().elapsed_secs, 5);
}

#[test]
fn test_reset_then_fresh_start_redraws() {
    let (mut ctl, _, ambient) = controller_with(FixedIntervals::new([30, 45]));
    ctl.start();
    for _ in 0..12 {
        ctl.tick();
    }
    ctl.reset();
    assert_eq!(*ctl.session(), Session::new());
    assert_eq!(ambient.stops(), 1);

    ctl.start();
    assert_eq!(ctl.session().next_break_at, 45);
}

#[test]
fn test_failing_audio_never_blocks_the_timer() {
    let audio = AudioCoordinator::new(
        Box::new(MemoryChannel::failing("alert")),
        Box::new(MemoryChannel::failing("ambient")),
    );
    let mut ctl = Controller::new(TimerEngine::new(FixedIntervals::new([8, 200])), audio);
    ctl.start();
    for _ in 0..18 {
        ctl.tick();
    }
    let s = ctl.session();
    assert!(!s.on_break);
    assert_eq!(s.next_break_at, 218);
}

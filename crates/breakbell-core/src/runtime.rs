//! The event loop that drives a [`Controller`].
//!
//! One task owns the controller. It waits on two things: commands from the
//! front end and the tick interval. The interval only exists while the
//! session is running, and a fresh one is installed on every start, so there
//! is never more than one tick source and a resumed timer ticks one full
//! second after the resume.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::debug;

use crate::events::Event;
use crate::scheduler::IntervalSource;
use crate::timer::Controller;

/// Tick period of the session clock.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// What the front end can ask the runtime to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    /// Emit a `StateSnapshot` event.
    Snapshot,
    /// Stop audio and return the controller.
    Quit,
}

/// Run until `Quit` or until every command sender is dropped.
///
/// Events go to `events`; a closed event receiver is ignored. Returns the
/// controller with its audio stopped and no timers left behind.
pub async fn run<S: IntervalSource>(
    mut controller: Controller<S>,
    mut commands: mpsc::Receiver<Command>,
    events: mpsc::UnboundedSender<Event>,
) -> Controller<S> {
    let mut ticker: Option<Interval> = None;

    loop {
        tokio::select! {
            command = commands.recv() => {
                let command = match command {
                    None | Some(Command::Quit) => break,
                    Some(command) => command,
                };
                debug!(?command, "command received");
                let event = match command {
                    Command::Start => controller.start(),
                    Command::Pause => controller.pause(),
                    Command::Toggle => controller.toggle(),
                    Command::Reset => Some(controller.reset()),
                    Command::Snapshot => Some(controller.snapshot()),
                    Command::Quit => None,
                };
                if let Some(event) = event {
                    let _ = events.send(event);
                }
                sync_ticker(&mut ticker, controller.is_running());
            }
            _ = next_tick(&mut ticker) => {
                for event in controller.tick() {
                    let _ = events.send(event);
                }
            }
        }
    }

    controller.shutdown();
    debug!("runtime stopped");
    controller
}

fn sync_ticker(ticker: &mut Option<Interval>, running: bool) {
    match (running, ticker.is_some()) {
        (true, false) => {
            let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            *ticker = Some(interval);
        }
        (false, true) => *ticker = None,
        _ => {}
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{AudioCoordinator, ChannelLog, MemoryChannel};
    use crate::scheduler::FixedIntervals;
    use crate::timer::{Session, TimerEngine};

    type Harness = (
        mpsc::Sender<Command>,
        mpsc::UnboundedReceiver<Event>,
        tokio::task::JoinHandle<Controller<FixedIntervals>>,
        ChannelLog,
    );

    fn spawn(values: &[u64]) -> Harness {
        let ambient = MemoryChannel::new("ambient");
        let ambient_log = ambient.log();
        let audio = AudioCoordinator::new(Box::new(MemoryChannel::new("alert")), Box::new(ambient));
        let engine = TimerEngine::new(FixedIntervals::new(values.iter().copied()));
        let (cmd_tx, cmd_rx) = mpsc::channel(8);
        let (ev_tx, ev_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(Controller::new(engine, audio), cmd_rx, ev_tx));
        (cmd_tx, ev_rx, handle, ambient_log)
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<Event> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    fn ticks(events: &[Event]) -> usize {
        events.iter().filter(|e| matches!(e, Event::Tick { .. })).count()
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let (tx, mut rx, handle, _) = spawn(&[200]);
        tx.send(Command::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        let events = drain(&mut rx);
        assert_eq!(events[0].kind(), "TimerStarted");
        assert_eq!(ticks(&events), 3);

        tx.send(Command::Quit).await.unwrap();
        let controller = handle.await.unwrap();
        assert_eq!(controller.session().elapsed_secs, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticking() {
        let (tx, mut rx, handle, _) = spawn(&[200]);
        tx.send(Command::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        tx.send(Command::Toggle).await.unwrap();
        tokio::time::sleep(Duration::from_secs(10)).await;

        let events = drain(&mut rx);
        assert_eq!(ticks(&events), 2);
        assert_eq!(events.last().unwrap().kind(), "TimerPaused");

        drop(tx);
        let controller = handle.await.unwrap();
        assert!(!controller.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_toggles_never_double_tick() {
        let (tx, mut rx, handle, _) = spawn(&[200]);
        for _ in 0..5 {
            tx.send(Command::Toggle).await.unwrap();
        }
        tokio::time::sleep(Duration::from_millis(4_500)).await;
        assert_eq!(ticks(&drain(&mut rx)), 4);

        tx.send(Command::Quit).await.unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn full_break_cycle_runs_on_the_clock() {
        let (tx, mut rx, handle, ambient) = spawn(&[10, 180]);
        tx.send(Command::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(20_500)).await;

        let kinds: Vec<&str> = drain(&mut rx)
            .iter()
            .map(Event::kind)
            .filter(|k| *k != "Tick")
            .collect();
        assert_eq!(
            kinds,
            vec!["TimerStarted", "PreBreakCue", "BreakStarted", "BreakEnded"]
        );
        assert_eq!(ambient.plays(), 1);
        assert_eq!(ambient.stops(), 1);

        tx.send(Command::Quit).await.unwrap();
        let controller = handle.await.unwrap();
        assert_eq!(controller.session().next_break_at, 200);
        assert!(!controller.audio().fade_active());
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_ticks_and_clears_session() {
        let (tx, mut rx, handle, ambient) = spawn(&[200]);
        tx.send(Command::Start).await.unwrap();
        tokio::time::sleep(Duration::from_millis(1_500)).await;
        tx.send(Command::Reset).await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(Command::Snapshot).await.unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        let events = drain(&mut rx);
        assert_eq!(ticks(&events), 1);
        match events.last().unwrap() {
            Event::StateSnapshot { elapsed_secs, .. } => assert_eq!(*elapsed_secs, 0),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
        assert_eq!(ambient.stops(), 1);

        tx.send(Command::Quit).await.unwrap();
        let controller = handle.await.unwrap();
        assert_eq!(*controller.session(), Session::new());
    }
}

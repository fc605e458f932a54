use std::io::BufRead;

use chrono::Utc;
use clap::Args;
use tokio::sync::mpsc;

use breakbell_core::runtime::{self, Command};
use breakbell_core::{
    Config, Controller, Database, Event, IntervalSource, RandomIntervals, SeededIntervals,
    ThemePreference, ThemeStore, TimerEngine,
};

use crate::audio;
use crate::render::Renderer;

const HELP: &str = "keys: [enter]/s start-pause  p pause  r reset  t theme  ? help  q quit";

#[derive(Args)]
pub struct RunArgs {
    /// Never touch the audio device
    #[arg(long)]
    no_audio: bool,
    /// Print events as JSON lines instead of the live clock
    #[arg(long)]
    json: bool,
    /// Start the clock immediately
    #[arg(long)]
    autostart: bool,
    /// Seed the break scheduler for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

/// A line typed by the user, decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Command(Command),
    ToggleTheme,
    Help,
}

fn parse_input(line: &str) -> Option<Input> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" | "s" => Some(Input::Command(Command::Toggle)),
        "p" => Some(Input::Command(Command::Pause)),
        "r" => Some(Input::Command(Command::Reset)),
        "q" | "quit" | "exit" => Some(Input::Command(Command::Quit)),
        "t" => Some(Input::ToggleTheme),
        "?" | "h" | "help" => Some(Input::Help),
        _ => None,
    }
}

/// Read stdin on a plain thread so a blocked read never holds up shutdown.
fn spawn_stdin_reader() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
    rx
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let theme = ThemePreference::load(Database::open()?)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(session(args, config, theme))
}

async fn session<T: ThemeStore>(
    args: RunArgs,
    config: Config,
    mut theme: ThemePreference<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (audio, _output) = audio::open(&config.audio, args.no_audio);
    let intervals: Box<dyn IntervalSource + Send> = match args.seed {
        Some(seed) => Box::new(SeededIntervals::new(seed)),
        None => Box::new(RandomIntervals),
    };
    let controller = Controller::new(TimerEngine::new(intervals), audio)
        .with_fade_in_secs(config.audio.fade_in_secs);

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (ev_tx, mut ev_rx) = mpsc::unbounded_channel();
    let runner = tokio::spawn(runtime::run(controller, cmd_rx, ev_tx));
    let mut input = spawn_stdin_reader();

    let mut renderer = Renderer::new(
        std::io::stdout(),
        args.json,
        config.ui.clone(),
        theme.current(),
    );
    if !args.json {
        println!("{HELP}");
    }
    if args.autostart {
        cmd_tx.send(Command::Start).await?;
    }
    cmd_tx.send(Command::Snapshot).await?;

    loop {
        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else { break };
                match parse_input(&line) {
                    Some(Input::Command(Command::Quit)) => break,
                    Some(Input::Command(command)) => {
                        if cmd_tx.send(command).await.is_err() {
                            break;
                        }
                    }
                    Some(Input::ToggleTheme) => {
                        let theme = theme.toggle_theme()?;
                        renderer.emit(&Event::ThemeChanged { theme, at: Utc::now() })?;
                    }
                    Some(Input::Help) => {
                        if !args.json {
                            println!("\n{HELP}");
                        }
                    }
                    None => tracing::warn!(input = %line.trim(), "unknown key"),
                }
            }
            Some(event) = ev_rx.recv() => renderer.emit(&event)?,
        }
    }

    let _ = cmd_tx.send(Command::Quit).await;
    drop(cmd_tx);
    let controller = runner.await?;
    while let Ok(event) = ev_rx.try_recv() {
        renderer.emit(&event)?;
    }
    renderer.emit(&controller.snapshot())?;
    if !args.json {
        println!();
    }
    Ok(())
}

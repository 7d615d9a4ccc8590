mod config;
mod events;
mod mixer;
mod runner;
mod tui;

use std::io;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use config::RunnerConfig;
use retroport::{AudioConfig, MonotonicClock, PlatformConfig, SampleFormat, ThreadPause};
use runner::Runner;
use tui::TuiState;

#[derive(Parser)]
#[command(name = "retroport")]
#[command(about = "Drives the retroport platform layer from a legacy-style frame loop")]
struct Args {
    #[arg(long, default_value_t = retroport::DEFAULT_TICK_HZ, help = "Host tick frequency in Hz")]
    tick_hz: u32,

    #[arg(short, long, default_value_t = 35, help = "Game tic rate in Hz")]
    game_hz: u32,

    #[arg(long, default_value_t = 140, help = "Music timer rate in Hz")]
    music_hz: u32,

    #[arg(long, default_value_t = 512, help = "Samples per audio submission")]
    quantum: usize,

    #[arg(long, default_value_t = 2048, help = "Ring capacity in samples")]
    ring_capacity: usize,

    #[arg(long, default_value_t = 11025)]
    sample_rate: u32,

    #[arg(long)]
    stereo: bool,

    #[arg(long, default_value_t = 4096, help = "Host audio queue size in samples")]
    sink_queue: usize,

    #[arg(long, default_value_t = 440)]
    tone_hz: u32,

    #[arg(short, long, help = "File to stream one window per tic from")]
    stream: Option<PathBuf>,

    #[arg(long, default_value_t = 4096, help = "Stream window size in bytes")]
    window: usize,

    #[arg(long, default_value_t = 250, help = "Host stall, in ticks, that triggers a resync")]
    stall_ticks: u64,

    #[arg(short, long, help = "Stop after this many frames")]
    frames: Option<u64>,

    #[arg(long)]
    headless: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let format = if args.stereo {
        SampleFormat::STEREO_S16
    } else {
        SampleFormat::MONO_S16
    };

    let config = RunnerConfig {
        platform: PlatformConfig {
            tick_hz: args.tick_hz,
            audio: AudioConfig {
                quantum: args.quantum,
                ring_capacity: args.ring_capacity,
                sample_rate: args.sample_rate,
                format,
            },
        },
        game_hz: args.game_hz,
        music_hz: args.music_hz,
        tone_hz: args.tone_hz,
        sink_queue: args.sink_queue,
        stream: args.stream,
        stream_window: args.window,
        stall_ticks: args.stall_ticks,
        max_frames: args.frames,
    };

    if args.headless {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let clock = MonotonicClock::new(config.platform.tick_hz);
    let mut runner = Runner::new(config, clock)?;

    if args.headless {
        log::info!("Runner started");
        runner.run(&ThreadPause::default());
        let stats = runner.stats();
        log::info!(
            "Ran {} tics over {} frames, {} samples submitted, {} underruns",
            stats.tics,
            stats.frames,
            stats.audio.samples_submitted,
            stats.underruns
        );
    } else {
        run_with_tui(&mut runner)?;
    }

    Ok(())
}

fn run_with_tui(runner: &mut Runner<MonotonicClock>) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let running = runner.running();
    let mut tui_state = TuiState::new();
    tui_state.log_info("Runner started");

    while running.load(Ordering::SeqCst) {
        runner.frame();

        for event in runner.drain_events() {
            tui_state.log_event(event);
        }

        if event::poll(Duration::from_millis(1))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                {
                    running.store(false, Ordering::SeqCst);
                }
            }
        }

        let stats = runner.stats();
        terminal.draw(|frame| {
            tui::render(frame, &tui_state, &stats);
        })?;
    }

    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;

    Ok(())
}

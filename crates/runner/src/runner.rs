use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use retroport::{
    AudioRingBridge, AudioStats, CMD_GET, CMD_SEND, CommandDispatcher, NetConfig, Pause,
    RingBuffer, SimulatedSink, StreamingCache, TickAccumulator, TickSource, TimerService,
};

use crate::config::RunnerConfig;
use crate::events::RunnerEvent;
use crate::mixer::SquareWave;

#[derive(Debug, Clone)]
pub struct RunnerStats {
    pub uptime_secs: u64,
    pub frames: u64,
    pub tics: u64,
    pub host_ticks: u64,
    pub game_hz: u32,
    pub music_steps: u64,
    pub audio: AudioStats,
    pub ring_cursor: usize,
    pub ring_capacity: usize,
    pub sink_queued: usize,
    pub sink_capacity: usize,
    pub samples_played: u64,
    pub bytes_played: u64,
    pub underruns: u64,
    pub sends: u64,
    pub receives: u64,
    pub stream_open: bool,
    pub stream_bytes: u64,
}

/// Drives the platform layer the way a ported engine's main loop would.
pub struct Runner<C: TickSource> {
    config: RunnerConfig,
    clock: C,
    tics: TickAccumulator,
    timers: TimerService,
    music_steps: Rc<Cell<u64>>,
    net: NetConfig,
    dispatcher: CommandDispatcher,
    ring: RingBuffer,
    bridge: AudioRingBridge,
    sink: SimulatedSink,
    mixer: SquareWave,
    stream: StreamingCache,
    frames: u64,
    tic: u64,
    running: Arc<AtomicBool>,
    start_time: Instant,
    pending_events: VecDeque<RunnerEvent>,
}

impl<C: TickSource> Runner<C> {
    pub fn new(config: RunnerConfig, clock: C) -> Result<Self> {
        config
            .platform
            .validate()
            .context("invalid audio configuration")?;

        if config.game_hz == 0 || config.game_hz > clock.frequency() {
            bail!(
                "game rate {} Hz must be between 1 and the host tick rate {} Hz",
                config.game_hz,
                clock.frequency()
            );
        }
        if config.music_hz == 0 || config.music_hz > clock.frequency() {
            bail!(
                "music rate {} Hz must be between 1 and the host tick rate {} Hz",
                config.music_hz,
                clock.frequency()
            );
        }
        if config.stream_window == 0 {
            bail!("stream window must be at least one byte");
        }

        let mut pending_events = VecDeque::new();
        let mut stream = StreamingCache::new();
        if let Some(path) = &config.stream {
            stream
                .open(path)
                .with_context(|| format!("failed to open stream {}", path.display()))?;
            pending_events.push_back(RunnerEvent::StreamOpened { path: path.clone() });
        }

        let now = clock.ticks();
        let music_steps = Rc::new(Cell::new(0));
        let mut timers = TimerService::new(clock.frequency());
        let steps = Rc::clone(&music_steps);
        timers.register(config.music_hz, now, move || steps.set(steps.get() + 1));

        let mut net = NetConfig::default();
        let dispatcher = CommandDispatcher::init_single_node(&mut net);

        let audio = &config.platform.audio;
        let ring = RingBuffer::new(audio.ring_capacity);
        let bridge = AudioRingBridge::new(audio.quantum, audio.format);
        let sink = SimulatedSink::new(
            audio.sample_rate,
            audio.format,
            clock.frequency(),
            config.sink_queue,
        );
        let mixer = SquareWave::new(audio.sample_rate, audio.format, config.tone_hz, 4000);

        Ok(Self {
            tics: TickAccumulator::for_source(&clock),
            clock,
            timers,
            music_steps,
            net,
            dispatcher,
            ring,
            bridge,
            sink,
            mixer,
            stream,
            frames: 0,
            tic: 0,
            running: Arc::new(AtomicBool::new(true)),
            start_time: Instant::now(),
            pending_events,
            config,
        })
    }

    pub fn running(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn drain_events(&mut self) -> impl Iterator<Item = RunnerEvent> + '_ {
        self.pending_events.drain(..)
    }

    pub fn run<P: Pause>(&mut self, pause: &P) {
        while self.running.load(Ordering::SeqCst) {
            self.frame();
            for event in self.drain_events() {
                log_event(&event);
            }
            pause.pause();
        }
    }

    /// One pass of the host frame loop. Returns the number of game tics run.
    pub fn frame(&mut self) -> u64 {
        let now = self.clock.ticks();

        let stalled = now.saturating_sub(self.tics.last_tick());
        if stalled > self.config.stall_ticks {
            self.tics.set_last_tick(now);
            self.timers.resync(now);
            self.pending_events
                .push_back(RunnerEvent::Resynced { stalled_ticks: stalled });
        }

        self.timers.service(now);

        let new_tics = self.tics.poll(&self.clock, self.config.game_hz);
        for _ in 0..new_tics {
            self.run_tic();
        }

        self.sink.drain_to(now);
        self.mixer.fill(&mut self.ring);
        if let Err(e) = self.bridge.pump(&mut self.ring, &mut self.sink) {
            self.pending_events.push_back(RunnerEvent::Error {
                message: format!("Audio error: {}", e),
            });
            self.running.store(false, Ordering::SeqCst);
        }

        self.frames += 1;
        if self
            .config
            .max_frames
            .is_some_and(|max| self.frames >= max)
        {
            self.running.store(false, Ordering::SeqCst);
        }

        new_tics
    }

    fn run_tic(&mut self) {
        self.dispatcher.dispatch_command(CMD_SEND, &mut self.net);
        self.dispatcher.dispatch_command(CMD_GET, &mut self.net);

        if self.stream.is_open() {
            let before = self.stream.position();
            if let Err(e) = self.stream.next(self.config.stream_window) {
                self.stream.close();
                self.pending_events.push_back(RunnerEvent::Error {
                    message: format!("Stream error: {}", e),
                });
            } else {
                let after = self.stream.position();
                if after == before {
                    self.stream.close();
                    self.pending_events
                        .push_back(RunnerEvent::StreamFinished { bytes: after });
                }
            }
        }

        self.tic += 1;
    }

    pub fn stats(&self) -> RunnerStats {
        let transport = self.dispatcher.transport().stats();
        RunnerStats {
            uptime_secs: self.start_time.elapsed().as_secs(),
            frames: self.frames,
            tics: self.tic,
            host_ticks: self.clock.ticks(),
            game_hz: self.config.game_hz,
            music_steps: self.music_steps.get(),
            audio: self.bridge.stats().clone(),
            ring_cursor: self.ring.write_cursor(),
            ring_capacity: self.ring.capacity(),
            sink_queued: self.sink.queued(),
            sink_capacity: self.config.sink_queue,
            samples_played: self.sink.played(),
            bytes_played: self.sink.bytes_played(),
            underruns: self.sink.underruns(),
            sends: transport.sends,
            receives: transport.receives,
            stream_open: self.stream.is_open(),
            stream_bytes: self.stream.position(),
        }
    }
}

pub fn log_event(event: &RunnerEvent) {
    match event {
        RunnerEvent::StreamOpened { path } => log::info!("Streaming {}", path.display()),
        RunnerEvent::StreamFinished { bytes } => {
            log::info!("Stream finished after {} bytes", bytes)
        }
        RunnerEvent::Resynced { stalled_ticks } => {
            log::warn!("Host stalled for {} ticks, timing resynced", stalled_ticks)
        }
        RunnerEvent::Error { message } => log::error!("{}", message),
    }
}

#[cfg(test)]
mod tests {
    use retroport::{ManualClock, SampleFormat};

    use super::*;

    #[test]
    fn runs_game_tics_at_configured_rate() {
        let clock = ManualClock::new(1000);
        let mut runner = Runner::new(RunnerConfig::default(), clock).unwrap();

        for _ in 0..100 {
            runner.clock.advance(20);
            runner.frame();
        }

        let stats = runner.stats();
        assert_eq!(stats.host_ticks, 2000);
        assert_eq!(stats.tics, 70);
        assert_eq!(stats.music_steps, 280);
        assert_eq!(stats.sends, 70);
        assert_eq!(stats.receives, 70);
        assert!(stats.ring_cursor < stats.ring_capacity);
        assert!(stats.audio.quanta_submitted > 0);
    }

    #[test]
    fn stall_resyncs_instead_of_catching_up() {
        let clock = ManualClock::new(1000);
        let mut runner = Runner::new(RunnerConfig::default(), clock).unwrap();

        runner.clock.advance(10_000);
        assert_eq!(runner.frame(), 0);
        assert!(matches!(
            runner.drain_events().next(),
            Some(RunnerEvent::Resynced {
                stalled_ticks: 10_000
            })
        ));
    }

    #[test]
    fn max_frames_stops_the_loop() {
        let config = RunnerConfig {
            max_frames: Some(3),
            ..RunnerConfig::default()
        };
        let mut runner = Runner::new(config, ManualClock::new(1000)).unwrap();
        let running = runner.running();

        runner.frame();
        runner.frame();
        assert!(running.load(Ordering::SeqCst));
        runner.frame();
        assert!(!running.load(Ordering::SeqCst));
    }

    #[test]
    fn rejects_misaligned_ring() {
        let mut config = RunnerConfig::default();
        config.platform.audio.ring_capacity = 1000;
        assert!(Runner::new(config, ManualClock::new(1000)).is_err());
    }

    #[test]
    fn game_rate_above_host_rate_is_rejected() {
        let config = RunnerConfig {
            game_hz: 2000,
            ..RunnerConfig::default()
        };
        assert!(Runner::new(config, ManualClock::new(1000)).is_err());
    }

    #[test]
    fn zero_stream_window_is_rejected() {
        let config = RunnerConfig {
            stream_window: 0,
            ..RunnerConfig::default()
        };
        let err = Runner::new(config, ManualClock::new(1000)).err().unwrap();
        assert!(err.to_string().contains("stream window"));
    }

    #[test]
    fn stereo_plays_frames_at_the_sample_rate() {
        let mut config = RunnerConfig::default();
        config.platform.audio.format = SampleFormat::STEREO_S16;
        let mut runner = Runner::new(config, ManualClock::new(1000)).unwrap();
        runner.frame();

        runner.clock.advance(50);
        runner.frame();

        // 50 ms at 11025 Hz is 551 whole frames of two samples each.
        assert_eq!(runner.stats().samples_played, 1102);
        let samples = runner.ring.samples();
        assert!(samples.chunks_exact(2).all(|frame| frame[0] == frame[1]));
    }
}

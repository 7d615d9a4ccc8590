use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use crate::events::RunnerEvent;
use crate::runner::RunnerStats;

const MAX_LOG_LINES: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Info,
    Warn,
    Error,
}

pub struct TuiState {
    logs: VecDeque<(LogLevel, String)>,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            logs: VecDeque::with_capacity(MAX_LOG_LINES),
        }
    }

    pub fn log_info(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Info, message.into());
    }

    pub fn log_warn(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Warn, message.into());
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.push(LogLevel::Error, message.into());
    }

    pub fn log_event(&mut self, event: RunnerEvent) {
        match event {
            RunnerEvent::StreamOpened { path } => {
                self.log_info(format!("Streaming {}", path.display()))
            }
            RunnerEvent::StreamFinished { bytes } => {
                self.log_info(format!("Stream finished after {}", format_bytes(bytes)))
            }
            RunnerEvent::Resynced { stalled_ticks } => self.log_warn(format!(
                "Host stalled for {} ticks, timing resynced",
                stalled_ticks
            )),
            RunnerEvent::Error { message } => self.log_error(message),
        }
    }

    fn push(&mut self, level: LogLevel, message: String) {
        if self.logs.len() >= MAX_LOG_LINES {
            self.logs.pop_front();
        }
        self.logs.push_back((level, message));
    }
}

pub fn render(frame: &mut Frame, state: &TuiState, stats: &RunnerStats) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], stats);
    render_sink(frame, chunks[1], stats);
    render_audio(frame, chunks[2], stats);
    render_io(frame, chunks[3], stats);
    render_log(frame, chunks[4], state);
    render_help(frame, chunks[5]);
}

fn render_header(frame: &mut Frame, area: Rect, stats: &RunnerStats) {
    let title = format!(" retroport - Uptime: {} ", format_duration(stats.uptime_secs));

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = format!(
        "Host ticks: {}  |  Tics: {} @ {} Hz  |  Frames: {}  |  Music steps: {}",
        stats.host_ticks, stats.tics, stats.game_hz, stats.frames, stats.music_steps
    );

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(paragraph, area);
}

fn render_sink(frame: &mut Frame, area: Rect, stats: &RunnerStats) {
    let block = Block::default()
        .title(" Host Audio Queue ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let ratio = if stats.sink_capacity == 0 {
        0.0
    } else {
        stats.sink_queued as f64 / stats.sink_capacity as f64
    };
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(ratio.min(1.0))
        .label(format!(
            "{}/{} samples",
            stats.sink_queued, stats.sink_capacity
        ));

    frame.render_widget(gauge, area);
}

fn render_audio(frame: &mut Frame, area: Rect, stats: &RunnerStats) {
    let block = Block::default()
        .title(" Audio Ring ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let audio = &stats.audio;
    let lines = vec![
        stat_line(
            "Cursor: ",
            format!("{} / {}", stats.ring_cursor, stats.ring_capacity),
        ),
        stat_line(
            "Submitted: ",
            format!(
                "{} quanta ({} samples) over {} pumps",
                audio.quanta_submitted, audio.samples_submitted, audio.pumps
            ),
        ),
        stat_line("Declined: ", format!("{}", audio.declined)),
        Line::from(vec![
            Span::styled("Played: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!(
                    "{} samples ({}), {} underruns",
                    stats.samples_played,
                    format_bytes(stats.bytes_played),
                    stats.underruns
                ),
                Style::default().fg(if stats.underruns > 0 {
                    Color::Red
                } else {
                    Color::White
                }),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_io(frame: &mut Frame, area: Rect, stats: &RunnerStats) {
    let block = Block::default()
        .title(" Net / Stream ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta));

    let stream = if stats.stream_open {
        format!("{} read", format_bytes(stats.stream_bytes))
    } else {
        "closed".to_string()
    };

    let lines = vec![
        stat_line(
            "Loopback: ",
            format!("{} sent / {} received", stats.sends, stats.receives),
        ),
        stat_line("Stream: ", stream),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_log(frame: &mut Frame, area: Rect, state: &TuiState) {
    let block = Block::default()
        .title(" Log ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue));

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|(level, message)| {
            let color = match level {
                LogLevel::Info => Color::White,
                LogLevel::Warn => Color::Yellow,
                LogLevel::Error => Color::Red,
            };
            Line::from(Span::styled(message.clone(), Style::default().fg(color)))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Controls ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let text = Paragraph::new("Press 'q' or ESC to quit")
        .block(block)
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        );

    frame.render_widget(text, area);
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, mins, secs)
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1}MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut state = TuiState::new();
        for i in 0..(MAX_LOG_LINES + 10) {
            state.log_info(format!("line {}", i));
        }
        assert_eq!(state.logs.len(), MAX_LOG_LINES);
        assert_eq!(state.logs.front().unwrap().1, "line 10");
    }

    #[test]
    fn formatting() {
        assert_eq!(format_duration(3725), "01:02:05");
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2048), "2.0KB");
    }
}

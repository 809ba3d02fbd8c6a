//! Engine opponent model - drives a UCI engine process for a non-human side.
//!
//! Architecture:
//! - Engine I/O runs on OS threads (reader/writer)
//! - A GPUI background task polls the event channel and feeds lines to the model
//! - Each `bestmove` answering the current search is emitted as an [`EngineReply`]

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use gpui::{AsyncApp, Context, EventEmitter, Task, WeakEntity};

use crate::domain::MoveRequest;
use crate::domain::uci::{UciCommand, UciOutputKind};

/// Messages sent from the engine reader thread to the model
#[derive(Debug)]
pub enum EngineEvent {
    /// A line of output from the engine
    Output(String),
    /// Engine process exited
    Exited,
    /// Error occurred
    Error(String),
}

/// What the engine answered to a move request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineReply {
    BestMove(MoveRequest),
    /// `bestmove (none)` or an unparsable move
    NoMove,
    Exited,
}

pub struct EngineModel {
    running: bool,
    /// A search for the current position is in flight
    searching: bool,
    /// `bestmove` lines still owed for searches that were stopped
    stale_replies: u32,
    /// Channel receiver for engine events (polled by background task)
    event_receiver: Option<Receiver<EngineEvent>>,
    /// Channel sender for commands to engine writer thread
    command_sender: Option<Sender<String>>,
    process: Option<Child>,
    /// Background polling task (kept alive while engine is running)
    _poll_task: Option<Task<()>>,
}

impl EventEmitter<EngineReply> for EngineModel {}

impl EngineModel {
    pub fn new() -> Self {
        Self {
            running: false,
            searching: false,
            stale_replies: 0,
            event_receiver: None,
            command_sender: None,
            process: None,
            _poll_task: None,
        }
    }

    /// Start the engine process
    ///
    /// Must be called from a Context<EngineModel> to spawn the background polling task.
    pub fn start(&mut self, path: &Path, cx: &mut Context<Self>) -> anyhow::Result<()> {
        if self.running {
            return Ok(());
        }

        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("failed to start engine {}", path.display()))?;

        let stdin = child.stdin.take().ok_or_else(|| anyhow!("failed to open engine stdin"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("failed to open engine stdout"))?;

        let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();
        let (cmd_tx, cmd_rx) = mpsc::channel::<String>();

        // Reader thread (OS thread for blocking I/O)
        thread::spawn(move || {
            let reader = BufReader::new(stdout);
            for line in reader.lines() {
                match line {
                    Ok(text) => {
                        if event_tx.send(EngineEvent::Output(text)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        let _ = event_tx.send(EngineEvent::Error(e.to_string()));
                        break;
                    }
                }
            }
            let _ = event_tx.send(EngineEvent::Exited);
        });

        // Writer thread
        thread::spawn(move || {
            let mut writer = stdin;
            while let Ok(cmd) = cmd_rx.recv() {
                if writeln!(writer, "{}", cmd).is_err() {
                    break;
                }
                if writer.flush().is_err() {
                    break;
                }
            }
        });

        self.process = Some(child);
        self.event_receiver = Some(event_rx);
        self.command_sender = Some(cmd_tx);
        self.running = true;

        let poll_task = cx.spawn(async move |weak_entity: WeakEntity<EngineModel>, cx: &mut AsyncApp| {
            Self::run_event_loop(weak_entity, cx).await;
        });
        self._poll_task = Some(poll_task);

        self.send_command(UciCommand::Uci);
        self.send_command(UciCommand::IsReady);
        log::info!("engine {} started", path.display());

        Ok(())
    }

    async fn run_event_loop(weak_entity: WeakEntity<EngineModel>, cx: &mut AsyncApp) {
        const POLL_INTERVAL: Duration = Duration::from_millis(16);

        loop {
            cx.background_executor().timer(POLL_INTERVAL).await;

            let should_continue = weak_entity.update(cx, |engine, cx| {
                if !engine.running {
                    return false;
                }
                for reply in engine.process_pending_events() {
                    cx.emit(reply);
                }
                true
            });

            match should_continue {
                Ok(true) => continue,
                _ => break, // Engine stopped or entity dropped
            }
        }
    }

    /// Drain the channel, returning the replies to hand to subscribers
    fn process_pending_events(&mut self) -> Vec<EngineReply> {
        let events: Vec<EngineEvent> = match &self.event_receiver {
            Some(rx) => rx.try_iter().collect(),
            None => return Vec::new(),
        };

        let mut replies = Vec::new();
        for event in events {
            match event {
                EngineEvent::Output(line) => replies.extend(self.handle_line(&line)),
                EngineEvent::Exited => {
                    log::warn!("engine exited");
                    self.running = false;
                    self.searching = false;
                    replies.push(EngineReply::Exited);
                }
                EngineEvent::Error(e) => log::error!("engine output error: {}", e),
            }
        }
        replies
    }

    fn handle_line(&mut self, line: &str) -> Option<EngineReply> {
        log::trace!("engine> {}", line);
        let output = UciOutputKind::parse(line);
        let UciOutputKind::BestMove(text) = &output else {
            return None;
        };

        if self.stale_replies > 0 {
            self.stale_replies -= 1;
            log::debug!("ignoring bestmove {} of a stopped search", text);
            return None;
        }
        if !self.searching {
            return None;
        }
        self.searching = false;

        log::debug!("engine answered bestmove {}", text);
        Some(match output.best_move() {
            Some(request) => EngineReply::BestMove(request),
            None => EngineReply::NoMove,
        })
    }

    /// Ask for a move in `fen`, abandoning any search still running
    pub fn request_move(&mut self, fen: &str, movetime_ms: u64) {
        if !self.running {
            return;
        }
        self.cancel_search();
        self.send_command(UciCommand::Position {
            fen: fen.to_string(),
        });
        self.send_command(UciCommand::GoMovetime(movetime_ms));
        self.searching = true;
    }

    /// Stop the current search; its answer will be dropped
    pub fn cancel_search(&mut self) {
        if !self.searching {
            return;
        }
        self.send_command(UciCommand::Stop);
        self.searching = false;
        self.stale_replies += 1;
    }

    /// Tell the engine the next search belongs to a different game
    pub fn new_game(&mut self) {
        self.cancel_search();
        self.send_command(UciCommand::UciNewGame);
    }

    /// Stop the engine process
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }

        self.cancel_search();
        self.send_command(UciCommand::Quit);

        // Clean up channels (this will cause the polling loop to exit)
        self.command_sender = None;
        self.event_receiver = None;
        self._poll_task = None;

        if let Some(mut child) = self.process.take() {
            let _ = child.kill();
            let _ = child.wait();
        }

        self.running = false;
        self.stale_replies = 0;
        log::info!("engine stopped");
    }

    fn send_command(&self, cmd: UciCommand) {
        let cmd_str = cmd.to_uci_string();
        log::trace!("engine< {}", cmd_str);
        if let Some(tx) = &self.command_sender {
            let _ = tx.send(cmd_str);
        }
    }
}

impl Default for EngineModel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for EngineModel {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn searching_engine() -> EngineModel {
        let mut engine = EngineModel::new();
        engine.searching = true;
        engine
    }

    #[test]
    fn test_bestmove_answers_search() {
        let mut engine = searching_engine();
        assert_eq!(engine.handle_line("info depth 12 score cp 30 pv e7e5"), None);
        let reply = engine.handle_line("bestmove e7e5 ponder g1f3");
        let expected = MoveRequest::from_uci("e7e5").unwrap();
        assert_eq!(reply, Some(EngineReply::BestMove(expected)));
        assert!(!engine.searching);
        // a second answer is not expected
        assert_eq!(engine.handle_line("bestmove d7d5"), None);
    }

    #[test]
    fn test_bestmove_none() {
        let mut engine = searching_engine();
        assert_eq!(engine.handle_line("bestmove (none)"), Some(EngineReply::NoMove));
    }

    #[test]
    fn test_stopped_search_answer_is_dropped() {
        let mut engine = searching_engine();
        engine.cancel_search();
        assert!(!engine.searching);
        engine.searching = true;
        assert_eq!(engine.handle_line("bestmove a7a6"), None);
        assert_eq!(
            engine.handle_line("bestmove h7h6"),
            Some(EngineReply::BestMove(MoveRequest::from_uci("h7h6").unwrap()))
        );
    }

    #[test]
    fn test_new_game_drops_running_search() {
        let mut engine = searching_engine();
        engine.new_game();
        assert!(!engine.searching);
        engine.searching = true;
        assert_eq!(engine.handle_line("bestmove e7e5"), None);
    }

    #[test]
    fn test_request_ignored_when_not_running() {
        let mut engine = EngineModel::new();
        engine.request_move("8/8/8/8/8/8/8/K6k w - - 0 1", 100);
        assert!(!engine.searching);
    }
}

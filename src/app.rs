//! Application setup and window creation.
//!
//! The host opens one board window, logs every board event and, when an
//! engine is configured, lets it play the non-human side.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use gpui::{
    App, Bounds, Context, Entity, Focusable, KeyBinding, Window, WindowBounds, WindowOptions,
    div, prelude::*, px, rgba, size,
};
use gpui_component::Root;

use crate::domain::{BoardAttributes, GameEvent};
use crate::models::{BoardModel, EngineModel, EngineReply};
use crate::ui::theme::{BOARD_PADDING, WINDOW_BG};
use crate::ui::views::{ChessBoardView, FlipBoard, NewGame};

pub const ENGINE_ENV: &str = "CHESSBOARD_ENGINE";
pub const MOVETIME_ENV: &str = "CHESSBOARD_MOVETIME_MS";
pub const DEFAULT_MOVETIME_MS: u64 = 500;

/// Host settings read from the environment
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostOptions {
    /// UCI engine playing every non-human side
    pub engine: Option<PathBuf>,
    pub movetime_ms: u64,
}

impl HostOptions {
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var(ENGINE_ENV).ok(),
            std::env::var(MOVETIME_ENV).ok(),
        )
    }

    fn from_values(engine: Option<String>, movetime: Option<String>) -> Self {
        let movetime_ms = match movetime.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_MOVETIME_MS,
            Some(text) => match text.parse::<u64>() {
                Ok(ms) if ms > 0 => ms,
                _ => {
                    log::warn!(
                        "invalid {} {:?}, using {}",
                        MOVETIME_ENV,
                        text,
                        DEFAULT_MOVETIME_MS
                    );
                    DEFAULT_MOVETIME_MS
                }
            },
        };
        Self {
            engine: engine
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            movetime_ms,
        }
    }
}

impl Default for HostOptions {
    fn default() -> Self {
        Self::from_values(None, None)
    }
}

/// Initialize and run the chessboard application
pub fn run(cx: &mut App, attributes: BoardAttributes, options: HostOptions) -> anyhow::Result<()> {
    gpui_component::init(cx);
    cx.bind_keys([
        KeyBinding::new("cmd-n", NewGame, Some("Chessboard")),
        KeyBinding::new("ctrl-n", NewGame, Some("Chessboard")),
        KeyBinding::new("cmd-f", FlipBoard, Some("Chessboard")),
        KeyBinding::new("ctrl-f", FlipBoard, Some("Chessboard")),
    ]);

    let board = cx.new(|_| BoardModel::new(attributes));
    let engine = options
        .engine
        .as_deref()
        .and_then(|path| start_engine(path, cx));
    connect(&board, engine, options.movetime_ms, cx);

    let board_size = board.read(cx).config().size;
    let window_side = px(board_size + BOARD_PADDING * 2.0);
    let bounds = Bounds::centered(None, size(window_side, window_side), cx);
    cx.open_window(
        WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..Default::default()
        },
        |window, cx| {
            let view = cx.new(|cx| ChessBoardView::new(board.clone(), cx));
            let focus = view.read(cx).focus_handle(cx);
            window.focus(&focus);
            let content = cx.new(|_| HostView { board: view });
            cx.new(|cx| Root::new(content, window, cx))
        },
    )
    .context("failed to open the board window")?;

    // events queued while the board was built, e.g. an engine to move first
    board.update(cx, |board, cx| board.publish(cx));
    Ok(())
}

fn start_engine(path: &Path, cx: &mut App) -> Option<Entity<EngineModel>> {
    let engine = cx.new(|_| EngineModel::new());
    match engine.update(cx, |engine, cx| engine.start(path, cx)) {
        Ok(()) => Some(engine),
        Err(err) => {
            log::error!("{:#}", err);
            None
        }
    }
}

/// Route board events to the log and the engine, engine replies to the board
fn connect(
    board: &Entity<BoardModel>,
    engine: Option<Entity<EngineModel>>,
    movetime_ms: u64,
    cx: &mut App,
) {
    let board_engine = engine.clone();
    cx.subscribe(board, move |_, event: &GameEvent, cx| {
        log::info!("board event: {:?}", event);
        let Some(engine) = &board_engine else {
            return;
        };
        match event {
            GameEvent::GameStarted { .. } => {
                engine.update(cx, |engine, _| engine.new_game());
            }
            GameEvent::ExternalMoveExpected { fen, .. } => {
                engine.update(cx, |engine, _| engine.request_move(fen, movetime_ms));
            }
            event if event.is_game_end() => {
                engine.update(cx, |engine, _| engine.cancel_search());
            }
            _ => {}
        }
    })
    .detach();

    let Some(engine) = engine else {
        return;
    };
    let board = board.clone();
    cx.subscribe(&engine, move |_, reply: &EngineReply, cx| match reply {
        EngineReply::BestMove(request) => {
            board.update(cx, |board, cx| {
                if let Err(err) = board.play_move(*request) {
                    log::warn!("engine move rejected: {}", err);
                }
                board.publish(cx);
            });
        }
        EngineReply::NoMove => log::warn!("engine found no move"),
        EngineReply::Exited => log::error!("engine exited, moves must be played by hand"),
    })
    .detach();
}

/// Window content: the board centered on a neutral background
struct HostView {
    board: Entity<ChessBoardView>,
}

impl Render for HostView {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgba(WINDOW_BG))
            .child(self.board.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_defaults() {
        let options = HostOptions::default();
        assert_eq!(options.engine, None);
        assert_eq!(options.movetime_ms, DEFAULT_MOVETIME_MS);
    }

    #[test]
    fn test_host_values() {
        let options =
            HostOptions::from_values(Some("/usr/bin/stockfish".into()), Some(" 250 ".into()));
        assert_eq!(options.engine, Some(PathBuf::from("/usr/bin/stockfish")));
        assert_eq!(options.movetime_ms, 250);
    }

    #[test]
    fn test_invalid_host_values_fall_back() {
        let options = HostOptions::from_values(Some("  ".into()), Some("soon".into()));
        assert_eq!(options.engine, None);
        assert_eq!(options.movetime_ms, DEFAULT_MOVETIME_MS);

        let zero = HostOptions::from_values(None, Some("0".into()));
        assert_eq!(zero.movetime_ms, DEFAULT_MOVETIME_MS);
    }
}

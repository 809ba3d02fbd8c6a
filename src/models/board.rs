//! Board model - the interaction state machine on top of the game facade.
//!
//! Pointer handlers take board-local pixel points, run them through the
//! coordinate mapper and the move gate, and tell the view how much of the
//! board needs redrawing. Game-level notifications are queued as
//! [`GameEvent`]s and handed to gpui subscribers by [`BoardModel::publish`].

use gpui::{Context, EventEmitter};

use crate::domain::config::STANDARD_START_FEN;
use crate::domain::{
    BoardAttributes, BoardConfiguration, GameError, GameEvent, MoveError, MoveRequest, Piece,
    PieceColor, PixelPoint, PromotionPiece, SquareCoord,
};
use crate::models::game::{GameModel, MoveCandidate};
use crate::models::gate;

/// State for a piece being dragged
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub piece: Piece,
    pub origin: SquareCoord,
    /// Pointer position relative to the board's top-left corner
    pub pointer: PixelPoint,
}

/// A legal pawn move waiting for the promotion piece
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPromotion {
    pub from: SquareCoord,
    pub to: SquareCoord,
    pub color: PieceColor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LastMove {
    pub from: SquareCoord,
    pub to: SquareCoord,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging(DragState),
    AwaitingPromotion(PendingPromotion),
}

/// How much of the board a handler invalidated
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    None,
    /// Only the dragged glyph and the drag cross-hair moved
    Overlay,
    Full,
}

pub struct BoardModel {
    attributes: BoardAttributes,
    config: BoardConfiguration,
    game: GameModel,
    interaction: Interaction,
    last_move: Option<LastMove>,
    in_progress: bool,
    pending_events: Vec<GameEvent>,
}

impl EventEmitter<GameEvent> for BoardModel {}

impl BoardModel {
    pub fn new(attributes: BoardAttributes) -> Self {
        let config = BoardConfiguration::from_attributes(&attributes);
        let game = GameModel::from_fen(&config.start_position).unwrap_or_else(|err| {
            log::warn!("{}, starting from the standard position", err);
            GameModel::new()
        });
        let mut board = Self {
            attributes,
            config,
            game,
            interaction: Interaction::Idle,
            last_move: None,
            in_progress: true,
            pending_events: Vec::new(),
        };
        board.check_position();
        board
    }

    pub fn config(&self) -> &BoardConfiguration {
        &self.config
    }

    pub fn game(&self) -> &GameModel {
        &self.game
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn drag_state(&self) -> Option<DragState> {
        match self.interaction {
            Interaction::Dragging(drag) => Some(drag),
            _ => None,
        }
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        match self.interaction {
            Interaction::AwaitingPromotion(pending) => Some(pending),
            _ => None,
        }
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    pub fn is_game_in_progress(&self) -> bool {
        self.in_progress
    }

    pub fn is_white_turn(&self) -> bool {
        self.game.turn() == PieceColor::White
    }

    /// FEN of the current position
    pub fn current_position(&self) -> String {
        self.game.fen()
    }

    /// The side to move is engine-controlled and the game is still running
    pub fn is_waiting_for_external_move(&self) -> bool {
        self.in_progress && !self.config.is_human(self.game.turn())
    }

    fn accepts_pointer(&self) -> bool {
        self.in_progress && self.config.is_human(self.game.turn())
    }

    pub fn pointer_down(&mut self, point: PixelPoint) -> Redraw {
        if !self.accepts_pointer() || self.interaction != Interaction::Idle {
            return Redraw::None;
        }
        let Some(origin) = self.config.geometry().pixel_to_square(point) else {
            return Redraw::None;
        };
        let Some(piece) = self.game.get(origin) else {
            return Redraw::None;
        };
        if piece.color != self.game.turn() {
            return Redraw::None;
        }

        log::debug!("drag started on {}", origin);
        self.interaction = Interaction::Dragging(DragState {
            piece,
            origin,
            pointer: point,
        });
        Redraw::Full
    }

    pub fn pointer_move(&mut self, point: PixelPoint) -> Redraw {
        if !self.accepts_pointer() {
            return Redraw::None;
        }
        let Interaction::Dragging(mut drag) = self.interaction else {
            return Redraw::None;
        };
        if self.config.geometry().clamp_drag(point).is_none() {
            log::debug!("pointer left the board, drag from {} cancelled", drag.origin);
            self.interaction = Interaction::Idle;
            return Redraw::Full;
        }
        drag.pointer = point;
        self.interaction = Interaction::Dragging(drag);
        Redraw::Overlay
    }

    pub fn pointer_up(&mut self, point: PixelPoint) -> Redraw {
        if !self.accepts_pointer() {
            return Redraw::None;
        }
        let Interaction::Dragging(drag) = self.interaction else {
            return Redraw::None;
        };
        self.interaction = Interaction::Idle;

        let Some(target) = self.config.geometry().pixel_to_square(point) else {
            log::debug!("dropped outside the board, drag from {} cancelled", drag.origin);
            return Redraw::Full;
        };
        if target == drag.origin {
            return Redraw::Full;
        }

        let candidate = MoveCandidate::new(drag.origin, target);
        if !gate::validate(&self.game, &candidate) {
            log::debug!("illegal move {}{} rejected", drag.origin, target);
            return Redraw::Full;
        }

        if gate::is_promotion_candidate(&self.game, &candidate) {
            log::debug!("waiting for promotion piece on {}", target);
            self.interaction = Interaction::AwaitingPromotion(PendingPromotion {
                from: drag.origin,
                to: target,
                color: drag.piece.color,
            });
            return Redraw::Full;
        }

        // failures are logged by the gate and leave the game untouched
        let _ = self.commit(candidate);
        Redraw::Full
    }

    /// Leaving the board cancels a drag; a pending promotion stays open
    pub fn pointer_leave(&mut self) -> Redraw {
        if !self.accepts_pointer() {
            return Redraw::None;
        }
        match self.interaction {
            Interaction::Dragging(drag) => {
                log::debug!("pointer left the board, drag from {} cancelled", drag.origin);
                self.interaction = Interaction::Idle;
                Redraw::Full
            }
            _ => Redraw::None,
        }
    }

    pub fn select_promotion(&mut self, piece: PromotionPiece) -> Redraw {
        let Interaction::AwaitingPromotion(pending) = self.interaction else {
            return Redraw::None;
        };
        self.interaction = Interaction::Idle;
        let candidate = MoveCandidate::new(pending.from, pending.to).with_promotion(piece);
        let _ = self.commit(candidate);
        Redraw::Full
    }

    pub fn dismiss_promotion(&mut self) -> Redraw {
        if let Interaction::AwaitingPromotion(pending) = self.interaction {
            log::debug!("promotion on {} abandoned", pending.to);
            self.interaction = Interaction::Idle;
            Redraw::Full
        } else {
            Redraw::None
        }
    }

    /// Start a new game from `fen`, or from the standard position.
    /// An invalid FEN leaves the current game untouched.
    pub fn new_game(&mut self, fen: Option<&str>) -> Result<(), GameError> {
        self.game.reset(fen.unwrap_or(STANDARD_START_FEN))?;
        self.interaction = Interaction::Idle;
        self.last_move = None;
        self.in_progress = true;
        log::info!("new game from {}", self.game.fen());
        self.pending_events.push(GameEvent::GameStarted {
            side_to_move: self.game.turn(),
            fen: self.game.fen(),
        });
        self.check_position();
        Ok(())
    }

    /// Submit a move for an engine-controlled side
    pub fn play_move(&mut self, request: MoveRequest) -> Result<(), MoveError> {
        if !self.in_progress {
            return Err(MoveError::GameOver);
        }
        if self.config.is_human(self.game.turn()) {
            return Err(MoveError::NotExpected);
        }

        let from = square_at(request.start_file, request.start_rank)?;
        let to = square_at(request.end_file, request.end_rank)?;
        let promotion = match request.promotion {
            None => PromotionPiece::default(),
            Some(letter) => {
                PromotionPiece::from_letter(letter).ok_or(MoveError::InvalidPromotion(letter))?
            }
        };

        let candidate = MoveCandidate::new(from, to).with_promotion(promotion);
        if !gate::validate(&self.game, &candidate) {
            return Err(MoveError::Illegal {
                from: from.to_algebraic(),
                to: to.to_algebraic(),
            });
        }
        self.commit(candidate)
    }

    pub fn toggle_side(&mut self) -> Redraw {
        let reversed = !self.config.orientation.is_reversed();
        self.set_attribute("reversed", Some(if reversed { "true" } else { "false" }))
    }

    /// Change one host attribute and rebuild the configuration
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> Redraw {
        if !self.attributes.set(name, value) {
            log::warn!("ignoring unknown board attribute {:?}", name);
            return Redraw::None;
        }
        let previous = std::mem::replace(
            &mut self.config,
            BoardConfiguration::from_attributes(&self.attributes),
        );

        if previous.geometry() != self.config.geometry() {
            // pointer pixels of an active drag refer to the old layout
            if let Interaction::Dragging(_) = self.interaction {
                self.interaction = Interaction::Idle;
            }
        }

        match name {
            "start_position" => {
                let fen = self.config.start_position.clone();
                if let Err(err) = self.new_game(Some(&fen)) {
                    log::warn!("{}, starting from the standard position", err);
                    if let Err(err) = self.new_game(None) {
                        log::error!("standard position rejected: {}", err);
                    }
                }
            }
            "white_player_human" | "black_player_human" => {
                if !self.accepts_pointer() {
                    self.interaction = Interaction::Idle;
                }
                if previous.is_human(self.game.turn()) != self.config.is_human(self.game.turn()) {
                    self.announce_external_move();
                }
            }
            _ => {}
        }
        Redraw::Full
    }

    /// Queued events, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Emit queued events to gpui subscribers and schedule a redraw
    pub fn publish(&mut self, cx: &mut Context<Self>) {
        for event in self.take_events() {
            cx.emit(event);
        }
        cx.notify();
    }

    fn commit(&mut self, candidate: MoveCandidate) -> Result<(), MoveError> {
        gate::commit(&mut self.game, &candidate)?;
        self.last_move = Some(LastMove {
            from: candidate.from,
            to: candidate.to,
        });
        self.interaction = Interaction::Idle;
        self.pending_events.push(GameEvent::MovePlayed {
            from: candidate.from,
            to: candidate.to,
            fen: self.game.fen(),
        });
        self.check_position();
        Ok(())
    }

    /// End the game if the position is decided, otherwise ask for an external move when due
    fn check_position(&mut self) {
        if let Some(outcome) = self.game.outcome() {
            let side_to_move = self.game.turn();
            log::info!("game over: {:?}, {:?} to move", outcome, side_to_move);
            self.in_progress = false;
            self.interaction = Interaction::Idle;
            self.pending_events
                .push(GameEvent::for_outcome(outcome, side_to_move));
        } else {
            self.announce_external_move();
        }
    }

    fn announce_external_move(&mut self) {
        if self.is_waiting_for_external_move() {
            self.pending_events.push(GameEvent::ExternalMoveExpected {
                side_to_move: self.game.turn(),
                fen: self.game.fen(),
            });
        }
    }
}

fn square_at(file: i32, rank: i32) -> Result<SquareCoord, MoveError> {
    let file = u8::try_from(file).map_err(|_| MoveError::OutOfBoard)?;
    let rank = u8::try_from(rank).map_err(|_| MoveError::OutOfBoard)?;
    SquareCoord::new(file, rank).ok_or(MoveError::OutOfBoard)
}

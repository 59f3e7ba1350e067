//! Engine module - orchestrates board, pieces, rng, scoring, and garbage
//!
//! One `Engine` is one player's game. It advances only in response to
//! discrete input actions and gravity ticks; nothing here blocks. The
//! per-piece state machine is Spawned -> Falling -> (Locked | GameOver):
//! a failed downward step locks the piece, resolves clears and items,
//! merges queued opponent garbage, and spawns the next piece immediately.
//! There is no lock-delay state.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::core::board::{Board, ClearedRows};
use crate::core::piece::Piece;
use crate::core::rng::PieceRng;
use crate::core::scoring::{
    apply_score_factor, drop_score, level_for_lines, line_clear_score,
};
use crate::core::snapshot::{BoardSnapshot, GameSnapshot};
use crate::core::srs;
use crate::garbage::{GarbageBuffer, GarbageRow};
use crate::types::{
    Difficulty, GameAction, ItemKind, ATTACK_THRESHOLD, LINES_PER_ITEM, PREVIEW_LEN, QUEUE_LEN,
};

/// Engine construction parameters; no ambient globals are consulted
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub seed: u32,
    pub difficulty: Difficulty,
    /// Item mode: tagged pieces and special pieces enter the queue
    pub item_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            difficulty: Difficulty::Normal,
            item_mode: false,
        }
    }
}

/// Result of the most recent lock, consumed once by the host
#[derive(Debug, Clone, Default)]
pub struct LockEvent {
    /// Rows removed by this lock (full rows plus item-cleared rows)
    pub lines_cleared: u32,
    /// Columns removed by column/cross items
    pub columns_cleared: u32,
    /// Weight/bomb effects that fired
    pub area_effects: u32,
    /// Score gained by this lock's clears (drop bonuses excluded)
    pub score_delta: i64,
    /// The lock followed a kicked T rotation into a confined slot
    pub t_spin: bool,
    /// Normalized rows to send to the opponent (empty below threshold)
    pub attack_lines: Vec<GarbageRow>,
    /// Queued garbage rows merged into this board at the lock
    pub garbage_merged: usize,
}

/// Map a row index observed after some rows were removed back to its
/// position before those removals. A removed row below (greater index)
/// shifted this row down by one, so the original index `o` satisfies
/// `o = row - |{c in earlier : c > o}|`; iterating from `row` converges
/// in at most `earlier.len()` steps.
fn unshift_row(row: u8, earlier: &[u8]) -> u8 {
    let mut original = row;
    loop {
        // A surviving row never shares an index with a removed one, so
        // `>=` is exact and rules out the removed indices themselves
        let below = earlier.iter().filter(|&&c| c >= original).count() as u8;
        let candidate = row.saturating_sub(below);
        if candidate == original {
            return original;
        }
        original = candidate;
    }
}

/// One player's game
#[derive(Debug)]
pub struct Engine {
    board: Board,
    current: Option<Piece>,
    hold: Option<Piece>,
    next_queue: VecDeque<Piece>,
    rng: PieceRng,
    garbage: Arc<GarbageBuffer>,
    difficulty: Difficulty,
    item_mode: bool,
    score: i64,
    lines: u32,
    level: u32,
    can_hold: bool,
    game_over: bool,
    paused: bool,
    lines_since_item: u32,
    /// Set by a kicked T rotation, cleared by any later move
    pending_t_spin: bool,
    last_event: Option<LockEvent>,
}

impl Engine {
    /// Build an engine and spawn the first piece
    pub fn new(config: EngineConfig) -> Self {
        let mut rng = PieceRng::new(config.seed);
        rng.apply_difficulty(config.difficulty);

        let mut engine = Self {
            board: Board::new(),
            current: None,
            hold: None,
            next_queue: VecDeque::with_capacity(QUEUE_LEN),
            rng,
            garbage: Arc::new(GarbageBuffer::new()),
            difficulty: config.difficulty,
            item_mode: config.item_mode,
            score: 0,
            lines: 0,
            level: 1,
            can_hold: true,
            game_over: false,
            paused: false,
            lines_since_item: 0,
            pending_t_spin: false,
            last_event: None,
        };
        engine.fill_queue();
        engine.spawn_next();
        engine
    }

    /// Handle to the garbage buffer for the network receive path. The
    /// engine drains it once per lock event.
    pub fn garbage_buffer(&self) -> Arc<GarbageBuffer> {
        Arc::clone(&self.garbage)
    }

    // ----- accessors -----

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn hold_piece(&self) -> Option<&Piece> {
        self.hold.as_ref()
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    /// Upcoming pieces, soonest first
    pub fn preview(&self) -> impl Iterator<Item = &Piece> {
        self.next_queue.iter().take(PREVIEW_LEN)
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    // ----- input -----

    /// Apply one input action; returns whether anything changed.
    /// After game over every action is a no-op until `reset`.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over {
            return false;
        }
        if self.paused && action != GameAction::Pause {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.shift(srs::move_left),
            GameAction::MoveRight => self.shift(srs::move_right),
            GameAction::SoftDrop => self.step_down(true),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::Hold => self.hold(),
            GameAction::Pause => {
                self.paused = !self.paused;
                true
            }
        }
    }

    /// Gravity tick from the host timer: one downward step, no soft-drop
    /// bonus. Locks the piece when the step is blocked.
    pub fn tick(&mut self) -> bool {
        if self.game_over || self.paused {
            return false;
        }
        self.step_down(false)
    }

    fn shift(&mut self, step: fn(&Piece, &Board) -> Option<Piece>) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        match step(&current, &self.board) {
            Some(moved) => {
                self.current = Some(moved);
                self.pending_t_spin = false;
                true
            }
            None => false,
        }
    }

    /// One step down. Returns true if the piece moved; a blocked step
    /// locks the piece and returns false.
    fn step_down(&mut self, soft: bool) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        match srs::move_down(&current, &self.board) {
            Some(moved) => {
                self.current = Some(moved);
                self.pending_t_spin = false;
                if soft {
                    self.score +=
                        apply_score_factor(drop_score(1, false), self.level, self.difficulty);
                }
                true
            }
            None => {
                self.lock_current();
                false
            }
        }
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        match srs::attempt_rotation(&current, &self.board, clockwise) {
            Some(outcome) => {
                self.current = Some(outcome.piece);
                self.pending_t_spin = outcome.t_spin;
                true
            }
            None => false,
        }
    }

    fn hard_drop(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        let resting = srs::hard_drop(&current, &self.board);
        let distance = i64::from(resting.y - current.y);
        self.score += apply_score_factor(drop_score(distance, true), self.level, self.difficulty);
        self.current = Some(resting);
        self.lock_current();
        true
    }

    /// Swap the falling piece with the hold slot. Allowed once between
    /// locks; special pieces cannot be held; the item payload survives.
    fn hold(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };
        if !self.can_hold || current.is_special() {
            return false;
        }

        match self.hold.take() {
            Some(mut held) => {
                held.reset_to_spawn();
                self.hold = Some(current);
                if !self.board.is_valid_position(&held) {
                    self.game_over = true;
                    self.current = None;
                    return false;
                }
                self.current = Some(held);
            }
            None => {
                self.hold = Some(current);
                self.spawn_next();
            }
        }
        self.can_hold = false;
        self.pending_t_spin = false;
        true
    }

    // ----- lock pipeline -----

    fn lock_current(&mut self) {
        let Some(piece) = self.current.take() else {
            return;
        };

        // The rows a clear removes are read back out of this capture as
        // attack lines; taken before the place so the locking piece's own
        // cells become the holes in the garbage the opponent receives
        let snapshot = BoardSnapshot::capture(&self.board);

        self.board.place(&piece);

        let mut cleared_rows = ClearedRows::new();
        let mut columns_cleared = 0usize;
        let mut area_effects = 0usize;
        let mut normal_cleared = 0usize;

        if self.item_mode {
            // Crosses resolve first: their row halves overlap full-line
            // detection. Lines next, columns after (they do not shift),
            // area effects last.
            let (crosses, cross_rows) = self.board.clear_crosses_with_items();
            let outcome = self.board.clear_lines_with_items();
            let columns = self.board.clear_columns_with_items();
            area_effects = self.board.apply_weight_and_bomb_effects();

            normal_cleared = outcome.rows.len() - outcome.item_triggered;
            columns_cleared = columns + crosses;
            // Line-pass indices are relative to the post-cross board; map
            // them back through the cross shifts so they address the
            // pre-lock snapshot
            cleared_rows.extend(cross_rows.iter().copied());
            cleared_rows.extend(
                outcome
                    .rows
                    .iter()
                    .map(|&row| unshift_row(row, &cross_rows)),
            );
        } else {
            let rows = self.board.clear_full_lines();
            normal_cleared = rows.len();
            cleared_rows = rows;
        }

        let total_cleared = cleared_rows.len() + columns_cleared;
        let mut score_delta = 0;
        if total_cleared > 0 {
            self.lines += total_cleared as u32;
            score_delta =
                apply_score_factor(line_clear_score(total_cleared), self.level, self.difficulty);
            self.score += score_delta;
            self.level = level_for_lines(self.lines, self.difficulty);

            if self.item_mode {
                self.lines_since_item += normal_cleared as u32;
                if self.lines_since_item >= LINES_PER_ITEM {
                    self.queue_item_piece();
                    self.lines_since_item = 0;
                }
            }
        }

        let attack_lines = if cleared_rows.len() >= ATTACK_THRESHOLD {
            snapshot.attack_lines(&cleared_rows)
        } else {
            Vec::new()
        };

        // Drain opponent garbage exactly once per lock
        let garbage_merged = self.garbage.apply_to_board(&mut self.board);

        self.last_event = Some(LockEvent {
            lines_cleared: cleared_rows.len() as u32,
            columns_cleared: columns_cleared as u32,
            area_effects: area_effects as u32,
            score_delta,
            t_spin: self.pending_t_spin,
            attack_lines,
            garbage_merged,
        });
        self.pending_t_spin = false;

        if self.board.is_game_over() {
            self.game_over = true;
        } else {
            self.spawn_next();
        }
    }

    // ----- queue -----

    fn fill_queue(&mut self) {
        while self.next_queue.len() < QUEUE_LEN {
            let kind = self.rng.draw();
            self.next_queue.push_back(Piece::new(kind));
        }
    }

    /// Build an item piece and slot it in at queue position 1 (the piece
    /// after the one already promised by the preview)
    fn queue_item_piece(&mut self) {
        let item_piece = match self.rng.roll_item_kind() {
            ItemKind::Weight => Piece::weight(),
            ItemKind::Bomb => Piece::bomb(),
            kind => Piece::new(self.rng.draw()).with_item(self.rng.roll_item_block(), kind),
        };
        let position = 1.min(self.next_queue.len());
        self.next_queue.insert(position, item_piece);
        self.next_queue.truncate(QUEUE_LEN);
    }

    fn spawn_next(&mut self) {
        self.fill_queue();
        let mut piece = self.next_queue.pop_front().expect("queue refilled");
        piece.reset_to_spawn();
        self.can_hold = true;
        self.fill_queue();

        if !self.board.is_valid_position(&piece) {
            // SpawnBlocked: the one terminal condition
            self.game_over = true;
        }
        self.current = Some(piece);
    }

    // ----- outputs -----

    /// Resting transform of the current piece (never committed)
    pub fn ghost(&self) -> Option<Piece> {
        let current = self.current.as_ref()?;
        Some(srs::hard_drop(current, &self.board))
    }

    /// Render-facing view of the whole game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.visible(),
            active: self.current,
            ghost_y: self.ghost().map(|p| p.y),
            hold: self.hold,
            next_queue: self.preview().copied().collect(),
            can_hold: self.can_hold,
            paused: self.paused,
            game_over: self.game_over,
            score: self.score,
            lines: self.lines,
            level: self.level,
        }
    }

    /// Change difficulty mid-session: piece weights and leveling follow
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.rng.apply_difficulty(difficulty);
        self.level = level_for_lines(self.lines, difficulty);
    }

    /// Fresh game on the same rng stream and settings; queued garbage
    /// from the previous round is discarded
    pub fn reset(&mut self) {
        self.board.clear();
        self.garbage.clear();
        self.hold = None;
        self.next_queue.clear();
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.can_hold = true;
        self.game_over = false;
        self.paused = false;
        self.lines_since_item = 0;
        self.pending_t_spin = false;
        self.last_event = None;
        self.fill_queue();
        self.spawn_next();
    }

    /// Replace the falling piece; replay and scenario tooling hook
    #[doc(hidden)]
    pub fn force_current(&mut self, piece: Piece) {
        self.current = Some(piece);
    }

    /// Direct board access for scenario construction
    #[doc(hidden)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

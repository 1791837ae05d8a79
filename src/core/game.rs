//! Game module - the state machine driving board, piece, and scoring
//!
//! Owns the authoritative game state and every transition: start, timed
//! advance, player commands, lock events, line clears, and level-ups.
//! It is pure with respect to I/O; a driver calls `tick` on its own clock and
//! reads `take_lock_event` / `snapshot` to react.

use crate::core::board::Board;
use crate::core::catalog::{pick_template, Shape};
use crate::core::collision::can_place;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::core::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{
    GameCommand, GamePhase, LockEvent, BASE_TICK_MS, BOARD_HEIGHT, LEVEL_UP_STEP, MIN_TICK_MS,
    POINTS_PER_ROW, TICK_STEP_PER_LEVEL_MS,
};

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Option<Piece>,
    phase: GamePhase,
    score: u32,
    level: u32,
    rng: SimpleRng,
    /// Last lock outcome (consumed by the driver).
    lock_event: Option<LockEvent>,
}

impl Game {
    /// Create a game in the Idle phase with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            board: Board::new(),
            active: None,
            phase: GamePhase::Idle,
            score: 0,
            level: 1,
            rng: SimpleRng::new(seed),
            lock_event: None,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Current advance interval, derived from the level.
    ///
    /// `1000 - level * 50`, clamped to a 50ms floor so high levels stay
    /// playable instead of going non-positive.
    pub fn tick_interval_ms(&self) -> u32 {
        BASE_TICK_MS
            .saturating_sub(self.level.saturating_mul(TICK_STEP_PER_LEVEL_MS))
            .max(MIN_TICK_MS)
    }

    /// Start (or restart) the game: Idle/GameOver -> Running.
    ///
    /// Resets board, score, and level, then spawns the first piece. A driver
    /// restarting mid-game must stop its old timer first so a single tick
    /// stream drives the board.
    pub fn start(&mut self) {
        self.board.reset();
        self.score = 0;
        self.level = 1;
        self.lock_event = None;
        self.phase = GamePhase::Running;
        self.spawn_piece();
    }

    /// One timed advance: move the active piece down, or lock it.
    ///
    /// Returns true if the game state advanced. Ignored outside Running.
    pub fn tick(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }

        if self.try_move(0, 1) {
            return true;
        }
        self.lock_active();
        true
    }

    /// Apply a player command. Accepted only while Running; returns whether
    /// the piece actually moved or rotated. Illegal commands change nothing.
    pub fn handle_command(&mut self, command: GameCommand) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }

        match command {
            GameCommand::MoveLeft => self.try_move(-1, 0),
            GameCommand::MoveRight => self.try_move(1, 0),
            // A soft drop is a plain down-move; it never locks the piece.
            GameCommand::SoftDrop => self.try_move(0, 1),
            GameCommand::Rotate => self.try_rotate(),
        }
    }

    /// Take and clear the last lock outcome
    pub fn take_lock_event(&mut self) -> Option<LockEvent> {
        self.lock_event.take()
    }

    /// Full redraw snapshot of the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.board.write_grid(&mut snapshot.board);
        snapshot.active = self.active.as_ref().map(ActiveSnapshot::from);
        snapshot.phase = self.phase;
        snapshot.score = self.score;
        snapshot.level = self.level;
        snapshot
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if can_place(&self.board, &active.shape, active.x + dx, active.y + dy) {
            active.apply_offset(dx, dy);
            return true;
        }
        false
    }

    fn try_rotate(&mut self) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let rotated: Shape = active.rotated();
        if can_place(&self.board, &rotated, active.x, active.y) {
            active.shape = rotated;
            return true;
        }
        false
    }

    /// Commit the active piece to the board, clear rows, and respawn.
    ///
    /// An illegal respawn position ends the game; the colliding piece stays
    /// visible in the snapshot, matching the final frame players expect.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board
            .lock_cells(active.board_cells(), active.family);

        let mut event = self.clear_full_rows();

        self.spawn_piece();
        if self.phase == GamePhase::GameOver {
            event.game_over = true;
        }
        self.lock_event = Some(event);
    }

    /// Scan rows bottom-up and compact every full one.
    ///
    /// After removing row y the row above shifts into index y, so the same
    /// index is re-checked before moving up; stacked full rows all clear in
    /// one pass. Each cleared row scores a flat amount; the level rises each
    /// time the score reaches a multiple of the threshold.
    fn clear_full_rows(&mut self) -> LockEvent {
        let mut event = LockEvent::default();
        let mut y = BOARD_HEIGHT as usize - 1;

        loop {
            if self.board.is_row_full(y) {
                self.board.clear_row(y);
                event.rows_cleared += 1;
                event.points_awarded += POINTS_PER_ROW;
                self.score += POINTS_PER_ROW;
                if self.score % LEVEL_UP_STEP == 0 {
                    self.level += 1;
                    event.leveled_up = true;
                }
                // The row formerly above y now sits at y; check it too.
                continue;
            }
            if y == 0 {
                break;
            }
            y -= 1;
        }

        event
    }

    /// Spawn the next piece; an illegal spawn position ends the game.
    fn spawn_piece(&mut self) {
        let template = pick_template(&mut self.rng);
        let piece = Piece::spawn(template);

        if !can_place(&self.board, &piece.shape, piece.x, piece.y) {
            self.phase = GamePhase::GameOver;
        }
        self.active = Some(piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceFamily, BOARD_WIDTH};

    fn running_game() -> Game {
        let mut game = Game::new(12345);
        game.start();
        game
    }

    fn fill_row(game: &mut Game, y: i8, gap: Option<i8>) {
        for x in 0..BOARD_WIDTH as i8 {
            if Some(x) != gap {
                game.board_mut().set(x, y, Some(PieceFamily::Tower));
            }
        }
    }

    #[test]
    fn test_new_game_is_idle() {
        let game = Game::new(1);
        assert_eq!(game.phase(), GamePhase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert!(game.active().is_none());
    }

    #[test]
    fn test_start_spawns_piece() {
        let game = running_game();
        assert_eq!(game.phase(), GamePhase::Running);
        let active = game.active().expect("piece spawned on start");
        assert_eq!(active.y, 0);
    }

    #[test]
    fn test_start_resets_state() {
        let mut game = running_game();
        game.board_mut().set(0, 19, Some(PieceFamily::Wall));

        game.start();
        assert_eq!(game.board().get(0, 19), Some(None));
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 1);
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_tick_moves_piece_down() {
        let mut game = running_game();
        assert!(game.tick());
        assert_eq!(game.active().unwrap().y, 1);
    }

    #[test]
    fn test_tick_ignored_when_idle() {
        let mut game = Game::new(1);
        assert!(!game.tick());
        assert_eq!(game.phase(), GamePhase::Idle);
    }

    #[test]
    fn test_commands_move_horizontally() {
        let mut game = running_game();
        let x0 = game.active().unwrap().x;

        assert!(game.handle_command(GameCommand::MoveRight));
        assert_eq!(game.active().unwrap().x, x0 + 1);

        assert!(game.handle_command(GameCommand::MoveLeft));
        assert_eq!(game.active().unwrap().x, x0);
    }

    #[test]
    fn test_command_blocked_by_wall() {
        let mut game = running_game();

        let mut moved = 0;
        for _ in 0..BOARD_WIDTH {
            if game.handle_command(GameCommand::MoveLeft) {
                moved += 1;
            }
        }
        // Spawn is centered; the wall stops the piece well before 10 moves.
        assert!(moved < BOARD_WIDTH as u32);
        let leftmost = game.active().unwrap().board_cells().map(|(x, _)| x).min();
        assert_eq!(leftmost, Some(0));
    }

    #[test]
    fn test_soft_drop_never_locks() {
        let mut game = running_game();

        // Drive the piece to the floor with soft drops.
        while game.handle_command(GameCommand::SoftDrop) {}

        // The failed soft drop is silently ignored; no lock happened.
        assert!(game.take_lock_event().is_none());
        assert!(game.active().is_some());
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_rotate_commits_only_when_legal() {
        let mut game = running_game();
        let before = game.active().unwrap().shape.clone();

        if game.handle_command(GameCommand::Rotate) {
            assert_eq!(game.active().unwrap().shape, before.rotated());
        } else {
            assert_eq!(game.active().unwrap().shape, before);
        }
    }

    #[test]
    fn test_commands_rejected_outside_running() {
        let mut game = Game::new(1);
        assert!(!game.handle_command(GameCommand::MoveLeft));
        assert!(!game.handle_command(GameCommand::Rotate));
    }

    #[test]
    fn test_tick_on_floor_locks_and_respawns() {
        let mut game = running_game();

        while game.handle_command(GameCommand::SoftDrop) {}
        assert!(game.tick());

        let event = game.take_lock_event().expect("lock event published");
        assert_eq!(event.rows_cleared, 0);
        assert!(!event.game_over);
        assert_eq!(game.active().unwrap().y, 0);
    }

    #[test]
    fn test_single_row_clear_scores_100() {
        let mut game = running_game();
        fill_row(&mut game, 19, None);

        // Ground the piece far from the full row is impossible; instead lock
        // by ticking until the current piece settles on top of row 19.
        loop {
            game.tick();
            if let Some(event) = game.take_lock_event() {
                assert_eq!(event.rows_cleared, 1);
                assert_eq!(event.points_awarded, 100);
                break;
            }
        }
        assert_eq!(game.score(), 100);
        assert_eq!(game.level(), 1);
    }

    #[test]
    fn test_adjacent_double_clear_in_one_pass() {
        let mut game = running_game();
        fill_row(&mut game, 18, None);
        fill_row(&mut game, 19, None);
        game.board_mut().set(2, 17, Some(PieceFamily::Sword));

        loop {
            game.tick();
            if let Some(event) = game.take_lock_event() {
                assert_eq!(event.rows_cleared, 2);
                assert_eq!(event.points_awarded, 200);
                break;
            }
        }
        assert_eq!(game.score(), 200);
        // The marker above both cleared rows dropped by two.
        assert_eq!(game.board().get(2, 19), Some(Some(PieceFamily::Sword)));
    }

    #[test]
    fn test_separated_double_clear_in_one_pass() {
        let mut game = running_game();
        fill_row(&mut game, 15, None);
        fill_row(&mut game, 19, None);
        game.board_mut().set(0, 17, Some(PieceFamily::Wall));

        loop {
            game.tick();
            if let Some(event) = game.take_lock_event() {
                assert_eq!(event.rows_cleared, 2);
                break;
            }
        }
        // Marker between the cleared rows drops by one (only row 19 below it).
        assert_eq!(game.board().get(0, 18), Some(Some(PieceFamily::Wall)));
    }

    #[test]
    fn test_level_up_at_score_threshold() {
        let mut game = running_game();
        assert_eq!(game.tick_interval_ms(), 950);

        // Nine clears leave the score at 900; the tenth crosses 1000.
        for _ in 0..10 {
            fill_row(&mut game, 19, None);
            loop {
                game.tick();
                if let Some(event) = game.take_lock_event() {
                    if game.score() < 1000 {
                        assert!(!event.leveled_up);
                    } else {
                        assert!(event.leveled_up);
                    }
                    break;
                }
            }
            if game.score() >= 1000 {
                break;
            }
        }

        assert_eq!(game.score(), 1000);
        assert_eq!(game.level(), 2);
        assert_eq!(game.tick_interval_ms(), 900);
    }

    #[test]
    fn test_tick_interval_clamped_at_floor() {
        let mut game = Game::new(1);
        game.level = 19;
        assert_eq!(game.tick_interval_ms(), MIN_TICK_MS);
        game.level = 100;
        assert_eq!(game.tick_interval_ms(), MIN_TICK_MS);
    }

    #[test]
    fn test_blocked_spawn_ends_game() {
        let mut game = running_game();

        // Occupy the spawn columns of row 0. Every template's top row crosses
        // columns 3..=6, so the respawn after the next lock must collide; the
        // row itself stays incomplete and can never be cleared away.
        for x in 3..=6 {
            game.board_mut().set(x, 0, Some(PieceFamily::Wall));
        }
        loop {
            game.tick();
            if let Some(event) = game.take_lock_event() {
                assert!(event.game_over);
                break;
            }
        }

        assert_eq!(game.phase(), GamePhase::GameOver);
        let score = game.score();
        assert!(!game.tick());
        assert!(!game.handle_command(GameCommand::MoveLeft));
        assert_eq!(game.score(), score);
    }

    #[test]
    fn test_game_over_then_restart() {
        let mut game = running_game();
        for x in 3..=6 {
            game.board_mut().set(x, 0, Some(PieceFamily::Wall));
        }
        loop {
            game.tick();
            if game.phase() == GamePhase::GameOver {
                break;
            }
        }

        game.start();
        assert_eq!(game.phase(), GamePhase::Running);
        assert_eq!(game.score(), 0);
        assert!(game.active().is_some());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = running_game();
        game.board_mut().set(0, 19, Some(PieceFamily::Shield));
        game.tick();

        let snapshot = game.snapshot();
        assert_eq!(snapshot.board[19][0], Some(PieceFamily::Shield));
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 1);

        let active = snapshot.active.expect("active piece in snapshot");
        assert_eq!(active.y, game.active().unwrap().y);
    }

    #[test]
    fn test_seed_determinism() {
        let mut a = Game::new(777);
        let mut b = Game::new(777);
        a.start();
        b.start();

        for _ in 0..200 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.snapshot().board, b.snapshot().board);
    }
}

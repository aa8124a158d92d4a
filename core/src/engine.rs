use serde::{Deserialize, Serialize};

use crate::*;

/// Power-ups handed out at the start of every game.
pub const POWER_UPS_PER_GAME: u8 = 3;

/// Valid transitions:
/// - Setup -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Setup on reset
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Setup,
    Playing,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game instance: the board, the flags, the move budget and the power-ups.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEngine {
    config: GameConfig,
    seed: u64,
    round: u64,
    board: Board,
    flags: FlagTracker,
    moves_left: CellCount,
    total_mines: CellCount,
    disarmed: KindCounts,
    power_up_active: bool,
    power_ups_remaining: u8,
    phase: Phase,
    triggered: Option<Coord2>,
}

impl GameEngine {
    /// Builds an engine in [`Phase::Setup`] with mines classified from `seed`.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let layout = RandomClassifier::new(seed).classify(&config);
        Ok(Self::with_layout(config, seed, layout))
    }

    /// Builds an engine around a fixed layout. The game config is derived from the layout, so the
    /// usual mine count rules apply. Resetting the engine afterwards draws random boards.
    pub fn from_layout(
        layout: MineLayout,
        flag_modifier: f64,
        move_budget: CellCount,
    ) -> Result<Self> {
        let (rows, cols) = layout.size();
        if rows != cols {
            return Err(ConfigIssue::NotSquare { rows, cols }.into());
        }
        let config = GameConfig::new(rows, layout.mine_count(), flag_modifier, move_budget)?;
        Ok(Self::with_layout(config, 0, layout))
    }

    fn with_layout(config: GameConfig, seed: u64, layout: MineLayout) -> Self {
        Self {
            config,
            seed,
            round: 0,
            board: Board::new(layout),
            flags: FlagTracker::new(config.flag_capacity()),
            moves_left: config.move_budget,
            total_mines: config.total_mines,
            disarmed: KindCounts::default(),
            power_up_active: false,
            power_ups_remaining: POWER_UPS_PER_GAME,
            phase: Phase::Setup,
            triggered: None,
        }
    }

    /// Replaces the configuration and resets to a fresh board in [`Phase::Setup`].
    pub fn configure(&mut self, config: GameConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Discards the current game and classifies a new board, back in [`Phase::Setup`].
    pub fn reset(&mut self) {
        self.round = self.round.wrapping_add(1);
        let layout = RandomClassifier::new(self.round_seed()).classify(&self.config);
        *self = Self {
            round: self.round,
            ..Self::with_layout(self.config, self.seed, layout)
        };
        log::debug!("Reset to round {}", self.round);
    }

    /// Enters [`Phase::Playing`]. Outside of setup the current game is reset first.
    pub fn start(&mut self) {
        if !matches!(self.phase, Phase::Setup) {
            self.reset();
        }
        self.phase = Phase::Playing;
        log::debug!(
            "Started {0}x{0} game with {1} mines, {2} moves",
            self.config.size,
            self.total_mines,
            self.moves_left
        );
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn flags(&self) -> &FlagTracker {
        &self.flags
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn moves_left(&self) -> CellCount {
        self.moves_left
    }

    /// Displayed mine quota. Only a Blast disarmed by a power-up lowers it.
    pub fn total_mines(&self) -> CellCount {
        self.total_mines
    }

    pub fn disarmed(&self) -> KindCounts {
        self.disarmed
    }

    pub fn power_up_active(&self) -> bool {
        self.power_up_active
    }

    pub fn power_ups_remaining(&self) -> u8 {
        self.power_ups_remaining
    }

    /// The mine whose hit ended the game, if any.
    pub fn triggered(&self) -> Option<Coord2> {
        self.triggered
    }

    pub fn tiles_revealed(&self) -> CellCount {
        self.board.tiles_revealed()
    }

    /// Revealed tiles needed to win: every cell that does not hold a live mine. Disarming a mine
    /// raises it by one along with `tiles_revealed`, so only opening safe cells makes progress.
    pub fn win_threshold(&self) -> CellCount {
        let layout = self.board.layout();
        layout.total_cells().saturating_sub(layout.mine_count())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    pub fn activate_power_up(&mut self) -> Report {
        if !self.phase.is_playing() || self.power_up_active || self.power_ups_remaining == 0 {
            return Report::ignored();
        }

        self.power_up_active = true;
        self.power_ups_remaining -= 1;
        log::debug!("Power-up armed, {} left", self.power_ups_remaining);

        let mut report = Report::new(Outcome::Continue);
        report.push(Event::PowerUpArmed {
            remaining: self.power_ups_remaining,
        });
        report
    }

    /// Reveals a cell. Every accepted click costs a move; mines are disarmed, penalised or end the
    /// game depending on their kind and the power-up.
    pub fn primary_click(&mut self, coords: Coord2) -> Result<Report> {
        let coords = self.board.layout().validate_coords(coords)?;

        if !self.phase.is_playing() || !self.board.state_at(coords).is_untouched() {
            return Ok(Report::ignored());
        }

        self.moves_left = self.moves_left.saturating_sub(1);
        let mut report = Report::new(Outcome::Continue);

        match self.board.mine_at(coords) {
            Some(kind) if self.power_up_active => {
                self.disarm(coords, 0, true, &mut report);
                if matches!(kind, MineKind::Blast) {
                    self.total_mines = self.total_mines.saturating_sub(1);
                }
            }
            Some(kind) => match kind.penalty() {
                Some(penalty) => {
                    self.moves_left = self.moves_left.saturating_sub(penalty);
                    self.disarm(coords, penalty, false, &mut report);
                }
                None => self.detonate(coords, kind, &mut report),
            },
            None => self.open(coords, &mut report),
        }

        if self.power_up_active {
            self.power_up_active = false;
            report.push(Event::PowerUpSpent);
        }

        self.settle(&mut report);
        Ok(report)
    }

    /// Toggles a flag. Flagging past capacity evicts the oldest flag and resolves that cell as if
    /// it had been clicked, free of charge and ignoring the power-up.
    pub fn secondary_click(&mut self, coords: Coord2) -> Result<Report> {
        let coords = self.board.layout().validate_coords(coords)?;

        if !self.phase.is_playing() {
            return Ok(Report::ignored());
        }

        let mut report = Report::new(Outcome::Continue);
        match self.board.state_at(coords) {
            CellState::Flagged => {
                self.board.set_flag(coords, false);
                self.flags.remove(coords);
                report.push(Event::Unflagged { coords });
            }
            CellState::Hidden => {
                let evicted = self.flags.push(coords);
                if let Some(evicted) = evicted {
                    self.board.set_flag(evicted, false);
                }
                self.board.set_flag(coords, true);
                report.push(Event::Flagged { coords });

                if let Some(evicted) = evicted {
                    report.push(Event::Evicted { coords: evicted });
                    self.resolve_evicted(evicted, &mut report);
                }
            }
            _ => return Ok(Report::ignored()),
        }

        self.settle(&mut report);
        Ok(report)
    }

    fn resolve_evicted(&mut self, coords: Coord2, report: &mut Report) {
        log::debug!("Flag at {:?} evicted, resolving", coords);
        match self.board.mine_at(coords) {
            Some(kind) => self.detonate(coords, kind, report),
            None => self.open(coords, report),
        }
    }

    /// Flood-reveals a safe cell and drops the flags the flood swept away.
    fn open(&mut self, coords: Coord2, report: &mut Report) {
        let reveal = self.board.reveal(coords);
        report.push(Event::Opened {
            coords,
            cells: reveal.cells,
        });
        for coords in reveal.unflagged {
            self.flags.remove(coords);
            report.push(Event::Unflagged { coords });
        }
    }

    fn disarm(
        &mut self,
        coords: Coord2,
        penalty: CellCount,
        by_power_up: bool,
        report: &mut Report,
    ) {
        if let Some(kind) = self.board.disarm(coords) {
            self.disarmed[kind] += 1;
            log::debug!(
                "Disarmed {:?} at {:?}, penalty {}, power-up {}",
                kind,
                coords,
                penalty,
                by_power_up
            );
            report.push(Event::Disarmed {
                coords,
                kind,
                penalty,
                by_power_up,
            });
        }
    }

    fn detonate(&mut self, coords: Coord2, kind: MineKind, report: &mut Report) {
        self.triggered = Some(coords);
        report.push(Event::Detonated { coords, kind });
        self.end_game(false);
    }

    /// Win check first, then the move budget, then maps the phase onto the report.
    fn settle(&mut self, report: &mut Report) {
        if self.phase.is_playing() {
            if self.tiles_revealed() >= self.win_threshold() {
                self.end_game(true);
            } else if self.moves_left == 0 {
                report.push(Event::MovesExhausted);
                self.end_game(false);
            }
        }

        report.outcome = match self.phase {
            Phase::Won => Outcome::Won,
            Phase::Lost => Outcome::Lost,
            Phase::Setup | Phase::Playing => Outcome::Continue,
        };
    }

    fn end_game(&mut self, won: bool) {
        if self.phase.is_finished() {
            return;
        }

        if won {
            self.phase = Phase::Won;
            log::debug!("Game won with {} moves left", self.moves_left);
        } else {
            self.phase = Phase::Lost;
            let exposed = self.board.expose_mines();
            log::debug!("Game lost, exposed {} mines", exposed);
        }
        self.power_up_active = false;
    }

    fn round_seed(&self) -> u64 {
        self.seed.wrapping_add(self.round)
    }
}

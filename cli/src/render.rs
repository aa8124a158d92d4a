use blastfield_core::{CellState, Event, MineKind, Outcome, Phase, Report, Snapshot};

pub fn glyph(state: CellState) -> char {
    use CellState::*;
    use MineKind::*;

    match state {
        Hidden => '.',
        Flagged => 'F',
        Revealed(0) => ' ',
        Revealed(count) => char::from(b'0' + count),
        Disarmed(MiniBomb) => 'b',
        Disarmed(Mine) => 'm',
        Disarmed(Blast) => 'x',
        Exposed(MiniBomb) => 'B',
        Exposed(Mine) => 'M',
        Exposed(Blast) => 'X',
    }
}

/// Board with row and column headers. The mine that ended the game is drawn as `*`.
pub fn board(snapshot: &Snapshot) -> String {
    let mut out = String::from("    ");
    for col in 0..snapshot.size.1 {
        out.push_str(&format!("{col:>3}"));
    }
    out.push('\n');

    for (row, cells) in snapshot.rows().enumerate() {
        out.push_str(&format!("{row:>3} "));
        for (col, &state) in cells.iter().enumerate() {
            let coords = (row as u8, col as u8);
            let ch = if snapshot.triggered == Some(coords) {
                '*'
            } else {
                glyph(state)
            };
            out.push_str(&format!("{ch:>3}"));
        }
        out.push('\n');
    }
    out
}

pub fn status(snapshot: &Snapshot) -> String {
    let phase = match snapshot.phase {
        Phase::Setup => "setup, `s` to start",
        Phase::Playing if snapshot.power_up_active => "playing, power-up armed",
        Phase::Playing => "playing",
        Phase::Won => "won",
        Phase::Lost => "lost",
    };
    format!(
        "b {} m {} x {}   F {}/{}   moves {}   power-ups {}   [{}]",
        snapshot.remaining.mini_bomb,
        snapshot.remaining.mine,
        snapshot.remaining.blast,
        snapshot.flag_count,
        snapshot.flag_capacity,
        snapshot.moves_left,
        snapshot.power_ups_remaining,
        phase,
    )
}

pub fn event(event: &Event) -> String {
    match *event {
        Event::Opened { coords, cells } => format!("opened {cells} cells from {coords:?}"),
        Event::Disarmed {
            coords,
            kind,
            by_power_up: true,
            ..
        } => format!("power-up disarmed {kind:?} at {coords:?}"),
        Event::Disarmed {
            coords,
            kind,
            penalty,
            ..
        } => format!("hit {kind:?} at {coords:?}, {penalty} extra moves lost"),
        Event::Detonated { coords, kind } => format!("{kind:?} went off at {coords:?}"),
        Event::Flagged { coords } => format!("flagged {coords:?}"),
        Event::Unflagged { coords } => format!("unflagged {coords:?}"),
        Event::Evicted { coords } => format!("out of flags, {coords:?} lost its flag"),
        Event::PowerUpArmed { remaining } => format!("power-up armed, {remaining} left"),
        Event::PowerUpSpent => "power-up spent".to_owned(),
        Event::MovesExhausted => "out of moves".to_owned(),
    }
}

pub fn report(report: &Report) -> String {
    let mut out = String::new();
    for line in report.events.iter().map(event) {
        out.push_str(&line);
        out.push('\n');
    }
    match report.outcome {
        Outcome::Won => out.push_str("cleared the field\n"),
        Outcome::Lost => out.push_str("game over\n"),
        Outcome::Ignored => out.push_str("nothing happened\n"),
        Outcome::Continue => {}
    }
    if report.outcome.is_final() {
        out.push_str("`s` deals a new board\n");
    }
    out
}

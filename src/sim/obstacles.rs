//! Scrolling obstacle stream
//!
//! Pipes and ground tiles are kept in a rolling window ahead of the bird:
//! scroll, drop whatever left the screen, then refill on the right.

use rand::Rng;

use super::state::{GameState, LandTile, Mode, Pipe};
use crate::tuning::Tuning;

/// Spawn a pipe with a uniformly drawn gap that clears both margins.
///
/// `tuning` is expected to have passed [`Tuning::validate`]; otherwise the
/// gap is pinned to the top margin.
pub fn new_pipe<R: Rng + ?Sized>(cur_frame: u64, start_x: i32, tuning: &Tuning, rng: &mut R) -> Pipe {
    let low = tuning.pipe_random_boundary;
    let gap_top = match tuning.gap_range_len() {
        Some(len) if len > 0 => rng.random_range(low..low + len),
        _ => low,
    };
    Pipe::new(cur_frame, start_x, gap_top)
}

/// Scroll and recycle pipes. Only runs while `Playing`.
pub fn update_pipes<R: Rng + ?Sized>(state: &mut GameState, tuning: &Tuning, rng: &mut R) {
    if state.mode != Mode::Playing {
        return;
    }

    let cur_frame = state.cur_frame;
    for pipe in &mut state.pipes {
        pipe.scroll_to(cur_frame, tuning);
    }
    state.pipes.retain(|p| p.cur_x > -tuning.pipe_width);
    state.pipes.sort_by_key(|p| p.cur_x);

    while state.pipes.len() < tuning.min_pipes {
        let start_x = state
            .pipes
            .last()
            .map_or(tuning.pipe_start_x, |p| p.cur_x + tuning.pipe_spacing);
        let pipe = new_pipe(cur_frame, start_x, tuning, rng);
        log::debug!(
            "Spawned pipe at x={} gap_top={} (frame {})",
            pipe.start_x,
            pipe.gap_top,
            cur_frame
        );
        state.pipes.push(pipe);
    }
}

/// Scroll and recycle ground tiles. The ground stops once the bird is dead.
pub fn update_land(state: &mut GameState, tuning: &Tuning) {
    if state.mode == Mode::Dead {
        return;
    }

    let cur_frame = state.cur_frame;
    for tile in &mut state.land_tiles {
        tile.scroll_to(cur_frame, tuning);
    }
    state.land_tiles.retain(|t| t.cur_x > -tuning.land_width);
    state.land_tiles.sort_by_key(|t| t.cur_x);

    while state.land_tiles.len() < tuning.min_land_tiles {
        let start_x = state
            .land_tiles
            .last()
            .map_or(tuning.land_start_x, |t| t.cur_x + tuning.land_width);
        state.land_tiles.push(LandTile::new(cur_frame, start_x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_state(t: &Tuning) -> GameState {
        let mut state = GameState::new(t);
        state.mode = Mode::Playing;
        state
    }

    #[test]
    fn test_first_fill_spaces_pipes_from_start_offset() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = playing_state(&t);

        update_pipes(&mut state, &t, &mut rng);

        let xs: Vec<i32> = state.pipes.iter().map(|p| p.cur_x).collect();
        assert_eq!(xs, vec![360, 532, 704]);
        for pipe in &state.pipes {
            assert!(pipe.gap_top >= t.pipe_random_boundary);
            assert!(pipe.gap_top + t.pipe_gap < t.land_y - t.pipe_random_boundary + 1);
        }
    }

    #[test]
    fn test_pipe_dropped_once_fully_offscreen() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut state = playing_state(&t);
        update_pipes(&mut state, &t, &mut rng);
        let first = state.pipes[0];

        // 360 - 4 * 101 = -44: still visible
        state.cur_frame = 101;
        update_pipes(&mut state, &t, &mut rng);
        assert_eq!(state.pipes[0], Pipe { cur_x: -44, ..first });

        // 360 - 4 * 102 = -48 = -pipe_width: gone, replaced on the right
        state.cur_frame = 102;
        update_pipes(&mut state, &t, &mut rng);
        assert!(state.pipes.iter().all(|p| p.start_frame != 0 || p.start_x != 360));
        assert_eq!(state.pipes.len(), 3);
        assert_eq!(state.pipes[2].cur_x, state.pipes[1].cur_x + t.pipe_spacing);
        assert!(state.pipes.windows(2).all(|w| w[0].cur_x <= w[1].cur_x));
    }

    #[test]
    fn test_pipes_frozen_outside_playing() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut state = GameState::new(&t);
        update_pipes(&mut state, &t, &mut rng);
        assert!(state.pipes.is_empty());

        state.mode = Mode::Playing;
        update_pipes(&mut state, &t, &mut rng);
        let before = state.pipes.clone();
        state.mode = Mode::Dead;
        state.cur_frame = 40;
        update_pipes(&mut state, &t, &mut rng);
        assert_eq!(state.pipes, before);
    }

    #[test]
    fn test_land_tiles_tile_and_recycle() {
        let t = Tuning::default();
        let mut state = GameState::new(&t);
        update_land(&mut state, &t);
        let xs: Vec<i32> = state.land_tiles.iter().map(|l| l.cur_x).collect();
        assert_eq!(xs, vec![0, 288]);

        // 0 - 4 * 72 = -288: first tile leaves, a new one joins at the end
        state.cur_frame = 72;
        update_land(&mut state, &t);
        let xs: Vec<i32> = state.land_tiles.iter().map(|l| l.cur_x).collect();
        assert_eq!(xs, vec![0, 288]);
        assert_eq!(state.land_tiles[1].start_frame, 72);
    }

    #[test]
    fn test_land_stops_when_dead() {
        let t = Tuning::default();
        let mut state = GameState::new(&t);
        update_land(&mut state, &t);
        state.mode = Mode::Dead;
        state.cur_frame = 10;
        update_land(&mut state, &t);
        assert_eq!(state.land_tiles[0].cur_x, 0);
    }

    #[test]
    fn test_same_seed_same_gaps() {
        let t = Tuning::default();
        let a: Vec<i32> = {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..8).map(|_| new_pipe(0, 0, &t, &mut rng).gap_top).collect()
        };
        let b: Vec<i32> = {
            let mut rng = Pcg32::seed_from_u64(42);
            (0..8).map(|_| new_pipe(0, 0, &t, &mut rng).gap_top).collect()
        };
        assert_eq!(a, b);
    }
}

//! Online Q-learning pilot
//!
//! Observes the state after each simulation step, credits the previous
//! (state, action) pair, and picks the next action. Its jumps go through the
//! same input path as a player's.

use rand::Rng;

use super::table::{Action, QTable, StateKey};
use crate::sim::{GameState, Mode};
use crate::tuning::Tuning;

/// Discretize the bird's relation to the next pipe ahead.
///
/// `None` when no pipe is ahead: no learning signal this frame.
pub fn observe(state: &GameState, tuning: &Tuning) -> Option<StateKey> {
    let pipe = state.next_pipe(tuning)?;
    let res = f64::from(tuning.ql_resolution);
    Some(StateKey {
        dx: (f64::from(pipe.cur_x) / res).floor() as i32,
        dy: ((f64::from(pipe.gap_top) - state.bird_y) / res).floor() as i32,
    })
}

/// Agent memory carried between frames
#[derive(Debug, Clone, Default)]
pub struct Agent {
    enabled: bool,
    table: QTable,
    prev_state: Option<StateKey>,
    prev_action: Option<Action>,
    /// Discard the pending credit; set when a player jumps while training
    skip: bool,
}

impl Agent {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    /// Resume training from a previously saved table
    pub fn with_table(enabled: bool, table: QTable) -> Self {
        Self {
            enabled,
            table,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            log::info!("Q-learning agent {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn prev_state(&self) -> Option<StateKey> {
        self.prev_state
    }

    pub fn prev_action(&self) -> Option<Action> {
        self.prev_action
    }

    pub fn is_skipping(&self) -> bool {
        self.skip
    }

    /// Stop crediting the agent until the next death; the next jump is not its own
    pub fn skip_next_credit(&mut self) {
        self.skip = true;
    }

    /// Learn from the frame just simulated and choose the next action.
    ///
    /// - `Playing`: credit the alive reward, then act
    /// - `Dead`: credit the death penalty against the last live pair, forget
    ///   it, and ask for the jump that restarts the round
    /// - `Ready`: nothing to do
    ///
    /// A disabled agent returns `Stay` without reading the state.
    pub fn update<R: Rng + ?Sized>(&mut self, state: &GameState, tuning: &Tuning, rng: &mut R) -> Action {
        if !self.enabled {
            return Action::Stay;
        }

        if self.skip {
            self.prev_state = None;
            self.prev_action = None;
        }

        let next = observe(state, tuning);
        if let Some(key) = next {
            self.table.ensure(key);
        }

        match state.mode {
            Mode::Playing => {
                self.credit(next, tuning.ql_alive_reward, tuning);
                self.prev_state = next;

                let action = self.choose(next, tuning, rng);
                self.prev_action = Some(action);
                action
            }
            Mode::Dead => {
                self.credit(next, tuning.ql_dead_reward, tuning);
                self.prev_state = None;
                self.prev_action = None;
                self.skip = false;
                Action::Jump
            }
            Mode::Ready => Action::Stay,
        }
    }

    fn credit(&mut self, next: Option<StateKey>, reward: f64, tuning: &Tuning) {
        let (Some(state), Some(action), Some(next)) = (self.prev_state, self.prev_action, next) else {
            return;
        };
        if let Some(q) = self
            .table
            .update(state, action, next, reward, tuning.ql_alpha, tuning.ql_gamma)
        {
            log::trace!("Q{:?}[{:?}] = {:.3} (r={})", state, action, q, reward);
        }
    }

    fn choose<R: Rng + ?Sized>(&self, key: Option<StateKey>, tuning: &Tuning, rng: &mut R) -> Action {
        if rng.random::<f64>() < tuning.ql_epsilon {
            return if rng.random::<f64>() < tuning.ql_explore_jump_rate {
                Action::Jump
            } else {
                Action::Stay
            };
        }
        key.and_then(|k| self.table.greedy(k)).unwrap_or(Action::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Pipe;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_with_pipe(t: &Tuning, cur_x: i32, gap_top: i32, bird_y: f64) -> GameState {
        let mut state = GameState::new(t);
        state.mode = Mode::Playing;
        state.bird_y = bird_y;
        let mut pipe = Pipe::new(0, cur_x, gap_top);
        pipe.cur_x = cur_x;
        state.pipes.push(pipe);
        state
    }

    #[test]
    fn test_observe_discretizes() {
        let t = Tuning::default();
        let state = playing_with_pipe(&t, 100, 150, 236.0);
        // floor(100 / 15) = 6, floor(-86 / 15) = -6
        assert_eq!(observe(&state, &t), Some(StateKey { dx: 6, dy: -6 }));
    }

    #[test]
    fn test_observe_without_pipe_ahead() {
        let t = Tuning::default();
        let state = playing_with_pipe(&t, 10, 150, 236.0);
        assert_eq!(observe(&state, &t), None);
    }

    #[test]
    fn test_disabled_agent_is_noop() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(false);
        let state = playing_with_pipe(&t, 100, 150, 236.0);
        assert_eq!(agent.update(&state, &t, &mut rng), Action::Stay);
        assert!(agent.table().is_empty());
        assert_eq!(agent.prev_state(), None);
    }

    #[test]
    fn test_alive_reward_credits_previous_pair() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(true);

        let first = playing_with_pipe(&t, 100, 150, 236.0);
        assert_eq!(agent.update(&first, &t, &mut rng), Action::Stay);
        let s = agent.prev_state().unwrap();
        assert_eq!(agent.table().get(s), Some(&[0.0, 0.0]));

        let second = playing_with_pipe(&t, 96, 150, 236.0);
        agent.update(&second, &t, &mut rng);
        // (1 - 0.6) * 0 + 0.6 * (1 + 0.8 * 0)
        assert!((agent.table().get(s).unwrap()[0] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_death_penalty_applied_once_then_restart() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(true);

        let alive = playing_with_pipe(&t, 100, 150, 236.0);
        agent.update(&alive, &t, &mut rng);
        let s = agent.prev_state().unwrap();

        let mut dead = playing_with_pipe(&t, 96, 150, 300.0);
        dead.mode = Mode::Dead;
        assert_eq!(agent.update(&dead, &t, &mut rng), Action::Jump);
        assert!((agent.table().get(s).unwrap()[0] - (-60.0)).abs() < 1e-9);
        assert_eq!(agent.prev_state(), None);
        assert_eq!(agent.prev_action(), None);

        // Still dead next frame: asks to restart, no second penalty
        assert_eq!(agent.update(&dead, &t, &mut rng), Action::Jump);
        assert!((agent.table().get(s).unwrap()[0] - (-60.0)).abs() < 1e-9);
    }

    #[test]
    fn test_skip_discards_credit_until_death() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(true);

        let a = playing_with_pipe(&t, 100, 150, 236.0);
        agent.update(&a, &t, &mut rng);
        let s = agent.prev_state().unwrap();

        agent.skip_next_credit();
        let b = playing_with_pipe(&t, 96, 150, 236.0);
        agent.update(&b, &t, &mut rng);
        assert_eq!(agent.table().get(s), Some(&[0.0, 0.0]));
        assert!(agent.is_skipping());

        let mut dead = b.clone();
        dead.mode = Mode::Dead;
        agent.update(&dead, &t, &mut rng);
        assert!(!agent.is_skipping());
        assert!(agent.table().iter().all(|(_, v)| *v == [0.0, 0.0]));
    }

    #[test]
    fn test_exploit_jumps_when_jump_is_better() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let state = playing_with_pipe(&t, 100, 150, 236.0);
        let key = observe(&state, &t).unwrap();

        let mut table = QTable::new();
        table.ensure(key);
        let other = StateKey { dx: 0, dy: 0 };
        table.ensure(other);
        table.update(key, Action::Jump, other, 5.0, 1.0, 0.0);

        let mut agent = Agent::with_table(true, table);
        assert_eq!(agent.update(&state, &t, &mut rng), Action::Jump);
        assert_eq!(agent.prev_action(), Some(Action::Jump));
    }

    #[test]
    fn test_explore_always_with_full_epsilon() {
        let t = Tuning {
            ql_epsilon: 1.0,
            ql_explore_jump_rate: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(true);
        let state = playing_with_pipe(&t, 100, 150, 236.0);
        assert_eq!(agent.update(&state, &t, &mut rng), Action::Jump);
    }

    #[test]
    fn test_ready_does_nothing() {
        let t = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let mut agent = Agent::new(true);
        let state = GameState::new(&t);
        assert_eq!(agent.update(&state, &t, &mut rng), Action::Stay);
        assert!(agent.table().is_empty());
    }
}

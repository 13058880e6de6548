//! Game instance holding all simulation state
//!
//! One `step` per scheduler tick: the simulation pipeline, then the agent.
//! Player and agent jumps share a single pending flag that the next step
//! consumes.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::agent::{Action, Agent, QTable};
use crate::sim::{GameState, StepError, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Odd constant mixed into the seed for the agent's exploration stream
const AGENT_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Game {
    state: GameState,
    agent: Agent,
    tuning: Tuning,
    /// Pipe gap draws
    world_rng: Pcg32,
    /// Exploration draws, kept apart so the agent never perturbs the course
    agent_rng: Pcg32,
    pending_jump: bool,
}

impl Game {
    /// A session waiting in `Ready`, agent disabled.
    ///
    /// Fails if `tuning` does not pass [`Tuning::validate`].
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state: GameState::new(&tuning),
            agent: Agent::new(false),
            tuning,
            world_rng: Pcg32::seed_from_u64(seed),
            agent_rng: Pcg32::seed_from_u64(seed ^ AGENT_STREAM),
            pending_jump: false,
        })
    }

    /// Same as [`Game::new`] with the agent switched on
    pub fn with_agent(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        let mut game = Self::new(tuning, seed)?;
        game.agent.set_enabled(true);
        Ok(game)
    }

    /// Continue training from a saved table
    pub fn with_q_table(tuning: Tuning, seed: u64, table: QTable) -> Result<Self, TuningError> {
        let mut game = Self::new(tuning, seed)?;
        game.agent = Agent::with_table(true, table);
        Ok(game)
    }

    /// Player jump. Idempotent within a frame.
    ///
    /// While the agent is training, the pair it would credit next is dropped
    /// so this jump is not learned as its own decision.
    pub fn request_jump(&mut self) {
        if self.agent.is_enabled() {
            self.agent.skip_next_credit();
        }
        self.pending_jump = true;
    }

    /// Advance to `frame` and return the new state for rendering
    pub fn step(&mut self, frame: u64) -> Result<&GameState, StepError> {
        let input = TickInput {
            frame,
            jump: self.pending_jump,
        };
        tick(&mut self.state, &input, &self.tuning, &mut self.world_rng)?;
        self.pending_jump = false;

        if self.agent.update(&self.state, &self.tuning, &mut self.agent_rng) == Action::Jump {
            self.pending_jump = true;
        }

        Ok(&self.state)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn set_agent_enabled(&mut self, enabled: bool) {
        self.agent.set_enabled(enabled);
    }

    /// A jump is queued for the next step
    pub fn jump_pending(&self) -> bool {
        self.pending_jump
    }
}

use std::time::Duration;

use crate::game::board::Color;
use crate::strategy::agent::Agent;

/// Running record of how long an agent takes to decide.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DecisionLatency {
    pub decisions: usize,
    pub total: Duration,
    pub max: Duration,
}

impl DecisionLatency {
    pub fn record(&mut self, elapsed: Duration) {
        self.decisions += 1;
        self.total += elapsed;
        self.max = self.max.max(elapsed);
    }

    pub fn mean(&self) -> Duration {
        if self.decisions == 0 {
            Duration::ZERO
        } else {
            self.total / self.decisions as u32
        }
    }
}

/// An agent seated at the board.
pub struct Seat {
    pub agent: Box<dyn Agent>,
    pub latency: DecisionLatency,
}

impl Seat {
    pub fn new(agent: Box<dyn Agent>) -> Self {
        Seat {
            agent,
            latency: DecisionLatency::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.agent.color()
    }
}

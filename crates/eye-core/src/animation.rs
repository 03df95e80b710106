use log::{debug, trace};

use crate::wander::WanderPhase;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    Closing,
    Opening,
    Wandering,
}

impl BlinkPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Closing => "closing",
            Self::Opening => "opening",
            Self::Wandering => "wandering",
        }
    }
}

/// Parameters for one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Frame number since the sequencer was created, starting at 0.
    pub index: u64,
    pub phase: BlinkPhase,
    /// 0 = fully open, 1 = fully closed. Shared by both eyes.
    pub blink: f32,
    pub wander: WanderPhase,
}

/// Cyclic blink state machine: Closing → Opening → Wandering → Closing …
///
/// Closing ramps the blink fraction `0/n, 1/n … n/n` (the `0/n` frame is the
/// tick that leaves Wandering), Opening ramps `(n-1)/n … 0`, and Wandering
/// holds the lids open for `hold_frames` ticks. The wander phase advances on
/// every tick, whatever the blink phase.
#[derive(Clone, Debug)]
pub struct BlinkSequencer {
    phase: BlinkPhase,
    /// Steps taken in Closing/Opening, or frames left in Wandering.
    cursor: u32,
    blink_steps: u32,
    hold_frames: u32,
    wander: WanderPhase,
    frame: u64,
}

impl BlinkSequencer {
    /// Start with open lids and the hold already expired, so the first tick
    /// begins a blink.
    pub fn new(blink_steps: u32, hold_frames: u32, wander_steps: u32) -> Self {
        Self::with_state(
            BlinkPhase::Wandering,
            0,
            blink_steps,
            hold_frames,
            WanderPhase::new(wander_steps),
        )
    }

    /// Resume from an explicit state. `cursor` is clamped into the phase's range.
    pub fn with_state(
        phase: BlinkPhase,
        cursor: u32,
        blink_steps: u32,
        hold_frames: u32,
        wander: WanderPhase,
    ) -> Self {
        let blink_steps = blink_steps.max(1);
        let cursor = match phase {
            BlinkPhase::Closing | BlinkPhase::Opening => cursor.min(blink_steps),
            BlinkPhase::Wandering => cursor.min(hold_frames),
        };
        Self {
            phase,
            cursor,
            blink_steps,
            hold_frames,
            wander,
            frame: 0,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    pub fn wander(&self) -> WanderPhase {
        self.wander
    }

    pub fn blink_steps(&self) -> u32 {
        self.blink_steps
    }

    /// Blink fraction of the current state.
    pub fn blink(&self) -> f32 {
        let n = self.blink_steps as f32;
        match self.phase {
            BlinkPhase::Closing => self.cursor as f32 / n,
            BlinkPhase::Opening => 1.0 - self.cursor as f32 / n,
            BlinkPhase::Wandering => 0.0,
        }
    }

    /// Frame parameters the next [`tick`](Self::tick) will produce, without
    /// advancing.
    pub fn peek(&self) -> Frame {
        let mut next = self.clone();
        next.tick()
    }

    /// Advance one frame and return its parameters.
    ///
    /// The frame carries the wander phase as it was before this tick, then the
    /// wander phase moves on by one step.
    pub fn tick(&mut self) -> Frame {
        let wander = self.wander;
        self.wander.advance();
        self.step_blink();

        let frame = Frame {
            index: self.frame,
            phase: self.phase,
            blink: self.blink(),
            wander,
        };
        self.frame += 1;
        trace!(
            "frame {}: {} blink={:.3} wander={}",
            frame.index,
            frame.phase.as_str(),
            frame.blink,
            frame.wander.step()
        );
        frame
    }

    fn step_blink(&mut self) {
        match self.phase {
            BlinkPhase::Closing => {
                self.cursor += 1;
                if self.cursor >= self.blink_steps {
                    self.cursor = self.blink_steps;
                    self.enter(BlinkPhase::Opening, 0);
                }
            }
            BlinkPhase::Opening => {
                self.cursor += 1;
                if self.cursor >= self.blink_steps {
                    self.enter(BlinkPhase::Wandering, self.hold_frames);
                }
            }
            BlinkPhase::Wandering => {
                if self.cursor == 0 {
                    self.enter(BlinkPhase::Closing, 0);
                } else {
                    self.cursor -= 1;
                }
            }
        }
    }

    fn enter(&mut self, phase: BlinkPhase, cursor: u32) {
        debug!("blink phase {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
        self.cursor = cursor;
    }
}

impl Iterator for BlinkSequencer {
    type Item = Frame;

    /// Never returns `None`.
    fn next(&mut self) -> Option<Frame> {
        Some(self.tick())
    }
}

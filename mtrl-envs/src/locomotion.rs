use anyhow::Result;

/// Interface to the physics engine backing the locomotion benchmarks.
///
/// The environments in this crate own no simulation state. They apply
/// controls, read the generalized forward position before and after an
/// advance, and fetch whatever observation vector the engine exposes. Body
/// layout, contact handling and integration all stay on the engine side.
pub trait LocomotionSim {
    /// Apply one control vector for `frames` integration sub-steps.
    fn advance(&mut self, ctrl: &[f64], frames: usize) -> Result<()>;

    /// Generalized horizontal position of the body.
    fn forward_position(&self) -> f64;

    fn observation(&self) -> Result<Vec<f64>>;

    /// Restore the initial pose and velocities.
    fn reset_pose(&mut self, seed: u64) -> Result<()>;

    /// How many integration sub-steps make up one env step.
    fn frame_skip(&self) -> usize;

    /// Duration of a single integration sub-step.
    fn timestep(&self) -> f64;

    /// Wall-clock-equivalent duration of one env step.
    fn dt(&self) -> f64 {
        self.timestep() * self.frame_skip() as f64
    }

    fn observation_size(&self) -> usize;

    fn action_size(&self) -> usize;
}

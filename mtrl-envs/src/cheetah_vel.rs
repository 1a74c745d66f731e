//! Half-cheetah locomotion with a per-task target velocity, after the task
//! family introduced by MAML (Finn et al., 2017). Tasks are target forward
//! velocities drawn uniformly from `[0.0, 2.0)`; the reward penalizes the
//! absolute deviation from the active target plus a quadratic control cost.

use crate::locomotion::LocomotionSim;
use anyhow::Result;
use candle_core::Tensor;
use mtrl_core::{
    env::{Env, EnvironmentDescription, SnapShot, Space, TaskEnv},
    error::EnvError,
    registry::EnvRegistry,
    rng,
    tensor::MtrlTensor,
};
use rand::Rng;
use tracing::debug;

/// Registry tag harness code instantiates this environment under.
pub const ENV_TAG: &str = "cheetah-vel";

/// Seed for the task pool draw. Fixed so every construction sees the same
/// task distribution and results stay comparable across runs.
pub const TASK_SEED: u64 = 0;

const VEL_RANGE: std::ops::Range<f64> = 0.0..2.0;
const CTRL_COST_WEIGHT: f64 = 0.5 * 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityTask {
    pub velocity: f64,
}

/// Draw `num_tasks` target velocities from `rng`. The generator is caller
/// owned; reproducibility comes from seeding it, not from global state.
pub fn sample_tasks(rng: &mut impl Rng, num_tasks: usize) -> Result<Vec<VelocityTask>> {
    if num_tasks < 1 {
        return Err(EnvError::InvalidArgument("num_tasks must be at least 1".into()).into());
    }
    let tasks = (0..num_tasks)
        .map(|_| VelocityTask {
            velocity: rng.random_range(VEL_RANGE),
        })
        .collect();
    Ok(tasks)
}

/// Diagnostics reported next to the reward on every step.
#[derive(Debug, Clone, Copy)]
pub struct StepInfo {
    /// Signed deviation of the achieved forward velocity from the goal.
    pub run_cost: f64,
    /// Quadratic actuation penalty. Reported with the sign flipped relative
    /// to the reward term; downstream eval tooling expects it that way.
    pub control_cost: f64,
    pub task: VelocityTask,
}

#[derive(Debug)]
pub struct CheetahVelEnv<S: LocomotionSim> {
    sim: S,
    tasks: Vec<VelocityTask>,
    task_idx: usize,
    goal_vel: f64,
}

impl<S: LocomotionSim> CheetahVelEnv<S> {
    /// Benchmark construction: the task pool is drawn from a fresh generator
    /// seeded with [`TASK_SEED`], task 0 starts active.
    pub fn new(sim: S, num_tasks: usize) -> Result<Self> {
        let mut rng = rng::seeded(TASK_SEED);
        let tasks = sample_tasks(&mut rng, num_tasks)?;
        Self::with_tasks(sim, tasks)
    }

    /// Environment over a caller-picked task pool, for harnesses that need
    /// to pin the goal velocities.
    pub fn with_tasks(sim: S, tasks: Vec<VelocityTask>) -> Result<Self> {
        if tasks.is_empty() {
            return Err(EnvError::InvalidArgument("task pool cannot be empty".into()).into());
        }
        debug!(num_tasks = tasks.len(), "built velocity task pool");
        let goal_vel = tasks[0].velocity;
        Ok(Self {
            sim,
            tasks,
            task_idx: 0,
            goal_vel,
        })
    }

    /// The task the rewards are currently scored against.
    pub fn task(&self) -> VelocityTask {
        self.tasks[self.task_idx]
    }

    pub fn goal_vel(&self) -> f64 {
        self.goal_vel
    }
}

impl<S: LocomotionSim> Env for CheetahVelEnv<S> {
    type Tensor = Tensor;
    type Info = StepInfo;

    fn reset(&mut self, seed: u64) -> Result<Tensor> {
        self.sim.reset_pose(seed)?;
        Tensor::from_obs(self.sim.observation()?)
    }

    fn step(&mut self, action: &Tensor) -> Result<SnapShot<Tensor, StepInfo>> {
        let ctrl = action.to_obs()?;
        let pos_before = self.sim.forward_position();
        self.sim.advance(&ctrl, self.sim.frame_skip())?;
        let pos_after = self.sim.forward_position();

        let progress = (pos_after - pos_before) / self.sim.dt();
        let run_cost = progress - self.goal_vel;
        let control_cost = CTRL_COST_WEIGHT * ctrl.iter().map(|a| a * a).sum::<f64>();
        // overshooting the target is as bad as falling short of it
        let reward = -run_cost.abs() - control_cost;

        let state = Tensor::from_obs(self.sim.observation()?)?;
        Ok(SnapShot {
            state,
            reward,
            // the benchmark never ends an episode on its own, the harness
            // decides the horizon
            done: false,
            info: StepInfo {
                run_cost,
                control_cost: -control_cost,
                task: self.task(),
            },
        })
    }

    fn env_description(&self) -> EnvironmentDescription<Tensor> {
        EnvironmentDescription::new(
            Space::continuous_from_dims(vec![self.sim.observation_size()]),
            Space::continuous_from_dims(vec![self.sim.action_size()]),
        )
    }
}

impl<S: LocomotionSim> TaskEnv for CheetahVelEnv<S> {
    type Task = VelocityTask;

    fn tasks(&self) -> &[VelocityTask] {
        &self.tasks
    }

    fn reset_task(&mut self, idx: usize) -> Result<()> {
        if idx >= self.tasks.len() {
            return Err(EnvError::IndexOutOfRange {
                idx,
                len: self.tasks.len(),
            }
            .into());
        }
        self.task_idx = idx;
        self.goal_vel = self.tasks[idx].velocity;
        debug!(idx, goal_vel = self.goal_vel, "switched active task");
        let seed = rng::RNG.with_borrow_mut(|r| r.random::<u64>());
        self.sim.reset_pose(seed)
    }
}

/// Register the benchmark under its fixed tag, building fresh sims through
/// `sim_factory`.
pub fn register_cheetah_vel<S, F>(
    registry: &mut EnvRegistry<CheetahVelEnv<S>>,
    num_tasks: usize,
    sim_factory: F,
) -> Result<()>
where
    S: LocomotionSim + 'static,
    F: Fn() -> Result<S> + Send + Sync + 'static,
{
    registry.register(ENV_TAG, move || CheetahVelEnv::new(sim_factory()?, num_tasks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_pools_are_reproducible() {
        let mut a = rng::seeded(TASK_SEED);
        let mut b = rng::seeded(TASK_SEED);
        let pool_a = sample_tasks(&mut a, 40).unwrap();
        let pool_b = sample_tasks(&mut b, 40).unwrap();
        assert_eq!(pool_a, pool_b);
    }

    #[test]
    fn sampled_velocities_stay_in_range() {
        let mut rng = rng::seeded(TASK_SEED);
        let pool = sample_tasks(&mut rng, 1000).unwrap();
        assert!(pool.iter().all(|t| VEL_RANGE.contains(&t.velocity)));
    }

    #[test]
    fn zero_tasks_is_rejected() {
        let mut rng = rng::seeded(TASK_SEED);
        let err = sample_tasks(&mut rng, 0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<EnvError>(),
            Some(EnvError::InvalidArgument(_))
        ));
    }
}

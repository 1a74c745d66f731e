use crate::{
    env::{Env, SnapShot, TaskEnv},
    error::EnvError,
    rng::RNG,
};
use anyhow::Result;
use rand::Rng;

/// Maps an observation to the action to take. The learning side lives in
/// other crates; harness code mostly passes a closure here.
pub trait Policy {
    type Tensor;

    fn act(&self, observation: &Self::Tensor) -> Result<Self::Tensor>;
}

impl<T, F> Policy for F
where
    F: Fn(&T) -> Result<T>,
{
    type Tensor = T;

    fn act(&self, observation: &T) -> Result<T> {
        (self)(observation)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum RolloutMode {
    EpisodeBound { n_episodes: usize },
    StepBound { n_steps: usize },
}

/// Rewards and per step diagnostics collected by [`run_rollout`].
pub struct RolloutTrace<I> {
    pub rewards: Vec<f64>,
    pub infos: Vec<I>,
}

impl<I> RolloutTrace<I> {
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }
}

fn single_step<E, P>(
    policy: &P,
    env: &mut E,
    state: &E::Tensor,
) -> Result<SnapShot<E::Tensor, E::Info>>
where
    E: Env,
    P: Policy<Tensor = E::Tensor>,
{
    let action = policy.act(state)?;
    env.step(&action)
}

/// Drive `env` with `policy` until the rollout mode is exhausted. Episodes
/// that terminate are restarted with a fresh seed from the thread local RNG.
/// Note that envs that never report `done` make `EpisodeBound` spin forever;
/// step bound collection is the right mode for those.
pub fn run_rollout<E, P>(policy: &P, env: &mut E, mode: RolloutMode) -> Result<RolloutTrace<E::Info>>
where
    E: Env,
    P: Policy<Tensor = E::Tensor>,
{
    let mut trace = RolloutTrace {
        rewards: vec![],
        infos: vec![],
    };
    let seed = RNG.with_borrow_mut(|rng| rng.random::<u64>());
    let mut state = env.reset(seed)?;
    match mode {
        RolloutMode::StepBound { n_steps } => {
            for _ in 0..n_steps {
                let snapshot = single_step(policy, env, &state)?;
                trace.rewards.push(snapshot.reward);
                trace.infos.push(snapshot.info);
                state = if snapshot.done {
                    let seed = RNG.with_borrow_mut(|rng| rng.random::<u64>());
                    env.reset(seed)?
                } else {
                    snapshot.state
                };
            }
        }
        RolloutMode::EpisodeBound { n_episodes } => {
            let mut episodes = 0;
            while episodes < n_episodes {
                let snapshot = single_step(policy, env, &state)?;
                trace.rewards.push(snapshot.reward);
                trace.infos.push(snapshot.info);
                state = if snapshot.done {
                    episodes += 1;
                    let seed = RNG.with_borrow_mut(|rng| rng.random::<u64>());
                    env.reset(seed)?
                } else {
                    snapshot.state
                };
            }
        }
    }
    Ok(trace)
}

/// Mean episode return of one task, keyed by its pool index.
#[derive(Debug, Clone, Copy)]
pub struct TaskEvaluation {
    pub task_idx: usize,
    pub mean_return: f64,
}

/// Sweeps every task of a [`TaskEnv`] and reports the mean return per task.
/// Episodes are step bound since the locomotion benchmarks never terminate
/// on their own.
pub struct TaskEvaluator {
    pub eval_episodes: usize,
    pub eval_steps: usize,
}

impl TaskEvaluator {
    pub fn evaluate<E, P>(&self, env: &mut E, policy: &P) -> Result<Vec<TaskEvaluation>>
    where
        E: TaskEnv,
        P: Policy<Tensor = E::Tensor>,
    {
        if self.eval_episodes == 0 || self.eval_steps == 0 {
            return Err(EnvError::InvalidArgument(
                "eval_episodes and eval_steps must be at least 1".into(),
            )
            .into());
        }
        let mut evaluations = vec![];
        for task_idx in env.get_all_task_idx() {
            env.reset_task(task_idx)?;
            let mut returns = vec![];
            for _ in 0..self.eval_episodes {
                let trace = run_rollout(
                    policy,
                    env,
                    RolloutMode::StepBound {
                        n_steps: self.eval_steps,
                    },
                )?;
                returns.push(trace.total_reward());
            }
            let mean_return = returns.iter().sum::<f64>() / returns.len() as f64;
            evaluations.push(TaskEvaluation {
                task_idx,
                mean_return,
            });
        }
        Ok(evaluations)
    }
}

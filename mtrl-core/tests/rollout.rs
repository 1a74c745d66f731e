use anyhow::Result;
use candle_core::Tensor;
use mtrl_core::{
    env::{Env, EnvironmentDescription, SnapShot, Space},
    rollout::{RolloutMode, run_rollout},
    tensor::MtrlTensor,
};

/// Episode of fixed length, reward 1 per step.
struct FixedEpisodeEnv {
    horizon: usize,
    remaining: usize,
}

impl Env for FixedEpisodeEnv {
    type Tensor = Tensor;
    type Info = usize;

    fn reset(&mut self, _seed: u64) -> Result<Tensor> {
        self.remaining = self.horizon;
        Tensor::from_obs(vec![self.remaining as f64])
    }

    fn step(&mut self, _action: &Tensor) -> Result<SnapShot<Tensor, usize>> {
        self.remaining -= 1;
        Ok(SnapShot {
            state: Tensor::from_obs(vec![self.remaining as f64])?,
            reward: 1.0,
            done: self.remaining == 0,
            info: self.remaining,
        })
    }

    fn env_description(&self) -> EnvironmentDescription<Tensor> {
        EnvironmentDescription::new(
            Space::continuous_from_dims(vec![1]),
            Space::continuous_from_dims(vec![1]),
        )
    }
}

fn echo_policy(state: &Tensor) -> Result<Tensor> {
    Ok(state.clone())
}

#[test]
fn step_bound_collects_exactly_n_steps() -> Result<()> {
    let mut env = FixedEpisodeEnv {
        horizon: 4,
        remaining: 4,
    };
    let trace = run_rollout(&echo_policy, &mut env, RolloutMode::StepBound { n_steps: 10 })?;
    assert_eq!(trace.rewards.len(), 10);
    assert_eq!(trace.infos.len(), 10);
    assert_eq!(trace.total_reward(), 10.0);
    Ok(())
}

#[test]
fn episode_bound_restarts_after_done() -> Result<()> {
    let mut env = FixedEpisodeEnv {
        horizon: 3,
        remaining: 3,
    };
    let trace = run_rollout(
        &echo_policy,
        &mut env,
        RolloutMode::EpisodeBound { n_episodes: 2 },
    )?;
    // two full episodes of three steps each
    assert_eq!(trace.rewards.len(), 6);
    assert_eq!(trace.infos, vec![2, 1, 0, 2, 1, 0]);
    Ok(())
}

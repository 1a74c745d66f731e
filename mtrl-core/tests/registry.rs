use anyhow::Result;
use candle_core::Tensor;
use mtrl_core::{
    env::{Env, EnvironmentDescription, SnapShot, Space},
    error::RegistryError,
    registry::EnvRegistry,
    tensor::MtrlTensor,
};

#[derive(Debug)]
struct CountdownEnv {
    horizon: usize,
    remaining: usize,
}

impl CountdownEnv {
    fn new(horizon: usize) -> Self {
        Self {
            horizon,
            remaining: horizon,
        }
    }
}

impl Env for CountdownEnv {
    type Tensor = Tensor;
    type Info = ();

    fn reset(&mut self, _seed: u64) -> Result<Tensor> {
        self.remaining = self.horizon;
        Tensor::from_obs(vec![self.remaining as f64])
    }

    fn step(&mut self, _action: &Tensor) -> Result<SnapShot<Tensor, ()>> {
        self.remaining -= 1;
        Ok(SnapShot {
            state: Tensor::from_obs(vec![self.remaining as f64])?,
            reward: 1.0,
            done: self.remaining == 0,
            info: (),
        })
    }

    fn env_description(&self) -> EnvironmentDescription<Tensor> {
        EnvironmentDescription::new(
            Space::continuous_from_dims(vec![1]),
            Space::continuous_from_dims(vec![1]),
        )
    }
}

#[test]
fn builds_registered_envs_by_tag() -> Result<()> {
    let mut registry = EnvRegistry::new();
    registry.register("countdown", || Ok(CountdownEnv::new(3)))?;
    let mut env = registry.build("countdown")?;
    let state = env.reset(0)?;
    let snapshot = env.step(&state)?;
    assert_eq!(snapshot.reward, 1.0);
    Ok(())
}

#[test]
fn unknown_tag_is_an_error() {
    let registry: EnvRegistry<CountdownEnv> = EnvRegistry::new();
    let err = registry.build("nope").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::UnknownEnv(_))
    ));
}

#[test]
fn duplicate_registration_is_an_error() -> Result<()> {
    let mut registry = EnvRegistry::new();
    registry.register("countdown", || Ok(CountdownEnv::new(3)))?;
    let err = registry
        .register("countdown", || Ok(CountdownEnv::new(5)))
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RegistryError>(),
        Some(RegistryError::DuplicateEnv(_))
    ));
    Ok(())
}

#[test]
fn tags_are_sorted() -> Result<()> {
    let mut registry = EnvRegistry::new();
    registry.register("walker", || Ok(CountdownEnv::new(3)))?;
    registry.register("countdown", || Ok(CountdownEnv::new(3)))?;
    assert_eq!(registry.tags(), vec!["countdown", "walker"]);
    Ok(())
}

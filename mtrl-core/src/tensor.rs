use anyhow::Result;
use candle_core::{Device, Tensor as CandleTensor};
use std::fmt::Debug;

/// Tensor type that can carry observations and actions across the `Env`
/// boundary. Environments produce observations as plain `f64` vectors and
/// harness code decides which tensor backend to lift them into.
pub trait MtrlTensor: Clone + Send + Sync + Debug + 'static {
    fn from_obs(obs: Vec<f64>) -> Result<Self>;
    fn to_obs(&self) -> Result<Vec<f64>>;
}

impl MtrlTensor for CandleTensor {
    fn from_obs(obs: Vec<f64>) -> Result<Self> {
        let len = obs.len();
        Ok(CandleTensor::from_vec(obs, vec![len], &Device::Cpu)?)
    }

    fn to_obs(&self) -> Result<Vec<f64>> {
        Ok(self.to_vec1::<f64>()?)
    }
}

use crate::tensor::MtrlTensor;
use anyhow::Result;

#[derive(Debug, Clone)]
pub enum Space<T> {
    Discrete(usize),
    Continuous {
        min: Option<T>,
        max: Option<T>,
        size: usize,
    },
}

impl<T> Space<T> {
    pub fn continuous_from_dims(dims: Vec<usize>) -> Self {
        Self::Continuous {
            min: None,
            max: None,
            size: dims.iter().product(),
        }
    }

    pub fn size(&self) -> usize {
        match &self {
            Self::Discrete(size) => *size,
            Self::Continuous { size, .. } => *size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvironmentDescription<T> {
    pub observation_space: Space<T>,
    pub action_space: Space<T>,
}

impl<T> EnvironmentDescription<T> {
    pub fn new(observation_space: Space<T>, action_space: Space<T>) -> Self {
        Self {
            observation_space,
            action_space,
        }
    }

    pub fn action_size(&self) -> usize {
        self.action_space.size()
    }

    pub fn observation_size(&self) -> usize {
        self.observation_space.size()
    }
}

/// What a single `step` hands back: the next observation, the scalar reward,
/// whether the episode ended, and an env specific diagnostics payload.
pub struct SnapShot<T, I> {
    pub state: T,
    pub reward: f64,
    pub done: bool,
    pub info: I,
}

pub trait Env {
    type Tensor: MtrlTensor;
    type Info;

    fn reset(&mut self, seed: u64) -> Result<Self::Tensor>;
    fn step(&mut self, action: &Self::Tensor) -> Result<SnapShot<Self::Tensor, Self::Info>>;
    fn env_description(&self) -> EnvironmentDescription<Self::Tensor>;
}

/// Multi-task extension of [`Env`]. The task pool is fixed at construction;
/// only the active index moves, and only through [`reset_task`].
///
/// [`reset_task`]: TaskEnv::reset_task
pub trait TaskEnv: Env {
    type Task: Clone;

    fn tasks(&self) -> &[Self::Task];

    /// Indices of every task in the pool, ascending. Evaluation harnesses
    /// iterate this to sweep the whole benchmark.
    fn get_all_task_idx(&self) -> Vec<usize> {
        (0..self.tasks().len()).collect()
    }

    /// Switch the active task and reset the underlying episode state. The
    /// next `step` already scores against the new task.
    fn reset_task(&mut self, idx: usize) -> Result<()>;
}

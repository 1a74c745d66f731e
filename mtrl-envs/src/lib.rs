pub mod cheetah_vel;
pub mod locomotion;

pub use cheetah_vel::CheetahVelEnv;
pub use locomotion::LocomotionSim;

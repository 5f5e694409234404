mod action;
mod behavior;
mod wait;

pub use self::{action::WeightedAction, behavior::BehaviorProfile, wait::WaitTime};

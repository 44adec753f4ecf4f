#[allow(non_snake_case)]
pub mod Balancer;
#[allow(non_snake_case)]
pub mod Utils;
pub mod builtins;
pub mod cli;
pub mod settings;

pub use Balancer::balancer_api::{BalanceError, BalancedEquation, EquationBalancer, balance};

pub mod balance;
pub mod estimator;
pub mod fees;
pub mod simulation;

pub use balance::{ensure_funds, required_cost};
pub use estimator::estimate_gas;
pub use fees::current_gas_price;
pub use simulation::{decode_gas_used, estimate_gas_via_simulation, SimulationArgs};

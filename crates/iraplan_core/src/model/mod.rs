mod outputs;
mod results;
mod series;
mod variables;

pub use outputs::{OutputDistributions, OutputKind, OutputSelect};
pub use results::{MeanAndVariance, MonteCarloResult, SimulationResult};
pub use series::InputSeries;
pub use variables::{
    DEFAULT_CONTRIBUTION_RANGE, DEFAULT_INTEREST_RATE_RANGE, DEFAULT_TAX_RATE_RANGE,
    DEFAULT_WITHDRAWAL_RATE_RANGE, InputVariableKind,
};

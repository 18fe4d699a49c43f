pub mod amortisation;

pub use amortisation::{
    plan_warnings, run_simulation, simulate_plan, simulation_months, PeriodEntry,
    SimulationResult,
};

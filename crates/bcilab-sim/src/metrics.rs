use serde::{Deserialize, Serialize};

use crate::SimError;
use crate::advice::{self, Improvement, UseCases};
use crate::modality::{Modality, ModalityProfile};

/// Simulator inputs. `noise` runs from 0 (clean) to 10; `training` is hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub electrodes: u32,
    pub noise: f64,
    pub training: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Metrics {
    /// Percent, clamped to 60..=98.
    pub accuracy: u32,
    /// Milliseconds.
    pub latency: u32,
    /// Dollars, hardware plus surgery.
    pub cost: u64,
    pub invasiveness: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub modality: Modality,
    pub parameters: Parameters,
    pub metrics: Metrics,
    pub cost_tier: &'static str,
    pub best_use_case: &'static str,
    pub use_cases: UseCases,
    pub improvements: Vec<Improvement>,
}

impl Parameters {
    pub fn validate(&self) -> Result<(), SimError> {
        if self.electrodes == 0 {
            return Err(SimError::InvalidParameter {
                name: "electrodes",
                reason: "must be at least 1".into(),
            });
        }
        if !self.noise.is_finite() || !(0.0..=10.0).contains(&self.noise) {
            return Err(SimError::InvalidParameter {
                name: "noise",
                reason: format!("{} is outside 0..=10", self.noise),
            });
        }
        if !self.training.is_finite() || self.training < 0.0 {
            return Err(SimError::InvalidParameter {
                name: "training",
                reason: format!("{} is negative or not a number", self.training),
            });
        }
        Ok(())
    }
}

pub fn accuracy(profile: &ModalityProfile, electrodes: u32, noise: f64, training: f64) -> u32 {
    let electrode_bonus = f64::from(electrodes).ln() * 5.0;
    let noise_penalty = noise * 2.0;
    let training_bonus = (training + 1.0).ln() * 3.0;

    let raw = profile.base_accuracy + electrode_bonus - noise_penalty + training_bonus;
    raw.clamp(60.0, 98.0).round() as u32
}

pub fn latency(profile: &ModalityProfile, electrodes: u32, noise: f64) -> u32 {
    (profile.base_latency + f64::from(electrodes) * 0.1 + noise * 2.0).round() as u32
}

pub fn cost(profile: &ModalityProfile, electrodes: u32, noise: f64) -> u64 {
    let electrode_cost = f64::from(electrodes) * 50.0;
    // Cleaner signal means pricier shielding and filtering.
    let noise_multiplier = 1.0 + (10.0 - noise) * 0.05;
    ((profile.base_cost + electrode_cost) * noise_multiplier + profile.surgery_cost).round() as u64
}

pub fn cost_tier(cost: u64) -> &'static str {
    match cost {
        0..1_000 => "$",
        1_000..5_000 => "$$",
        5_000..20_000 => "$$$",
        20_000..50_000 => "$$$$",
        _ => "$$$$$",
    }
}

pub fn compute(profile: &ModalityProfile, params: &Parameters) -> Metrics {
    Metrics {
        accuracy: accuracy(profile, params.electrodes, params.noise, params.training),
        latency: latency(profile, params.electrodes, params.noise),
        cost: cost(profile, params.electrodes, params.noise),
        invasiveness: profile.invasiveness,
    }
}

/// Full simulator output for one configuration.
pub fn simulate(modality: Modality, params: Parameters) -> Result<SimulationReport, SimError> {
    params.validate()?;

    let profile = modality.profile();
    let metrics = compute(&profile, &params);

    Ok(SimulationReport {
        modality,
        parameters: params,
        metrics,
        cost_tier: cost_tier(metrics.cost),
        best_use_case: advice::best_use_case(modality, metrics.accuracy),
        use_cases: advice::use_cases(modality, metrics.accuracy),
        improvements: advice::improvements(&profile, &params, &metrics),
    })
}

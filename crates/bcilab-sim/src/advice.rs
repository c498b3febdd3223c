use serde::Serialize;

use crate::metrics::{self, Metrics, Parameters};
use crate::modality::{Modality, ModalityProfile};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UseCases {
    pub suitable: Vec<&'static str>,
    pub not_recommended: Vec<&'static str>,
}

/// A single parameter change and what it would buy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    pub title: &'static str,
    pub description: &'static str,
    pub suggested: Parameters,
    pub accuracy_before: u32,
    pub accuracy_after: u32,
    pub cost_before: u64,
    pub cost_after: u64,
}

pub fn use_cases(modality: Modality, accuracy: u32) -> UseCases {
    let mut cases = UseCases::default();

    if accuracy >= 70 {
        cases.suitable.extend([
            "Gaming and entertainment",
            "Neuroscience research",
            "Cognitive workload monitoring",
            "Meditation and neurofeedback",
        ]);
    }
    if accuracy >= 80 {
        cases
            .suitable
            .extend(["Educational demonstrations", "Advanced research prototypes"]);
    }
    if accuracy >= 90 {
        cases
            .suitable
            .extend(["Medical prosthetic control", "Communication systems"]);
    } else {
        cases.not_recommended.extend([
            "Medical prosthetic control (need >90% accuracy)",
            "Critical communication systems",
        ]);
    }

    if modality == Modality::Emg {
        cases
            .not_recommended
            .push("Users with complete paralysis (EMG requires muscle function)");
    }

    cases
}

pub fn best_use_case(modality: Modality, accuracy: u32) -> &'static str {
    match modality {
        Modality::Emg => "Prosthetic limb control and muscle-based interfaces",
        Modality::Fnirs => "Mobile applications and real-world monitoring",
        Modality::Ecog => "High-performance medical BCIs",
        Modality::Eeg if accuracy >= 90 => "Medical applications and critical systems",
        Modality::Eeg if accuracy >= 80 => "Research and advanced applications",
        Modality::Eeg => "Gaming, entertainment, and basic research",
    }
}

pub fn improvements(profile: &ModalityProfile, params: &Parameters, current: &Metrics) -> Vec<Improvement> {
    let mut out = Vec::new();

    let mut suggest = |title, description, suggested: Parameters, cost_changes: bool| {
        let accuracy_after = metrics::accuracy(
            profile,
            suggested.electrodes,
            suggested.noise,
            suggested.training,
        );
        let cost_after = if cost_changes {
            metrics::cost(profile, suggested.electrodes, suggested.noise)
        } else {
            current.cost
        };
        out.push(Improvement {
            title,
            description,
            suggested,
            accuracy_before: current.accuracy,
            accuracy_after,
            cost_before: current.cost,
            cost_after,
        });
    };

    if params.electrodes < 64 {
        suggest(
            "Add More Electrodes",
            "Better spatial resolution and signal quality, but significantly more expensive.",
            Parameters { electrodes: 128, ..*params },
            true,
        );
    }
    if params.noise > 3.0 {
        suggest(
            "Reduce Noise Level",
            "Professional-grade noise filtering equipment provides cleaner signals.",
            Parameters { noise: 2.0, ..*params },
            true,
        );
    }
    if params.training < 50.0 {
        suggest(
            "Extended Training",
            "The system learns your brain patterns better over time, and you get better at controlling it.",
            Parameters { training: 100.0, ..*params },
            false,
        );
    }

    out
}

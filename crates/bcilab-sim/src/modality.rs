use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SimError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    Eeg,
    Emg,
    Ecog,
    Fnirs,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ElectrodeRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
    pub step: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModalityProfile {
    pub key: Modality,
    pub name: &'static str,
    pub full_name: &'static str,
    pub tagline: &'static str,
    pub base_accuracy: f64,
    pub base_latency: f64,
    pub base_cost: f64,
    pub surgery_cost: f64,
    /// 1 (non-invasive) to 5 (brain surgery).
    pub invasiveness: u8,
    pub electrode_range: ElectrodeRange,
    pub description: &'static str,
}

impl Modality {
    pub const ALL: [Modality; 4] = [Modality::Eeg, Modality::Emg, Modality::Ecog, Modality::Fnirs];

    pub fn as_str(self) -> &'static str {
        match self {
            Modality::Eeg => "eeg",
            Modality::Emg => "emg",
            Modality::Ecog => "ecog",
            Modality::Fnirs => "fnirs",
        }
    }

    pub fn profile(self) -> ModalityProfile {
        match self {
            Modality::Eeg => ModalityProfile {
                key: self,
                name: "EEG",
                full_name: "Electroencephalography",
                tagline: "The Safe Standard",
                base_accuracy: 65.0,
                base_latency: 80.0,
                base_cost: 500.0,
                surgery_cost: 0.0,
                invasiveness: 1,
                electrode_range: ElectrodeRange { min: 8, max: 256, default: 32, step: 8 },
                description: "Scalp electrodes pick up the synchronized electrical activity of \
                    large neuron populations. Non-invasive and affordable, but sensitive to \
                    muscle movement, eye blinks and environmental interference.",
            },
            Modality::Emg => ModalityProfile {
                key: self,
                name: "EMG",
                full_name: "Electromyography",
                tagline: "Muscle-Powered Control",
                base_accuracy: 75.0,
                base_latency: 40.0,
                base_cost: 1500.0,
                surgery_cost: 0.0,
                invasiveness: 1,
                electrode_range: ElectrodeRange { min: 4, max: 32, default: 8, step: 4 },
                description: "Reads electrical signals from contracting muscles rather than \
                    the brain. Strong, reliable signals suited to prosthetics, but the user \
                    needs some remaining muscle control.",
            },
            Modality::Ecog => ModalityProfile {
                key: self,
                name: "ECoG",
                full_name: "Electrocorticography",
                tagline: "High Performance, Higher Risk",
                base_accuracy: 85.0,
                base_latency: 20.0,
                base_cost: 10000.0,
                surgery_cost: 50000.0,
                invasiveness: 3,
                electrode_range: ElectrodeRange { min: 32, max: 128, default: 64, step: 8 },
                description: "An electrode grid placed on the brain surface under the skull. \
                    Far cleaner signals than EEG at the price of a craniotomy and its \
                    surgical risks.",
            },
            Modality::Fnirs => ModalityProfile {
                key: self,
                name: "fNIRS",
                full_name: "Functional Near-Infrared Spectroscopy",
                tagline: "The Portable Option",
                base_accuracy: 60.0,
                base_latency: 1500.0,
                base_cost: 8000.0,
                surgery_cost: 0.0,
                invasiveness: 1,
                electrode_range: ElectrodeRange { min: 8, max: 64, default: 16, step: 8 },
                description: "Measures blood-oxygen changes with near-infrared light shone \
                    through the skull. Slow to respond but robust to movement and portable.",
            },
        }
    }

    pub fn catalogue() -> Vec<ModalityProfile> {
        Self::ALL.iter().map(|m| m.profile()).collect()
    }
}

impl FromStr for Modality {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SimError::UnknownModality(s.to_string()))
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

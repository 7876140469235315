// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Random temperature and humidity readings for the simulated house

use chrono::{DateTime, Utc};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Uniform;
use tracing::info;

use crate::config::SensorConfig;
use crate::core::{Command, CommandSender, Scheduler};

/// One generator output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorSample {
    pub temperature: f64,
    pub humidity: f64,
    pub at: DateTime<Utc>,
}

impl From<SensorSample> for Command {
    fn from(sample: SensorSample) -> Self {
        Command::SensorSample {
            temperature: sample.temperature,
            humidity: sample.humidity,
            at: sample.at,
        }
    }
}

/// Uniform generator; independent of the operation mode
pub struct SensorGenerator {
    rng: ChaCha8Rng,
    temperature: Uniform<f64>,
    humidity: Uniform<f64>,
}

impl SensorGenerator {
    /// Ranges must already be validated (min < max)
    pub fn new(config: &SensorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            rng,
            temperature: Uniform::new_inclusive(config.temperature_min, config.temperature_max),
            humidity: Uniform::new_inclusive(config.humidity_min, config.humidity_max),
        }
    }

    pub fn sample(&mut self) -> SensorSample {
        SensorSample {
            temperature: round_one_decimal(self.rng.sample(self.temperature)),
            humidity: round_one_decimal(self.rng.sample(self.humidity)),
            at: Utc::now(),
        }
    }

    /// Post a fresh sample every `config.period_ms`
    pub fn spawn(mut self, scheduler: &Scheduler, sender: CommandSender, config: &SensorConfig) {
        info!(
            "Sensor generator: {}-{}°C, {}-{}% every {:?}",
            config.temperature_min,
            config.temperature_max,
            config.humidity_min,
            config.humidity_max,
            config.period()
        );
        scheduler.spawn_periodic("sensor-generator", config.period(), sender, move || {
            Some(self.sample().into())
        });
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_one_decimal(value: f64) -> bool {
        ((value * 10.0).round() - value * 10.0).abs() < 1e-9
    }

    #[test]
    fn test_samples_stay_in_range() {
        let mut generator = SensorGenerator::new(&SensorConfig::default());

        for _ in 0..10_000 {
            let sample = generator.sample();
            assert!((18.0..=35.0).contains(&sample.temperature), "{}", sample.temperature);
            assert!((30.0..=70.0).contains(&sample.humidity), "{}", sample.humidity);
            assert!(has_one_decimal(sample.temperature));
            assert!(has_one_decimal(sample.humidity));
        }
    }

    #[test]
    fn test_seeded_generators_agree() {
        let config = SensorConfig {
            seed: Some(42),
            ..SensorConfig::default()
        };
        let mut a = SensorGenerator::new(&config);
        let mut b = SensorGenerator::new(&config);

        for _ in 0..20 {
            let (x, y) = (a.sample(), b.sample());
            assert_eq!(x.temperature, y.temperature);
            assert_eq!(x.humidity, y.humidity);
        }
    }

    #[test]
    fn test_round_one_decimal() {
        assert_eq!(round_one_decimal(28.04), 28.0);
        assert_eq!(round_one_decimal(28.05000001), 28.1);
        assert_eq!(round_one_decimal(34.96), 35.0);
    }

    #[test]
    fn test_sample_becomes_command() {
        let sample = SensorSample { temperature: 21.3, humidity: 64.0, at: Utc::now() };
        let command: Command = sample.into();
        assert_eq!(
            command,
            Command::SensorSample { temperature: 21.3, humidity: 64.0, at: sample.at }
        );
    }
}

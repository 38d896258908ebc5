//! Unit tests for configuration defaults and validation

use glam::Vec2;
use sandbox_core::config::{ConfigError, SimulationConfig};
use sandbox_core::timestep::FIXED_STEP;

#[test]
fn test_defaults_are_valid() {
    let config = SimulationConfig::default();
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.fixed_step, FIXED_STEP);
    assert_eq!(config.integrator.gravity, Vec2::ZERO);
}

#[test]
fn test_sandbox_preset_has_gravity() {
    let config = SimulationConfig::sandbox();
    assert_eq!(config.validate(), Ok(()));
    assert!(config.integrator.gravity.y > 0.0);
}

#[test]
fn test_rejects_bad_step() {
    let mut config = SimulationConfig::default();
    config.fixed_step = 0.0;
    assert_eq!(config.validate(), Err(ConfigError::InvalidStep(0.0)));

    config.fixed_step = f32::INFINITY;
    assert!(config.validate().is_err());
}

#[test]
fn test_rejects_negative_distance() {
    let mut config = SimulationConfig::default();
    config.resolver.correction_margin = -1.0;

    assert_eq!(
        config.validate(),
        Err(ConfigError::InvalidDistance {
            name: "correction_margin",
            value: -1.0
        })
    );
}

#[test]
fn test_rejects_inverted_bond_angles() {
    let mut config = SimulationConfig::default();
    config.interaction.bond_angle_tolerance = 1.0;
    config.interaction.bond_max_angle = 0.5;

    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvertedBondAngles { .. })
    ));
}

#[test]
fn test_config_json_round_trip() {
    let config = SimulationConfig::sandbox();
    let json = serde_json::to_string(&config).expect("serializes");
    let parsed: SimulationConfig = serde_json::from_str(&json).expect("parses");

    assert_eq!(parsed.integrator.gravity, config.integrator.gravity);
    assert_eq!(parsed.interaction.fluid_iterations, 10);
}

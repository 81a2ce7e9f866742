//! Station roster and incident catalog.
//!
//! The default station fields seven units across the five unit types; the
//! catalog holds the incident kinds the spawner draws from.

use std::collections::BTreeMap;

use dispatch_core::components::{IncidentTemplate, UnitSpec};
use dispatch_core::config::ConfigError;
use dispatch_core::enums::UnitType;

/// LF-1, LF-2, DLK-1, RW-1, ELW-1, RTW-1, RTW-2.
pub fn default_roster() -> Vec<UnitSpec> {
    [
        ("LF-1", UnitType::Engine),
        ("LF-2", UnitType::Engine),
        ("DLK-1", UnitType::AerialLadder),
        ("RW-1", UnitType::RescueTruck),
        ("ELW-1", UnitType::CommandVehicle),
        ("RTW-1", UnitType::Ambulance),
        ("RTW-2", UnitType::Ambulance),
    ]
    .into_iter()
    .map(|(callsign, unit_type)| UnitSpec {
        callsign: callsign.to_string(),
        unit_type,
    })
    .collect()
}

pub fn default_catalog() -> Vec<IncidentTemplate> {
    use UnitType::*;

    vec![
        template(
            "Residential fire",
            &[(Engine, 2), (AerialLadder, 1), (CommandVehicle, 1)],
        ),
        template(
            "Traffic collision, person trapped",
            &[(Engine, 1), (RescueTruck, 1), (Ambulance, 1), (CommandVehicle, 1)],
        ),
        template("Small kitchen fire", &[(Engine, 1), (Ambulance, 1)]),
        template(
            "Suspected CO exposure",
            &[(Engine, 1), (Ambulance, 1), (CommandVehicle, 1)],
        ),
        template("Water damage", &[(Engine, 1)]),
        template("Fire alarm activation", &[(Engine, 1), (CommandVehicle, 1)]),
    ]
}

fn template(name: &str, requirements: &[(UnitType, u32)]) -> IncidentTemplate {
    IncidentTemplate {
        name: name.to_string(),
        requirements: requirements.iter().copied().collect::<BTreeMap<_, _>>(),
    }
}

pub fn validate_roster(roster: &[UnitSpec]) -> Result<(), ConfigError> {
    if roster.is_empty() {
        return Err(ConfigError::Invalid {
            field: "roster",
            reason: "station has no units".to_string(),
        });
    }
    Ok(())
}

/// Every template needs a name and at least one unit of each listed type.
pub fn validate_catalog(catalog: &[IncidentTemplate]) -> Result<(), ConfigError> {
    if catalog.is_empty() {
        return Err(ConfigError::Invalid {
            field: "catalog",
            reason: "no incident templates".to_string(),
        });
    }
    for template in catalog {
        if template.requirements.is_empty() {
            return Err(ConfigError::Invalid {
                field: "catalog",
                reason: format!("`{}` requires no units", template.name),
            });
        }
        let empty = template.requirements.iter().find(|(_, count)| **count == 0);
        if let Some((unit_type, _)) = empty {
            return Err(ConfigError::Invalid {
                field: "catalog",
                reason: format!("`{}` lists {unit_type} with count 0", template.name),
            });
        }
    }
    Ok(())
}

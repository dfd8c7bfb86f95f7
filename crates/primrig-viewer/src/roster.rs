//! Command-line selectable vehicle kinds.

use std::path::Path;

use primrig::{GroundVehicle, Handling, ImportedVehicle, Rotorcraft, Vehicle, VehicleModel};

/// Vehicle variants that can be requested by name.
#[derive(Default, PartialEq, Eq, Clone, Copy, Debug, clap::ValueEnum)]
pub enum VehicleKind {
    /// Four-wheeled car.
    #[default]
    Ground,
    /// Rotor-lifted VTOL craft.
    Rotor,
    /// Vehicle built from a model file.
    Imported,
}

/// Load the handling file, or use the stock tuning.
pub fn load_handling(path: Option<&Path>) -> primrig::Result<Handling> {
    match path {
        Some(path) => Handling::load(path),
        None => Ok(Handling::default()),
    }
}

/// Build a vehicle of `kind`.
///
/// `model` is only read for [`VehicleKind::Imported`]; without one the
/// imported vehicle starts with no parts.
pub fn build_vehicle(
    kind: VehicleKind,
    model: Option<&VehicleModel>,
    handling: Handling,
) -> primrig::Result<Box<dyn Vehicle>> {
    let vehicle: Box<dyn Vehicle> = match kind {
        VehicleKind::Ground => Box::new(GroundVehicle::with_handling(handling)),
        VehicleKind::Rotor => Box::new(Rotorcraft::with_handling(handling)),
        VehicleKind::Imported => match model {
            Some(model) => Box::new(ImportedVehicle::from_model(model, handling)?),
            None => {
                tracing::warn!("no model given; imported vehicle has no parts");
                Box::new(ImportedVehicle::new(handling))
            }
        },
    };
    Ok(vehicle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builds_each_kind() {
        let model = VehicleModel::capture(&GroundVehicle::new());

        for (kind, name, parts) in [
            (VehicleKind::Ground, "ground", 7),
            (VehicleKind::Rotor, "rotor", 27),
            (VehicleKind::Imported, "imported", 7),
        ] {
            let vehicle = build_vehicle(kind, Some(&model), Handling::default()).unwrap();
            assert_eq!(vehicle.kind(), name);
            assert_eq!(vehicle.shapes().len(), parts);
        }
    }

    #[test]
    fn test_imported_without_model_is_empty() {
        let vehicle = build_vehicle(VehicleKind::Imported, None, Handling::default()).unwrap();
        assert!(vehicle.shapes().is_empty());
    }

    #[test]
    fn test_missing_handling_file_uses_default() {
        assert_eq!(load_handling(None).unwrap(), Handling::default());
    }
}

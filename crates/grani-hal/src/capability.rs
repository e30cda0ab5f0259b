//! Backend classes and their fixed qubit ceilings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HalError, HalResult};

/// Hardware families with known register ceilings.
///
/// The ceiling is a plain lookup, not derived from device introspection.
/// Simulators size their register from the device description instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendClass {
    /// 5-qubit device family.
    Pegasus5,
    /// 16-qubit device family.
    Albatross16,
    /// Simulator, sized to the modeled device.
    Simulator,
}

impl BackendClass {
    /// Qubit ceiling of the class, `None` for simulators.
    pub fn ceiling(self) -> Option<usize> {
        match self {
            BackendClass::Pegasus5 => Some(5),
            BackendClass::Albatross16 => Some(16),
            BackendClass::Simulator => None,
        }
    }

    /// Register size to allocate for a request of `n_qubits` on a device
    /// with `device_qubits` physical qubits.
    ///
    /// Hardware classes always allocate their full fixed register;
    /// simulators allocate the whole modeled device. Requests above the
    /// ceiling fail before anything is submitted.
    pub fn register_size(self, n_qubits: usize, device_qubits: usize) -> HalResult<usize> {
        match self.ceiling() {
            Some(ceiling) if n_qubits > ceiling => Err(HalError::CircuitTooLarge(format!(
                "{n_qubits} qubits requested, {self} holds {ceiling}"
            ))),
            Some(ceiling) => Ok(ceiling),
            None => Ok(device_qubits),
        }
    }
}

impl std::fmt::Display for BackendClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendClass::Pegasus5 => "pegasus5",
            BackendClass::Albatross16 => "albatross16",
            BackendClass::Simulator => "simulator",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendClass {
    type Err = HalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pegasus5" => Ok(BackendClass::Pegasus5),
            "albatross16" => Ok(BackendClass::Albatross16),
            "simulator" => Ok(BackendClass::Simulator),
            other => Err(HalError::Configuration(format!(
                "unknown backend class '{other}'"
            ))),
        }
    }
}

/// Capabilities a backend reports without I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Backend class the device belongs to.
    pub class: BackendClass,
    /// Usable qubits on this concrete device.
    pub num_qubits: usize,
    /// Maximum shots per job.
    pub max_shots: u32,
}

impl Capabilities {
    /// Capabilities for a hardware device of the given class.
    pub fn hardware(class: BackendClass, num_qubits: usize) -> Self {
        Self {
            class,
            num_qubits,
            max_shots: 8192,
        }
    }

    /// Capabilities for a simulator over `num_qubits` modeled qubits.
    pub fn simulator(num_qubits: usize) -> Self {
        Self {
            class: BackendClass::Simulator,
            num_qubits,
            max_shots: u32::MAX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ceilings() {
        assert_eq!(BackendClass::Pegasus5.register_size(3, 20).unwrap(), 5);
        assert_eq!(BackendClass::Pegasus5.register_size(5, 20).unwrap(), 5);
        assert_eq!(BackendClass::Albatross16.register_size(9, 20).unwrap(), 16);
    }

    #[test]
    fn test_ceiling_exceeded() {
        assert!(matches!(
            BackendClass::Pegasus5.register_size(6, 20),
            Err(HalError::CircuitTooLarge(_))
        ));
        assert!(matches!(
            BackendClass::Albatross16.register_size(17, 20),
            Err(HalError::CircuitTooLarge(_))
        ));
    }

    #[test]
    fn test_simulator_uses_device_size() {
        assert_eq!(BackendClass::Simulator.register_size(12, 12).unwrap(), 12);
        assert_eq!(BackendClass::Simulator.register_size(40, 40).unwrap(), 40);
    }

    #[test]
    fn test_class_round_trip() {
        for tag in ["pegasus5", "albatross16", "simulator"] {
            let class: BackendClass = tag.parse().unwrap();
            assert_eq!(class.to_string(), tag);
        }
        assert!("qx9".parse::<BackendClass>().is_err());
    }
}

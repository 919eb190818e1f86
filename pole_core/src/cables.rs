//! Cable Reference Data
//!
//! Nominal mechanical properties for the attachment cable families seen in
//! make-ready work. Values are representative catalog figures for lashed or
//! self-supporting aerial plant; they feed the sag and guying models and are
//! never mutated at runtime.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Attachment cable families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttachmentType {
    /// Generic lashed communication cable on 6.6M strand (default)
    #[serde(rename = "COMM")]
    Communication,
    /// All-dielectric self-supporting fiber
    #[serde(rename = "ADSS")]
    FiberAdss,
    /// CATV coaxial lashed to strand
    #[serde(rename = "COAX")]
    Coax,
    /// Copper telephone, 100-pair
    #[serde(rename = "TEL")]
    CopperTelephone,
    /// Aerial service drop
    #[serde(rename = "DROP")]
    ServiceDrop,
}

impl AttachmentType {
    /// All attachment types for UI selection
    pub const ALL: [AttachmentType; 5] = [
        AttachmentType::Communication,
        AttachmentType::FiberAdss,
        AttachmentType::Coax,
        AttachmentType::CopperTelephone,
        AttachmentType::ServiceDrop,
    ];

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "COMM" | "COMMUNICATION" | "COMMUNICATIONCABLE" => Ok(AttachmentType::Communication),
            "ADSS" | "FIBER" | "FIBEROPTIC" => Ok(AttachmentType::FiberAdss),
            "COAX" | "COAXIAL" | "CATV" => Ok(AttachmentType::Coax),
            "TEL" | "TELEPHONE" | "COPPER" => Ok(AttachmentType::CopperTelephone),
            "DROP" | "SERVICEDROP" => Ok(AttachmentType::ServiceDrop),
            _ => Err(CalcError::cable_not_found(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AttachmentType::Communication => "Communication Cable (lashed, 6.6M strand)",
            AttachmentType::FiberAdss => "Fiber Optic (ADSS)",
            AttachmentType::Coax => "Coaxial (lashed, 6.6M strand)",
            AttachmentType::CopperTelephone => "Copper Telephone (100-pair)",
            AttachmentType::ServiceDrop => "Service Drop",
        }
    }

    /// Get the cable specification for this attachment type
    pub fn spec(&self) -> CableSpec {
        CableSpec::lookup(*self)
    }
}

impl Default for AttachmentType {
    fn default() -> Self {
        AttachmentType::Communication
    }
}

impl std::fmt::Display for AttachmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Mechanical properties of an attachment cable.
///
/// Weights include the supporting strand for lashed constructions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSpec {
    /// Display label (e.g., "Fiber Optic (ADSS)")
    pub label: String,
    /// Unit weight in pounds per linear foot
    pub unit_weight_lb_per_ft: f64,
    /// Rated (breaking) tension in pounds
    pub rated_tension_lb: f64,
    /// Outside diameter in inches
    pub diameter_in: f64,
}

impl CableSpec {
    /// Look up the reference spec for an attachment type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pole_core::cables::{AttachmentType, CableSpec};
    ///
    /// let spec = CableSpec::lookup(AttachmentType::FiberAdss);
    /// assert!(spec.unit_weight_lb_per_ft > 0.0);
    /// assert!(spec.rated_tension_lb > 0.0);
    /// ```
    pub fn lookup(attachment: AttachmentType) -> CableSpec {
        match attachment {
            AttachmentType::Communication => CableSpec {
                label: "Communication Cable (lashed, 6.6M strand)".to_string(),
                unit_weight_lb_per_ft: 0.45,
                rated_tension_lb: 6650.0,
                diameter_in: 1.0,
            },
            AttachmentType::FiberAdss => CableSpec {
                label: "Fiber Optic (ADSS)".to_string(),
                unit_weight_lb_per_ft: 0.15,
                rated_tension_lb: 1800.0,
                diameter_in: 0.65,
            },
            AttachmentType::Coax => CableSpec {
                label: "Coaxial (lashed, 6.6M strand)".to_string(),
                unit_weight_lb_per_ft: 0.38,
                rated_tension_lb: 6650.0,
                diameter_in: 0.9,
            },
            AttachmentType::CopperTelephone => CableSpec {
                label: "Copper Telephone (100-pair)".to_string(),
                unit_weight_lb_per_ft: 0.85,
                rated_tension_lb: 6000.0,
                diameter_in: 1.3,
            },
            AttachmentType::ServiceDrop => CableSpec {
                label: "Service Drop".to_string(),
                unit_weight_lb_per_ft: 0.09,
                rated_tension_lb: 1200.0,
                diameter_in: 0.5,
            },
        }
    }

    /// Working tension used for sag: rated tension with a safety factor of 2
    pub fn working_tension_lb(&self) -> f64 {
        self.rated_tension_lb / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_all_types() {
        for attachment in AttachmentType::ALL {
            let spec = CableSpec::lookup(attachment);
            assert!(spec.unit_weight_lb_per_ft > 0.0);
            assert!(spec.rated_tension_lb > 0.0);
            assert!(spec.diameter_in > 0.0);
            assert!(!spec.label.is_empty());
        }
    }

    #[test]
    fn test_type_parsing() {
        assert_eq!(
            AttachmentType::from_str_flexible("fiber optic").unwrap(),
            AttachmentType::FiberAdss
        );
        assert_eq!(
            AttachmentType::from_str_flexible("COAX").unwrap(),
            AttachmentType::Coax
        );
        assert!(AttachmentType::from_str_flexible("barbed wire").is_err());
    }

    #[test]
    fn test_default_is_communication() {
        assert_eq!(AttachmentType::default(), AttachmentType::Communication);
    }

    #[test]
    fn test_working_tension() {
        let spec = CableSpec::lookup(AttachmentType::FiberAdss);
        assert_eq!(spec.working_tension_lb(), 900.0);
    }

    #[test]
    fn test_serialization() {
        let attachment = AttachmentType::FiberAdss;
        let json = serde_json::to_string(&attachment).unwrap();
        assert_eq!(json, "\"ADSS\"");
        let roundtrip: AttachmentType = serde_json::from_str(&json).unwrap();
        assert_eq!(attachment, roundtrip);
    }
}

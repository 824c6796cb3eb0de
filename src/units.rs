/// Scaling factor between kg/g and L/ml.
pub const SCALE_FACTOR: f64 = 1000.0;

/// Coarse unit families used by the low-stock thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitFamily {
    /// kg, L
    Bulk,
    /// g, ml
    Fine,
    /// pcs
    Count,
    Other,
}

impl UnitFamily {
    pub fn of(unit: &str) -> Self {
        match unit.trim().to_lowercase().as_str() {
            "kg" | "l" => UnitFamily::Bulk,
            "g" | "ml" => UnitFamily::Fine,
            "pcs" => UnitFamily::Count,
            _ => UnitFamily::Other,
        }
    }
}

/// Converts a quantity to its base unit: kg -> g and L -> ml scale by 1000,
/// anything else passes through lower-cased. Units from different families
/// (e.g. pcs and g) are not reconciled.
pub fn to_base_unit(quantity: f64, unit: &str) -> (f64, String) {
    let unit = unit.trim().to_lowercase();
    match unit.as_str() {
        "kg" => (quantity * SCALE_FACTOR, "g".to_string()),
        "l" => (quantity * SCALE_FACTOR, "ml".to_string()),
        _ => (quantity, unit),
    }
}

/// Human-readable quantity, e.g. 1500 g -> "1.50 kg".
pub fn format_quantity(quantity: f64, unit: &str) -> String {
    match unit.trim().to_lowercase().as_str() {
        "g" if quantity >= SCALE_FACTOR => format!("{:.2} kg", quantity / SCALE_FACTOR),
        "ml" if quantity >= SCALE_FACTOR => format!("{:.2} L", quantity / SCALE_FACTOR),
        "pcs" => format!("{} pcs", quantity.trunc() as i64),
        _ => format!("{:.2} {}", quantity, unit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_base_unit_scales_mass_and_volume() {
        assert_eq!(to_base_unit(0.5, "kg"), (500.0, "g".to_string()));
        assert_eq!(to_base_unit(2.0, "L"), (2000.0, "ml".to_string()));
        assert_eq!(to_base_unit(250.0, "g"), (250.0, "g".to_string()));
    }

    #[test]
    fn test_to_base_unit_leaves_counts_alone() {
        // No conversion across families: pieces stay pieces.
        assert_eq!(to_base_unit(3.0, "pcs"), (3.0, "pcs".to_string()));
        assert_eq!(to_base_unit(1.0, "Bunch"), (1.0, "bunch".to_string()));
    }

    #[test]
    fn test_unit_family() {
        assert_eq!(UnitFamily::of("kg"), UnitFamily::Bulk);
        assert_eq!(UnitFamily::of("L"), UnitFamily::Bulk);
        assert_eq!(UnitFamily::of("ml"), UnitFamily::Fine);
        assert_eq!(UnitFamily::of("pcs"), UnitFamily::Count);
        assert_eq!(UnitFamily::of("cup"), UnitFamily::Other);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1500.0, "g"), "1.50 kg");
        assert_eq!(format_quantity(2500.0, "ml"), "2.50 L");
        assert_eq!(format_quantity(999.0, "g"), "999.00 g");
        assert_eq!(format_quantity(3.7, "pcs"), "3 pcs");
        assert_eq!(format_quantity(0.35, "kg"), "0.35 kg");
    }
}

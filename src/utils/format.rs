pub const CRORE: f64 = 10_000_000.0;
pub const LAKH: f64 = 100_000.0;

/// Formats an amount in Indian notation: crores, lakhs, then thousands.
pub fn format_currency(amount: f64, currency: &str, suffix: &str) -> String {
    if amount >= CRORE {
        format!("{currency}{:.1} Cr{suffix}", amount / CRORE)
    } else if amount >= LAKH {
        format!("{currency}{:.1} L{suffix}", amount / LAKH)
    } else if amount >= 1_000.0 {
        format!("{currency}{:.1}K{suffix}", amount / 1_000.0)
    } else {
        format!("{currency}{amount}{suffix}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_largest_unit() {
        assert_eq!(format_currency(25_000_000.0, "₹", ""), "₹2.5 Cr");
        assert_eq!(format_currency(350_000.0, "₹", "/yr"), "₹3.5 L/yr");
        assert_eq!(format_currency(4_200.0, "$", ""), "$4.2K");
        assert_eq!(format_currency(999.0, "₹", ""), "₹999");
    }

    #[test]
    fn unit_boundaries_are_inclusive() {
        assert_eq!(format_currency(CRORE, "₹", ""), "₹1.0 Cr");
        assert_eq!(format_currency(LAKH, "₹", ""), "₹1.0 L");
        assert_eq!(format_currency(1_000.0, "₹", ""), "₹1.0K");
    }
}

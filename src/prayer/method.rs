//! Country to calculation-method mapping.

use crate::types::CalculationMethod;

/// Static mapping from ISO country code to calculation method id.
const COUNTRY_METHODS: &[(&str, u8)] = &[
    ("TR", 13),
    ("RU", 16),
    ("SA", 4),
    ("AE", 4),
    ("QA", 4),
    ("KW", 4),
    ("BH", 4),
    ("EG", 5),
    ("SY", 7),
    ("IQ", 9),
    ("MY", 11),
    ("SG", 11),
    ("ID", 12),
    ("PK", 1),
    ("IN", 1),
    ("BD", 1),
    ("AF", 1),
    ("IR", 8),
    ("MA", 14),
    ("TN", 14),
    ("DZ", 14),
    // Western countries share the generic convention.
    ("FR", 3),
    ("DE", 3),
    ("GB", 3),
    ("US", 3),
    ("CA", 3),
    ("AU", 3),
];

/// Returns the calculation method for a country code.
///
/// Unknown or absent codes map to [`CalculationMethod::DEFAULT`].
///
/// ```
/// use iftar::prayer::method_for_country;
/// use iftar::types::CalculationMethod;
///
/// assert_eq!(method_for_country(Some("TR")), CalculationMethod(13));
/// assert_eq!(method_for_country(None), CalculationMethod::DEFAULT);
/// ```
#[must_use]
pub fn method_for_country(country_code: Option<&str>) -> CalculationMethod {
    country_code
        .and_then(|code| {
            COUNTRY_METHODS
                .iter()
                .find(|(country, _)| country.eq_ignore_ascii_case(code.trim()))
        })
        .map(|&(_, id)| CalculationMethod(id))
        .unwrap_or(CalculationMethod::DEFAULT)
}

/// Returns every mapped country with its method, in table order.
pub fn country_methods() -> impl Iterator<Item = (&'static str, CalculationMethod)> {
    COUNTRY_METHODS
        .iter()
        .map(|&(country, id)| (country, CalculationMethod(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_table_entry_is_returned() {
        for (country, method) in country_methods() {
            assert_eq!(method_for_country(Some(country)), method, "{country}");
        }
    }

    #[test]
    fn test_known_countries() {
        assert_eq!(method_for_country(Some("TR")), CalculationMethod(13));
        assert_eq!(method_for_country(Some("RU")), CalculationMethod(16));
        assert_eq!(method_for_country(Some("SA")), CalculationMethod(4));
        assert_eq!(method_for_country(Some("EG")), CalculationMethod(5));
        assert_eq!(method_for_country(Some("PK")), CalculationMethod(1));
        assert_eq!(method_for_country(Some("MA")), CalculationMethod(14));
    }

    #[test]
    fn test_absent_country_uses_default() {
        assert_eq!(method_for_country(None), CalculationMethod::DEFAULT);
    }

    #[test]
    fn test_unmapped_country_uses_default() {
        assert_eq!(method_for_country(Some("JP")), CalculationMethod::DEFAULT);
        assert_eq!(method_for_country(Some("")), CalculationMethod::DEFAULT);
        assert_eq!(method_for_country(Some("XYZ")), CalculationMethod::DEFAULT);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(method_for_country(Some("tr")), CalculationMethod(13));
        assert_eq!(method_for_country(Some(" my ")), CalculationMethod(11));
    }

    #[test]
    fn test_table_size() {
        assert_eq!(country_methods().count(), 27);
    }
}

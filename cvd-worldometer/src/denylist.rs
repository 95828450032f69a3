/// Territories the choropleth map has no shape for. Their rows are removed
/// from the prepared dataset entirely.
pub const EXCLUDED_TERRITORIES: [&str; 27] = [
    "French Guiana",
    "Reunion",
    "Guadeloupe",
    "Martinique",
    "Mayotte",
    "Saint Barthelemy",
    "Saint Martin",
    "Saint Pierre And Miquelon",
    "French Polynesia",
    "Anguilla",
    "British Virgin Islands",
    "Cayman Islands",
    "Channel Islands",
    "Montserrat",
    "Turks And Caicos Islands",
    "Aruba",
    "Caribbean Netherlands",
    "Curacao",
    "Sint Maarten",
    "US Virgin Islands",
    "China Hong Kong Sar",
    "China Macao Sar",
    "Cook Islands",
    "Faeroe Islands",
    "San Marino",
    "Liechtenstein",
    "Grenada",
];

/// Check if a country is on the exclusion list (exact, case-sensitive match)
pub fn is_excluded(country: &str) -> bool {
    EXCLUDED_TERRITORIES.contains(&country)
}

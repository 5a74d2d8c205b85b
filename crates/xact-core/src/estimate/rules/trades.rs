//! Trade classification of line item descriptions.
//!
//! Categories share keywords ("shower" is listed under both "Shower" and
//! "Showers, Tubs, Tile"), so the table is an ordered list and the first
//! category with any hit wins.

/// Category assigned when no keyword matches.
pub const OTHER: &str = "Other";

/// Ordered (category, lowercase keywords) table.
pub const TRADE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Floor Protection",
        &["floor protection", "cardboard", "protect floor", "mask floor"],
    ),
    ("Insulation", &["insulation", "batt", "fiberglass", "blown-in"]),
    (
        "Drywall",
        &[
            "drywall",
            "sheetrock",
            "tape joint",
            "texture",
            "patch",
            "mud",
            "repair wall",
            "joint compound",
            "corner bead",
        ],
    ),
    (
        "Painting",
        &[
            "paint",
            "painting",
            "primer",
            "prime",
            "seal",
            "coating",
            "enamel",
            "mask wall",
            "caulk",
            "caulking",
            "mirror",
            "towel bar",
            "toilet paper",
            "tp holder",
        ],
    ),
    (
        "Baseboards, Trim, Casing",
        &[
            "baseboard",
            "trim",
            "casing",
            "moulding",
            "crown",
            "shoe mould",
            "quarter round",
        ],
    ),
    ("Doors", &["door", "door stop", "interior door", "slab"]),
    (
        "Shower",
        &["shower", "shower pan", "shower door", "shower surround"],
    ),
    ("Laminate", &["laminate", "pergo", "engineered wood"]),
    ("Vinyl Flooring", &["vinyl floor", "vinyl sheet"]),
    (
        "Tile Flooring",
        &[
            "tile floor",
            "ceramic tile",
            "porcelain tile",
            "grout",
            "thinset",
            "cement board",
            "clean floor and prep",
        ],
    ),
    (
        "Carpet",
        &["carpet", "carpeting", "pad", "broadloom", "tack stip"],
    ),
    ("HVAC", &["hvac", "register", "ventilation"]),
    (
        "Content Manipulation",
        &[
            "content manipulation",
            "move contents",
            "protect contents",
            "cover contents",
            "contents",
        ],
    ),
    (
        "Cleaning",
        &[
            "clean",
            "cleaning",
            "final clean",
            "clean up",
            "final cleanup",
            "final cleaning",
            "construction clean",
        ],
    ),
    (
        "Debris Removal",
        &[
            "debris removal",
            "dump",
            "haul debris",
            "remove debris",
            "trash out",
        ],
    ),
    (
        "Cabinets",
        &["cabinet", "vanity", "base cabinet", "wall cabinet", "countertop"],
    ),
    (
        "Electrical",
        &[
            "electrical",
            "outlet",
            "switch",
            "receptacle",
            "breaker",
            "light fixture",
            "light",
            "ceiling fan",
        ],
    ),
    (
        "Showers, Tubs, Tile",
        &[
            "tub",
            "bathtub",
            "shower",
            "tile",
            "surround",
            "enclosure",
            "shower pan",
            "shower door",
            "shower surround",
        ],
    ),
    (
        "Plumbing, Toilets, Sinks",
        &[
            "plumbing",
            "toilet",
            "sink",
            "faucet",
            "supply line",
            "angle stop",
            "drain",
            "p-trap",
        ],
    ),
    ("Labor Minimums", &["labor minimum"]),
    ("Mitigation", &["water extraction", "remediation", "mitigation"]),
];

/// Assign a trade category to a description.
///
/// Case-insensitive substring match against [`TRADE_KEYWORDS`] in table
/// order; returns [`OTHER`] when nothing matches.
pub fn classify(description: &str) -> &'static str {
    let desc = description.to_lowercase();

    TRADE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| desc.contains(keyword)))
        .map(|(trade, _)| *trade)
        .unwrap_or(OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> impl Iterator<Item = &'static str> {
        TRADE_KEYWORDS
            .iter()
            .map(|(trade, _)| *trade)
            .chain(std::iter::once(OTHER))
    }

    #[test]
    fn test_exclusive_keywords() {
        assert_eq!(classify("1. Remove laminate flooring"), "Laminate");
        assert_eq!(classify("4. Remove & replace carpet"), "Carpet");
        assert_eq!(classify("9. Drywall patch / small repair"), "Drywall");
        assert_eq!(classify("22. Tandem axle dump trailer"), "Debris Removal");
        assert_eq!(classify("31. Water extraction from floor"), "Mitigation");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("3. R&R VANITY"), "Cabinets");
        assert_eq!(classify("3. r&r Vanity"), "Cabinets");
    }

    #[test]
    fn test_no_keyword_is_other() {
        assert_eq!(classify("52. R&R Vinyl window"), OTHER);
        assert_eq!(classify(""), OTHER);
    }

    #[test]
    fn test_first_category_wins_on_overlap() {
        // "shower" is listed under both; "Shower" comes first.
        assert_eq!(classify("shower"), "Shower");
        assert_eq!(classify("7. Shower"), "Shower");
        // "tub" only appears in the later category.
        assert_eq!(classify("8. Bathtub"), "Showers, Tubs, Tile");
    }

    #[test]
    fn test_earlier_generic_keyword_beats_later_specific_one() {
        // "seal" (Painting) precedes "baseboard" (Baseboards, Trim, Casing).
        assert_eq!(classify("12. Seal & paint baseboard"), "Painting");
        // "tile floor" is more specific, but "clean" is never reached first
        // because Tile Flooring comes before Cleaning.
        assert_eq!(classify("5. Clean floor and prep for tile"), "Tile Flooring");
    }

    #[test]
    fn test_deterministic() {
        let desc = "17. Light fixture - Detach & reset";
        assert_eq!(classify(desc), classify(desc));
        assert_eq!(classify(desc), "Electrical");
    }

    #[test]
    fn test_categories_order() {
        let all: Vec<_> = categories().collect();
        assert_eq!(all.first(), Some(&"Floor Protection"));
        assert_eq!(all.last(), Some(&OTHER));
        assert_eq!(all.len(), TRADE_KEYWORDS.len() + 1);
    }
}

//! Country identity resolution across source vocabularies.
//!
//! The epidemiological feed (OWID) and the demographic feed (World Bank)
//! spell a handful of countries differently. The crosswalk below maps the
//! OWID spelling to the World Bank spelling, which is the canonical join
//! key everywhere in this crate. It is a closed lookup table: names it does
//! not know pass through unchanged, and an unmapped mismatch surfaces later
//! as a missing population, not as an error here.

use std::collections::HashMap;
use std::sync::LazyLock;

static OWID_TO_WB: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("Bahamas", "Bahamas, The"),
        ("Cape Verde", "Cabo Verde"),
        ("Congo", "Congo, Rep."),
        ("Democratic Republic of Congo", "Congo, Dem. Rep."),
        ("East Timor", "Timor-Leste"),
        ("Egypt", "Egypt, Arab Rep."),
        ("Gambia", "Gambia, The"),
        ("Iran", "Iran, Islamic Rep."),
        ("Kyrgyzstan", "Kyrgyz Republic"),
        ("Laos", "Lao PDR"),
        ("Micronesia (country)", "Micronesia, Fed. Sts."),
        ("North Korea", "Korea, Dem. People's Rep."),
        ("South Korea", "Korea, Rep."),
        ("Palestine", "West Bank and Gaza"),
        ("Russia", "Russian Federation"),
        ("Slovakia", "Slovak Republic"),
        ("Syria", "Syrian Arab Republic"),
        ("Turkey", "Turkiye"),
        ("Venezuela", "Venezuela, RB"),
        ("Vietnam", "Viet Nam"),
        ("Yemen", "Yemen, Rep."),
    ])
});

/// Maps a raw country label to its canonical spelling. Identity for names
/// outside the crosswalk.
pub fn resolve(name: &str) -> &str {
    OWID_TO_WB.get(name).copied().unwrap_or(name)
}

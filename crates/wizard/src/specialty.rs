//! Specialty catalog.
//!
//! The form offers these names; the wizard accepts any non-blank name but
//! only the village-only ones below affect the community type.

/// Specialties offered on the specialties step.
pub const SPECIALTIES: &[&str] = &[
    "Agriculture",
    "Animal husbandry",
    "Basketry",
    "Beekeeping",
    "Brewing",
    "Carpentry",
    "Fishing",
    "Foraging",
    "Herbalism",
    "Hunting",
    "Metalworking",
    "Music",
    "Pottery",
    "Salvage",
    "Seafaring",
    "Storytelling",
    "Textiles",
    "Trade",
];

/// Specialties that only a settled village can sustain.
pub const VILLAGE_SPECIALTIES: &[&str] =
    &["Agriculture", "Animal husbandry", "Beekeeping", "Pottery"];

/// Case-insensitive membership in [`VILLAGE_SPECIALTIES`].
pub fn is_village_specialty(name: &str) -> bool {
    let name = name.trim();
    VILLAGE_SPECIALTIES
        .iter()
        .any(|village| village.eq_ignore_ascii_case(name))
}

/// Whether a set of chosen specialties makes the community a village.
pub fn is_village<S: AsRef<str>>(specialties: &[S]) -> bool {
    specialties.iter().any(|s| is_village_specialty(s.as_ref()))
}

/// Trim names, drop blanks, and collapse case-insensitive duplicates,
/// keeping the first spelling.
pub fn clean_selection<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(raw.len());
    for name in raw {
        let name = name.as_ref().trim();
        if name.is_empty() || seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            continue;
        }
        seen.push(name.to_string());
    }
    seen
}

//! Gendered pronoun and honorific replacement table

/// Lowercase key and its neutral replacement. Honorifics map to `""` and
/// are deleted outright.
pub const GENDER_PRONOUNS: &[(&str, &str)] = &[
    ("he", "HE/SHE"),
    ("him", "HIM/HER"),
    ("his", "HIS/HER"),
    ("himself", "HIMSELF/HERSELF"),
    ("she", "HE/SHE"),
    ("her", "HIM/HER"),
    ("hers", "HIS/HERS"),
    ("herself", "HIMSELF/HERSELF"),
    ("mr.", ""),
    ("mrs.", ""),
    ("ms.", ""),
];

/// Replacement for `text`, matched case-insensitively
pub fn replacement_for(text: &str) -> Option<&'static str> {
    let key = text.to_lowercase();
    GENDER_PRONOUNS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Whether `text` belongs to the replacement vocabulary
pub fn is_gendered(text: &str) -> bool {
    replacement_for(text).is_some()
}

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Folder key used when a profile's folder path is first created:
/// whitespace removed, everything else (including case and accents) preserved.
///
/// Once persisted on a profile, the folder path is never re-derived, even if
/// the name changes later.
pub fn folder_key(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Strict folder key used by the gallery fallback when no image records
/// exist: NFD-decompose, drop combining marks, then drop anything that is not
/// ASCII alphanumeric. `"Fabio Lévy"` becomes `"FabioLevy"`.
pub fn strict_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

/// Whether a profile name corresponds to a bucket folder name. Whitespace in
/// the profile name is ignored and the comparison is case-insensitive, so
/// `"Fabio Levy"` matches a folder named `"fabiolevy"`.
pub fn matches_folder(profile_name: &str, folder_name: &str) -> bool {
    folder_key(profile_name).to_lowercase() == folder_name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_key_strips_all_whitespace() {
        assert_eq!(folder_key("Fabio Levy"), "FabioLevy");
        assert_eq!(folder_key("  Ana \t Ruiz \n"), "AnaRuiz");
        assert_eq!(folder_key("NoSpaces"), "NoSpaces");
    }

    #[test]
    fn folder_key_preserves_accents_and_case() {
        assert_eq!(folder_key("José Pérez"), "JoséPérez");
    }

    #[test]
    fn strict_key_strips_diacritics_and_punctuation() {
        assert_eq!(strict_key("José Pérez"), "JosePerez");
        assert_eq!(strict_key("Ana-María O'Neil"), "AnaMariaONeil");
        assert_eq!(strict_key("Fabio Levy"), "FabioLevy");
    }

    #[test]
    fn matching_is_case_and_whitespace_insensitive() {
        assert!(matches_folder("Fabio Levy", "fabiolevy"));
        assert!(matches_folder("Fabio Levy", "FABIOLEVY"));
        assert!(!matches_folder("Fabio Levy", "fabiolevi"));
    }
}

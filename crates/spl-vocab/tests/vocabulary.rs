use std::fs;
use std::path::{Path, PathBuf};

use spl_vocab::{VocabError, Vocabulary, embedded_vocabulary};

fn unique_temp_dir(name: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    dir.push(format!(
        "spl-vocab-{}-{}-{}",
        name,
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
}

// --- embedded table tests ---

#[test]
fn embedded_tables_parse() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    assert!(vocabulary.is_federal("USA"));
    assert!(vocabulary.is_federal(" usa "));
    assert!(!vocabulary.is_federal("US-MD"));
    assert!(vocabulary.territory("US-MD").is_some());
    assert!(vocabulary.territory("XX-ZZ").is_none());
    let counts = vocabulary.summary();
    assert!(counts.iter().all(|(_, count)| *count > 0));
}

#[test]
fn foreign_countries_are_recognized_but_not_federal() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    for code in ["CAN", "DEU", "jpn", "GBR"] {
        let territory = vocabulary.territory(code).expect("country code");
        assert!(!territory.federal, "{code} should not be federal");
        assert!(!vocabulary.is_federal(code));
    }
    assert_eq!(
        vocabulary.territory("DEU").map(|territory| territory.name.as_str()),
        Some("Germany")
    );
    let federal: Vec<&str> = vocabulary
        .territories()
        .filter(|territory| territory.federal)
        .map(|territory| territory.code.as_str())
        .collect();
    assert_eq!(federal, vec!["USA"]);
}

#[test]
fn embedded_vocabulary_is_shared() {
    let first = embedded_vocabulary().expect("embedded vocabulary");
    let second = embedded_vocabulary().expect("embedded vocabulary");
    assert!(std::ptr::eq(first, second));
}

#[test]
fn dea_triple_is_recognized() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    assert!(vocabulary.recognizes_agency("USA", "004234709", "1.3.6.1.4.1.519.1", "DEA"));
    assert!(vocabulary.recognizes_agency("usa", " 004234709", "1.3.6.1.4.1.519.1", "dea"));
    assert!(!vocabulary.recognizes_agency("USA", "000000000", "1.3.6.1.4.1.519.1", "DEA"));
    assert!(!vocabulary.recognizes_agency("US-MD", "004234709", "1.3.6.1.4.1.519.1", "DEA"));
    assert!(vocabulary.agency_named("USA", "FBI").is_none());
}

#[test]
fn ucum_units_accept_ratios_and_annotations() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    assert!(vocabulary.is_ucum_unit("mg"));
    assert!(vocabulary.is_ucum_unit("1"));
    assert!(vocabulary.is_ucum_unit("mg/mL"));
    assert!(vocabulary.is_ucum_unit("mg/{tbl}"));
    assert!(vocabulary.is_ucum_unit("{tablet}"));
    assert!(vocabulary.is_ucum_unit("mg/100.mL"));
    assert!(!vocabulary.is_ucum_unit("MG"));
    assert!(!vocabulary.is_ucum_unit("tablets"));
    assert!(!vocabulary.is_ucum_unit(""));
    assert!(!vocabulary.is_ucum_unit("mg/"));
}

#[test]
fn disciplinary_actions_constrain_license_status() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    let reinstatement = vocabulary
        .disciplinary_action("reinstatement")
        .expect("reinstatement");
    assert!(reinstatement.permits("suspended"));
    assert!(!reinstatement.permits("active"));

    let revocation = vocabulary.disciplinary_action("REVOCATION").expect("revocation");
    assert!(revocation.permits("Active"));
    assert!(revocation.permits("suspended"));
    assert!(!revocation.permits("aborted"));

    let other = vocabulary.disciplinary_action("OTHER").expect("other");
    assert!(other.permits("completed"));
    assert!(other.requires_text);
}

#[test]
fn media_types_match_extensions() {
    let vocabulary = embedded_vocabulary().expect("embedded vocabulary");
    let jpeg = vocabulary.media_type("IMAGE/JPEG").expect("jpeg");
    assert!(jpeg.matches_file("figure1.JPG"));
    assert!(!jpeg.matches_file("figure1.png"));
    assert!(!jpeg.matches_file("figure1"));
    assert!(vocabulary.media_type("video/mp4").is_none());
}

// --- directory override tests ---

#[test]
fn directory_tables_replace_embedded_ones() {
    let dir = unique_temp_dir("override");
    write(
        &dir.join("ucum_units.csv"),
        "Unit,Description\nmg,milligram\nmL,milliliter\n",
    );
    let vocabulary = Vocabulary::from_dir(&dir).expect("vocabulary");
    assert!(vocabulary.is_ucum_unit("mg/mL"));
    assert!(!vocabulary.is_ucum_unit("kg"));
    assert!(vocabulary.is_federal("USA"));
    assert_eq!(vocabulary.overrides(), &[dir.join("ucum_units.csv")]);
}

#[test]
fn explicit_dir_wins_over_embedded() {
    let dir = unique_temp_dir("explicit");
    write(
        &dir.join("territories.csv"),
        "Code,Name,Federal\nCAN,Canada,Y\n",
    );
    let vocabulary = Vocabulary::load(Some(&dir)).expect("vocabulary");
    assert!(vocabulary.is_federal("CAN"));
    assert!(vocabulary.territory("USA").is_none());
}

#[test]
fn duplicate_entries_are_rejected() {
    let dir = unique_temp_dir("duplicate");
    write(
        &dir.join("territories.csv"),
        "Code,Name,Federal\nUSA,United States,Y\nusa,Again,Y\n",
    );
    let err = Vocabulary::from_dir(&dir).unwrap_err();
    assert!(matches!(err, VocabError::Duplicate { ref key, .. } if key == "USA"));
}

#[test]
fn invalid_flag_is_rejected() {
    let dir = unique_temp_dir("flag");
    write(
        &dir.join("territories.csv"),
        "Code,Name,Federal\nUSA,United States,maybe\n",
    );
    let err = Vocabulary::from_dir(&dir).unwrap_err();
    assert!(matches!(
        err,
        VocabError::InvalidValue {
            column: "Federal",
            ..
        }
    ));
}

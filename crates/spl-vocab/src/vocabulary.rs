//! Vocabulary lookups.
//!
//! A [`Vocabulary`] is built once and never mutated. Lookups that compare
//! codes ignore case; UCUM units are case-sensitive and compared exactly.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::embedded;
use crate::error::{Result, VocabError};
use crate::paths::vocab_dir_from_env;

// =============================================================================
// Entries
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Territory {
    pub code: String,
    pub name: String,
    /// Jurisdiction whose authorities must name a recognized governing agency.
    /// Only the United States is federal; other countries and US states are not.
    pub federal: bool,
}

/// A recognized governing-agency identifier triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoverningAgency {
    pub territory: String,
    pub name: String,
    pub id_extension: String,
    pub id_root: String,
}

/// A disciplinary action code and the license statuses it may be applied to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisciplinaryActionTerm {
    pub code: String,
    pub display_name: String,
    /// Lower-case status codes. Empty means any status.
    pub allowed_statuses: Vec<String>,
    /// The action must carry explanatory text.
    pub requires_text: bool,
}

impl DisciplinaryActionTerm {
    pub fn permits(&self, status: &str) -> bool {
        self.allowed_statuses.is_empty()
            || self
                .allowed_statuses
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(status.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaTypeEntry {
    pub media_type: String,
    /// Lower-case file extensions without the dot.
    pub extensions: Vec<String>,
}

impl MediaTypeEntry {
    pub fn matches_file(&self, file_name: &str) -> bool {
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

// =============================================================================
// CSV rows
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TerritoryRow {
    code: String,
    name: String,
    federal: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AgencyRow {
    territory: String,
    name: String,
    id_extension: String,
    id_root: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UnitRow {
    unit: String,
    description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ActionRow {
    code: String,
    display_name: String,
    allowed_statuses: String,
    requires_text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct MediaTypeRow {
    media_type: String,
    extensions: String,
}

fn parse_rows<T: DeserializeOwned>(table: &str, content: &str) -> Result<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(content.as_bytes()));
    let mut rows = Vec::new();
    for result in reader.deserialize::<T>() {
        let row = result.map_err(|e| VocabError::Csv {
            table: table.to_string(),
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

fn parse_flag(table: &str, column: &'static str, value: &str) -> Result<bool> {
    match value.to_ascii_uppercase().as_str() {
        "Y" | "YES" | "TRUE" => Ok(true),
        "N" | "NO" | "FALSE" | "" => Ok(false),
        _ => Err(VocabError::InvalidValue {
            table: table.to_string(),
            column,
            value: value.to_string(),
        }),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split('|')
        .map(|part| part.trim().to_ascii_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    table: &str,
    key: String,
    value: V,
) -> Result<()> {
    if map.contains_key(&key) {
        return Err(VocabError::Duplicate {
            table: table.to_string(),
            key,
        });
    }
    map.insert(key, value);
    Ok(())
}

// =============================================================================
// Vocabulary
// =============================================================================

/// Raw CSV content of every table.
struct Tables<'a> {
    territories: Cow<'a, str>,
    agencies: Cow<'a, str>,
    units: Cow<'a, str>,
    actions: Cow<'a, str>,
    media_types: Cow<'a, str>,
}

#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    territories: BTreeMap<String, Territory>,
    agencies: Vec<GoverningAgency>,
    units: BTreeMap<String, String>,
    actions: BTreeMap<String, DisciplinaryActionTerm>,
    media_types: BTreeMap<String, MediaTypeEntry>,
    /// Tables read from disk instead of the embedded copy.
    overrides: Vec<PathBuf>,
}

static EMBEDDED: OnceLock<Vocabulary> = OnceLock::new();

/// The embedded vocabulary, parsed on first use and shared afterwards.
pub fn embedded_vocabulary() -> Result<&'static Vocabulary> {
    if let Some(vocabulary) = EMBEDDED.get() {
        return Ok(vocabulary);
    }
    let vocabulary = Vocabulary::from_embedded()?;
    Ok(EMBEDDED.get_or_init(|| vocabulary))
}

impl Vocabulary {
    fn from_embedded() -> Result<Self> {
        Self::build(Tables {
            territories: Cow::Borrowed(embedded::TERRITORIES),
            agencies: Cow::Borrowed(embedded::GOVERNING_AGENCIES),
            units: Cow::Borrowed(embedded::UCUM_UNITS),
            actions: Cow::Borrowed(embedded::DISCIPLINARY_ACTIONS),
            media_types: Cow::Borrowed(embedded::MEDIA_TYPES),
        })
    }

    /// Load with tables from `dir` replacing the embedded ones.
    ///
    /// A table missing from the directory keeps its embedded content.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut overrides = Vec::new();
        let mut contents = Vec::new();
        for (file_name, embedded_content) in embedded::tables() {
            let path = dir.join(file_name);
            if path.is_file() {
                let text =
                    std::fs::read_to_string(&path).map_err(|e| VocabError::io(&path, e))?;
                contents.push(Cow::Owned(text));
                overrides.push(path);
            } else {
                contents.push(Cow::Borrowed(embedded_content));
            }
        }
        let mut contents = contents.into_iter();
        let mut next = || contents.next().unwrap_or(Cow::Borrowed(""));
        let mut vocabulary = Self::build(Tables {
            territories: next(),
            agencies: next(),
            units: next(),
            actions: next(),
            media_types: next(),
        })?;
        vocabulary.overrides = overrides;
        Ok(vocabulary)
    }

    /// Resolve the vocabulary for this process.
    ///
    /// Resolution order:
    /// 1. `dir`, when given
    /// 2. the `SPL_VOCAB_DIR` environment variable
    /// 3. the embedded tables
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        match dir.map(Path::to_path_buf).or_else(vocab_dir_from_env) {
            Some(dir) => Self::from_dir(&dir),
            None => embedded_vocabulary().cloned(),
        }
    }

    fn build(tables: Tables<'_>) -> Result<Self> {
        let mut vocabulary = Self::default();

        for row in parse_rows::<TerritoryRow>("territories.csv", &tables.territories)? {
            let code = row.code.to_ascii_uppercase();
            let territory = Territory {
                code: code.clone(),
                name: row.name,
                federal: parse_flag("territories.csv", "Federal", &row.federal)?,
            };
            insert_unique(
                &mut vocabulary.territories,
                "territories.csv",
                code,
                territory,
            )?;
        }

        for row in parse_rows::<AgencyRow>("governing_agencies.csv", &tables.agencies)? {
            vocabulary.agencies.push(GoverningAgency {
                territory: row.territory.to_ascii_uppercase(),
                name: row.name,
                id_extension: row.id_extension,
                id_root: row.id_root,
            });
        }

        for row in parse_rows::<UnitRow>("ucum_units.csv", &tables.units)? {
            insert_unique(
                &mut vocabulary.units,
                "ucum_units.csv",
                row.unit,
                row.description,
            )?;
        }

        for row in parse_rows::<ActionRow>("disciplinary_actions.csv", &tables.actions)? {
            let code = row.code.to_ascii_uppercase();
            let term = DisciplinaryActionTerm {
                code: code.clone(),
                display_name: row.display_name,
                allowed_statuses: split_list(&row.allowed_statuses),
                requires_text: parse_flag(
                    "disciplinary_actions.csv",
                    "RequiresText",
                    &row.requires_text,
                )?,
            };
            insert_unique(
                &mut vocabulary.actions,
                "disciplinary_actions.csv",
                code,
                term,
            )?;
        }

        for row in parse_rows::<MediaTypeRow>("media_types.csv", &tables.media_types)? {
            let media_type = row.media_type.to_ascii_lowercase();
            let entry = MediaTypeEntry {
                media_type: media_type.clone(),
                extensions: split_list(&row.extensions),
            };
            insert_unique(
                &mut vocabulary.media_types,
                "media_types.csv",
                media_type,
                entry,
            )?;
        }

        debug!(
            territories = vocabulary.territories.len(),
            agencies = vocabulary.agencies.len(),
            units = vocabulary.units.len(),
            actions = vocabulary.actions.len(),
            media_types = vocabulary.media_types.len(),
            "Built vocabulary"
        );
        Ok(vocabulary)
    }

    // -------------------------------------------------------------------------
    // Territories and agencies
    // -------------------------------------------------------------------------

    pub fn territory(&self, code: &str) -> Option<&Territory> {
        self.territories.get(&code.trim().to_ascii_uppercase())
    }

    pub fn is_federal(&self, code: &str) -> bool {
        self.territory(code).is_some_and(|territory| territory.federal)
    }

    pub fn territories(&self) -> impl Iterator<Item = &Territory> {
        self.territories.values()
    }

    /// Agencies recognized for a territory, in table order.
    pub fn agencies_for(&self, territory: &str) -> impl Iterator<Item = &GoverningAgency> {
        let territory = territory.trim().to_ascii_uppercase();
        self.agencies
            .iter()
            .filter(move |agency| agency.territory == territory)
    }

    /// The agency of `territory` whose name matches, ignoring case.
    pub fn agency_named(&self, territory: &str, name: &str) -> Option<&GoverningAgency> {
        let name = name.trim();
        self.agencies_for(territory)
            .find(|agency| agency.name.eq_ignore_ascii_case(name))
    }

    /// The triple exactly matches a recognized agency of `territory`.
    pub fn recognizes_agency(
        &self,
        territory: &str,
        id_extension: &str,
        id_root: &str,
        name: &str,
    ) -> bool {
        self.agency_named(territory, name).is_some_and(|agency| {
            agency.id_extension == id_extension.trim() && agency.id_root == id_root.trim()
        })
    }

    // -------------------------------------------------------------------------
    // Units
    // -------------------------------------------------------------------------

    /// Whether `unit` is a recognized UCUM expression.
    ///
    /// Accepts listed units, curly-brace annotations, and ratios or products
    /// of those (`mg/mL`, `mg/{tbl}`, `mg.h`).
    pub fn is_ucum_unit(&self, unit: &str) -> bool {
        let unit = unit.trim();
        if unit.is_empty() {
            return false;
        }
        if self.is_unit_term(unit) {
            return true;
        }
        unit.contains(['/', '.'])
            && unit
                .split(['/', '.'])
                .all(|part| self.is_unit_term(part) || is_unit_factor(part))
    }

    fn is_unit_term(&self, term: &str) -> bool {
        self.units.contains_key(term) || is_annotation(term)
    }

    // -------------------------------------------------------------------------
    // Licensing
    // -------------------------------------------------------------------------

    pub fn disciplinary_action(&self, code: &str) -> Option<&DisciplinaryActionTerm> {
        self.actions.get(&code.trim().to_ascii_uppercase())
    }

    pub fn disciplinary_actions(&self) -> impl Iterator<Item = &DisciplinaryActionTerm> {
        self.actions.values()
    }

    // -------------------------------------------------------------------------
    // Media
    // -------------------------------------------------------------------------

    pub fn media_type(&self, media_type: &str) -> Option<&MediaTypeEntry> {
        self.media_types.get(&media_type.trim().to_ascii_lowercase())
    }

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------

    /// Entry count per table.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("territories", self.territories.len()),
            ("governing agencies", self.agencies.len()),
            ("UCUM units", self.units.len()),
            ("disciplinary actions", self.actions.len()),
            ("media types", self.media_types.len()),
        ]
    }

    /// Files that replaced embedded tables.
    pub fn overrides(&self) -> &[PathBuf] {
        &self.overrides
    }
}

fn is_annotation(term: &str) -> bool {
    term.len() > 2 && term.starts_with('{') && term.ends_with('}')
}

fn is_unit_factor(term: &str) -> bool {
    !term.is_empty() && term.chars().all(|c| c.is_ascii_digit())
}

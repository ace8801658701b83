//! The curriculum taxonomy and its reverse index.
//!
//! The forward structure is Subject → Grade → Unit → Object → Skills, kept in
//! source order. The reverse index maps every knowledge object string back to
//! the triple it lives under, so global search never walks the nesting.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CurriculumError, Result};

/// Object → ordered skills.
pub type Objects = IndexMap<String, Vec<String>>;

/// Unit → objects.
pub type Units = IndexMap<String, Objects>;

/// Grade → units.
pub type Grades = IndexMap<String, Units>;

/// Where a knowledge object lives in the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectContext {
    /// Subject name.
    pub subject: String,

    /// Canonical grade label.
    pub grade: String,

    /// Thematic unit.
    pub unit: String,

    /// Skills attached to the object, in order.
    pub skills: Vec<String>,
}

/// Read-only curriculum taxonomy.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    subjects: IndexMap<String, Grades>,
    reverse: IndexMap<String, ObjectContext>,
    collisions: usize,
}

impl Taxonomy {
    /// Build a taxonomy and its reverse index.
    pub fn new(subjects: IndexMap<String, Grades>) -> Self {
        let mut reverse = IndexMap::new();
        let mut collisions = 0;

        for (subject, grades) in &subjects {
            for (grade, units) in grades {
                for (unit, objects) in units {
                    for (object, skills) in objects {
                        let context = ObjectContext {
                            subject: subject.clone(),
                            grade: grade.clone(),
                            unit: unit.clone(),
                            skills: skills.clone(),
                        };
                        // Last write wins; the first position is kept.
                        if let Some(previous) = reverse.insert(object.clone(), context) {
                            collisions += 1;
                            debug!(
                                object = %object,
                                previous_unit = %previous.unit,
                                unit = %unit,
                                "Knowledge object repeated across units"
                            );
                        }
                    }
                }
            }
        }

        if collisions > 0 {
            warn!(collisions, "Reverse index collisions, last occurrence kept");
        }

        Self {
            subjects,
            reverse,
            collisions,
        }
    }

    /// An empty taxonomy.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse the nested JSON form.
    pub fn from_json(json: &str) -> Result<Self> {
        let subjects: IndexMap<String, Grades> = serde_json::from_str(json)?;
        Ok(Self::new(subjects))
    }

    /// Load the nested JSON form from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CurriculumError::NotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let taxonomy = Self::from_json(&json)?;
        info!(
            path = %path.display(),
            subjects = taxonomy.subjects.len(),
            objects = taxonomy.object_count(),
            "Loaded curriculum"
        );
        Ok(taxonomy)
    }

    /// Load from disk, degrading to an empty taxonomy on any failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(taxonomy) => taxonomy,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Curriculum unavailable, continuing without it");
                Self::empty()
            }
        }
    }

    /// Whether no subject is loaded.
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }

    /// Number of distinct knowledge objects.
    pub fn object_count(&self) -> usize {
        self.reverse.len()
    }

    /// Number of object strings that appeared under more than one unit.
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Subjects in source order.
    pub fn subjects(&self) -> Vec<&str> {
        self.subjects.keys().map(String::as_str).collect()
    }

    /// Whether a subject exists.
    pub fn has_subject(&self, subject: &str) -> bool {
        self.subjects.contains_key(subject)
    }

    /// Grades of a subject.
    pub fn grades(&self, subject: &str) -> Vec<&str> {
        self.subjects
            .get(subject)
            .map(|grades| grades.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Units of a (subject, grade) scope.
    pub fn units(&self, subject: &str, grade: &str) -> Vec<&str> {
        self.grade_units(subject, grade)
            .map(|units| units.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Objects of one unit.
    pub fn objects(&self, subject: &str, grade: &str, unit: &str) -> Vec<&str> {
        self.unit_objects(subject, grade, unit)
            .map(|objects| objects.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Every (unit, object) pair of a (subject, grade) scope.
    pub fn objects_in_grade(&self, subject: &str, grade: &str) -> Vec<(&str, &str)> {
        let Some(units) = self.grade_units(subject, grade) else {
            return Vec::new();
        };
        units
            .iter()
            .flat_map(|(unit, objects)| {
                objects
                    .keys()
                    .map(move |object| (unit.as_str(), object.as_str()))
            })
            .collect()
    }

    /// Every (grade, unit, object) triple of a subject.
    pub fn objects_in_subject(&self, subject: &str) -> Vec<(&str, &str, &str)> {
        let Some(grades) = self.subjects.get(subject) else {
            return Vec::new();
        };
        grades
            .iter()
            .flat_map(|(grade, units)| {
                units.iter().flat_map(move |(unit, objects)| {
                    objects
                        .keys()
                        .map(move |object| (grade.as_str(), unit.as_str(), object.as_str()))
                })
            })
            .collect()
    }

    /// Skills of an object, empty if the path does not exist.
    pub fn skills(&self, subject: &str, grade: &str, unit: &str, object: &str) -> &[String] {
        self.unit_objects(subject, grade, unit)
            .and_then(|objects| objects.get(object))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total skill count of a (subject, grade) scope.
    pub fn skill_count(&self, subject: &str, grade: &str) -> usize {
        self.grade_units(subject, grade)
            .map(|units| {
                units
                    .values()
                    .flat_map(IndexMap::values)
                    .map(Vec::len)
                    .sum()
            })
            .unwrap_or_default()
    }

    /// First grade of a subject that contains the unit.
    pub fn grade_of_unit(&self, subject: &str, unit: &str) -> Option<&str> {
        self.subjects
            .get(subject)?
            .iter()
            .find(|(_, units)| units.contains_key(unit))
            .map(|(grade, _)| grade.as_str())
    }

    /// Objects of a unit in a grade, as an ordered map.
    pub fn unit_objects(&self, subject: &str, grade: &str, unit: &str) -> Option<&Objects> {
        self.grade_units(subject, grade)?.get(unit)
    }

    /// Units of a grade, as an ordered map.
    pub fn grade_units(&self, subject: &str, grade: &str) -> Option<&Units> {
        self.subjects.get(subject)?.get(grade)
    }

    /// Grades of a subject, as an ordered map.
    pub fn subject_grades(&self, subject: &str) -> Option<&Grades> {
        self.subjects.get(subject)
    }

    /// Context of a knowledge object.
    pub fn lookup(&self, object: &str) -> Option<&ObjectContext> {
        self.reverse.get(object)
    }

    /// The reverse index in insertion order.
    pub fn reverse_index(&self) -> &IndexMap<String, ObjectContext> {
        &self.reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "História": {
            "8º": {
                "Revoluções": {
                    "Revolução Francesa": ["EF08HI04"]
                }
            },
            "9º": {
                "República": {
                    "Proclamação": ["EF09HI01", "EF09HI02"],
                    "Era Vargas": ["EF09HI06"]
                },
                "Guerras": {
                    "Segunda Guerra": []
                }
            }
        },
        "Matemática": {
            "6º": {
                "Números": {
                    "Frações": ["EF06MA07"]
                }
            }
        }
    }"#;

    fn sample() -> Taxonomy {
        Taxonomy::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn test_level_accessors() {
        let taxonomy = sample();
        assert_eq!(taxonomy.subjects(), vec!["História", "Matemática"]);
        assert_eq!(taxonomy.grades("História"), vec!["8º", "9º"]);
        assert_eq!(taxonomy.units("História", "9º"), vec!["República", "Guerras"]);
        assert_eq!(
            taxonomy.objects("História", "9º", "República"),
            vec!["Proclamação", "Era Vargas"]
        );
        assert_eq!(
            taxonomy.skills("História", "9º", "República", "Proclamação"),
            &["EF09HI01".to_string(), "EF09HI02".to_string()]
        );
        assert!(taxonomy.units("Artes", "1º").is_empty());
        assert!(taxonomy.skills("História", "9º", "Guerras", "Nada").is_empty());
    }

    #[test]
    fn test_reverse_index() {
        let taxonomy = sample();
        assert_eq!(taxonomy.object_count(), 5);
        let context = taxonomy.lookup("Era Vargas").unwrap();
        assert_eq!(context.subject, "História");
        assert_eq!(context.grade, "9º");
        assert_eq!(context.unit, "República");
        assert_eq!(context.skills, vec!["EF09HI06"]);
    }

    #[test]
    fn test_reverse_index_last_write_wins() {
        let taxonomy = Taxonomy::from_json(
            r#"{"A": {"1º": {"U1": {"Obj": ["s1"]}, "U2": {"Obj": ["s2"]}}}}"#,
        )
        .unwrap();
        assert_eq!(taxonomy.object_count(), 1);
        assert_eq!(taxonomy.collisions(), 1);
        assert_eq!(taxonomy.lookup("Obj").unwrap().unit, "U2");
    }

    #[test]
    fn test_objects_in_grade_and_subject() {
        let taxonomy = sample();
        assert_eq!(
            taxonomy.objects_in_grade("História", "9º"),
            vec![
                ("República", "Proclamação"),
                ("República", "Era Vargas"),
                ("Guerras", "Segunda Guerra"),
            ]
        );
        assert_eq!(taxonomy.objects_in_subject("História").len(), 4);
        assert_eq!(taxonomy.skill_count("História", "9º"), 3);
    }

    #[test]
    fn test_grade_of_unit() {
        let taxonomy = sample();
        assert_eq!(taxonomy.grade_of_unit("História", "Guerras"), Some("9º"));
        assert_eq!(taxonomy.grade_of_unit("História", "Números"), None);
    }

    #[test]
    fn test_load_or_empty_on_missing_file() {
        let taxonomy = Taxonomy::load_or_empty(Path::new("/nonexistent/curriculum.json"));
        assert!(taxonomy.is_empty());
        assert_eq!(taxonomy.object_count(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curriculum.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let taxonomy = Taxonomy::load(&path).unwrap();
        assert_eq!(taxonomy.object_count(), 5);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("curriculum.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            Taxonomy::load(&path),
            Err(CurriculumError::Serialization(_))
        ));
        assert!(Taxonomy::load_or_empty(&path).is_empty());
    }
}

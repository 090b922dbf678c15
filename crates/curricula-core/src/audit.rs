//! Consistency audit of the subject/link invariant.
//!
//! A subject's `program_codes` must name exactly the links stored for it.
//! [`audit`] compares a snapshot of subjects against the set of link keys and
//! reports both directions of drift. It never repairs anything.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::keys::{link_key, parse_link_key, ProgramCode, SubjectCode};
use crate::model::Subject;

/// A (program, subject) pair a subject lists but no link record backs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct LinkRef {
    pub codigo_carrera: ProgramCode,
    pub codigo_asignatura: SubjectCode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub subjects_checked: usize,
    pub links_checked: usize,
    /// Programs listed in `program_codes` without a link record.
    pub missing_links: Vec<LinkRef>,
    /// Link keys not listed by any subject, including malformed keys.
    pub orphan_links: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_links.is_empty() && self.orphan_links.is_empty()
    }
}

pub fn audit(subjects: &BTreeMap<SubjectCode, Subject>, link_keys: &[String]) -> ConsistencyReport {
    let existing: BTreeSet<&str> = link_keys.iter().map(String::as_str).collect();

    let mut missing_links = BTreeSet::new();
    for (code, subject) in subjects {
        for program in &subject.program_codes {
            if !existing.contains(link_key(program, code).as_str()) {
                missing_links.insert(LinkRef {
                    codigo_carrera: program.clone(),
                    codigo_asignatura: code.clone(),
                });
            }
        }
    }

    let orphan_links = existing
        .iter()
        .filter(|key| match parse_link_key(key) {
            Ok((program, subject)) => !subjects
                .get(&subject)
                .is_some_and(|s| s.program_codes.contains(&program)),
            Err(_) => true,
        })
        .map(|key| key.to_string())
        .collect();

    ConsistencyReport {
        subjects_checked: subjects.len(),
        links_checked: existing.len(),
        missing_links: missing_links.into_iter().collect(),
        orphan_links,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Number;

    use super::*;

    fn subject(programs: &[&str]) -> Subject {
        Subject {
            name: "s".into(),
            credit_units: Number::from(3u32),
            program_codes: programs.iter().map(|p| ProgramCode::new(*p).unwrap()).collect(),
        }
    }

    fn code(c: &str) -> SubjectCode {
        SubjectCode::new(c).unwrap()
    }

    #[test]
    fn consistent_store_has_no_findings() {
        let mut subjects = BTreeMap::new();
        subjects.insert(code("CS101"), subject(&["INF", "MAT"]));
        let links = vec!["vinculo:INF:CS101".to_string(), "vinculo:MAT:CS101".to_string()];

        let report = audit(&subjects, &links);
        assert!(report.is_consistent());
        assert_eq!(report.subjects_checked, 1);
        assert_eq!(report.links_checked, 2);
    }

    #[test]
    fn reports_missing_and_orphan_links() {
        let mut subjects = BTreeMap::new();
        subjects.insert(code("CS101"), subject(&["INF", "MAT"]));
        subjects.insert(code("CS102"), subject(&[]));
        let links = vec![
            "vinculo:INF:CS101".to_string(),
            // not listed by CS102
            "vinculo:INF:CS102".to_string(),
            // subject never existed
            "vinculo:INF:GONE".to_string(),
            "vinculo:broken".to_string(),
        ];

        let report = audit(&subjects, &links);
        assert!(!report.is_consistent());
        assert_eq!(
            report.missing_links,
            vec![LinkRef {
                codigo_carrera: ProgramCode::new("MAT").unwrap(),
                codigo_asignatura: code("CS101"),
            }]
        );
        assert_eq!(
            report.orphan_links,
            vec!["vinculo:INF:CS102", "vinculo:INF:GONE", "vinculo:broken"]
        );
    }
}

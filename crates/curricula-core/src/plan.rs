//! Link write planner.
//!
//! Subjects carry `program_codes` as a denormalized copy of which link records
//! exist. Create, update and delete all go through this module so that the
//! subject record and its links are always written in the same atomic
//! [`Batch`]:
//!
//! - [`plan_write`] diffs the previous program list (if any) against the new
//!   placements, queues deletes for stale links, the subject overwrite, and an
//!   unconditional upsert of every current link.
//! - [`plan_delete`] queues the subject delete plus one delete per program the
//!   subject lists. Links are never re-derived by scanning here; a subject
//!   whose `program_codes` already diverged leaves orphans behind, which
//!   [`crate::audit`] reports.
//!
//! The previous subject is read by the caller before the batch is committed.
//! That is a read-then-write window, not a compare-and-swap: two concurrent
//! updates of one subject resolve last-writer-wins, and the stale-link set of
//! the earlier writer is not re-validated.

use std::collections::HashSet;

use crate::batch::Batch;
use crate::error::CoreError;
use crate::keys::{link_key, subject_key, ProgramCode, SubjectCode};
use crate::model::{Placement, Subject, SubjectDraft};

/// Planned write of one subject and its links.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePlan {
    /// `asig:` key of the subject.
    pub key: String,
    /// Subject record as it will be stored.
    pub subject: Subject,
    pub batch: Batch,
    /// Programs dropped relative to the previous record.
    pub stale_programs: Vec<ProgramCode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletePlan {
    pub batch: Batch,
    pub deleted_links: usize,
}

/// Collapses repeated program codes.
///
/// A repeated code keeps the position of its first occurrence and the values
/// of its last one, which is what committing every upsert in order would leave
/// behind anyway.
fn normalize_placements(placements: Vec<Placement>) -> Vec<Placement> {
    let mut out: Vec<Placement> = Vec::with_capacity(placements.len());
    for placement in placements {
        match out
            .iter_mut()
            .find(|p| p.program_code == placement.program_code)
        {
            Some(existing) => *existing = placement,
            None => out.push(placement),
        }
    }
    out
}

/// Plans a create (`previous == None`) or an update of a subject.
pub fn plan_write(draft: SubjectDraft, previous: Option<&Subject>) -> Result<WritePlan, CoreError> {
    let SubjectDraft {
        code,
        name,
        credit_units,
        placements,
    } = draft;

    let placements = normalize_placements(placements);
    let program_codes: Vec<ProgramCode> = placements
        .iter()
        .map(|p| p.program_code.clone())
        .collect();

    let stale_programs: Vec<ProgramCode> = match previous {
        Some(prev) => {
            let mut seen = HashSet::new();
            prev.program_codes
                .iter()
                .filter(|p| !program_codes.contains(*p) && seen.insert(*p))
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };

    let subject = Subject {
        name,
        credit_units,
        program_codes,
    };
    let key = subject_key(&code);

    let mut batch = Batch::new();
    for program in &stale_programs {
        batch.delete(link_key(program, &code));
    }
    batch.set_record(key.clone(), &subject)?;
    for placement in &placements {
        batch.set_record(link_key(&placement.program_code, &code), &placement.link())?;
    }

    Ok(WritePlan {
        key,
        subject,
        batch,
        stale_programs,
    })
}

/// Plans the removal of a subject and every link it lists.
pub fn plan_delete(code: &SubjectCode, current: &Subject) -> DeletePlan {
    let mut batch = Batch::new();
    let mut seen = HashSet::new();
    for program in &current.program_codes {
        if seen.insert(program) {
            batch.delete(link_key(program, code));
        }
    }
    batch.delete(subject_key(code));

    DeletePlan {
        deleted_links: seen.len(),
        batch,
    }
}

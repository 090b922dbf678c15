//! CatalogService: the single coordinator between HTTP handlers and the store.
//!
//! All business logic flows through [`CatalogService`]. Handlers are thin
//! wrappers that delegate to these methods.
//!
//! Every method is one self-contained read/compute/write cycle against the
//! injected [`KvStore`]:
//!
//! - writes that touch a subject and its links are planned by
//!   [`curricula_core::plan`] and committed as one atomic batch;
//! - update and delete read the current subject before committing. That read
//!   is outside the batch, so concurrent writers to the same subject race and
//!   the last batch wins;
//! - listings rebuild the denormalized view from prefix scans plus one
//!   multi-key fetch per record family, joined through key maps. Scans are not
//!   snapshots, so records appearing or vanishing mid-request are tolerated.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::Number;
use tracing::{debug, info, warn};

use curricula_core::keys::{
    link_key, parse_link_key, program_link_prefix, subject_code_from_key, subject_key, user_key,
    LINK_PREFIX, SUBJECT_PREFIX,
};
use curricula_core::{
    audit, plan_delete, plan_write, ConsistencyReport, CoreError, Link, ProgramCode, Subject,
    SubjectCode, User, UserId,
};
use curricula_storage::{KvStore, KvStoreExt};

use crate::error::ApiError;
use crate::schema::programs::{CurriculumEntry, CurriculumResponse};
use crate::schema::subjects::{
    CatalogEntry, CreateSubjectRequest, DeleteSubjectResponse, PlacementView, SubjectEnvelope,
    UpdateSubjectRequest,
};
use crate::schema::users::CreateUserRequest;

pub struct CatalogService {
    store: Arc<dyn KvStore>,
}

fn subject_not_found(code: &SubjectCode) -> ApiError {
    ApiError::NotFound(format!("Asignatura {} no encontrada", code))
}

/// Orders JSON numbers by value, integers exactly and anything else as `f64`.
fn cmp_numbers(a: &Number, b: &Number) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => {
            let x = a.as_f64().unwrap_or(f64::NAN);
            let y = b.as_f64().unwrap_or(f64::NAN);
            x.total_cmp(&y)
        }
    }
}

impl CatalogService {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        CatalogService { store }
    }

    /// The underlying store handle.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    // -------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------

    pub fn get_user(&self, id: &str) -> Result<User, ApiError> {
        let id = UserId::new(id)?;
        self.store
            .get_record::<User>(&user_key(&id))?
            .ok_or_else(|| ApiError::NotFound("Usuario no encontrado".to_string()))
    }

    pub fn create_user(&self, req: CreateUserRequest) -> Result<(), ApiError> {
        let raw_id = req.id.map(|id| id.into_string()).unwrap_or_default();
        let id = UserId::new(raw_id)?;
        let user = User {
            name: req.name,
            email: req.email,
        };
        let value = serde_json::to_value(&user).map_err(CoreError::from)?;
        self.store.set(&user_key(&id), value)?;
        info!(user = %id, "created user");
        Ok(())
    }

    // -------------------------------------------------------------------
    // Subject writes
    // -------------------------------------------------------------------

    /// Creates or overwrites a subject together with its links.
    ///
    /// No existence check is made. Overwriting a subject whose previous record
    /// listed other programs leaves those links behind; the consistency audit
    /// reports them.
    pub fn create_subject(&self, req: CreateSubjectRequest) -> Result<SubjectEnvelope, ApiError> {
        let draft = req.into_draft()?;
        let code = draft.code.clone();
        let plan = plan_write(draft, None)?;

        self.store.exec(plan.batch)?;
        info!(
            subject = %code,
            programs = plan.subject.program_codes.len(),
            "created subject"
        );

        Ok(SubjectEnvelope {
            key: plan.key,
            value: plan.subject,
        })
    }

    /// Replaces a subject and reconciles its links.
    ///
    /// Links for programs dropped from the list are deleted, and every listed
    /// program's link is overwritten, in one batch.
    pub fn update_subject(
        &self,
        code: &str,
        req: UpdateSubjectRequest,
    ) -> Result<SubjectEnvelope, ApiError> {
        let code = SubjectCode::new(code)?;
        let draft = req.into_draft(code.clone())?;

        let current = self
            .store
            .get_record::<Subject>(&subject_key(&code))?
            .ok_or_else(|| subject_not_found(&code))?;

        let plan = plan_write(draft, Some(&current))?;
        self.store.exec(plan.batch)?;
        info!(
            subject = %code,
            programs = plan.subject.program_codes.len(),
            stale = plan.stale_programs.len(),
            "updated subject"
        );

        Ok(SubjectEnvelope {
            key: plan.key,
            value: plan.subject,
        })
    }

    /// Deletes a subject and every link its `program_codes` names.
    pub fn delete_subject(&self, code: &str) -> Result<DeleteSubjectResponse, ApiError> {
        let code = SubjectCode::new(code)?;
        let current = self
            .store
            .get_record::<Subject>(&subject_key(&code))?
            .ok_or_else(|| subject_not_found(&code))?;

        let plan = plan_delete(&code, &current);
        let deleted = plan.deleted_links;
        self.store.exec(plan.batch)?;
        info!(subject = %code, links = deleted, "deleted subject");

        Ok(DeleteSubjectResponse {
            message: format!(
                "Asignatura {} eliminada junto con {} vínculo(s)",
                code, deleted
            ),
            vinculos_eliminados: deleted,
        })
    }

    // -------------------------------------------------------------------
    // Subject reads
    // -------------------------------------------------------------------

    /// Returns the raw stored record, without link expansion.
    pub fn get_subject(&self, code: &str) -> Result<SubjectEnvelope, ApiError> {
        let code = SubjectCode::new(code)?;
        let key = subject_key(&code);
        let value = self
            .store
            .get_record::<Subject>(&key)?
            .ok_or_else(|| subject_not_found(&code))?;
        Ok(SubjectEnvelope { key, value })
    }

    /// Fetches every subject record, keyed by code.
    fn load_subjects(&self) -> Result<BTreeMap<SubjectCode, Subject>, ApiError> {
        let keys = self.store.scan_prefix(SUBJECT_PREFIX)?;
        if keys.is_empty() {
            return Ok(BTreeMap::new());
        }

        let mut subjects = BTreeMap::new();
        for (key, subject) in self.store.get_records::<Subject>(&keys)? {
            match subject_code_from_key(&key) {
                Ok(code) => {
                    subjects.insert(code, subject);
                }
                Err(e) => warn!(%key, error = %e, "skipping subject with malformed key"),
            }
        }
        Ok(subjects)
    }

    /// Lists every subject with its placements expanded from link records.
    ///
    /// A listed program without a link record degrades to a placement with no
    /// semester and no prerequisites instead of failing the request.
    pub fn list_subjects(&self) -> Result<Vec<CatalogEntry>, ApiError> {
        let subjects = self.load_subjects()?;

        let link_keys: Vec<String> = subjects
            .iter()
            .flat_map(|(code, subject)| {
                subject
                    .program_codes
                    .iter()
                    .map(move |program| link_key(program, code))
            })
            .collect();
        let links: HashMap<String, Link> = self
            .store
            .get_records::<Link>(&link_keys)?
            .into_iter()
            .collect();

        let entries: Vec<CatalogEntry> = subjects
            .into_iter()
            .map(|(code, subject)| {
                let carreras = subject
                    .program_codes
                    .into_iter()
                    .map(|program| match links.get(&link_key(&program, &code)) {
                        Some(link) => PlacementView {
                            codigo_carrera: program,
                            semestre: Some(link.semester.clone()),
                            requisitos: link.prerequisites.clone(),
                        },
                        None => {
                            warn!(subject = %code, program = %program, "missing link record");
                            PlacementView {
                                codigo_carrera: program,
                                semestre: None,
                                requisitos: Vec::new(),
                            }
                        }
                    })
                    .collect();
                CatalogEntry {
                    codigo_asignatura: code,
                    nombre_asignatura: subject.name,
                    unidades_credito: subject.credit_units,
                    carreras,
                }
            })
            .collect();

        debug!(subjects = entries.len(), links = links.len(), "listed subjects");
        Ok(entries)
    }

    /// Lists the subjects placed in one program, ordered by semester.
    ///
    /// Links whose subject record is gone are skipped.
    pub fn program_curriculum(&self, program: &str) -> Result<CurriculumResponse, ApiError> {
        let program = ProgramCode::new(program)?;
        let link_keys = self.store.scan_prefix(&program_link_prefix(&program))?;
        if link_keys.is_empty() {
            return Ok(CurriculumResponse::empty(&program));
        }

        let mut codes = Vec::with_capacity(link_keys.len());
        for key in &link_keys {
            match parse_link_key(key) {
                Ok((_, subject)) => codes.push(subject),
                Err(e) => warn!(%key, error = %e, "skipping link with malformed key"),
            }
        }

        let links: HashMap<String, Link> = self
            .store
            .get_records::<Link>(&link_keys)?
            .into_iter()
            .collect();
        let subject_keys: Vec<String> = codes.iter().map(subject_key).collect();
        let subjects: HashMap<String, Subject> = self
            .store
            .get_records::<Subject>(&subject_keys)?
            .into_iter()
            .collect();

        let mut entries = Vec::with_capacity(codes.len());
        for code in codes {
            let link = links.get(&link_key(&program, &code));
            let subject = subjects.get(&subject_key(&code));
            match (link, subject) {
                (Some(link), Some(subject)) => entries.push(CurriculumEntry {
                    codigo_asignatura: code,
                    nombre_asignatura: subject.name.clone(),
                    unidades_credito: subject.credit_units.clone(),
                    semestre: link.semester.clone(),
                    requisitos: link.prerequisites.clone(),
                }),
                (Some(_), None) => {
                    warn!(program = %program, subject = %code, "link points at a missing subject")
                }
                (None, _) => debug!(program = %program, subject = %code, "link vanished during scan"),
            }
        }

        if entries.is_empty() {
            return Ok(CurriculumResponse::empty(&program));
        }

        entries.sort_by(|a, b| {
            cmp_numbers(&a.semestre, &b.semestre)
                .then_with(|| a.codigo_asignatura.cmp(&b.codigo_asignatura))
        });
        debug!(program = %program, subjects = entries.len(), "assembled curriculum");
        Ok(CurriculumResponse::Subjects(entries))
    }

    // -------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------

    /// Checks that every subject's program list matches the stored links.
    pub fn audit(&self) -> Result<ConsistencyReport, ApiError> {
        let subjects = self.load_subjects()?;
        let link_keys = self.store.scan_prefix(LINK_PREFIX)?;
        let report = audit(&subjects, &link_keys);

        if !report.is_consistent() {
            warn!(
                missing = report.missing_links.len(),
                orphans = report.orphan_links.len(),
                "catalog links are inconsistent"
            );
        }
        Ok(report)
    }
}

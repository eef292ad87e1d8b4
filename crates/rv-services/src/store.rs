//! Project store
//!
//! Owns every project and its ledger. Projects are kept newest first.

use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use rv_contracts::{Contract, CreatePaymentContract, CreateProjectContract, ImportContract};
use rv_core::clock::Clock;
use rv_core::error::{RvError, ValidationErrors};
use rv_core::result::RvResult;
use rv_core::traits::Id;
use rv_models::{CreateProjectDto, NewPayment, Project};
use tracing::{debug, info};

/// Shared handle to the single store instance
pub type StoreHandle = Arc<RwLock<ProjectStore>>;

/// Wrap a store for sharing between the server, scheduler and sync layer
pub fn shared(store: ProjectStore) -> StoreHandle {
    Arc::new(RwLock::new(store))
}

pub struct ProjectStore {
    clock: Arc<dyn Clock>,
    projects: Vec<Project>,
    next_project_id: Id,
    next_payment_id: Id,
}

impl std::fmt::Debug for ProjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectStore")
            .field("projects", &self.projects.len())
            .field("next_project_id", &self.next_project_id)
            .field("next_payment_id", &self.next_payment_id)
            .finish()
    }
}

impl ProjectStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            projects: Vec::new(),
            next_project_id: 1,
            next_payment_id: 1,
        }
    }

    /// Start from existing records, validated like an import
    pub fn with_projects(clock: Arc<dyn Clock>, projects: Vec<Project>) -> RvResult<Self> {
        let mut store = Self::new(clock);
        store.replace_all(projects)?;
        Ok(store)
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Create a project from a draft and put it at the front of the list
    pub fn create(&mut self, draft: CreateProjectDto) -> RvResult<Project> {
        CreateProjectContract::new().validate(&draft)?;

        let next_project_id = successor(self.next_project_id)?;
        let project = draft.into_project(self.next_project_id);
        self.next_project_id = next_project_id;
        self.projects.insert(0, project.clone());

        info!(project_id = project.id, name = %project.name, "Project created");
        Ok(project)
    }

    /// Remove a project together with its ledger
    pub fn delete(&mut self, id: Id) -> RvResult<Project> {
        let index = self.index_of(id)?;
        let removed = self.projects.remove(index);

        info!(project_id = id, payments = removed.payments.len(), "Project deleted");
        Ok(removed)
    }

    /// Append a payment to a project's ledger
    pub fn add_payment(&mut self, project_id: Id, draft: NewPayment) -> RvResult<Project> {
        let index = self.index_of(project_id)?;
        CreatePaymentContract::new().validate(&draft)?;

        let payment_id = self.next_payment_id;
        let next_payment_id = successor(payment_id)?;
        let payment = draft
            .into_payment(payment_id)
            .ok_or_else(|| RvError::Internal("validated payment draft is incomplete".to_string()))?;

        let today = self.today();
        let project = &mut self.projects[index];
        if !project.add_payment(payment, today) {
            let mut errors = ValidationErrors::new();
            errors.add("amount", "would put the collected total out of range");
            return Err(errors.into());
        }
        self.next_payment_id = next_payment_id;

        info!(
            project_id,
            payment_id,
            collected = %project.collected(),
            status = project.status.as_str(),
            "Payment added"
        );
        Ok(project.clone())
    }

    /// Remove a payment from a project's ledger.
    ///
    /// An unknown payment id leaves the project unchanged.
    pub fn remove_payment(&mut self, project_id: Id, payment_id: Id) -> RvResult<Project> {
        let index = self.index_of(project_id)?;
        let today = self.today();
        let project = &mut self.projects[index];

        if project.remove_payment(payment_id, today) {
            info!(
                project_id,
                payment_id,
                collected = %project.collected(),
                status = project.status.as_str(),
                "Payment removed"
            );
        } else {
            debug!(project_id, payment_id, "Payment not in ledger, nothing removed");
        }
        Ok(project.clone())
    }

    /// All projects, newest first
    pub fn list(&self) -> &[Project] {
        &self.projects
    }

    /// Owned copy of the current contents
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn get(&self, id: Id) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Project holding the given payment
    pub fn find_payment_owner(&self, payment_id: Id) -> Option<Id> {
        self.projects
            .iter()
            .find(|p| p.payment(payment_id).is_some())
            .map(|p| p.id)
    }

    /// Replace a project in place, or put an unseen one at the front
    pub fn upsert(&mut self, project: Project) -> RvResult<()> {
        let (next_project_id, next_payment_id) = next_ids(
            self.next_project_id,
            self.next_payment_id,
            std::slice::from_ref(&project),
        )?;
        self.next_project_id = next_project_id;
        self.next_payment_id = next_payment_id;
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(existing) => *existing = project,
            None => self.projects.insert(0, project),
        }
        Ok(())
    }

    /// Overwrite the whole store.
    ///
    /// Every record is validated before anything changes.
    pub fn replace_all(&mut self, projects: Vec<Project>) -> RvResult<()> {
        ImportContract::new()
            .validate(projects.as_slice())
            .map_err(|errors| RvError::format(format!("invalid project records: {}", errors)))?;

        let (next_project_id, next_payment_id) = next_ids(1, 1, &projects)?;
        self.next_project_id = next_project_id;
        self.next_payment_id = next_payment_id;
        self.projects = projects;

        info!(projects = self.projects.len(), "Store contents replaced");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    fn index_of(&self, id: Id) -> RvResult<usize> {
        self.projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| RvError::not_found("Project", id))
    }
}

/// Id counters raised above every id in `projects`
fn next_ids(mut next_project_id: Id, mut next_payment_id: Id, projects: &[Project]) -> RvResult<(Id, Id)> {
    for project in projects {
        next_project_id = next_project_id.max(successor(project.id)?);
        for payment in &project.payments {
            next_payment_id = next_payment_id.max(successor(payment.id)?);
        }
    }
    Ok((next_project_id, next_payment_id))
}

fn successor(id: Id) -> RvResult<Id> {
    id.checked_add(1)
        .ok_or_else(|| RvError::format(format!("id {} leaves no room for new records", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rv_core::clock::ManualClock;
    use rv_models::{Payment, ProjectStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store() -> ProjectStore {
        ProjectStore::new(Arc::new(ManualClock::at_date(date(2024, 6, 1))))
    }

    fn draft(name: &str, amount: i64) -> CreateProjectDto {
        CreateProjectDto::new(name, Decimal::from(amount))
    }

    fn pay(amount: i64) -> NewPayment {
        NewPayment::new(date(2024, 5, 1), Decimal::from(amount))
    }

    #[test]
    fn test_create_puts_newest_first() {
        let mut store = store();
        let a = store.create(draft("A", 100)).unwrap();
        let b = store.create(draft("B", 200)).unwrap();

        assert_ne!(a.id, b.id);
        let names: Vec<_> = store.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(a.status, ProjectStatus::InProgress);
        assert_eq!(a.collected(), Decimal::ZERO);
    }

    #[test]
    fn test_create_honours_status_override() {
        let mut store = store();
        let mut d = draft("A", 100);
        d.status = Some(ProjectStatus::OverdueRisk);

        let project = store.create(d).unwrap();
        assert_eq!(project.status, ProjectStatus::OverdueRisk);
    }

    #[test]
    fn test_create_rejects_invalid_draft() {
        let mut store = store();
        let err = store.create(CreateProjectDto::default()).unwrap_err();

        assert!(matches!(err, RvError::Validation(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_unknown_project() {
        let mut store = store();
        store.create(draft("A", 100)).unwrap();

        let err = store.delete(42).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_scenario_add_and_remove_payments() {
        let mut store = store();
        let mut d = draft("A", 100);
        d.payment_date = Some(date(2024, 12, 31));
        let project = store.create(d).unwrap();

        let updated = store.add_payment(project.id, pay(40)).unwrap();
        assert_eq!(updated.collected(), Decimal::from(40));
        assert_eq!(updated.remaining(), Decimal::from(60));
        assert_eq!(updated.status, ProjectStatus::InProgress);

        let updated = store.add_payment(project.id, pay(60)).unwrap();
        assert_eq!(updated.collected(), Decimal::from(100));
        assert_eq!(updated.status, ProjectStatus::Completed);
        assert!(!updated.is_overdue(store.today()));

        let last = updated.payments[1].id;
        let updated = store.remove_payment(project.id, last).unwrap();
        assert_eq!(updated.collected(), Decimal::from(40));
        assert_eq!(updated.status, ProjectStatus::InProgress);
        assert_eq!(store.get(project.id).unwrap(), &updated);
    }

    #[test]
    fn test_payment_on_unknown_project() {
        let mut store = store();
        assert!(store.add_payment(9, pay(10)).unwrap_err().is_not_found());
        assert!(store.remove_payment(9, 1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_invalid_payment_leaves_project_untouched() {
        let mut store = store();
        let project = store.create(draft("A", 100)).unwrap();

        let err = store.add_payment(project.id, NewPayment::default()).unwrap_err();
        assert!(matches!(err, RvError::Validation(_)));
        assert!(store.get(project.id).unwrap().payments.is_empty());
    }

    #[test]
    fn test_payment_ids_are_unique_across_projects() {
        let mut store = store();
        let a = store.create(draft("A", 100)).unwrap();
        let b = store.create(draft("B", 100)).unwrap();

        let a = store.add_payment(a.id, pay(10)).unwrap();
        let b = store.add_payment(b.id, pay(10)).unwrap();
        assert_ne!(a.payments[0].id, b.payments[0].id);
        assert_eq!(store.find_payment_owner(b.payments[0].id), Some(b.id));
        assert_eq!(store.find_payment_owner(999), None);
    }

    #[test]
    fn test_replace_all_is_all_or_nothing() {
        let mut store = store();
        store.create(draft("Existing", 100)).unwrap();
        let before = store.snapshot();

        let bad = vec![
            Project::new(1, "Fine", Decimal::from(10)),
            Project::new(2, "", Decimal::from(10)),
        ];
        let err = store.replace_all(bad).unwrap_err();
        assert!(matches!(err, RvError::Format(_)));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_replace_all_rejects_largest_id() {
        let mut store = store();
        store.create(draft("Existing", 100)).unwrap();
        let before = store.snapshot();

        let err = store
            .replace_all(vec![Project::new(Id::MAX, "A", Decimal::from(1))])
            .unwrap_err();
        assert!(matches!(err, RvError::Format(_)));
        assert_eq!(store.snapshot(), before);

        let created = store.create(draft("Next", 1)).unwrap();
        assert_eq!(created.id, 2);
    }

    #[test]
    fn test_upsert_rejects_largest_payment_id() {
        let mut store = store();
        let mut remote = Project::new(5, "Remote", Decimal::from(10));
        remote.payments.push(Payment::new(Id::MAX, date(2024, 1, 1), Decimal::ONE));

        assert!(matches!(store.upsert(remote).unwrap_err(), RvError::Format(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_overflowing_payment_is_rejected() {
        let mut store = store();
        let project = store.create(CreateProjectDto::new("Huge", Decimal::MAX)).unwrap();
        let half = Decimal::from_i128_with_scale(5 * 10i128.pow(28), 0);
        let huge = || NewPayment::new(date(2024, 5, 1), half);

        let first = store.add_payment(project.id, huge()).unwrap();
        let err = store.add_payment(project.id, huge()).unwrap_err();
        assert!(matches!(err, RvError::Validation(_)));
        assert_eq!(store.get(project.id).unwrap(), &first);

        let next = store.add_payment(project.id, pay(1)).unwrap();
        assert_eq!(next.payments[1].id, first.payments[0].id + 1);
        assert!(crate::export_json(store.list()).is_ok());
    }

    #[test]
    fn test_replace_all_keeps_ids_unique_afterwards() {
        let mut store = store();
        let mut imported = Project::new(50, "Imported", Decimal::from(100));
        imported.payments.push(Payment::new(70, date(2024, 1, 1), Decimal::from(5)));
        store.replace_all(vec![imported]).unwrap();

        let created = store.create(draft("New", 10)).unwrap();
        assert!(created.id > 50);
        let updated = store.add_payment(created.id, pay(1)).unwrap();
        assert!(updated.payments[0].id > 70);
    }

    #[test]
    fn test_upsert_replaces_or_prepends() {
        let mut store = store();
        let a = store.create(draft("A", 100)).unwrap();

        let mut renamed = a.clone();
        renamed.name = "A2".to_string();
        store.upsert(renamed).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(a.id).unwrap().name, "A2");

        store.upsert(Project::new(77, "Remote", Decimal::from(5))).unwrap();
        assert_eq!(store.list()[0].id, 77);
        assert!(store.create(draft("Next", 1)).unwrap().id > 77);
    }
}

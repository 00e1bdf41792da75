//! Manage Objectives Use Case
//!
//! Administration of sales objectives: creation (individual or fleet-wide),
//! revision, activation toggling, removal, and the year-grouped listing the
//! back office browses.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::{
    CreateObjectiveRequest, ObjectiveDto, ObjectivesByYearDto, UpdateObjectiveRequest,
};
use crate::application::ports::DirectoryPort;
use crate::domain::objectives::{ObjectiveError, ObjectiveRepository, SalesObjective};
use crate::domain::shared::{DateWindow, Money, ObjectiveId, UserId};

/// Use case administering sales objectives.
pub struct ManageObjectivesUseCase<B, D>
where
    B: ObjectiveRepository,
    D: DirectoryPort,
{
    objectives: Arc<B>,
    directory: Arc<D>,
}

impl<B, D> ManageObjectivesUseCase<B, D>
where
    B: ObjectiveRepository,
    D: DirectoryPort,
{
    /// Create a new use case.
    pub const fn new(objectives: Arc<B>, directory: Arc<D>) -> Self {
        Self {
            objectives,
            directory,
        }
    }

    /// Create an objective assigned to one rep.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::Validation`] without a rep or with an
    /// inconsistent category/percentage pair, and
    /// [`ObjectiveError::NotFound`] if the rep does not resolve.
    pub async fn create_individual(
        &self,
        request: CreateObjectiveRequest,
    ) -> Result<ObjectiveDto, ObjectiveError> {
        let rep = request
            .sales_rep
            .as_deref()
            .ok_or_else(|| ObjectiveError::Validation {
                message: "a sales rep is required for an individual objective".to_string(),
            })?;
        let rep_id = UserId::new(rep);
        self.directory
            .find_user(&rep_id)
            .await?
            .ok_or_else(|| ObjectiveError::NotFound {
                entity: "user".to_string(),
                id: rep_id.to_string(),
            })?;

        let mut objective = SalesObjective::individual(
            rep_id,
            Money::new(request.target_amount),
            Money::new(request.bonus),
            request.mission.clone(),
            DateWindow::new(request.starts_at, request.ends_at),
        )?;
        apply_category(&mut objective, &request)?;

        self.objectives.insert(&objective).await?;
        info!(objective = %objective.id(), rep, "objective created");
        Ok(ObjectiveDto::from_objective(&objective))
    }

    /// Create a fleet-wide objective with no assigned rep.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::Validation`] for an inverted window or a
    /// non-positive target.
    pub async fn create_global(
        &self,
        request: CreateObjectiveRequest,
    ) -> Result<ObjectiveDto, ObjectiveError> {
        let mut objective = SalesObjective::global(
            Money::new(request.target_amount),
            Money::new(request.bonus),
            request.mission.clone(),
            DateWindow::new(request.starts_at, request.ends_at),
        )?;
        apply_category(&mut objective, &request)?;

        self.objectives.insert(&objective).await?;
        info!(objective = %objective.id(), "fleet objective created");
        Ok(ObjectiveDto::from_objective(&objective))
    }

    /// Flip an objective's active flag.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NotFound`] if the objective does not exist.
    pub async fn toggle(&self, id: &str) -> Result<ObjectiveDto, ObjectiveError> {
        let mut objective = self.load(id).await?;
        objective.toggle_active();
        self.objectives.update(&objective).await?;

        info!(objective = %objective.id(), active = objective.is_active(), "objective toggled");
        Ok(ObjectiveDto::from_objective(&objective))
    }

    /// Revise an objective's target, bonus, mission, or window.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NotFound`] if the objective does not exist
    /// and [`ObjectiveError::Validation`] for an invalid revision.
    pub async fn update(
        &self,
        id: &str,
        request: UpdateObjectiveRequest,
    ) -> Result<ObjectiveDto, ObjectiveError> {
        let mut objective = self.load(id).await?;

        let current = objective.window();
        let window = match (request.starts_at, request.ends_at) {
            (None, None) => None,
            (starts, ends) => Some(DateWindow::new(
                starts.unwrap_or(current.starts_at),
                ends.unwrap_or(current.ends_at),
            )),
        };
        objective.revise(
            request.target_amount.map(Money::new),
            request.bonus.map(Money::new),
            request.mission,
            window,
        )?;
        self.objectives.update(&objective).await?;

        info!(objective = %objective.id(), "objective revised");
        Ok(ObjectiveDto::from_objective(&objective))
    }

    /// Remove an objective.
    ///
    /// # Errors
    ///
    /// Returns [`ObjectiveError::NotFound`] if the objective does not exist.
    pub async fn remove(&self, id: &str) -> Result<(), ObjectiveError> {
        self.objectives.delete(&ObjectiveId::new(id)).await?;
        info!(objective = id, "objective removed");
        Ok(())
    }

    /// All objectives grouped by the calendar year their window starts in,
    /// most recent year first.
    ///
    /// # Errors
    ///
    /// Returns error if the store query fails.
    pub async fn list_by_year(&self) -> Result<Vec<ObjectivesByYearDto>, ObjectiveError> {
        let mut objectives = self.objectives.list_all().await?;
        objectives.sort_by(|a, b| b.window().starts_at.cmp(&a.window().starts_at));

        let mut years: Vec<ObjectivesByYearDto> = Vec::new();
        for objective in &objectives {
            let year = objective.window().starts_at.year();
            let dto = ObjectiveDto::from_objective(objective);
            match years.iter_mut().find(|group| group.year == year) {
                Some(group) => group.objectives.push(dto),
                None => years.push(ObjectivesByYearDto {
                    year,
                    objectives: vec![dto],
                }),
            }
        }
        years.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(years)
    }

    async fn load(&self, id: &str) -> Result<SalesObjective, ObjectiveError> {
        let id = ObjectiveId::new(id);
        self.objectives
            .find_by_id(&id)
            .await?
            .ok_or_else(|| ObjectiveError::NotFound {
                entity: "objective".to_string(),
                id: id.to_string(),
            })
    }
}

/// Apply the optional category goal settings from a creation request.
fn apply_category(
    objective: &mut SalesObjective,
    request: &CreateObjectiveRequest,
) -> Result<(), ObjectiveError> {
    match (&request.category, request.target_percentage) {
        (Some(category), Some(percentage)) => objective.set_category_target(category, percentage),
        (Some(_), None) => Err(ObjectiveError::Validation {
            message: "a percentage target is required for a category goal".to_string(),
        }),
        (None, Some(_)) => Err(ObjectiveError::Validation {
            message: "a category is required for a percentage target".to_string(),
        }),
        (None, None) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{User, UserRole};
    use crate::domain::shared::Timestamp;
    use crate::infrastructure::persistence::InMemoryObjectiveRepository;
    use crate::infrastructure::reference::InMemoryDirectory;
    use rust_decimal_macros::dec;

    fn fixtures() -> (Arc<InMemoryObjectiveRepository>, Arc<InMemoryDirectory>) {
        let objectives = Arc::new(InMemoryObjectiveRepository::new());
        let directory = Arc::new(InMemoryDirectory::new());
        directory.add_user(User {
            id: UserId::new("rep-1"),
            first_name: "Nadia".to_string(),
            last_name: "Ben Salah".to_string(),
            email: "nadia@comptoir.test".to_string(),
            role: UserRole::SalesRep,
            active: true,
        });
        (objectives, directory)
    }

    fn request(rep: Option<&str>) -> CreateObjectiveRequest {
        CreateObjectiveRequest {
            sales_rep: rep.map(str::to_string),
            target_amount: dec!(5000),
            bonus: dec!(250),
            mission: Some("Q1 push".to_string()),
            starts_at: Timestamp::parse("2025-01-01T00:00:00Z").unwrap(),
            ends_at: Timestamp::parse("2025-03-31T23:59:59Z").unwrap(),
            category: None,
            target_percentage: None,
        }
    }

    #[tokio::test]
    async fn create_individual_requires_and_resolves_rep() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let dto = use_case.create_individual(request(Some("rep-1"))).await.unwrap();
        assert_eq!(dto.sales_rep.as_deref(), Some("rep-1"));
        assert_eq!(dto.target_amount, dec!(5000));
        assert!(dto.active);

        assert!(matches!(
            use_case.create_individual(request(None)).await,
            Err(ObjectiveError::Validation { .. })
        ));
        assert!(matches!(
            use_case.create_individual(request(Some("rep-9"))).await,
            Err(ObjectiveError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn create_global_has_no_rep() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let dto = use_case.create_global(request(None)).await.unwrap();
        assert!(dto.sales_rep.is_none());
    }

    #[tokio::test]
    async fn category_goal_needs_both_fields() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let mut req = request(Some("rep-1"));
        req.category = Some("grocery".to_string());
        assert!(matches!(
            use_case.create_individual(req).await,
            Err(ObjectiveError::Validation { .. })
        ));

        let mut req = request(Some("rep-1"));
        req.target_percentage = Some(dec!(40));
        assert!(matches!(
            use_case.create_individual(req).await,
            Err(ObjectiveError::Validation { .. })
        ));

        let mut req = request(Some("rep-1"));
        req.category = Some("grocery".to_string());
        req.target_percentage = Some(dec!(40));
        let dto = use_case.create_individual(req).await.unwrap();
        assert_eq!(dto.category.as_deref(), Some("grocery"));
        assert_eq!(dto.target_percentage, Some(dec!(40)));
    }

    #[tokio::test]
    async fn toggle_flips_and_persists() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(Arc::clone(&objectives), directory);

        let created = use_case.create_individual(request(Some("rep-1"))).await.unwrap();
        let toggled = use_case.toggle(&created.id).await.unwrap();
        assert!(!toggled.active);

        let stored = objectives
            .find_by_id(&ObjectiveId::new(created.id.as_str()))
            .await
            .unwrap()
            .unwrap();
        assert!(!stored.is_active());
    }

    #[tokio::test]
    async fn update_revises_named_fields() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let created = use_case.create_individual(request(Some("rep-1"))).await.unwrap();
        let revised = use_case
            .update(
                &created.id,
                UpdateObjectiveRequest {
                    target_amount: Some(dec!(7500)),
                    ends_at: Some(Timestamp::parse("2025-06-30T23:59:59Z").unwrap()),
                    ..UpdateObjectiveRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(revised.target_amount, dec!(7500));
        assert_eq!(revised.bonus, dec!(250));
        assert_eq!(revised.mission, "Q1 push");
        assert_eq!(revised.starts_at, created.starts_at);
        assert_eq!(
            revised.ends_at,
            Timestamp::parse("2025-06-30T23:59:59Z").unwrap()
        );
    }

    #[tokio::test]
    async fn remove_deletes_or_reports_missing() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let created = use_case.create_individual(request(Some("rep-1"))).await.unwrap();
        use_case.remove(&created.id).await.unwrap();

        assert!(matches!(
            use_case.remove(&created.id).await,
            Err(ObjectiveError::NotFound { .. })
        ));
        assert!(matches!(
            use_case.toggle(&created.id).await,
            Err(ObjectiveError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn listing_groups_by_start_year_descending() {
        let (objectives, directory) = fixtures();
        let use_case = ManageObjectivesUseCase::new(objectives, directory);

        let mut early = request(Some("rep-1"));
        early.starts_at = Timestamp::parse("2024-01-01T00:00:00Z").unwrap();
        early.ends_at = Timestamp::parse("2024-06-30T23:59:59Z").unwrap();
        use_case.create_individual(early).await.unwrap();
        use_case.create_individual(request(Some("rep-1"))).await.unwrap();
        use_case.create_global(request(None)).await.unwrap();

        let years = use_case.list_by_year().await.unwrap();
        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2025);
        assert_eq!(years[0].objectives.len(), 2);
        assert_eq!(years[1].year, 2024);
        assert_eq!(years[1].objectives.len(), 1);
    }
}

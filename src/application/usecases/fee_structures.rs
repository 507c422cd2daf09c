use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::domain::{
    entities::{
        fee_catalog::{FeeCatalogEntryEntity, UpsertFeeCatalogEntryEntity},
        fee_structures::InsertFeeStructureEntity,
        profiles::ProfileEntity,
    },
    repositories::{
        accounts::AccountRepository, fee_catalog::FeeCatalogRepository,
        fee_structures::FeeStructureRepository,
    },
    value_objects::{
        enums::roles::UserRole,
        fee_structures::{
            AssignFeeStructureModel, FeeCatalogEntryModel, FeeStructureModel,
            UpsertFeeCatalogModel,
        },
    },
};

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Student not found")]
    StudentNotFound,
    #[error("Fee structures can only be assigned to student accounts")]
    NotAStudent,
    #[error("No fee catalog entry for the student's program and level")]
    NoCatalogEntry,
    #[error("No fee structure assigned")]
    NoFeeStructure,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl FeeError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            FeeError::StudentNotFound | FeeError::NoCatalogEntry | FeeError::NoFeeStructure => {
                StatusCode::NOT_FOUND
            }
            FeeError::NotAStudent => StatusCode::BAD_REQUEST,
            FeeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub struct FeeStructureUseCase<A, C, F>
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    fee_catalog_repo: Arc<C>,
    fee_structure_repo: Arc<F>,
}

impl<A, C, F> FeeStructureUseCase<A, C, F>
where
    A: AccountRepository + Send + Sync + 'static,
    C: FeeCatalogRepository + Send + Sync + 'static,
    F: FeeStructureRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, fee_catalog_repo: Arc<C>, fee_structure_repo: Arc<F>) -> Self {
        Self {
            account_repo,
            fee_catalog_repo,
            fee_structure_repo,
        }
    }

    pub async fn upsert_catalog_entry(
        &self,
        model: UpsertFeeCatalogModel,
    ) -> Result<FeeCatalogEntryModel, FeeError> {
        let entry = self
            .fee_catalog_repo
            .upsert(UpsertFeeCatalogEntryEntity {
                program: model.program,
                level: model.level,
                tuition_minor: model.tuition_minor,
                hostel_minor: model.hostel_minor,
                other_minor: model.other_minor,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
            .await
            .map_err(FeeError::Internal)?;

        info!(program = %entry.program, level = %entry.level, "fees: catalog entry upserted");
        Ok(entry.into())
    }

    pub async fn get_catalog_entry(
        &self,
        program: &str,
        level: &str,
    ) -> Result<FeeCatalogEntryModel, FeeError> {
        self.fee_catalog_repo
            .find(program, level)
            .await
            .map_err(FeeError::Internal)?
            .map(FeeCatalogEntryModel::from)
            .ok_or(FeeError::NoCatalogEntry)
    }

    /// Assigns a new fee-structure snapshot to a student. Amounts omitted by
    /// the admin fall back to the catalog entry for the student's program and
    /// level; the snapshot total is always recomputed from the category
    /// amounts.
    pub async fn assign_structure(
        &self,
        model: AssignFeeStructureModel,
    ) -> Result<FeeStructureModel, FeeError> {
        let student = self
            .account_repo
            .find_by_student_id(&model.student_id)
            .await
            .map_err(FeeError::Internal)?
            .ok_or(FeeError::StudentNotFound)?;

        if UserRole::from_str(&student.role) != Some(UserRole::Student) {
            return Err(FeeError::NotAStudent);
        }

        let needs_catalog =
            model.tuition_minor.is_none() || model.hostel_minor.is_none() || model.other_minor.is_none();
        let catalog_entry = if needs_catalog {
            Some(self.catalog_defaults_for(student.id).await?)
        } else {
            None
        };

        let tuition_minor = model
            .tuition_minor
            .or_else(|| catalog_entry.as_ref().map(|entry| entry.tuition_minor))
            .unwrap_or(0);
        let hostel_minor = model
            .hostel_minor
            .or_else(|| catalog_entry.as_ref().map(|entry| entry.hostel_minor))
            .unwrap_or(0);
        let other_minor = model
            .other_minor
            .or_else(|| catalog_entry.as_ref().map(|entry| entry.other_minor))
            .unwrap_or(0);

        let insert = InsertFeeStructureEntity::new(
            student.id,
            model.academic_year,
            tuition_minor,
            hostel_minor,
            other_minor,
            model.tuition_due_date,
            model.hostel_due_date,
            model.other_due_date,
        );

        let structure = self.fee_structure_repo.insert(insert).await.map_err(|err| {
            error!(user_id = %student.id, db_error = ?err, "fees: failed to insert fee structure");
            FeeError::Internal(err)
        })?;

        info!(
            user_id = %student.id,
            academic_year = %structure.academic_year,
            total_fee_minor = structure.total_fee_minor,
            "fees: fee structure assigned"
        );

        Ok(structure.into())
    }

    pub async fn current_structure(&self, user_id: Uuid) -> Result<FeeStructureModel, FeeError> {
        self.fee_structure_repo
            .latest_for_user(user_id)
            .await
            .map_err(FeeError::Internal)?
            .map(FeeStructureModel::from)
            .ok_or(FeeError::NoFeeStructure)
    }

    pub async fn structure_history(&self, user_id: Uuid) -> Result<Vec<FeeStructureModel>, FeeError> {
        let structures = self
            .fee_structure_repo
            .list_for_user(user_id)
            .await
            .map_err(FeeError::Internal)?;

        Ok(structures.into_iter().map(FeeStructureModel::from).collect())
    }

    async fn catalog_defaults_for(&self, user_id: Uuid) -> Result<FeeCatalogEntryEntity, FeeError> {
        let profile = self
            .account_repo
            .find_profile(user_id)
            .await
            .map_err(FeeError::Internal)?;

        let Some(ProfileEntity::Student(student_profile)) = profile else {
            return Err(FeeError::NoCatalogEntry);
        };

        self.fee_catalog_repo
            .find(&student_profile.program, &student_profile.level)
            .await
            .map_err(FeeError::Internal)?
            .ok_or(FeeError::NoCatalogEntry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            fee_catalog::FeeCatalogEntryEntity,
            fee_structures::FeeStructureEntity,
            profiles::{ProfileEntity, StudentProfileEntity},
            users::UserEntity,
        },
        repositories::{
            accounts::MockAccountRepository, fee_catalog::MockFeeCatalogRepository,
            fee_structures::MockFeeStructureRepository,
        },
    };

    fn student_entity() -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            email: Some("alice@example.com".to_string()),
            student_id: Some("ST1234".to_string()),
            full_name: "Alice Student".to_string(),
            phone_number: "0123456789".to_string(),
            password_hash: "hash".to_string(),
            role: "student".to_string(),
            status: "active".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog_entry() -> FeeCatalogEntryEntity {
        FeeCatalogEntryEntity {
            id: 1,
            program: "Computer Science".to_string(),
            level: "200".to_string(),
            tuition_minor: 1000_00,
            hostel_minor: 400_00,
            other_minor: 50_00,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn inserted(insert: InsertFeeStructureEntity) -> FeeStructureEntity {
        FeeStructureEntity {
            id: 7,
            user_id: insert.user_id,
            academic_year: insert.academic_year,
            tuition_minor: insert.tuition_minor,
            hostel_minor: insert.hostel_minor,
            other_minor: insert.other_minor,
            tuition_due_date: insert.tuition_due_date,
            hostel_due_date: insert.hostel_due_date,
            other_due_date: insert.other_due_date,
            total_fee_minor: insert.total_fee_minor,
            created_at: insert.created_at,
        }
    }

    fn assignment() -> AssignFeeStructureModel {
        AssignFeeStructureModel {
            student_id: "ST1234".to_string(),
            academic_year: "2025/2026".to_string(),
            tuition_minor: None,
            hostel_minor: None,
            other_minor: None,
            tuition_due_date: None,
            hostel_due_date: None,
            other_due_date: None,
        }
    }

    #[tokio::test]
    async fn assign_with_explicit_amounts_recomputes_total() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(|_| Ok(Some(student_entity())));

        let mut fee_structure_repo = MockFeeStructureRepository::new();
        fee_structure_repo
            .expect_insert()
            .withf(|insert| insert.total_fee_minor == 1450_00)
            .times(1)
            .returning(|insert| Ok(inserted(insert)));

        let usecase = FeeStructureUseCase::new(
            Arc::new(account_repo),
            Arc::new(MockFeeCatalogRepository::new()),
            Arc::new(fee_structure_repo),
        );

        let mut model = assignment();
        model.tuition_minor = Some(1000_00);
        model.hostel_minor = Some(400_00);
        model.other_minor = Some(50_00);

        let structure = usecase
            .assign_structure(model)
            .await
            .expect("assignment should succeed");

        assert_eq!(structure.total_fee_minor, 1450_00);
    }

    #[tokio::test]
    async fn assign_falls_back_to_catalog_defaults() {
        let entity = student_entity();
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(move |_| Ok(Some(entity.clone())));
        account_repo.expect_find_profile().returning(move |_| {
            Ok(Some(ProfileEntity::Student(StudentProfileEntity {
                id: 1,
                user_id,
                program: "Computer Science".to_string(),
                level: "200".to_string(),
                status: "active".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })))
        });

        let mut fee_catalog_repo = MockFeeCatalogRepository::new();
        fee_catalog_repo
            .expect_find()
            .withf(|program, level| program == "Computer Science" && level == "200")
            .times(1)
            .returning(|_, _| Ok(Some(catalog_entry())));

        let mut fee_structure_repo = MockFeeStructureRepository::new();
        fee_structure_repo
            .expect_insert()
            .withf(|insert| {
                insert.tuition_minor == 1000_00
                    && insert.hostel_minor == 400_00
                    && insert.other_minor == 50_00
                    && insert.total_fee_minor == 1450_00
            })
            .times(1)
            .returning(|insert| Ok(inserted(insert)));

        let usecase = FeeStructureUseCase::new(
            Arc::new(account_repo),
            Arc::new(fee_catalog_repo),
            Arc::new(fee_structure_repo),
        );

        let structure = usecase
            .assign_structure(assignment())
            .await
            .expect("assignment should fall back to catalog");

        assert_eq!(structure.total_fee_minor, 1450_00);
    }

    #[tokio::test]
    async fn assign_partial_override_keeps_catalog_for_the_rest() {
        let entity = student_entity();
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(move |_| Ok(Some(entity.clone())));
        account_repo.expect_find_profile().returning(move |_| {
            Ok(Some(ProfileEntity::Student(StudentProfileEntity {
                id: 1,
                user_id,
                program: "Computer Science".to_string(),
                level: "200".to_string(),
                status: "active".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })))
        });

        let mut fee_catalog_repo = MockFeeCatalogRepository::new();
        fee_catalog_repo
            .expect_find()
            .returning(|_, _| Ok(Some(catalog_entry())));

        let mut fee_structure_repo = MockFeeStructureRepository::new();
        fee_structure_repo
            .expect_insert()
            .withf(|insert| {
                insert.tuition_minor == 1200_00
                    && insert.hostel_minor == 400_00
                    && insert.total_fee_minor == 1650_00
            })
            .times(1)
            .returning(|insert| Ok(inserted(insert)));

        let usecase = FeeStructureUseCase::new(
            Arc::new(account_repo),
            Arc::new(fee_catalog_repo),
            Arc::new(fee_structure_repo),
        );

        let mut model = assignment();
        model.tuition_minor = Some(1200_00);

        usecase
            .assign_structure(model)
            .await
            .expect("partial override should succeed");
    }

    #[tokio::test]
    async fn assign_to_unknown_student_fails() {
        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(|_| Ok(None));

        let usecase = FeeStructureUseCase::new(
            Arc::new(account_repo),
            Arc::new(MockFeeCatalogRepository::new()),
            Arc::new(MockFeeStructureRepository::new()),
        );

        let err = usecase
            .assign_structure(assignment())
            .await
            .expect_err("unknown student must fail");

        assert!(matches!(err, FeeError::StudentNotFound));
    }

    #[tokio::test]
    async fn assign_without_catalog_entry_fails() {
        let entity = student_entity();
        let user_id = entity.id;

        let mut account_repo = MockAccountRepository::new();
        account_repo
            .expect_find_by_student_id()
            .returning(move |_| Ok(Some(entity.clone())));
        account_repo.expect_find_profile().returning(move |_| {
            Ok(Some(ProfileEntity::Student(StudentProfileEntity {
                id: 1,
                user_id,
                program: "History".to_string(),
                level: "100".to_string(),
                status: "active".to_string(),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })))
        });

        let mut fee_catalog_repo = MockFeeCatalogRepository::new();
        fee_catalog_repo.expect_find().returning(|_, _| Ok(None));

        let usecase = FeeStructureUseCase::new(
            Arc::new(account_repo),
            Arc::new(fee_catalog_repo),
            Arc::new(MockFeeStructureRepository::new()),
        );

        let err = usecase
            .assign_structure(assignment())
            .await
            .expect_err("missing catalog entry must fail");

        assert!(matches!(err, FeeError::NoCatalogEntry));
    }

    #[tokio::test]
    async fn current_structure_requires_an_assignment() {
        let mut fee_structure_repo = MockFeeStructureRepository::new();
        fee_structure_repo
            .expect_latest_for_user()
            .returning(|_| Ok(None));

        let usecase = FeeStructureUseCase::new(
            Arc::new(MockAccountRepository::new()),
            Arc::new(MockFeeCatalogRepository::new()),
            Arc::new(fee_structure_repo),
        );

        let err = usecase
            .current_structure(Uuid::new_v4())
            .await
            .expect_err("must fail without a snapshot");

        assert!(matches!(err, FeeError::NoFeeStructure));
    }
}

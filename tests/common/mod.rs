use chrono::{TimeZone, Utc};
use filtercrate::SoftDeleteResource;
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Schema, Set};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub login_count: i32,
    pub is_verified: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTimeUtc>,
    pub deleted_by: Option<Uuid>,
    #[sea_orm(column_type = "Text", nullable)]
    pub deletion_reason: Option<String>,
    pub created_at: DateTimeUtc,
    pub settings: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Soft-delete wiring for the test users table.
pub struct Users;

#[async_trait::async_trait]
impl SoftDeleteResource for Users {
    type EntityType = Entity;
    type ColumnType = Column;

    const ID_COLUMN: Column = Column::Id;
    const IS_DELETED_COLUMN: Column = Column::IsDeleted;
    const DELETED_AT_COLUMN: Column = Column::DeletedAt;
    const DELETED_BY_COLUMN: Column = Column::DeletedBy;
    const DELETION_REASON_COLUMN: Column = Column::DeletionReason;
    const RESOURCE_NAME: &'static str = "user";

    fn is_deleted(model: &Model) -> bool {
        model.is_deleted
    }
}

pub async fn setup_test_db() -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect("sqlite::memory:").await?;
    let schema = Schema::new(db.get_database_backend());
    let stmt = schema.create_table_from_entity(Entity);
    db.execute(db.get_database_backend().build(&stmt)).await?;
    Ok(db)
}

/// Four users: three Active (one unverified, one with mixed-case name) and
/// one already soft-deleted.
pub async fn seed_users(db: &DatabaseConnection) -> Result<(), DbErr> {
    let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();

    let rows = [
        ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("trish_ward".to_owned()),
            email: Set("trish@example.com".to_owned()),
            bio: Set(Some("gardener".to_owned())),
            login_count: Set(12),
            is_verified: Set(true),
            is_deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
            deletion_reason: Set(None),
            created_at: Set(base),
            settings: Set(serde_json::json!({"theme": "dark"})),
        },
        ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("john_doe".to_owned()),
            email: Set("john@example.com".to_owned()),
            bio: Set(None),
            login_count: Set(3),
            is_verified: Set(false),
            is_deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
            deletion_reason: Set(None),
            created_at: Set(base + chrono::Duration::days(1)),
            settings: Set(serde_json::json!({})),
        },
        ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("Alice_Smith".to_owned()),
            email: Set("alice@example.com".to_owned()),
            bio: Set(Some("climber".to_owned())),
            login_count: Set(7),
            is_verified: Set(true),
            is_deleted: Set(false),
            deleted_at: Set(None),
            deleted_by: Set(None),
            deletion_reason: Set(None),
            created_at: Set(base + chrono::Duration::days(2)),
            settings: Set(serde_json::json!({})),
        },
        ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set("bob_jones".to_owned()),
            email: Set("bob@example.com".to_owned()),
            bio: Set(None),
            login_count: Set(0),
            is_verified: Set(true),
            is_deleted: Set(true),
            deleted_at: Set(Some(base + chrono::Duration::days(3))),
            deleted_by: Set(Some(Uuid::new_v4())),
            deletion_reason: Set(Some("spam account".to_owned())),
            created_at: Set(base + chrono::Duration::days(3)),
            settings: Set(serde_json::json!({})),
        },
    ];

    for row in rows {
        row.insert(db).await?;
    }
    Ok(())
}

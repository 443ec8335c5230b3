use async_trait::async_trait;
use mongodb::{
    bson::{doc, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::User,
    repositories::is_duplicate_key,
};

/// 사용자 변경 가능 필드. `None` 인 필드는 건드리지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub is_active: Option<bool>,
    pub is_admin: Option<bool>,
}

impl UserUpdate {
    pub fn activate() -> Self {
        Self {
            is_active: Some(true),
            ..Default::default()
        }
    }

    pub fn apply(&self, user: &mut User) {
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
        user.updated_at = DateTime::now();
    }

    fn to_document(&self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(is_active) = self.is_active {
            set.insert("is_active", is_active);
        }
        if let Some(is_admin) = self.is_admin {
            set.insert("is_admin", is_admin);
        }
        set
    }
}

/// 사용자 저장소
///
/// `active_only` 가 `true` 이면 활성 사용자만 조회합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn find_by_username(&self, username: &str, active_only: bool) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str, active_only: bool) -> AppResult<Option<User>>;

    /// 사용자명 또는 이메일이 이미 있으면 `ConflictError`
    async fn insert(&self, user: User) -> AppResult<User>;

    async fn update_fields(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>>;
}

/// MongoDB `users` 컬렉션 기반 구현
pub struct UserRepository {
    collection: Collection<User>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    /// 컬렉션 핸들을 만들고 유니크 인덱스를 보장합니다.
    pub async fn new(database: &Database) -> AppResult<Self> {
        let repository = Self {
            collection: database.get_database().collection(Self::COLLECTION),
        };
        repository.create_indexes().await?;
        Ok(repository)
    }

    fn filter(field: &str, value: &str, active_only: bool) -> Document {
        let mut filter = Document::new();
        filter.insert(field, value);
        if active_only {
            filter.insert("is_active", true);
        }
        filter
    }

    /// 인덱스 생성
    ///
    /// - email (unique)
    /// - username (unique)
    /// - created_at (desc)
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([email_index, username_index, created_at_index])
            .await?;

        Ok(())
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_username(&self, username: &str, active_only: bool) -> AppResult<Option<User>> {
        Ok(self
            .collection
            .find_one(Self::filter("username", username, active_only))
            .await?)
    }

    async fn find_by_email(&self, email: &str, active_only: bool) -> AppResult<Option<User>> {
        Ok(self
            .collection
            .find_one(Self::filter("email", email, active_only))
            .await?)
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        if self.find_by_email(&user.email, false).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        if self.find_by_username(&user.username, false).await?.is_some() {
            return Err(AppError::ConflictError("이미 사용 중인 사용자명입니다".to_string()));
        }

        self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::ConflictError("이미 사용 중인 사용자명 또는 이메일입니다".to_string())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(user)
    }

    async fn update_fields(&self, id: &str, update: UserUpdate) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": update.to_document() })
            .with_options(options)
            .await?)
    }
}

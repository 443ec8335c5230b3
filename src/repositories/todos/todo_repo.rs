use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};
use crate::{
    core::errors::{AppError, AppResult},
    db::Database,
    domain::entities::TodoItem,
    repositories::is_duplicate_key,
};

/// 할 일 저장소
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// 사용자의 할 일 목록 (최신순)
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TodoItem>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TodoItem>>;

    async fn find_by_title(&self, user_id: &str, title: &str) -> AppResult<Option<TodoItem>>;

    async fn insert(&self, item: TodoItem) -> AppResult<TodoItem>;

    /// 전체 문서를 교체합니다. 대상이 없으면 `false`.
    async fn replace(&self, item: &TodoItem) -> AppResult<bool>;

    async fn delete(&self, id: &str) -> AppResult<bool>;
}

/// MongoDB `todo_items` 컬렉션 기반 구현
pub struct TodoRepository {
    collection: Collection<TodoItem>,
}

impl TodoRepository {
    pub const COLLECTION: &'static str = "todo_items";

    pub async fn new(database: &Database) -> AppResult<Self> {
        let repository = Self {
            collection: database.get_database().collection(Self::COLLECTION),
        };
        repository.create_indexes().await?;
        Ok(repository)
    }

    /// 인덱스 생성
    ///
    /// - (user_id, title) unique
    /// - (user_id, created_at desc)
    pub async fn create_indexes(&self) -> AppResult<()> {
        let title_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "title": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_title_unique".to_string())
                .build())
            .build();

        let listing_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder()
                .name("user_created_at_desc".to_string())
                .build())
            .build();

        self.collection
            .create_indexes([title_index, listing_index])
            .await?;

        Ok(())
    }

    fn map_write_error(e: mongodb::error::Error) -> AppError {
        if is_duplicate_key(&e) {
            AppError::BadRequest("같은 제목의 할 일이 이미 있습니다".to_string())
        } else {
            AppError::from(e)
        }
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<TodoItem>> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .with_options(options)
            .await?;

        Ok(cursor.try_collect().await?)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<TodoItem>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn find_by_title(&self, user_id: &str, title: &str) -> AppResult<Option<TodoItem>> {
        Ok(self
            .collection
            .find_one(doc! { "user_id": user_id, "title": title })
            .await?)
    }

    async fn insert(&self, item: TodoItem) -> AppResult<TodoItem> {
        self.collection
            .insert_one(&item)
            .await
            .map_err(Self::map_write_error)?;

        Ok(item)
    }

    async fn replace(&self, item: &TodoItem) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": item.id.as_str() }, item)
            .await
            .map_err(Self::map_write_error)?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

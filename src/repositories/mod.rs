//! # Repository Layer
//!
//! 영속 계층 추상화입니다. 서비스는 [`UserStore`] / [`TodoStore`] 트레이트에만
//! 의존하고, 실행 시에는 MongoDB 구현이, 테스트에서는 인-메모리 구현이 주입됩니다.
//!
//! | Spring Data | 이 모듈 |
//! |-------------|---------|
//! | `UserRepository extends MongoRepository` | `UserStore` + `UserRepository` |
//! | `TodoRepository extends MongoRepository` | `TodoStore` + `TodoRepository` |
//! | `@Indexed(unique = true)` | `create_indexes()` |

pub mod users;
pub mod todos;

pub use users::{UserRepository, UserStore, UserUpdate};
pub use todos::{TodoRepository, TodoStore};

use mongodb::error::{Error, ErrorKind, WriteFailure};

/// MongoDB 중복 키(11000) 에러 여부
pub(crate) fn is_duplicate_key(error: &Error) -> bool {
    matches!(
        error.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == 11000
    )
}

//! # 회원 리포지토리 (MongoDB)
//!
//! 검증된 `(provider, provider_id)` 쌍을 내부 정수 회원 ID로 매핑합니다.
//!
//! ## 저장 구조
//!
//! - `members` 컬렉션: `{ _id: i64, provider, provider_id, created_at }`,
//!   `(provider, provider_id)` 유니크 인덱스
//! - `counters` 컬렉션: `{ _id: "member_id", seq: i64 }` 회원 ID 시퀀스
//!
//! ## 동시 가입
//!
//! 같은 계정으로 두 요청이 동시에 처음 로그인하면 둘 다 삽입을 시도할 수 있습니다.
//! 유니크 인덱스가 한쪽을 중복 키(11000)로 거부하고, 거부된 쪽은 먼저 저장된
//! 회원을 다시 읽어 같은 ID를 돌려줍니다. 이때 소모된 시퀀스 값은 건너뜁니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use super::MemberResolver;
use crate::config::AuthProvider;
use crate::db::Database;
use crate::domain::entities::Member;
use crate::errors::{AppError, AppResult};

const MEMBERS: &str = "members";
const COUNTERS: &str = "counters";
const MEMBER_SEQUENCE: &str = "member_id";
const DUPLICATE_KEY: i32 = 11000;

fn is_duplicate_key(err: &MongoError) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}

pub struct MemberRepository {
    db: Arc<Database>,
}

impl MemberRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn members(&self) -> Collection<Member> {
        self.db.get_database().collection::<Member>(MEMBERS)
    }

    fn counters(&self) -> Collection<Document> {
        self.db.get_database().collection::<Document>(COUNTERS)
    }

    pub async fn find_by_provider(
        &self,
        provider: AuthProvider,
        provider_id: &str,
    ) -> AppResult<Option<Member>> {
        self.members()
            .find_one(doc! { "provider": provider.as_str(), "provider_id": provider_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    /// 회원 ID 시퀀스를 1 증가시키고 새 값을 돌려줍니다.
    async fn next_member_id(&self) -> AppResult<i64> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": MEMBER_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or_else(|| AppError::DatabaseError("회원 ID 시퀀스를 읽을 수 없습니다".to_string()))?;

        counter
            .get_i64("seq")
            .map_err(|e| AppError::DatabaseError(format!("회원 ID 시퀀스 형식 오류: {}", e)))
    }

    /// 컬렉션 인덱스를 생성합니다. 서버 시작 시 한 번 호출합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let provider_identity_index = IndexModel::builder()
            .keys(doc! { "provider": 1, "provider_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("provider_identity_unique".to_string())
                .build())
            .build();

        self.members()
            .create_indexes([provider_identity_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl MemberResolver for MemberRepository {
    async fn resolve(&self, provider: AuthProvider, provider_id: &str) -> AppResult<i64> {
        if let Some(member) = self.find_by_provider(provider, provider_id).await? {
            return Ok(member.member_id);
        }

        let member = Member::new(self.next_member_id().await?, provider, provider_id);

        match self.members().insert_one(&member).await {
            Ok(_) => {
                log::info!("🆕 신규 회원 생성: {} ({})", member.member_id, provider);
                Ok(member.member_id)
            }
            Err(e) if is_duplicate_key(&e) => {
                log::debug!("동시 가입 감지, 기존 회원 재조회: {}", provider);
                self.find_by_provider(provider, provider_id)
                    .await?
                    .map(|existing| existing.member_id)
                    .ok_or_else(|| AppError::DatabaseError("중복 키 이후 회원을 찾을 수 없습니다".to_string()))
            }
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }
}

use crate::entitys::application_entity::ApplicationEntity;
use crate::entitys::attendance_entity::AttendanceEntity;
use crate::entitys::banner_entity::BannerEntity;
use crate::entitys::coupon_entity::CouponEntity;
use crate::entitys::faq_entity::FaqEntity;
use crate::entitys::mail_entity::MailEntity;
use crate::entitys::memo_entity::MemoEntity;
use crate::entitys::mission_entity::MissionEntity;
use crate::entitys::program_entity::ProgramEntity;
use crate::entitys::review_entity::ReviewEntity;
use crate::entitys::user_entity::UserEntity;
use common::errors::AppError;
use common::index_trait::MongoIndexModelProvider;
use common::repository_util::{BaseRepository, Repository};
use common::memory_repository::MemoryRepository;
use mongodb::{Database, IndexModel};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub type Repo<T> = Arc<dyn Repository<T>>;

/// One repository per collection, shared by every manager.
#[derive(Clone)]
pub struct Repos {
    pub user: Repo<UserEntity>,
    pub program: Repo<ProgramEntity>,
    pub faq: Repo<FaqEntity>,
    pub review: Repo<ReviewEntity>,
    pub application: Repo<ApplicationEntity>,
    pub mission: Repo<MissionEntity>,
    pub attendance: Repo<AttendanceEntity>,
    pub coupon: Repo<CouponEntity>,
    pub banner: Repo<BannerEntity>,
    pub memo: Repo<MemoEntity>,
    pub mail: Repo<MailEntity>,
}

async fn mongo_repo<T>(db: &Database, name: &str, indexes: Vec<IndexModel>) -> Result<Repo<T>, AppError>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync + 'static,
{
    let repo = BaseRepository::<T>::new(db, name);
    repo.ensure_indexes(indexes).await?;
    Ok(Arc::new(repo))
}

fn memory_repo<T>(indexes: Vec<IndexModel>) -> Repo<T>
where
    T: Serialize + DeserializeOwned + Send + Sync + 'static,
{
    Arc::new(MemoryRepository::<T>::new(indexes))
}

impl Repos {
    /// MongoDB collections, creating missing indexes.
    pub async fn mongo(db: &Database) -> Result<Self, AppError> {
        Ok(Self {
            user: mongo_repo(db, "user", UserEntity::index_models()).await?,
            program: mongo_repo(db, "program", ProgramEntity::index_models()).await?,
            faq: mongo_repo(db, "faq", FaqEntity::index_models()).await?,
            review: mongo_repo(db, "review", ReviewEntity::index_models()).await?,
            application: mongo_repo(db, "application", ApplicationEntity::index_models()).await?,
            mission: mongo_repo(db, "mission", MissionEntity::index_models()).await?,
            attendance: mongo_repo(db, "attendance", AttendanceEntity::index_models()).await?,
            coupon: mongo_repo(db, "coupon", CouponEntity::index_models()).await?,
            banner: mongo_repo(db, "banner", BannerEntity::index_models()).await?,
            memo: mongo_repo(db, "memo", MemoEntity::index_models()).await?,
            mail: mongo_repo(db, "mail_outbox", vec![]).await?,
        })
    }

    pub fn memory() -> Self {
        Self {
            user: memory_repo(UserEntity::index_models()),
            program: memory_repo(ProgramEntity::index_models()),
            faq: memory_repo(FaqEntity::index_models()),
            review: memory_repo(ReviewEntity::index_models()),
            application: memory_repo(ApplicationEntity::index_models()),
            mission: memory_repo(MissionEntity::index_models()),
            attendance: memory_repo(AttendanceEntity::index_models()),
            coupon: memory_repo(CouponEntity::index_models()),
            banner: memory_repo(BannerEntity::index_models()),
            memo: memory_repo(MemoEntity::index_models()),
            mail: memory_repo(vec![]),
        }
    }
}

//! # Service Registry
//!
//! 타입 기반 서비스 로케이터와 리포지토리 초기화 훅을 제공합니다.
//! Spring의 `ApplicationContext`처럼 애플리케이션 시작 시 인프라 컴포넌트와
//! 서비스를 한 곳에 등록하고, 핸들러 계층은 등록된 `Arc<T>`를 꺼내
//! `web::Data`로 주입합니다.
//!
//! ```rust,ignore
//! ServiceLocator::set(Arc::new(database));
//! ServiceLocator::register_repository(user_repo.clone());
//! ServiceLocator::initialize_all().await?;
//!
//! let user_service = ServiceLocator::get::<UserService>()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::info;
use once_cell::sync::Lazy;

use crate::core::errors::{AppError, AppResult};

/// 시작 시 한 번 초기화가 필요한 저장소 (인덱스 생성, 기본 데이터 시드 등)
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 저장소가 사용하는 컬렉션/키 네임스페이스
    fn collection_name(&self) -> &str;

    async fn init(&self) -> AppResult<()>;
}

pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    repositories: RwLock<Vec<Arc<dyn Repository>>>,
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            repositories: RwLock::new(Vec::new()),
        }
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체됩니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        info!("📦 Registering: {}", clean_name);

        let mut instances = match LOCATOR.instances.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
    }

    /// 등록된 인스턴스를 꺼냅니다.
    pub fn get<T: 'static + Send + Sync>() -> AppResult<Arc<T>> {
        let type_name = std::any::type_name::<T>();
        let instances = LOCATOR
            .instances
            .read()
            .map_err(|_| AppError::InternalError("ServiceLocator lock poisoned".to_string()))?;

        let instance = instances.get(&TypeId::of::<T>()).cloned().ok_or_else(|| {
            AppError::InternalError(format!(
                "Service not found: {}. Register it with ServiceLocator::set()",
                Self::extract_clean_type_name(type_name)
            ))
        })?;

        instance
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)))
    }

    /// `initialize_all`에서 `init`을 호출할 저장소를 등록합니다.
    pub fn register_repository(repository: Arc<dyn Repository>) {
        info!("🗄️ Registering repository: {} ({})", repository.name(), repository.collection_name());

        let mut repositories = match LOCATOR.repositories.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        repositories.push(repository);
    }

    /// 등록된 모든 저장소의 `init`을 등록 순서대로 실행합니다.
    ///
    /// 하나라도 실패하면 즉시 중단하고 에러를 돌려줍니다.
    pub async fn initialize_all() -> AppResult<usize> {
        let repositories: Vec<Arc<dyn Repository>> = LOCATOR
            .repositories
            .read()
            .map_err(|_| AppError::InternalError("ServiceLocator lock poisoned".to_string()))?
            .clone();

        info!("🔄 Initializing {} repositories", repositories.len());

        for repository in &repositories {
            repository.init().await?;
            info!("  ✓ {} initialized", repository.name());
        }

        Ok(repositories.len())
    }

    fn extract_clean_type_name(type_name: &str) -> String {
        match type_name.rfind("::") {
            Some(pos) => type_name[pos + 2..].to_string(),
            None => type_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct RegisteredValue {
        value: u32,
    }

    struct NeverRegistered;

    struct CountingRepository {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Repository for CountingRepository {
        fn name(&self) -> &str {
            "counting"
        }

        fn collection_name(&self) -> &str {
            "counting"
        }

        async fn init(&self) -> AppResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn test_set_and_get() {
        ServiceLocator::set(Arc::new(RegisteredValue { value: 7 }));

        let registered = ServiceLocator::get::<RegisteredValue>().unwrap();
        assert_eq!(registered.value, 7);
    }

    #[test]
    fn test_missing_service_is_an_error() {
        match ServiceLocator::get::<NeverRegistered>() {
            Err(AppError::InternalError(msg)) => assert!(msg.contains("NeverRegistered")),
            _ => panic!("Expected InternalError"),
        }
    }

    #[actix_web::test]
    async fn test_initialize_all_runs_registered_repositories() {
        let repository = Arc::new(CountingRepository { calls: AtomicUsize::new(0) });
        ServiceLocator::register_repository(repository.clone());

        let count = ServiceLocator::initialize_all().await.unwrap();

        assert!(count >= 1);
        assert!(repository.calls.load(Ordering::SeqCst) >= 1);
    }

    #[test]
    fn test_extract_clean_type_name() {
        assert_eq!(
            ServiceLocator::extract_clean_type_name("invoice_manager_backend::services::UserService"),
            "UserService"
        );
        assert_eq!(ServiceLocator::extract_clean_type_name("Plain"), "Plain");
    }
}

//! # Core Module
//!
//! 애플리케이션 조립을 담당합니다.
//!
//! ### [`registry`] - 서비스 조립
//! - 저장소 백엔드와 공개키 소스, 회원 디렉터리를 받아 서비스 그래프를 한 번에 구성
//! - 구성된 서비스를 `web::Data`로 actix 앱에 등록
//!
//! 모든 의존성은 생성자 인자로 주입되므로, 테스트는 인메모리 저장소와
//! 고정 공개키 소스로 같은 그래프를 만들어 쓸 수 있습니다.
//!
//! ```rust,ignore
//! let registry = ServiceRegistry::assemble(store, key_source, members, &settings);
//!
//! HttpServer::new(move || {
//!     let registry = registry.clone();
//!     App::new()
//!         .configure(move |cfg| registry.register(cfg))
//!         .configure(configure_all_routes)
//! })
//! ```

pub mod registry;

pub use registry::ServiceRegistry;

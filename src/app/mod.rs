// ==========================================
// 库存快照系统 - 应用层
// ==========================================
// 职责: 应用状态组装、会话、缓存
// ==========================================

pub mod cache;
pub mod error;
pub mod session;
pub mod state;

pub use cache::DatasetCache;
pub use error::{AppError, AppResult};
pub use session::Session;
pub use state::AppState;

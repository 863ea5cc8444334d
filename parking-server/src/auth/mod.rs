//! 认证模块
//!
//! JWT 令牌 + Argon2 密码哈希。令牌通过 `Authorization: Bearer <token>` 头携带，
//! 服务端不保存会话状态。

mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use password::{hash_password, verify_password};

//! # NetBI Storage 模块
//!
//! 故障记录的统一数据存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：FaultStore 异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：故障记录行、写入输入、过滤条件
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型（区分校验/内部）
//! 4. **验证辅助层** (`validation.rs`)：写入校验（时长非负、起止时间顺序）
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **缓存层** (`cache.rs`)：维度去重值 TTL 缓存（写入失效）
//! 7. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 设计约束
//!
//! - **禁止直接 SQL**：handler 层禁止直接写 SQL，统一通过 storage 层
//! - **过滤在存储层**：日期范围、类别等值、时长区间过滤由存储完成，
//!   分析引擎只消费物化后的样本切片
//! - **参数化查询**：所有 SQL 使用参数绑定，防止 SQL 注入

// 模块导出：将子模块的内容导出到 crate 根目录
pub mod cache;
pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

// 导出常用类型到 crate 根目录，方便外部引用
pub use cache::DistinctValueCache;
pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

// 导出内存存储实现类型
pub use in_memory::InMemoryFaultStore;

// 导出 PostgreSQL 存储实现类型
pub use postgres::PgFaultStore;

//! ludo-cqrs-core - CQRS 核心抽象
//!
//! 命令/查询的处理器在组装层显式构造并持有，
//! 不经过运行时注册表分发

mod command;
mod query;

pub use command::{Command, CommandHandler};
pub use query::{Query, QueryHandler};

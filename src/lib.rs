//! ComPAIR Engine - 比较式评判配对与计分服务
//!
//! 基于 Actix Web 构建，为评审者逐对分发答案、记录逐项判定并维护每个答案的得分。
//!
//! # 架构
//! - `config`: 配置管理
//! - `engine`: 配对、判定与计分的纯逻辑
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 身份识别中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod config;
pub mod engine;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;

//! 比较引擎核心
//!
//! 纯算法层，不做任何 I/O，存储层与服务层负责加载数据并持久化结果。
//!
//! - `pool`: 可比较答案池
//! - `examples`: 比较示例（校准）序列
//! - `pairing`: 配对策略（random / adaptive）
//! - `verdict`: 判定校验与整体胜者计算
//! - `scoring`: 得分与排名
//! - `guard`: 资格、时间窗口与配额检查
//! - `observer`: 比较生命周期观察者

pub mod examples;
pub mod guard;
pub mod observer;
pub mod pairing;
pub mod pool;
pub mod scoring;
pub mod verdict;

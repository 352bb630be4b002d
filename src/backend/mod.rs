//! # 模拟后端模块
//!
//! 具体 Monte Carlo 程序以适配器形式接入：校验、导出、执行、
//! 导入四个契约，由按标识符索引的注册表解析。注册表提供
//! 进程级缓存的默认实例，`reload()` 供测试重置。
//!
//! ## 依赖关系
//! - 被 `commands/`, `runner/` 使用
//! - 子模块: expander, exporter, importer, mock, validator, worker

pub mod expander;
pub mod exporter;
pub mod importer;
pub mod mock;
pub mod validator;
pub mod worker;

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock, RwLock};

use crate::backend::exporter::Exporter;
use crate::backend::importer::Importer;
use crate::backend::validator::Validator;
use crate::backend::worker::Worker;
use crate::error::{EpmakitError, Result};

/// 程序适配器：一个后端的全部行为入口
pub trait ProgramAdapter: Send + Sync {
    /// 注册表键，与 `Program::identifier` 对应
    fn identifier(&self) -> &str;

    fn create_validator(&self) -> Box<dyn Validator>;

    fn create_exporter(&self) -> Box<dyn Exporter>;

    fn create_worker(&self) -> Box<dyn Worker>;

    fn create_importer(&self) -> Box<dyn Importer>;
}

/// 按标识符索引的后端注册表
#[derive(Default)]
pub struct ProgramRegistry {
    adapters: BTreeMap<String, Arc<dyn ProgramAdapter>>,
}

impl ProgramRegistry {
    pub fn new() -> Self {
        ProgramRegistry::default()
    }

    /// 内置后端齐备的注册表
    pub fn with_builtins() -> Self {
        let mut registry = ProgramRegistry::new();
        registry.register(Arc::new(mock::MockAdapter::new()));
        registry
    }

    pub fn register(&mut self, adapter: Arc<dyn ProgramAdapter>) {
        self.adapters
            .insert(adapter.identifier().to_string(), adapter);
    }

    pub fn get(&self, identifier: &str) -> Result<Arc<dyn ProgramAdapter>> {
        self.adapters
            .get(identifier)
            .cloned()
            .ok_or_else(|| EpmakitError::ProgramNotFound(identifier.to_string()))
    }

    /// 已注册的标识符，按字典序
    pub fn identifiers(&self) -> Vec<String> {
        self.adapters.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

static GLOBAL_REGISTRY: OnceLock<RwLock<Arc<ProgramRegistry>>> = OnceLock::new();

fn global_cell() -> &'static RwLock<Arc<ProgramRegistry>> {
    GLOBAL_REGISTRY.get_or_init(|| RwLock::new(Arc::new(ProgramRegistry::with_builtins())))
}

/// 进程级共享注册表（惰性构建，缓存整个进程生命周期）
pub fn global_registry() -> Arc<ProgramRegistry> {
    match global_cell().read() {
        Ok(guard) => guard.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

/// 重置进程级注册表为内置状态；供测试使用
pub fn reload_global_registry() {
    let cell = global_cell();
    let mut guard = match cell.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *guard = Arc::new(ProgramRegistry::with_builtins());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let registry = ProgramRegistry::with_builtins();

        assert!(registry.get("mock").is_ok());
        assert!(matches!(
            registry.get("no-such-program"),
            Err(EpmakitError::ProgramNotFound(_))
        ));
    }

    #[test]
    fn test_registry_identifiers_sorted() {
        let registry = ProgramRegistry::with_builtins();
        let identifiers = registry.identifiers();

        assert!(identifiers.contains(&"mock".to_string()));
        let mut sorted = identifiers.clone();
        sorted.sort();
        assert_eq!(sorted, identifiers);
    }

    #[test]
    fn test_global_registry_reload() {
        let before = global_registry();
        assert!(before.get("mock").is_ok());

        reload_global_registry();
        let after = global_registry();
        assert!(after.get("mock").is_ok());
    }
}

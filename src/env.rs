//! 常量环境：`var NAME value` 声明的 `名字 -> 值` 表。
//!
//! 环境只属于一次解析（由 [`crate::parser::Parser`] 持有），没有任何全局状态，
//! 所以互相独立的解析可以同时进行。

use crate::value::Value;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
    bindings: IndexMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// 绑定一个常量。同名的旧绑定会被覆盖，返回旧值。
    pub fn bind(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.bindings.insert(name.into(), value)
    }

    /// 解析常量引用：返回当前绑定值的深拷贝。
    ///
    /// 拷贝与环境中的原值互不影响；之后再次 `bind` 同名常量也不会改变已经解析出的副本。
    pub fn resolve(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// 只读访问当前绑定（不拷贝）。
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 按第一次声明的顺序遍历所有绑定。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v))
    }
}

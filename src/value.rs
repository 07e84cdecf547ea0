use indexmap::IndexMap;
use std::fmt;

/// 映射：按插入顺序保存的 `key -> Value`。
///
/// 重复插入同一个 key 会覆盖旧值，但 key 保留第一次出现的位置。
pub type Mapping = IndexMap<String, Value>;

/// 解析结果中的一个值。
///
/// 值是自包含的树：没有共享的子结构。常量引用时通过 `Clone` 做整棵树的深拷贝，
/// 所以修改一个副本不会影响另一个副本或环境中的原值。
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// 数字（源码中总是带小数点的小数）
    Number(f64),
    /// 字符串，内容与源码一致
    Text(String),
    /// 嵌套映射：`$[key: value, ...]`
    Mapping(Mapping),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// 按 key 取映射中的值；不是映射时返回 None。
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

/// 把数字格式化为文本。
///
/// 总是普通小数写法，不用指数（`1e20` 写成 `100000000000000000000.0`）；
/// 整数值也保留小数部分（`30.0`），其余使用最短的可往返表示（`3.14`、`0.5`）。
pub fn format_number(n: f64) -> String {
    // f64 的 Display 不会输出指数形式，但整数值没有小数点
    let mut s = n.to_string();
    if n.is_finite() && !s.contains('.') {
        s.push_str(".0");
    }
    s
}

impl fmt::Display for Value {
    /// 单行的调试友好表示：`{name: "John", age: 30.0}`。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => write!(f, "{s:?}"),
            Value::Mapping(m) => {
                f.write_str("{")?;
                for (i, (k, v)) in m.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_is_plain_decimal() {
        assert_eq!(format_number(30.0), "30.0");
        assert_eq!(format_number(3.14), "3.14");
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(1e20), "100000000000000000000.0");
        assert_eq!(format_number(1e-8), "0.00000001");
    }

    #[test]
    fn accessors_match_variant() {
        let n = Value::from(2.5);
        assert_eq!(n.as_number(), Some(2.5));
        assert_eq!(n.as_text(), None);
        assert_eq!(n.as_mapping(), None);

        let t = Value::from(String::from("hi"));
        assert_eq!(t.as_text(), Some("hi"));
        assert_eq!(t.as_number(), None);
        assert_eq!(t.get("x"), None);
    }

    #[test]
    fn mapping_display_in_insertion_order() {
        let mut m = Mapping::new();
        m.insert("name".into(), Value::from("John"));
        m.insert("age".into(), Value::from(30.0));
        let v = Value::from(m);
        assert_eq!(v.get("age").and_then(Value::as_number), Some(30.0));
        assert_eq!(v.to_string(), r#"{name: "John", age: 30.0}"#);
    }
}

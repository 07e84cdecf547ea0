use crate::error::XmlError;
use crate::value::{format_number, Value};

/// XML 输出的配置。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XmlOptions {
    /// 根元素名
    pub root: String,
    /// 每个顶层值对应的元素名
    pub item: String,
    /// 每层缩进的空格数
    pub indent: usize,
    /// 是否输出 `<?xml version="1.0" encoding="UTF-8"?>` 声明
    pub declaration: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            root: "config".to_string(),
            item: "value".to_string(),
            indent: 2,
            declaration: true,
        }
    }
}

/// XML 输出的对外入口：把顶层值序列生成 XML 文本。
///
/// 输出格式（默认配置）：
/// ```text
/// <?xml version="1.0" encoding="UTF-8"?>
/// <config>
///   <value>3.14</value>
///   <value>
///     <name>John</name>
///   </value>
/// </config>
/// ```
///
/// - 标量：元素的文本内容（数字整数值也保留 `.0`，字符串做 `& < >` 转义）
/// - 映射：每个 entry 一个子元素，以 key 命名，按插入顺序；空映射输出自闭合元素
/// - 是否写入文件由 CLI（main.rs）负责。
pub fn to_xml(values: &[Value], opts: &XmlOptions) -> Result<String, XmlError> {
    check_name(&opts.root)?;
    check_name(&opts.item)?;

    let mut out = String::new();
    if opts.declaration {
        out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    }
    if values.is_empty() {
        out.push_str(&format!("<{}/>\n", opts.root));
        return Ok(out);
    }

    out.push_str(&format!("<{}>\n", opts.root));
    let mut w = Writer { out, opts };
    for value in values {
        w.element(&opts.item, value, 1)?;
    }
    let mut out = w.out;
    out.push_str(&format!("</{}>\n", opts.root));
    Ok(out)
}

struct Writer<'o> {
    out: String,
    opts: &'o XmlOptions,
}

impl Writer<'_> {
    /// 输出一个元素（独占一行或多行），`depth` 是缩进层数。
    fn element(&mut self, name: &str, value: &Value, depth: usize) -> Result<(), XmlError> {
        check_name(name)?;
        self.pad(depth);
        match value {
            Value::Number(n) => {
                self.out
                    .push_str(&format!("<{name}>{}</{name}>\n", format_number(*n)));
            }
            Value::Text(s) => {
                self.out
                    .push_str(&format!("<{name}>{}</{name}>\n", escape_text(s)?));
            }
            Value::Mapping(m) if m.is_empty() => {
                self.out.push_str(&format!("<{name}/>\n"));
            }
            Value::Mapping(m) => {
                self.out.push_str(&format!("<{name}>\n"));
                for (key, child) in m {
                    self.element(key, child, depth + 1)?;
                }
                self.pad(depth);
                self.out.push_str(&format!("</{name}>\n"));
            }
        }
        Ok(())
    }

    fn pad(&mut self, depth: usize) {
        self.out
            .extend(std::iter::repeat(' ').take(depth * self.opts.indent));
    }
}

/// 判断一个 key 能否作为 XML 元素名。
///
/// 这里只接受 ASCII 子集：`[A-Za-z_][A-Za-z0-9_.-]*`。
/// 以 `xml` 开头的名字是保留前缀，但仍然是合法（well-formed）的元素名，这里照常接受。
pub fn is_valid_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

fn check_name(name: &str) -> Result<(), XmlError> {
    if is_valid_element_name(name) {
        Ok(())
    } else {
        Err(XmlError::InvalidElementName {
            name: name.to_string(),
        })
    }
}

/// 将字符串转义为可以放进 XML 文本节点的形式。
///
/// XML 1.0 不允许出现的字符（除 `\t` `\n` `\r` 以外的控制字符、U+FFFE、U+FFFF）
/// 连字符引用也不能写，只能报错。
fn escape_text(s: &str) -> Result<String, XmlError> {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c if !is_xml_char(c) => return Err(XmlError::InvalidCharacter { ch: c }),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// XML 1.0 的 `Char` 产生式（Rust 的 char 本身已排除代理项）。
fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

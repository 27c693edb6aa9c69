use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Number, Value};
use std::{borrow::Borrow, fmt, iter::FromIterator, mem::replace, slice, vec};

/// 请求参数值
///
/// 渲染为字符串时，字符串原样输出，数字与布尔值输出其 JSON 文本，
/// 空值输出空字符串，映射与序列输出其紧凑 JSON 文本。
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    /// 空值
    Null,
    /// 布尔值
    Bool(bool),
    /// 数字
    Number(Number),
    /// 字符串
    String(String),
    /// 序列
    Sequence(Vec<ParameterValue>),
    /// 映射
    Mapping(Parameters),
}

impl ParameterValue {
    /// 获取字符串值
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
            Self::Sequence(_) | Self::Mapping(_) => {
                f.write_str(&serde_json::to_string(self).map_err(|_| fmt::Error)?)
            }
        }
    }
}

impl Serialize for ParameterValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Self::Mapping(parameters) => parameters.serialize(serializer),
        }
    }
}

impl From<&str> for ParameterValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ParameterValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ParameterValue {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for ParameterValue {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::Number(value.into())
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for ParameterValue {
    /// 非有限浮点数（NaN 与无穷）无法表示为 JSON 数字，将转换为空值
    #[inline]
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<f32> for ParameterValue {
    #[inline]
    fn from(value: f32) -> Self {
        f64::from(value).into()
    }
}

impl<T: Into<ParameterValue>> From<Vec<T>> for ParameterValue {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ParameterValue>> From<Option<T>> for ParameterValue {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Parameters> for ParameterValue {
    #[inline]
    fn from(parameters: Parameters) -> Self {
        Self::Mapping(parameters)
    }
}

impl From<Value> for ParameterValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(values) => Self::Sequence(values.into_iter().map(Into::into).collect()),
            Value::Object(map) => Self::Mapping(map.into_iter().collect()),
        }
    }
}

/// 请求参数
///
/// 以字符串为键的参数映射，键唯一，重复插入同名键将原地替换旧值。
/// 记录插入顺序，Multipart 与 JSON 请求体按插入顺序输出，URL 查询字符串则按键排序输出。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    inner: Vec<(String, ParameterValue)>,
}

impl Parameters {
    /// 创建空的请求参数
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// 插入请求参数，返回被替换的旧值
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Option<ParameterValue> {
        let key = key.into();
        let value = value.into();
        if let Some((_, existed)) = self.inner.iter_mut().find(|(k, _)| *k == key) {
            Some(replace(existed, value))
        } else {
            self.inner.push((key, value));
            None
        }
    }

    /// 添加请求参数
    #[inline]
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// 获取请求参数
    #[inline]
    pub fn get<Q: Borrow<str> + ?Sized>(&self, key: &Q) -> Option<&ParameterValue> {
        let key = key.borrow();
        self.inner.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// 移除请求参数
    pub fn remove<Q: Borrow<str> + ?Sized>(&mut self, key: &Q) -> Option<ParameterValue> {
        let key = key.borrow();
        let index = self.inner.iter().position(|(k, _)| k == key)?;
        Some(self.inner.remove(index).1)
    }

    /// 请求参数数量
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// 请求参数是否为空
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// 按插入顺序遍历请求参数
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter(self.inner.iter())
    }
}

impl Serialize for Parameters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> FromIterator<(K, V)> for Parameters {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut parameters = Self::new();
        parameters.extend(iter);
        parameters
    }
}

impl<K: Into<String>, V: Into<ParameterValue>> Extend<(K, V)> for Parameters {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Parameters {
    type Item = (String, ParameterValue);
    type IntoIter = vec::IntoIter<(String, ParameterValue)>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = (&'a str, &'a ParameterValue);
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 请求参数迭代器
#[derive(Debug, Clone)]
pub struct Iter<'a>(slice::Iter<'a, (String, ParameterValue)>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ParameterValue);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut parameters = Parameters::new().with("a", 1).with("b", "x");
        assert_eq!(parameters.insert("a", true), Some(ParameterValue::from(1)));
        let keys: Vec<_> = parameters.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(parameters.get("a"), Some(&ParameterValue::Bool(true)));
        assert_eq!(parameters.remove("b"), Some(ParameterValue::from("x")));
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(ParameterValue::from("a b").to_string(), "a b");
        assert_eq!(ParameterValue::from(42u32).to_string(), "42");
        assert_eq!(ParameterValue::from(-2.5f64).to_string(), "-2.5");
        assert_eq!(ParameterValue::from(false).to_string(), "false");
        assert_eq!(ParameterValue::Null.to_string(), "");
        assert_eq!(ParameterValue::from(f64::NAN), ParameterValue::Null);
        assert_eq!(ParameterValue::from(vec![1, 2]).to_string(), "[1,2]");
        assert_eq!(
            ParameterValue::from(Parameters::new().with("z", "1").with("a", vec!["x"])).to_string(),
            r#"{"z":"1","a":["x"]}"#
        );
    }

    #[test]
    fn test_serialize_keeps_insertion_order() -> serde_json::Result<()> {
        let parameters = Parameters::new().with("z", 1).with("a", Parameters::new().with("k", Value::Null));
        assert_eq!(serde_json::to_string(&parameters)?, r#"{"z":1,"a":{"k":null}}"#);
        assert_eq!(
            serde_json::to_value(&parameters)?,
            json!({"a": {"k": null}, "z": 1})
        );
        Ok(())
    }

    #[test]
    fn test_from_json_value() {
        let value = ParameterValue::from(json!({"b": [true, 1.5], "a": "s"}));
        match value {
            ParameterValue::Mapping(parameters) => {
                assert_eq!(parameters.get("a"), Some(&ParameterValue::from("s")));
                assert_eq!(
                    parameters.get("b"),
                    Some(&ParameterValue::Sequence(vec![true.into(), 1.5f64.into()]))
                );
            }
            other => panic!("unexpected value: {:?}", other),
        }
    }
}

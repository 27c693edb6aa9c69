use super::Parameters;
use std::borrow::Cow;

/// 将请求参数编码为 URL 查询字符串
///
/// 键与值均按 `application/x-www-form-urlencoded` 规则编码（空格编码为 `+`）。
/// 输出按键排序，调用者不应依赖参数顺序。空参数返回空字符串。
pub fn encode_parameters(parameters: &Parameters) -> String {
    let mut pairs: Vec<(&str, String)> = parameters
        .iter()
        .map(|(key, value)| (key, value.to_string()))
        .collect();
    pairs.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
    }
    serializer.finish()
}

/// 将查询字符串追加到路径上
///
/// 路径中还没有查询字符串时以 `?` 连接，否则以 `&` 连接。片段（`#` 之后）保持在最后。
pub fn append_query<'a>(path: &'a str, query: &str) -> Cow<'a, str> {
    if query.is_empty() {
        return Cow::Borrowed(path);
    }
    let (base, fragment) = match path.find('#') {
        Some(index) => path.split_at(index),
        None => (path, ""),
    };
    let separator = if base.contains('?') {
        if base.ends_with('?') || base.ends_with('&') {
            ""
        } else {
            "&"
        }
    } else {
        "?"
    };
    Cow::Owned(format!("{}{}{}{}", base, separator, query, fragment))
}

use super::Parameters;
use assert_impl::assert_impl;
use mime::Mime;
use percent_encoding::percent_encode_byte;
use std::{
    borrow::{Borrow, Cow},
    fmt,
    fs,
    io::Result as IoResult,
    ops::Deref,
    path::Path,
};
use uuid::Uuid;

/// Multipart 分隔符
///
/// 每个请求生成一个新的分隔符，格式为 `Boundary-{UUID}`
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Boundary {
    inner: String,
}

impl Boundary {
    /// 生成新的分隔符
    #[inline]
    pub fn generate() -> Self {
        Self {
            inner: format!("Boundary-{}", Uuid::new_v4().hyphenated().to_string().to_uppercase()),
        }
    }

    /// 获取分隔符字符串
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<String> for Boundary {
    #[inline]
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&str> for Boundary {
    #[inline]
    fn from(inner: &str) -> Self {
        Self { inner: inner.to_owned() }
    }
}

impl Deref for Boundary {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Borrow<str> for Boundary {
    #[inline]
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Boundary {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl fmt::Debug for Boundary {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

/// 上传文件
///
/// 包含文件数据，文件名和 MIME 类型。MIME 类型由调用者给出，
/// 或根据文件名扩展名推断，从不根据文件内容推断。
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    data: Vec<u8>,
    file_name: String,
    mime: Mime,
}

impl UploadFile {
    /// 创建上传文件，MIME 类型根据文件名推断，无法推断时为 `application/octet-stream`
    #[inline]
    pub fn new(data: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
        Self {
            data: data.into(),
            file_name,
            mime,
        }
    }

    /// 读取本地文件作为上传文件
    pub fn from_path(path: impl AsRef<Path>) -> IoResult<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|file_name| file_name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self {
            data,
            file_name,
            mime: mime_guess::from_path(path).first_or_octet_stream(),
        })
    }

    /// 设置 MIME 类型
    #[inline]
    #[must_use]
    pub fn mime(mut self, mime: Mime) -> Self {
        self.mime = mime;
        self
    }

    /// 文件数据
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 文件名
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME 类型
    #[inline]
    pub fn mime_type(&self) -> &Mime {
        &self.mime
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("data_len", &self.data.len())
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .finish()
    }
}

/// Multipart 表单
///
/// 文本字段总是位于文件字段之前，两者各自保持添加顺序。
///
/// ```
/// use acnet_http_client::{Multipart, UploadFile};
///
/// let body = Multipart::with_boundary("boundary")
///     .add_text("title", "x")
///     .add_file("file", &UploadFile::new(b"abc".to_vec(), "f.txt"))
///     .to_bytes();
/// assert!(body.ends_with(b"--boundary--\r\n"));
/// ```
#[derive(Debug)]
pub struct Multipart<'a> {
    boundary: Boundary,
    texts: Vec<(Cow<'a, str>, Cow<'a, str>)>,
    files: Vec<(Cow<'a, str>, &'a UploadFile)>,
}

impl Default for Multipart<'_> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Multipart<'a> {
    /// 创建 Multipart 表单，使用新生成的分隔符
    #[inline]
    pub fn new() -> Self {
        Self::with_boundary(Boundary::generate())
    }

    /// 创建 Multipart 表单，使用指定的分隔符
    #[inline]
    pub fn with_boundary(boundary: impl Into<Boundary>) -> Self {
        Self {
            boundary: boundary.into(),
            texts: Default::default(),
            files: Default::default(),
        }
    }

    /// 获取分隔符
    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// 添加文本字段
    #[inline]
    #[must_use]
    pub fn add_text(mut self, name: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) -> Self {
        self.texts.push((name.into(), value.into()));
        self
    }

    /// 按插入顺序添加请求参数作为文本字段
    #[must_use]
    pub fn add_parameters(mut self, parameters: &'a Parameters) -> Self {
        for (name, value) in parameters.iter() {
            let value = match value.as_str() {
                Some(value) => Cow::Borrowed(value),
                None => Cow::Owned(value.to_string()),
            };
            self.texts.push((Cow::Borrowed(name), value));
        }
        self
    }

    /// 添加文件字段
    #[inline]
    #[must_use]
    pub fn add_file(mut self, name: impl Into<Cow<'a, str>>, file: &'a UploadFile) -> Self {
        self.files.push((name.into(), file));
        self
    }

    /// 编码为请求体
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut body = Vec::with_capacity(self.estimated_len());
        for (name, value) in self.texts.iter() {
            self.write_delimiter(&mut body);
            body.extend_from_slice(b"Content-Disposition: form-data; name=\"");
            body.extend_from_slice(quote(name).as_bytes());
            body.extend_from_slice(b"\"\r\n\r\n");
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        for (name, file) in self.files.iter() {
            self.write_delimiter(&mut body);
            body.extend_from_slice(b"Content-Disposition: form-data; name=\"");
            body.extend_from_slice(quote(name).as_bytes());
            body.extend_from_slice(b"\"; filename=\"");
            body.extend_from_slice(quote(file.file_name()).as_bytes());
            body.extend_from_slice(b"\"\r\nContent-Type: ");
            body.extend_from_slice(file.mime_type().as_ref().as_bytes());
            body.extend_from_slice(b"\r\n\r\n");
            body.extend_from_slice(file.data());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(b"--");
        body.extend_from_slice(self.boundary.as_bytes());
        body.extend_from_slice(b"--\r\n");
        body
    }

    fn write_delimiter(&self, body: &mut Vec<u8>) {
        body.extend_from_slice(b"--");
        body.extend_from_slice(self.boundary.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    fn estimated_len(&self) -> usize {
        const PART_OVERHEAD: usize = 128;
        let texts: usize = self.texts.iter().map(|(n, v)| n.len() + v.len()).sum();
        let files: usize = self
            .files
            .iter()
            .map(|(n, f)| n.len() + f.file_name().len() + f.data().len())
            .sum();
        texts + files + (self.texts.len() + self.files.len() + 1) * (PART_OVERHEAD + self.boundary.len())
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

// 引号内只对 `"`，CR 与 LF 做百分号编码，其余字符（含非 ASCII 字符）原样输出
fn quote(value: &str) -> Cow<'_, str> {
    fn must_encode(byte: u8) -> bool {
        matches!(byte, b'"' | b'\r' | b'\n')
    }

    if !value.bytes().any(must_encode) {
        return Cow::Borrowed(value);
    }
    let mut quoted = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match u8::try_from(c) {
            Ok(byte) if must_encode(byte) => quoted.push_str(percent_encode_byte(byte)),
            _ => quoted.push(c),
        }
    }
    Cow::Owned(quoted)
}

//! 매핑 테이블의 정규 텍스트 형식
//!
//! 4칸 들여쓰기 JSON이지만, 한 키의 값 목록은 한 줄에 모아 씁니다:
//!
//! ```text
//! {
//!     "vowels": [
//!         "অ", "আ", "ই"
//!     ],
//!     "empty": []
//! }
//! ```
//!
//! 값 하나가 바뀌면 diff에서도 한 줄만 바뀝니다. 끝 줄바꿈은 붙이지 않습니다.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, PrettyFormatter, Serializer};

use super::charmap::{CharMap, MappingError};

const INDENT: &[u8] = b"    ";

/// 배열 원소를 `", "`로 이어 쓰는 포매터
///
/// 객체와 배열의 여닫기는 [`PrettyFormatter`]에 맡기고,
/// 두 번째 이후 배열 원소 앞의 줄바꿈만 바꿉니다.
struct CollapsedArrayFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl<'a> CollapsedArrayFormatter<'a> {
    fn new() -> Self {
        Self {
            inner: PrettyFormatter::with_indent(INDENT),
        }
    }
}

impl<'a> Formatter for CollapsedArrayFormatter<'a> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            self.inner.begin_array_value(writer, true)
        } else {
            writer.write_all(b", ")
        }
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }
}

/// 매핑을 정규 텍스트로 직렬화
///
/// 같은 매핑은 항상 같은 바이트열이 됩니다.
pub fn to_canonical_json(map: &CharMap) -> Result<String, MappingError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, CollapsedArrayFormatter::new());
    map.serialize(&mut serializer)
        .map_err(|e| MappingError::FormatError(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| MappingError::FormatError(e.to_string()))
}

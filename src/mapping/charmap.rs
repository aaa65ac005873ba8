//! 순서가 보존되는 키 -> 위치별 문자열 목록 매핑

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 자동 생성하지 않도록 수동으로 비워둔 항목
pub const PLACEHOLDER: &str = "";

/// 값이 수동 빈칸 표시인지 확인
pub fn is_placeholder(value: &str) -> bool {
    value == PLACEHOLDER
}

/// 매핑 파일 로드/파싱 에러
#[derive(Debug)]
pub enum MappingError {
    /// 파일 읽기 실패
    IoError(std::io::Error),
    /// JSON 파싱 실패 (형식이 `{ "키": ["값", ...] }`가 아닌 경우 포함)
    ParseError(String),
    /// 정규 텍스트 직렬화 실패
    FormatError(String),
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::IoError(e) => write!(f, "파일 읽기 오류: {}", e),
            MappingError::ParseError(s) => write!(f, "JSON 파싱 오류: {}", s),
            MappingError::FormatError(s) => write!(f, "직렬화 오류: {}", s),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::IoError(e) => Some(e),
            MappingError::ParseError(_) | MappingError::FormatError(_) => None,
        }
    }
}

impl From<std::io::Error> for MappingError {
    fn from(e: std::io::Error) -> Self {
        MappingError::IoError(e)
    }
}

/// 문자 매핑 테이블
///
/// 키 삽입 순서와 각 키의 위치 순서를 그대로 유지합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharMap {
    groups: IndexMap<String, Vec<String>>,
}

impl CharMap {
    /// 빈 매핑 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON 문자열에서 매핑 파싱
    pub fn from_json(json_str: &str) -> Result<Self, MappingError> {
        serde_json::from_str(json_str).map_err(|e| MappingError::ParseError(e.to_string()))
    }

    /// 키에 위치별 값 목록 설정 (기존 키면 순서 유지한 채 값만 교체)
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.groups.insert(key.into(), values);
    }

    /// 키의 값 목록 조회
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    /// 키의 특정 위치 값 조회
    pub fn entry_at(&self, key: &str, index: usize) -> Option<&str> {
        self.groups
            .get(key)
            .and_then(|values| values.get(index))
            .map(String::as_str)
    }

    /// 해당 위치가 수동 빈칸으로 고정되어 있는지 확인
    pub fn is_pinned_blank(&self, key: &str, index: usize) -> bool {
        self.entry_at(key, index).is_some_and(is_placeholder)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.groups.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }

    /// 키 개수
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// 전체 위치 개수 (모든 키의 값 개수 합)
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// 수동 빈칸 개수
    pub fn placeholder_count(&self) -> usize {
        self.groups
            .values()
            .flatten()
            .filter(|value| is_placeholder(value))
            .count()
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for CharMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Vec<V>)>>(iter: I) -> Self {
        let groups = iter
            .into_iter()
            .map(|(key, values)| (key.into(), values.into_iter().map(Into::into).collect()))
            .collect();
        Self { groups }
    }
}

//! 기준 매핑과 파생 매핑의 병합
//!
//! 키/위치 단위 규칙:
//! - 파생 매핑의 같은 키, 같은 위치가 빈 문자열이면 그대로 유지 (수동 빈칸)
//! - 그 외에는 기준 값을 오라클로 다시 음역
//!
//! 결과의 키 집합과 키별 길이는 항상 기준 매핑과 같습니다.
//! 파생 매핑에만 있는 키는 버려집니다.

use crate::mapping::{CharMap, PLACEHOLDER};
use crate::oracle::{OracleError, Transliterator};

use super::loader::StoredMap;

/// 위치 하나가 결정된 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// 수동 빈칸 유지
    Preserved,
    /// 오라클로 재생성
    Regenerated,
}

/// 키 단위 병합 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeResult {
    pub mapping: CharMap,
    /// 유지된 빈칸 수
    pub preserved: usize,
    /// 재생성된 위치 수
    pub regenerated: usize,
}

/// 병합 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// 기준 파일 전체 음역 결과가 저장된 파일과 같음 (키 단위 작업 생략)
    FastPath,
    /// 키 단위 병합 수행
    Merged(MergeResult),
}

/// 병합 중 특정 키/위치 음역 실패
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeError {
    pub key: String,
    pub index: usize,
    pub source: OracleError,
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "키 \"{}\" 위치 {} 음역 실패: {}",
            self.key, self.index, self.source
        )
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// 파생 매핑의 해당 위치 처리 방식 결정
///
/// 파생 매핑이 기준보다 짧으면 앞에서부터 정렬된 것으로 보고,
/// 없는 뒤쪽 위치는 재생성합니다.
pub fn resolve(derived: Option<&CharMap>, key: &str, index: usize) -> Resolution {
    match derived {
        Some(map) if map.is_pinned_blank(key, index) => Resolution::Preserved,
        _ => Resolution::Regenerated,
    }
}

/// 병합기
pub struct MergeEngine<'a, T: ?Sized> {
    oracle: &'a T,
    reference_script: &'a str,
}

impl<'a, T: Transliterator + ?Sized> MergeEngine<'a, T> {
    pub fn new(oracle: &'a T, reference_script: &'a str) -> Self {
        Self {
            oracle,
            reference_script,
        }
    }

    /// 기준 파일 원문 전체를 한 번 음역해서 저장된 원문과 같은지 확인
    pub fn fast_path_matches(
        &self,
        reference_raw: &str,
        derived_raw: &str,
        target: &str,
    ) -> Result<bool, OracleError> {
        let candidate = self
            .oracle
            .transliterate(self.reference_script, target, reference_raw)?;
        Ok(candidate == derived_raw)
    }

    /// 키/위치 단위 병합
    pub fn reconcile(
        &self,
        reference: &CharMap,
        derived: Option<&CharMap>,
        target: &str,
    ) -> Result<MergeResult, MergeError> {
        let mut mapping = CharMap::new();
        let mut preserved = 0;
        let mut regenerated = 0;

        for (key, values) in reference.iter() {
            let mut merged = Vec::with_capacity(values.len());
            for (index, value) in values.iter().enumerate() {
                match resolve(derived, key, index) {
                    Resolution::Preserved => {
                        merged.push(PLACEHOLDER.to_string());
                        preserved += 1;
                    }
                    Resolution::Regenerated => {
                        let converted = self
                            .oracle
                            .transliterate(self.reference_script, target, value)
                            .map_err(|source| MergeError {
                                key: key.to_string(),
                                index,
                                source,
                            })?;
                        merged.push(converted);
                        regenerated += 1;
                    }
                }
            }
            mapping.insert(key, merged);
        }

        Ok(MergeResult {
            mapping,
            preserved,
            regenerated,
        })
    }

    /// 병합 (빠른 경로 -> 키 단위 병합)
    pub fn merge(
        &self,
        reference: &StoredMap,
        derived: &StoredMap,
        use_fast_path: bool,
    ) -> Result<MergeOutcome, MergeError> {
        let target = derived.script.as_str();

        if use_fast_path {
            // 전체 음역 실패는 빠른 경로 불일치로 보고 키 단위 병합으로 넘어감
            // (빈칸 위치의 문자는 대상 스크립트에 없을 수 있음)
            match self.fast_path_matches(&reference.raw, &derived.raw, target) {
                Ok(true) => return Ok(MergeOutcome::FastPath),
                Ok(false) => {}
                Err(e) => log::debug!("전체 음역 실패, 키 단위 병합으로 진행: {}", e),
            }
        }

        self.reconcile(&reference.map, Some(&derived.map), target)
            .map(MergeOutcome::Merged)
    }
}

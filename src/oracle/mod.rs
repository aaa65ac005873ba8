//! 음역 오라클
//!
//! `(원본 스크립트, 대상 스크립트, 텍스트) -> 텍스트` 형태의 순수 함수입니다.
//! 동기화 로직은 내부 알고리즘을 모르는 채 이 트레이트로만 호출합니다.
//!
//! # 사용 예시
//!
//! ```
//! use charmap_sync::oracle::{BlockTransliterator, Transliterator};
//!
//! let oracle = BlockTransliterator::new();
//! assert_eq!(oracle.transliterate("devanagari", "assamese", "रव").unwrap(), "ৰৱ");
//! assert_eq!(oracle.transliterate("devanagari", "bengali", "रव").unwrap(), "রব");
//! ```

mod block;

pub use block::{BlockTransliterator, ScriptBlock};

/// 음역 실패
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// 등록되지 않은 스크립트
    UnknownScript(String),
    /// 지원하지 않는 스크립트 쌍
    UnsupportedPair { source: String, target: String },
    /// 대상 스크립트에 대응 문자가 없음
    Unsupported { target: String, ch: char },
    /// 외부 오라클 실패
    Failed(String),
}

impl std::fmt::Display for OracleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OracleError::UnknownScript(name) => write!(f, "알 수 없는 스크립트: {}", name),
            OracleError::UnsupportedPair { source, target } => {
                write!(f, "지원하지 않는 음역 방향: {} -> {}", source, target)
            }
            OracleError::Unsupported { target, ch } => write!(
                f,
                "{}에 대응 문자가 없음: '{}' (U+{:04X})",
                target, ch, *ch as u32
            ),
            OracleError::Failed(s) => write!(f, "음역 실패: {}", s),
        }
    }
}

impl std::error::Error for OracleError {}

/// 음역 오라클
pub trait Transliterator {
    /// `text`를 `source` 스크립트에서 `target` 스크립트로 음역
    fn transliterate(&self, source: &str, target: &str, text: &str) -> Result<String, OracleError>;
}

impl<T: Transliterator + ?Sized> Transliterator for &T {
    fn transliterate(&self, source: &str, target: &str, text: &str) -> Result<String, OracleError> {
        (**self).transliterate(source, target, text)
    }
}

/// 클로저 기반 오라클 (외부 서비스 연동이나 테스트용)
pub struct FnTransliterator<F>(F);

impl<F> Transliterator for FnTransliterator<F>
where
    F: Fn(&str, &str, &str) -> Result<String, OracleError>,
{
    fn transliterate(&self, source: &str, target: &str, text: &str) -> Result<String, OracleError> {
        (self.0)(source, target, text)
    }
}

/// 클로저로 오라클 생성
pub fn from_fn<F>(f: F) -> FnTransliterator<F>
where
    F: Fn(&str, &str, &str) -> Result<String, OracleError>,
{
    FnTransliterator(f)
}

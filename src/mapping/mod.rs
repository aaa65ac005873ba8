//! 문자 매핑 테이블 모델
//!
//! 스킴 파일 하나는 그룹 키(예: `vowels`, `consonants`)마다 위치별 문자열 목록을 가집니다.
//! 기준 스크립트(데바나가리) 테이블과 파생 스크립트 테이블 모두 같은 형태입니다.
//!
//! # 빈 문자열 규칙
//!
//! 파생 테이블의 특정 위치에 빈 문자열([`PLACEHOLDER`])이 있으면
//! "사람이 의도적으로 비워둔 항목"으로 취급하며, 재생성 시 덮어쓰지 않습니다.

mod charmap;
mod diff;
mod serializer;

pub use charmap::{is_placeholder, CharMap, MappingError, PLACEHOLDER};
pub use diff::KeyChanges;
pub use serializer::to_canonical_json;

//! 유니코드 블록 이동 방식의 브라흐미 계열 음역기
//!
//! 데바나가리(U+0900~U+097F)와 같은 배열(ISCII 기반)을 따르는 블록은
//! 블록 시작 코드포인트 차이만큼 옮기면 대부분 대응 문자가 됩니다.
//! 예외는 스크립트별 치환표와 누크타 분해로 처리합니다.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::{OracleError, Transliterator};

/// 데바나가리 블록 시작 코드포인트
const DEVANAGARI_BASE: u32 = 0x0900;
/// 블록 크기
const BLOCK_SIZE: u32 = 0x80;
/// 이 오프셋 이상은 블록마다 배열이 달라 단순 이동 불가
const SHIFTABLE_LIMIT: u32 = 0x70;

/// 누크타 (U+093C)
const NUKTA: char = '\u{093C}';

/// 스크립트 공용 문자 (단다, 베다 성조, 약어 기호): 그대로 통과
const SCRIPT_NEUTRAL: &[char] = &['\u{0951}', '\u{0952}', '\u{0964}', '\u{0965}', '\u{0970}'];

/// 누크타 합자 -> (기본 자음, 누크타)
/// 대상 블록에 합자가 없을 때만 분해합니다.
const NUKTA_DECOMPOSITIONS: &[(char, char)] = &[
    ('\u{0929}', '\u{0928}'), // ऩ -> न
    ('\u{0931}', '\u{0930}'), // ऱ -> र
    ('\u{0934}', '\u{0933}'), // ऴ -> ळ
    ('\u{0958}', '\u{0915}'), // क़
    ('\u{0959}', '\u{0916}'), // ख़
    ('\u{095A}', '\u{0917}'), // ग़
    ('\u{095B}', '\u{091C}'), // ज़
    ('\u{095C}', '\u{0921}'), // ड़
    ('\u{095D}', '\u{0922}'), // ढ़
    ('\u{095E}', '\u{092B}'), // फ़
    ('\u{095F}', '\u{092F}'), // य़
];

/// 벵골 블록(U+0980~U+09FF)에서 데바나가리와 같은 의미로 할당된 오프셋 범위
const BENGALI_ASSIGNED: &[(u32, u32)] = &[
    (0x01, 0x03),
    (0x05, 0x0C),
    (0x0F, 0x10),
    (0x13, 0x28),
    (0x2A, 0x30),
    (0x32, 0x32),
    (0x36, 0x39),
    (0x3C, 0x44),
    (0x47, 0x48),
    (0x4B, 0x4D),
    (0x5C, 0x5D),
    (0x5F, 0x63),
    (0x66, 0x6F),
];

const BENGALI_OVERRIDES: &[(char, &str)] = &[
    ('ऎ', "এ"),
    ('ऒ', "ও"),
    ('\u{0946}', "\u{09C7}"), // ॆ -> ে
    ('\u{094A}', "\u{09CB}"), // ॊ -> ো
    ('व', "ব"),
    ('ळ', "ল\u{09BC}"),
    ('ऴ', "ল\u{09BC}"),
    ('ॐ', "ওঁ"),
];

/// 아삼 문자는 벵골 블록을 쓰되 र, व가 고유 문자
const ASSAMESE_OVERRIDES: &[(char, &str)] = &[
    ('र', "ৰ"),
    ('व', "ৱ"),
    ('ऎ', "এ"),
    ('ऒ', "ও"),
    ('\u{0946}', "\u{09C7}"),
    ('\u{094A}', "\u{09CB}"),
    ('ळ', "ল\u{09BC}"),
    ('ऴ', "ল\u{09BC}"),
    ('ॐ', "ওঁ"),
];

/// 데바나가리와 같은 배열을 가진 유니코드 블록 정의
#[derive(Debug, Clone, Copy)]
pub struct ScriptBlock {
    /// 스크립트 식별자 (소문자)
    pub name: &'static str,
    /// 블록 시작 코드포인트
    pub base: u32,
    /// 단순 이동이 유효한 오프셋 범위 (양끝 포함)
    pub assigned: &'static [(u32, u32)],
    /// 단순 이동보다 우선하는 문자별 치환
    pub overrides: &'static [(char, &'static str)],
}

impl ScriptBlock {
    fn is_assigned(&self, offset: u32) -> bool {
        self.assigned
            .iter()
            .any(|&(start, end)| (start..=end).contains(&offset))
    }

    fn override_for(&self, ch: char) -> Option<&'static str> {
        self.overrides
            .iter()
            .find(|(from, _)| *from == ch)
            .map(|&(_, to)| to)
    }

    /// 데바나가리 문자 하나를 이 블록으로 옮겨 `out`에 추가
    fn push_from_devanagari(&self, ch: char, out: &mut String) -> Result<(), OracleError> {
        let cp = ch as u32;
        if !(DEVANAGARI_BASE..DEVANAGARI_BASE + BLOCK_SIZE).contains(&cp) {
            out.push(ch);
            return Ok(());
        }

        if let Some(replacement) = self.override_for(ch) {
            out.push_str(replacement);
            return Ok(());
        }

        if SCRIPT_NEUTRAL.contains(&ch) {
            out.push(ch);
            return Ok(());
        }

        let offset = cp - DEVANAGARI_BASE;
        if offset < SHIFTABLE_LIMIT && self.is_assigned(offset) {
            if let Some(shifted) = char::from_u32(self.base + offset) {
                out.push(shifted);
                return Ok(());
            }
        }

        // 합자가 없으면 기본 자음 + 누크타로 분해
        if let Some(&(_, consonant)) = NUKTA_DECOMPOSITIONS.iter().find(|(from, _)| *from == ch) {
            self.push_from_devanagari(consonant, out)?;
            return self.push_from_devanagari(NUKTA, out);
        }

        Err(OracleError::Unsupported {
            target: self.name.to_string(),
            ch,
        })
    }
}

lazy_static! {
    static ref SCRIPTS: HashMap<&'static str, ScriptBlock> = {
        let blocks = [
            ScriptBlock {
                name: "devanagari",
                base: DEVANAGARI_BASE,
                assigned: &[(0x00, 0x6F)],
                overrides: &[],
            },
            ScriptBlock {
                name: "bengali",
                base: 0x0980,
                assigned: BENGALI_ASSIGNED,
                overrides: BENGALI_OVERRIDES,
            },
            ScriptBlock {
                name: "assamese",
                base: 0x0980,
                assigned: BENGALI_ASSIGNED,
                overrides: ASSAMESE_OVERRIDES,
            },
        ];
        blocks.into_iter().map(|block| (block.name, block)).collect()
    };
}

/// 데바나가리 -> 브라흐미 계열 블록 음역기
///
/// 데바나가리가 아닌 문자(라틴 문자, JSON 구문 등)는 그대로 통과하므로
/// 스킴 파일 전체 텍스트를 한 번에 넣어도 됩니다.
#[derive(Debug, Default, Clone, Copy)]
pub struct BlockTransliterator;

impl BlockTransliterator {
    pub fn new() -> Self {
        Self
    }

    /// 등록된 스크립트 조회 (대소문자 무시)
    pub fn script(name: &str) -> Result<&'static ScriptBlock, OracleError> {
        SCRIPTS
            .get(name.to_lowercase().as_str())
            .ok_or_else(|| OracleError::UnknownScript(name.to_string()))
    }

    /// 등록된 스크립트 이름 목록 (정렬됨)
    pub fn scripts() -> Vec<&'static str> {
        let mut names: Vec<&'static str> = SCRIPTS.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Transliterator for BlockTransliterator {
    fn transliterate(&self, source: &str, target: &str, text: &str) -> Result<String, OracleError> {
        let source_block = Self::script(source)?;
        let target_block = Self::script(target)?;

        if source_block.base != DEVANAGARI_BASE {
            return Err(OracleError::UnsupportedPair {
                source: source.to_string(),
                target: target.to_string(),
            });
        }

        let mut out = String::with_capacity(text.len());
        for ch in text.chars() {
            target_block.push_from_devanagari(ch, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to(target: &str, text: &str) -> Result<String, OracleError> {
        BlockTransliterator::new().transliterate("devanagari", target, text)
    }

    #[test]
    fn test_vowels_shift() {
        assert_eq!(to("bengali", "अआइईउऊ").unwrap(), "অআইঈউঊ");
        assert_eq!(to("assamese", "अआइईउऊ").unwrap(), "অআইঈউঊ");
    }

    #[test]
    fn test_assamese_ra_va() {
        assert_eq!(to("assamese", "कर").unwrap(), "কৰ");
        assert_eq!(to("assamese", "व").unwrap(), "ৱ");
        assert_eq!(to("bengali", "कर").unwrap(), "কর");
        assert_eq!(to("bengali", "व").unwrap(), "ব");
    }

    #[test]
    fn test_vowel_marks_and_virama() {
        assert_eq!(to("bengali", "कि").unwrap(), "কি");
        assert_eq!(to("bengali", "क्ष").unwrap(), "ক্ষ");
        assert_eq!(to("bengali", "कं").unwrap(), "কং");
    }

    #[test]
    fn test_nukta_letters() {
        // 벵골 블록에 합자가 있는 경우
        assert_eq!(to("bengali", "\u{095C}").unwrap(), "\u{09DC}");
        assert_eq!(to("bengali", "\u{095F}").unwrap(), "\u{09DF}");
        // 합자가 없으면 분해
        assert_eq!(to("bengali", "\u{0958}").unwrap(), "\u{0995}\u{09BC}");
        assert_eq!(to("assamese", "\u{0931}").unwrap(), "\u{09F0}\u{09BC}");
    }

    #[test]
    fn test_llla_single_nukta() {
        assert_eq!(to("bengali", "\u{0934}").unwrap(), "\u{09B2}\u{09BC}");
        assert_eq!(to("assamese", "\u{0934}").unwrap(), "\u{09B2}\u{09BC}");
    }

    #[test]
    fn test_digits() {
        assert_eq!(to("bengali", "०१२९").unwrap(), "০১২৯");
    }

    #[test]
    fn test_neutral_and_non_devanagari_passthrough() {
        assert_eq!(to("bengali", "।॥").unwrap(), "।॥");
        assert_eq!(
            to("assamese", r#"{"vowels": ["अ"]}"#).unwrap(),
            r#"{"vowels": ["অ"]}"#
        );
        assert_eq!(to("bengali", "").unwrap(), "");
    }

    #[test]
    fn test_unsupported_character() {
        let result = to("bengali", "ऄ");
        assert_eq!(
            result,
            Err(OracleError::Unsupported {
                target: "bengali".to_string(),
                ch: 'ऄ'
            })
        );
        assert!(to("bengali", "\u{0971}").is_err());
    }

    #[test]
    fn test_devanagari_identity() {
        assert_eq!(to("devanagari", "क़ ॐ").unwrap(), "क़ ॐ");
    }

    #[test]
    fn test_unknown_script() {
        assert_eq!(
            to("klingon", "अ"),
            Err(OracleError::UnknownScript("klingon".to_string()))
        );
    }

    #[test]
    fn test_unsupported_pair() {
        let result = BlockTransliterator::new().transliterate("bengali", "assamese", "অ");
        assert!(matches!(result, Err(OracleError::UnsupportedPair { .. })));
    }

    #[test]
    fn test_case_insensitive_lookup() {
        assert!(BlockTransliterator::script("Assamese").is_ok());
        assert_eq!(
            BlockTransliterator::scripts(),
            vec!["assamese", "bengali", "devanagari"]
        );
    }
}

//! 두 매핑 사이의 키 단위 변경 요약 (로그용)

use super::charmap::CharMap;

/// 키 단위 변경 내역
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyChanges {
    /// 새로 생긴 키
    pub added: Vec<String>,
    /// 사라진 키
    pub removed: Vec<String>,
    /// 값이 바뀐 키
    pub changed: Vec<String>,
}

impl KeyChanges {
    /// `before` -> `after` 변경 내역 계산
    ///
    /// 추가/변경은 `after`의 키 순서, 삭제는 `before`의 키 순서를 따릅니다.
    pub fn between(before: &CharMap, after: &CharMap) -> Self {
        let mut changes = Self::default();

        for (key, values) in after.iter() {
            match before.get(key) {
                None => changes.added.push(key.to_string()),
                Some(prior) if prior != values => changes.changed.push(key.to_string()),
                Some(_) => {}
            }
        }

        changes.removed = before
            .keys()
            .filter(|key| !after.contains_key(key))
            .map(str::to_string)
            .collect();

        changes
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

impl std::fmt::Display for KeyChanges {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "추가 {:?}, 삭제 {:?}, 변경 {:?}",
            self.added, self.removed, self.changed
        )
    }
}

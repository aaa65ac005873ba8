//! 스킴 디렉토리 탐색 및 파일 로드/저장

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::SyncConfig;
use crate::mapping::{CharMap, MappingError};

/// 디스크에서 읽은 스킴 파일 (원문 + 파싱 결과)
///
/// 원문은 빠른 경로 비교와 "바뀐 경우에만 쓰기" 판정에 그대로 쓰입니다.
#[derive(Debug, Clone)]
pub struct StoredMap {
    pub path: PathBuf,
    pub script: String,
    pub raw: String,
    pub map: CharMap,
}

impl StoredMap {
    /// 원문 텍스트에서 생성
    pub fn from_text(
        path: impl Into<PathBuf>,
        script: impl Into<String>,
        raw: impl Into<String>,
    ) -> Result<Self, MappingError> {
        let raw = raw.into();
        let map = CharMap::from_json(&raw)?;
        Ok(Self {
            path: path.into(),
            script: script.into(),
            raw,
            map,
        })
    }

    /// 파일에서 로드
    pub fn load(path: &Path, script: &str) -> Result<Self, MappingError> {
        let raw = fs::read_to_string(path)?;
        Self::from_text(path, script, raw)
    }
}

/// 재생성 후보 파일
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub script: String,
}

/// 스크립트당 파일 하나씩 들어있는 스킴 디렉토리
///
/// 파일 이름 규칙: `<스크립트 이름 소문자>.<확장자>`
#[derive(Debug, Clone)]
pub struct SchemeStore {
    dir: PathBuf,
    extension: String,
    variant_separator: char,
}

impl SchemeStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>, variant_separator: char) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
            variant_separator,
        }
    }

    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(
            &config.schemes_dir,
            config.extension.as_str(),
            config.variant_separator,
        )
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 스크립트의 파일 경로
    pub fn path_for(&self, script: &str) -> PathBuf {
        self.dir
            .join(format!("{}.{}", script.to_lowercase(), self.extension))
    }

    /// 파일 경로 -> 스크립트 이름 (확장자가 다르면 None)
    pub fn script_id(&self, path: &Path) -> Option<String> {
        let ext = path.extension()?.to_str()?;
        if !ext.eq_ignore_ascii_case(&self.extension) {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        if stem.is_empty() {
            return None;
        }
        Some(stem.to_lowercase())
    }

    /// 보조/변형 스킴인지 확인 (예: `devanagari_vowel_to_marks`)
    pub fn is_variant(&self, script: &str) -> bool {
        script.contains(self.variant_separator)
    }

    /// 기준 스크립트 파일 로드
    pub fn load_reference(&self, script: &str) -> Result<StoredMap, MappingError> {
        StoredMap::load(&self.path_for(script), &script.to_lowercase())
    }

    /// 재생성 후보 목록 (파일 이름 순)
    ///
    /// 기준 스크립트 자신과 보조/변형 스킴은 제외합니다.
    pub fn candidates(&self, reference_script: &str) -> io::Result<Vec<Candidate>> {
        let reference = reference_script.to_lowercase();
        let mut candidates = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            // 심볼릭 링크는 대상 파일 기준으로 판단 (끊어진 링크는 건너뜀)
            match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => continue,
                Err(e) => {
                    log::debug!("후보 제외: {} ({})", path.display(), e);
                    continue;
                }
            }
            let Some(script) = self.script_id(&path) else {
                continue;
            };
            if script == reference || self.is_variant(&script) {
                log::debug!("후보 제외: {}", path.display());
                continue;
            }
            candidates.push(Candidate { path, script });
        }

        candidates.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(candidates)
    }

    /// 후보 파일 로드
    pub fn load(&self, candidate: &Candidate) -> Result<StoredMap, MappingError> {
        StoredMap::load(&candidate.path, &candidate.script)
    }

    /// 원자적 쓰기: 같은 디렉토리의 임시 파일에 쓴 뒤 이름 변경
    ///
    /// 실패하면 기존 파일은 그대로 남습니다.
    pub fn write(&self, path: &Path, text: &str) -> io::Result<()> {
        let mut tmp = path.to_path_buf();
        tmp.set_extension(format!("{}.tmp", self.extension));
        if let Err(e) = fs::write(&tmp, text) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        fs::rename(&tmp, path).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &Path) -> SchemeStore {
        SchemeStore::new(dir, "json", '_')
    }

    #[test]
    fn test_script_id() {
        let store = store(Path::new("/schemes"));
        assert_eq!(
            store.script_id(Path::new("/schemes/Assamese.json")),
            Some("assamese".to_string())
        );
        assert_eq!(store.script_id(Path::new("/schemes/assamese.toml")), None);
        assert_eq!(store.script_id(Path::new("/schemes/README")), None);
        assert_eq!(
            store.path_for("Bengali"),
            PathBuf::from("/schemes/bengali.json")
        );
    }

    #[test]
    fn test_candidates_filtering() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "devanagari.json",
            "_devanagari_vowel_to_marks.json",
            "gujarati.json",
            "assamese.json",
            "notes.txt",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let candidates = store(dir.path()).candidates("Devanagari").unwrap();
        let scripts: Vec<&str> = candidates.iter().map(|c| c.script.as_str()).collect();
        assert_eq!(scripts, vec!["assamese", "gujarati"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_candidates_follow_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let shared = tempfile::tempdir().unwrap();
        fs::write(shared.path().join("assamese.json"), "{}").unwrap();
        std::os::unix::fs::symlink(
            shared.path().join("assamese.json"),
            dir.path().join("assamese.json"),
        )
        .unwrap();

        let candidates = store(dir.path()).candidates("devanagari").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].script, "assamese");
    }

    #[test]
    fn test_load_keeps_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let raw = "{\"a\":   [\"x\"]}";
        fs::write(dir.path().join("assamese.json"), raw).unwrap();
        let store = store(dir.path());
        let candidate = Candidate {
            path: store.path_for("assamese"),
            script: "assamese".to_string(),
        };

        let loaded = store.load(&candidate).unwrap();
        assert_eq!(loaded.raw, raw);
        assert_eq!(loaded.map.entry_at("a", 0), Some("x"));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("devanagari.json"), "[1, 2").unwrap();
        let result = store(dir.path()).load_reference("devanagari");
        assert!(matches!(result, Err(MappingError::ParseError(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = store(dir.path()).load_reference("devanagari");
        assert!(matches!(result, Err(MappingError::IoError(_))));
    }

    #[test]
    fn test_write_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(dir.path());
        let path = store.path_for("assamese");
        fs::write(&path, "old").unwrap();

        store.write(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        // 임시 파일이 남지 않음
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}

//! 설정 파일 로드 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// 설정 파일 경로를 지정하는 환경 변수
pub const CONFIG_ENV: &str = "CHARMAP_SYNC_CONFIG";

/// 기본 설정 파일 이름 (작업 디렉토리 기준)
pub const DEFAULT_CONFIG_FILE: &str = "charmap-sync.json";

/// 동기화 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SyncConfig {
    /// 스킴 파일 디렉토리
    #[serde(default = "default_schemes_dir")]
    pub schemes_dir: PathBuf,
    /// 기준 스크립트
    #[serde(default = "default_reference_script")]
    pub reference_script: String,
    /// 이번 실행에서 재생성할 대상 스크립트 목록
    #[serde(default = "default_targets")]
    pub targets: Vec<String>,
    /// 스킴 파일 확장자 (점 제외)
    #[serde(default = "default_extension")]
    pub extension: String,
    /// 이 문자가 이름에 들어간 파일은 보조/변형 스킴으로 보고 건너뜀
    #[serde(default = "default_variant_separator")]
    pub variant_separator: char,
    /// 기준 파일 전체를 한 번에 음역해 비교하는 빠른 경로 사용 여부
    #[serde(default = "default_fast_path")]
    pub fast_path: bool,
    /// 파일을 쓰지 않고 변경 여부만 보고
    #[serde(default)]
    pub dry_run: bool,
}

fn default_schemes_dir() -> PathBuf {
    PathBuf::from("src/schemes/brahmic")
}

fn default_reference_script() -> String {
    "devanagari".to_string()
}

fn default_targets() -> Vec<String> {
    vec!["assamese".to_string()]
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_variant_separator() -> char {
    '_'
}

fn default_fast_path() -> bool {
    true
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            schemes_dir: default_schemes_dir(),
            reference_script: default_reference_script(),
            targets: default_targets(),
            extension: default_extension(),
            variant_separator: default_variant_separator(),
            fast_path: default_fast_path(),
            dry_run: false,
        }
    }
}

impl SyncConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 스킴 디렉토리 설정
    pub fn with_schemes_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.schemes_dir = dir.into();
        self
    }

    /// 대상 스크립트 목록 설정
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// 빠른 경로 사용 여부 설정
    pub fn with_fast_path(mut self, enabled: bool) -> Self {
        self.fast_path = enabled;
        self
    }

    /// dry-run 설정
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// 대상 스크립트인지 확인 (대소문자 무시)
    pub fn is_target(&self, script: &str) -> bool {
        self.targets.iter().any(|t| t.eq_ignore_ascii_case(script))
    }
}

/// 설정 로드 에러
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 읽기 실패
    IoError(PathBuf, std::io::Error),
    /// JSON 파싱 실패
    ParseError(PathBuf, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "설정 파일 읽기 오류 ({}): {}", path.display(), e)
            }
            ConfigError::ParseError(path, s) => {
                write!(f, "설정 파일 파싱 오류 ({}): {}", path.display(), s)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// 설정 파일 경로: `$CHARMAP_SYNC_CONFIG`, 없으면 ./charmap-sync.json
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// 설정 로드 (파일 없으면 기본값, 파싱 실패는 에러)
pub fn load_config() -> Result<SyncConfig, ConfigError> {
    load_config_from(config_path())
}

/// 지정 경로에서 설정 로드
pub fn load_config_from(path: PathBuf) -> Result<SyncConfig, ConfigError> {
    match fs::read_to_string(&path) {
        Ok(content) => {
            serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(path, e.to_string()))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("설정 파일 없음, 기본값 사용: {}", path.display());
            Ok(SyncConfig::default())
        }
        Err(e) => Err(ConfigError::IoError(path, e)),
    }
}

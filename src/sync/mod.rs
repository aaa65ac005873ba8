//! 파생 스킴 재생성 배치
//!
//! 기준 매핑을 한 번 로드한 뒤, 대상 스크립트 파일을 하나씩 순서대로 처리합니다:
//!
//! 1. **로드**: 파생 파일 원문과 파싱 결과
//! 2. **병합**: 빠른 경로 비교 후 필요하면 키/위치 단위 병합 ([`merge`])
//! 3. **직렬화**: 정규 텍스트가 저장된 원문과 다를 때만 쓰기
//!
//! 파일 로드/쓰기 실패는 해당 파일만 실패로 기록하고 다음 파일로 넘어갑니다.
//! 오라클 실패는 재시도나 대체값 없이 전체 실행을 중단합니다.

mod loader;
pub mod merge;

pub use loader::{Candidate, SchemeStore, StoredMap};
pub use merge::{MergeEngine, MergeError, MergeOutcome, MergeResult, Resolution};

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use crate::config::SyncConfig;
use crate::mapping::{to_canonical_json, KeyChanges, MappingError};
use crate::oracle::Transliterator;

/// 파일 하나의 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// 전체 음역 결과가 저장된 파일과 같음
    FastPath,
    /// 병합 결과가 저장된 파일과 같음 (쓰기 없음)
    UpToDate,
    /// 파일 갱신됨
    Updated { preserved: usize, regenerated: usize },
    /// dry-run: 갱신이 필요함
    WouldUpdate { preserved: usize, regenerated: usize },
    /// 로드/쓰기 실패 (해당 파일만)
    Failed(String),
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed(_))
    }
}

/// 파일별 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub script: String,
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// 배치 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub files: Vec<FileReport>,
}

impl SyncReport {
    pub fn outcome_for(&self, script: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|f| f.script == script)
            .map(|f| &f.outcome)
    }

    pub fn updated_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Updated { .. }))
            .count()
    }

    /// dry-run에서 갱신이 필요한 파일 수
    pub fn stale_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::WouldUpdate { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.files.iter().filter(|f| f.outcome.is_failure()).count()
    }
}

/// 동기화 에러
#[derive(Debug)]
pub enum SyncError {
    /// 스킴 디렉토리 읽기 실패 (전체 중단)
    Storage { path: PathBuf, source: io::Error },
    /// 파일 로드/파싱 실패
    Load { path: PathBuf, source: MappingError },
    /// 오라클 실패 (전체 중단)
    Oracle { path: PathBuf, source: MergeError },
    /// 병합 결과 직렬화 실패
    Serialize { path: PathBuf, source: MappingError },
    /// 파일 쓰기 실패
    Write { path: PathBuf, source: io::Error },
}

impl SyncError {
    /// 실행 전체를 중단해야 하는 에러인지
    pub fn is_fatal(&self) -> bool {
        matches!(self, SyncError::Oracle { .. } | SyncError::Storage { .. })
    }
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Storage { path, source } => {
                write!(f, "스킴 디렉토리 읽기 실패 ({}): {}", path.display(), source)
            }
            SyncError::Load { path, source } => {
                write!(f, "로드 실패 ({}): {}", path.display(), source)
            }
            SyncError::Oracle { path, source } => {
                write!(f, "음역 실패 ({}): {}", path.display(), source)
            }
            SyncError::Serialize { path, source } => {
                write!(f, "직렬화 실패 ({}): {}", path.display(), source)
            }
            SyncError::Write { path, source } => {
                write!(f, "쓰기 실패 ({}): {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Storage { source, .. } | SyncError::Write { source, .. } => Some(source),
            SyncError::Load { source, .. } | SyncError::Serialize { source, .. } => Some(source),
            SyncError::Oracle { source, .. } => Some(source),
        }
    }
}

/// 배치 실행기
pub struct Synchronizer<'a, T: ?Sized> {
    config: &'a SyncConfig,
    store: SchemeStore,
    oracle: &'a T,
}

impl<'a, T: Transliterator + ?Sized> Synchronizer<'a, T> {
    pub fn new(config: &'a SyncConfig, oracle: &'a T) -> Self {
        Self {
            config,
            store: SchemeStore::from_config(config),
            oracle,
        }
    }

    /// 전체 배치 실행
    ///
    /// 기준 파일 로드 실패, 디렉토리 읽기 실패, 오라클 실패는 `Err`로 중단합니다.
    /// 그 전에 처리된 파일은 이미 디스크에 반영된 상태로 남습니다.
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        let reference_path = self.store.path_for(&self.config.reference_script);
        let reference = self
            .store
            .load_reference(&self.config.reference_script)
            .map_err(|source| SyncError::Load {
                path: reference_path,
                source,
            })?;
        log::debug!(
            "기준 매핑 로드: {} (키 {}개, 항목 {}개)",
            reference.path.display(),
            reference.map.len(),
            reference.map.entry_count()
        );

        let candidates = self
            .store
            .candidates(&self.config.reference_script)
            .map_err(|source| SyncError::Storage {
                path: self.store.dir().to_path_buf(),
                source,
            })?;

        let mut report = SyncReport::default();
        let mut seen = HashSet::new();

        for candidate in &candidates {
            if !self.config.is_target(&candidate.script) {
                log::debug!("대상 아님, 건너뜀: {}", candidate.script);
                continue;
            }
            seen.insert(candidate.script.clone());

            let outcome = match self.sync_file(&reference, candidate) {
                Ok(outcome) => outcome,
                Err(e) if e.is_fatal() => {
                    log::error!("{}", e);
                    return Err(e);
                }
                Err(e) => {
                    log::warn!("{}", e);
                    FileOutcome::Failed(e.to_string())
                }
            };

            report.files.push(FileReport {
                script: candidate.script.clone(),
                path: candidate.path.clone(),
                outcome,
            });
        }

        for target in &self.config.targets {
            if !seen.contains(&target.to_lowercase()) {
                log::warn!(
                    "대상 스크립트 파일 없음: {}",
                    self.store.path_for(target).display()
                );
            }
        }

        Ok(report)
    }

    /// 파일 하나 처리
    pub fn sync_file(
        &self,
        reference: &StoredMap,
        candidate: &Candidate,
    ) -> Result<FileOutcome, SyncError> {
        let derived = self.store.load(candidate).map_err(|source| SyncError::Load {
            path: candidate.path.clone(),
            source,
        })?;

        let engine = MergeEngine::new(self.oracle, &self.config.reference_script);
        let result = match engine
            .merge(reference, &derived, self.config.fast_path)
            .map_err(|source| SyncError::Oracle {
                path: candidate.path.clone(),
                source,
            })? {
            MergeOutcome::FastPath => {
                log::debug!("변경 없음 (전체 음역 일치): {}", candidate.path.display());
                return Ok(FileOutcome::FastPath);
            }
            MergeOutcome::Merged(result) => result,
        };

        let text = to_canonical_json(&result.mapping).map_err(|source| SyncError::Serialize {
            path: candidate.path.clone(),
            source,
        })?;
        if text == derived.raw {
            log::debug!("변경 없음: {}", candidate.path.display());
            return Ok(FileOutcome::UpToDate);
        }

        let changes = KeyChanges::between(&derived.map, &result.mapping);
        log::info!("차이 발견: {} ({})", candidate.path.display(), changes);

        if self.config.dry_run {
            return Ok(FileOutcome::WouldUpdate {
                preserved: result.preserved,
                regenerated: result.regenerated,
            });
        }

        self.store
            .write(&candidate.path, &text)
            .map_err(|source| SyncError::Write {
                path: candidate.path.clone(),
                source,
            })?;
        log::info!(
            "갱신 완료: {} (빈칸 유지 {}개, 재생성 {}개)",
            candidate.path.display(),
            result.preserved,
            result.regenerated
        );

        Ok(FileOutcome::Updated {
            preserved: result.preserved,
            regenerated: result.regenerated,
        })
    }
}

//! charmap-sync - 데바나가리 기준 매핑에서 파생 스크립트 매핑 재생성

use std::process::ExitCode;

use charmap_sync::config::{config_path, load_config};
use charmap_sync::{BlockTransliterator, Synchronizer};

/// dry-run에서 갱신이 필요한 파일이 있을 때의 종료 코드
const EXIT_STALE: u8 = 2;

fn main() -> ExitCode {
    // 로깅 초기화 (기본 info)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("설정: {} -> {:?}", config_path().display(), config);

    let oracle = BlockTransliterator::new();
    let report = match Synchronizer::new(&config, &oracle).run() {
        Ok(report) => report,
        Err(e) => {
            log::error!("동기화 중단: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "완료: 처리 {}개, 갱신 {}개, 갱신 필요 {}개, 실패 {}개",
        report.files.len(),
        report.updated_count(),
        report.stale_count(),
        report.failed_count()
    );

    if report.failed_count() > 0 {
        ExitCode::FAILURE
    } else if config.dry_run && report.stale_count() > 0 {
        ExitCode::from(EXIT_STALE)
    } else {
        ExitCode::SUCCESS
    }
}

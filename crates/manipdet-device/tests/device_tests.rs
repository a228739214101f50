use candle_core::Device;
use tempfile::TempDir;

use manipdet_core::config::RunConfig;
use manipdet_core::types::RunMode;
use manipdet_device::{select_device, SelectedDevice};

fn accelerator_present() -> bool {
    candle_core::utils::cuda_is_available() || candle_core::utils::metal_is_available()
}

#[test]
fn falls_back_to_cpu_without_accelerator() {
    if accelerator_present() {
        return;
    }
    let config = RunConfig::default();
    let selected = select_device(&config).expect("select");
    assert!(!selected.is_accelerator());
    assert!(matches!(selected.device(), Device::Cpu));
    assert_eq!(selected.index(), None);
}

#[test]
fn accelerator_variant_reports_its_ordinal() {
    let selected = SelectedDevice::Accelerator {
        index: 0,
        device: Device::Cpu,
    };
    assert!(selected.is_accelerator());
    assert_eq!(selected.index(), Some(0));
}

#[test]
fn requested_ordinal_is_preserved() {
    let config = RunConfig {
        gpu: 0,
        ..RunConfig::default()
    };
    let selected = select_device(&config).expect("select");
    if selected.is_accelerator() {
        assert_eq!(selected.index(), Some(0));
    }
}

#[test]
fn fallback_logs_one_no_gpu_line() {
    if accelerator_present() {
        return;
    }
    let tmp = TempDir::new().unwrap();
    let config = RunConfig {
        log_dir: tmp.path().to_path_buf(),
        ..RunConfig::default()
    };
    let (subscriber, guard) =
        manipdet_core::logging::build(&config, &RunMode::Eval).expect("build subscriber");
    tracing::subscriber::with_default(subscriber, || {
        select_device(&config).expect("select");
    });

    let contents = std::fs::read_to_string(guard.path()).unwrap();
    let hits = contents
        .lines()
        .filter(|line| line.contains("no gpu found"))
        .count();
    assert_eq!(hits, 1);
}

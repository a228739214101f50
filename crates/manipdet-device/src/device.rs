//! Compute device selection for experiment runs.

use anyhow::Result;
use candle_core::Device;
use tracing::info;

use manipdet_core::config::RunConfig;

/// Which compute device a run ended up with.
///
/// `Fallback` always wraps the CPU device. Callers check capability with
/// `is_accelerator()` instead of comparing device handles.
#[derive(Debug, Clone)]
pub enum SelectedDevice {
    Accelerator { index: usize, device: Device },
    Fallback { device: Device },
}

impl SelectedDevice {
    pub fn is_accelerator(&self) -> bool {
        matches!(self, SelectedDevice::Accelerator { .. })
    }

    pub fn device(&self) -> &Device {
        match self {
            SelectedDevice::Accelerator { device, .. } => device,
            SelectedDevice::Fallback { device } => device,
        }
    }

    /// The accelerator ordinal, or `None` on the CPU fallback.
    pub fn index(&self) -> Option<usize> {
        match self {
            SelectedDevice::Accelerator { index, .. } => Some(*index),
            SelectedDevice::Fallback { .. } => None,
        }
    }
}

/// Pick the accelerator named by `config.gpu`, or fall back to the CPU.
///
/// Accelerator absence is not an error: it is logged once at INFO and the
/// CPU handle is returned. Failing to construct a device that the runtime
/// reported as available does propagate.
pub fn select_device(config: &RunConfig) -> Result<SelectedDevice> {
    if candle_core::utils::cuda_is_available() {
        let device = Device::new_cuda(config.gpu)?;
        info!("using cuda accelerator {}", config.gpu);
        return Ok(SelectedDevice::Accelerator {
            index: config.gpu,
            device,
        });
    }
    if candle_core::utils::metal_is_available() {
        let device = Device::new_metal(config.gpu)?;
        info!("using metal accelerator {}", config.gpu);
        return Ok(SelectedDevice::Accelerator {
            index: config.gpu,
            device,
        });
    }
    info!("no gpu found, program is running on cpu!");
    Ok(SelectedDevice::Fallback {
        device: Device::Cpu,
    })
}

use crate::params::ParamError;

/// Errors from building a fastener solid.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OpError {
    #[error("kernel error: {0}")]
    Kernel(#[from] fastener_kernel::KernelError),

    #[error("invalid parameter: {0}")]
    Param(#[from] ParamError),
}

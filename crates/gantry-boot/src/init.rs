//! The initialization state machine.
//!
//! One calling convention is chosen per bootstrap, in priority order. Every
//! attempt's outcome goes through [`classify`], a pure function: an abrupt
//! unwind is a timing race worth retrying; anything else is a real fault and
//! fails immediately. The retry budget is sized by device class and the
//! machine never runs past it.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use gantry_sdk::{EntryConvention, EntryReturn, HostEnv, ModuleFault, ModuleRuntime};

use crate::device::DeviceClass;
use crate::diagnostics;
use crate::error::{BootError, InitError};
use crate::options::BootOptions;

/// Highest status code the exported and named conventions may return on
/// success.
const MAX_OK_STATUS: i64 = 1_000_000;

/// Observable states of one initialization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    NotStarted,
    Attempting { attempt: u32 },
    Retrying { next_attempt: u32 },
    Succeeded,
    Failed,
}

/// How a single attempt's outcome is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Classification {
    Succeeded,
    /// The transient marker: retry if budget remains.
    Transient,
    /// A real fault; never retried.
    Fatal(ModuleFault),
}

/// Classify an entry-point outcome under the convention it was invoked with.
pub(crate) fn classify(
    convention: EntryConvention,
    outcome: Result<EntryReturn, ModuleFault>,
) -> Classification {
    match outcome {
        Ok(EntryReturn::Unit) => Classification::Succeeded,
        Ok(EntryReturn::Code(code)) => match convention {
            // The bound entry point is void; a numeric return means the call
            // landed somewhere it should not have.
            EntryConvention::Bound => Classification::Fatal(ModuleFault::Message(format!(
                "void entry point returned {code}; capability context creation likely failed"
            ))),
            EntryConvention::Exported | EntryConvention::Named => {
                if (0..=MAX_OK_STATUS).contains(&code) {
                    Classification::Succeeded
                } else {
                    Classification::Fatal(ModuleFault::Code(code))
                }
            }
        },
        Err(ModuleFault::Unwind) => Classification::Transient,
        Err(fault) => Classification::Fatal(fault),
    }
}

/// Drives the module's initialization entry point to a terminal state.
///
/// Must not be run twice against the same handle; nothing here defends
/// against double-invocation.
pub struct VmInitializer {
    convention: EntryConvention,
    max_retries: u32,
    delay: Duration,
    state: InitState,
}

impl VmInitializer {
    /// Pick the calling convention for this bootstrap, in priority order.
    pub fn select<R>(
        runtime: &R,
        class: DeviceClass,
        options: &BootOptions,
    ) -> Result<Self, BootError>
    where
        R: ModuleRuntime,
    {
        let convention = EntryConvention::PRIORITY
            .iter()
            .copied()
            .find(|&convention| runtime.has_entry(convention))
            .ok_or(BootError::UnsupportedModule)?;
        Ok(Self {
            convention,
            max_retries: options.max_retries(class),
            delay: options.retry_delay,
            state: InitState::NotStarted,
        })
    }

    pub fn convention(&self) -> EntryConvention {
        self.convention
    }

    pub fn state(&self) -> InitState {
        self.state
    }

    /// Run attempts until success, a fatal fault, or budget exhaustion.
    pub async fn run<R, H>(
        &mut self,
        runtime: &mut R,
        env: &H,
        options: &BootOptions,
    ) -> Result<(), BootError>
    where
        R: ModuleRuntime,
        H: HostEnv,
    {
        let mut attempt = 1u32;
        loop {
            self.state = InitState::Attempting { attempt };
            debug!(attempt, convention = %self.convention, "invoking initialization entry point");
            let outcome = runtime.invoke_entry(self.convention);
            match classify(self.convention, outcome) {
                Classification::Succeeded => {
                    self.state = InitState::Succeeded;
                    info!(attempt, "initialization entry point completed");
                    return Ok(());
                }
                Classification::Transient if attempt <= self.max_retries => {
                    self.state = InitState::Retrying {
                        next_attempt: attempt + 1,
                    };
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = self.delay.as_millis() as u64,
                        "entry point aborted before the runtime was ready; retrying"
                    );
                    sleep(self.delay).await;
                    attempt += 1;
                }
                Classification::Transient => {
                    self.state = InitState::Failed;
                    let report = diagnostics::describe(env, runtime, options, self.convention);
                    error!(attempts = attempt, %report, "initialization kept aborting; retry budget exhausted");
                    return Err(InitError::TransientExhausted {
                        attempts: attempt,
                        report,
                    }
                    .into());
                }
                Classification::Fatal(fault) => {
                    self.state = InitState::Failed;
                    let report = diagnostics::describe(env, runtime, options, self.convention);
                    error!(attempt, %fault, %report, "initialization failed");
                    return Err(InitError::Fatal {
                        attempt,
                        fault,
                        report,
                    }
                    .into());
                }
            }
        }
    }
}

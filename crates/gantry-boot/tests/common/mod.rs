//! Shared test doubles for the host environment and the module stack.
//!
//! `FakeHost` scripts the surface tree and the acceleration probe;
//! `FakeSource` → `FakeFactory` → `FakeRuntime` script the module side.
//! Observable side effects accumulate in a shared `ModuleLog` so tests can
//! inspect them after bootstrap consumed (or dropped) the runtime.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;

use gantry_sdk::{
    AccelReport, ArtifactResolver, EntryConvention, EntryReturn, FetchError, FsError, HostEnv,
    HostError, ImageDevice, InstantiateOptions, ModuleFactory, ModuleFault, ModuleRuntime,
    ModuleSource, PlatformInfo, SurfaceInfo, SurfaceSpec, VirtualFs, WorkerState,
};

/// Route tracing output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub struct FakeHost {
    pub platform: PlatformInfo,
    pub hint: Option<String>,
    pub surfaces: HashMap<String, SurfaceInfo>,
    /// `Err` makes the acceleration probe fail with that reason.
    pub accel: Result<String, String>,
    pub created: u32,
    pub probes: u32,
    /// Created surfaces end up detached (a defective host).
    pub create_detached: bool,
    /// Creation "succeeds" but the surface never becomes discoverable.
    pub create_vanishes: bool,
}

impl FakeHost {
    pub fn standard() -> Self {
        Self {
            platform: PlatformInfo {
                platform: "Linux x86_64".to_string(),
                concurrency: Some(12),
                shared_memory: true,
            },
            hint: None,
            surfaces: HashMap::new(),
            accel: Ok("accel 2.0".to_string()),
            created: 0,
            probes: 0,
            create_detached: false,
            create_vanishes: false,
        }
    }

    pub fn constrained() -> Self {
        let mut host = Self::standard();
        host.platform = PlatformInfo {
            platform: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)".to_string(),
            concurrency: Some(2),
            shared_memory: false,
        };
        host
    }

    pub fn with_hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    pub fn with_surface(mut self, id: &str, info: SurfaceInfo) -> Self {
        self.surfaces.insert(id.to_string(), info);
        self
    }

    pub fn without_accel(mut self, reason: &str) -> Self {
        self.accel = Err(reason.to_string());
        self
    }
}

impl HostEnv for FakeHost {
    fn platform(&self) -> PlatformInfo {
        self.platform.clone()
    }

    fn variant_hint(&self) -> Option<String> {
        self.hint.clone()
    }

    fn base_url(&self) -> String {
        "https://host.example/app".to_string()
    }

    fn lookup_surface(&self, id: &str) -> Option<SurfaceInfo> {
        self.surfaces.get(id).copied()
    }

    fn create_surface(&mut self, spec: &SurfaceSpec) -> Result<(), HostError> {
        self.created += 1;
        if self.create_vanishes {
            return Ok(());
        }
        self.surfaces.insert(
            spec.id.clone(),
            SurfaceInfo {
                width: spec.width,
                height: spec.height,
                attached: !self.create_detached,
            },
        );
        Ok(())
    }

    fn resize_surface(&mut self, id: &str, width: u32, height: u32) -> Result<(), HostError> {
        match self.surfaces.get_mut(id) {
            Some(surface) => {
                surface.width = width;
                surface.height = height;
                Ok(())
            }
            None => Err(HostError::new(format!("no surface `{id}` to resize"))),
        }
    }

    fn probe_acceleration(&mut self) -> Result<AccelReport, HostError> {
        self.probes += 1;
        match &self.accel {
            Ok(backend) => Ok(AccelReport {
                backend: backend.clone(),
            }),
            Err(reason) => Err(HostError::new(reason.clone())),
        }
    }
}

/// Observable side effects of the fake module stack.
#[derive(Default)]
pub struct ModuleLog {
    pub fetched: RefCell<Vec<String>>,
    pub invocations: RefCell<u32>,
    pub mkdirs: RefCell<Vec<String>>,
    /// Work dirs of the image devices attached to the runtime.
    pub devices: RefCell<Vec<String>>,
}

/// Scripted behavior of the runtime a `FakeFactory` produces.
#[derive(Clone)]
pub struct RuntimeBehavior {
    pub heap_len: Option<usize>,
    pub conventions: Vec<EntryConvention>,
    /// Outcomes returned per entry invocation; drained, then `Ok(Unit)`.
    pub outcomes: Rc<RefCell<VecDeque<Result<EntryReturn, ModuleFault>>>>,
    /// `None`: no worker pool. `Some(n)`: the pool reports loaded starting
    /// with the `n + 1`-th snapshot.
    pub pool_loaded_after: Option<u32>,
    pub instantiate_fails: bool,
}

impl RuntimeBehavior {
    pub fn ready() -> Self {
        Self {
            heap_len: Some(64 * 1024 * 1024),
            conventions: vec![EntryConvention::Bound],
            outcomes: Rc::new(RefCell::new(VecDeque::new())),
            pool_loaded_after: None,
            instantiate_fails: false,
        }
    }

    pub fn with_outcomes(self, outcomes: Vec<Result<EntryReturn, ModuleFault>>) -> Self {
        *self.outcomes.borrow_mut() = outcomes.into();
        self
    }

    pub fn with_conventions(mut self, conventions: Vec<EntryConvention>) -> Self {
        self.conventions = conventions;
        self
    }

    pub fn with_pool_loaded_after(mut self, snapshots: u32) -> Self {
        self.pool_loaded_after = Some(snapshots);
        self
    }

    pub fn without_heap(mut self) -> Self {
        self.heap_len = None;
        self
    }

    pub fn failing_instantiate(mut self) -> Self {
        self.instantiate_fails = true;
        self
    }
}

pub struct FakeSource {
    pub log: Rc<ModuleLog>,
    /// Binaries that fail to fetch, with the error to raise.
    pub failing: HashMap<String, FetchError>,
    pub behavior: RuntimeBehavior,
}

impl FakeSource {
    pub fn new(behavior: RuntimeBehavior) -> Self {
        Self {
            log: Rc::new(ModuleLog::default()),
            failing: HashMap::new(),
            behavior,
        }
    }

    pub fn failing(mut self, binary: &str, error: FetchError) -> Self {
        self.failing.insert(binary.to_string(), error);
        self
    }
}

#[async_trait(?Send)]
impl ModuleSource for FakeSource {
    type Factory = FakeFactory;

    async fn fetch(
        &self,
        binary_name: &str,
        _resolver: &ArtifactResolver,
    ) -> Result<FakeFactory, FetchError> {
        self.log.fetched.borrow_mut().push(binary_name.to_string());
        if let Some(error) = self.failing.get(binary_name) {
            return Err(error.clone());
        }
        Ok(FakeFactory {
            log: Rc::clone(&self.log),
            behavior: self.behavior.clone(),
        })
    }
}

pub struct FakeFactory {
    log: Rc<ModuleLog>,
    behavior: RuntimeBehavior,
}

impl std::fmt::Debug for FakeFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeFactory").finish_non_exhaustive()
    }
}

#[async_trait(?Send)]
impl ModuleFactory for FakeFactory {
    type Runtime = FakeRuntime;

    async fn instantiate(&self, options: InstantiateOptions) -> Result<FakeRuntime, FetchError> {
        if self.behavior.instantiate_fails {
            return Err(FetchError::Host {
                name: options.main_artifact_url,
                reason: "instantiation rejected by host".to_string(),
            });
        }
        Ok(FakeRuntime::with(
            Rc::clone(&self.log),
            self.behavior.clone(),
        ))
    }
}

pub struct FakeFs {
    log: Rc<ModuleLog>,
}

impl VirtualFs for FakeFs {
    fn mkdir(&mut self, path: &str) -> Result<(), FsError> {
        let mut dirs = self.log.mkdirs.borrow_mut();
        if dirs.iter().any(|dir| dir == path) {
            return Err(FsError::AlreadyExists(path.to_string()));
        }
        dirs.push(path.to_string());
        Ok(())
    }
}

pub struct FakeRuntime {
    log: Rc<ModuleLog>,
    behavior: RuntimeBehavior,
    fs: FakeFs,
    pool_snapshots: RefCell<u32>,
}

impl std::fmt::Debug for FakeRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeRuntime")
            .field("pool_snapshots", &self.pool_snapshots)
            .finish_non_exhaustive()
    }
}

impl FakeRuntime {
    pub fn with(log: Rc<ModuleLog>, behavior: RuntimeBehavior) -> Self {
        Self {
            fs: FakeFs {
                log: Rc::clone(&log),
            },
            log,
            behavior,
            pool_snapshots: RefCell::new(0),
        }
    }
}

impl ModuleRuntime for FakeRuntime {
    fn heap_len(&self) -> Option<usize> {
        self.behavior.heap_len
    }

    fn fs(&mut self) -> &mut dyn VirtualFs {
        &mut self.fs
    }

    fn worker_pool(&self) -> Option<Vec<WorkerState>> {
        let after = self.behavior.pool_loaded_after?;
        let mut snapshots = self.pool_snapshots.borrow_mut();
        *snapshots += 1;
        Some(vec![
            WorkerState {
                loaded: *snapshots > after,
            },
            WorkerState { loaded: true },
        ])
    }

    fn has_entry(&self, convention: EntryConvention) -> bool {
        self.behavior.conventions.contains(&convention)
    }

    fn invoke_entry(&mut self, _convention: EntryConvention) -> Result<EntryReturn, ModuleFault> {
        *self.log.invocations.borrow_mut() += 1;
        self.behavior
            .outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Ok(EntryReturn::Unit))
    }

    fn attach_image_device(&mut self, device: ImageDevice) {
        self.log.devices.borrow_mut().push(device.work_dir().to_string());
    }
}

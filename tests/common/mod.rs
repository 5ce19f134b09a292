use azmon_select::config;
use azmon_select::datamodel::QueryTarget;
use azmon_select::gateway::MetricsGateway;
use azmon_select::resolver::{QueryTargetHandle, ResolverOptions, SelectionResolver};
use azmon_select::telemetry::init_tracing;
use std::sync::{Arc, Once};

pub mod fixtures;

static TRACING: Once = Once::new();

/// Installs the test subscriber once per test binary
pub fn ensure_tracing() {
    TRACING.call_once(|| {
        if let Ok(config) = config::load_configuration().and_then(|_| config::get()) {
            init_tracing(&config);
        }
    });
}

/// One query panel: the target it edits and the resolver bound to it
#[allow(dead_code)] // Not every test binary uses every field
pub struct TestPanel<G: MetricsGateway + 'static> {
    pub gateway: Arc<G>,
    pub target: QueryTargetHandle,
    pub resolver: SelectionResolver,
}

#[allow(dead_code)]
impl<G: MetricsGateway + 'static> TestPanel<G> {
    pub fn new(gateway: G, target: QueryTarget) -> Self {
        Self::with_options(gateway, target, ResolverOptions::default())
    }

    pub fn with_options(gateway: G, target: QueryTarget, options: ResolverOptions) -> Self {
        ensure_tracing();
        let gateway = Arc::new(gateway);
        let target = QueryTargetHandle::new(target);
        let resolver =
            SelectionResolver::new(gateway.clone(), target.clone()).with_options(options);
        Self {
            gateway,
            target,
            resolver,
        }
    }
}

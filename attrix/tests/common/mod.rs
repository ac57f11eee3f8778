#![allow(dead_code)]

use attrix::{
    Attrix, Context, DescribeError, Namespace, Parameters, Selector, Settings,
    testing::{MemoryPage, MockTransport},
};
use std::sync::{Arc, Mutex};

// ============================================================================
// Fixtures
// ============================================================================

pub struct Fixture {
    pub attrix: Attrix,
    pub page: Arc<MemoryPage>,
    pub transport: Arc<MockTransport>,
}

pub fn fixture(page: MemoryPage) -> Fixture {
    fixture_with(page, MockTransport::new(), Namespace::new(), Settings::new())
}

pub fn fixture_with(
    page: MemoryPage,
    transport: MockTransport,
    callbacks: Namespace,
    settings: Settings,
) -> Fixture {
    let page = Arc::new(page);
    let transport = Arc::new(transport);
    let attrix = Attrix::builder(page.clone(), transport.clone())
        .callbacks(callbacks)
        .settings(settings)
        .build();
    Fixture {
        attrix,
        page,
        transport,
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// Calls recorded by [`recording_handler`].
pub type Calls = Arc<Mutex<Vec<(Selector, Parameters)>>>;

/// A handler that records every call it receives.
pub fn recording_handler() -> (
    Calls,
    impl Fn(&Context, &Selector, Parameters) -> Result<(), DescribeError> + Send + Sync + 'static,
) {
    let calls: Calls = Arc::default();
    let recorded = calls.clone();
    let handler = move |_cx: &Context, element: &Selector, params: Parameters| {
        recorded.lock().unwrap().push((element.clone(), params));
        Ok::<_, DescribeError>(())
    };
    (calls, handler)
}

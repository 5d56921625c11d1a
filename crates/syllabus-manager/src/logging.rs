use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the fmt subscriber for the process.
///
/// Returns false when a global subscriber was already installed, so it is
/// safe to call from every test or embedding application.
pub fn init() -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
